//! 随机源
//!
//! 每个传输拥有独立的、由 (seed, 下标) 决定的随机序列，
//! 因此结果与 worker 数量和调度顺序无关。

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

/// 为第 `index` 个传输构造随机源
pub fn transfer_rng(seed: u64, index: usize) -> ChaCha8Rng {
    ChaCha8Rng::seed_from_u64(mix64(seed ^ (index as u64).wrapping_mul(0x9E3779B97F4A7C15)))
}

/// 加载拓扑时抽取链路参数所用的随机源
pub fn topology_rng(seed: u64) -> ChaCha8Rng {
    ChaCha8Rng::seed_from_u64(mix64(seed))
}

/// splitmix64
pub(crate) fn mix64(mut x: u64) -> u64 {
    x = x.wrapping_add(0x9E3779B97F4A7C15);
    let mut z = x;
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58476D1CE4E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D049BB133111EB);
    z ^ (z >> 31)
}
