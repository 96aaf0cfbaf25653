//! 逐跳传输仿真
//!
//! 对一次传输的解析路径逐跳执行：每次尝试抽取 [0,1) 均匀随机数，
//! 小于链路 loss 即视为负载被损坏（随机一个字节被改写为大写字母）并在同一条链路上重传，
//! 直到某次尝试成功。每次尝试都计入实际时间，每跳只计一次理论时间。

use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::{debug, trace, warn};

use super::coordinator::LinkCoordinator;
use super::time::SimTime;
use super::transfer::Transfer;
use crate::net::{Link, LinkId, ResolvedPath, Topology};

/// 单跳诊断记录
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HopRecord {
    /// 从 1 开始的跳序号
    pub hop: usize,
    pub link: LinkId,
    pub link_name: String,
    /// 本跳是否发生过损坏（并因此重传）
    pub corrupted: bool,
    /// 本跳尝试次数（至少为 1）
    pub attempts: u32,
    /// 本跳计入的实际时间（delay * attempts）
    pub delay: SimTime,
}

/// 一次传输的仿真结果
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransferOutcome {
    pub index: usize,
    pub hops: usize,
    /// 整条路径上的重传次数
    pub extra_hops: u64,
    pub theoretical_time: SimTime,
    pub total_time: SimTime,
    pub throughput: f64,
    pub slowdown: f64,
    /// 到达目的地时的负载副本（可能已被损坏）
    pub delivered: Vec<u8>,
    pub trace: Vec<HopRecord>,
}

/// `hops / (hops + extra_hops)`；零跳路径视为 1.0
pub fn throughput(hops: usize, extra_hops: u64) -> f64 {
    let total = hops as u64 + extra_hops;
    if total == 0 {
        return 1.0;
    }
    hops as f64 / total as f64
}

/// `1 - theoretical / total`；总时间为零（零跳路径）时为 0
pub fn slowdown(theoretical: SimTime, total: SimTime) -> f64 {
    if total == SimTime::ZERO {
        return 0.0;
    }
    1.0 - theoretical.0 as f64 / total.0 as f64
}

/// 逐跳仿真器。共享只读拓扑与链路协调器，可在多个 worker 间复制使用。
#[derive(Debug, Clone, Copy)]
pub struct HopSimulator<'a> {
    topo: &'a Topology,
    links: &'a LinkCoordinator,
}

impl<'a> HopSimulator<'a> {
    pub fn new(topo: &'a Topology, links: &'a LinkCoordinator) -> Self {
        Self { topo, links }
    }

    /// 仿真第 `index` 个传输沿 `path` 的全部跳。
    ///
    /// 损坏只作用于负载的工作副本，`transfer` 本身不被修改。
    #[tracing::instrument(skip(self, transfer, path, rng), fields(from = %transfer.from, to = %transfer.to, hops = path.hop_count()))]
    pub fn simulate<R: Rng + ?Sized>(
        &self,
        index: usize,
        transfer: &Transfer,
        path: &ResolvedPath,
        rng: &mut R,
    ) -> TransferOutcome {
        let mut payload = transfer.payload.clone();
        let mut total_time = SimTime::ZERO;
        let mut theoretical_time = SimTime::ZERO;
        let mut extra_hops = 0u64;
        let mut trace = Vec::with_capacity(path.hop_count());

        if path.is_empty() {
            warn!(index, "未找到路径，传输按零跳完成");
        }

        for (i, &link_id) in path.links.iter().enumerate() {
            let link = self.topo.link(link_id);
            let retries = self.links.with_link(link_id, |counters| {
                let retries = attempt_until_clean(link, &mut payload, rng);
                counters.traversals += 1;
                counters.attempts += retries + 1;
                counters.corrupted += retries;
                retries
            });

            let attempts = retries + 1;
            let charged = SimTime(link.delay.0.saturating_mul(attempts));
            total_time = total_time.saturating_add(charged);
            theoretical_time = theoretical_time.saturating_add(link.delay);
            extra_hops += retries;

            debug!(
                hop = i + 1,
                link = %link.name,
                loss = link.loss,
                attempts,
                delay_ms = link.delay.as_millis(),
                actual_rate_bps = link.effective_rate_bps(path.hop_count(), extra_hops),
                "完成一跳"
            );
            trace.push(HopRecord {
                hop: i + 1,
                link: link_id,
                link_name: link.name.clone(),
                corrupted: retries > 0,
                attempts: u32::try_from(attempts).unwrap_or(u32::MAX),
                delay: charged,
            });
        }

        let hops = path.hop_count();
        let outcome = TransferOutcome {
            index,
            hops,
            extra_hops,
            theoretical_time,
            total_time,
            throughput: throughput(hops, extra_hops),
            slowdown: slowdown(theoretical_time, total_time),
            delivered: payload,
            trace,
        };
        debug!(
            theoretical_ms = theoretical_time.as_millis(),
            total_ms = total_time.as_millis(),
            extra_hops,
            throughput = outcome.throughput,
            slowdown = outcome.slowdown,
            "传输完成"
        );
        outcome
    }
}

/// 在同一条链路上反复尝试，直到一次抽样不小于 loss；返回重传次数。
///
/// 终止性依赖 `loss < 1.0`，该不变量由 [`Topology::connect`] 在加载时保证。
fn attempt_until_clean<R: Rng + ?Sized>(link: &Link, payload: &mut [u8], rng: &mut R) -> u64 {
    debug_assert!(link.loss < 1.0, "loss must be below 1.0");
    let mut retries = 0u64;
    while rng.gen_range(0.0..1.0) < link.loss {
        corrupt(payload, rng);
        retries += 1;
        trace!(link = %link.name, retries, "检测到损坏，重传");
    }
    retries
}

fn corrupt<R: Rng + ?Sized>(payload: &mut [u8], rng: &mut R) {
    if payload.is_empty() {
        return;
    }
    let at = rng.gen_range(0..payload.len());
    payload[at] = rng.gen_range(b'A'..=b'Z');
}
