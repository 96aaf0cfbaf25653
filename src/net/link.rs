//! 链路类型
//!
//! 定义无向网络链路。损失率与传播时延在加载时确定，仿真期间只读。

use super::id::{LinkId, NodeId};
use crate::sim::SimTime;

/// 网络链路（无向）
#[derive(Debug, Clone)]
pub struct Link {
    pub id: LinkId,
    pub name: String,
    pub a: NodeId,
    pub b: NodeId,
    /// 标称数据速率（bits/sec）
    pub data_rate_bps: u64,
    /// 每次传输尝试的损坏概率，取值 [0, 1)
    pub loss: f64,
    /// 单次尝试的传播时延
    pub delay: SimTime,
}

impl Link {
    /// 链路是否直接连接 `x` 与 `y`（与端点顺序无关）
    pub fn connects(&self, x: NodeId, y: NodeId) -> bool {
        (self.a == x && self.b == y) || (self.a == y && self.b == x)
    }

    /// `n` 是否为链路的某个端点
    pub fn touches(&self, n: NodeId) -> bool {
        self.a == n || self.b == n
    }

    /// 返回与 `n` 相对的另一端；`n` 不是端点时返回 None
    pub fn other_end(&self, n: NodeId) -> Option<NodeId> {
        if self.a == n {
            Some(self.b)
        } else if self.b == n {
            Some(self.a)
        } else {
            None
        }
    }

    /// 考虑重传后的实际速率：`rate * hops / (hops + extra_hops)`
    pub fn effective_rate_bps(&self, hops: usize, extra_hops: u64) -> f64 {
        let total = hops as u64 + extra_hops;
        if total == 0 {
            return self.data_rate_bps as f64;
        }
        self.data_rate_bps as f64 * hops as f64 / total as f64
    }
}
