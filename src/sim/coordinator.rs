//! 链路协调器
//!
//! 每条链路一把互斥锁，保护该链路在仿真期间累积的可变诊断状态。
//! 经过不同链路的传输可以并行推进；两次传输需要同一条链路时串行化。
//! 链路本身的 loss/delay 字段只读，不经过这里。

use std::sync::{Mutex, PoisonError};

use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::net::LinkId;

/// 单条链路的运行计数
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinkCounters {
    /// 完成的跳数（每次成功传输计一次）
    pub traversals: u64,
    /// 总尝试次数，包含被损坏后重传的尝试
    pub attempts: u64,
    /// 被损坏的尝试次数
    pub corrupted: u64,
}

impl LinkCounters {
    /// 观测到的损坏比例；没有任何尝试时为 None
    pub fn observed_loss(&self) -> Option<f64> {
        (self.attempts > 0).then(|| self.corrupted as f64 / self.attempts as f64)
    }
}

#[derive(Debug)]
pub struct LinkCoordinator {
    links: Vec<Mutex<LinkCounters>>,
}

impl LinkCoordinator {
    pub fn new(link_count: usize) -> Self {
        Self {
            links: (0..link_count)
                .map(|_| Mutex::new(LinkCounters::default()))
                .collect(),
        }
    }

    /// 独占访问 `link` 的状态并运行 `f`。
    ///
    /// 锁在任何退出路径上都会释放（包括 `f` panic）。某个持锁 worker panic 后，
    /// 计数仍然可用：panic 只会发生在更新之前或之后，不会留下半写的计数。
    pub fn with_link<T>(&self, link: LinkId, f: impl FnOnce(&mut LinkCounters) -> T) -> T {
        let mut guard = self.links[link.0]
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        trace!(?link, "获得链路锁");
        f(&mut guard)
    }

    pub fn len(&self) -> usize {
        self.links.len()
    }

    pub fn is_empty(&self) -> bool {
        self.links.is_empty()
    }

    /// 在全部 worker 汇合后取出最终计数
    pub fn into_counters(self) -> Vec<LinkCounters> {
        self.links
            .into_iter()
            .map(|m| m.into_inner().unwrap_or_else(PoisonError::into_inner))
            .collect()
    }
}
