//! 传输队列
//!
//! 所有 worker 共享的单调游标。每次认领原子地读取并递增游标，
//! 因此每个下标恰好被一个 worker 认领一次，认领顺序严格递增且无空洞。

use std::sync::atomic::{AtomicUsize, Ordering};

use tracing::trace;

#[derive(Debug)]
pub struct TransferQueue {
    next: AtomicUsize,
    len: usize,
}

impl TransferQueue {
    pub fn new(len: usize) -> Self {
        Self {
            next: AtomicUsize::new(0),
            len,
        }
    }

    /// 认领下一个传输下标；队列耗尽时返回 None。
    ///
    /// 游标不会越过 `len`，耗尽后的重复调用不再改变状态。
    pub fn claim_next(&self) -> Option<usize> {
        let claimed = self
            .next
            .fetch_update(Ordering::AcqRel, Ordering::Acquire, |n| {
                (n < self.len).then_some(n + 1)
            })
            .ok();
        trace!(?claimed, "认领传输");
        claimed
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }
}
