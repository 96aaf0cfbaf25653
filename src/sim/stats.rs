//! 统计汇总
//!
//! 每个传输的结果写入与其原始下标对应的槽位，每个槽位只允许写一次。
//! 全部 worker 汇合之后再做只读的均值归约。

use std::sync::OnceLock;

use serde::{Deserialize, Serialize};

use super::hop::TransferOutcome;

/// 槽位写入/收集失败
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum SlotError {
    #[error("result slot {0} was written twice")]
    Duplicate(usize),
    #[error("result slot {0} is out of range")]
    OutOfRange(usize),
    #[error("result slot {0} was never written")]
    Missing(usize),
}

/// 按传输下标寻址的一次性结果槽位
#[derive(Debug)]
pub struct ResultSlots {
    slots: Vec<OnceLock<TransferOutcome>>,
}

impl ResultSlots {
    pub fn new(len: usize) -> Self {
        Self {
            slots: (0..len).map(|_| OnceLock::new()).collect(),
        }
    }

    /// 把结果写入 `outcome.index` 对应的槽位
    pub fn record(&self, outcome: TransferOutcome) -> Result<(), SlotError> {
        let index = outcome.index;
        let slot = self.slots.get(index).ok_or(SlotError::OutOfRange(index))?;
        slot.set(outcome).map_err(|_| SlotError::Duplicate(index))
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// 收集全部结果（按下标顺序）；任何空槽位都是错误
    pub fn into_outcomes(self) -> Result<Vec<TransferOutcome>, SlotError> {
        self.slots
            .into_iter()
            .enumerate()
            .map(|(i, slot)| slot.into_inner().ok_or(SlotError::Missing(i)))
            .collect()
    }
}

/// 汇总统计。对空集合给出 None 而不是 NaN。
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Summary {
    pub mean_loss: Option<f64>,
    pub mean_throughput: Option<f64>,
    pub mean_slowdown: Option<f64>,
}

impl Summary {
    pub fn compute(link_losses: &[f64], outcomes: &[TransferOutcome]) -> Self {
        Self {
            mean_loss: mean(link_losses.iter().copied()),
            mean_throughput: mean(outcomes.iter().map(|o| o.throughput)),
            mean_slowdown: mean(outcomes.iter().map(|o| o.slowdown)),
        }
    }
}

/// 算术平均；空迭代器返回 None
pub fn mean(values: impl IntoIterator<Item = f64>) -> Option<f64> {
    let (sum, n) = values
        .into_iter()
        .fold((0.0, 0usize), |(sum, n), v| (sum + v, n + 1));
    (n > 0).then(|| sum / n as f64)
}
