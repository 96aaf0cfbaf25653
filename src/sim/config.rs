//! 仿真配置

use serde::{Deserialize, Serialize};

use crate::net::RoutingMode;

/// 配置错误：在任何 worker 启动之前报告
#[derive(Debug, Clone, Copy, PartialEq, thiserror::Error)]
pub enum ConfigError {
    #[error("worker pool size must be positive")]
    NoWorkers,
    #[error("no transfers to simulate")]
    NoTransfers,
    #[error("maximum loss {0} must be in [0.0, 1.0]")]
    MaxLossOutOfRange(f64),
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SimConfig {
    /// worker 线程数
    pub workers: usize,
    /// 加载时为每条链路抽取 loss 的上界
    pub max_loss: f64,
    /// 全部随机性的种子
    pub seed: u64,
    #[serde(default)]
    pub routing: RoutingMode,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            workers: 4,
            max_loss: 0.1,
            seed: 0,
            routing: RoutingMode::Incident,
        }
    }
}

impl SimConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.workers == 0 {
            return Err(ConfigError::NoWorkers);
        }
        if !(0.0..=1.0).contains(&self.max_loss) {
            return Err(ConfigError::MaxLossOutOfRange(self.max_loss));
        }
        Ok(())
    }
}
