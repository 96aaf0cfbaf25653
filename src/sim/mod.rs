//! 仿真核心模块
//!
//! 此模块包含并发传输仿真的核心组件：传输队列、链路协调器、逐跳仿真、
//! 结果汇总以及驱动它们的 worker 池。

// 子模块声明
mod config;
mod coordinator;
mod hop;
mod queue;
mod rng;
mod simulator;
mod stats;
mod time;
mod transfer;

// 重新导出公共接口
pub use config::{ConfigError, SimConfig};
pub use coordinator::{LinkCoordinator, LinkCounters};
pub use hop::{HopRecord, HopSimulator, TransferOutcome, slowdown, throughput};
pub use queue::TransferQueue;
pub use rng::{topology_rng, transfer_rng};
pub use simulator::{SimError, SimOutcome, Simulator};
pub use stats::{ResultSlots, SlotError, Summary, mean};
pub use time::SimTime;
pub use transfer::Transfer;
