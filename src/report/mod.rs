//! 运行报告
//!
//! 把仿真结果整理成可序列化的结构，供终端输出或写入 JSON 文件。

mod types;

pub use types::{LinkRow, NodeRow, SimReport, TransferRow};
