//! 场景加载
//!
//! 把输入文件（行格式描述或 JSON）转换为已填充的拓扑与待处理传输列表。

mod desc;
mod scenario;

pub use desc::parse_description;
pub use scenario::{
    LinkSpec, LoadError, MAX_DELAY_MS, MIN_DELAY_MS, Scenario, ScenarioSpec, TransferSpec,
    load_path,
};
