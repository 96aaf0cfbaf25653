//! 网络拓扑模块
//!
//! 此模块包含拓扑存储的组成部分（节点、链路）以及路径解析。

// 子模块声明
mod id;
mod link;
mod node;
mod routing;
mod topology;

// 重新导出公共接口
pub use id::{LinkId, NodeId};
pub use link::Link;
pub use node::{Node, NodeKind};
pub use routing::{PathResolver, ResolvedPath, RoutingMode};
pub use topology::{Topology, TopologyError};
