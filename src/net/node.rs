//! 节点类型
//!
//! 定义网络节点：主机（Host）与交换机（Switch）。

use super::id::NodeId;
use serde::{Deserialize, Serialize};

/// 节点种类
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NodeKind {
    Host,
    Switch,
}

/// 网络节点
#[derive(Debug, Clone)]
pub struct Node {
    id: NodeId,
    kind: NodeKind,
    name: String,
    /// 节点本地数据缓冲区（不参与仿真核心逻辑，仅供诊断与报告）
    buffer: Vec<u8>,
}

impl Node {
    /// 创建新节点
    pub fn new(id: NodeId, kind: NodeKind, name: impl Into<String>) -> Self {
        Self {
            id,
            kind,
            name: name.into(),
            buffer: Vec::new(),
        }
    }

    /// 获取节点标识符
    pub fn id(&self) -> NodeId {
        self.id
    }

    /// 获取节点种类
    pub fn kind(&self) -> NodeKind {
        self.kind
    }

    /// 获取节点名称
    pub fn name(&self) -> &str {
        &self.name
    }

    /// 最近一次写入的数据（仿真后为最后送达该节点的负载）
    pub fn buffer(&self) -> &[u8] {
        &self.buffer
    }

    /// 覆盖缓冲区内容，长度不受限制
    pub(crate) fn store(&mut self, data: &[u8]) {
        self.buffer.clear();
        self.buffer.extend_from_slice(data);
    }
}
