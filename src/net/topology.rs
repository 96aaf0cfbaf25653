//! 拓扑存储
//!
//! 持有全部节点与链路。加载完成后只读，仿真期间可被多个 worker 共享引用。

use std::collections::HashMap;

use super::id::{LinkId, NodeId};
use super::link::Link;
use super::node::{Node, NodeKind};
use crate::sim::SimTime;
use tracing::{debug, trace};

/// 拓扑构建错误
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum TopologyError {
    #[error("duplicate node name `{0}`")]
    DuplicateNode(String),
    #[error("link endpoint `{0}` does not name a known node")]
    UnknownNode(String),
    /// loss == 1.0 会让该跳的重传循环永不终止，因此在加载时即拒绝
    #[error("link `{link}` loss {loss} must be in [0.0, 1.0)")]
    LossOutOfRange { link: String, loss: f64 },
}

/// 网络拓扑
#[derive(Debug, Default, Clone)]
pub struct Topology {
    nodes: Vec<Node>,
    links: Vec<Link>,
    by_name: HashMap<String, NodeId>,
}

impl Topology {
    /// 添加主机节点
    pub fn add_host(&mut self, name: impl Into<String>) -> Result<NodeId, TopologyError> {
        self.add_node(NodeKind::Host, name.into())
    }

    /// 添加交换机节点
    pub fn add_switch(&mut self, name: impl Into<String>) -> Result<NodeId, TopologyError> {
        self.add_node(NodeKind::Switch, name.into())
    }

    fn add_node(&mut self, kind: NodeKind, name: String) -> Result<NodeId, TopologyError> {
        if self.by_name.contains_key(&name) {
            return Err(TopologyError::DuplicateNode(name));
        }
        let id = NodeId(self.nodes.len());
        trace!(?id, ?kind, name = %name, "添加节点");
        self.by_name.insert(name.clone(), id);
        self.nodes.push(Node::new(id, kind, name));
        Ok(id)
    }

    /// 按名称连接两个节点（创建无向链路，命名为 `link<i>`）
    pub fn connect(
        &mut self,
        a: &str,
        b: &str,
        data_rate_bps: u64,
        loss: f64,
        delay: SimTime,
    ) -> Result<LinkId, TopologyError> {
        let a = self.require(a)?;
        let b = self.require(b)?;
        let id = LinkId(self.links.len());
        let name = format!("link{}", id.0);
        // NaN 也会落入该分支
        if !(0.0..1.0).contains(&loss) {
            return Err(TopologyError::LossOutOfRange { link: name, loss });
        }
        debug!(?id, name = %name, ?a, ?b, data_rate_bps, loss, ?delay, "添加链路");
        self.links.push(Link {
            id,
            name,
            a,
            b,
            data_rate_bps,
            loss,
            delay,
        });
        Ok(id)
    }

    fn require(&self, name: &str) -> Result<NodeId, TopologyError> {
        self.node_id(name)
            .ok_or_else(|| TopologyError::UnknownNode(name.to_string()))
    }

    /// 覆盖节点缓冲区（仿真结束后由仿真器写入送达的负载）
    pub(crate) fn store_in_buffer(&mut self, id: NodeId, data: &[u8]) {
        if let Some(node) = self.nodes.get_mut(id.0) {
            node.store(data);
        }
    }

    pub fn node_id(&self, name: &str) -> Option<NodeId> {
        self.by_name.get(name).copied()
    }

    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.0]
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn link(&self, id: LinkId) -> &Link {
        &self.links[id.0]
    }

    /// 按存储顺序枚举全部链路
    pub fn links(&self) -> &[Link] {
        &self.links
    }

    /// 按两端节点名称查找链路（与顺序无关），返回存储顺序中的第一条
    pub fn link_between(&self, a: &str, b: &str) -> Option<&Link> {
        let (a, b) = (self.node_id(a)?, self.node_id(b)?);
        self.links.iter().find(|l| l.connects(a, b))
    }
}
