//! 路径解析
//!
//! 把 (源, 目的) 名称对转换为要逐跳仿真的有序链路序列。
//!
//! 默认的 [`RoutingMode::Incident`] 并不做图搜索：
//! - 若存在直接连接两端的链路，路径就是这一条链路；
//! - 否则按存储顺序收集所有与源或目的相连的链路，并把结果当作一条路径逐跳使用。
//!
//! 这是一种近似，而不是可达性路由。需要真正的最短跳数路径时可选
//! [`RoutingMode::ShortestPath`]（无向图上的 BFS）。

use std::collections::VecDeque;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use super::id::{LinkId, NodeId};
use super::topology::Topology;

/// 路径解析策略
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RoutingMode {
    /// 直连优先，否则取所有与两端相连的链路
    #[default]
    Incident,
    /// 按跳数的最短路径，平局时按链路存储顺序
    ShortestPath,
}

impl fmt::Display for RoutingMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RoutingMode::Incident => write!(f, "incident"),
            RoutingMode::ShortestPath => write!(f, "shortest-path"),
        }
    }
}

impl FromStr for RoutingMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "incident" => Ok(RoutingMode::Incident),
            "shortest-path" | "shortest_path" => Ok(RoutingMode::ShortestPath),
            other => Err(format!(
                "unknown routing mode `{other}` (expected incident or shortest-path)"
            )),
        }
    }
}

/// 一次传输解析得到的路径。每次传输单独构建，不缓存也不共享。
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResolvedPath {
    /// 按跳顺序排列的链路，可能包含重复
    pub links: Vec<LinkId>,
    /// 是否命中直连
    pub direct: bool,
}

impl ResolvedPath {
    pub fn hop_count(&self) -> usize {
        self.links.len()
    }

    pub fn is_empty(&self) -> bool {
        self.links.is_empty()
    }
}

/// 路径解析器。只持有拓扑的共享引用，所有中间状态都在单次调用内。
#[derive(Debug, Clone, Copy)]
pub struct PathResolver<'a> {
    topo: &'a Topology,
    mode: RoutingMode,
}

impl<'a> PathResolver<'a> {
    pub fn new(topo: &'a Topology, mode: RoutingMode) -> Self {
        Self { topo, mode }
    }

    /// 解析 `from` 到 `to` 的路径；找不到任何链路时返回空路径
    #[tracing::instrument(skip(self), fields(mode = %self.mode))]
    pub fn resolve(&self, from: &str, to: &str) -> ResolvedPath {
        let a = self.topo.node_id(from);
        let b = self.topo.node_id(to);
        let path = match self.mode {
            RoutingMode::Incident => self.incident(a, b),
            RoutingMode::ShortestPath => match (a, b) {
                (Some(a), Some(b)) => self.shortest(a, b),
                _ => ResolvedPath::default(),
            },
        };
        debug!(hops = path.hop_count(), direct = path.direct, "路径解析完成");
        path
    }

    fn incident(&self, a: Option<NodeId>, b: Option<NodeId>) -> ResolvedPath {
        let mut links = Vec::new();
        for link in self.topo.links() {
            if let (Some(a), Some(b)) = (a, b) {
                if link.connects(a, b) {
                    trace!(link = %link.name, "找到直连链路");
                    return ResolvedPath {
                        links: vec![link.id],
                        direct: true,
                    };
                }
            }
            // 同时触及两端的链路会被追加两次
            if a.is_some_and(|a| link.touches(a)) {
                links.push(link.id);
            }
            if b.is_some_and(|b| link.touches(b)) {
                links.push(link.id);
            }
        }
        ResolvedPath {
            links,
            direct: false,
        }
    }

    fn shortest(&self, src: NodeId, dst: NodeId) -> ResolvedPath {
        if src == dst {
            return ResolvedPath::default();
        }

        let n = self.topo.nodes().len();
        let mut adj: Vec<Vec<(NodeId, LinkId)>> = vec![Vec::new(); n];
        for link in self.topo.links() {
            adj[link.a.0].push((link.b, link.id));
            if link.a != link.b {
                adj[link.b.0].push((link.a, link.id));
            }
        }

        // 从 src 出发 BFS，记录到达每个节点所经过的链路
        let mut via: Vec<Option<(NodeId, LinkId)>> = vec![None; n];
        let mut seen = vec![false; n];
        let mut q: VecDeque<NodeId> = VecDeque::new();
        seen[src.0] = true;
        q.push_back(src);

        while let Some(v) = q.pop_front() {
            if v == dst {
                break;
            }
            for &(next, link) in &adj[v.0] {
                if !seen[next.0] {
                    seen[next.0] = true;
                    via[next.0] = Some((v, link));
                    q.push_back(next);
                }
            }
        }

        if !seen[dst.0] {
            return ResolvedPath::default(); // unreachable
        }

        let mut links = Vec::new();
        let mut cur = dst;
        while let Some((prev, link)) = via[cur.0] {
            links.push(link);
            cur = prev;
        }
        links.reverse();
        let direct = links.len() == 1;
        ResolvedPath { links, direct }
    }
}
