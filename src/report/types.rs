use std::fmt;

use serde::{Deserialize, Serialize};

use crate::net::{NodeKind, RoutingMode};
use crate::sim::{HopRecord, SimConfig, SimOutcome, Simulator, Summary};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NodeRow {
    pub name: String,
    pub kind: NodeKind,
    /// 运行结束时节点缓冲区内容（最后送达的负载）
    #[serde(default)]
    pub buffer: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LinkRow {
    pub name: String,
    pub a: String,
    pub b: String,
    pub data_rate_bps: u64,
    pub loss: f64,
    pub delay_ms: u64,
    pub traversals: u64,
    pub attempts: u64,
    pub corrupted: u64,
    /// 仿真中观测到的损坏比例（无尝试时为 None）
    pub observed_loss: Option<f64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransferRow {
    pub index: usize,
    pub from: String,
    pub to: String,
    pub message: String,
    /// 到达目的地时的负载（可能已被损坏）
    pub delivered: String,
    pub hops: usize,
    pub extra_hops: u64,
    pub theoretical_ms: u64,
    pub actual_ms: u64,
    pub throughput: f64,
    pub slowdown: f64,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub hop_trace: Vec<HopRecord>,
}

/// 一次运行的完整报告（JSON）
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimReport {
    pub workers: usize,
    pub max_loss: f64,
    pub seed: u64,
    pub routing: RoutingMode,
    pub nodes: Vec<NodeRow>,
    pub links: Vec<LinkRow>,
    pub transfers: Vec<TransferRow>,
    pub summary: Summary,
}

impl SimReport {
    /// 由仿真器与其运行结果构建报告；`hop_trace` 为 false 时不保留逐跳记录
    pub fn new(sim: &Simulator, outcome: &SimOutcome, hop_trace: bool) -> Self {
        let topo = sim.topology();
        let SimConfig {
            workers,
            max_loss,
            seed,
            routing,
        } = *sim.config();

        let nodes = topo
            .nodes()
            .iter()
            .map(|n| NodeRow {
                name: n.name().to_string(),
                kind: n.kind(),
                buffer: String::from_utf8_lossy(n.buffer()).into_owned(),
            })
            .collect();

        let links = topo
            .links()
            .iter()
            .zip(&outcome.link_counters)
            .map(|(l, c)| LinkRow {
                name: l.name.clone(),
                a: topo.node(l.a).name().to_string(),
                b: topo.node(l.b).name().to_string(),
                data_rate_bps: l.data_rate_bps,
                loss: l.loss,
                delay_ms: l.delay.as_millis(),
                traversals: c.traversals,
                attempts: c.attempts,
                corrupted: c.corrupted,
                observed_loss: c.observed_loss(),
            })
            .collect();

        let transfers = sim
            .transfers()
            .iter()
            .zip(&outcome.transfers)
            .map(|(t, o)| TransferRow {
                index: o.index,
                from: t.from.clone(),
                to: t.to.clone(),
                message: String::from_utf8_lossy(&t.payload).into_owned(),
                delivered: String::from_utf8_lossy(&o.delivered).into_owned(),
                hops: o.hops,
                extra_hops: o.extra_hops,
                theoretical_ms: o.theoretical_time.as_millis(),
                actual_ms: o.total_time.as_millis(),
                throughput: o.throughput,
                slowdown: o.slowdown,
                hop_trace: if hop_trace { o.trace.clone() } else { Vec::new() },
            })
            .collect();

        Self {
            workers,
            max_loss,
            seed,
            routing,
            nodes,
            links,
            transfers,
            summary: outcome.summary,
        }
    }
}

fn percent(v: Option<f64>) -> String {
    match v {
        Some(v) => format!("{:.4}%", v * 100.0),
        None => "n/a".to_string(),
    }
}

/// 纯文本渲染（无颜色）
impl fmt::Display for SimReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "workers={} max_loss={:.2} seed={} routing={}",
            self.workers, self.max_loss, self.seed, self.routing
        )?;
        writeln!(f)?;
        for l in &self.links {
            writeln!(
                f,
                "link {} {}<->{} rate={}bps loss={:.4} delay={}ms attempts={} corrupted={} observed_loss={}",
                l.name,
                l.a,
                l.b,
                l.data_rate_bps,
                l.loss,
                l.delay_ms,
                l.attempts,
                l.corrupted,
                percent(l.observed_loss)
            )?;
        }
        writeln!(f)?;
        for t in &self.transfers {
            writeln!(
                f,
                "transfer {} {}->{} hops={} extra_hops={} theoretical={}ms actual={}ms throughput={:.4} slowdown={:.4}",
                t.index,
                t.from,
                t.to,
                t.hops,
                t.extra_hops,
                t.theoretical_ms,
                t.actual_ms,
                t.throughput,
                t.slowdown
            )?;
            for h in &t.hop_trace {
                writeln!(
                    f,
                    "  hop {} via {} attempts={} corrupted={} delay={}ms",
                    h.hop,
                    h.link_name,
                    h.attempts,
                    h.corrupted,
                    h.delay.as_millis()
                )?;
            }
        }
        writeln!(f)?;
        writeln!(f, "average loss: {}", percent(self.summary.mean_loss))?;
        writeln!(
            f,
            "average throughput with loss cap {:.2}: {}",
            self.max_loss,
            percent(self.summary.mean_throughput)
        )?;
        writeln!(
            f,
            "average slowdown with loss cap {:.2}: {}",
            self.max_loss,
            percent(self.summary.mean_slowdown)
        )
    }
}
