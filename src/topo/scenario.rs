//! 场景描述
//!
//! 与输入格式无关的中间表示：行格式描述文件与 JSON 场景文件都先解析为
//! [`ScenarioSpec`]，再统一构建为拓扑与传输列表。未显式给出的链路 loss/delay
//! 在构建时按链路存储顺序从种子随机源中抽取。

use std::fs;
use std::path::{Path, PathBuf};

use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use super::desc::parse_description;
use crate::net::{Topology, TopologyError};
use crate::sim::{SimTime, Transfer, topology_rng};

/// 链路时延下界（毫秒），随机抽取与显式给出的值都受其约束
pub const MIN_DELAY_MS: u64 = 1;
/// 链路时延上界（毫秒，含）
pub const MAX_DELAY_MS: u64 = 20;

/// 加载错误
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("line {line}: {reason}")]
    Parse { line: usize, reason: String },
    #[error("invalid scenario JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error(transparent)]
    Topology(#[from] TopologyError),
    #[error("maximum loss {0} must be in [0.0, 1.0]")]
    MaxLossOutOfRange(f64),
    #[error("link {a}-{b}: explicit loss {loss} exceeds the maximum {max_loss}")]
    LossAboveCap {
        a: String,
        b: String,
        loss: f64,
        max_loss: f64,
    },
    #[error("link {a}-{b}: explicit delay {delay_ms}ms must be in [1, 20] ms")]
    DelayOutOfRange { a: String, b: String, delay_ms: u64 },
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ScenarioSpec {
    #[serde(default)]
    pub hosts: Vec<String>,
    #[serde(default)]
    pub switches: Vec<String>,
    #[serde(default)]
    pub links: Vec<LinkSpec>,
    #[serde(default)]
    pub transfers: Vec<TransferSpec>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LinkSpec {
    pub a: String,
    pub b: String,
    pub rate_bps: u64,
    /// 省略时随机抽取
    #[serde(default)]
    pub loss: Option<f64>,
    /// 省略时随机抽取
    #[serde(default)]
    pub delay_ms: Option<u64>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransferSpec {
    pub from: String,
    pub to: String,
    #[serde(default)]
    pub message: String,
}

/// 构建完成的场景
#[derive(Debug, Clone)]
pub struct Scenario {
    pub topology: Topology,
    pub transfers: Vec<Transfer>,
}

impl ScenarioSpec {
    /// 构建拓扑与传输列表。
    ///
    /// 每条链路都会消耗一次 loss 抽样与一次 delay 抽样（即使被显式值覆盖），
    /// 因此改动某条链路的显式参数不会影响其他链路抽到的值。
    pub fn build(&self, max_loss: f64, seed: u64) -> Result<Scenario, LoadError> {
        if !(0.0..=1.0).contains(&max_loss) {
            return Err(LoadError::MaxLossOutOfRange(max_loss));
        }

        let mut topology = Topology::default();
        for h in &self.hosts {
            topology.add_host(h.as_str())?;
        }
        for s in &self.switches {
            topology.add_switch(s.as_str())?;
        }

        let mut rng = topology_rng(seed);
        for l in &self.links {
            let drawn_loss = rng.gen_range(0.0..1.0) * max_loss;
            let drawn_delay = rng.gen_range(MIN_DELAY_MS..=MAX_DELAY_MS);

            let loss = match l.loss {
                Some(loss) if loss > max_loss => {
                    return Err(LoadError::LossAboveCap {
                        a: l.a.clone(),
                        b: l.b.clone(),
                        loss,
                        max_loss,
                    });
                }
                Some(loss) => loss,
                None => drawn_loss,
            };
            let delay_ms = match l.delay_ms {
                Some(delay_ms) if !(MIN_DELAY_MS..=MAX_DELAY_MS).contains(&delay_ms) => {
                    return Err(LoadError::DelayOutOfRange {
                        a: l.a.clone(),
                        b: l.b.clone(),
                        delay_ms,
                    });
                }
                Some(delay_ms) => delay_ms,
                None => drawn_delay,
            };
            let delay = SimTime::from_millis(delay_ms);
            topology.connect(&l.a, &l.b, l.rate_bps, loss, delay)?;
        }

        let transfers: Vec<Transfer> = self
            .transfers
            .iter()
            .map(|t| Transfer::new(t.from.as_str(), t.to.as_str(), t.message.as_bytes()))
            .collect();

        debug!(
            hosts = self.hosts.len(),
            switches = self.switches.len(),
            links = self.links.len(),
            transfers = transfers.len(),
            "场景构建完成"
        );
        Ok(Scenario {
            topology,
            transfers,
        })
    }
}

/// 读取场景文件：`.json` 按 JSON 场景解析，其余按行格式描述解析
#[tracing::instrument]
pub fn load_path(path: &Path, max_loss: f64, seed: u64) -> Result<Scenario, LoadError> {
    let raw = fs::read_to_string(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let is_json = path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
    let spec = if is_json {
        serde_json::from_str::<ScenarioSpec>(&raw)?
    } else {
        parse_description(&raw)?
    };
    info!(json = is_json, "📄 场景文件读取成功");
    spec.build(max_loss, seed)
}
