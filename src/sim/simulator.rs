//! 仿真器
//!
//! 固定大小的 worker 池：所有 worker 同时启动，循环地从传输队列认领下标，
//! 依次执行 路径解析 → 逐跳仿真 → 结果写入，直到队列耗尽；随后在汇合屏障处统一回收。

use std::sync::atomic::{AtomicBool, Ordering};
use std::thread;

use tracing::{debug, error, info};

use super::config::{ConfigError, SimConfig};
use super::coordinator::{LinkCoordinator, LinkCounters};
use super::hop::{HopSimulator, TransferOutcome};
use super::queue::TransferQueue;
use super::rng::transfer_rng;
use super::stats::{ResultSlots, SlotError, Summary};
use super::transfer::Transfer;
use crate::net::{PathResolver, Topology};

/// 仿真运行错误。任何一种都会让整次运行失败，不返回部分结果。
#[derive(Debug, thiserror::Error)]
pub enum SimError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("failed to spawn worker {worker}: {source}")]
    Spawn {
        worker: usize,
        #[source]
        source: std::io::Error,
    },
    #[error("worker {worker} panicked")]
    WorkerPanicked { worker: usize },
    #[error(transparent)]
    Slot(#[from] SlotError),
}

/// 一次完整运行的结果
#[derive(Debug, Clone)]
pub struct SimOutcome {
    /// 按传输原始下标排列
    pub transfers: Vec<TransferOutcome>,
    /// 按链路存储顺序排列
    pub link_counters: Vec<LinkCounters>,
    pub summary: Summary,
}

/// 仿真器：持有加载完成的拓扑、待处理传输与配置
#[derive(Debug)]
pub struct Simulator {
    topology: Topology,
    transfers: Vec<Transfer>,
    config: SimConfig,
}

impl Simulator {
    /// 校验配置并构造仿真器；配置错误在任何 worker 启动前返回
    pub fn new(
        topology: Topology,
        transfers: Vec<Transfer>,
        config: SimConfig,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        if transfers.is_empty() {
            return Err(ConfigError::NoTransfers);
        }
        Ok(Self {
            topology,
            transfers,
            config,
        })
    }

    pub fn topology(&self) -> &Topology {
        &self.topology
    }

    pub fn transfers(&self) -> &[Transfer] {
        &self.transfers
    }

    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    /// 运行全部传输直到队列耗尽。
    ///
    /// 成功后每个目的节点的缓冲区保存送达它的、下标最大的那个传输的负载。
    #[tracing::instrument(skip(self), fields(workers = self.config.workers, transfers = self.transfers.len(), links = self.topology.links().len()))]
    pub fn run(&mut self) -> Result<SimOutcome, SimError> {
        info!("▶️  开始运行仿真");

        let queue = TransferQueue::new(self.transfers.len());
        let links = LinkCoordinator::new(self.topology.links().len());
        let slots = ResultSlots::new(self.transfers.len());
        let abort = AtomicBool::new(false);

        let ctx = WorkerCtx {
            topo: &self.topology,
            transfers: &self.transfers,
            config: &self.config,
            queue: &queue,
            links: &links,
            slots: &slots,
            abort: &abort,
        };

        thread::scope(|s| {
            let mut first_err = None;
            let mut handles = Vec::with_capacity(self.config.workers);
            for worker in 0..self.config.workers {
                let spawned = thread::Builder::new()
                    .name(format!("xfer-worker-{worker}"))
                    .spawn_scoped(s, move || ctx.run(worker));
                match spawned {
                    Ok(handle) => handles.push((worker, handle)),
                    Err(source) => {
                        error!(worker, %source, "worker 创建失败，终止运行");
                        abort.store(true, Ordering::Release);
                        first_err = Some(SimError::Spawn { worker, source });
                        break;
                    }
                }
            }

            for (worker, handle) in handles {
                match handle.join() {
                    Ok(Ok(processed)) => debug!(worker, processed, "worker 已退出"),
                    Ok(Err(e)) => {
                        error!(worker, %e, "worker 写入结果失败");
                        first_err.get_or_insert(SimError::Slot(e));
                    }
                    Err(_) => {
                        error!(worker, "worker panic");
                        first_err.get_or_insert(SimError::WorkerPanicked { worker });
                    }
                }
            }

            first_err.map_or(Ok(()), Err)
        })?;

        let transfers = slots.into_outcomes()?;
        let link_counters = links.into_counters();
        let losses: Vec<f64> = self.topology.links().iter().map(|l| l.loss).collect();
        let summary = Summary::compute(&losses, &transfers);

        for (t, o) in self.transfers.iter().zip(&transfers) {
            if let Some(dst) = self.topology.node_id(&t.to) {
                self.topology.store_in_buffer(dst, &o.delivered);
            }
        }

        info!(
            mean_loss = ?summary.mean_loss,
            mean_throughput = ?summary.mean_throughput,
            mean_slowdown = ?summary.mean_slowdown,
            "✅ 仿真完成"
        );

        Ok(SimOutcome {
            transfers,
            link_counters,
            summary,
        })
    }
}

/// 每个 worker 看到的共享状态
#[derive(Clone, Copy)]
struct WorkerCtx<'a> {
    topo: &'a Topology,
    transfers: &'a [Transfer],
    config: &'a SimConfig,
    queue: &'a TransferQueue,
    links: &'a LinkCoordinator,
    slots: &'a ResultSlots,
    abort: &'a AtomicBool,
}

impl WorkerCtx<'_> {
    #[tracing::instrument(skip(self))]
    fn run(self, worker: usize) -> Result<usize, SlotError> {
        debug!("进入 worker");
        let resolver = PathResolver::new(self.topo, self.config.routing);
        let sim = HopSimulator::new(self.topo, self.links);
        let mut processed = 0;

        while !self.abort.load(Ordering::Acquire) {
            let Some(index) = self.queue.claim_next() else {
                debug!("没有剩余传输");
                break;
            };
            let transfer = &self.transfers[index];
            debug!(index, "开始处理传输");

            let path = resolver.resolve(&transfer.from, &transfer.to);
            let mut rng = transfer_rng(self.config.seed, index);
            let outcome = sim.simulate(index, transfer, &path, &mut rng);

            if let Err(e) = self.slots.record(outcome) {
                self.abort.store(true, Ordering::Release);
                return Err(e);
            }
            processed += 1;
        }

        Ok(processed)
    }
}
