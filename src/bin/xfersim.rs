//! 有损链路传输仿真
//!
//! 读取拓扑描述文件，用固定大小的 worker 池并发回放所有传输，输出链路与传输统计。

use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::{SystemTime, UNIX_EPOCH};

use clap::Parser;
use tracing::{error, info};
use xfersim_rs::net::RoutingMode;
use xfersim_rs::report::SimReport;
use xfersim_rs::sim::{SimConfig, Simulator};
use xfersim_rs::topo::load_path;

#[derive(Debug, Parser)]
#[command(
    name = "xfersim",
    about = "Replay transfers over a lossy, rate-limited topology with a fixed worker pool"
)]
struct Args {
    /// Topology description (line-prefixed records, or .json scenario)
    #[arg(long)]
    topology: PathBuf,

    /// Number of concurrent workers
    #[arg(long, default_value_t = 4)]
    workers: usize,

    /// Upper bound for the per-link loss probability drawn at load time
    #[arg(long, default_value_t = 0.1)]
    max_loss: f64,

    /// Seed for every random draw; defaults to the wall clock
    #[arg(long)]
    seed: Option<u64>,

    /// Path resolution: incident or shortest-path
    #[arg(long, default_value_t = RoutingMode::Incident)]
    routing: RoutingMode,

    /// Write the full report as JSON
    #[arg(long)]
    report_json: Option<PathBuf>,

    /// Include per-hop traces in the report
    #[arg(long)]
    hop_trace: bool,
}

fn main() -> ExitCode {
    // 初始化 tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_file(true)
        .with_line_number(true)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e}");
            ExitCode::FAILURE
        }
    }
}

fn run(args: Args) -> Result<(), Box<dyn std::error::Error>> {
    let seed = args.seed.unwrap_or_else(clock_seed);
    let config = SimConfig {
        workers: args.workers,
        max_loss: args.max_loss,
        seed,
        routing: args.routing,
    };
    config.validate()?;
    info!(workers = config.workers, max_loss = config.max_loss, seed, routing = %config.routing, "配置");

    let scenario = load_path(&args.topology, config.max_loss, seed)?;
    let mut sim = Simulator::new(scenario.topology, scenario.transfers, config)?;
    let outcome = sim.run()?;

    let report = SimReport::new(&sim, &outcome, args.hop_trace);
    print!("{report}");

    if let Some(path) = args.report_json {
        let json = serde_json::to_string_pretty(&report)?;
        fs::write(&path, json)?;
        info!(path = %path.display(), "已写入 JSON 报告");
    }
    Ok(())
}

fn clock_seed() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or(0)
}
