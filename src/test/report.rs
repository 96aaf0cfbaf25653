use crate::net::RoutingMode;
use crate::report::SimReport;
use crate::sim::{SimConfig, Simulator, Transfer};

use super::line_topology;

fn run(hop_trace: bool) -> SimReport {
    let topo = line_topology([5, 7, 3, 1]);
    let transfers = vec![
        Transfer::new("h0", "h1", "abc"),
        Transfer::new("s0", "s1", "direct"),
    ];
    let config = SimConfig {
        workers: 2,
        max_loss: 0.0,
        seed: 1,
        routing: RoutingMode::Incident,
    };
    let mut sim = Simulator::new(topo, transfers, config).unwrap();
    let outcome = sim.run().unwrap();
    SimReport::new(&sim, &outcome, hop_trace)
}

#[test]
fn report_rows_follow_storage_order() {
    let report = run(false);
    assert_eq!(report.nodes.len(), 5);
    assert_eq!(report.links.len(), 4);
    assert_eq!(report.links[1].a, "s0");
    assert_eq!(report.links[1].b, "s1");
    assert_eq!(report.links[1].delay_ms, 7);

    let t0 = &report.transfers[0];
    assert_eq!(t0.hops, 2);
    assert_eq!(t0.theoretical_ms, 8);
    assert_eq!(t0.actual_ms, 8);
    assert_eq!(t0.delivered, "abc");
    assert!(t0.hop_trace.is_empty());

    let h1 = report.nodes.iter().find(|n| n.name == "h1").expect("h1 row");
    assert_eq!(h1.buffer, "abc");

    // link0 is used by transfer 0 only; link1 by transfer 1 only
    assert_eq!(report.links[0].traversals, 1);
    assert_eq!(report.links[1].traversals, 1);
    assert_eq!(report.links[3].observed_loss, None);
}

#[test]
fn report_serializes_to_json_and_renders_text() {
    let report = run(true);
    assert_eq!(report.transfers[1].hop_trace.len(), 1);

    let json = serde_json::to_string(&report).expect("serialize");
    let decoded: SimReport = serde_json::from_str(&json).expect("deserialize");
    assert_eq!(decoded.transfers.len(), 2);
    assert_eq!(decoded.routing, RoutingMode::Incident);

    let text = report.to_string();
    assert!(text.contains("link link1 s0<->s1"));
    assert!(text.contains("transfer 0 h0->h1 hops=2"));
    assert!(text.contains("  hop 1 via link1"));
    assert!(text.contains("average throughput with loss cap 0.00: 100.0000%"));
    assert!(text.ends_with("average slowdown with loss cap 0.00: 0.0000%\n"));
    assert_eq!(text.lines().filter(|l| l.starts_with("link ")).count(), 4);
}
