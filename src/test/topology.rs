use crate::net::{LinkId, NodeKind, Topology, TopologyError};
use crate::sim::SimTime;

use super::line_topology;

#[test]
fn topology_assigns_ids_and_link_names_in_storage_order() {
    let topo = line_topology([1, 2, 3, 4]);

    assert_eq!(topo.nodes().len(), 5);
    let hosts = topo.nodes().iter().filter(|n| n.kind() == NodeKind::Host).count();
    assert_eq!(hosts, 3);
    assert_eq!(topo.node(topo.node_id("s0").unwrap()).kind(), NodeKind::Switch);

    let names: Vec<&str> = topo.links().iter().map(|l| l.name.as_str()).collect();
    assert_eq!(names, ["link0", "link1", "link2", "link3"]);
    assert_eq!(topo.link(LinkId(2)).delay, SimTime::from_millis(3));
}

#[test]
fn link_between_is_order_independent() {
    let topo = line_topology([1, 2, 3, 4]);

    let fwd = topo.link_between("s0", "s1").expect("s0-s1");
    let rev = topo.link_between("s1", "s0").expect("s1-s0");
    assert_eq!(fwd.id, rev.id);
    assert_eq!(fwd.id, LinkId(1));

    assert!(topo.link_between("h0", "h1").is_none());
    assert!(topo.link_between("h0", "nowhere").is_none());
}

#[test]
fn topology_rejects_duplicate_names_across_variants() {
    let mut topo = Topology::default();
    topo.add_host("a").unwrap();
    assert_eq!(
        topo.add_switch("a"),
        Err(TopologyError::DuplicateNode("a".to_string()))
    );
}

#[test]
fn topology_rejects_unknown_endpoints() {
    let mut topo = Topology::default();
    topo.add_host("a").unwrap();
    let err = topo
        .connect("a", "ghost", 10, 0.1, SimTime::from_millis(1))
        .expect_err("unknown endpoint");
    assert_eq!(err, TopologyError::UnknownNode("ghost".to_string()));
    assert!(topo.links().is_empty());
}

#[test]
fn topology_rejects_degenerate_loss() {
    let mut topo = Topology::default();
    topo.add_host("a").unwrap();
    topo.add_host("b").unwrap();

    for loss in [1.0, 1.5, -0.1, f64::NAN] {
        let err = topo
            .connect("a", "b", 10, loss, SimTime::from_millis(1))
            .expect_err("loss out of range");
        assert!(matches!(err, TopologyError::LossOutOfRange { .. }), "{err:?}");
    }
    assert!(topo.links().is_empty());

    topo.connect("a", "b", 10, 0.999, SimTime::from_millis(1))
        .expect("loss just below 1.0 is allowed");
}

#[test]
fn node_buffers_grow_without_limit() {
    let mut topo = line_topology([1, 1, 1, 1]);
    let h0 = topo.node_id("h0").unwrap();
    assert!(topo.node(h0).buffer().is_empty());

    topo.store_in_buffer(h0, b"message");
    assert_eq!(topo.node(h0).buffer(), b"message");

    let long = vec![b'x'; 4096];
    topo.store_in_buffer(h0, &long);
    assert_eq!(topo.node(h0).buffer().len(), 4096);
}

#[test]
fn link_effective_rate_scales_with_retries() {
    let topo = line_topology([1, 1, 1, 1]);
    let link = topo.link(LinkId(0));
    assert_eq!(link.effective_rate_bps(3, 0), 1_000.0);
    assert_eq!(link.effective_rate_bps(3, 1), 750.0);
    assert_eq!(link.effective_rate_bps(0, 0), 1_000.0);
    assert_eq!(link.other_end(link.a), Some(link.b));
}
