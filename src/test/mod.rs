mod path_resolver;
mod queue;
mod report;
mod topology;

use crate::net::Topology;
use crate::sim::SimTime;

/// h0 - s0 - s1 - h1 plus a spur s0 - h2, every link lossless unless overridden.
fn line_topology(delays_ms: [u64; 4]) -> Topology {
    let mut topo = Topology::default();
    for h in ["h0", "h1", "h2"] {
        topo.add_host(h).expect("host");
    }
    for s in ["s0", "s1"] {
        topo.add_switch(s).expect("switch");
    }
    topo.connect("h0", "s0", 1_000, 0.0, SimTime::from_millis(delays_ms[0]))
        .expect("link0");
    topo.connect("s0", "s1", 1_000, 0.0, SimTime::from_millis(delays_ms[1]))
        .expect("link1");
    topo.connect("s1", "h1", 1_000, 0.0, SimTime::from_millis(delays_ms[2]))
        .expect("link2");
    topo.connect("s0", "h2", 1_000, 0.0, SimTime::from_millis(delays_ms[3]))
        .expect("link3");
    topo
}
