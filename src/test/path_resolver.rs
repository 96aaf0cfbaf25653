use crate::net::{LinkId, PathResolver, ResolvedPath, RoutingMode};

use super::line_topology;

fn ids(path: &ResolvedPath) -> Vec<usize> {
    path.links.iter().map(|l| l.0).collect()
}

#[test]
fn direct_link_short_circuits_even_after_incident_links() {
    // link0 (h0-s0) touches s0 and is scanned first; the direct s0-s1 link still wins.
    let topo = line_topology([1, 1, 1, 1]);
    let resolver = PathResolver::new(&topo, RoutingMode::Incident);

    let path = resolver.resolve("s0", "s1");
    assert_eq!(path.links, vec![LinkId(1)]);
    assert!(path.direct);
    assert_eq!(path.hop_count(), 1);

    let rev = resolver.resolve("s1", "s0");
    assert_eq!(rev, path);
}

#[test]
fn without_direct_link_incident_links_are_collected_in_storage_order() {
    let topo = line_topology([1, 1, 1, 1]);
    let resolver = PathResolver::new(&topo, RoutingMode::Incident);

    let path = resolver.resolve("h0", "h1");
    assert_eq!(ids(&path), [0, 2]);
    assert!(!path.direct);

    let path = resolver.resolve("s0", "h1");
    assert_eq!(ids(&path), [0, 1, 2, 3]);
}

#[test]
fn link_touching_both_endpoints_is_appended_twice() {
    let topo = line_topology([1, 1, 1, 1]);
    let resolver = PathResolver::new(&topo, RoutingMode::Incident);

    let path = resolver.resolve("s0", "s0");
    assert_eq!(ids(&path), [0, 0, 1, 1, 3, 3]);
}

#[test]
fn unknown_nodes_yield_partial_or_empty_paths() {
    let topo = line_topology([1, 1, 1, 1]);
    let resolver = PathResolver::new(&topo, RoutingMode::Incident);

    assert_eq!(ids(&resolver.resolve("h0", "ghost")), [0]);

    let empty = resolver.resolve("ghost", "phantom");
    assert!(empty.is_empty());
    assert_eq!(empty.hop_count(), 0);
    assert!(!empty.direct);
}

#[test]
fn concurrent_resolutions_do_not_share_scratch_state() {
    let topo = line_topology([1, 1, 1, 1]);
    let resolver = PathResolver::new(&topo, RoutingMode::Incident);

    std::thread::scope(|s| {
        let a = s.spawn(|| (0..500).map(|_| resolver.resolve("h0", "h1")).collect::<Vec<_>>());
        let b = s.spawn(|| (0..500).map(|_| resolver.resolve("s0", "s1")).collect::<Vec<_>>());
        for p in a.join().unwrap() {
            assert_eq!(ids(&p), [0, 2]);
        }
        for p in b.join().unwrap() {
            assert_eq!(ids(&p), [1]);
        }
    });
}

#[test]
fn shortest_path_follows_adjacency() {
    let mut topo = line_topology([1, 1, 1, 1]);
    topo.add_host("island").unwrap();
    let resolver = PathResolver::new(&topo, RoutingMode::ShortestPath);

    assert_eq!(ids(&resolver.resolve("h0", "h1")), [0, 1, 2]);
    assert_eq!(ids(&resolver.resolve("h1", "h2")), [2, 1, 3]);

    let direct = resolver.resolve("s1", "s0");
    assert_eq!(ids(&direct), [1]);
    assert!(direct.direct);

    assert!(resolver.resolve("h0", "island").is_empty());
    assert!(resolver.resolve("h0", "h0").is_empty());
    assert!(resolver.resolve("h0", "ghost").is_empty());
}

#[test]
fn routing_mode_parses_cli_spellings() {
    assert_eq!("incident".parse::<RoutingMode>(), Ok(RoutingMode::Incident));
    assert_eq!(
        "shortest-path".parse::<RoutingMode>(),
        Ok(RoutingMode::ShortestPath)
    );
    assert!("bfs".parse::<RoutingMode>().is_err());
    assert_eq!(RoutingMode::ShortestPath.to_string(), "shortest-path");
}
