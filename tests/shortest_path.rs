// Shortest-path scenario tests.
//
// The core invariants exercised:
// - Optimality: returned paths have minimal total weight.
// - Consistency: shortest_path_cost equals the in-order sum of the edge
//   weights along shortest_path_data.
// - Termination: cycles and self-loops do not cause re-expansion.
// - Failure modes: NodeNotFound before any search, NoPathFound when the
//   destination is never settled.
use wayfinder::{Graph, GraphError, Path, ShortestPaths};

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

// Eight nodes, two components reachable from A, with a D <-> F cycle.
fn lecture_graph() -> Graph<&'static str> {
    let mut g = Graph::new();
    for n in ["A", "B", "C", "D", "E", "F", "G", "H"] {
        g.insert_node(n);
    }
    let edges = [
        ("A", "B", 4.0),
        ("A", "C", 2.0),
        ("B", "D", 1.0),
        ("B", "E", 10.0),
        ("C", "D", 5.0),
        ("D", "E", 3.0),
        ("D", "F", 0.0),
        ("F", "D", 2.0),
        ("F", "H", 4.0),
        ("G", "H", 4.0),
    ];
    for (s, t, w) in edges {
        g.insert_edge(s, t, w).unwrap();
    }
    g
}

fn path_weight(g: &Graph<&'static str>, nodes: &[&'static str]) -> f64 {
    nodes
        .windows(2)
        .map(|leg| g.get_edge(leg[0], leg[1]).expect("consecutive path nodes share an edge"))
        .fold(0.0, |acc, w| acc + w)
}

// Test: A -> E takes the B/D detour rather than the direct B -> E edge.
#[test]
fn a_to_e() {
    init_tracing();
    let g = lecture_graph();
    let sp = ShortestPaths::new(&g);
    assert_eq!(sp.shortest_path_data("A", "E"), Ok(vec!["A", "B", "D", "E"]));
    assert_eq!(sp.shortest_path_cost("A", "E"), Ok(8.0));
}

// Test: C -> H passes through the zero-weight D -> F edge.
#[test]
fn c_to_h() {
    let g = lecture_graph();
    let sp = ShortestPaths::new(&g);
    assert_eq!(sp.shortest_path_data("C", "H"), Ok(vec!["C", "D", "F", "H"]));
    assert_eq!(sp.shortest_path_cost("C", "H"), Ok(9.0));
}

// Test: shortest_path bundles the same answer in one search.
#[test]
fn combined_path_matches_separate_queries() {
    let g = lecture_graph();
    let sp = ShortestPaths::new(&g);
    assert_eq!(
        sp.shortest_path("A", "H"),
        Ok(Path {
            nodes: vec!["A", "B", "D", "F", "H"],
            cost: 9.0,
        })
    );
}

// Test: E has no outgoing edges, so nothing is reachable from it.
#[test]
fn e_to_a_has_no_path() {
    let g = lecture_graph();
    let sp = ShortestPaths::new(&g);
    assert_eq!(sp.shortest_path_data("E", "A"), Err(GraphError::NoPathFound));
    assert_eq!(sp.shortest_path_cost("E", "A"), Err(GraphError::NoPathFound));
}

// Test: disconnected component.
// Verifies: G is unreachable from A even though both reach H.
#[test]
fn unreachable_component() {
    let g = lecture_graph();
    let sp = ShortestPaths::new(&g);
    assert_eq!(sp.shortest_path_cost("A", "G"), Err(GraphError::NoPathFound));
    assert_eq!(sp.shortest_path_cost("G", "H"), Ok(4.0));
}

// Test: validation happens before search.
#[test]
fn missing_endpoints() {
    let g = lecture_graph();
    let sp = ShortestPaths::new(&g);
    assert_eq!(sp.shortest_path_data("A", "Z"), Err(GraphError::NodeNotFound));
    assert_eq!(sp.shortest_path_data("Z", "A"), Err(GraphError::NodeNotFound));
    assert_eq!(sp.shortest_path_cost("Z", "Z"), Err(GraphError::NodeNotFound));
    assert!(matches!(sp.search_from("Z"), Err(GraphError::NodeNotFound)));
}

// Test: same-node queries.
// Verifies: [start] with cost 0, with and without a self-loop present.
#[test]
fn single_node_to_itself() {
    let mut g = Graph::new();
    g.insert_node("A");
    {
        let sp = ShortestPaths::new(&g);
        assert_eq!(sp.shortest_path_data("A", "A"), Ok(vec!["A"]));
        assert_eq!(sp.shortest_path_cost("A", "A"), Ok(0.0));
    }

    g.insert_edge("A", "A", 5.0).unwrap();
    let sp = ShortestPaths::new(&g);
    assert_eq!(sp.shortest_path_data("A", "A"), Ok(vec!["A"]));
    assert_eq!(sp.shortest_path_cost("A", "A"), Ok(0.0));
}

// Test: self-loops on intermediate nodes, including zero-weight ones.
#[test]
fn self_loops_are_dead_weight() {
    let mut g = lecture_graph();
    g.insert_edge("B", "B", 0.0).unwrap();
    g.insert_edge("D", "D", 1.0).unwrap();
    let sp = ShortestPaths::new(&g);
    assert_eq!(sp.shortest_path_data("A", "E"), Ok(vec!["A", "B", "D", "E"]));
    assert_eq!(sp.shortest_path_cost("A", "E"), Ok(8.0));
}

// Test: zero-weight cycle.
// Verifies: termination and an acyclic result.
#[test]
fn zero_weight_cycle_terminates() {
    let mut g = Graph::new();
    for n in ["x", "y", "z", "goal"] {
        g.insert_node(n);
    }
    g.insert_edge("x", "y", 0.0).unwrap();
    g.insert_edge("y", "z", 0.0).unwrap();
    g.insert_edge("z", "x", 0.0).unwrap();
    g.insert_edge("z", "goal", 1.0).unwrap();
    let sp = ShortestPaths::new(&g);
    assert_eq!(sp.shortest_path_data("x", "goal"), Ok(vec!["x", "y", "z", "goal"]));
    assert_eq!(sp.shortest_path_cost("y", "x"), Ok(0.0));
}

// Test: cost equals the sum of weights along the returned path for every
// ordered pair that has a path.
#[test]
fn cost_matches_path_weight_for_all_pairs() {
    let g = lecture_graph();
    let sp = ShortestPaths::new(&g);
    let nodes = g.get_all_nodes();
    for s in &nodes {
        for t in &nodes {
            match sp.shortest_path(s, t) {
                Ok(p) => {
                    assert_eq!(p.nodes.first(), Some(s));
                    assert_eq!(p.nodes.last(), Some(t));
                    assert_eq!(p.cost, path_weight(&g, &p.nodes), "{} -> {}", s, t);
                }
                Err(e) => assert_eq!(e, GraphError::NoPathFound),
            }
        }
    }
}

// Test: graph mutations between queries are observed; nothing is cached.
#[test]
fn queries_see_latest_graph() {
    let mut g = lecture_graph();
    assert_eq!(ShortestPaths::new(&g).shortest_path_cost("A", "E"), Ok(8.0));

    g.insert_edge("A", "E", 1.5).unwrap();
    assert_eq!(ShortestPaths::new(&g).shortest_path_data("A", "E"), Ok(vec!["A", "E"]));

    g.remove_node("D").unwrap();
    g.remove_edge("A", "E").unwrap();
    let sp = ShortestPaths::new(&g);
    assert_eq!(sp.shortest_path_data("A", "E"), Ok(vec!["A", "B", "E"]));
    assert_eq!(sp.shortest_path_cost("A", "E"), Ok(14.0));
    assert_eq!(sp.shortest_path_cost("A", "H"), Err(GraphError::NoPathFound));
}

// Test: equal-cost alternatives resolve the same way every time.
#[test]
fn ties_are_reproducible() {
    let mut g = Graph::new();
    for n in ["s", "l", "r", "t"] {
        g.insert_node(n);
    }
    g.insert_edge("s", "l", 1.0).unwrap();
    g.insert_edge("s", "r", 1.0).unwrap();
    g.insert_edge("l", "t", 1.0).unwrap();
    g.insert_edge("r", "t", 1.0).unwrap();
    let sp = ShortestPaths::new(&g);
    let first = sp.shortest_path_data("s", "t").unwrap();
    for _ in 0..20 {
        assert_eq!(sp.shortest_path_data("s", "t").unwrap(), first);
    }
    assert_eq!(sp.shortest_path_cost("s", "t"), Ok(2.0));
}

// Test: exhaustive single-source search.
// Verifies: reachable set, costs, paths, and settlement order.
#[test]
fn search_tree_from_a() {
    let g = lecture_graph();
    let tree = ShortestPaths::new(&g).search_from("A").unwrap();
    assert_eq!(tree.settled_count(), 7, "everything but G");
    assert!(!tree.reached("G"));
    assert_eq!(tree.cost_to("F"), Ok(5.0));
    assert_eq!(tree.path_to("H"), Ok(vec!["A", "B", "D", "F", "H"]));
    assert_eq!(tree.cost_to("G"), Err(GraphError::NoPathFound));
    assert_eq!(tree.cost_to("Z"), Err(GraphError::NodeNotFound));

    let reach = tree.reachable();
    assert_eq!(reach[0], ("A", 0.0));
    assert!(reach.windows(2).all(|w| w[0].1 <= w[1].1));
}

// Test: borrowed lookups on owned identities.
#[test]
fn string_identities_accept_str_queries() {
    let mut g: Graph<String> = Graph::new();
    for n in ["Memorial Union", "Union South", "Mack House"] {
        g.insert_node(n.to_string());
    }
    g.insert_edge("Memorial Union", "Union South", 105.8).unwrap();
    g.insert_edge("Union South", "Mack House", 200.0).unwrap();
    let sp = ShortestPaths::new(&g);
    let path = sp.shortest_path_data("Memorial Union", "Mack House").unwrap();
    assert_eq!(path, vec!["Memorial Union", "Union South", "Mack House"]);
    assert_eq!(sp.shortest_path_cost("Memorial Union", "Mack House"), Ok(105.8 + 200.0));
}
