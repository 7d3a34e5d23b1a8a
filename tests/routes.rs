// Route query tests.
//
// Invariants exercised:
// - times_on_path has one entry per leg and sums to the path cost.
// - closest_destination_from_all minimizes the summed cost over nodes
//   reachable from every start, and fails loudly on bad input.
use wayfinder::{Graph, GraphError, Routes, ShortestPaths};

fn town() -> Graph<String> {
    let mut g = Graph::new();
    for n in ["Home", "Work", "Cafe", "Park", "Museum", "Island"] {
        g.insert_node(n.to_string());
    }
    let edges = [
        ("Home", "Cafe", 2.0),
        ("Home", "Park", 5.0),
        ("Work", "Cafe", 3.0),
        ("Work", "Museum", 1.0),
        ("Cafe", "Park", 1.0),
        ("Museum", "Park", 1.0),
        ("Park", "Home", 4.0),
    ];
    for (s, t, w) in edges {
        g.insert_edge(s, t, w).unwrap();
    }
    g
}

#[test]
fn locations_and_times_on_path() {
    let g = town();
    let routes = Routes::new(&g);
    assert_eq!(
        routes.locations_on_path("Home", "Park"),
        Ok(vec!["Home".to_string(), "Cafe".to_string(), "Park".to_string()])
    );
    assert_eq!(routes.times_on_path("Home", "Park"), Ok(vec![2.0, 1.0]));

    let total: f64 = routes.times_on_path("Work", "Home").unwrap().iter().sum();
    assert_eq!(
        ShortestPaths::new(&g).shortest_path_cost("Work", "Home"),
        Ok(total)
    );
}

#[test]
fn times_on_path_edge_cases() {
    let g = town();
    let routes = Routes::new(&g);
    assert_eq!(routes.times_on_path("Cafe", "Cafe"), Ok(vec![]));
    assert_eq!(routes.times_on_path("Island", "Home"), Err(GraphError::NoPathFound));
    assert_eq!(routes.times_on_path("Atlantis", "Home"), Err(GraphError::NodeNotFound));
    assert_eq!(routes.locations_on_path("Home", "Island"), Err(GraphError::NoPathFound));
}

// Test: Home and Work meet at Park.
// Assumes: Home reaches Park in 3 (via Cafe), Work reaches Park in 2 (via
// Museum). Cafe sums to 2 + 3 = 5 and Park to 3 + 2 = 5, so they tie.
// Verifies: the tie resolves to whichever appears first in get_all_nodes.
#[test]
fn closest_destination_breaks_ties_by_enumeration_order() {
    let g = town();
    let routes = Routes::new(&g);
    let winner = routes.closest_destination_from_all(["Home", "Work"]).unwrap();
    let first_tied = g
        .get_all_nodes()
        .into_iter()
        .find(|n| n == "Park" || n == "Cafe")
        .unwrap();
    assert_eq!(winner, first_tied);
}

#[test]
fn closest_destination_unique_minimum() {
    let mut g = town();
    // Make Park strictly cheaper for Work.
    g.insert_edge("Museum", "Park", 0.5).unwrap();
    let routes = Routes::new(&g);
    assert_eq!(
        routes.closest_destination_from_all(["Home", "Work"]),
        Ok("Park".to_string())
    );
}

// Test: a single start is its own closest destination (cost 0).
#[test]
fn single_start_is_its_own_destination() {
    let g = town();
    let routes = Routes::new(&g);
    assert_eq!(routes.closest_destination_from_all(["Work"]), Ok("Work".to_string()));
    assert_eq!(
        routes.closest_destination_from_all(["Island"]),
        Ok("Island".to_string())
    );
}

#[test]
fn closest_destination_failures() {
    let g = town();
    let routes = Routes::new(&g);
    assert_eq!(
        routes.closest_destination_from_all(["Home", "Atlantis"]),
        Err(GraphError::NodeNotFound)
    );
    assert_eq!(
        routes.closest_destination_from_all(["Home", "Island"]),
        Err(GraphError::NoPathFound)
    );
    let none: [&str; 0] = [];
    assert!(matches!(
        routes.closest_destination_from_all(none),
        Err(GraphError::InvalidArgument(_))
    ));
}

// Test: owned start lists work the same as string literals.
#[test]
fn closest_destination_from_owned_starts() {
    let g = town();
    let routes = Routes::new(&g);
    let starts = vec!["Home".to_string(), "Park".to_string()];
    // Home -> Park 3, Park -> Home 4: Home costs 0 + 4, Park 3 + 0.
    assert_eq!(
        routes.closest_destination_from_all(&starts),
        Ok("Park".to_string())
    );
}
