use std::error::Error;

use assetdag::graph::{build_graph, find_path, JobFilter};
use assetdag::records::{AssetRecord, DependencyRef};

type TestResult = Result<(), Box<dyn Error>>;

fn record(id: &str, key: &[&str], deps: &[&[&str]]) -> AssetRecord {
    AssetRecord {
        id: Some(id.to_string()),
        asset_key: key.iter().map(|s| s.to_string()).collect(),
        op_name: None,
        job_name: None,
        dependencies: deps
            .iter()
            .map(|k| DependencyRef {
                input_name: None,
                upstream_key: k.iter().map(|s| s.to_string()).collect(),
            })
            .collect(),
    }
}

#[test]
fn same_endpoint_returns_single_element_path() -> TestResult {
    let records = vec![record("A", &["a"], &[])];
    let graph = build_graph(&records, &JobFilter::default());

    assert_eq!(find_path(&graph, "A", "A"), vec!["A"]);

    Ok(())
}

#[test]
fn linear_chain_connects_end_to_end() -> TestResult {
    let records = vec![
        record("A", &["a"], &[]),
        record("B", &["b"], &[&["a"]]),
        record("C", &["c"], &[&["b"]]),
    ];
    let graph = build_graph(&records, &JobFilter::default());

    assert_eq!(find_path(&graph, "A", "C"), vec!["A", "B", "C"]);
    assert_eq!(find_path(&graph, "C", "A"), vec!["C", "B", "A"]);

    Ok(())
}

#[test]
fn search_crosses_edges_in_both_directions() -> TestResult {
    // A and B are siblings feeding C; the only route between them walks one
    // edge downstream and one edge upstream.
    let records = vec![
        record("A", &["a"], &[]),
        record("B", &["b"], &[]),
        record("C", &["c"], &[&["a"], &["b"]]),
    ];
    let graph = build_graph(&records, &JobFilter::default());

    assert_eq!(find_path(&graph, "A", "B"), vec!["A", "C", "B"]);

    Ok(())
}

#[test]
fn shortest_route_wins_over_a_longer_detour() -> TestResult {
    // Two routes from A to D: direct (A -> D) and via B -> C.
    let records = vec![
        record("A", &["a"], &[]),
        record("B", &["b"], &[&["a"]]),
        record("C", &["c"], &[&["b"]]),
        record("D", &["d"], &[&["a"], &["c"]]),
    ];
    let graph = build_graph(&records, &JobFilter::default());

    assert_eq!(find_path(&graph, "A", "D"), vec!["A", "D"]);

    Ok(())
}

#[test]
fn disconnected_components_yield_an_empty_path() -> TestResult {
    let records = vec![
        record("A", &["a"], &[]),
        record("B", &["b"], &[&["a"]]),
        record("X", &["x"], &[]),
        record("Y", &["y"], &[&["x"]]),
    ];
    let graph = build_graph(&records, &JobFilter::default());

    assert_eq!(find_path(&graph, "A", "Y"), Vec::<String>::new());

    Ok(())
}

#[test]
fn unknown_endpoints_yield_an_empty_path() -> TestResult {
    let records = vec![record("A", &["a"], &[])];
    let graph = build_graph(&records, &JobFilter::default());

    assert!(find_path(&graph, "A", "missing").is_empty());
    assert!(find_path(&graph, "missing", "A").is_empty());

    Ok(())
}

#[test]
fn paths_may_run_through_foreign_nodes() -> TestResult {
    // A and B both read the same foreign asset; the range between them
    // passes through the placeholder.
    let records = vec![
        record("A", &["a"], &[&["ext", "x"]]),
        record("B", &["b"], &[&["ext", "x"]]),
    ];
    let graph = build_graph(&records, &JobFilter::default());

    assert_eq!(find_path(&graph, "A", "B"), vec!["A", "ext/x", "B"]);

    Ok(())
}
