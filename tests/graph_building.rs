use std::error::Error;

use assetdag::graph::{build_graph, JobFilter};
use assetdag::records::{AssetRecord, DependencyRef};

type TestResult = Result<(), Box<dyn Error>>;

fn record(id: &str, key: &[&str], job: &str, deps: &[&[&str]]) -> AssetRecord {
    AssetRecord {
        id: Some(id.to_string()),
        asset_key: key.iter().map(|s| s.to_string()).collect(),
        op_name: Some(id.to_lowercase()),
        job_name: Some(job.to_string()),
        dependencies: deps
            .iter()
            .map(|k| DependencyRef {
                input_name: None,
                upstream_key: k.iter().map(|s| s.to_string()).collect(),
            })
            .collect(),
    }
}

fn chain() -> Vec<AssetRecord> {
    vec![
        record("A", &["a"], "etl", &[]),
        record("B", &["b"], "etl", &[&["a"]]),
        record("C", &["c"], "etl", &[&["b"]]),
    ]
}

#[test]
fn chain_builds_three_nodes_and_two_edges() -> TestResult {
    let graph = build_graph(&chain(), &JobFilter::default());

    assert_eq!(graph.node_count(), 3);
    assert_eq!(graph.edges().count(), 2);

    assert_eq!(graph.upstream_of("B").collect::<Vec<_>>(), vec!["A"]);
    assert_eq!(graph.downstream_of("B").collect::<Vec<_>>(), vec!["C"]);
    assert_eq!(graph.upstream_of("A").count(), 0);
    assert_eq!(graph.downstream_of("C").count(), 0);

    Ok(())
}

#[test]
fn unknown_upstream_key_synthesizes_hidden_node() -> TestResult {
    let records = vec![record("A", &["a"], "etl", &[&["landing", "x"]])];
    let graph = build_graph(&records, &JobFilter::default());

    assert_eq!(graph.node_count(), 2);

    let foreign = graph.node("landing/x").expect("foreign node exists");
    assert!(foreign.hidden);
    assert_eq!(foreign.asset_key, vec!["landing", "x"]);
    assert_eq!(graph.upstream_of("A").collect::<Vec<_>>(), vec!["landing/x"]);

    Ok(())
}

#[test]
fn every_edge_endpoint_exists_in_the_node_map() -> TestResult {
    // Mix of local, foreign and cross-record dependencies.
    let records = vec![
        record("A", &["a"], "etl", &[&["ext", "one"]]),
        record("B", &["b"], "etl", &[&["a"], &["ext", "two"]]),
        record("C", &["c"], "etl", &[&["b"], &["a"]]),
    ];
    let graph = build_graph(&records, &JobFilter::default());

    for (upstream, downstream) in graph.edges() {
        assert!(graph.contains(upstream), "dangling upstream {upstream}");
        assert!(graph.contains(downstream), "dangling downstream {downstream}");
    }

    // Adjacency maps are exact inverses.
    for node in graph.nodes() {
        for up in graph.upstream_of(&node.id) {
            assert!(
                graph.downstream_of(up).any(|d| d == node.id),
                "{up} -> {} missing from downstream map",
                node.id
            );
        }
        for down in graph.downstream_of(&node.id) {
            assert!(
                graph.upstream_of(down).any(|u| u == node.id),
                "{} -> {down} missing from upstream map",
                node.id
            );
        }
    }

    Ok(())
}

#[test]
fn malformed_records_are_skipped_not_fatal() -> TestResult {
    let mut records = chain();
    records.push(AssetRecord {
        id: None,
        asset_key: vec!["orphan".to_string()],
        op_name: None,
        job_name: None,
        dependencies: vec![],
    });
    records.push(AssetRecord {
        id: Some("NOKEY".to_string()),
        asset_key: vec![],
        op_name: None,
        job_name: None,
        dependencies: vec![],
    });

    let graph = build_graph(&records, &JobFilter::default());

    assert_eq!(graph.node_count(), 3);
    assert!(!graph.contains("NOKEY"));

    Ok(())
}

#[test]
fn duplicate_dependency_registrations_collapse_to_one_edge() -> TestResult {
    let records = vec![
        record("A", &["a"], "etl", &[]),
        record("B", &["b"], "etl", &[&["a"], &["a"], &["a"]]),
    ];
    let graph = build_graph(&records, &JobFilter::default());

    assert_eq!(graph.edges().count(), 1);
    assert_eq!(graph.upstream_of("B").count(), 1);

    Ok(())
}

#[test]
fn job_filter_keeps_matching_jobs_only() -> TestResult {
    let records = vec![
        record("A", &["a"], "etl_daily", &[]),
        record("B", &["b"], "etl_hourly", &[&["a"]]),
        record("C", &["c"], "reporting", &[&["b"]]),
    ];

    let filter = JobFilter::new(Some("etl_*"))?;
    let graph = build_graph(&records, &filter);

    assert!(graph.contains("A"));
    assert!(graph.contains("B"));
    assert!(!graph.contains("C"));

    Ok(())
}

#[test]
fn dependency_across_filter_boundary_becomes_foreign() -> TestResult {
    let records = vec![
        record("A", &["a"], "other_job", &[]),
        record("B", &["b"], "etl", &[&["a"]]),
    ];

    let filter = JobFilter::new(Some("etl"))?;
    let graph = build_graph(&records, &filter);

    // A itself is filtered out, but B's dependency still resolves: the key
    // comes back as a hidden placeholder.
    assert!(!graph.contains("A"));
    let placeholder = graph.node("a").expect("placeholder for filtered asset");
    assert!(placeholder.hidden);
    assert_eq!(graph.upstream_of("B").collect::<Vec<_>>(), vec!["a"]);

    Ok(())
}

#[test]
fn star_and_empty_filters_keep_everything() -> TestResult {
    let records = chain();

    for pattern in [None, Some(""), Some("*")] {
        let filter = JobFilter::new(pattern)?;
        let graph = build_graph(&records, &filter);
        assert_eq!(graph.node_count(), 3, "pattern {pattern:?}");
    }

    Ok(())
}
