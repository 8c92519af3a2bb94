// src/lib.rs

pub mod cli;
pub mod errors;
pub mod graph;
pub mod layout;
pub mod logging;
pub mod records;
pub mod status;
pub mod view;
pub mod watch;

use std::path::PathBuf;

use anyhow::{Context, Result};
use serde::Serialize;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use crate::cli::CliArgs;
use crate::graph::{find_path, JobFilter, NodeId};
use crate::layout::LayoutConfig;
use crate::records::model::StepMetadata;
use crate::records::{load_records, load_steps};
use crate::view::{build_view, GraphView};
use crate::watch::{hash_inputs, spawn_watcher, WatchEvent};

/// The JSON document printed on stdout: the view outcome, plus the
/// range-selection path when `--select` asked for one.
#[derive(Debug, Serialize)]
struct ViewDocument<'a> {
    #[serde(flatten)]
    view: &'a GraphView,

    #[serde(skip_serializing_if = "Option::is_none")]
    selection: Option<Vec<NodeId>>,
}

/// High-level entry point used by `main.rs`.
///
/// This wires together:
/// - layout config + job filter from the CLI
/// - one build-and-print pass over the input snapshot
/// - (optional) the `--watch` rebuild loop
/// - Ctrl-C handling
pub async fn run(args: CliArgs) -> Result<()> {
    let layout_config = match args.layout_config.as_deref() {
        Some(path) => LayoutConfig::load_from_path(path)?,
        None => LayoutConfig::default(),
    };
    let filter = JobFilter::new(args.job.as_deref())?;

    let selection = match args.select.as_deref() {
        Some([from, to]) => Some((from.clone(), to.clone())),
        Some(other) => {
            // clap enforces num_args = 2, so this is unreachable in practice.
            anyhow::bail!("--select expects exactly two node ids, got {}", other.len());
        }
        None => None,
    };

    render_once(&args, &filter, &layout_config, selection.as_ref())?;

    if !args.watch {
        return Ok(());
    }

    // Inputs whose changes should trigger a rebuild.
    let mut inputs: Vec<PathBuf> = vec![PathBuf::from(&args.records)];
    if let Some(steps) = args.steps.as_deref() {
        inputs.push(PathBuf::from(steps));
    }

    let (event_tx, mut event_rx) = mpsc::channel::<WatchEvent>(16);
    let _watcher_handle = spawn_watcher(&inputs, event_tx.clone())?;

    // Ctrl-C -> graceful shutdown.
    {
        let tx = event_tx.clone();
        tokio::spawn(async move {
            if let Err(e) = tokio::signal::ctrl_c().await {
                eprintln!("failed to listen for Ctrl+C: {e}");
                return;
            }
            let _ = tx.send(WatchEvent::ShutdownRequested).await;
        });
    }

    let mut last_hash = hash_inputs(&inputs)?;

    while let Some(event) = event_rx.recv().await {
        match event {
            WatchEvent::InputChanged => {
                let hash = match hash_inputs(&inputs) {
                    Ok(hash) => hash,
                    Err(err) => {
                        warn!("failed to hash inputs after change: {err:#}");
                        continue;
                    }
                };
                if hash == last_hash {
                    debug!("input touched but content unchanged; skipping rebuild");
                    continue;
                }
                last_hash = hash;

                // A change can race a writer mid-write; log and wait for the
                // next event instead of tearing the loop down.
                if let Err(err) =
                    render_once(&args, &filter, &layout_config, selection.as_ref())
                {
                    warn!("rebuild after input change failed: {err:#}");
                }
            }
            WatchEvent::ShutdownRequested => {
                info!("shutdown requested; stopping watch loop");
                break;
            }
        }
    }

    Ok(())
}

/// Load the current snapshot, run the pipeline and print one JSON document.
fn render_once(
    args: &CliArgs,
    filter: &JobFilter,
    layout_config: &LayoutConfig,
    selection: Option<&(String, String)>,
) -> Result<()> {
    let records = load_records(&args.records)?;
    let steps = match args.steps.as_deref() {
        Some(path) => load_steps(path)?,
        None => StepMetadata::default(),
    };

    let view = build_view(&records, filter, &steps, layout_config);

    // Range selection only makes sense on a drawable graph; on Empty or
    // Cyclic outcomes the whole pipeline halts, selection included.
    let selection = match (selection, view.as_ready()) {
        (Some((from, to)), Some(ready)) => Some(find_path(&ready.graph, from, to)),
        _ => None,
    };

    let doc = ViewDocument {
        view: &view,
        selection,
    };
    let json = if args.pretty {
        serde_json::to_string_pretty(&doc)
    } else {
        serde_json::to_string(&doc)
    }
    .context("serializing view document")?;

    println!("{json}");
    Ok(())
}
