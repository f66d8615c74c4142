//! Engine binary for the Blaze dispatch simulation.
//!
//! Wires the dispatch core to the outside world: it loads configuration,
//! reads the adjacency matrix from disk, drives the controller on a timed
//! tick loop, logs every event, and writes the final report.
//!
//! # Startup Sequence
//!
//! 1. Load configuration from `dispatch-config.yaml`
//! 2. Initialize structured logging (tracing)
//! 3. Read and parse the adjacency matrix
//! 4. Build the controller from config and graph
//! 5. Run the tick loop
//! 6. Log the result and persist the report

mod error;
mod log_sink;
mod ticker;

use std::path::Path;
use std::time::Duration;

use blaze_core::config::{DispatchConfig, LoggingConfig};
use blaze_core::controller::DispatchController;
use blaze_core::runner;
use blaze_graph::RegionGraph;
use blaze_graph::matrix::parse_graph;
use blaze_types::RegionId;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use crate::error::EngineError;
use crate::log_sink::LogSink;

/// Default configuration file, relative to the working directory.
const CONFIG_PATH: &str = "dispatch-config.yaml";

/// Application entry point for the engine.
///
/// # Errors
///
/// Returns an error if configuration, graph loading, the simulation, or
/// report persistence fails.
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // 1. Load configuration.
    let config = load_config()?;

    // 2. Initialize structured logging.
    init_logging(&config.logging);
    info!(
        graph_path = config.engine.graph_path,
        report_path = config.engine.report_path,
        tick_interval_ms = config.engine.tick_interval_ms,
        max_ticks = config.engine.max_ticks,
        "blaze-engine starting"
    );

    // 3. Read the adjacency matrix.
    let graph = load_graph(Path::new(&config.engine.graph_path))?;
    warn_unreachable(&graph);

    // 4. Build the controller.
    let mut controller = DispatchController::from_config(graph, &config)?;

    // 5. Run the tick loop.
    let mut sink = LogSink::new();
    let result = ticker::run_ticking(
        &mut controller,
        &mut sink,
        Duration::from_millis(config.engine.tick_interval_ms),
        config.engine.max_ticks,
    )
    .await
    .map_err(EngineError::from)?;

    // 6. Log and persist.
    runner::log_run_end(&result);
    let text = result.report.render();
    info!(report = %text, "Final report");
    write_report(Path::new(&config.engine.report_path), &text).await?;

    info!(
        end_reason = ?result.end_reason,
        success = result.end_reason.is_success(),
        ticks = result.ticks,
        events = sink.emitted(),
        "blaze-engine shutdown complete"
    );

    Ok(())
}

/// Install the global tracing subscriber.
///
/// `RUST_LOG` wins over the configured level when set.
fn init_logging(logging: &LoggingConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&logging.level));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true);
    if logging.json {
        builder.json().init();
    } else {
        builder.init();
    }
}

/// Load the dispatch configuration from `dispatch-config.yaml`.
///
/// Falls back to defaults when the file does not exist. `BLAZE_*`
/// environment overrides apply in both cases.
fn load_config() -> Result<DispatchConfig, EngineError> {
    Ok(DispatchConfig::load_or_default(Path::new(CONFIG_PATH))?)
}

/// Read and parse the adjacency matrix at `path`.
fn load_graph(path: &Path) -> Result<RegionGraph, EngineError> {
    let text = std::fs::read_to_string(path).map_err(|source| EngineError::Io {
        path: path.display().to_string(),
        source,
    })?;
    let graph = parse_graph(&text)?;
    info!(
        regions = graph.region_count(),
        edges = graph.edge_count(),
        symmetric = graph.is_symmetric(),
        base = ?graph.base_position(),
        "Region graph loaded"
    );
    Ok(graph)
}

/// Warn about regions the unit can never reach from base.
fn warn_unreachable(graph: &RegionGraph) {
    let reachable = graph.reachable_from(RegionId::BASE);
    for region in graph.regions().filter(|r| !reachable.contains(r)) {
        warn!(%region, "Region unreachable from base");
    }
}

/// Write the report text to `path`.
async fn write_report(path: &Path, text: &str) -> Result<(), EngineError> {
    tokio::fs::write(path, text)
        .await
        .map_err(|source| EngineError::Io {
            path: path.display().to_string(),
            source,
        })?;
    info!(path = %path.display(), "Report written");
    Ok(())
}
