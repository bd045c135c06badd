//! End-to-end batch build.
//!
//! One run discovers every record under the content root, compiles the
//! canonical graph once, derives all views from it, and writes each enabled
//! snapshot. Inputs are read before any output is touched, so a fatal error
//! leaves the previous snapshots in place.

use std::path::Path;

use log::{info, warn};
use serde::Serialize;

use crate::config::Config;
use crate::error::{CartographError, Result};
use crate::graph::{build_entities, resolve_edges};
use crate::loader::{discover_entity_records, discover_relationship_records};
use crate::output::write_snapshot;
use crate::sync;
use crate::views::GraphViews;

pub const GRAPH_DATA_FILE: &str = "graph_data.json";
pub const CROSSWALK_FILE: &str = "crosswalk.json";
pub const GRAPH_DATA_LITE_FILE: &str = "graph_data.lite.json";
pub const NODE_DETAILS_FILE: &str = "node_details.json";
pub const LITE_INDEX_FILE: &str = "lite_index.json";
pub const ADJACENCY_FILE: &str = "adjacency.json";
pub const DEGREE_FILE: &str = "degree.json";
pub const GRAPH_SEARCH_INDEX_FILE: &str = "graph_search_index.json";
pub const SOURCE_NODES_FILE: &str = "source_nodes.json";
pub const SOURCE_NODES_LIST_FILE: &str = "source_nodes.list.json";
pub const SOURCE_NODES_DICT_FILE: &str = "source_nodes.dict.json";

/// Key outputs in report order. `search_index.json` is produced externally
/// and only synced in, but it belongs in the inventory.
pub const REPORT_FILES: [&str; 12] = [
    GRAPH_DATA_FILE,
    CROSSWALK_FILE,
    GRAPH_DATA_LITE_FILE,
    NODE_DETAILS_FILE,
    LITE_INDEX_FILE,
    ADJACENCY_FILE,
    DEGREE_FILE,
    GRAPH_SEARCH_INDEX_FILE,
    "search_index.json",
    SOURCE_NODES_FILE,
    SOURCE_NODES_LIST_FILE,
    SOURCE_NODES_DICT_FILE,
];

/// Which stages of a run actually write.
#[derive(Debug, Clone, Copy)]
pub struct StageFlags {
    pub full: bool,
    pub lite: bool,
    pub explorer: bool,
    pub sources: bool,
    pub sync: bool,
    /// Hash inbox files before and after when syncing; slower, precise diff.
    pub verify_hash: bool,
}

impl Default for StageFlags {
    fn default() -> Self {
        Self {
            full: true,
            lite: true,
            explorer: true,
            sources: true,
            sync: true,
            verify_hash: false,
        }
    }
}

/// What one run produced.
#[derive(Debug, Default)]
pub struct RunReport {
    pub entities: usize,
    pub edges: usize,
    pub skipped_records: usize,
    pub dropped_edges: usize,
    /// Snapshot file names written, in write order.
    pub written: Vec<String>,
    pub sync_messages: Vec<String>,
}

/// Run the whole pipeline against one configuration.
pub fn run(config: &Config, flags: StageFlags) -> Result<RunReport> {
    let data_dir = config.data_dir();
    info!("Building graph from {}", data_dir.display());

    let entity_files = discover_entity_records(data_dir, &config.content.relationships_subdir);
    let batch = build_entities(&entity_files, &config.content_dir_name());
    if batch.entities.is_empty() {
        return Err(CartographError::EmptyGraph(data_dir.display().to_string()));
    }

    let relationship_files =
        discover_relationship_records(data_dir, &config.content.relationships_subdir);
    let resolved = resolve_edges(&relationship_files, &batch.crosswalk);
    if resolved.edges.is_empty() {
        warn!("No edges resolved; the graph will render isolated nodes only");
    }

    let views = GraphViews::build(
        &batch.entities,
        &resolved.edges,
        config.build.type_class_style,
    );

    let out_dir = config.output_dir();
    let pretty = config.build.pretty;
    let mut report = RunReport {
        entities: batch.entities.len(),
        edges: resolved.edges.len(),
        skipped_records: batch.skipped,
        dropped_edges: resolved.dropped,
        written: Vec::new(),
        sync_messages: Vec::new(),
    };

    if flags.full {
        emit(&mut report, out_dir, GRAPH_DATA_FILE, &views.full, pretty)?;
        emit(&mut report, out_dir, CROSSWALK_FILE, &views.crosswalk, pretty)?;
    }

    if flags.lite {
        emit(&mut report, out_dir, GRAPH_DATA_LITE_FILE, &views.lite, pretty)?;
        emit(&mut report, out_dir, NODE_DETAILS_FILE, &views.details, pretty)?;
    }

    if flags.explorer {
        emit(&mut report, out_dir, LITE_INDEX_FILE, &views.lite_index, pretty)?;
        emit(&mut report, out_dir, ADJACENCY_FILE, &views.adjacency, pretty)?;
        emit(&mut report, out_dir, DEGREE_FILE, &views.degree, pretty)?;
        emit(
            &mut report,
            out_dir,
            GRAPH_SEARCH_INDEX_FILE,
            &views.search,
            pretty,
        )?;
    }

    if flags.sources {
        // Archived list and dict forms first, then the dict form again under
        // the plain name, which is what the site links to. Always indented,
        // these double as human-readable inventories.
        emit(
            &mut report,
            out_dir,
            SOURCE_NODES_LIST_FILE,
            &views.source_list,
            true,
        )?;
        emit(
            &mut report,
            out_dir,
            SOURCE_NODES_DICT_FILE,
            &views.source_groups,
            true,
        )?;
        emit(
            &mut report,
            out_dir,
            SOURCE_NODES_FILE,
            &views.source_groups,
            true,
        )?;
    }

    if flags.sync {
        info!("[ingest] checking {}", config.sync.inbox_dir.display());
        let messages = sync::ingest_external(&config.sync, out_dir, flags.verify_hash)?;
        for message in &messages {
            info!("{}", message);
        }
        report.sync_messages = messages;
    }

    info!(
        "Build complete: {} entities, {} edges, {} record(s) skipped, {} edge record(s) dropped",
        report.entities, report.edges, report.skipped_records, report.dropped_edges
    );
    info!("Summary of key outputs:");
    for name in REPORT_FILES {
        info!("  - {:28} {}", name, size_of(&out_dir.join(name)));
    }

    Ok(report)
}

fn emit<T: Serialize>(
    report: &mut RunReport,
    dir: &Path,
    name: &str,
    payload: &T,
    pretty: bool,
) -> Result<()> {
    write_snapshot(&dir.join(name), payload, pretty)?;
    report.written.push(name.to_string());
    Ok(())
}

/// Human-readable file size for the output inventory.
pub fn size_of(path: &Path) -> String {
    match path.metadata() {
        Ok(meta) => format!("{} bytes", meta.len()),
        Err(_) => "missing".to_string(),
    }
}
