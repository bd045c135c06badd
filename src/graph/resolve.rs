//! Relationship resolution: raw endpoint references become edges between
//! known entity ids, or are dropped with a diagnostic.

use crate::graph::{Crosswalk, Edge};
use crate::loader::{load_record, RecordFile};

/// Edge label used when a relationship record does not name one.
pub const DEFAULT_RELATIONSHIP: &str = "relatesTo";

/// Per-run cap on individually logged edge diagnostics. Beyond this only the
/// final count reports further drops, so one bad import cannot flood the log.
const MAX_DETAILED_DIAGNOSTICS: usize = 20;

/// Result of resolving one batch of relationship record files.
#[derive(Debug)]
pub struct ResolvedEdges {
    pub edges: Vec<Edge>,
    /// Records dropped: unreadable, incomplete, or referencing unknown ids.
    pub dropped: usize,
}

/// Resolve every relationship record against the crosswalk, in the order
/// given. Bad records never abort the batch.
pub fn resolve_edges(files: &[RecordFile], crosswalk: &Crosswalk) -> ResolvedEdges {
    let mut edges = Vec::new();
    let mut dropped = 0usize;

    for file in files {
        let Some(record) = load_record(&file.absolute_path) else {
            dropped += 1;
            continue;
        };

        let source_ref = record.get_scalar("source");
        let target_ref = record.get_scalar("target");
        let (Some(source_ref), Some(target_ref)) = (source_ref, target_ref) else {
            drop_with_diagnostic(
                &mut dropped,
                format!(
                    "Incomplete edge in {}: missing source or target",
                    file.relative_path
                ),
            );
            continue;
        };

        let source = crosswalk.resolve(&source_ref);
        let target = crosswalk.resolve(&target_ref);
        if !crosswalk.contains_id(&source) || !crosswalk.contains_id(&target) {
            drop_with_diagnostic(
                &mut dropped,
                format!(
                    "Skipping edge with unknown node(s): {} -> {} in {}",
                    source, target, file.relative_path
                ),
            );
            continue;
        }

        let relationship_type = record
            .get_scalar("relationship_type")
            .unwrap_or_else(|| DEFAULT_RELATIONSHIP.to_string());

        edges.push(Edge {
            source,
            target,
            relationship_type,
        });
    }

    if dropped > 0 {
        let suppressed = dropped.saturating_sub(MAX_DETAILED_DIAGNOSTICS);
        if suppressed > 0 {
            log::warn!(
                "Dropped {} relationship record(s), {} diagnostics suppressed",
                dropped,
                suppressed
            );
        } else {
            log::warn!("Dropped {} relationship record(s)", dropped);
        }
    }

    log::info!("Resolved {} edges", edges.len());

    ResolvedEdges { edges, dropped }
}

fn drop_with_diagnostic(dropped: &mut usize, message: String) {
    if *dropped < MAX_DETAILED_DIAGNOSTICS {
        log::warn!("{}", message);
    }
    *dropped += 1;
}
