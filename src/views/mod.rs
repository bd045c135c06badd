//! Derived views over the compiled graph.
//!
//! Every payload the site consumes is computed here from the same canonical
//! [`Entity`] and [`Edge`] slices, so the full graph, the lite graph, the
//! explorer assets, and the source inventories can never drift apart.

pub mod explorer;
pub mod full;
pub mod lite;
pub mod sources;

pub use explorer::{
    adjacency, degree, lite_index, search_records, styled_class, LiteIndexEntry, SearchRecord,
};
pub use full::{crosswalk_view, full_graph, CrosswalkEntry, FullGraph};
pub use lite::{lite_graph, node_details, DetailEntry, LiteGraph};
pub use sources::{source_groups, source_list};

use std::collections::BTreeMap;

use crate::config::TypeClassStyle;
use crate::graph::{Edge, Entity};

/// Every derived payload for one build, computed in a single pass.
#[derive(Debug)]
pub struct GraphViews {
    pub full: FullGraph,
    pub crosswalk: BTreeMap<String, CrosswalkEntry>,
    pub lite: LiteGraph,
    pub details: BTreeMap<String, DetailEntry>,
    pub lite_index: BTreeMap<String, LiteIndexEntry>,
    pub search: Vec<SearchRecord>,
    pub adjacency: BTreeMap<String, Vec<String>>,
    pub degree: BTreeMap<String, usize>,
    pub source_list: Vec<String>,
    pub source_groups: BTreeMap<String, Vec<String>>,
}

impl GraphViews {
    pub fn build(entities: &[Entity], edges: &[Edge], style: TypeClassStyle) -> Self {
        let adjacency = explorer::adjacency(entities, edges);
        let degree = explorer::degree(&adjacency);
        Self {
            full: full::full_graph(entities, edges),
            crosswalk: full::crosswalk_view(entities),
            lite: lite::lite_graph(entities, edges),
            details: lite::node_details(entities),
            lite_index: explorer::lite_index(entities, style),
            search: explorer::search_records(entities, style),
            adjacency,
            degree,
            source_list: sources::source_list(entities),
            source_groups: sources::source_groups(entities),
        }
    }
}
