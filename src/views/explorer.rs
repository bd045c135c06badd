//! Explorer side-car views: id-keyed node lookup, flat search records, and
//! undirected adjacency with degree counts. All four exist so the explorer UI
//! can answer lookups in plain JS without loading the full graph.

use std::collections::{BTreeMap, BTreeSet};

use serde::Serialize;

use crate::config::TypeClassStyle;
use crate::graph::{Edge, Entity};

/// One row of `lite_index.json`. Coordinates are always present (null when
/// unset); the search blob is included only when non-empty.
#[derive(Debug, Serialize)]
pub struct LiteIndexEntry {
    pub id: String,
    pub l: String,
    pub t: String,
    pub s: String,
    pub x: Option<f64>,
    pub y: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sb: Option<String>,
}

/// One row of `graph_search_index.json`.
#[derive(Debug, Serialize)]
pub struct SearchRecord {
    pub id: String,
    pub l: String,
    pub t: String,
    pub s: String,
}

/// Render a style class under the configured style. Organization-like classes
/// are the only ones affected; an empty class falls back to `other`.
pub fn styled_class(class: &str, style: TypeClassStyle) -> String {
    match style {
        TypeClassStyle::Passthrough => {}
        TypeClassStyle::Short | TypeClassStyle::Model => {
            if matches!(class, "org" | "organization" | "organisation") {
                return match style {
                    TypeClassStyle::Short => "org".to_string(),
                    _ => "organization".to_string(),
                };
            }
        }
    }
    if class.is_empty() {
        "other".to_string()
    } else {
        class.to_string()
    }
}

/// Id-keyed node lookup, sorted by id.
pub fn lite_index(entities: &[Entity], style: TypeClassStyle) -> BTreeMap<String, LiteIndexEntry> {
    entities
        .iter()
        .map(|entity| {
            let blob = if entity.search_blob.is_empty() {
                None
            } else {
                Some(entity.search_blob.clone())
            };
            (
                entity.id.clone(),
                LiteIndexEntry {
                    id: entity.id.clone(),
                    l: entity.label.clone(),
                    t: styled_class(entity.class(), style),
                    s: entity.slug.clone(),
                    x: entity.position.map(|p| p.x),
                    y: entity.position.map(|p| p.y),
                    sb: blob,
                },
            )
        })
        .collect()
}

/// Minimal search records, sorted by id.
pub fn search_records(entities: &[Entity], style: TypeClassStyle) -> Vec<SearchRecord> {
    let mut records: Vec<SearchRecord> = entities
        .iter()
        .map(|entity| SearchRecord {
            id: entity.id.clone(),
            l: entity.label.clone(),
            t: styled_class(entity.class(), style),
            s: entity.slug.clone(),
        })
        .collect();
    records.sort_by(|a, b| a.id.cmp(&b.id));
    records
}

/// Undirected, deduplicated adjacency keyed by id. Every entity appears,
/// isolated ones with an empty neighbor list; neighbor lists are sorted.
pub fn adjacency(entities: &[Entity], edges: &[Edge]) -> BTreeMap<String, Vec<String>> {
    let mut sets: BTreeMap<&str, BTreeSet<&str>> = entities
        .iter()
        .map(|entity| (entity.id.as_str(), BTreeSet::new()))
        .collect();

    for edge in edges {
        let (source, target) = (edge.source.as_str(), edge.target.as_str());
        if !sets.contains_key(source) || !sets.contains_key(target) {
            continue;
        }
        if let Some(neighbors) = sets.get_mut(source) {
            neighbors.insert(target);
        }
        if let Some(neighbors) = sets.get_mut(target) {
            neighbors.insert(source);
        }
    }

    sets.into_iter()
        .map(|(id, neighbors)| {
            (
                id.to_string(),
                neighbors.into_iter().map(String::from).collect(),
            )
        })
        .collect()
}

/// Neighbor counts derived from the adjacency map.
pub fn degree(adjacency: &BTreeMap<String, Vec<String>>) -> BTreeMap<String, usize> {
    adjacency
        .iter()
        .map(|(id, neighbors)| (id.clone(), neighbors.len()))
        .collect()
}
