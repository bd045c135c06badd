//! Full graph payload and the slug-keyed crosswalk view.
//!
//! The full payload carries one element per node and per edge under a single
//! `elements` key, with every node field the detail panels need inlined.
//! Field order in `NodeData` is part of the output contract; reordering
//! fields reorders every emitted snapshot.

use std::collections::BTreeMap;

use serde::Serialize;
use serde_json::Value as JsonValue;

use crate::graph::{Edge, Entity, PersonRef};
use crate::output::json::json_or_null;

#[derive(Debug, Serialize)]
pub struct FullGraph {
    pub elements: Vec<Element>,
}

#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum Element {
    Node(Box<NodeElement>),
    Edge(EdgeElement),
}

#[derive(Debug, Serialize)]
pub struct NodeElement {
    pub group: &'static str,
    pub data: NodeData,
    /// Style class, e.g. `org`.
    pub classes: String,
}

#[derive(Debug, Serialize)]
pub struct NodeData {
    pub id: String,
    pub label: String,
    #[serde(rename = "type")]
    pub type_tag: String,
    pub group: &'static str,
    pub slug: String,
    pub source_path: String,
    pub page_url: String,
    pub tags: Vec<String>,
    pub summary: String,
    pub search_blob: String,
    pub website: JsonValue,
    pub notes: JsonValue,
    pub version: Option<String>,
    pub date_published: Option<String>,
    pub super_concept: JsonValue,
    pub sub_concept: JsonValue,
    /// Type-specific fields in one place for the info panel.
    pub fields: JsonValue,
    pub organisation_type: JsonValue,
    pub region: JsonValue,
    pub projects: Vec<String>,
    pub persons: Vec<PersonRef>,
}

#[derive(Debug, Serialize)]
pub struct EdgeElement {
    pub group: &'static str,
    pub data: EdgeData,
}

#[derive(Debug, Serialize)]
pub struct EdgeData {
    pub source: String,
    pub target: String,
    pub label: String,
    pub relationship_type: String,
    pub group: &'static str,
}

/// One crosswalk row per entity, keyed by slug in the emitted object.
#[derive(Debug, Serialize)]
pub struct CrosswalkEntry {
    pub id: String,
    pub label: String,
    #[serde(rename = "type")]
    pub type_tag: String,
    pub slug: String,
    pub source_path: String,
    pub page_url: String,
}

/// Assemble the full payload: all nodes first, then all edges, each in
/// pipeline order.
pub fn full_graph(entities: &[Entity], edges: &[Edge]) -> FullGraph {
    let mut elements: Vec<Element> = Vec::with_capacity(entities.len() + edges.len());

    for entity in entities {
        elements.push(Element::Node(Box::new(NodeElement {
            group: "nodes",
            data: NodeData {
                id: entity.id.clone(),
                label: entity.label.clone(),
                type_tag: entity.type_tag().to_string(),
                group: "nodes",
                slug: entity.slug.clone(),
                source_path: entity.source_path.clone(),
                page_url: entity.page_url.clone(),
                tags: entity.tags.clone(),
                summary: entity.summary.clone(),
                search_blob: entity.search_blob.clone(),
                website: json_or_null(entity.website.as_ref()),
                notes: json_or_null(entity.notes.as_ref()),
                version: entity.version.clone(),
                date_published: entity.date_published.clone(),
                super_concept: json_or_null(entity.super_concept.as_ref()),
                sub_concept: json_or_null(entity.sub_concept.as_ref()),
                fields: entity.fields.to_json(),
                organisation_type: json_or_null(entity.org_type()),
                region: json_or_null(entity.region.as_ref()),
                projects: entity.projects.clone(),
                persons: entity.persons.clone(),
            },
            classes: entity.class().to_string(),
        })));
    }

    for edge in edges {
        elements.push(Element::Edge(EdgeElement {
            group: "edges",
            data: EdgeData {
                source: edge.source.clone(),
                target: edge.target.clone(),
                label: edge.relationship_type.clone(),
                relationship_type: edge.relationship_type.clone(),
                group: "edges",
            },
        }));
    }

    FullGraph { elements }
}

/// Slug-keyed lookup table for linking pages back to graph nodes.
pub fn crosswalk_view(entities: &[Entity]) -> BTreeMap<String, CrosswalkEntry> {
    entities
        .iter()
        .map(|entity| {
            (
                entity.slug.clone(),
                CrosswalkEntry {
                    id: entity.id.clone(),
                    label: entity.label.clone(),
                    type_tag: entity.type_tag().to_string(),
                    slug: entity.slug.clone(),
                    source_path: entity.source_path.clone(),
                    page_url: entity.page_url.clone(),
                },
            )
        })
        .collect()
}
