//! Lite graph payload and the per-node details sidecar.
//!
//! The lite payload is what the browser loads first, so field names are
//! single letters and edges are bare `[source, target, relation]` triples.
//! Everything richer lives in the details map, fetched per node on demand.

use std::collections::BTreeMap;

use serde::Serialize;
use serde_json::Value as JsonValue;

use crate::graph::{Edge, Entity};
use crate::output::json::json_or_null;

#[derive(Debug, Serialize)]
pub struct LiteGraph {
    pub nodes: Vec<LiteNode>,
    pub edges: Vec<(String, String, String)>,
}

#[derive(Debug, Serialize)]
pub struct LiteNode {
    pub id: String,
    /// Label.
    pub l: String,
    /// Style class.
    pub t: String,
    /// Slug.
    pub s: String,
    /// Search blob.
    pub sb: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub x: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub y: Option<f64>,
}

#[derive(Debug, Serialize)]
pub struct DetailEntry {
    pub label: String,
    pub slug: String,
    #[serde(rename = "type")]
    pub type_tag: String,
    pub summary: String,
    pub tags: Vec<String>,
    pub website: JsonValue,
    pub notes: JsonValue,
    pub fields: JsonValue,
    pub organisation_type: JsonValue,
    pub organization_type: JsonValue,
    pub region: JsonValue,
}

/// Assemble the lite payload in pipeline order. Layout coordinates are
/// emitted only for entities that carry a position.
pub fn lite_graph(entities: &[Entity], edges: &[Edge]) -> LiteGraph {
    let nodes = entities
        .iter()
        .map(|entity| LiteNode {
            id: entity.id.clone(),
            l: entity.label.clone(),
            t: entity.class().to_string(),
            s: entity.slug.clone(),
            sb: entity.search_blob.clone(),
            x: entity.position.map(|p| p.x),
            y: entity.position.map(|p| p.y),
        })
        .collect();

    let edges = edges
        .iter()
        .map(|edge| {
            (
                edge.source.clone(),
                edge.target.clone(),
                edge.relationship_type.clone(),
            )
        })
        .collect();

    LiteGraph { nodes, edges }
}

/// Rich per-node details for the side panel, keyed by id.
pub fn node_details(entities: &[Entity]) -> BTreeMap<String, DetailEntry> {
    entities
        .iter()
        .map(|entity| {
            (
                entity.id.clone(),
                DetailEntry {
                    label: entity.label.clone(),
                    slug: entity.slug.clone(),
                    type_tag: entity.type_tag().to_string(),
                    summary: entity.summary.clone(),
                    tags: entity.tags.clone(),
                    website: json_or_null(entity.website.as_ref()),
                    notes: json_or_null(entity.notes.as_ref()),
                    fields: entity.fields.to_json(),
                    organisation_type: json_or_null(entity.organisation_type.as_ref()),
                    organization_type: json_or_null(entity.organization_type.as_ref()),
                    region: json_or_null(entity.region.as_ref()),
                },
            )
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::Position;
    use crate::views::tests::{entity, entity_with};

    #[test]
    fn test_lite_nodes_compact_keys() {
        let mut with_pos = entity("a", "Alpha", "plans/alpha");
        with_pos.position = Some(Position { x: 1.0, y: 2.5 });
        let without_pos = entity("b", "Beta", "plans/beta");

        let lite = lite_graph(&[with_pos, without_pos], &[]);
        let json = serde_json::to_value(&lite).unwrap();

        assert_eq!(json["nodes"][0]["id"], "a");
        assert_eq!(json["nodes"][0]["l"], "Alpha");
        assert_eq!(json["nodes"][0]["t"], "org");
        assert_eq!(json["nodes"][0]["s"], "plans/alpha");
        assert_eq!(json["nodes"][0]["x"], 1.0);
        assert_eq!(json["nodes"][0]["y"], 2.5);
        // Position keys are absent entirely when no position was authored
        assert!(json["nodes"][1].get("x").is_none());
        assert!(json["nodes"][1].get("y").is_none());
    }

    #[test]
    fn test_lite_edges_are_triples() {
        let entities = vec![entity("a", "A", "s/a"), entity("b", "B", "s/b")];
        let edges = vec![Edge {
            source: "a".to_string(),
            target: "b".to_string(),
            relationship_type: "funds".to_string(),
        }];

        let json = serde_json::to_value(&lite_graph(&entities, &edges)).unwrap();
        assert_eq!(json["edges"][0], serde_json::json!(["a", "b", "funds"]));
    }

    #[test]
    fn test_details_shape_and_both_spellings() {
        let e = entity_with(
            "x",
            "X",
            "s/x",
            "organisation_type: ngo\nregion: EU\n",
        );
        let details = node_details(&[e]);
        let json = serde_json::to_value(&details).unwrap();

        let entry = &json["x"];
        assert_eq!(entry["label"], "X");
        assert_eq!(entry["type"], "ORGANIZATION");
        assert_eq!(entry["organisation_type"], "ngo");
        // The other spelling is present and null, never omitted
        assert_eq!(entry["organization_type"], JsonValue::Null);
        assert_eq!(entry["region"], "EU");
        assert_eq!(entry["fields"]["organisation_type"], "ngo");
    }

    #[test]
    fn test_details_sorted_by_id() {
        let details = node_details(&[entity("z", "Z", "s/z"), entity("a", "A", "s/a")]);
        let encoded = serde_json::to_string(&details).unwrap();
        assert!(encoded.find("\"a\"").unwrap() < encoded.find("\"z\"").unwrap());
    }
}
