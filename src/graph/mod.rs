//! Graph core: canonical entities, resolved edges, and the identity index.
//!
//! Raw YAML records come in through [`crate::loader`]; this module turns them
//! into canonical [`Entity`] values, registers every way an author may refer
//! to them in the [`Crosswalk`], and resolves relationship records into
//! [`Edge`]s between known ids.

pub mod crosswalk;
pub mod kind;
pub mod normalize;
pub mod resolve;
pub mod text;

pub use crosswalk::Crosswalk;
pub use kind::EntityKind;
pub use normalize::{build_entities, normalize_record, NormalizedBatch, SkipReason};
pub use resolve::{resolve_edges, ResolvedEdges};

use serde::Serialize;
use serde_json::Value as JsonValue;
use serde_yaml_ng::{Mapping, Value as YamlValue};

use crate::output::json;

/// A canonical graph node, fully normalized and ready for every derived view.
#[derive(Debug, Clone)]
pub struct Entity {
    /// Stable identity, unique across the whole batch.
    pub id: String,
    /// Human-readable display name, never empty.
    pub label: String,
    pub kind: EntityKind,
    /// URL-safe path, e.g. `organizations/acme-corp`.
    pub slug: String,
    /// Provenance path, `<content dir>/<relative path>`.
    pub source_path: String,
    /// Site-relative page address, `<slug>/`.
    pub page_url: String,
    pub tags: Vec<String>,
    /// Whitespace-normalized summary, capped, possibly empty.
    pub summary: String,
    /// Lowercase concatenated search text, capped.
    pub search_blob: String,
    pub website: Option<YamlValue>,
    pub notes: Option<YamlValue>,
    pub version: Option<String>,
    pub date_published: Option<String>,
    pub super_concept: Option<YamlValue>,
    pub sub_concept: Option<YamlValue>,
    /// Type-specific field block, preserved as authored.
    pub fields: TypeFields,
    pub region: Option<YamlValue>,
    pub organisation_type: Option<YamlValue>,
    pub organization_type: Option<YamlValue>,
    pub projects: Vec<String>,
    pub persons: Vec<PersonRef>,
    /// Optional fixed layout position.
    pub position: Option<Position>,
}

impl Entity {
    /// Canonical uppercase type tag, e.g. `ORGANIZATION`.
    pub fn type_tag(&self) -> &str {
        self.kind.type_tag()
    }

    /// Rendering class for stylesheets, e.g. `org`.
    pub fn class(&self) -> &str {
        self.kind.class()
    }

    /// `organisation_type` with the `organization_type` spelling as fallback.
    pub fn org_type(&self) -> Option<&YamlValue> {
        self.organisation_type
            .as_ref()
            .or(self.organization_type.as_ref())
    }
}

/// A person reference from an entity's field block.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct PersonRef {
    pub name: String,
    pub role: String,
    #[serde(rename = "from")]
    pub origin: String,
}

/// Fixed layout coordinates for an entity.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

/// A resolved relationship between two known entity ids.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Edge {
    pub source: String,
    pub target: String,
    /// Edge label, `relatesTo` unless the record says otherwise.
    pub relationship_type: String,
}

/// The type-specific field block of a record (`organization_fields`,
/// `event_fields`, ...), kept opaque for pass-through.
#[derive(Debug, Clone, Default)]
pub enum TypeFields {
    /// No block present.
    #[default]
    Empty,
    /// A well-formed key/value block.
    Fields(Mapping),
    /// A malformed block (scalar or list); wrapped rather than dropped.
    Value(YamlValue),
}

impl TypeFields {
    /// Look up a key inside a well-formed block.
    pub fn get(&self, key: &str) -> Option<&YamlValue> {
        match self {
            TypeFields::Fields(map) => map.get(key),
            _ => None,
        }
    }

    /// JSON rendition: `{}` when empty, the block itself when well-formed,
    /// `{"_value": ...}` for malformed blocks.
    pub fn to_json(&self) -> JsonValue {
        match self {
            TypeFields::Empty => JsonValue::Object(serde_json::Map::new()),
            TypeFields::Fields(map) => json::mapping_to_json(map),
            TypeFields::Value(value) => {
                let mut wrapped = serde_json::Map::new();
                wrapped.insert("_value".to_string(), json::yaml_to_json(value));
                JsonValue::Object(wrapped)
            }
        }
    }
}
