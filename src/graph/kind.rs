//! Closed vocabulary of entity types and their rendering classes.

/// Entity type recognized by the pipeline.
///
/// Parsed case-insensitively from a record's `@type` tag (or from the
/// singularized category directory when the tag is absent). Tags outside the
/// known vocabulary are carried through verbatim in `Other`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EntityKind {
    Organization,
    Event,
    Plan,
    Rule,
    Service,
    Dataset,
    Person,
    Resource,
    Collection,
    Tool,
    Relationship,
    /// Unrecognized tag, stored uppercased.
    Other(String),
}

impl EntityKind {
    /// Parse a raw type tag. The `organisation` spelling and the `org`
    /// shorthand (an `orgs/` category directory) both map to
    /// [`EntityKind::Organization`].
    pub fn parse(raw: &str) -> EntityKind {
        let tag = raw.trim();
        match tag.to_lowercase().as_str() {
            "organization" | "organisation" | "org" => EntityKind::Organization,
            "event" => EntityKind::Event,
            "plan" => EntityKind::Plan,
            "rule" => EntityKind::Rule,
            "service" => EntityKind::Service,
            "dataset" => EntityKind::Dataset,
            "person" => EntityKind::Person,
            "resource" => EntityKind::Resource,
            "collection" => EntityKind::Collection,
            "tool" => EntityKind::Tool,
            "relationship" => EntityKind::Relationship,
            _ => EntityKind::Other(tag.to_uppercase()),
        }
    }

    /// Canonical uppercase tag, e.g. `ORGANIZATION`.
    pub fn type_tag(&self) -> &str {
        match self {
            EntityKind::Organization => "ORGANIZATION",
            EntityKind::Event => "EVENT",
            EntityKind::Plan => "PLAN",
            EntityKind::Rule => "RULE",
            EntityKind::Service => "SERVICE",
            EntityKind::Dataset => "DATASET",
            EntityKind::Person => "PERSON",
            EntityKind::Resource => "RESOURCE",
            EntityKind::Collection => "COLLECTION",
            EntityKind::Tool => "TOOL",
            EntityKind::Relationship => "RELATIONSHIP",
            EntityKind::Other(tag) => tag,
        }
    }

    /// Short rendering class used by the explorer stylesheets.
    ///
    /// Kinds without a dedicated style (including `Resource` and all `Other`
    /// tags) fall back to `default`.
    pub fn class(&self) -> &str {
        match self {
            EntityKind::Organization => "org",
            EntityKind::Event => "event",
            EntityKind::Plan => "plan",
            EntityKind::Rule => "rule",
            EntityKind::Service => "service",
            EntityKind::Dataset => "dataset",
            EntityKind::Person => "person",
            EntityKind::Collection => "collection",
            EntityKind::Tool => "tool",
            EntityKind::Relationship => "relationship",
            EntityKind::Resource | EntityKind::Other(_) => "default",
        }
    }

    /// Key of the type-specific field block inside a record,
    /// e.g. `organization_fields` for an `ORGANIZATION` entity.
    pub fn field_block_key(&self) -> String {
        format!("{}_fields", self.type_tag().to_lowercase())
    }
}
