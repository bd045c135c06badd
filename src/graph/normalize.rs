//! Entity normalization: raw YAML records become canonical [`Entity`] values.
//!
//! Every record passes through the same sequence: identity, label, type,
//! slug and addresses, derived text, type-specific fields, and finally
//! crosswalk registration. A record that fails a hard requirement is skipped
//! with a diagnostic; the batch always continues.

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde_yaml_ng::Value as YamlValue;
use thiserror::Error;

use crate::graph::text;
use crate::graph::{Crosswalk, Entity, EntityKind, PersonRef, Position, TypeFields};
use crate::loader::{load_record, RawRecord, RecordFile};

/// Why a record was dropped from the batch.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SkipReason {
    #[error("duplicate id {0:?}, keeping the first record")]
    DuplicateId(String),
    #[error("no usable label")]
    MissingLabel,
}

/// Result of normalizing one batch of entity record files.
#[derive(Debug)]
pub struct NormalizedBatch {
    pub entities: Vec<Entity>,
    pub crosswalk: Crosswalk,
    /// Records dropped for any reason: unreadable, empty, duplicate, unlabeled.
    pub skipped: usize,
}

/// Load and normalize every record file, in the order given.
///
/// The caller passes files sorted by relative path, so duplicate-id conflicts
/// resolve the same way on every run: the first record in path order wins.
pub fn build_entities(files: &[RecordFile], content_dir_name: &str) -> NormalizedBatch {
    let mut entities = Vec::new();
    let mut crosswalk = Crosswalk::new();
    let mut skipped = 0usize;

    for file in files {
        let Some(record) = load_record(&file.absolute_path) else {
            skipped += 1;
            continue;
        };
        match normalize_record(&record, file, content_dir_name, &mut crosswalk) {
            Ok(entity) => entities.push(entity),
            Err(reason) => {
                log::warn!("Skipping {}: {}", file.relative_path, reason);
                skipped += 1;
            }
        }
    }

    log::info!(
        "Normalized {} entities ({} records skipped)",
        entities.len(),
        skipped
    );

    NormalizedBatch {
        entities,
        crosswalk,
        skipped,
    }
}

/// Normalize a single record and register it in the crosswalk.
pub fn normalize_record(
    record: &RawRecord,
    file: &RecordFile,
    content_dir_name: &str,
    crosswalk: &mut Crosswalk,
) -> Result<Entity, SkipReason> {
    // Identity first: explicit id, else the file stem. Duplicates are
    // rejected before any further work so the first record keeps all of its
    // crosswalk keys.
    let id = record
        .get_scalar("id")
        .unwrap_or_else(|| file.stem.clone());
    if crosswalk.contains_id(&id) {
        return Err(SkipReason::DuplicateId(id));
    }

    let name = record.get_text("name");
    let label = match &name {
        Some(name) => name.clone(),
        None => id.clone(),
    };
    if label.trim().is_empty() {
        return Err(SkipReason::MissingLabel);
    }

    let raw_type = record
        .get_text("@type")
        .unwrap_or_else(|| text::singularize(&file.category));
    let kind = EntityKind::parse(&raw_type);

    let slug = record
        .get_scalar("slug")
        .unwrap_or_else(|| text::slug_from_rel_path(&file.relative_path));
    let source_path = format!("{}/{}", content_dir_name, file.relative_path);
    let page_url = format!("{}/", slug);

    let tags = text::as_string_list(record.get("tags"));
    let summary = pick_summary(record);
    let search_blob = text::search_blob(&label, &tags, &summary, &slug, kind.type_tag());

    let fields = extract_type_fields(record, &kind);
    let region = fields.get("region").cloned();
    let organisation_type = fields.get("organisation_type").cloned();
    let organization_type = fields.get("organization_type").cloned();
    let projects = text::as_string_list(fields.get("projects"));
    let persons = normalize_persons(fields.get("persons"));

    crosswalk.register(&id, &slug, name.as_deref(), &file.stem);

    Ok(Entity {
        id,
        label,
        kind,
        slug,
        source_path,
        page_url,
        tags,
        summary,
        search_blob,
        website: record.get("website").cloned(),
        notes: record.get("notes").cloned(),
        version: record.get_scalar("version"),
        date_published: canonical_date(record.get("date_published")),
        super_concept: record.get("super_concept").cloned(),
        sub_concept: record.get("sub_concept").cloned(),
        fields,
        region,
        organisation_type,
        organization_type,
        projects,
        persons,
        position: parse_position(record.get("position")),
    })
}

/// First non-empty of `summary`, `description`, `notes`, whitespace-collapsed
/// and capped at [`text::SUMMARY_LIMIT`] characters.
fn pick_summary(record: &RawRecord) -> String {
    for key in ["summary", "description", "notes"] {
        let Some(value) = record.get(key) else {
            continue;
        };
        let Some(raw) = text::scalar_to_string(value) else {
            continue;
        };
        let cleaned = text::collapse_whitespace(&raw);
        if !cleaned.is_empty() {
            return text::truncate_chars(&cleaned, text::SUMMARY_LIMIT);
        }
    }
    String::new()
}

/// Pull the type-specific block (`<type>_fields`) out of the record.
fn extract_type_fields(record: &RawRecord, kind: &EntityKind) -> TypeFields {
    match record.get(&kind.field_block_key()) {
        None | Some(YamlValue::Null) => TypeFields::Empty,
        Some(YamlValue::Mapping(map)) => TypeFields::Fields(map.clone()),
        Some(other) => TypeFields::Value(other.clone()),
    }
}

/// Normalize a `persons` block into `{name, role, from}` string entries.
/// Non-list blocks yield nothing; list items may be mappings or bare scalars.
fn normalize_persons(value: Option<&YamlValue>) -> Vec<PersonRef> {
    let Some(YamlValue::Sequence(items)) = value else {
        return Vec::new();
    };
    items.iter().filter_map(person_entry).collect()
}

fn person_entry(value: &YamlValue) -> Option<PersonRef> {
    match value {
        YamlValue::Mapping(map) => {
            let field = |key: &str| {
                map.get(key)
                    .and_then(text::scalar_to_string)
                    .unwrap_or_default()
            };
            Some(PersonRef {
                name: field("name"),
                role: field("role"),
                origin: field("from"),
            })
        }
        other => text::scalar_to_string(other).map(|name| PersonRef {
            name,
            role: String::new(),
            origin: String::new(),
        }),
    }
}

/// Canonicalize a publication date to its ISO form.
///
/// Accepted inputs: `YYYY-MM-DD`, `YYYY-MM-DD HH:MM:SS`, and RFC 3339.
/// Anything else passes through as authored, so an odd value is visible in
/// the output instead of silently vanishing.
fn canonical_date(value: Option<&YamlValue>) -> Option<String> {
    let raw = text::scalar_to_string(value?)?;
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    if let Ok(date) = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
        return Some(date.format("%Y-%m-%d").to_string());
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(trimmed, "%Y-%m-%d %H:%M:%S") {
        return Some(dt.format("%Y-%m-%dT%H:%M:%S").to_string());
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(trimmed) {
        return Some(dt.to_rfc3339());
    }
    Some(raw)
}

/// Fixed layout position: a mapping with numeric (or numeric-string) `x` and
/// `y`. Both must parse or the position is dropped.
fn parse_position(value: Option<&YamlValue>) -> Option<Position> {
    let map = value?.as_mapping()?;
    let x = number_from(map.get("x")?)?;
    let y = number_from(map.get("y")?)?;
    Some(Position { x, y })
}

fn number_from(value: &YamlValue) -> Option<f64> {
    match value {
        YamlValue::Number(n) => n.as_f64(),
        YamlValue::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::loader::parse_record;
    use std::path::PathBuf;

    fn record_file(rel: &str) -> RecordFile {
        let stem = PathBuf::from(rel)
            .file_stem()
            .unwrap()
            .to_string_lossy()
            .to_string();
        let category = rel.split('/').next().unwrap_or("").to_string();
        RecordFile {
            relative_path: rel.to_string(),
            absolute_path: PathBuf::from(rel),
            category,
            stem,
        }
    }

    fn normalize(yaml: &str, rel: &str, crosswalk: &mut Crosswalk) -> Result<Entity, SkipReason> {
        let record = parse_record(yaml, rel).unwrap();
        normalize_record(&record, &record_file(rel), "data_yml", crosswalk)
    }

    #[test]
    fn test_minimal_record_gets_defaults() {
        let mut cw = Crosswalk::new();
        let entity = normalize("name: Acme Corp\n", "organizations/acme_corp.yaml", &mut cw)
            .unwrap();

        assert_eq!(entity.id, "acme_corp");
        assert_eq!(entity.label, "Acme Corp");
        assert_eq!(entity.kind, EntityKind::Organization);
        assert_eq!(entity.type_tag(), "ORGANIZATION");
        assert_eq!(entity.class(), "org");
        assert_eq!(entity.slug, "organizations/acme_corp");
        assert_eq!(entity.source_path, "data_yml/organizations/acme_corp.yaml");
        assert_eq!(entity.page_url, "organizations/acme_corp/");
        assert_eq!(entity.summary, "");
        assert_eq!(
            entity.search_blob,
            "acme corp   organizations/acme_corp organization"
        );
        assert!(entity.tags.is_empty());
        assert!(entity.position.is_none());
    }

    #[test]
    fn test_nameless_record_uses_id_as_label() {
        let mut cw = Crosswalk::new();
        let entity = normalize("id: mystery\n", "tools/mystery.yaml", &mut cw).unwrap();
        assert_eq!(entity.label, "mystery");
        assert_eq!(entity.kind, EntityKind::Tool);
    }

    #[test]
    fn test_abbreviated_org_category_collapses_to_org_class() {
        let mut cw = Crosswalk::new();
        let entity = normalize("name: Acme\n", "orgs/acme.yaml", &mut cw).unwrap();
        assert_eq!(entity.id, "acme");
        assert_eq!(entity.slug, "orgs/acme");
        assert_eq!(entity.kind, EntityKind::Organization);
        assert_eq!(entity.class(), "org");
    }

    #[test]
    fn test_explicit_fields_override_defaults() {
        let mut cw = Crosswalk::new();
        let yaml = "\
id: acme
name: Acme Corp
'@type': organisation
slug: orgs/acme
tags: [energy, infra]
summary: '  Builds   things  '
";
        let entity = normalize(yaml, "organizations/acme_file.yaml", &mut cw).unwrap();

        assert_eq!(entity.id, "acme");
        // Spelling is normalized at the type boundary
        assert_eq!(entity.type_tag(), "ORGANIZATION");
        assert_eq!(entity.slug, "orgs/acme");
        assert_eq!(entity.page_url, "orgs/acme/");
        assert_eq!(entity.summary, "Builds things");
        assert_eq!(entity.tags, vec!["energy", "infra"]);
    }

    #[test]
    fn test_numeric_id_coerced() {
        let mut cw = Crosswalk::new();
        let entity = normalize("id: 42\nname: Answer\n", "datasets/answer.yaml", &mut cw).unwrap();
        assert_eq!(entity.id, "42");
    }

    #[test]
    fn test_duplicate_id_skipped_first_wins() {
        let mut cw = Crosswalk::new();
        normalize("id: acme\nname: First\n", "organizations/a.yaml", &mut cw).unwrap();
        let second = normalize("id: acme\nname: Second\n", "organizations/b.yaml", &mut cw);
        assert_eq!(
            second.unwrap_err(),
            SkipReason::DuplicateId("acme".to_string())
        );
        // A stem-derived id collides with an explicit one the same way
        let third = normalize("name: Third\n", "organizations/acme.yaml", &mut cw);
        assert_eq!(
            third.unwrap_err(),
            SkipReason::DuplicateId("acme".to_string())
        );
        // The first registration is untouched
        assert_eq!(cw.resolve("First"), "acme");
        assert_eq!(cw.id_count(), 1);
    }

    #[test]
    fn test_crosswalk_registration_keys() {
        let mut cw = Crosswalk::new();
        normalize(
            "id: acme\nname: Acme Corp\n",
            "organizations/acme_corp.yaml",
            &mut cw,
        )
        .unwrap();

        assert_eq!(cw.resolve("acme"), "acme");
        assert_eq!(cw.resolve("organizations/acme_corp"), "acme");
        assert_eq!(cw.resolve("Acme Corp"), "acme");
        assert_eq!(cw.resolve("acme corp"), "acme");
        assert_eq!(cw.resolve("acme_corp"), "acme");
    }

    #[test]
    fn test_summary_fallback_chain_and_cap() {
        let mut cw = Crosswalk::new();
        let entity = normalize(
            "name: A\ndescription: from description\n",
            "plans/a.yaml",
            &mut cw,
        )
        .unwrap();
        assert_eq!(entity.summary, "from description");

        let long = format!("name: B\nsummary: '{}'\n", "x".repeat(300));
        let entity = normalize(&long, "plans/b.yaml", &mut cw).unwrap();
        assert_eq!(entity.summary.chars().count(), text::SUMMARY_LIMIT);
    }

    #[test]
    fn test_type_fields_and_pullthroughs() {
        let mut cw = Crosswalk::new();
        let yaml = "\
name: Acme
organization_fields:
  organisation_type: nonprofit
  region: EU
  projects: [alpha, beta]
  persons:
    - name: Ada
      role: chair
      from: 2021
    - Grace
";
        let entity = normalize(yaml, "organizations/acme.yaml", &mut cw).unwrap();

        assert_eq!(
            entity.org_type(),
            Some(&YamlValue::String("nonprofit".into()))
        );
        assert_eq!(entity.region, Some(YamlValue::String("EU".into())));
        assert_eq!(entity.projects, vec!["alpha", "beta"]);
        assert_eq!(
            entity.persons,
            vec![
                PersonRef {
                    name: "Ada".into(),
                    role: "chair".into(),
                    origin: "2021".into()
                },
                PersonRef {
                    name: "Grace".into(),
                    role: String::new(),
                    origin: String::new()
                },
            ]
        );
    }

    #[test]
    fn test_malformed_field_block_wrapped() {
        let mut cw = Crosswalk::new();
        let entity = normalize(
            "name: E\nevent_fields: just a string\n",
            "events/e.yaml",
            &mut cw,
        )
        .unwrap();
        assert_eq!(
            entity.fields.to_json(),
            serde_json::json!({"_value": "just a string"})
        );
    }

    #[test]
    fn test_field_block_key_follows_type() {
        let mut cw = Crosswalk::new();
        // The block named after the declared type wins; others are ignored
        let yaml = "\
name: T
'@type': tool
tool_fields:
  region: DE
organization_fields:
  region: FR
";
        let entity = normalize(yaml, "tools/t.yaml", &mut cw).unwrap();
        assert_eq!(entity.region, Some(YamlValue::String("DE".into())));
    }

    #[test]
    fn test_dates_canonicalized() {
        let mut cw = Crosswalk::new();
        let entity = normalize(
            "name: D\ndate_published: '2025-6-5'\n",
            "datasets/d1.yaml",
            &mut cw,
        )
        .unwrap();
        assert_eq!(entity.date_published.as_deref(), Some("2025-06-05"));

        let entity = normalize(
            "name: D2\ndate_published: '2025-06-05 10:30:00'\n",
            "datasets/d2.yaml",
            &mut cw,
        )
        .unwrap();
        assert_eq!(entity.date_published.as_deref(), Some("2025-06-05T10:30:00"));

        let entity = normalize(
            "name: D3\ndate_published: 'sometime in spring'\n",
            "datasets/d3.yaml",
            &mut cw,
        )
        .unwrap();
        assert_eq!(
            entity.date_published.as_deref(),
            Some("sometime in spring")
        );
    }

    #[test]
    fn test_position_requires_both_coordinates() {
        let mut cw = Crosswalk::new();
        let entity = normalize(
            "name: P\nposition: {x: 10, y: '20.5'}\n",
            "plans/p1.yaml",
            &mut cw,
        )
        .unwrap();
        assert_eq!(entity.position, Some(Position { x: 10.0, y: 20.5 }));

        let entity = normalize("name: P2\nposition: {x: 10}\n", "plans/p2.yaml", &mut cw)
            .unwrap();
        assert!(entity.position.is_none());

        let entity = normalize(
            "name: P3\nposition: {x: ten, y: 2}\n",
            "plans/p3.yaml",
            &mut cw,
        )
        .unwrap();
        assert!(entity.position.is_none());
    }

    #[test]
    fn test_build_entities_counts_unparseable() {
        use std::fs;
        use tempfile::TempDir;

        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();
        fs::create_dir_all(root.join("organizations")).unwrap();
        fs::write(root.join("organizations/good.yaml"), "name: Good\n").unwrap();
        fs::write(root.join("organizations/bad.yaml"), "name: [unclosed\n").unwrap();
        fs::write(root.join("organizations/empty.yaml"), "").unwrap();

        let files = crate::loader::discover_entity_records(root, "relationships");
        let batch = build_entities(&files, "data_yml");

        assert_eq!(batch.entities.len(), 1);
        assert_eq!(batch.skipped, 2);
        assert_eq!(batch.entities[0].label, "Good");
    }
}
