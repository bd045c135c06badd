//! Text normalization helpers shared by the record pipeline.
//!
//! All helpers are pure functions over strings and YAML scalars. Slug and
//! search-blob rules are load-bearing: downstream pages are addressed by slug,
//! so any change here changes published URLs.

use std::path::Path;
use std::sync::OnceLock;

use regex::Regex;
use serde_yaml_ng::Value;

/// Character cap for entity summaries.
pub const SUMMARY_LIMIT: usize = 260;

/// Character cap for search blobs.
pub const SEARCH_BLOB_LIMIT: usize = 500;

fn non_slug_chars() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"[^a-zA-Z0-9/_-]+").expect("Invalid regex pattern"))
}

fn hyphen_runs() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"-{2,}").expect("Invalid regex pattern"))
}

/// Kebab-case a label: disallowed characters become hyphens, the result is
/// trimmed, lowercased, and hyphen runs are collapsed. Slashes, underscores
/// and existing hyphens survive.
pub fn kebab(s: &str) -> String {
    let cleaned = non_slug_chars().replace_all(s, " ");
    let hyphenated = cleaned.trim().to_lowercase().replace(' ', "-");
    hyphen_runs().replace_all(&hyphenated, "-").into_owned()
}

/// Derive a slug from a record path relative to the content root:
/// the extension is dropped and each path segment is kebab-cased,
/// so `organizations/Acme Corp.yaml` becomes `organizations/acme-corp`.
pub fn slug_from_rel_path(rel_path: &str) -> String {
    let without_ext = Path::new(rel_path).with_extension("");
    let segments: Vec<String> = without_ext
        .components()
        .map(|c| kebab(&c.as_os_str().to_string_lossy()))
        .collect();
    segments.join("/")
}

/// Strip one trailing `s`, turning a category directory name into a type tag
/// (`organizations` -> `organization`).
pub fn singularize(s: &str) -> String {
    s.strip_suffix('s').unwrap_or(s).to_string()
}

/// Collapse all whitespace runs to single spaces and trim the ends.
pub fn collapse_whitespace(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Truncate to at most `limit` characters (not bytes), so multi-byte text
/// never splits mid-character.
pub fn truncate_chars(s: &str, limit: usize) -> String {
    if s.chars().count() <= limit {
        s.to_string()
    } else {
        s.chars().take(limit).collect()
    }
}

/// Render a YAML scalar as a string. Sequences, mappings and nulls yield
/// `None`; they have no sensible single-string form.
pub fn scalar_to_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

/// Coerce an optional YAML value into a list of strings: a sequence maps its
/// scalar items, a lone scalar becomes a one-element list, anything else is
/// empty.
pub fn as_string_list(value: Option<&Value>) -> Vec<String> {
    match value {
        None | Some(Value::Null) => Vec::new(),
        Some(Value::Sequence(items)) => items.iter().filter_map(scalar_to_string).collect(),
        Some(other) => scalar_to_string(other).map_or_else(Vec::new, |s| vec![s]),
    }
}

/// Build the lowercase search blob for an entity. Parts are individually
/// whitespace-collapsed, joined with single spaces, and the whole blob is
/// capped at [`SEARCH_BLOB_LIMIT`] characters.
pub fn search_blob(label: &str, tags: &[String], summary: &str, slug: &str, type_tag: &str) -> String {
    let tag_text = tags.join(" ");
    let parts = [label, tag_text.as_str(), summary, slug, type_tag];
    let joined = parts
        .iter()
        .map(|p| collapse_whitespace(p))
        .collect::<Vec<_>>()
        .join(" ");
    truncate_chars(&joined.trim().to_lowercase(), SEARCH_BLOB_LIMIT)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kebab_basic() {
        assert_eq!(kebab("Acme Corp"), "acme-corp");
        assert_eq!(kebab("  Acme   Corp  "), "acme-corp");
        assert_eq!(kebab("Acme & Co."), "acme-co");
    }

    #[test]
    fn test_kebab_keeps_slashes_and_underscores() {
        assert_eq!(kebab("a/b_c-d"), "a/b_c-d");
    }

    #[test]
    fn test_kebab_collapses_hyphen_runs() {
        assert_eq!(kebab("a - b"), "a-b");
        assert_eq!(kebab("a--b"), "a-b");
    }

    #[test]
    fn test_slug_from_rel_path() {
        assert_eq!(
            slug_from_rel_path("organizations/Acme Corp.yaml"),
            "organizations/acme-corp"
        );
        assert_eq!(slug_from_rel_path("events/big launch.yaml"), "events/big-launch");
    }

    #[test]
    fn test_singularize() {
        assert_eq!(singularize("organizations"), "organization");
        assert_eq!(singularize("persons"), "person");
        assert_eq!(singularize("data"), "data");
    }

    #[test]
    fn test_truncate_chars_multibyte() {
        // 4 characters, more than 4 bytes
        let s = "héllö";
        assert_eq!(truncate_chars(s, 3), "hél");
        assert_eq!(truncate_chars(s, 10), "héllö");
    }

    #[test]
    fn test_as_string_list() {
        let seq: Value = serde_yaml_ng::from_str("[a, b, 3]").unwrap();
        assert_eq!(as_string_list(Some(&seq)), vec!["a", "b", "3"]);

        let scalar = Value::String("solo".into());
        assert_eq!(as_string_list(Some(&scalar)), vec!["solo"]);

        assert!(as_string_list(None).is_empty());
        assert!(as_string_list(Some(&Value::Null)).is_empty());
    }

    #[test]
    fn test_search_blob_shape() {
        let blob = search_blob(
            "Acme  Corp",
            &["energy".to_string(), "infra".to_string()],
            "Does  things",
            "organizations/acme-corp",
            "ORGANIZATION",
        );
        assert_eq!(
            blob,
            "acme corp energy infra does things organizations/acme-corp organization"
        );
    }

    #[test]
    fn test_search_blob_empty_parts_collapse() {
        // Empty tag and summary slots leave single separators, trimmed at ends
        let blob = search_blob("Acme", &[], "", "acme", "ORGANIZATION");
        assert_eq!(blob, "acme   acme organization");
    }

    #[test]
    fn test_search_blob_capped() {
        let long_label = "x".repeat(600);
        let blob = search_blob(&long_label, &[], "", "s", "T");
        assert_eq!(blob.chars().count(), SEARCH_BLOB_LIMIT);
    }
}
