//! Identity index: every way an author may refer to an entity, mapped back to
//! its canonical id.

use std::collections::{BTreeSet, HashMap};

/// Alternate-key index over canonical entity ids.
///
/// Registration stores the id itself, the slug, the display name (exact and
/// lowercased), and the file stem. Later registrations win on key collisions;
/// a collision that changes the resolved id is logged at debug level.
#[derive(Debug, Default)]
pub struct Crosswalk {
    ids: BTreeSet<String>,
    alternates: HashMap<String, String>,
}

impl Crosswalk {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether `id` is a canonical entity id.
    pub fn contains_id(&self, id: &str) -> bool {
        self.ids.contains(id)
    }

    pub fn id_count(&self) -> usize {
        self.ids.len()
    }

    /// Register an entity under all of its alternate keys.
    pub fn register(&mut self, id: &str, slug: &str, name: Option<&str>, file_stem: &str) {
        self.ids.insert(id.to_string());
        self.alias(id, id);
        self.alias(slug, id);
        if let Some(name) = name {
            self.alias(name, id);
            self.alias(&name.to_lowercase(), id);
        }
        self.alias(file_stem, id);
    }

    fn alias(&mut self, key: &str, id: &str) {
        if key.is_empty() {
            return;
        }
        if let Some(previous) = self.alternates.insert(key.to_string(), id.to_string()) {
            if previous != id {
                log::debug!(
                    "Crosswalk key {:?} now resolves to {} (was {})",
                    key,
                    id,
                    previous
                );
            }
        }
    }

    /// Resolve a raw reference to a canonical id.
    ///
    /// Known ids pass through untouched; otherwise the alternate index is
    /// consulted with the exact key, then the lowercased key. An unresolvable
    /// reference comes back unchanged so the caller can report it verbatim.
    pub fn resolve(&self, reference: &str) -> String {
        if reference.is_empty() || self.ids.contains(reference) {
            return reference.to_string();
        }
        if let Some(id) = self.alternates.get(reference) {
            return id.clone();
        }
        let lowered = reference.to_lowercase();
        if let Some(id) = self.alternates.get(&lowered) {
            return id.clone();
        }
        reference.to_string()
    }
}
