//! Source-node inventories: which entity ids went into the build.
//!
//! These are derived from the compiled entity set rather than a second
//! filesystem scan, so they can never disagree with the graph payloads.

use std::collections::BTreeMap;

use crate::graph::Entity;

/// Flat sorted list of every entity id in the build.
pub fn source_list(entities: &[Entity]) -> Vec<String> {
    let mut ids: Vec<String> = entities.iter().map(|e| e.id.clone()).collect();
    ids.sort();
    ids
}

/// Entity ids grouped by type tag, each group sorted.
pub fn source_groups(entities: &[Entity]) -> BTreeMap<String, Vec<String>> {
    let mut groups: BTreeMap<String, Vec<String>> = BTreeMap::new();
    for entity in entities {
        groups
            .entry(entity.type_tag().to_string())
            .or_default()
            .push(entity.id.clone());
    }
    for ids in groups.values_mut() {
        ids.sort();
    }
    groups
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::EntityKind;
    use crate::views::tests::entity;

    #[test]
    fn test_source_list_sorted() {
        let entities = vec![
            entity("zeta", "Zeta", "organizations/zeta"),
            entity("alpha", "Alpha", "organizations/alpha"),
        ];
        assert_eq!(source_list(&entities), vec!["alpha", "zeta"]);
    }

    #[test]
    fn test_source_groups_by_type() {
        let mut person = entity("ada", "Ada", "persons/ada");
        person.kind = EntityKind::Person;
        let entities = vec![
            entity("org-b", "Org B", "organizations/org-b"),
            person,
            entity("org-a", "Org A", "organizations/org-a"),
        ];

        let groups = source_groups(&entities);
        assert_eq!(
            groups.keys().collect::<Vec<_>>(),
            vec!["ORGANIZATION", "PERSON"]
        );
        assert_eq!(groups["ORGANIZATION"], vec!["org-a", "org-b"]);
        assert_eq!(groups["PERSON"], vec!["ada"]);
    }

    #[test]
    fn test_empty_inputs() {
        assert!(source_list(&[]).is_empty());
        assert!(source_groups(&[]).is_empty());
    }
}
