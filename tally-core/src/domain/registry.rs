//! Person and group name registry
//!
//! Maps canonical names and aliases to dense person ids, and group names to
//! the flattened set of ids they stood for when they were defined.

use std::collections::{BTreeSet, HashMap, HashSet};

use super::result::{Error, Namespace, Result};
use super::PersonId;

/// Name registry for persons and groups
///
/// Person ids are assigned in registration order starting at 0 and are
/// never reused. Person names/aliases and group names are separate
/// namespaces.
#[derive(Debug, Clone, Default)]
pub struct EntityRegistry {
    canonical_names: Vec<String>,
    persons: HashMap<String, PersonId>,
    groups: HashMap<String, BTreeSet<PersonId>>,
}

impl EntityRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a person with its aliases, returning the new id
    ///
    /// Fails with `DuplicateName` if the name or any alias is already taken,
    /// including collisions within the same definition. Nothing is
    /// registered on failure.
    pub fn register_person<S: AsRef<str>>(&mut self, name: &str, aliases: &[S]) -> Result<PersonId> {
        let mut seen: HashSet<&str> = HashSet::with_capacity(aliases.len() + 1);
        for candidate in std::iter::once(name).chain(aliases.iter().map(AsRef::as_ref)) {
            if self.persons.contains_key(candidate) || !seen.insert(candidate) {
                return Err(Error::duplicate_name(candidate, Namespace::Person));
            }
        }

        let id = self.canonical_names.len();
        self.canonical_names.push(name.to_string());
        for candidate in seen {
            self.persons.insert(candidate.to_string(), id);
        }
        Ok(id)
    }

    /// Register a group, flattening member groups into their person ids
    ///
    /// Fails with `DuplicateName` in the group namespace if the name is
    /// already a group. Members are looked up as groups first, then as persons. The resulting
    /// set is a snapshot; later definitions never change it.
    pub fn register_group<S: AsRef<str>>(&mut self, name: &str, members: &[S]) -> Result<()> {
        if self.groups.contains_key(name) {
            return Err(Error::duplicate_name(name, Namespace::Group));
        }

        let mut resolved = BTreeSet::new();
        for member in members {
            let member = member.as_ref();
            if let Some(ids) = self.groups.get(member) {
                resolved.extend(ids.iter().copied());
            } else if let Some(&id) = self.persons.get(member) {
                resolved.insert(id);
            } else {
                return Err(Error::UnknownEntity(member.to_string()));
            }
        }

        self.groups.insert(name.to_string(), resolved);
        Ok(())
    }

    /// Resolve transaction participants to a set of person ids
    ///
    /// Persons are matched before groups. Ids reachable more than once
    /// collapse into one.
    pub fn resolve_names<S: AsRef<str>>(&self, names: &[S]) -> Result<BTreeSet<PersonId>> {
        let mut ids = BTreeSet::new();
        for name in names {
            let name = name.as_ref();
            if let Some(&id) = self.persons.get(name) {
                ids.insert(id);
            } else if let Some(members) = self.groups.get(name) {
                ids.extend(members.iter().copied());
            } else {
                return Err(Error::UnknownEntity(name.to_string()));
            }
        }
        Ok(ids)
    }

    /// Canonical name of a person, for rendering
    pub fn canonical_name(&self, id: PersonId) -> Option<&str> {
        self.canonical_names.get(id).map(String::as_str)
    }

    /// Id of a person by canonical name or alias
    pub fn person_id(&self, name: &str) -> Option<PersonId> {
        self.persons.get(name).copied()
    }

    /// Flattened members of a group
    pub fn group_members(&self, name: &str) -> Option<&BTreeSet<PersonId>> {
        self.groups.get(name)
    }

    pub fn is_person(&self, name: &str) -> bool {
        self.persons.contains_key(name)
    }

    pub fn is_group(&self, name: &str) -> bool {
        self.groups.contains_key(name)
    }

    pub fn person_count(&self) -> usize {
        self.canonical_names.len()
    }

    pub fn group_count(&self) -> usize {
        self.groups.len()
    }

    /// Canonical names in id order
    pub fn canonical_names(&self) -> impl Iterator<Item = &str> {
        self.canonical_names.iter().map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const NONE: &[&str] = &[];

    fn registry_with(names: &[&str]) -> EntityRegistry {
        let mut registry = EntityRegistry::new();
        for name in names {
            registry.register_person(name, NONE).unwrap();
        }
        registry
    }

    #[test]
    fn test_ids_follow_registration_order() {
        let mut registry = EntityRegistry::new();
        assert_eq!(registry.register_person("alice", NONE).unwrap(), 0);
        assert_eq!(registry.register_person("bob", &["bobby"]).unwrap(), 1);
        assert_eq!(registry.register_person("carol", NONE).unwrap(), 2);

        assert_eq!(registry.person_id("bobby"), Some(1));
        assert_eq!(registry.canonical_name(1), Some("bob"));
        assert_eq!(registry.canonical_name(3), None);
    }

    #[test]
    fn test_duplicate_alias_is_rejected_without_side_effects() {
        let mut registry = registry_with(&["alice"]);

        let err = registry.register_person("bob", &["b", "alice"]).unwrap_err();
        assert!(matches!(
            err,
            Error::DuplicateName { ref name, namespace: Namespace::Person } if name == "alice"
        ));
        assert_eq!(registry.person_count(), 1);
        assert!(!registry.is_person("bob"));
        assert!(!registry.is_person("b"));

        let err = registry.register_person("carol", &["carol"]).unwrap_err();
        assert!(matches!(err, Error::DuplicateName { .. }));
    }

    #[test]
    fn test_group_flattening_is_a_snapshot() {
        let mut registry = registry_with(&["p1", "p2", "p3"]);
        registry.register_group("a", &["p1", "p2"]).unwrap();
        registry.register_group("b", &["a", "p3"]).unwrap();

        let members: Vec<_> = registry.group_members("b").unwrap().iter().copied().collect();
        assert_eq!(members, vec![0, 1, 2]);

        registry.register_person("p4", NONE).unwrap();
        assert_eq!(registry.group_members("b").unwrap().len(), 3);
    }

    #[test]
    fn test_group_errors() {
        let mut registry = registry_with(&["alice"]);
        registry.register_group("team", &["alice"]).unwrap();

        assert!(matches!(
            registry.register_group("team", &["alice"]),
            Err(Error::DuplicateName { ref name, namespace: Namespace::Group }) if name == "team"
        ));
        assert!(matches!(
            registry.register_group("other", &["ghost"]),
            Err(Error::UnknownEntity(ref n)) if n == "ghost"
        ));
        assert!(!registry.is_group("other"));
    }

    #[test]
    fn test_person_and_group_namespaces_are_separate() {
        let mut registry = registry_with(&["alice", "bob"]);
        registry.register_group("alice", &["bob"]).unwrap();

        // Groups win inside group definitions, persons win in transactions
        registry.register_group("g", &["alice"]).unwrap();
        assert!(registry.group_members("g").unwrap().contains(&1));
        assert_eq!(
            registry.resolve_names(&["alice"]).unwrap().into_iter().collect::<Vec<_>>(),
            vec![0]
        );
    }

    #[test]
    fn test_resolve_names_collapses_duplicates() {
        let mut registry = registry_with(&["alice", "bob", "carol"]);
        registry.register_group("ab", &["alice", "bob"]).unwrap();
        registry.register_group("bc", &["bob", "carol"]).unwrap();

        let ids = registry.resolve_names(&["ab", "bc", "alice", "alice"]).unwrap();
        assert_eq!(ids.into_iter().collect::<Vec<_>>(), vec![0, 1, 2]);

        assert!(matches!(
            registry.resolve_names(&["alice", "nobody"]),
            Err(Error::UnknownEntity(_))
        ));
    }
}
