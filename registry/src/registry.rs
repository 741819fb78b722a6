//! CRUD over the settings store with the registry invariants.

use mcpman_types::{ServerRecord, ValidationIssue};

use crate::store::{SettingsStore, StoreError};

/// Failure of a registry operation.
#[derive(Debug, thiserror::Error)]
pub enum RegistryError {
    #[error("server with name \"{0}\" already exists")]
    DuplicateName(String),
    #[error("server \"{0}\" not found")]
    NotFound(String),
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Persisted, ordered collection of [`ServerRecord`]s.
///
/// Invariant: no two records share a `name` (case-sensitive exact match).
/// Records are addressed by their current `(name, url)` pair; there is no
/// synthetic ID. Mutations are write-through: read the full list, apply the
/// change, persist the full list. A failed operation leaves the store
/// untouched.
pub struct ServerRegistry<S> {
    store: S,
}

impl<S: SettingsStore> ServerRegistry<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Current records in persisted order; empty when none configured.
    pub fn list(&self) -> Result<Vec<ServerRecord>, RegistryError> {
        Ok(self.store.read()?)
    }

    /// First record whose name matches `name` exactly.
    pub fn find_by_name(&self, name: &str) -> Result<Option<ServerRecord>, RegistryError> {
        Ok(self.store.read()?.into_iter().find(|s| s.name == name))
    }

    /// Field-level validation for a record about to be added or updated.
    ///
    /// Callers must not proceed to [`add`](Self::add) or
    /// [`update`](Self::update) when this returns a non-empty list.
    #[must_use]
    pub fn validate(&self, record: &ServerRecord) -> Vec<ValidationIssue> {
        record.validate()
    }

    /// Append `record` and persist. Fails with [`RegistryError::DuplicateName`]
    /// when a record with the same name already exists, leaving the list
    /// unchanged.
    pub fn add(&self, record: ServerRecord) -> Result<(), RegistryError> {
        let mut servers = self.store.read()?;

        if servers.iter().any(|s| s.name == record.name) {
            return Err(RegistryError::DuplicateName(record.name));
        }

        tracing::info!(name = %record.name, url = %record.url, "Adding server");
        servers.push(record);
        self.store.write(&servers)?;
        Ok(())
    }

    /// Replace the record matching `old`'s `(name, url)` with `new`,
    /// preserving its position.
    ///
    /// Fails with [`RegistryError::NotFound`] when no record matches `old`
    /// exactly - including the case where the record was edited externally
    /// between fetch and submit; the update is not merged (known limitation).
    /// Fails with [`RegistryError::DuplicateName`] when the rename collides
    /// with a different existing record.
    pub fn update(&self, old: &ServerRecord, new: ServerRecord) -> Result<(), RegistryError> {
        let mut servers = self.store.read()?;

        let index = servers
            .iter()
            .position(|s| s.same_identity(old))
            .ok_or_else(|| RegistryError::NotFound(old.name.clone()))?;

        if old.name != new.name && servers.iter().any(|s| s.name == new.name) {
            return Err(RegistryError::DuplicateName(new.name));
        }

        tracing::info!(old = %old.name, new = %new.name, "Updating server");
        servers[index] = new;
        self.store.write(&servers)?;
        Ok(())
    }

    /// Remove the record matching `record`'s `(name, url)` exactly.
    pub fn delete(&self, record: &ServerRecord) -> Result<(), RegistryError> {
        let mut servers = self.store.read()?;

        let before = servers.len();
        servers.retain(|s| !s.same_identity(record));
        if servers.len() == before {
            return Err(RegistryError::NotFound(record.name.clone()));
        }

        tracing::info!(name = %record.name, "Deleting server");
        self.store.write(&servers)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::JsonFileStore;
    use tempfile::TempDir;

    fn registry() -> (TempDir, ServerRegistry<JsonFileStore>) {
        let dir = tempfile::tempdir().expect("tempdir");
        let store = JsonFileStore::new(dir.path().join("servers.json"));
        (dir, ServerRegistry::new(store))
    }

    fn record(name: &str, url: &str) -> ServerRecord {
        ServerRecord::new(name, url)
    }

    #[test]
    fn empty_registry_lists_nothing() {
        let (_dir, reg) = registry();
        assert!(reg.list().expect("list").is_empty());
        assert!(reg.find_by_name("a").expect("find").is_none());
    }

    #[test]
    fn add_appends_at_the_end() {
        let (_dir, reg) = registry();
        reg.add(record("a", "http://a")).expect("add a");
        reg.add(record("b", "http://b")).expect("add b");

        let names: Vec<String> = reg
            .list()
            .expect("list")
            .into_iter()
            .map(|s| s.name)
            .collect();
        assert_eq!(names, vec!["a", "b"]);
    }

    #[test]
    fn add_rejects_duplicate_name_and_leaves_list_unchanged() {
        let (_dir, reg) = registry();
        reg.add(record("a", "http://a")).expect("add");

        let err = reg.add(record("a", "http://other")).unwrap_err();
        assert!(matches!(err, RegistryError::DuplicateName(name) if name == "a"));

        let list = reg.list().expect("list");
        assert_eq!(list.len(), 1);
        assert_eq!(list[0].url, "http://a");
    }

    #[test]
    fn duplicate_check_is_case_sensitive() {
        let (_dir, reg) = registry();
        reg.add(record("api", "http://a")).expect("add");
        reg.add(record("API", "http://b")).expect("different case is a different name");
    }

    #[test]
    fn update_replaces_in_place_preserving_order() {
        let (_dir, reg) = registry();
        reg.add(record("a", "http://a")).expect("add a");
        reg.add(record("b", "http://b")).expect("add b");
        reg.add(record("c", "http://c")).expect("add c");

        let old = record("b", "http://b");
        reg.update(&old, record("b2", "http://b2").with_api_key("k"))
            .expect("update");

        let names: Vec<String> = reg
            .list()
            .expect("list")
            .into_iter()
            .map(|s| s.name)
            .collect();
        assert_eq!(names, vec!["a", "b2", "c"]);

        let found = reg.find_by_name("b2").expect("find").expect("present");
        assert_eq!(found.api_key.as_deref(), Some("k"));
    }

    #[test]
    fn update_requires_exact_name_and_url_match() {
        let (_dir, reg) = registry();
        reg.add(record("a", "http://a")).expect("add");

        let stale = record("a", "http://moved");
        let err = reg.update(&stale, record("a", "http://a2")).unwrap_err();
        assert!(matches!(err, RegistryError::NotFound(_)));
    }

    #[test]
    fn update_rejects_rename_onto_existing_name() {
        let (_dir, reg) = registry();
        reg.add(record("a", "http://a")).expect("add a");
        reg.add(record("b", "http://b")).expect("add b");

        let old = record("b", "http://b");
        let err = reg.update(&old, record("a", "http://b")).unwrap_err();
        assert!(matches!(err, RegistryError::DuplicateName(name) if name == "a"));

        // Nothing changed.
        assert!(reg.find_by_name("b").expect("find").is_some());
    }

    #[test]
    fn update_keeping_the_same_name_is_not_a_collision() {
        let (_dir, reg) = registry();
        reg.add(record("a", "http://a")).expect("add");

        let old = record("a", "http://a");
        reg.update(&old, record("a", "http://a-new")).expect("same-name update");
        let found = reg.find_by_name("a").expect("find").expect("present");
        assert_eq!(found.url, "http://a-new");
    }

    #[test]
    fn delete_removes_exact_match() {
        let (_dir, reg) = registry();
        reg.add(record("a", "http://a")).expect("add");

        reg.delete(&record("a", "http://a")).expect("delete");
        assert!(reg.find_by_name("a").expect("find").is_none());
    }

    #[test]
    fn delete_of_missing_record_fails_without_altering_list() {
        let (_dir, reg) = registry();
        reg.add(record("a", "http://a")).expect("add");

        let err = reg.delete(&record("a", "http://wrong-url")).unwrap_err();
        assert!(matches!(err, RegistryError::NotFound(_)));
        assert_eq!(reg.list().expect("list").len(), 1);
    }

    #[test]
    fn external_edits_are_observed_immediately() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("servers.json");
        let reg = ServerRegistry::new(JsonFileStore::new(path.clone()));
        reg.add(record("a", "http://a")).expect("add");

        // Simulate another process rewriting the settings file.
        let other = ServerRegistry::new(JsonFileStore::new(path));
        other.add(record("b", "http://b")).expect("external add");

        assert_eq!(reg.list().expect("list").len(), 2);
    }
}
