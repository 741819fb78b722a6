//! Read-only list adapter over the registry.

use mcpman_registry::{RegistryError, ServerRegistry, SettingsStore};

/// One displayable row: the server's name plus its URL as the description.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerRow {
    pub label: String,
    pub description: String,
}

/// Read-only, change-notifying view of the registry for a display surface.
///
/// Rows are re-fetched from the registry on every read (the registry itself
/// reads fresh from the store), so a refresh is just a notification that the
/// surface should pull rows again.
pub struct ServerListPresenter<'a, S> {
    registry: &'a ServerRegistry<S>,
    listeners: Vec<Box<dyn Fn() + 'a>>,
}

impl<'a, S: SettingsStore> ServerListPresenter<'a, S> {
    pub fn new(registry: &'a ServerRegistry<S>) -> Self {
        Self {
            registry,
            listeners: Vec::new(),
        }
    }

    /// Current rows in persisted order.
    pub fn rows(&self) -> Result<Vec<ServerRow>, RegistryError> {
        Ok(self
            .registry
            .list()?
            .into_iter()
            .map(|server| ServerRow {
                label: server.name,
                description: server.url,
            })
            .collect())
    }

    /// Register a change listener, fired on [`refresh`](Self::refresh).
    pub fn on_change(&mut self, listener: impl Fn() + 'a) {
        self.listeners.push(Box::new(listener));
    }

    /// Notify listeners that the underlying list changed.
    pub fn refresh(&self) {
        for listener in &self.listeners {
            listener();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mcpman_registry::{JsonFileStore, ServerRegistry};
    use mcpman_types::ServerRecord;
    use std::cell::Cell;

    #[test]
    fn rows_mirror_registry_order() {
        let dir = tempfile::tempdir().expect("tempdir");
        let registry = ServerRegistry::new(JsonFileStore::new(dir.path().join("s.json")));
        registry
            .add(ServerRecord::new("b", "http://b"))
            .expect("add");
        registry
            .add(ServerRecord::new("a", "http://a"))
            .expect("add");

        let presenter = ServerListPresenter::new(&registry);
        let rows = presenter.rows().expect("rows");
        assert_eq!(rows[0].label, "b");
        assert_eq!(rows[1].description, "http://a");
    }

    #[test]
    fn refresh_notifies_listeners() {
        let dir = tempfile::tempdir().expect("tempdir");
        let registry: ServerRegistry<JsonFileStore> =
            ServerRegistry::new(JsonFileStore::new(dir.path().join("s.json")));

        let fired = Cell::new(0);
        let mut presenter = ServerListPresenter::new(&registry);
        presenter.on_change(|| fired.set(fired.get() + 1));

        presenter.refresh();
        presenter.refresh();
        assert_eq!(fired.get(), 2);
    }
}
