//! Update-notification fan-out keyed by connection and project.
//!
//! The registry is an ordinary value owned by whoever manages the
//! connections (see [`crate::RuntimeManager`]), not process-wide state.
//! Listeners run after the registry lock is released, so a listener may
//! add or remove listeners without deadlocking.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tracing::{debug, trace};

use crate::status::InstallInfo;

/// Identifies what a listener is interested in.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ListenerKey {
    pub conid: String,
    pub project_id: Option<String>,
}

impl ListenerKey {
    /// Connection-wide updates.
    pub fn connection(conid: impl Into<String>) -> Self {
        Self {
            conid: conid.into(),
            project_id: None,
        }
    }

    pub fn project(conid: impl Into<String>, project_id: impl Into<String>) -> Self {
        Self {
            conid: conid.into(),
            project_id: Some(project_id.into()),
        }
    }
}

#[derive(Debug, Clone)]
pub enum UpdateEvent {
    RuntimeStatusChanged(Arc<InstallInfo>),
    ConnectionChanged { conid: String },
    ProjectChanged { conid: String, project_id: String },
}

pub type Listener = Arc<dyn Fn(&UpdateEvent) + Send + Sync>;

/// Returned by [`ListenerRegistry::add`]; pass to `remove` to unregister.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ListenerHandle {
    key: ListenerKey,
    id: u64,
}

impl ListenerHandle {
    pub fn key(&self) -> &ListenerKey {
        &self.key
    }
}

#[derive(Default)]
struct Inner {
    next_id: u64,
    listeners: HashMap<ListenerKey, Vec<(u64, Listener)>>,
}

#[derive(Default)]
pub struct ListenerRegistry {
    inner: Mutex<Inner>,
}

impl ListenerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn add<F>(&self, key: ListenerKey, listener: F) -> ListenerHandle
    where
        F: Fn(&UpdateEvent) + Send + Sync + 'static,
    {
        let mut inner = self.lock();
        let id = inner.next_id;
        inner.next_id += 1;
        inner
            .listeners
            .entry(key.clone())
            .or_default()
            .push((id, Arc::new(listener)));
        debug!(?key, id, "listener added");
        ListenerHandle { key, id }
    }

    /// Returns false if the listener was already removed.
    pub fn remove(&self, handle: &ListenerHandle) -> bool {
        let mut inner = self.lock();
        let Some(entries) = inner.listeners.get_mut(&handle.key) else {
            return false;
        };
        let before = entries.len();
        entries.retain(|(id, _)| *id != handle.id);
        let removed = entries.len() != before;
        if entries.is_empty() {
            inner.listeners.remove(&handle.key);
        }
        removed
    }

    /// Call every listener registered under exactly `key`. Returns how many ran.
    pub fn notify(&self, key: &ListenerKey, event: &UpdateEvent) -> usize {
        let targets: Vec<Listener> = self
            .lock()
            .listeners
            .get(key)
            .map(|entries| entries.iter().map(|(_, l)| Arc::clone(l)).collect())
            .unwrap_or_default();
        dispatch(&targets, event)
    }

    /// Call every listener for `conid`, whatever its project.
    pub fn notify_connection(&self, conid: &str, event: &UpdateEvent) -> usize {
        let targets: Vec<Listener> = self
            .lock()
            .listeners
            .iter()
            .filter(|(key, _)| key.conid == conid)
            .flat_map(|(_, entries)| entries.iter().map(|(_, l)| Arc::clone(l)))
            .collect();
        dispatch(&targets, event)
    }

    pub fn len(&self) -> usize {
        self.lock().listeners.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

fn dispatch(targets: &[Listener], event: &UpdateEvent) -> usize {
    trace!(listeners = targets.len(), ?event, "dispatching update");
    for listener in targets {
        listener(event);
    }
    targets.len()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn counter(registry: &ListenerRegistry, key: ListenerKey) -> (Arc<AtomicUsize>, ListenerHandle) {
        let count = Arc::new(AtomicUsize::new(0));
        let seen = Arc::clone(&count);
        let handle = registry.add(key, move |_| {
            seen.fetch_add(1, Ordering::SeqCst);
        });
        (count, handle)
    }

    fn changed(conid: &str) -> UpdateEvent {
        UpdateEvent::ConnectionChanged {
            conid: conid.to_string(),
        }
    }

    #[test]
    fn test_notify_matches_exact_key() {
        let registry = ListenerRegistry::new();
        let (local, _) = counter(&registry, ListenerKey::connection("local"));
        let (remote, _) = counter(&registry, ListenerKey::connection("K1"));
        let (project, _) = counter(&registry, ListenerKey::project("local", "p1"));

        assert_eq!(registry.notify(&ListenerKey::connection("local"), &changed("local")), 1);
        assert_eq!(local.load(Ordering::SeqCst), 1);
        assert_eq!(remote.load(Ordering::SeqCst), 0);
        assert_eq!(project.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_notify_connection_reaches_projects() {
        let registry = ListenerRegistry::new();
        let (local, _) = counter(&registry, ListenerKey::connection("local"));
        let (project, _) = counter(&registry, ListenerKey::project("local", "p1"));
        let (other, _) = counter(&registry, ListenerKey::project("K1", "p1"));

        assert_eq!(registry.notify_connection("local", &changed("local")), 2);
        assert_eq!(local.load(Ordering::SeqCst), 1);
        assert_eq!(project.load(Ordering::SeqCst), 1);
        assert_eq!(other.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_removed_listener_not_called() {
        let registry = ListenerRegistry::new();
        let key = ListenerKey::connection("local");
        let (count, handle) = counter(&registry, key.clone());

        assert!(registry.remove(&handle));
        assert!(!registry.remove(&handle));
        assert_eq!(registry.notify(&key, &changed("local")), 0);
        assert_eq!(count.load(Ordering::SeqCst), 0);
        assert!(registry.is_empty());
    }

    #[test]
    fn test_listener_may_reenter_registry() {
        let registry = Arc::new(ListenerRegistry::new());
        let key = ListenerKey::connection("local");
        let inner = Arc::clone(&registry);
        registry.add(key.clone(), move |_| {
            inner.add(ListenerKey::connection("K2"), |_| {});
        });

        registry.notify(&key, &changed("local"));
        assert_eq!(registry.len(), 2);
    }
}
