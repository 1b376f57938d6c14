use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use log::debug;

use crate::client::{self, Connection};
use crate::credential::{Credential, CredentialBuilder};
use crate::error::{RedisPassError, Result};

/// Remembered credentials, keyed by host.
///
/// A `Registry` is a handle to shared state. Cloning it is shallow and only
/// incurs an atomic ref count increment, so one registry can be handed to
/// every part of an application that needs to reach redis by host name.
/// Independent registries share nothing.
///
/// Each host maps to the credential registered for it most recently.
#[derive(Debug, Clone, Default)]
pub struct Registry {
    shared: Arc<RwLock<HashMap<String, Credential>>>,
}

impl Registry {
    /// Create a new, empty registry.
    pub fn new() -> Registry {
        Registry::default()
    }

    /// Remember a credential under its host.
    ///
    /// Accepts a [`Credential`] or a [`Connection`]; registering a connection
    /// stores the credential it was built from. A credential already stored
    /// for the same host is replaced and returned.
    pub fn register(&self, source: impl AsRef<Credential>) -> Option<Credential> {
        let credential = source.as_ref().clone();
        let host = credential.host().to_string();

        let previous = self.write().insert(host.clone(), credential);

        if previous.is_some() {
            debug!("replaced registered credential for '{}'", host);
        } else {
            debug!("registered credential for '{}'", host);
        }

        previous
    }

    /// Build a new connection from the credential registered for `host`.
    ///
    /// The host must match exactly. Fails with `UnregisteredHost` when nothing
    /// was registered for it.
    pub fn get_connection_by_host(&self, host: &str) -> Result<Connection> {
        let credential = self.lookup(host)?;
        client::get_connection(credential)
    }

    /// Like [`get_connection_by_host`](Registry::get_connection_by_host), with
    /// some parameters replaced for this one connection.
    ///
    /// `overrides` receives a builder seeded with the registered credential.
    /// The registered credential itself is left as it is.
    ///
    /// # Examples
    ///
    /// ```
    /// use redis_pass::{Credential, Registry};
    ///
    /// let registry = Registry::new();
    /// registry.register(Credential::builder("db1").db(1).build().unwrap());
    ///
    /// let connection = registry
    ///     .get_connection_by_host_with("db1", |builder| builder.db(5))
    ///     .unwrap();
    /// assert_eq!(connection.credential().db(), 5);
    /// assert_eq!(registry.get("db1").unwrap().db(), 1);
    /// ```
    pub fn get_connection_by_host_with<F>(&self, host: &str, overrides: F) -> Result<Connection>
    where
        F: FnOnce(CredentialBuilder) -> CredentialBuilder,
    {
        let credential = overrides(self.lookup(host)?.to_builder()).build()?;
        client::get_connection(credential)
    }

    /// The credential registered for `host`, if any.
    pub fn get(&self, host: &str) -> Option<Credential> {
        self.read().get(host).cloned()
    }

    pub fn contains(&self, host: &str) -> bool {
        self.read().contains_key(host)
    }

    /// Every registered host, sorted.
    pub fn hosts(&self) -> Vec<String> {
        let mut hosts: Vec<String> = self.read().keys().cloned().collect();
        hosts.sort();
        hosts
    }

    pub fn len(&self) -> usize {
        self.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.read().is_empty()
    }

    fn lookup(&self, host: &str) -> Result<Credential> {
        // The credential is cloned out so the lock is released before the
        // client is built.
        match self.get(host) {
            Some(credential) => {
                debug!("found registered credential for '{}'", host);
                Ok(credential)
            }
            None => Err(RedisPassError::UnregisteredHost(host.to_string())),
        }
    }

    // A panic while holding the lock cannot leave the map half updated, every
    // mutation is a single `insert`.
    fn read(&self) -> RwLockReadGuard<'_, HashMap<String, Credential>> {
        self.shared.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, HashMap<String, Credential>> {
        self.shared.write().unwrap_or_else(PoisonError::into_inner)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn credential(host: &str, port: u16) -> Credential {
        Credential::builder(host).port(port).build().unwrap()
    }

    #[test]
    fn new_registry_is_empty() {
        let registry = Registry::new();

        assert!(registry.is_empty());
        assert_eq!(registry.len(), 0);
        assert!(registry.hosts().is_empty());
    }

    #[test]
    fn register_returns_replaced_credential() {
        let registry = Registry::new();

        assert_eq!(registry.register(credential("db1", 6379)), None);

        let previous = registry.register(credential("db1", 6380));
        assert_eq!(previous.map(|c| c.port()), Some(6379));
        assert_eq!(registry.len(), 1);
        assert_eq!(registry.get("db1").map(|c| c.port()), Some(6380));
    }

    #[test]
    fn register_is_idempotent() {
        let registry = Registry::new();
        let cred = credential("db1", 6380);

        registry.register(&cred);
        let previous = registry.register(&cred);

        assert_eq!(previous, Some(cred.clone()));
        assert_eq!(registry.get("db1"), Some(cred));
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn hosts_are_sorted() {
        let registry = Registry::new();
        registry.register(credential("db2", 6379));
        registry.register(credential("cache", 6379));
        registry.register(credential("db1", 6379));

        assert_eq!(registry.hosts(), vec!["cache", "db1", "db2"]);
        assert!(registry.contains("db1"));
        assert!(!registry.contains("db3"));
    }

    #[test]
    fn lookup_is_exact() {
        let registry = Registry::new();
        registry.register(credential("db1", 6379));

        for host in ["DB1", "db1 ", "db", "db1.internal"] {
            let err = registry.get_connection_by_host(host).unwrap_err();
            assert!(matches!(err, RedisPassError::UnregisteredHost(ref h) if h == host));
        }
    }

    #[test]
    fn overrides_are_validated() {
        let registry = Registry::new();
        registry.register(credential("db1", 6379));

        let err = registry
            .get_connection_by_host_with("db1", |builder| builder.port(0))
            .unwrap_err();
        assert!(matches!(err, RedisPassError::InvalidCredential(_)));
    }

    #[test]
    fn clones_share_state() {
        let registry = Registry::new();
        let handle = registry.clone();

        handle.register(credential("db1", 6380));

        assert_eq!(registry.get("db1").map(|c| c.port()), Some(6380));
    }

    #[test]
    fn concurrent_registration_keeps_one_entry_per_host() {
        let registry = Registry::new();

        let handles: Vec<_> = (0..8u16)
            .map(|i| {
                let registry = registry.clone();
                std::thread::spawn(move || {
                    registry.register(credential("shared", 7000 + i));
                    registry.register(credential(&format!("db{}", i), 6379));
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        assert_eq!(registry.len(), 9);
        let port = registry.get("shared").unwrap().port();
        assert!((7000..7008).contains(&port));
    }
}
