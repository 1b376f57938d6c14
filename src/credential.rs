//! Connection parameters for a single redis server.
//!
//! A [`Credential`] is validated once, when it is built, and never changes
//! afterwards. Deriving a variation (another port, another db) goes through
//! [`Credential::to_builder`] and produces a new value.

use std::fmt;
use std::time::Duration;

use redis::{ConnectionAddr, ConnectionInfo, IntoConnectionInfo, RedisConnectionInfo};

use crate::client::{self, Connection};
use crate::consts::{DEFAULT_DB, DEFAULT_PORT};
use crate::error::{RedisPassError, Result};

/// Everything needed to open one connection to a redis server.
///
/// The host is the key a [`Registry`](crate::Registry) stores the credential
/// under.
#[derive(Clone, PartialEq)]
pub struct Credential {
    host: String,
    port: u16,
    username: Option<String>,
    password: Option<String>,
    db: i64,
    connect_timeout: Option<Duration>,
    response_timeout: Option<Duration>,
}

impl Credential {
    /// Credential for `host` with every other parameter left at its default.
    ///
    /// # Examples
    ///
    /// ```
    /// use redis_pass::Credential;
    ///
    /// let credential = Credential::new("localhost").unwrap();
    /// assert_eq!(credential.port(), 6379);
    /// assert!(Credential::new("").is_err());
    /// ```
    pub fn new(host: impl Into<String>) -> Result<Credential> {
        Credential::builder(host).build()
    }

    /// Start building a credential for `host`.
    pub fn builder(host: impl Into<String>) -> CredentialBuilder {
        CredentialBuilder {
            host: host.into(),
            port: DEFAULT_PORT,
            username: None,
            password: None,
            db: DEFAULT_DB,
            connect_timeout: None,
            response_timeout: None,
        }
    }

    /// Parse a `redis://` url.
    ///
    /// Parsing is done by the redis client, so the accepted syntax is exactly
    /// the one `redis::Client::open` accepts. Only tcp addresses can be turned
    /// into a credential: unix sockets and tls addresses are rejected.
    ///
    /// # Examples
    ///
    /// ```
    /// use redis_pass::Credential;
    ///
    /// let credential = Credential::from_url("redis://u:p@db1:6380/2").unwrap();
    /// assert_eq!(credential.host(), "db1");
    /// assert_eq!(credential.port(), 6380);
    /// assert_eq!(credential.username(), Some("u"));
    /// assert_eq!(credential.db(), 2);
    /// ```
    pub fn from_url(url: &str) -> Result<Credential> {
        let info = url.into_connection_info()?;

        let (host, port) = match info.addr {
            ConnectionAddr::Tcp(host, port) => (host, port),
            other => {
                return Err(RedisPassError::InvalidCredential(format!(
                    "only plain tcp addresses can be registered, got {:?}",
                    other
                )))
            }
        };

        let mut builder = Credential::builder(host).port(port).db(info.redis.db);
        if let Some(username) = info.redis.username {
            builder = builder.username(username);
        }
        if let Some(password) = info.redis.password {
            builder = builder.password(password);
        }
        builder.build()
    }

    pub fn host(&self) -> &str {
        &self.host
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    pub fn username(&self) -> Option<&str> {
        self.username.as_deref()
    }

    pub fn password(&self) -> Option<&str> {
        self.password.as_deref()
    }

    pub fn db(&self) -> i64 {
        self.db
    }

    pub fn connect_timeout(&self) -> Option<Duration> {
        self.connect_timeout
    }

    pub fn response_timeout(&self) -> Option<Duration> {
        self.response_timeout
    }

    /// A builder seeded with this credential's parameters.
    pub fn to_builder(&self) -> CredentialBuilder {
        CredentialBuilder {
            host: self.host.clone(),
            port: self.port,
            username: self.username.clone(),
            password: self.password.clone(),
            db: self.db,
            connect_timeout: self.connect_timeout,
            response_timeout: self.response_timeout,
        }
    }

    /// The parameters handed to the redis client when a connection is built.
    pub fn connection_info(&self) -> ConnectionInfo {
        ConnectionInfo {
            addr: ConnectionAddr::Tcp(self.host.clone(), self.port),
            redis: RedisConnectionInfo {
                db: self.db,
                username: self.username.clone(),
                password: self.password.clone(),
                ..Default::default()
            },
        }
    }

    /// How far this credential strays from the defaults.
    ///
    /// Returns the fraction of optional parameters that were set to something
    /// other than their default, from `0.0` (only a host) to `1.0`.
    pub fn specificity(&self) -> f64 {
        let changed = [
            self.port != DEFAULT_PORT,
            self.username.is_some(),
            self.password.is_some(),
            self.db != DEFAULT_DB,
            self.connect_timeout.is_some(),
            self.response_timeout.is_some(),
        ];

        let amount_changed = changed.iter().filter(|changed| **changed).count();
        amount_changed as f64 / changed.len() as f64
    }

    /// Build a connection from this credential.
    ///
    /// Shorthand for [`get_connection`](crate::get_connection) with a clone of
    /// `self`.
    pub fn connect(&self) -> Result<Connection> {
        client::get_connection(self.clone())
    }
}

impl AsRef<Credential> for Credential {
    fn as_ref(&self) -> &Credential {
        self
    }
}

// Hand written so the password never ends up in a log line.
impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credential")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("username", &self.username)
            .field("password", &self.password.as_ref().map(|_| "***"))
            .field("db", &self.db)
            .field("connect_timeout", &self.connect_timeout)
            .field("response_timeout", &self.response_timeout)
            .finish()
    }
}

/// Builder for [`Credential`], created by [`Credential::builder`].
///
/// Every setter is optional; [`build`](CredentialBuilder::build) checks the
/// result.
#[derive(Clone)]
pub struct CredentialBuilder {
    host: String,
    port: u16,
    username: Option<String>,
    password: Option<String>,
    db: i64,
    connect_timeout: Option<Duration>,
    response_timeout: Option<Duration>,
}

impl CredentialBuilder {
    pub fn host(mut self, host: impl Into<String>) -> Self {
        self.host = host.into();
        self
    }

    pub fn port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    pub fn username(mut self, username: impl Into<String>) -> Self {
        self.username = Some(username.into());
        self
    }

    pub fn password(mut self, password: impl Into<String>) -> Self {
        self.password = Some(password.into());
        self
    }

    pub fn db(mut self, db: i64) -> Self {
        self.db = db;
        self
    }

    /// Upper bound on establishing the tcp connection.
    pub fn connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = Some(timeout);
        self
    }

    /// Upper bound on waiting for the reply to a single command.
    pub fn response_timeout(mut self, timeout: Duration) -> Self {
        self.response_timeout = Some(timeout);
        self
    }

    /// Validate the parameters and produce the credential.
    ///
    /// Fails with `InvalidCredential` when the host is blank or padded with
    /// whitespace, or the port is zero. The host is stored as given, so it is
    /// also the exact string to look the credential up by.
    pub fn build(self) -> Result<Credential> {
        let host = self.host;
        if host.trim().is_empty() {
            return Err(RedisPassError::InvalidCredential(
                "host must not be empty".to_string(),
            ));
        }

        if host.trim() != host {
            return Err(RedisPassError::InvalidCredential(format!(
                "host '{}' must not start or end with whitespace",
                host
            )));
        }

        if self.port == 0 {
            return Err(RedisPassError::InvalidCredential(format!(
                "port of '{}' must not be zero",
                host
            )));
        }

        Ok(Credential {
            host,
            port: self.port,
            username: self.username,
            password: self.password,
            db: self.db,
            connect_timeout: self.connect_timeout,
            response_timeout: self.response_timeout,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_uses_defaults() {
        let credential = Credential::new("localhost").unwrap();

        assert_eq!(credential.host(), "localhost");
        assert_eq!(credential.port(), DEFAULT_PORT);
        assert_eq!(credential.username(), None);
        assert_eq!(credential.password(), None);
        assert_eq!(credential.db(), DEFAULT_DB);
        assert_eq!(credential.specificity(), 0.0);
    }

    #[test]
    fn blank_host_is_rejected() {
        for host in ["", "   "] {
            let err = Credential::new(host).unwrap_err();
            assert!(matches!(err, RedisPassError::InvalidCredential(_)));
        }
    }

    #[test]
    fn zero_port_is_rejected() {
        let err = Credential::builder("db1").port(0).build().unwrap_err();
        assert!(matches!(err, RedisPassError::InvalidCredential(_)));
    }

    #[test]
    fn padded_host_is_rejected() {
        for host in [" db1", "db1 ", "  db1 ", "db1\n"] {
            let err = Credential::new(host).unwrap_err();
            assert!(matches!(err, RedisPassError::InvalidCredential(_)));
        }
    }

    #[test]
    fn connection_info_carries_every_parameter() {
        let credential = Credential::builder("db1")
            .port(6380)
            .username("u")
            .password("p")
            .db(3)
            .build()
            .unwrap();

        let info = credential.connection_info();
        match info.addr {
            ConnectionAddr::Tcp(ref host, port) => {
                assert_eq!(host, "db1");
                assert_eq!(port, 6380);
            }
            ref other => panic!("unexpected address {:?}", other),
        }
        assert_eq!(info.redis.username.as_deref(), Some("u"));
        assert_eq!(info.redis.password.as_deref(), Some("p"));
        assert_eq!(info.redis.db, 3);
    }

    #[test]
    fn debug_hides_password() {
        let credential = Credential::builder("db1")
            .password("hunter2")
            .build()
            .unwrap();

        let printed = format!("{:?}", credential);
        assert!(!printed.contains("hunter2"));
        assert!(printed.contains("***"));
    }

    #[test]
    fn specificity_counts_changed_parameters() {
        let credential = Credential::builder("db1")
            .port(6380)
            .username("u")
            .password("p")
            .build()
            .unwrap();

        assert_eq!(credential.specificity(), 0.5);
    }

    #[test]
    fn to_builder_leaves_original_untouched() {
        let original = Credential::builder("db1").port(6380).build().unwrap();
        let changed = original.to_builder().db(4).build().unwrap();

        assert_eq!(original.db(), 0);
        assert_eq!(changed.db(), 4);
        assert_eq!(changed.port(), 6380);
    }

    #[cfg(unix)]
    #[test]
    fn from_url_rejects_unix_sockets() {
        let err = Credential::from_url("redis+unix:///tmp/redis.sock").unwrap_err();
        assert!(matches!(err, RedisPassError::InvalidCredential(_)));
    }
}
