//! The connection handle handed out by the factory functions.

use std::fmt;
use std::ops::Deref;

use log::debug;
use redis::aio::MultiplexedConnection;
use redis::AsyncConnectionConfig;

use crate::credential::Credential;
use crate::error::Result;

/// A redis client together with the credential it was built from.
///
/// `Connection` dereferences to [`redis::Client`], so every operation the
/// client offers is available unchanged. Connections are created using
/// [`get_connection`](crate::get_connection) or
/// [`Registry::get_connection_by_host`](crate::Registry::get_connection_by_host).
///
/// Keeping the credential next to the client means a connection can always be
/// registered without digging the parameters back out of the client.
#[derive(Clone)]
pub struct Connection {
    pub(crate) client: redis::Client,
    pub(crate) credential: Credential,
}

impl Connection {
    /// The credential this connection was built from.
    pub fn credential(&self) -> &Credential {
        &self.credential
    }

    /// Split into the redis client and its credential.
    pub fn into_parts(self) -> (redis::Client, Credential) {
        (self.client, self.credential)
    }

    /// Establish an async connection to the server.
    ///
    /// The credential's `connect_timeout` and `response_timeout` are applied
    /// when set. Authentication and `SELECT` happen here, so this is where a
    /// wrong password or an unreachable host surfaces.
    pub async fn open(&self) -> Result<MultiplexedConnection> {
        let credential = &self.credential;
        debug!("opening connection to {}:{}", credential.host(), credential.port());

        let mut config = AsyncConnectionConfig::new();
        if let Some(timeout) = credential.connect_timeout() {
            config = config.set_connection_timeout(timeout);
        }
        if let Some(timeout) = credential.response_timeout() {
            config = config.set_response_timeout(timeout);
        }

        let connection = self
            .client
            .get_multiplexed_async_connection_with_config(&config)
            .await?;

        Ok(connection)
    }

    /// Ping the server.
    ///
    /// Opens a fresh connection and returns the server's reply, `PONG` for a
    /// healthy server. This command is often used to check that the stored
    /// parameters still work.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use redis_pass::{Credential, Registry};
    ///
    /// #[tokio::main]
    /// async fn main() {
    ///     let registry = Registry::new();
    ///     registry.register(Credential::new("localhost").unwrap());
    ///
    ///     let connection = registry.get_connection_by_host("localhost").unwrap();
    ///     let pong = connection.ping().await.unwrap();
    ///     assert_eq!("PONG", pong);
    /// }
    /// ```
    pub async fn ping(&self) -> Result<String> {
        let mut connection = self.open().await?;

        let pong: String = redis::cmd("PING").query_async(&mut connection).await?;
        debug!("ping response from {}: {}", self.credential.host(), pong);

        Ok(pong)
    }
}

impl Deref for Connection {
    type Target = redis::Client;

    fn deref(&self) -> &redis::Client {
        &self.client
    }
}

// The client's own `Debug` prints the password, only the redacted credential
// is shown.
impl fmt::Debug for Connection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Connection")
            .field("credential", &self.credential)
            .finish()
    }
}

impl AsRef<Credential> for Connection {
    fn as_ref(&self) -> &Credential {
        &self.credential
    }
}

#[cfg(test)]
mod tests {
    use crate::client::get_connection;
    use crate::credential::Credential;

    #[test]
    fn debug_hides_password() {
        let credential = Credential::builder("db1")
            .username("u")
            .password("hunter2")
            .build()
            .unwrap();
        let connection = get_connection(credential).unwrap();

        let printed = format!("{:?}", connection);
        assert!(!printed.contains("hunter2"), "password in {}", printed);
        assert!(printed.contains("db1"));
    }
}
