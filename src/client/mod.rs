use log::debug;

use crate::credential::Credential;
use crate::error::Result;

pub use crate::client::cli::Connection;

pub mod cli;
pub mod cmd;

/// Build a connection to the redis server described by `credential`.
///
/// The redis client connects lazily, so this performs no network I/O: an
/// unreachable host or a bad password only shows up once a command is sent
/// (see [`Connection::open`] and [`Connection::ping`]). Errors returned by the
/// client are passed through unchanged.
///
/// The returned [`Connection`] keeps `credential`, so it can be handed to
/// [`Registry::register`](crate::Registry::register) directly.
///
/// # Examples
///
/// ```no_run
/// use redis_pass::{get_connection, Credential};
///
/// #[tokio::main]
/// async fn main() {
///     let credential = Credential::builder("localhost").port(6380).build().unwrap();
///     let connection = get_connection(credential).unwrap();
///
///     let pong = connection.ping().await.unwrap();
///     assert_eq!("PONG", pong);
/// }
/// ```
pub fn get_connection(credential: Credential) -> Result<Connection> {
    // `Client::open` only validates the parameters, the socket is opened when
    // the first connection is requested from the client.
    let client = redis::Client::open(credential.connection_info())?;

    debug!(
        "built redis client for {}:{} (db {})",
        credential.host(),
        credential.port(),
        credential.db()
    );

    Ok(Connection { client, credential })
}
