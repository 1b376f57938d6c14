//! Remember redis connection parameters and reconnect by host name.
//!
//! A [`Credential`] describes how to reach one redis server. A [`Registry`]
//! remembers credentials by host, so that later on a connection can be built
//! from the host name alone:
//!
//! ```
//! use redis_pass::{get_connection, Credential, Registry};
//!
//! # fn main() -> redis_pass::error::Result<()> {
//! let registry = Registry::new();
//!
//! let credential = Credential::builder("db1")
//!     .port(6380)
//!     .username("u")
//!     .password("p")
//!     .build()?;
//! let connection = get_connection(credential)?;
//! registry.register(&connection);
//!
//! let again = registry.get_connection_by_host("db1")?;
//! assert_eq!(again.credential().port(), 6380);
//! # Ok(())
//! # }
//! ```
//!
//! Talking to the server is left entirely to the [`redis`] crate: a
//! [`Connection`] dereferences to `redis::Client`.

pub mod client;
pub mod consts;
pub mod credential;
pub mod error;
pub mod logger;
pub mod registry;

pub use client::{get_connection, Connection};
pub use credential::{Credential, CredentialBuilder};
pub use error::{RedisPassError, Result};
pub use registry::Registry;
