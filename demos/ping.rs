//! Ping client.
//!
//! Registers a credential parsed from a url and pings the server it names.
//!
//! You can test this out by starting a redis server on the default port and
//! running:
//!
//!     cargo run --example ping

use redis_pass::error::RedisPassError;
use redis_pass::{Credential, Registry};

#[tokio::main]
pub async fn main() -> Result<(), RedisPassError> {
    let registry = Registry::new();
    registry.register(Credential::from_url("redis://127.0.0.1:6379/0")?);

    let connection = registry.get_connection_by_host("127.0.0.1")?;

    let result = connection.ping().await?;
    println!("ping response: {:?}", result);

    Ok(())
}
