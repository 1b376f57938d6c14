//! Hello world client.
//!
//! Registers the credentials of a local redis server, then reaches it again by
//! host name alone to set key "hello" with value "world" and read it back.
//!
//! You can test this out by starting a redis server on the default port and
//! running:
//!
//!     cargo run --example hello

use redis::AsyncCommands;
use redis_pass::error::RedisPassError;
use redis_pass::{get_connection, Credential, Registry};

#[tokio::main]
pub async fn main() -> Result<(), RedisPassError> {
    let registry = Registry::new();

    // Build a connection from explicit parameters and remember them.
    let connection = get_connection(Credential::new("127.0.0.1")?)?;
    registry.register(&connection);

    // Later on, only the host name is needed.
    let connection = registry.get_connection_by_host("127.0.0.1")?;
    let mut conn = connection.open().await?;

    let _: () = conn.set("hello", "world").await?;
    println!("set value to the server success");

    let result: Option<String> = conn.get("hello").await?;
    println!("got value from the server success, result: {:?}", result);

    Ok(())
}
