use thiserror::Error;

pub type Result<T> = std::result::Result<T, RedisPassError>;

#[derive(Error, Debug)]
pub enum RedisPassError {
    /// No credential was registered for the requested host.
    #[error("there are no registered connections to '{0}'")]
    UnregisteredHost(String),

    #[error("invalid credential: {0}")]
    InvalidCredential(String),

    /// Raised by the redis client itself; never reinterpreted.
    #[error(transparent)]
    Redis(#[from] redis::RedisError),
}
