use std::num::ParseIntError;
use std::time::Duration;

use clap::Subcommand;

/// Commands the command line client can issue once it has looked up its
/// connection.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Ping the server
    Ping,
    /// Get the value of key.
    Get {
        /// Name of key to get
        key: String,
    },
    /// Set key to hold the string value.
    Set {
        /// Name of key to set
        key: String,

        /// Value to set.
        value: String,

        /// Expire the value after specified amount of time
        #[clap(value_parser = duration_from_ms_str)]
        expires: Option<Duration>,
    },
}

/// Parse a number of milliseconds.
pub fn duration_from_ms_str(src: &str) -> Result<Duration, ParseIntError> {
    let ms = src.parse::<u64>()?;
    Ok(Duration::from_millis(ms))
}
