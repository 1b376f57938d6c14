/// Default port that a redis server listens on.
///
/// Used if no port is specified.
pub const DEFAULT_PORT: u16 = 6379;

/// Host used by the command line client when none is given.
pub const DEFAULT_HOST: &str = "127.0.0.1";

/// Logical database selected after connecting.
pub const DEFAULT_DB: i64 = 0;

