use env_logger::Env;

/// Initialize logging using env_logger.
///
/// Reads `RUST_LOG` for filtering (a `.env` file loaded by `dotenv` works
/// too) and falls back to `info` when it is unset.
pub fn init() {
    env_logger::Builder::from_env(Env::default().default_filter_or("info"))
        .try_init()
        .ok();
}
