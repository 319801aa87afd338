//! Logging setup for the library and the binary

/// Initialize logging at `info` unless `RUST_LOG` says otherwise
///
/// # Example
/// ```
/// mineport::core::logging::init();
/// log::info!("Import started");
/// ```
pub fn init() {
    init_with_default("info");
}

/// Initialize logging with `filter` as the fallback when `RUST_LOG` is unset.
///
/// Later calls are ignored.
pub fn init_with_default(filter: &str) {
    let _ = env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(filter)
    )
    .format_timestamp_millis()
    .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_repeated_init() {
        init();
        init_with_default("debug");
        log::debug!("still logging");
    }
}
