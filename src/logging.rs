use flexi_logger::{FlexiLoggerError, Logger, LoggerHandle};

/// Map the `-v` count to a log level.
pub fn level_for(verbosity: u8) -> &'static str {
    match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

/// Start logging to stderr. `RUST_LOG` takes precedence over `verbosity`.
///
/// Keep the returned handle alive for as long as logs should be written.
pub fn init(verbosity: u8) -> Result<LoggerHandle, FlexiLoggerError> {
    Logger::try_with_env_or_str(level_for(verbosity))?
        .log_to_stderr()
        .format(flexi_logger::default_format)
        .start()
}

#[cfg(test)]
mod tests {
    use super::level_for;
    use flexi_logger::Logger;

    #[test]
    fn verbosity_maps_to_levels() {
        assert_eq!(level_for(0), "warn");
        assert_eq!(level_for(1), "info");
        assert_eq!(level_for(2), "debug");
        assert_eq!(level_for(9), "trace");
    }

    #[test]
    fn every_level_is_a_valid_log_spec() {
        for verbosity in 0..4 {
            assert!(Logger::try_with_str(level_for(verbosity)).is_ok());
        }
    }
}
