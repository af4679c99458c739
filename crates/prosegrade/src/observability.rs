//! Logging setup for the CLI.
//!
//! Diagnostics go to stderr so that stdout stays clean for scriptable
//! output. `RUST_LOG` overrides everything; otherwise the level comes
//! from the CLI flags, then configuration.

use tracing_subscriber::EnvFilter;

/// Build the env filter from CLI flags and the configured log level.
///
/// Precedence: `RUST_LOG`, then `--quiet`/`--verbose`, then config.
pub fn env_filter(quiet: bool, verbose: u8, config_level: &str) -> EnvFilter {
    let level = if quiet {
        "error"
    } else {
        match verbose {
            0 => config_level,
            1 => "debug",
            _ => "trace",
        }
    };
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level))
}

/// Install the stderr subscriber.
pub fn init(filter: EnvFilter) -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init()
        .map_err(|e| anyhow::anyhow!("failed to initialize logging: {e}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quiet_beats_verbose() {
        let filter = env_filter(true, 3, "info");
        assert_eq!(filter.to_string(), "error");
    }

    #[test]
    fn verbose_escalates() {
        assert_eq!(env_filter(false, 1, "info").to_string(), "debug");
        assert_eq!(env_filter(false, 2, "info").to_string(), "trace");
    }

    #[test]
    fn config_level_is_the_default() {
        assert_eq!(env_filter(false, 0, "warn").to_string(), "warn");
    }
}
