use std::fs::OpenOptions;
use std::path::PathBuf;
use std::sync::Mutex;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

// ── Logging bootstrap ──────────────────────────────────────────────────────────

/// Map a CLI log-level name to a [`tracing_subscriber::EnvFilter`] directive.
///
/// Unrecognised names are passed through unchanged.
pub fn filter_directive(log_level: &str) -> String {
    let upper = log_level.to_uppercase();
    let normalised = match upper.as_str() {
        "DEBUG" => "debug",
        "INFO" => "info",
        "WARNING" => "warn",
        "ERROR" | "CRITICAL" => "error",
        _ => return log_level.to_lowercase(),
    };
    normalised.to_string()
}

/// Initialise the global `tracing` subscriber.
///
/// Logs go to stderr so they never mix with the prompts and reports on
/// stdout, or are appended to `log_file` when one is given. Falls back to
/// `"warn"` if the level string is not a valid filter.
pub fn setup_logging(log_level: &str, log_file: Option<&PathBuf>) -> anyhow::Result<()> {
    let filter =
        EnvFilter::try_new(filter_directive(log_level)).unwrap_or_else(|_| EnvFilter::new("warn"));

    let layer = fmt::layer().with_target(false).with_thread_ids(false);

    match log_file {
        Some(path) => {
            let file = OpenOptions::new().create(true).append(true).open(path)?;
            tracing_subscriber::registry()
                .with(filter)
                .with(layer.with_ansi(false).with_writer(Mutex::new(file)))
                .init();
        }
        None => {
            tracing_subscriber::registry()
                .with(filter)
                .with(layer.with_writer(std::io::stderr))
                .init();
        }
    }

    Ok(())
}

// ── Tests ──────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filter_directive_maps_cli_levels() {
        assert_eq!(filter_directive("DEBUG"), "debug");
        assert_eq!(filter_directive("INFO"), "info");
        assert_eq!(filter_directive("WARNING"), "warn");
        assert_eq!(filter_directive("ERROR"), "error");
        assert_eq!(filter_directive("CRITICAL"), "error");
    }

    #[test]
    fn test_filter_directive_case_insensitive() {
        assert_eq!(filter_directive("warning"), "warn");
    }

    #[test]
    fn test_filter_directive_passes_through_unknown() {
        assert_eq!(filter_directive("bikeshare_data=TRACE"), "bikeshare_data=trace");
    }

    #[test]
    fn test_log_file_is_created() {
        let tmp = tempfile::TempDir::new().expect("tempdir");
        let path = tmp.path().join("bikeshare.log");

        // Only the first subscriber install in a process succeeds; this test
        // is the only one that installs one.
        setup_logging("INFO", Some(&path)).expect("setup_logging");
        tracing::info!("hello from the test");

        assert!(path.exists(), "log file must exist");
    }
}
