use std::path::Path;

use anyhow::{Context, Result};
use flexi_logger::{FileSpec, Logger, LoggerHandle};

/// Initializes file-based logging next to the data file. The TUI owns the
/// terminal, so diagnostics go to `taskdeck.log` in the data directory.
/// Level comes from `TASKDECK_LOG` (default: warn).
///
/// The returned handle must be kept alive for the life of the process.
pub fn init(data_dir: &Path) -> Result<LoggerHandle> {
    let spec = std::env::var("TASKDECK_LOG").unwrap_or_else(|_| "warn".to_string());
    Logger::try_with_str(&spec)
        .with_context(|| format!("invalid TASKDECK_LOG value '{spec}'"))?
        .log_to_file(
            FileSpec::default()
                .directory(data_dir)
                .basename("taskdeck")
                .suppress_timestamp(),
        )
        .append()
        .start()
        .context("failed to start logger")
}
