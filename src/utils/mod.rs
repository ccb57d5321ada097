use std::sync::Once;
use std::{env, fs, path::Path, path::PathBuf};

use crate::errors::Result;

const DEFAULT_DIR_NAME: &str = ".billsync";
const BILLS_FILE: &str = "bills.json";
const SETTINGS_FILE: &str = "settings.json";
const BACKUP_DIR: &str = "backups";

static TRACING_INIT: Once = Once::new();

/// Initializes the global tracing subscriber with sensible defaults.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, EnvFilter};

        let filter =
            EnvFilter::from_default_env().add_directive("billsync_core=info".parse().unwrap());

        fmt().with_env_filter(filter).init();
    });
}

/// Returns the application-specific data directory, defaulting to `~/.billsync`.
pub fn app_data_dir() -> PathBuf {
    if let Some(custom) = env::var_os("BILLSYNC_HOME") {
        return PathBuf::from(custom);
    }
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(DEFAULT_DIR_NAME)
}

/// Path to the persisted bill collection.
pub fn bills_file_in(base: &Path) -> PathBuf {
    base.join(BILLS_FILE)
}

/// Path to the persisted user settings.
pub fn settings_file_in(base: &Path) -> PathBuf {
    base.join(SETTINGS_FILE)
}

/// Base directory for backup snapshots.
pub fn backups_dir_in(base: &Path) -> PathBuf {
    base.join(BACKUP_DIR)
}

/// Creates the directory (and parents) when missing.
pub fn ensure_dir(path: &Path) -> Result<()> {
    if !path.exists() {
        fs::create_dir_all(path)?;
    }
    Ok(())
}
