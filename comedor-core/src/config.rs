/// Core configuration.
///
/// # Environment variables
///
/// All settings can be overridden through environment variables:
///
/// | Variable | Default | Purpose |
/// |----------|---------|---------|
/// | COMEDOR_WORK_DIR | ./comedor-data | work directory (session mirror, logs) |
/// | COMEDOR_LOG_LEVEL | info | default log level |
/// | COMEDOR_LOG_JSON | false | JSON log output |
/// | COMEDOR_PERSIST_SELECTIONS | true | mirror selections to local storage |
/// | ENVIRONMENT | development | runtime environment |
use std::path::PathBuf;

#[derive(Debug, Clone)]
pub struct Config {
    /// Work directory for the session mirror and log files
    pub work_dir: String,
    /// Default log level when `RUST_LOG` is unset
    pub log_level: String,
    /// JSON log output (production)
    pub log_json: bool,
    /// Mirror selections to local storage for session continuity
    pub persist_selections: bool,
    /// Runtime environment: development | staging | production
    pub environment: String,
}

impl Config {
    /// Load configuration from environment variables, falling back to
    /// defaults for anything unset.
    pub fn from_env() -> Self {
        Self {
            work_dir: std::env::var("COMEDOR_WORK_DIR")
                .unwrap_or_else(|_| "./comedor-data".into()),
            log_level: std::env::var("COMEDOR_LOG_LEVEL").unwrap_or_else(|_| "info".into()),
            log_json: std::env::var("COMEDOR_LOG_JSON")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(false),
            persist_selections: std::env::var("COMEDOR_PERSIST_SELECTIONS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(true),
            environment: std::env::var("ENVIRONMENT").unwrap_or_else(|_| "development".into()),
        }
    }

    /// Override the work directory, keeping everything else from the
    /// environment. Used in tests.
    pub fn with_work_dir(work_dir: impl Into<String>) -> Self {
        let mut config = Self::from_env();
        config.work_dir = work_dir.into();
        config
    }

    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }

    /// Location of the session continuity mirror database.
    pub fn mirror_path(&self) -> PathBuf {
        PathBuf::from(&self.work_dir).join("selections.redb")
    }

    /// Location of log files.
    pub fn log_dir(&self) -> PathBuf {
        PathBuf::from(&self.work_dir).join("logs")
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_env()
    }
}
