pub mod error;
pub mod models;
pub mod services;
pub mod utils;

// Re-export commonly used types
pub use error::ConfigError;
pub use models::{CurrentMoment, FilenameTimestamp};
pub use services::{
    render_listing, FileReporter, FileReporterConfig, ListingOrder, ReportSummary, ServerConfig,
};
pub use utils::{DirectoryReader, FsDirectoryReader};

// Application configuration
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub reporter: FileReporterConfig,
    pub server: ServerConfig,
    pub log_level: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            reporter: FileReporterConfig::default(),
            server: ServerConfig::default(),
            log_level: "warn".to_string(),
        }
    }
}
