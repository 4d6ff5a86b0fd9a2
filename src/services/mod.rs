pub mod file_reporter;
pub mod http;

pub use file_reporter::{
    default_directory, filter_images_in_window, render_listing, FileReporter,
    FileReporterConfig, ListingOrder, ReportSummary, IMAGE_EXTENSION, VIDEO_EXTENSION,
};
pub use http::{router, serve, ServerConfig, DEFAULT_ROUTE};
