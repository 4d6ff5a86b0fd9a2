use crate::error::ConfigError;
use crate::models::{strip_extension, CurrentMoment, FilenameTimestamp};
use crate::utils::{list_names_with_extension, DirectoryReader, FsDirectoryReader};
use std::path::{Path, PathBuf};
use std::str::FromStr;
use tracing::{debug, trace, warn};

pub const VIDEO_EXTENSION: &str = "mp4";
pub const IMAGE_EXTENSION: &str = "webp";

/// Directory scanned when none is configured
pub fn default_directory() -> PathBuf {
    if cfg!(windows) {
        PathBuf::from(r"C:\git\hooku\radar\downloaded_images")
    } else {
        PathBuf::from("downloaded_images")
    }
}

/// Ordering applied within each extension group
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ListingOrder {
    /// Whatever order the directory reader yields
    #[default]
    Enumeration,
    /// Byte-wise sorted, like a shell glob
    Lexical,
}

impl FromStr for ListingOrder {
    type Err = ConfigError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.to_lowercase().as_str() {
            "enumeration" => Ok(ListingOrder::Enumeration),
            "lexical" => Ok(ListingOrder::Lexical),
            _ => Err(ConfigError::InvalidOrder(value.to_string())),
        }
    }
}

/// Configuration for the file reporter
#[derive(Debug, Clone)]
pub struct FileReporterConfig {
    pub directory: PathBuf,
    pub order: ListingOrder,
}

impl Default for FileReporterConfig {
    fn default() -> Self {
        Self {
            directory: default_directory(),
            order: ListingOrder::default(),
        }
    }
}

/// Lists videos and in-window snapshots of one directory.
///
/// Enumeration failures never reach the caller: a directory that is
/// missing or unreadable contributes no entries.
#[derive(Debug, Clone)]
pub struct FileReporter<R = FsDirectoryReader> {
    config: FileReporterConfig,
    reader: R,
}

impl FileReporter<FsDirectoryReader> {
    pub fn new(config: FileReporterConfig) -> Self {
        Self::with_reader(config, FsDirectoryReader)
    }
}

impl<R: DirectoryReader> FileReporter<R> {
    pub fn with_reader(config: FileReporterConfig, reader: R) -> Self {
        Self { config, reader }
    }

    pub fn directory(&self) -> &Path {
        &self.config.directory
    }

    /// All `*.mp4` entries, unfiltered
    pub fn list_videos(&self) -> Vec<String> {
        self.list_or_empty(VIDEO_EXTENSION)
    }

    /// `*.webp` entries whose name encodes the given month/day and hour
    pub fn list_images_in_window(&self, moment: &CurrentMoment) -> Vec<String> {
        filter_images_in_window(self.list_or_empty(IMAGE_EXTENSION), moment)
    }

    /// Videos first, then in-window images, as basenames
    pub fn report(&self, moment: &CurrentMoment) -> Vec<String> {
        self.report_with_summary(moment).0
    }

    /// Same listing as [`FileReporter::report`] plus counts for diagnostics
    pub fn report_with_summary(&self, moment: &CurrentMoment) -> (Vec<String>, ReportSummary) {
        let videos = self.list_videos();
        let candidates = self.list_or_empty(IMAGE_EXTENSION);
        let image_candidates = candidates.len();
        let images = filter_images_in_window(candidates, moment);

        let summary = ReportSummary {
            videos: videos.len(),
            image_candidates,
            images_in_window: images.len(),
        };

        debug!(
            "Listing {:?} for {}/{}h: {} videos, {}/{} images in window",
            self.config.directory,
            moment.month_day,
            moment.hour,
            summary.videos,
            summary.images_in_window,
            summary.image_candidates
        );

        let mut files = videos;
        files.extend(images);
        (files, summary)
    }

    fn list_or_empty(&self, extension: &str) -> Vec<String> {
        match list_names_with_extension(&self.reader, &self.config.directory, extension) {
            Ok(mut names) => {
                if self.config.order == ListingOrder::Lexical {
                    names.sort();
                }
                names
            }
            Err(e) => {
                warn!(
                    "Failed to list *.{} in {:?}, treating as empty: {}",
                    extension, self.config.directory, e
                );
                Vec::new()
            }
        }
    }
}

/// Keep only snapshots in the moment's window, preserving order
/// Pure function
pub fn filter_images_in_window(names: Vec<String>, moment: &CurrentMoment) -> Vec<String> {
    names
        .into_iter()
        .filter(|name| {
            let basename = strip_extension(name, IMAGE_EXTENSION);
            let in_window = FilenameTimestamp::parse(basename).is_within(moment);
            if !in_window {
                trace!("Skipping {} outside current window", name);
            }
            in_window
        })
        .collect()
}

/// One name per line, each terminated by a newline
pub fn render_listing(names: &[String]) -> String {
    names.iter().map(|name| format!("{}\n", name)).collect()
}

/// Counts collected while producing a listing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ReportSummary {
    pub videos: usize,
    pub image_candidates: usize,
    pub images_in_window: usize,
}

impl ReportSummary {
    pub fn total(&self) -> usize {
        self.videos + self.images_in_window
    }
}
