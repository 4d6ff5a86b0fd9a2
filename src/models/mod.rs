pub mod current_moment;
pub mod filename_timestamp;

pub use current_moment::CurrentMoment;
pub use filename_timestamp::{strip_extension, FilenameTimestamp};
