pub mod file_operations;

pub use file_operations::{
    list_names_with_extension, matches_extension_glob, DirectoryReader, FsDirectoryReader,
};
