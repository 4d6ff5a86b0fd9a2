use std::ffi::OsString;
use std::fs;
use std::io;
use std::path::Path;
use tracing::trace;

/// Capability to enumerate the entry names of a directory.
/// Implementations report failures; callers decide how to degrade.
pub trait DirectoryReader {
    fn entry_names(&self, directory: &Path) -> io::Result<Vec<OsString>>;
}

/// Reads the real filesystem. Names only, no metadata is requested.
#[derive(Debug, Clone, Copy, Default)]
pub struct FsDirectoryReader;

impl DirectoryReader for FsDirectoryReader {
    fn entry_names(&self, directory: &Path) -> io::Result<Vec<OsString>> {
        fs::read_dir(directory)?
            .map(|entry| entry.map(|e| e.file_name()))
            .collect()
    }
}

/// List entry names in a directory matching the glob `*.<extension>`
pub fn list_names_with_extension<R: DirectoryReader + ?Sized>(
    reader: &R,
    directory: &Path,
    extension: &str,
) -> io::Result<Vec<String>> {
    let names = reader
        .entry_names(directory)?
        .into_iter()
        .filter_map(|name| {
            name.into_string()
                .map_err(|raw| trace!("Skipping non UTF-8 entry {:?} in {:?}", raw, directory))
                .ok()
        })
        .filter(|name| matches_extension_glob(name, extension))
        .collect();

    Ok(names)
}

/// Shell-style `*.<extension>` match: `*` never matches a leading dot, and
/// case sensitivity follows the host filesystem.
/// Pure function
pub fn matches_extension_glob(name: &str, extension: &str) -> bool {
    if name.starts_with('.') {
        return false;
    }

    let Some((_, ext)) = name.rsplit_once('.') else {
        return false;
    };

    if cfg!(windows) {
        ext.eq_ignore_ascii_case(extension)
    } else {
        ext == extension
    }
}
