//! # fs
//!
//! Filesystem adapter contract

mod attributes;
mod config;

use std::io::Read;

pub use attributes::{
    DirectoryAttributes, FileAttributes, InvalidVisibility, StorageAttributes, Visibility,
};
pub use config::{Config, VISIBILITY};

use crate::error::{FsError, FsErrorKind, FsResult};

/// Lazy sequence of entries returned by [`FilesystemAdapter::list_contents`]
pub type Listing<'a> = Box<dyn Iterator<Item = FsResult<StorageAttributes>> + 'a>;

/// Operations a filesystem backend exposes to a generic filesystem facade.
///
/// Paths are logical, forward-slash delimited and relative to the backend root.
pub trait FilesystemAdapter {
    /// Returns whether a file exists at `path`. Directories are not files.
    fn file_exists(&self, path: &str) -> FsResult<bool>;

    /// Returns whether a directory exists at `path`.
    fn directory_exists(&self, path: &str) -> FsResult<bool>;

    /// Write `contents` to `path`, creating missing parent directories.
    fn write(&self, path: &str, contents: &[u8], config: &Config) -> FsResult<()>;

    /// Write everything `contents` yields to `path`, creating missing parent directories.
    fn write_stream(&self, path: &str, contents: &mut dyn Read, config: &Config) -> FsResult<()>;

    /// Read the whole file at `path`.
    fn read(&self, path: &str) -> FsResult<Vec<u8>>;

    /// Open the file at `path` for read. The returned stream is closed when dropped.
    fn read_stream(&self, path: &str) -> FsResult<Box<dyn Read + '_>>;

    /// Delete the file at `path`. Deleting a missing file succeeds.
    fn delete(&self, path: &str) -> FsResult<()>;

    /// Delete the directory at `path` and everything it contains.
    fn delete_directory(&self, path: &str) -> FsResult<()>;

    /// Create the directory at `path` and its missing ancestors.
    fn create_directory(&self, path: &str, config: &Config) -> FsResult<()>;

    fn set_visibility(&self, path: &str, visibility: Visibility) -> FsResult<()>;

    fn visibility(&self, path: &str) -> FsResult<FileAttributes>;

    fn mime_type(&self, path: &str) -> FsResult<FileAttributes>;

    fn last_modified(&self, path: &str) -> FsResult<FileAttributes>;

    fn file_size(&self, path: &str) -> FsResult<FileAttributes>;

    /// List the entries at `path`; when `deep` each directory is followed by its contents.
    fn list_contents(&self, path: &str, deep: bool) -> Listing<'_>;

    /// Move `source` to `destination`, creating the destination parent directory.
    fn mov(&self, source: &str, destination: &str, config: &Config) -> FsResult<()>;

    /// Copy `source` to `destination`, creating the destination parent directory.
    fn copy(&self, source: &str, destination: &str, config: &Config) -> FsResult<()>;

    /// Read the whole file at `path` as UTF-8 text.
    fn read_to_string(&self, path: &str) -> FsResult<String> {
        let contents = self.read(path)?;
        String::from_utf8(contents).map_err(|e| {
            FsError::with_cause(
                FsErrorKind::ReadFailure,
                path,
                crate::error::io_error(std::io::Error::new(std::io::ErrorKind::InvalidData, e)),
            )
        })
    }
}
