//! # share
//!
//! Share client contract

use std::io::{Read, Write};

use remotefs::{File, RemoteResult};

#[cfg(all(feature = "smb", target_family = "unix"))]
mod smb;
#[cfg(all(feature = "smb", target_family = "unix"))]
pub use smb::{SmbCredentials, SmbEncryptionLevel, SmbOptions, SmbShare, SmbShareMode};

/// Client operating on the share paths of a network share.
///
/// Failures are reported as [`remotefs::RemoteError`]; implementations must report a missing
/// path as `NoSuchFileOrDirectory`, a path of the wrong type as `BadFile` and a directory
/// which already exists as `DirectoryAlreadyExists`.
pub trait ShareClient {
    /// Stat the file or directory at `path`
    fn stat(&self, path: &str) -> RemoteResult<File>;

    /// Open the file at `path` for read
    fn read(&self, path: &str) -> RemoteResult<Box<dyn Read + '_>>;

    /// Open the file at `path` for write, truncating it
    fn write(&self, path: &str) -> RemoteResult<Box<dyn Write + '_>>;

    /// Delete the file at `path`
    fn del(&self, path: &str) -> RemoteResult<()>;

    /// Remove the empty directory at `path`
    fn rmdir(&self, path: &str) -> RemoteResult<()>;

    /// Create the directory at `path`; its parent must exist
    fn mkdir(&self, path: &str) -> RemoteResult<()>;

    fn rename(&self, from: &str, to: &str) -> RemoteResult<()>;

    /// List files and directories in `path`; entry paths are share paths
    fn dir(&self, path: &str) -> RemoteResult<Vec<File>>;
}
