//! # smb utils
//!
//! SMB protocol utilities

use std::path::PathBuf;

use libc::mode_t;
use pavao::{SmbError, SmbStat};
use remotefs::fs::{FileType, Metadata, UnixPex};
use remotefs::{File, RemoteError, RemoteErrorType};

/// Convert `SmbStat` to `File`
pub fn smbstat_to_file<S: AsRef<str>>(uri: S, stat: SmbStat) -> File {
    let mode = mode_t::from(stat.mode);
    File {
        path: PathBuf::from(uri.as_ref()),
        metadata: Metadata::default()
            .accessed(stat.accessed)
            .created(stat.created)
            .file_type(get_file_type_from_stat(&stat))
            .gid(stat.gid)
            .mode(UnixPex::from(mode as u32))
            .modified(stat.modified)
            .size(stat.size)
            .uid(stat.uid),
    }
}

/// Convert `SmbError` to `RemoteError`.
///
/// Errno values libsmbclient reports for missing paths, existing directories and
/// mismatching file types are mapped to their remotefs counterpart; any other error
/// gets the `fallback` kind.
pub fn smb_error(err: SmbError, fallback: RemoteErrorType) -> RemoteError {
    let kind = match errno(&err) {
        Some(libc::ENOENT) => RemoteErrorType::NoSuchFileOrDirectory,
        Some(libc::EEXIST) => RemoteErrorType::DirectoryAlreadyExists,
        Some(libc::EISDIR) | Some(libc::ENOTDIR) => RemoteErrorType::BadFile,
        _ => fallback,
    };
    RemoteError::new_ex(kind, err)
}

fn errno(err: &SmbError) -> Option<i32> {
    match err {
        SmbError::Io(err) => err.raw_os_error(),
        _ => None,
    }
}

fn get_file_type_from_stat(stat: &SmbStat) -> FileType {
    match stat.mode {
        mode if mode.is_dir() => FileType::Directory,
        mode if mode.is_symlink() => FileType::Symlink,
        _ => FileType::File,
    }
}
