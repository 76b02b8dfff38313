//! # adapter
//!
//! Filesystem adapter over a share client

mod listing;

use std::cmp::Reverse;
use std::io::{self, Read, Write};

pub use listing::ListContents;
use remotefs::{File, RemoteError, RemoteErrorType, RemoteResult};

use crate::error::{io_error, FsError, FsErrorKind, FsResult, ShareCondition};
use crate::fs::{
    Config, FileAttributes, FilesystemAdapter, Listing, StorageAttributes, Visibility,
};
use crate::mime::{MimeDetector, MIME_SAMPLE_SIZE};
use crate::share::ShareClient;
use crate::utils::path::{self as path_utils, PathPrefixer};

/// Filesystem adapter for SMB shares.
///
/// Logical paths are resolved against `root` before reaching the share client, and
/// stripped of it before being returned.
pub struct SmbAdapter<C, D>
where
    C: ShareClient,
    D: MimeDetector,
{
    client: C,
    prefixer: PathPrefixer,
    detector: D,
}

impl<C, D> SmbAdapter<C, D>
where
    C: ShareClient,
    D: MimeDetector,
{
    /// Instantiate a new `SmbAdapter` operating below `root` on the share
    pub fn new<S: AsRef<str>>(client: C, root: S, detector: D) -> Self {
        let prefixer = PathPrefixer::new(root);
        debug!("initialized smb adapter at {}", prefixer.prefix());
        Self {
            client,
            prefixer,
            detector,
        }
    }

    /// Return a reference to the inner share client
    pub fn client(&self) -> &C {
        &self.client
    }

    /// Share path logical paths are resolved against
    pub fn root(&self) -> &str {
        self.prefixer.prefix()
    }

    /// Consume the adapter, returning the inner share client
    pub fn into_inner(self) -> C {
        self.client
    }

    // -- private

    /// Stat `location`; `None` if it doesn't exist
    fn lookup(&self, location: &str) -> RemoteResult<Option<File>> {
        trace!("get stat for {}", location);
        match self.client.stat(location) {
            Ok(file) => Ok(Some(file)),
            Err(err) if ShareCondition::from(&err) == ShareCondition::NotFound => Ok(None),
            Err(err) => Err(err),
        }
    }

    /// Create every missing directory from the top level down to `dirname`
    fn ensure_directory_exists(&self, dirname: &str) -> RemoteResult<()> {
        for directory in path_utils::ancestors(dirname) {
            let location = self.prefixer.prefix_path(&directory);
            match self.lookup(&location)? {
                Some(file) if file.is_dir() => continue,
                Some(_) => {
                    return Err(RemoteError::new_ex(
                        RemoteErrorType::BadFile,
                        format!("{location} is not a directory"),
                    ))
                }
                None => {}
            }
            trace!("making directory at {}", location);
            match self.client.mkdir(&location) {
                Ok(()) => debug!("created directory {}", location),
                Err(err) if ShareCondition::from(&err) == ShareCondition::AlreadyExists => {
                    debug!("directory {} has been created meanwhile", location)
                }
                Err(err) => return Err(err),
            }
        }
        Ok(())
    }

    fn ensure_parent_directory_exists(&self, path: &str) -> RemoteResult<()> {
        self.ensure_directory_exists(path_utils::dirname(path))
    }

    fn log_ignored_options(&self, path: &str, config: &Config) {
        if let Some(visibility) = config.get_visibility() {
            debug!(
                "ignoring visibility {} for {}: not supported by smb shares",
                visibility, path
            );
        }
    }

    fn stat_for_metadata(&self, path: &str) -> FsResult<File> {
        let location = self.prefixer.prefix_path(path);
        trace!("get stat for {}", location);
        self.client
            .stat(&location)
            .map_err(|e| FsError::with_cause(FsErrorKind::MetadataRetrievalFailure, path, e))
    }

    fn existence(&self, path: &str) -> FsResult<Option<File>> {
        self.lookup(&self.prefixer.prefix_path(path))
            .map_err(|e| FsError::with_cause(FsErrorKind::ExistenceCheckFailure, path, e))
    }

    fn unsupported(&self, path: &str) -> FsError {
        FsError::with_cause(
            FsErrorKind::UnsupportedOperation,
            path,
            RemoteError::new_ex(
                RemoteErrorType::UnsupportedFeature,
                "smb shares have no visibility",
            ),
        )
    }
}

impl<C, D> FilesystemAdapter for SmbAdapter<C, D>
where
    C: ShareClient,
    D: MimeDetector,
{
    fn file_exists(&self, path: &str) -> FsResult<bool> {
        trace!("checking if file {} exists...", path);
        self.existence(path)
            .map(|file| file.map(|x| !x.is_dir()).unwrap_or(false))
    }

    fn directory_exists(&self, path: &str) -> FsResult<bool> {
        trace!("checking if directory {} exists...", path);
        self.existence(path)
            .map(|file| file.map(|x| x.is_dir()).unwrap_or(false))
    }

    fn write(&self, path: &str, contents: &[u8], config: &Config) -> FsResult<()> {
        let mut reader = contents;
        self.write_stream(path, &mut reader, config)
    }

    fn write_stream(&self, path: &str, contents: &mut dyn Read, config: &Config) -> FsResult<()> {
        self.log_ignored_options(path, config);
        let location = self.prefixer.prefix_path(path);
        self.ensure_parent_directory_exists(path)
            .and_then(|_| {
                trace!("writing file at {}", location);
                let mut stream = self.client.write(&location)?;
                let written = io::copy(contents, &mut stream).map_err(io_error)?;
                stream.flush().map_err(io_error)?;
                debug!("written {} bytes to {}", written, location);
                Ok(())
            })
            .map_err(|e| FsError::with_cause(FsErrorKind::WriteFailure, path, e))
    }

    fn read(&self, path: &str) -> FsResult<Vec<u8>> {
        let mut stream = self.read_stream(path)?;
        let mut contents = Vec::new();
        stream
            .read_to_end(&mut contents)
            .map_err(|e| FsError::with_cause(FsErrorKind::ReadFailure, path, io_error(e)))?;
        Ok(contents)
    }

    fn read_stream(&self, path: &str) -> FsResult<Box<dyn Read + '_>> {
        let location = self.prefixer.prefix_path(path);
        trace!("opening file at {} for read", location);
        self.client
            .read(&location)
            .map_err(|e| FsError::with_cause(FsErrorKind::ReadFailure, path, e))
    }

    fn delete(&self, path: &str) -> FsResult<()> {
        let location = self.prefixer.prefix_path(path);
        trace!("removing file {}", location);
        match self.client.del(&location) {
            Ok(()) => {
                debug!("removed file {}", location);
                Ok(())
            }
            Err(err) if ShareCondition::from(&err) == ShareCondition::NotFound => {
                debug!("{} doesn't exist; nothing to remove", location);
                Ok(())
            }
            Err(err) => Err(FsError::with_cause(FsErrorKind::DeleteFailure, path, err)),
        }
    }

    fn delete_directory(&self, path: &str) -> FsResult<()> {
        let entries = self
            .list_contents(path, true)
            .collect::<FsResult<Vec<StorageAttributes>>>()
            .map_err(|e| e.rewrap(FsErrorKind::DirectoryDeleteFailure, path))?;
        let mut directories = Vec::new();
        for entry in entries {
            match entry {
                StorageAttributes::File(file) => {
                    let location = self.prefixer.prefix_path(&file.path);
                    trace!("removing file {}", location);
                    self.client.del(&location).map_err(|e| {
                        FsError::with_cause(FsErrorKind::DirectoryDeleteFailure, path, e)
                    })?;
                }
                StorageAttributes::Directory(dir) => directories.push(dir.path),
            }
        }
        // deepest first, so that each directory is empty once reached
        directories.sort_by_key(|dir| Reverse(path_utils::depth(dir)));
        directories.push(path.to_string());
        for dir in directories {
            let location = self.prefixer.prefix_path(&dir);
            trace!("removing directory at {}", location);
            self.client.rmdir(&location).map_err(|e| {
                FsError::with_cause(FsErrorKind::DirectoryDeleteFailure, path, e)
            })?;
        }
        debug!("removed directory {}", path);
        Ok(())
    }

    fn create_directory(&self, path: &str, config: &Config) -> FsResult<()> {
        self.log_ignored_options(path, config);
        self.ensure_directory_exists(path)
            .map_err(|e| FsError::with_cause(FsErrorKind::DirectoryCreateFailure, path, e))
    }

    fn set_visibility(&self, path: &str, visibility: Visibility) -> FsResult<()> {
        error!("cannot set visibility {} for {}", visibility, path);
        Err(self.unsupported(path))
    }

    fn visibility(&self, path: &str) -> FsResult<FileAttributes> {
        error!("cannot get visibility for {}", path);
        Err(self.unsupported(path))
    }

    fn mime_type(&self, path: &str) -> FsResult<FileAttributes> {
        let location = self.prefixer.prefix_path(path);
        trace!("sampling {} for mime type detection", location);
        let mut sample = Vec::with_capacity(MIME_SAMPLE_SIZE);
        self.client
            .read(&location)
            .and_then(|stream| {
                stream
                    .take(MIME_SAMPLE_SIZE as u64)
                    .read_to_end(&mut sample)
                    .map_err(io_error)
            })
            .map_err(|e| FsError::with_cause(FsErrorKind::MetadataRetrievalFailure, path, e))?;
        match self.detector.detect(path, &sample) {
            Some(mime_type) => Ok(FileAttributes::new(path).mime_type(mime_type)),
            None => {
                debug!("could not detect mime type of {}", path);
                Err(FsError::new(FsErrorKind::MetadataRetrievalFailure, path))
            }
        }
    }

    fn last_modified(&self, path: &str) -> FsResult<FileAttributes> {
        let file = self.stat_for_metadata(path)?;
        match file.metadata().modified {
            Some(modified) => Ok(FileAttributes::new(path).last_modified(Some(modified))),
            None => Err(FsError::new(FsErrorKind::MetadataRetrievalFailure, path)),
        }
    }

    fn file_size(&self, path: &str) -> FsResult<FileAttributes> {
        let file = self.stat_for_metadata(path)?;
        if file.is_dir() {
            return Err(FsError::with_cause(
                FsErrorKind::MetadataRetrievalFailure,
                path,
                RemoteError::new_ex(RemoteErrorType::BadFile, "directories have no file size"),
            ));
        }
        Ok(FileAttributes::new(path).size(file.metadata().size))
    }

    fn list_contents(&self, path: &str, deep: bool) -> Listing<'_> {
        Box::new(ListContents::new(
            &self.client,
            &self.prefixer,
            self.prefixer.prefix_directory_path(path),
            deep,
        ))
    }

    fn mov(&self, source: &str, destination: &str, config: &Config) -> FsResult<()> {
        self.log_ignored_options(destination, config);
        let from = self.prefixer.prefix_path(source);
        let to = self.prefixer.prefix_path(destination);
        self.ensure_parent_directory_exists(destination)
            .and_then(|_| {
                trace!("moving {} to {}", from, to);
                self.client.rename(&from, &to)
            })
            .map_err(|e| {
                FsError::with_cause(FsErrorKind::MoveFailure, source, e).destination(destination)
            })?;
        debug!("moved {} to {}", source, destination);
        Ok(())
    }

    fn copy(&self, source: &str, destination: &str, config: &Config) -> FsResult<()> {
        // opening the destination for writing would truncate the source
        if self.prefixer.prefix_path(source) == self.prefixer.prefix_path(destination) {
            let location = self.prefixer.prefix_path(source);
            trace!("get stat for {}", location);
            let file = self.client.stat(&location).and_then(|file| {
                if file.is_dir() {
                    Err(RemoteError::new_ex(
                        RemoteErrorType::BadFile,
                        format!("{location} is a directory"),
                    ))
                } else {
                    Ok(file)
                }
            });
            file.map_err(|e| {
                FsError::with_cause(FsErrorKind::CopyFailure, source, e).destination(destination)
            })?;
            debug!("{} copied onto itself; nothing to do", source);
            return Ok(());
        }
        let mut stream = self.read_stream(source).map_err(|e| {
            e.rewrap(FsErrorKind::CopyFailure, source)
                .destination(destination)
        })?;
        let result = self.write_stream(destination, &mut stream, config);
        // source is closed whatever the outcome
        drop(stream);
        result.map_err(|e| {
            e.rewrap(FsErrorKind::CopyFailure, source)
                .destination(destination)
        })?;
        debug!("copied {} to {}", source, destination);
        Ok(())
    }
}
