//! ## Mock
//!
//! Contains mock for test units

use std::cell::{Cell, RefCell};
use std::fs;
use std::io::{self, Read, Write};
use std::path::PathBuf;
use std::rc::Rc;

use remotefs::fs::{FileType, Metadata};
use remotefs::{File, RemoteError, RemoteErrorType, RemoteResult};
use tempfile::TempDir;

use crate::share::ShareClient;

// -- logger

#[allow(dead_code)]
pub fn logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

// -- share

/// Share client working on a temporary local directory.
///
/// Records created directories and open readers, and fails the operations it has been
/// told to fail with the given error kind.
pub struct LocalShare {
    root: TempDir,
    created: RefCell<Vec<String>>,
    failures: RefCell<Vec<(&'static str, String, RemoteErrorType)>>,
    readers: Rc<Cell<usize>>,
}

impl LocalShare {
    pub fn new() -> Self {
        Self {
            root: tempfile::tempdir().unwrap(),
            created: RefCell::new(Vec::new()),
            failures: RefCell::new(Vec::new()),
            readers: Rc::new(Cell::new(0)),
        }
    }

    /// Make `op` fail for the share path `path` with a `ConnectionError`
    pub fn fail_on(&self, op: &'static str, path: &str) {
        self.fail_with(op, path, RemoteErrorType::ConnectionError);
    }

    /// Make `op` fail for the share path `path` with an error of `kind`
    pub fn fail_with(&self, op: &'static str, path: &str, kind: RemoteErrorType) {
        self.failures
            .borrow_mut()
            .push((op, path.to_string(), kind));
    }

    /// Directories created through `mkdir`, in creation order
    pub fn created_directories(&self) -> Vec<String> {
        self.created.borrow().clone()
    }

    /// Number of read streams which haven't been dropped yet
    pub fn open_readers(&self) -> usize {
        self.readers.get()
    }

    pub fn local_path(&self, path: &str) -> PathBuf {
        self.root.path().join(path.trim_start_matches('/'))
    }

    /// Make a file behind the adapter's back, with its parents
    pub fn make_file(&self, path: &str, contents: &[u8]) {
        let path = self.local_path(path);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(path, contents).unwrap();
    }

    pub fn make_dir(&self, path: &str) {
        fs::create_dir_all(self.local_path(path)).unwrap();
    }

    fn check(&self, op: &'static str, path: &str) -> RemoteResult<()> {
        let path = path.trim_end_matches('/');
        match self
            .failures
            .borrow()
            .iter()
            .find(|(x, p, _)| *x == op && p.as_str() == path)
        {
            Some((_, _, kind)) => Err(RemoteError::new_ex(
                *kind,
                format!("{op} failure on {path}"),
            )),
            None => Ok(()),
        }
    }
}

impl ShareClient for LocalShare {
    fn stat(&self, path: &str) -> RemoteResult<File> {
        self.check("stat", path)?;
        let meta = fs::metadata(self.local_path(path))
            .map_err(|e| remote_error(e, RemoteErrorType::StatFailed))?;
        let file_type = if meta.is_dir() {
            FileType::Directory
        } else {
            FileType::File
        };
        let mut metadata = Metadata::default().file_type(file_type).size(meta.len());
        if let Ok(modified) = meta.modified() {
            metadata = metadata.modified(modified);
        }
        Ok(File {
            path: PathBuf::from(path),
            metadata,
        })
    }

    fn read(&self, path: &str) -> RemoteResult<Box<dyn Read + '_>> {
        self.check("read", path)?;
        let file = fs::File::open(self.local_path(path))
            .map_err(|e| remote_error(e, RemoteErrorType::CouldNotOpenFile))?;
        Ok(Box::new(TrackedReader::new(file, self.readers.clone())))
    }

    fn write(&self, path: &str) -> RemoteResult<Box<dyn Write + '_>> {
        self.check("write", path)?;
        let file = fs::File::create(self.local_path(path))
            .map_err(|e| remote_error(e, RemoteErrorType::CouldNotOpenFile))?;
        Ok(Box::new(file))
    }

    fn del(&self, path: &str) -> RemoteResult<()> {
        self.check("del", path)?;
        let local = self.local_path(path);
        if local.is_dir() {
            return Err(RemoteError::new_ex(
                RemoteErrorType::BadFile,
                "is a directory",
            ));
        }
        fs::remove_file(local).map_err(|e| remote_error(e, RemoteErrorType::CouldNotRemoveFile))
    }

    fn rmdir(&self, path: &str) -> RemoteResult<()> {
        self.check("rmdir", path)?;
        fs::remove_dir(self.local_path(path))
            .map_err(|e| remote_error(e, RemoteErrorType::CouldNotRemoveFile))
    }

    fn mkdir(&self, path: &str) -> RemoteResult<()> {
        self.check("mkdir", path)?;
        fs::create_dir(self.local_path(path))
            .map_err(|e| remote_error(e, RemoteErrorType::FileCreateDenied))?;
        self.created.borrow_mut().push(path.to_string());
        Ok(())
    }

    fn rename(&self, from: &str, to: &str) -> RemoteResult<()> {
        self.check("rename", from)?;
        fs::rename(self.local_path(from), self.local_path(to))
            .map_err(|e| remote_error(e, RemoteErrorType::ProtocolError))
    }

    fn dir(&self, path: &str) -> RemoteResult<Vec<File>> {
        self.check("dir", path)?;
        let mut names: Vec<String> = fs::read_dir(self.local_path(path))
            .map_err(|e| remote_error(e, RemoteErrorType::StatFailed))?
            .map(|entry| entry.map(|x| x.file_name().to_string_lossy().to_string()))
            .collect::<io::Result<_>>()
            .map_err(|e| remote_error(e, RemoteErrorType::StatFailed))?;
        names.sort();
        let parent = path.trim_end_matches('/');
        names
            .iter()
            .map(|name| self.stat(&format!("{parent}/{name}")))
            .collect()
    }
}

fn remote_error(err: io::Error, fallback: RemoteErrorType) -> RemoteError {
    let kind = match err.kind() {
        io::ErrorKind::NotFound => RemoteErrorType::NoSuchFileOrDirectory,
        io::ErrorKind::AlreadyExists => RemoteErrorType::DirectoryAlreadyExists,
        _ => fallback,
    };
    RemoteError::new_ex(kind, err)
}

/// Reader keeping count of the open streams
struct TrackedReader {
    file: fs::File,
    readers: Rc<Cell<usize>>,
}

impl TrackedReader {
    fn new(file: fs::File, readers: Rc<Cell<usize>>) -> Self {
        readers.set(readers.get() + 1);
        Self { file, readers }
    }
}

impl Read for TrackedReader {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        self.file.read(buf)
    }
}

impl Drop for TrackedReader {
    fn drop(&mut self) {
        self.readers.set(self.readers.get() - 1);
    }
}
