//! ## attributes
//!
//! Metadata records returned by the adapter

use std::fmt;
use std::str::FromStr;
use std::time::SystemTime;

use thiserror::Error;

/// Visibility of a file or directory
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum Visibility {
    Public,
    Private,
}

impl fmt::Display for Visibility {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Public => write!(f, "public"),
            Self::Private => write!(f, "private"),
        }
    }
}

/// Error returned when parsing an unknown visibility
#[derive(Debug, Clone, Eq, PartialEq, Error)]
#[error("invalid visibility: {0}")]
pub struct InvalidVisibility(pub String);

impl FromStr for Visibility {
    type Err = InvalidVisibility;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "public" => Ok(Self::Public),
            "private" => Ok(Self::Private),
            other => Err(InvalidVisibility(other.to_string())),
        }
    }
}

/// Attributes of a file
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct FileAttributes {
    pub path: String,
    pub size: Option<u64>,
    pub last_modified: Option<SystemTime>,
    pub mime_type: Option<String>,
}

impl FileAttributes {
    pub fn new<S: Into<String>>(path: S) -> Self {
        Self {
            path: path.into(),
            size: None,
            last_modified: None,
            mime_type: None,
        }
    }

    pub fn size(mut self, size: u64) -> Self {
        self.size = Some(size);
        self
    }

    pub fn last_modified(mut self, last_modified: Option<SystemTime>) -> Self {
        self.last_modified = last_modified;
        self
    }

    pub fn mime_type<S: Into<String>>(mut self, mime_type: S) -> Self {
        self.mime_type = Some(mime_type.into());
        self
    }
}

/// Attributes of a directory
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct DirectoryAttributes {
    pub path: String,
    pub last_modified: Option<SystemTime>,
}

impl DirectoryAttributes {
    pub fn new<S: Into<String>>(path: S) -> Self {
        Self {
            path: path.into(),
            last_modified: None,
        }
    }

    pub fn last_modified(mut self, last_modified: Option<SystemTime>) -> Self {
        self.last_modified = last_modified;
        self
    }
}

/// An entry yielded when listing contents
#[derive(Debug, Clone, Eq, PartialEq)]
pub enum StorageAttributes {
    File(FileAttributes),
    Directory(DirectoryAttributes),
}

impl StorageAttributes {
    pub fn path(&self) -> &str {
        match self {
            Self::File(file) => file.path.as_str(),
            Self::Directory(dir) => dir.path.as_str(),
        }
    }

    pub fn is_file(&self) -> bool {
        matches!(self, Self::File(_))
    }

    pub fn is_dir(&self) -> bool {
        matches!(self, Self::Directory(_))
    }

    pub fn last_modified(&self) -> Option<SystemTime> {
        match self {
            Self::File(file) => file.last_modified,
            Self::Directory(dir) => dir.last_modified,
        }
    }
}

impl From<FileAttributes> for StorageAttributes {
    fn from(file: FileAttributes) -> Self {
        Self::File(file)
    }
}

impl From<DirectoryAttributes> for StorageAttributes {
    fn from(dir: DirectoryAttributes) -> Self {
        Self::Directory(dir)
    }
}
