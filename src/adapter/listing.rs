//! ## listing
//!
//! Lazy directory listing

use std::iter::FusedIterator;

use remotefs::File;

use crate::error::{FsError, FsErrorKind, FsResult};
use crate::fs::{DirectoryAttributes, FileAttributes, StorageAttributes};
use crate::share::ShareClient;
use crate::utils::path::PathPrefixer;

/// Depth-first, pre-order listing of a share directory.
///
/// Directories are listed only when the iterator reaches them. The first failure is
/// yielded as a `ListFailure`, then the iterator is exhausted.
pub struct ListContents<'a, C: ShareClient> {
    client: &'a C,
    prefixer: &'a PathPrefixer,
    deep: bool,
    /// share path of the next directory to list
    pending: Option<String>,
    stack: Vec<std::vec::IntoIter<File>>,
    terminated: bool,
}

impl<'a, C: ShareClient> ListContents<'a, C> {
    pub(crate) fn new(
        client: &'a C,
        prefixer: &'a PathPrefixer,
        location: String,
        deep: bool,
    ) -> Self {
        Self {
            client,
            prefixer,
            deep,
            pending: Some(location),
            stack: Vec::new(),
            terminated: false,
        }
    }

    fn list(&mut self, location: &str) -> FsResult<()> {
        trace!("listing contents of {}", location);
        let entries = self.client.dir(location).map_err(|e| {
            FsError::with_cause(
                FsErrorKind::ListFailure,
                self.prefixer.strip_directory_prefix(location),
                e,
            )
        })?;
        self.stack.push(entries.into_iter());
        Ok(())
    }
}

impl<C: ShareClient> Iterator for ListContents<'_, C> {
    type Item = FsResult<StorageAttributes>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.terminated {
            return None;
        }
        if let Some(location) = self.pending.take() {
            if let Err(err) = self.list(&location) {
                self.terminated = true;
                return Some(Err(err));
            }
        }
        while let Some(entries) = self.stack.last_mut() {
            match entries.next() {
                Some(file) => {
                    if self.deep && file.is_dir() {
                        self.pending = Some(file.path().to_string_lossy().to_string());
                    }
                    return Some(Ok(to_attributes(self.prefixer, &file)));
                }
                None => {
                    self.stack.pop();
                }
            }
        }
        self.terminated = true;
        None
    }
}

impl<C: ShareClient> FusedIterator for ListContents<'_, C> {}

/// Convert a share `File` to the attributes of its logical path
pub(crate) fn to_attributes(prefixer: &PathPrefixer, file: &File) -> StorageAttributes {
    let location = file.path().to_string_lossy();
    let modified = file.metadata().modified;
    if file.is_dir() {
        DirectoryAttributes::new(prefixer.strip_directory_prefix(&location))
            .last_modified(modified)
            .into()
    } else {
        FileAttributes::new(prefixer.strip_prefix(&location))
            .size(file.metadata().size)
            .last_modified(modified)
            .into()
    }
}

#[cfg(test)]
mod test {

    use std::path::PathBuf;
    use std::time::SystemTime;

    use pretty_assertions::assert_eq;
    use remotefs::fs::{FileType, Metadata};

    use super::*;
    use crate::mock::LocalShare;

    #[test]
    fn should_convert_file_to_attributes() {
        let prefixer = PathPrefixer::new("data");
        let file = File {
            path: PathBuf::from("/data/foo/bar.txt"),
            metadata: Metadata::default()
                .file_type(FileType::File)
                .size(12)
                .modified(SystemTime::UNIX_EPOCH),
        };
        assert_eq!(
            to_attributes(&prefixer, &file),
            StorageAttributes::File(
                FileAttributes::new("foo/bar.txt")
                    .size(12)
                    .last_modified(Some(SystemTime::UNIX_EPOCH))
            )
        );
        let dir = File {
            path: PathBuf::from("/data/foo/"),
            metadata: Metadata::default().file_type(FileType::Directory),
        };
        assert_eq!(
            to_attributes(&prefixer, &dir),
            StorageAttributes::Directory(DirectoryAttributes::new("foo"))
        );
    }

    #[test]
    fn should_list_lazily_in_pre_order() {
        crate::mock::logger();
        let share = LocalShare::new();
        share.make_file("/foo/a.txt", b"a");
        share.make_file("/foo/sub/b.txt", b"b");
        share.make_file("/foo/sub/deeper/c.txt", b"c");
        share.make_file("/foo/z.txt", b"z");
        let prefixer = PathPrefixer::new("");
        let paths: Vec<String> =
            ListContents::new(&share, &prefixer, prefixer.prefix_directory_path("foo"), true)
                .map(|x| x.unwrap().path().to_string())
                .collect();
        assert_eq!(
            paths,
            vec![
                "foo/a.txt",
                "foo/sub",
                "foo/sub/b.txt",
                "foo/sub/deeper",
                "foo/sub/deeper/c.txt",
                "foo/z.txt",
            ]
        );
    }

    #[test]
    fn should_list_shallow() {
        crate::mock::logger();
        let share = LocalShare::new();
        share.make_file("/foo/a.txt", b"a");
        share.make_file("/foo/sub/b.txt", b"b");
        let prefixer = PathPrefixer::new("");
        let entries: Vec<StorageAttributes> =
            ListContents::new(&share, &prefixer, prefixer.prefix_directory_path("foo"), false)
                .collect::<FsResult<_>>()
                .unwrap();
        assert_eq!(entries.len(), 2);
        assert!(entries[0].is_file());
        assert!(entries[1].is_dir());
        assert_eq!(entries[1].path(), "foo/sub");
    }

    #[test]
    fn should_stop_after_failure() {
        crate::mock::logger();
        let share = LocalShare::new();
        share.make_file("/foo/a.txt", b"a");
        share.make_file("/foo/sub/b.txt", b"b");
        share.make_file("/foo/z.txt", b"z");
        share.fail_on("dir", "/foo/sub");
        let prefixer = PathPrefixer::new("");
        let mut listing =
            ListContents::new(&share, &prefixer, prefixer.prefix_directory_path("foo"), true);
        assert_eq!(listing.next().unwrap().unwrap().path(), "foo/a.txt");
        assert_eq!(listing.next().unwrap().unwrap().path(), "foo/sub");
        let err = listing.next().unwrap().unwrap_err();
        assert_eq!(err.kind, FsErrorKind::ListFailure);
        assert_eq!(err.location.as_str(), "foo/sub");
        assert!(listing.next().is_none());
        assert!(listing.next().is_none());
    }

    #[test]
    fn should_fail_listing_missing_directory() {
        crate::mock::logger();
        let share = LocalShare::new();
        let prefixer = PathPrefixer::new("");
        let mut listing =
            ListContents::new(&share, &prefixer, prefixer.prefix_directory_path("nope"), true);
        let err = listing.next().unwrap().unwrap_err();
        assert_eq!(err.kind, FsErrorKind::ListFailure);
        assert!(err.is_not_found());
        assert!(listing.next().is_none());
    }
}
