#![crate_name = "smbfs_adapter"]
#![crate_type = "lib"]

//! # smbfs-adapter
//!
//! smbfs-adapter implements a generic filesystem adapter contract on top of SMB shares.
//! Every path handed to the adapter is a logical path, relative to a root directory on the share.
//!
//! ## Get started
//!
//! First of all you need to add **smbfs-adapter** to your project dependencies:
//!
//! ```toml
//! smbfs-adapter = { version = "^0.1", features = ["smb"] }
//! ```
//!
//! these features are supported:
//!
//! - `smb`: enable `SmbShare`, the share client backed by libsmbclient (UNIX only).
//! - `no-log`: disable logging. By default, this library will log via the `log` crate.
//!
//! ### Smb adapter (UNIX)
//!
//! Here is a basic usage example, with the `SmbShare` client.
//!
//! ```rust,ignore
//! use smbfs_adapter::fs::{Config, FilesystemAdapter};
//! use smbfs_adapter::{SmbAdapter, SmbCredentials, SmbOptions, SmbShare};
//!
//! let share = SmbShare::try_new(
//!     SmbCredentials::default()
//!         .server("smb://localhost:3445")
//!         .share("/temp")
//!         .username("test")
//!         .password("test")
//!         .workgroup("pavao"),
//!     SmbOptions::default()
//!         .case_sensitive(true)
//!         .one_share_per_server(true),
//! )
//! .unwrap();
//! let adapter = SmbAdapter::new(share, "cargo", |_: &str, _: &[u8]| -> Option<String> { None });
//!
//! // write file; parent directories are created
//! assert!(adapter.write("docs/readme.txt", b"hello", &Config::default()).is_ok());
//! assert_eq!(adapter.read("docs/readme.txt").unwrap(), b"hello");
//! // list everything below the root
//! for entry in adapter.list_contents("", true) {
//!     println!("{}", entry.unwrap().path());
//! }
//! // remove directory with its contents
//! assert!(adapter.delete_directory("docs").is_ok());
//! ```
//!

// -- crates
#[macro_use]
extern crate log;

mod adapter;
pub mod error;
pub mod fs;
mod mime;
mod share;

pub use adapter::{ListContents, SmbAdapter};
pub use error::{FsError, FsErrorKind, FsResult, ShareCondition};
pub use mime::{MimeDetector, MIME_SAMPLE_SIZE};
pub use share::ShareClient;
#[cfg(all(feature = "smb", target_family = "unix"))]
pub use share::{SmbCredentials, SmbEncryptionLevel, SmbOptions, SmbShare, SmbShareMode};
pub use utils::path::PathPrefixer;

// -- utils
pub(crate) mod utils;
// -- mock
#[cfg(test)]
pub(crate) mod mock;
