//! ## utils
//!
//! utilities

pub mod path;
#[cfg(all(feature = "smb", target_family = "unix"))]
pub mod smb;
