//! ## config
//!
//! Per operation options

use std::collections::HashMap;

use super::Visibility;

/// Option key for the requested visibility
pub const VISIBILITY: &str = "visibility";

/// Options passed along with write, move, copy and directory operations.
///
/// SMB shares have no compatible visibility model, so the adapter only logs the
/// options it cannot honour.
#[derive(Debug, Default, Clone, Eq, PartialEq)]
pub struct Config {
    options: HashMap<String, String>,
}

impl Config {
    /// Construct Config with the provided option
    pub fn option<K: AsRef<str>, V: AsRef<str>>(mut self, key: K, value: V) -> Self {
        self.options
            .insert(key.as_ref().to_string(), value.as_ref().to_string());
        self
    }

    /// Construct Config with the provided visibility
    pub fn visibility(self, visibility: Visibility) -> Self {
        self.option(VISIBILITY, visibility.to_string())
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.options.get(key).map(|x| x.as_str())
    }

    /// Requested visibility, if any and valid
    pub fn get_visibility(&self) -> Option<Visibility> {
        self.get(VISIBILITY).and_then(|x| x.parse().ok())
    }

    pub fn is_empty(&self) -> bool {
        self.options.is_empty()
    }
}
