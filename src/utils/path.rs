//! ## path
//!
//! Logical path utilities

const SEPARATOR: char = '/';

/// Maps logical paths to share paths and back, by prepending or stripping a root segment.
///
/// Share paths are always absolute, so a prefixer with an empty root maps `foo/bar`
/// to `/foo/bar`.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct PathPrefixer {
    prefix: String,
}

impl PathPrefixer {
    pub fn new<S: AsRef<str>>(root: S) -> Self {
        let root = root.as_ref().trim_matches(SEPARATOR);
        let prefix = if root.is_empty() {
            SEPARATOR.to_string()
        } else {
            format!("{SEPARATOR}{root}{SEPARATOR}")
        };
        Self { prefix }
    }

    /// The share path logical paths are relative to, always ending with a separator
    pub fn prefix(&self) -> &str {
        self.prefix.as_str()
    }

    pub fn prefix_path(&self, path: &str) -> String {
        format!("{}{}", self.prefix, path.trim_start_matches(SEPARATOR))
    }

    pub fn prefix_directory_path(&self, path: &str) -> String {
        let path = path.trim_matches(SEPARATOR);
        if path.is_empty() {
            self.prefix.clone()
        } else {
            format!("{}{}{SEPARATOR}", self.prefix, path)
        }
    }

    /// Strip the root from a share path.
    ///
    /// Paths outside of the root are returned without their leading separator.
    pub fn strip_prefix(&self, path: &str) -> String {
        let relative = path
            .strip_prefix(self.prefix.as_str())
            // the root itself, without trailing separator
            .or_else(|| (path == self.prefix.trim_end_matches(SEPARATOR)).then_some(""))
            .unwrap_or(path);
        relative.trim_start_matches(SEPARATOR).to_string()
    }

    pub fn strip_directory_prefix(&self, path: &str) -> String {
        self.strip_prefix(path)
            .trim_end_matches(SEPARATOR)
            .to_string()
    }
}

/// Parent of a logical path; empty for top level entries
pub fn dirname(path: &str) -> &str {
    let path = path.trim_matches(SEPARATOR);
    match path.rfind(SEPARATOR) {
        Some(index) => &path[..index],
        None => "",
    }
}

/// Chain of directories from the top level down to `path` itself.
///
/// `a/b/c` yields `a`, `a/b`, `a/b/c`; empty and `.` segments are skipped.
pub fn ancestors(path: &str) -> Vec<String> {
    let mut chain: Vec<String> = Vec::new();
    for segment in path
        .split(SEPARATOR)
        .filter(|segment| !segment.is_empty() && *segment != ".")
    {
        let next = match chain.last() {
            Some(parent) => format!("{parent}{SEPARATOR}{segment}"),
            None => segment.to_string(),
        };
        chain.push(next);
    }
    chain
}

/// Nesting level of a logical path; top level entries have depth 1
pub fn depth(path: &str) -> usize {
    ancestors(path).len()
}
