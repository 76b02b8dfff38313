//! # mime
//!
//! Mime type detection

/// Amount of leading bytes handed to the detector
pub const MIME_SAMPLE_SIZE: usize = 65536;

/// Classifies file content
pub trait MimeDetector {
    /// Detect the mime type of `filename`, given the first bytes of its content
    fn detect(&self, filename: &str, content: &[u8]) -> Option<String>;
}

impl<F> MimeDetector for F
where
    F: Fn(&str, &[u8]) -> Option<String>,
{
    fn detect(&self, filename: &str, content: &[u8]) -> Option<String> {
        self(filename, content)
    }
}
