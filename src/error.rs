use std::io;
use std::path::PathBuf;

use image::ImageError;

use crate::codec::reader::DecodeAttempts;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Input path '{}' is not accessible: {}", .0.display(), .1)]
    InputPathUnavailable(PathBuf, #[source] io::Error),
    #[error("Unable to read input file '{}': {}", .0.display(), .1)]
    ReadFailed(PathBuf, #[source] io::Error),
    #[error("Unable to decode image '{}' (tried {})", .0.display(), .1)]
    DecodeFailed(PathBuf, DecodeAttempts),
    #[error("Unable to open output file '{}' for writing: {}", .0.display(), .1)]
    CreateFailed(PathBuf, #[source] io::Error),
    #[error("Unable to encode PNG into '{}': {}", .0.display(), .1)]
    EncodeFailed(PathBuf, #[source] ImageError),
    #[error("Unable to sync output file '{}' to disk: {}", .0.display(), .1)]
    SyncFailed(PathBuf, #[source] io::Error),
    #[error("Unable to list directory '{}': {}", .0.display(), .1)]
    ListFailed(PathBuf, #[source] io::Error),
    #[error("Unable to create output directory '{}': {}", .0.display(), .1)]
    MkdirFailed(PathBuf, #[source] io::Error),
    #[error("Output file '{}' not found after conversion: {}", .0.display(), .1)]
    OutputMissing(PathBuf, #[source] io::Error),
    #[error("Output file '{}' is empty after conversion", .0.display())]
    OutputEmpty(PathBuf),
    #[error("Unable to write error report '{}': {}", .0.display(), .1)]
    ReportFailed(PathBuf, #[source] io::Error),
}

impl Error {
    /// Batch-fatal errors abort a directory run before any file is converted.
    pub fn is_batch_fatal(&self) -> bool {
        matches!(self, Self::ListFailed(..) | Self::MkdirFailed(..))
    }
}

#[cfg(test)]
mod tests {
    use std::io;
    use std::path::PathBuf;

    use super::Error;

    #[test]
    fn display_contains_path_and_cause() {
        let error = Error::ReadFailed(
            PathBuf::from("/photos/cat.webp"),
            io::Error::new(io::ErrorKind::NotFound, "no such file"),
        );
        let message = error.to_string();
        assert!(message.contains("/photos/cat.webp"));
        assert!(message.contains("no such file"));
    }

    #[test]
    fn output_empty_display() {
        let error = Error::OutputEmpty(PathBuf::from("out/cat.png"));
        assert_eq!(
            error.to_string(),
            "Output file 'out/cat.png' is empty after conversion"
        );
    }

    #[test]
    fn only_listing_and_mkdir_are_batch_fatal() {
        let io_error = || io::Error::new(io::ErrorKind::PermissionDenied, "denied");
        assert!(Error::ListFailed(PathBuf::from("in"), io_error()).is_batch_fatal());
        assert!(Error::MkdirFailed(PathBuf::from("out"), io_error()).is_batch_fatal());
        assert!(!Error::ReadFailed(PathBuf::from("a.webp"), io_error()).is_batch_fatal());
        assert!(!Error::OutputEmpty(PathBuf::from("a.png")).is_batch_fatal());
    }
}
