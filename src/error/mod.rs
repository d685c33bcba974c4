//! Error types for fragmentrs.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Boxed error returned by a caller-supplied fragment handler.
pub type HandlerError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Errors that can occur while fragmenting or reassembling a stream.
#[derive(Debug, Error)]
pub enum FragmentError {
    /// An I/O error occurred while seeking, reading or writing.
    #[error("io error: {0}")]
    Io(#[from] io::Error),

    /// The path given to a file constructor does not exist.
    #[error("path {} does not exist", .path.display())]
    NotFound {
        /// The path that was looked up.
        path: PathBuf,
    },

    /// The path exists but cannot be accessed.
    #[error("permission denied for {}: {source}", .path.display())]
    PermissionDenied {
        /// The path that was accessed.
        path: PathBuf,
        /// The underlying filesystem error.
        source: io::Error,
    },

    /// The path names a directory where a file was expected.
    #[error("path {} is a directory", .path.display())]
    IsDirectory {
        /// The offending path.
        path: PathBuf,
    },

    /// Any other failure opening or creating a file.
    #[error("failed to open {}: {source}", .path.display())]
    Open {
        /// The path that was opened.
        path: PathBuf,
        /// The underlying filesystem error.
        source: io::Error,
    },

    /// Rewinding the source did not land on offset 0.
    #[error("failed to seek to beginning of source (landed at offset {position})")]
    Rewind {
        /// The offset the source reported after the seek.
        position: u64,
    },

    /// The fragment handler passed to `each` returned an error.
    #[error("fragment handler failed: {0}")]
    Handler(#[source] HandlerError),

    /// Fragment indices start at 1.
    #[error("fragment index should be greater than 0")]
    InvalidIndex,

    /// The fragment index is larger than the expected total.
    #[error("fragment {index} is out of bounds (total {total})")]
    OutOfBounds {
        /// The submitted index.
        index: u64,
        /// The expected fragment count.
        total: u64,
    },

    /// The fragment carried no payload.
    #[error("fragment {index} is empty")]
    EmptyFragment {
        /// The submitted index.
        index: u64,
    },

    /// The fragment was produced for a stream of a different size.
    #[error("fragment {index} belongs to a stream of {actual} fragments, expected {expected}")]
    TotalMismatch {
        /// The submitted index.
        index: u64,
        /// The total the reassembler was created with.
        expected: u64,
        /// The total carried by the fragment.
        actual: u64,
    },

    /// Some fragments have neither been written nor buffered yet.
    #[error("missing {missing} fragment(s)")]
    MissingFragments {
        /// Lower bound on the number of absent fragments.
        missing: u64,
    },
}

impl FragmentError {
    /// Returns true for errors raised by fragment validation in
    /// [`Reassembler::add`](crate::Reassembler::add).
    ///
    /// These never change reassembler state.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            FragmentError::InvalidIndex
                | FragmentError::OutOfBounds { .. }
                | FragmentError::EmptyFragment { .. }
                | FragmentError::TotalMismatch { .. }
        )
    }

    /// Returns true if this error came from the underlying source or sink.
    pub fn is_io(&self) -> bool {
        matches!(self, FragmentError::Io(_) | FragmentError::Rewind { .. })
    }

    /// Maps a filesystem error for `path` onto the matching construction error.
    pub(crate) fn from_open(path: PathBuf, err: io::Error) -> Self {
        match err.kind() {
            io::ErrorKind::NotFound => FragmentError::NotFound { path },
            io::ErrorKind::PermissionDenied => FragmentError::PermissionDenied { path, source: err },
            io::ErrorKind::IsADirectory => FragmentError::IsDirectory { path },
            _ => FragmentError::Open { path, source: err },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_io_error_conversion() {
        let io_err = io::Error::new(io::ErrorKind::UnexpectedEof, "test");
        let err: FragmentError = io_err.into();
        assert!(matches!(err, FragmentError::Io(_)));
        assert!(err.is_io());
    }

    #[test]
    fn test_missing_display() {
        let err = FragmentError::MissingFragments { missing: 1 };
        assert_eq!(err.to_string(), "missing 1 fragment(s)");
    }

    #[test]
    fn test_validation_class() {
        assert!(FragmentError::InvalidIndex.is_validation());
        assert!(FragmentError::EmptyFragment { index: 3 }.is_validation());
        assert!(!FragmentError::MissingFragments { missing: 2 }.is_validation());
    }

    #[test]
    fn test_from_open_classifies() {
        let path = PathBuf::from("/nowhere");
        let err = FragmentError::from_open(path.clone(), io::ErrorKind::NotFound.into());
        assert!(matches!(err, FragmentError::NotFound { .. }));

        let err = FragmentError::from_open(path, io::ErrorKind::PermissionDenied.into());
        assert!(matches!(err, FragmentError::PermissionDenied { .. }));
    }

    #[test]
    fn test_handler_source_is_preserved() {
        let inner: HandlerError = "stop".into();
        let err = FragmentError::Handler(inner);
        let source = std::error::Error::source(&err).expect("handler error has a source");
        assert_eq!(source.to_string(), "stop");
    }
}
