//! The Fragment type - one numbered slice of a stream.

use bytes::Bytes;
use std::fmt;

/// A fixed-size slice of a stream together with its position.
///
/// Indices are 1-based and dense over `1..=total`. Concatenating the
/// payloads of all fragments in index order reproduces the source.
///
/// # Example
///
/// ```
/// use fragmentrs::Fragment;
/// use bytes::Bytes;
///
/// let fragment = Fragment::new(1, 2, Bytes::from_static(b"hello"));
///
/// assert_eq!(fragment.len(), 5);
/// assert!(!fragment.is_last());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fragment {
    /// Position of this fragment, starting at 1.
    pub index: u64,

    /// Number of fragments in the stream.
    pub total: u64,

    /// The fragment payload.
    pub data: Bytes,
}

impl Fragment {
    /// Creates a new fragment.
    pub fn new(index: u64, total: u64, data: impl Into<Bytes>) -> Self {
        Self {
            index,
            total,
            data: data.into(),
        }
    }

    /// Returns the length of the payload.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Returns true if the payload is empty.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Returns true if this is the final fragment of its stream.
    pub fn is_last(&self) -> bool {
        self.index == self.total
    }

    /// Returns a reference to the payload.
    pub fn data(&self) -> &Bytes {
        &self.data
    }

    /// Consumes the fragment and returns `(index, total, data)`.
    pub fn into_parts(self) -> (u64, u64, Bytes) {
        (self.index, self.total, self.data)
    }
}

impl fmt::Display for Fragment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Fragment({}/{}, {} bytes)", self.index, self.total, self.len())
    }
}
