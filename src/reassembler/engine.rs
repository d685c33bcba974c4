//! Reassembly engine - Reassembler with duplicate suppression and drain.
//!
//! A [`Reassembler`] tracks a write cursor, the lowest fragment index not
//! yet written. Fragments at the cursor are written and hashed at once;
//! fragments ahead of it are copied into a buffer until the cursor reaches
//! them; fragments behind it are dropped as duplicates.
//!
//! # Example
//!
//! ```
//! use fragmentrs::{FragmentConfig, Fragmenter, Reassembler};
//!
//! let data = b"fragments may arrive in any order".to_vec();
//! let mut fragmenter = Fragmenter::from_bytes(data.clone(), FragmentConfig::new(8));
//! let mut fragments = fragmenter.iter()?.collect::<Result<Vec<_>, _>>()?;
//! fragments.reverse();
//!
//! let mut reassembler = Reassembler::in_memory(fragmenter.total());
//! for fragment in &fragments {
//!     reassembler.add(fragment.index, &fragment.data)?;
//! }
//!
//! assert!(reassembler.is_finished());
//! assert_eq!(reassembler.get()?, &data[..]);
//! assert_eq!(reassembler.hash()?, fragmenter.hash()?);
//! # Ok::<(), fragmentrs::FragmentError>(())
//! ```

use std::collections::BTreeMap;
use std::io::Write;
use std::path::Path;

use bytes::Bytes;
use tracing::{debug, trace};

use super::sink::{DrainableSink, FileSink, FragmentSink, MemorySink, WriterSink};
use crate::error::FragmentError;
use crate::fragment::{ContentHash, Fragment};
use crate::hash::Sha256Hasher;

/// What [`Reassembler::add`] did with a fragment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Submission {
    /// The fragment was at the cursor. `count` fragments were written,
    /// itself plus any buffered fragments drained behind it.
    Written {
        /// Number of fragments written by this call.
        count: u64,
    },

    /// The fragment arrived early and was buffered.
    Buffered,

    /// The fragment was already written or buffered and was ignored.
    Duplicate,
}

/// Rebuilds a stream from fragments submitted in any order.
///
/// # Invariants
///
/// - Payloads reach the sink in index order, each at most once.
/// - The hash state always covers exactly fragments `1..next_expected()`.
/// - [`is_finished`](Self::is_finished) holds iff every fragment was written.
///
/// A `Reassembler` is meant for single-threaded use. Share it across threads
/// only behind a lock.
#[derive(Debug)]
pub struct Reassembler<S> {
    sink: S,
    total: u64,
    next: u64,
    pending: BTreeMap<u64, Bytes>,
    hasher: Sha256Hasher,
    closed: bool,
}

impl<S: FragmentSink> Reassembler<S> {
    /// Creates a reassembler expecting `total` fragments.
    ///
    /// A total of `0` is legal; such a reassembler is finished from the start
    /// and rejects every fragment.
    pub fn new(sink: S, total: u64) -> Self {
        debug!(total, "reassembler created");
        Self {
            sink,
            total,
            next: 1,
            pending: BTreeMap::new(),
            hasher: Sha256Hasher::new(),
            closed: false,
        }
    }

    /// Submits fragment `index` with payload `data`.
    ///
    /// The payload is copied when buffered, so the caller may reuse `data`
    /// as soon as this returns. Once the last missing fragment is written the
    /// sink is closed; callers must not write to or close the underlying
    /// resource themselves afterwards.
    ///
    /// # Errors
    ///
    /// Validation happens before any state changes:
    ///
    /// - [`FragmentError::InvalidIndex`] if `index == 0`
    /// - [`FragmentError::OutOfBounds`] if `index > total`
    /// - [`FragmentError::EmptyFragment`] if `data` is empty
    ///
    /// A failed sink write returns [`FragmentError::Io`]. Every fragment
    /// written before the failure stays written; the failing one is kept (or
    /// stays buffered) and may be submitted again.
    pub fn add(&mut self, index: u64, data: &[u8]) -> Result<Submission, FragmentError> {
        if index == 0 {
            return Err(FragmentError::InvalidIndex);
        }
        if index > self.total {
            return Err(FragmentError::OutOfBounds {
                index,
                total: self.total,
            });
        }
        if data.is_empty() {
            return Err(FragmentError::EmptyFragment { index });
        }

        if index < self.next {
            trace!(index, "duplicate fragment ignored");
            return Ok(Submission::Duplicate);
        }

        if index > self.next {
            if self.pending.contains_key(&index) {
                trace!(index, "duplicate fragment ignored");
                return Ok(Submission::Duplicate);
            }
            trace!(index, next = self.next, "fragment buffered");
            self.pending.insert(index, Bytes::copy_from_slice(data));
            return Ok(Submission::Buffered);
        }

        // A copy already buffered at the cursor is left over from a failed
        // drain and takes precedence over the resubmitted payload.
        let mut count = 0;
        if !self.pending.contains_key(&index) {
            self.deliver(data)?;
            count += 1;
        }
        count += self.drain()?;
        trace!(count, next = self.next, "fragments written");

        if self.is_finished() {
            debug!(total = self.total, "reassembly complete");
            self.close()?;
        }

        Ok(Submission::Written { count })
    }

    /// Submits a fragment produced by a [`Fragmenter`](crate::Fragmenter).
    ///
    /// # Errors
    ///
    /// Returns [`FragmentError::TotalMismatch`] if the fragment belongs to a
    /// stream of a different size, otherwise as [`add`](Self::add).
    pub fn add_fragment(&mut self, fragment: &Fragment) -> Result<Submission, FragmentError> {
        if fragment.total != self.total {
            return Err(FragmentError::TotalMismatch {
                index: fragment.index,
                expected: self.total,
                actual: fragment.total,
            });
        }
        self.add(fragment.index, &fragment.data)
    }

    /// Closes the sink. Safe to call more than once.
    ///
    /// This runs automatically when the last fragment is written.
    pub fn close(&mut self) -> Result<(), FragmentError> {
        if !self.closed {
            self.sink.close()?;
            self.closed = true;
        }
        Ok(())
    }

    /// Writes buffered fragments for as long as the buffer holds the cursor.
    fn drain(&mut self) -> Result<u64, FragmentError> {
        let mut count = 0;
        while let Some(data) = self.pending.remove(&self.next) {
            if let Err(e) = self.deliver(&data) {
                self.pending.insert(self.next, data);
                return Err(e);
            }
            count += 1;
        }
        Ok(count)
    }

    fn deliver(&mut self, data: &[u8]) -> Result<(), FragmentError> {
        self.sink.write_fragment(data)?;
        self.hasher.update(data);
        self.next += 1;
        Ok(())
    }
}

impl<S> Reassembler<S> {
    /// Returns true once every fragment has been written.
    pub fn is_finished(&self) -> bool {
        self.next - 1 == self.total
    }

    /// Returns how many fragments are neither written nor buffered.
    ///
    /// This is `total - written - buffered`. It is a lower bound on what is
    /// still absent; it does not tell which indices are missing.
    pub fn missing(&self) -> u64 {
        // A fragment left at the cursor by a failed drain is still unwritten.
        let stalled = u64::from(self.pending.contains_key(&self.next));
        self.total
            .saturating_sub(self.next - 1)
            .saturating_sub(self.pending.len() as u64)
            + stalled
    }

    /// Returns the SHA-256 digest of the reassembled stream.
    ///
    /// # Errors
    ///
    /// Returns [`FragmentError::MissingFragments`] if [`missing`](Self::missing)
    /// is non-zero.
    pub fn hash(&self) -> Result<ContentHash, FragmentError> {
        self.ensure_complete()?;
        Ok(self.hasher.finalize())
    }

    /// Returns the expected number of fragments.
    pub fn total(&self) -> u64 {
        self.total
    }

    /// Returns the lowest index not yet written.
    pub fn next_expected(&self) -> u64 {
        self.next
    }

    /// Returns the number of fragments held ahead of the cursor.
    pub fn buffered(&self) -> usize {
        self.pending.len()
    }

    /// Returns a reference to the sink.
    pub fn sink(&self) -> &S {
        &self.sink
    }

    /// Consumes the reassembler and returns the sink.
    pub fn into_sink(self) -> S {
        self.sink
    }

    fn ensure_complete(&self) -> Result<(), FragmentError> {
        match self.missing() {
            0 => Ok(()),
            missing => Err(FragmentError::MissingFragments { missing }),
        }
    }
}

impl<S: DrainableSink> Reassembler<S> {
    /// Returns the reassembled bytes.
    ///
    /// # Errors
    ///
    /// Returns [`FragmentError::MissingFragments`] if [`missing`](Self::missing)
    /// is non-zero.
    pub fn get(&self) -> Result<&[u8], FragmentError> {
        self.ensure_complete()?;
        Ok(self.sink.contents())
    }
}

impl Reassembler<MemorySink> {
    /// Creates a reassembler that collects the stream in memory.
    pub fn in_memory(total: u64) -> Self {
        Self::new(MemorySink::new(), total)
    }
}

impl Reassembler<FileSink> {
    /// Creates a reassembler that writes to a new file at `path`.
    ///
    /// The file is closed automatically once every fragment is written.
    ///
    /// # Errors
    ///
    /// See [`FileSink::create`].
    pub fn create(path: impl AsRef<Path>, total: u64) -> Result<Self, FragmentError> {
        Ok(Self::new(FileSink::create(path)?, total))
    }
}

impl<W: Write> Reassembler<WriterSink<W>> {
    /// Creates a reassembler over any writer.
    pub fn from_writer(writer: W, total: u64) -> Self {
        Self::new(WriterSink::new(writer), total)
    }
}
