//! Fragmentation engine - Fragmenter with callback and iterator APIs.
//!
//! A [`Fragmenter`] owns a seekable source and splits it into fixed-size
//! windows. Every pass over the source starts by rewinding it, so any number
//! of passes produce the same sequence:
//!
//! - `each()` - Calls a handler with `(index, total, payload)` per fragment
//! - `iter()` - Yields owned [`Fragment`]s lazily
//! - `hash()` - SHA-256 of the whole source, computed once and cached
//!
//! # Example
//!
//! ```
//! use fragmentrs::{FragmentConfig, Fragmenter};
//!
//! let mut fragmenter = Fragmenter::from_bytes(&b"hello world"[..], FragmentConfig::new(4));
//! assert_eq!(fragmenter.total(), 3);
//!
//! let mut sizes = Vec::new();
//! fragmenter.each(|_index, _total, data| {
//!     sizes.push(data.len());
//!     Ok::<(), std::convert::Infallible>(())
//! })?;
//! assert_eq!(sizes, vec![4, 4, 3]);
//! # Ok::<(), fragmentrs::FragmentError>(())
//! ```

use std::fs::File;
use std::io::{Cursor, Read, Seek, SeekFrom};
use std::path::Path;

use bytes::Bytes;
use tracing::debug;

use super::FragmentIter;
use crate::config::FragmentConfig;
use crate::error::{FragmentError, HandlerError};
use crate::fragment::ContentHash;
use crate::hash::Sha256Hasher;
use crate::util::read_window;

/// Splits a seekable source into a numbered sequence of fixed-size fragments.
///
/// The fragment count is fixed at construction from the source length:
/// `ceil(len / fragment_size)`, or `0` for an empty source. Nothing is read
/// until a pass is requested.
///
/// A `Fragmenter` is meant for single-threaded use; every pass takes
/// `&mut self` because it moves the source's cursor.
#[derive(Debug)]
pub struct Fragmenter<R> {
    source: R,
    len: u64,
    total: u64,
    config: FragmentConfig,
    hash: Option<ContentHash>,
}

impl<R: Read + Seek> Fragmenter<R> {
    /// Creates a fragmenter over `source`, which holds `len` bytes.
    ///
    /// # Arguments
    ///
    /// * `source` - Any type implementing [`Read`] and [`Seek`]
    /// * `len` - Number of bytes in the source
    /// * `config` - The fragmentation configuration
    pub fn new(source: R, len: u64, config: FragmentConfig) -> Self {
        let total = config.fragment_count(len);
        debug!(len, total, fragment_size = config.fragment_size(), "fragmenter created");

        Self {
            source,
            len,
            total,
            config,
            hash: None,
        }
    }

    /// Creates a fragmenter, measuring the source length by seeking to its end.
    ///
    /// # Errors
    ///
    /// Returns [`FragmentError::Io`] if the source cannot be seeked.
    pub fn from_reader(mut source: R, config: FragmentConfig) -> Result<Self, FragmentError> {
        let len = source.seek(SeekFrom::End(0))?;
        source.seek(SeekFrom::Start(0))?;
        Ok(Self::new(source, len, config))
    }

    /// Calls `handler` once per fragment, in ascending index order from 1.
    ///
    /// The handler receives `(index, total, payload)`. The payload slice is
    /// only valid for the duration of the call; copy it to keep it. The last
    /// payload may be shorter than the fragment size.
    ///
    /// The source is rewound before the first read, so calling `each` again
    /// yields the same sequence as long as the source content is unchanged.
    ///
    /// # Errors
    ///
    /// - [`FragmentError::Rewind`] or [`FragmentError::Io`] if the source
    ///   cannot be rewound or read
    /// - [`FragmentError::Handler`] wrapping the first error the handler
    ///   returns; no further fragments are read after it
    pub fn each<F, E>(&mut self, mut handler: F) -> Result<(), FragmentError>
    where
        F: FnMut(u64, u64, &[u8]) -> Result<(), E>,
        E: Into<HandlerError>,
    {
        self.rewind()?;
        debug!(total = self.total, "iterating fragments");

        let mut window = vec![0u8; self.config.fragment_size()];
        let mut index = 0u64;

        loop {
            let n = read_window(&mut self.source, &mut window)?;
            if n == 0 {
                break;
            }
            index += 1;

            if let Err(e) = handler(index, self.total, &window[..n]) {
                let err = e.into();
                debug!(index, error = %err, "fragment handler aborted iteration");
                return Err(FragmentError::Handler(err));
            }
        }

        debug!(fragments = index, "iteration complete");
        Ok(())
    }

    /// Returns a lazy iterator over owned fragments.
    ///
    /// The source is rewound first. Each call to `next` reads one window.
    ///
    /// # Errors
    ///
    /// Returns an error if the source cannot be rewound.
    pub fn iter(&mut self) -> Result<FragmentIter<'_, R>, FragmentError> {
        self.rewind()?;
        Ok(FragmentIter::new(
            &mut self.source,
            self.config.fragment_size(),
            self.total,
        ))
    }

    /// Returns the SHA-256 digest of the whole source.
    ///
    /// The first call runs its own full pass over the source. The result is
    /// cached; later calls return it without touching the source.
    ///
    /// # Errors
    ///
    /// Returns an error if the pass fails. Nothing is cached in that case.
    pub fn hash(&mut self) -> Result<ContentHash, FragmentError> {
        if let Some(hash) = self.hash {
            return Ok(hash);
        }

        let mut hasher = Sha256Hasher::new();
        self.each(|_, _, data| {
            hasher.update(data);
            Ok::<(), std::convert::Infallible>(())
        })?;

        let hash = hasher.finalize();
        debug!(%hash, "source hashed");
        self.hash = Some(hash);
        Ok(hash)
    }

    /// Seeks the source back to offset 0.
    fn rewind(&mut self) -> Result<(), FragmentError> {
        let position = self.source.seek(SeekFrom::Start(0))?;
        if position != 0 {
            return Err(FragmentError::Rewind { position });
        }
        Ok(())
    }
}

impl<R> Fragmenter<R> {
    /// Returns the number of fragments the source splits into.
    pub fn total(&self) -> u64 {
        self.total
    }

    /// Returns the configured fragment size in bytes.
    pub fn fragment_size(&self) -> usize {
        self.config.fragment_size()
    }

    /// Returns the source length in bytes, as known at construction.
    pub fn len(&self) -> u64 {
        self.len
    }

    /// Returns true if the source is empty.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns the configuration used by this fragmenter.
    pub fn config(&self) -> &FragmentConfig {
        &self.config
    }

    /// Consumes the fragmenter and returns the source.
    pub fn into_inner(self) -> R {
        self.source
    }
}

impl Fragmenter<Cursor<Bytes>> {
    /// Creates a fragmenter over an in-memory buffer.
    ///
    /// # Example
    ///
    /// ```
    /// use fragmentrs::{FragmentConfig, Fragmenter};
    ///
    /// let fragmenter = Fragmenter::from_bytes(vec![0u8; 2048], FragmentConfig::new(1024));
    /// assert_eq!(fragmenter.total(), 2);
    /// ```
    pub fn from_bytes(data: impl Into<Bytes>, config: FragmentConfig) -> Self {
        let data = data.into();
        let len = data.len() as u64;
        Self::new(Cursor::new(data), len, config)
    }
}

impl Fragmenter<File> {
    /// Opens the file at `path` as a fragment source.
    ///
    /// # Errors
    ///
    /// - [`FragmentError::NotFound`] if nothing exists at `path`
    /// - [`FragmentError::PermissionDenied`] if it cannot be accessed
    /// - [`FragmentError::IsDirectory`] if it is a directory
    /// - [`FragmentError::Open`] for any other filesystem failure
    pub fn open(path: impl AsRef<Path>, config: FragmentConfig) -> Result<Self, FragmentError> {
        let path = path.as_ref();

        let metadata = std::fs::metadata(path)
            .map_err(|e| FragmentError::from_open(path.to_path_buf(), e))?;
        if metadata.is_dir() {
            return Err(FragmentError::IsDirectory {
                path: path.to_path_buf(),
            });
        }

        let file = File::open(path).map_err(|e| FragmentError::from_open(path.to_path_buf(), e))?;
        Ok(Self::new(file, metadata.len(), config))
    }
}
