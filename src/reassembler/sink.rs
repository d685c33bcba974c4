//! Reassembly sinks.
//!
//! A sink receives fragment payloads strictly in index order. What a
//! reassembler can do with its sink is decided by which capability traits
//! the sink implements:
//!
//! - [`FragmentSink`] - append-write, plus a `close` run on completion
//! - [`DrainableSink`] - in-memory sinks whose contents can be read back

use std::fs::File;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use bytes::{Bytes, BytesMut};
use tracing::debug;

use crate::error::FragmentError;

/// A destination for reassembled bytes.
pub trait FragmentSink {
    /// Appends one fragment payload.
    fn write_fragment(&mut self, data: &[u8]) -> io::Result<()>;

    /// Releases any resource held by the sink.
    ///
    /// Called by the reassembler once every fragment has been written, or
    /// explicitly through [`Reassembler::close`](crate::Reassembler::close).
    /// Implementations must tolerate repeated calls.
    fn close(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// A sink that keeps the reassembled bytes in memory.
pub trait DrainableSink: FragmentSink {
    /// Returns everything written so far.
    fn contents(&self) -> &[u8];
}

/// An in-memory sink backed by [`BytesMut`].
#[derive(Debug, Default)]
pub struct MemorySink {
    buf: BytesMut,
}

impl MemorySink {
    /// Creates an empty sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty sink with room for `capacity` bytes.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            buf: BytesMut::with_capacity(capacity),
        }
    }

    /// Consumes the sink and returns its contents.
    pub fn into_bytes(self) -> Bytes {
        self.buf.freeze()
    }
}

impl FragmentSink for MemorySink {
    fn write_fragment(&mut self, data: &[u8]) -> io::Result<()> {
        self.buf.extend_from_slice(data);
        Ok(())
    }
}

impl DrainableSink for MemorySink {
    fn contents(&self) -> &[u8] {
        &self.buf
    }
}

/// A sink that writes to a file it created, closing it on completion.
///
/// Writes after [`close`](FragmentSink::close) fail with an I/O error.
#[derive(Debug)]
pub struct FileSink {
    path: PathBuf,
    file: Option<File>,
}

impl FileSink {
    /// Creates (or truncates) the file at `path`.
    ///
    /// # Errors
    ///
    /// - [`FragmentError::IsDirectory`] if `path` is a directory
    /// - [`FragmentError::NotFound`] if the parent directory does not exist
    /// - [`FragmentError::PermissionDenied`] if the file cannot be created
    /// - [`FragmentError::Open`] for any other filesystem failure
    pub fn create(path: impl AsRef<Path>) -> Result<Self, FragmentError> {
        let path = path.as_ref();
        if path.is_dir() {
            return Err(FragmentError::IsDirectory {
                path: path.to_path_buf(),
            });
        }

        let file = File::create(path).map_err(|e| FragmentError::from_open(path.to_path_buf(), e))?;
        debug!(path = %path.display(), "file sink created");

        Ok(Self {
            path: path.to_path_buf(),
            file: Some(file),
        })
    }

    /// Returns the path of the underlying file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Returns true once the file has been closed.
    pub fn is_closed(&self) -> bool {
        self.file.is_none()
    }
}

impl FragmentSink for FileSink {
    fn write_fragment(&mut self, data: &[u8]) -> io::Result<()> {
        match self.file.as_mut() {
            Some(file) => file.write_all(data),
            None => Err(io::Error::other(format!(
                "file sink {} is closed",
                self.path.display()
            ))),
        }
    }

    fn close(&mut self) -> io::Result<()> {
        if let Some(mut file) = self.file.take() {
            file.flush()?;
            file.sync_all()?;
            debug!(path = %self.path.display(), "file sink closed");
        }
        Ok(())
    }
}

/// A sink over any [`Write`] implementation.
///
/// `close` flushes the writer but keeps it; recover it with
/// [`into_inner`](Self::into_inner).
#[derive(Debug)]
pub struct WriterSink<W> {
    writer: W,
}

impl<W: Write> WriterSink<W> {
    /// Wraps a writer.
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    /// Returns a reference to the writer.
    pub fn get_ref(&self) -> &W {
        &self.writer
    }

    /// Consumes the sink and returns the writer.
    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> FragmentSink for WriterSink<W> {
    fn write_fragment(&mut self, data: &[u8]) -> io::Result<()> {
        self.writer.write_all(data)
    }

    fn close(&mut self) -> io::Result<()> {
        self.writer.flush()
    }
}
