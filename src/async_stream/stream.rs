//! Async stream adapter for fragmentation.
//!
//! Unlike [`Fragmenter`](crate::Fragmenter), the stream makes a single pass
//! from the reader's current position and cannot be restarted; create a new
//! stream over a rewound reader for another pass.
//!
//! # Example
//!
//! ```ignore
//! use futures_util::StreamExt;
//! use fragmentrs::{fragment_async, FragmentConfig, Reassembler};
//! use futures_io::AsyncRead;
//!
//! async fn demo<R: AsyncRead + Unpin>(reader: R, len: u64) -> Result<(), fragmentrs::FragmentError> {
//!     let config = FragmentConfig::new(64 * 1024);
//!     let mut reassembler = Reassembler::in_memory(config.fragment_count(len));
//!     let mut stream = fragment_async(reader, len, config);
//!
//!     while let Some(fragment) = stream.next().await {
//!         reassembler.add_fragment(&fragment?)?;
//!     }
//!     Ok(())
//! }
//! ```

use std::io;
use std::pin::Pin;
use std::task::{Context, Poll};

use bytes::Bytes;
use futures_core::Stream;
use futures_io::AsyncRead;
use pin_project_lite::pin_project;
use tracing::trace;

use crate::config::FragmentConfig;
use crate::error::FragmentError;
use crate::fragment::Fragment;

pin_project! {
    /// A stream that yields fixed-size fragments from an async reader.
    ///
    /// Each window is filled across as many reads as it takes, so the
    /// fragment boundaries match the synchronous [`Fragmenter`](crate::Fragmenter)
    /// for the same bytes and fragment size.
    pub struct FragmentStream<R> {
        #[pin]
        reader: R,
        window: Vec<u8>,
        filled: usize,
        index: u64,
        total: u64,
        eof: bool,
        finished: bool,
    }
}

impl<R: AsyncRead> FragmentStream<R> {
    /// Creates a new fragment stream.
    ///
    /// # Arguments
    ///
    /// * `reader` - An async reader implementing `AsyncRead`
    /// * `len` - Number of bytes the reader will produce
    /// * `config` - The fragmentation configuration
    pub fn new(reader: R, len: u64, config: FragmentConfig) -> Self {
        Self {
            reader,
            window: vec![0u8; config.fragment_size()],
            filled: 0,
            index: 0,
            total: config.fragment_count(len),
            eof: false,
            finished: false,
        }
    }

    /// Returns the number of fragments the stream is expected to yield.
    pub fn total(&self) -> u64 {
        self.total
    }
}

impl<R: AsyncRead> Stream for FragmentStream<R> {
    type Item = Result<Fragment, FragmentError>;

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        let mut this = self.project();

        if *this.finished {
            return Poll::Ready(None);
        }

        while !*this.eof && *this.filled < this.window.len() {
            let buf = &mut this.window[*this.filled..];
            match this.reader.as_mut().poll_read(cx, buf) {
                Poll::Pending => return Poll::Pending,
                Poll::Ready(Ok(0)) => *this.eof = true,
                Poll::Ready(Ok(n)) => *this.filled += n,
                Poll::Ready(Err(e)) if e.kind() == io::ErrorKind::Interrupted => {}
                Poll::Ready(Err(e)) => {
                    *this.finished = true;
                    return Poll::Ready(Some(Err(e.into())));
                }
            }
        }

        if *this.filled == 0 {
            *this.finished = true;
            return Poll::Ready(None);
        }

        let data = Bytes::copy_from_slice(&this.window[..*this.filled]);
        *this.filled = 0;
        *this.index += 1;
        if *this.eof {
            *this.finished = true;
        }

        trace!(index = *this.index, len = data.len(), "fragment read");
        Poll::Ready(Some(Ok(Fragment::new(*this.index, *this.total, data))))
    }
}

/// Creates a fragment stream from an async reader holding `len` bytes.
///
/// Uses `futures_io::AsyncRead` for runtime-agnostic async I/O. For tokio
/// readers, convert with `tokio_util::compat`:
///
/// ```ignore
/// use tokio_util::compat::TokioAsyncReadCompatExt;
/// use fragmentrs::{fragment_async, FragmentConfig};
///
/// let file = tokio::fs::File::open("file").await?;
/// let len = file.metadata().await?.len();
/// let stream = fragment_async(file.compat(), len, FragmentConfig::default());
/// ```
pub fn fragment_async<R: AsyncRead>(reader: R, len: u64, config: FragmentConfig) -> FragmentStream<R> {
    FragmentStream::new(reader, len, config)
}
