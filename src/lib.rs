//! fragmentrs
//!
//! Fixed-size fragmentation and order-tolerant reassembly of byte streams.
//!
//! `fragmentrs` splits a seekable source into a numbered sequence of
//! fragments and, on the other side of some channel, puts those fragments
//! back together. It is designed for chunked transfer over transports that
//! may reorder or duplicate messages:
//!
//! - [`Fragmenter`] lazily yields `(index, total, payload)` in order and can
//!   hash the whole source
//! - [`Reassembler`] accepts fragments in any order, drops duplicates,
//!   writes to its sink strictly in order and hashes what it wrote
//!
//! Indices are 1-based and dense over `1..=total`; concatenating payloads in
//! index order reproduces the source. Both sides compute the SHA-256 of the
//! full stream, so a transfer is verified by comparing two [`ContentHash`]es.
//!
//! The crate intentionally:
//! - does NOT deliver fragments over any transport
//! - does NOT retransmit or request missing fragments
//! - does NOT encrypt or compress
//! - does NOT manage concurrency
//!
//! # Sync
//!
//! ```no_run
//! use fragmentrs::{FragmentConfig, FragmentError, Fragmenter, Reassembler};
//!
//! fn main() -> Result<(), FragmentError> {
//!     let mut fragmenter = Fragmenter::open("data.bin", FragmentConfig::default())?;
//!     let mut reassembler = Reassembler::create("copy.bin", fragmenter.total())?;
//!
//!     fragmenter.each(|index, _total, data| reassembler.add(index, data).map(|_| ()))?;
//!
//!     assert_eq!(reassembler.hash()?, fragmenter.hash()?);
//!     Ok(())
//! }
//! ```
//!
//! # Async (feature = "async-io")
//!
//! ```ignore
//! use futures_util::StreamExt;
//! use fragmentrs::{fragment_async, FragmentConfig};
//! use futures_io::AsyncRead;
//!
//! async fn demo<R: AsyncRead + Unpin>(reader: R, len: u64) -> Result<(), fragmentrs::FragmentError> {
//!     let mut stream = fragment_async(reader, len, FragmentConfig::default());
//!
//!     while let Some(fragment) = stream.next().await {
//!         let fragment = fragment?;
//!         println!("{}", fragment);
//!     }
//!     Ok(())
//! }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod config;
mod error;
mod fragment;
mod fragmenter;
mod reassembler;

mod hash; // internal sha-256 impl
mod util;

#[cfg(feature = "async-io")]
mod async_stream;

//
// Public surface
//

pub use config::{DEFAULT_FRAGMENT_SIZE, FragmentConfig};
pub use error::{FragmentError, HandlerError};
pub use fragment::{ContentHash, Fragment};
pub use fragmenter::{FragmentIter, Fragmenter};
pub use reassembler::{
    DrainableSink, FileSink, FragmentSink, MemorySink, Reassembler, Submission, WriterSink,
};

#[cfg(feature = "async-io")]
pub use async_stream::{FragmentStream, fragment_async};

/// The crate version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
