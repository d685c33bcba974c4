//! Async streaming support for fragmentation.
//!
//! This module provides asynchronous fragmentation using the
//! `futures-io::AsyncRead` trait, making it runtime-agnostic and compatible
//! with tokio, async-std, smol, and other async runtimes.
//!
//! - [`fragment_async`] - Creates an async stream of fragments from an async reader
//!
//! This module requires the `async-io` feature to be enabled.

mod stream;

pub use stream::{FragmentStream, fragment_async};
