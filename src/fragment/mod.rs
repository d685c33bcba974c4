//! Fragment types.
//!
//! - [`Fragment`] - One indexed slice of a stream, with the stream's fragment count
//! - [`ContentHash`] - 32-byte SHA-256 digest of a whole stream

mod data;
mod hash;

pub use data::Fragment;
pub use hash::ContentHash;
