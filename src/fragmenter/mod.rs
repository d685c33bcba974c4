//! Fixed-size fragmentation of seekable sources.
//!
//! - [`Fragmenter`] - Splits a source into numbered fragments and hashes it
//! - [`FragmentIter`] - Lazy iterator over owned [`Fragment`](crate::Fragment)s

mod engine;
mod iter;

pub use engine::Fragmenter;
pub use iter::FragmentIter;
