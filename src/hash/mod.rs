//! Stream hashing.
//!
//! Both the fragmenter and the reassembler fold payloads, in index order,
//! into a running SHA-256 state.
//!
//! - [`Sha256Hasher`] - incremental SHA-256 producing a [`ContentHash`](crate::ContentHash)

mod sha256;

pub(crate) use sha256::Sha256Hasher;
