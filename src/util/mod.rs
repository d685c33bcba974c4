//! Internal utility functions and helpers.
//!
//! This module contains small helper functions used throughout the crate.
//! It is an implementation detail and not part of the public API.

use std::io::{self, Read};

/// Fills `buf` from `reader` until it is full or the reader reports EOF.
///
/// Returns the number of bytes read. A short count means EOF was reached;
/// `0` means no bytes remained. `Interrupted` reads are retried.
pub(crate) fn read_window<R: Read + ?Sized>(reader: &mut R, buf: &mut [u8]) -> io::Result<usize> {
    let mut filled = 0;
    while filled < buf.len() {
        match reader.read(&mut buf[filled..]) {
            Ok(0) => break,
            Ok(n) => filled += n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(e),
        }
    }
    Ok(filled)
}
