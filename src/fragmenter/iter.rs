//! Lazy fragment iterator.

use std::io::Read;

use bytes::BytesMut;
use tracing::trace;

use crate::error::FragmentError;
use crate::fragment::Fragment;
use crate::util::read_window;

/// An iterator that yields owned fragments from a rewound source.
///
/// Created by [`Fragmenter::iter`](crate::Fragmenter::iter). Each call to
/// `next` reads exactly one window. After the first error the iterator is
/// fused and yields `None`.
///
/// # Example
///
/// ```
/// use fragmentrs::{FragmentConfig, Fragmenter};
///
/// let mut fragmenter = Fragmenter::from_bytes(&b"abcdefg"[..], FragmentConfig::new(3));
///
/// for fragment in fragmenter.iter()? {
///     let fragment = fragment?;
///     println!("{}", fragment);
/// }
/// # Ok::<(), fragmentrs::FragmentError>(())
/// ```
#[derive(Debug)]
pub struct FragmentIter<'a, R> {
    source: &'a mut R,
    fragment_size: usize,
    total: u64,
    index: u64,
    finished: bool,
}

impl<'a, R: Read> FragmentIter<'a, R> {
    pub(crate) fn new(source: &'a mut R, fragment_size: usize, total: u64) -> Self {
        Self {
            source,
            fragment_size,
            total,
            index: 0,
            finished: false,
        }
    }
}

impl<R: Read> Iterator for FragmentIter<'_, R> {
    type Item = Result<Fragment, FragmentError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }

        let mut window = BytesMut::zeroed(self.fragment_size);
        match read_window(&mut *self.source, &mut window) {
            Ok(0) => {
                self.finished = true;
                None
            }
            Ok(n) => {
                window.truncate(n);
                self.index += 1;
                trace!(index = self.index, len = n, "fragment read");
                Some(Ok(Fragment::new(self.index, self.total, window.freeze())))
            }
            Err(e) => {
                self.finished = true;
                Some(Err(e.into()))
            }
        }
    }
}

impl<R: Read> std::iter::FusedIterator for FragmentIter<'_, R> {}
