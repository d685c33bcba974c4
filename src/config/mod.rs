//! Configuration for fragmentation.
//!
//! - [`FragmentConfig`] - Controls the number of bytes per fragment
//!
//! # Example
//!
//! ```
//! use fragmentrs::{FragmentConfig, DEFAULT_FRAGMENT_SIZE};
//!
//! // 1 KiB fragments
//! let config = FragmentConfig::new(1024);
//! assert_eq!(config.fragment_count(4096), 4);
//!
//! // Zero means "use the default"
//! let config = FragmentConfig::new(0);
//! assert_eq!(config.fragment_size(), DEFAULT_FRAGMENT_SIZE);
//! ```

/// Default fragment size (1 MiB).
pub const DEFAULT_FRAGMENT_SIZE: usize = 1024 * 1024;

/// Configuration for fixed-size fragmentation.
///
/// `FragmentConfig` is an explicit value passed to every
/// [`Fragmenter`](crate::Fragmenter) constructor. A fragment size of zero is
/// never stored: it resolves to [`DEFAULT_FRAGMENT_SIZE`].
///
/// # Example
///
/// ```
/// use fragmentrs::FragmentConfig;
///
/// let config = FragmentConfig::default().with_fragment_size(4096);
/// assert_eq!(config.fragment_size(), 4096);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FragmentConfig {
    /// Bytes per fragment. The last fragment of a stream may be shorter.
    fragment_size: usize,
}

impl FragmentConfig {
    /// Creates a configuration with the given fragment size.
    ///
    /// A size of zero selects [`DEFAULT_FRAGMENT_SIZE`].
    pub const fn new(fragment_size: usize) -> Self {
        Self {
            fragment_size: if fragment_size == 0 {
                DEFAULT_FRAGMENT_SIZE
            } else {
                fragment_size
            },
        }
    }

    /// Sets the fragment size. Zero selects [`DEFAULT_FRAGMENT_SIZE`].
    pub const fn with_fragment_size(self, fragment_size: usize) -> Self {
        Self::new(fragment_size)
    }

    /// Returns the fragment size in bytes.
    pub const fn fragment_size(&self) -> usize {
        self.fragment_size
    }

    /// Returns the number of fragments a source of `len` bytes splits into.
    ///
    /// This is `ceil(len / fragment_size)`, and `0` only for an empty source.
    ///
    /// ```
    /// use fragmentrs::FragmentConfig;
    ///
    /// let config = FragmentConfig::new(1024);
    /// assert_eq!(config.fragment_count(0), 0);
    /// assert_eq!(config.fragment_count(1), 1);
    /// assert_eq!(config.fragment_count(1025), 2);
    /// ```
    pub const fn fragment_count(&self, len: u64) -> u64 {
        len.div_ceil(self.fragment_size as u64)
    }
}

impl Default for FragmentConfig {
    fn default() -> Self {
        Self::new(DEFAULT_FRAGMENT_SIZE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = FragmentConfig::default();
        assert_eq!(config.fragment_size(), DEFAULT_FRAGMENT_SIZE);
    }

    #[test]
    fn test_zero_resolves_to_default() {
        assert_eq!(FragmentConfig::new(0), FragmentConfig::default());
        assert_eq!(
            FragmentConfig::new(16).with_fragment_size(0).fragment_size(),
            DEFAULT_FRAGMENT_SIZE
        );
    }

    #[test]
    fn test_fragment_count_exact_multiple() {
        let config = FragmentConfig::new(30);
        assert_eq!(config.fragment_count(90), 3);
        assert_eq!(config.fragment_count(100), 4);
    }

    #[test]
    fn test_fragment_count_default_size() {
        let config = FragmentConfig::default();
        assert_eq!(config.fragment_count(DEFAULT_FRAGMENT_SIZE as u64 * 2), 2);
        assert_eq!(config.fragment_count(DEFAULT_FRAGMENT_SIZE as u64 * 2 + 1), 3);
    }
}
