//! SHA-256 stream hashing implementation.

use sha2::{Digest, Sha256};

use crate::fragment::ContentHash;

/// An incremental SHA-256 hasher.
#[derive(Debug, Clone, Default)]
pub struct Sha256Hasher {
    state: Sha256,
}

impl Sha256Hasher {
    /// Creates a new hasher.
    pub fn new() -> Self {
        Self {
            state: Sha256::new(),
        }
    }

    /// Updates the hasher with more data.
    pub fn update(&mut self, data: &[u8]) {
        self.state.update(data);
    }

    /// Returns the digest of everything fed so far.
    ///
    /// The running state is left untouched, so more data can follow.
    pub fn finalize(&self) -> ContentHash {
        ContentHash::new(self.state.clone().finalize().into())
    }

    /// Convenience method to hash data in one shot.
    #[allow(dead_code)]
    pub(crate) fn hash(data: &[u8]) -> ContentHash {
        ContentHash::new(Sha256::digest(data).into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EMPTY: &str = "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855";
    const ABC: &str = "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad";

    #[test]
    fn test_known_vectors() {
        assert_eq!(Sha256Hasher::new().finalize().to_hex(), EMPTY);
        assert_eq!(Sha256Hasher::hash(b"abc").to_hex(), ABC);
    }

    #[test]
    fn test_incremental_hashing() {
        let mut hasher = Sha256Hasher::new();
        hasher.update(b"a");
        hasher.update(b"bc");
        assert_eq!(hasher.finalize().to_hex(), ABC);
    }

    #[test]
    fn test_finalize_keeps_state() {
        let mut hasher = Sha256Hasher::new();
        hasher.update(b"ab");
        let _ = hasher.finalize();
        hasher.update(b"c");
        assert_eq!(hasher.finalize(), Sha256Hasher::hash(b"abc"));
    }
}
