// Integration tests for the Fragmenter
// Tests cover: fragment counts, window sizes, determinism, hashing, file sources

use std::io::Cursor;

use fragmentrs::{DEFAULT_FRAGMENT_SIZE, FragmentConfig, FragmentError, Fragmenter};
use proptest::prelude::*;
use sha2::{Digest, Sha256};

fn collect(fragmenter: &mut Fragmenter<impl std::io::Read + std::io::Seek>) -> Vec<(u64, u64, Vec<u8>)> {
    let mut out = Vec::new();
    fragmenter
        .each(|index, total, data| {
            out.push((index, total, data.to_vec()));
            Ok::<(), FragmentError>(())
        })
        .expect("iteration should succeed");
    out
}

// ============================================================================
// Fragment Counts and Windows
// ============================================================================

#[test]
fn test_zero_size_uses_default() {
    let fragmenter = Fragmenter::from_bytes(vec![0u8; DEFAULT_FRAGMENT_SIZE * 2], FragmentConfig::new(0));
    assert_eq!(fragmenter.fragment_size(), DEFAULT_FRAGMENT_SIZE);
    assert_eq!(fragmenter.total(), 2);
}

#[test]
fn test_last_window_not_padded() {
    let mut fragmenter = Fragmenter::from_bytes(vec![0xAAu8; 2500], FragmentConfig::new(1024));
    let fragments = collect(&mut fragmenter);

    let sizes: Vec<usize> = fragments.iter().map(|(_, _, d)| d.len()).collect();
    assert_eq!(sizes, vec![1024, 1024, 452], "Final fragment must be passed as-is");
}

#[test]
fn test_empty_source() {
    let mut fragmenter = Fragmenter::from_bytes(Vec::new(), FragmentConfig::new(1024));
    assert_eq!(fragmenter.total(), 0);
    assert!(fragmenter.is_empty());
    assert!(collect(&mut fragmenter).is_empty());
    assert_eq!(
        fragmenter.hash().unwrap().to_hex(),
        "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
    );
}

// ============================================================================
// Determinism and Restartability
// ============================================================================

#[test]
fn test_each_is_restartable() {
    let data: Vec<u8> = (0..5000).map(|i| (i * 7 + 13) as u8).collect();
    let mut fragmenter = Fragmenter::from_bytes(data, FragmentConfig::new(512));

    let first = collect(&mut fragmenter);
    let second = collect(&mut fragmenter);
    assert_eq!(first, second, "Two passes over the same source must match");
}

#[test]
fn test_iteration_after_partial_read() {
    let data: Vec<u8> = (0..300).map(|i| i as u8).collect();
    let mut fragmenter = Fragmenter::from_bytes(data.clone(), FragmentConfig::new(100));

    // Abandon an iterator half-way; the next pass must start at offset 0.
    {
        let mut iter = fragmenter.iter().unwrap();
        iter.next();
    }

    let fragments = collect(&mut fragmenter);
    assert_eq!(fragments.len(), 3);
    assert_eq!(fragments[0].2, data[..100]);
}

#[test]
fn test_hash_independent_of_caller_iteration() {
    let data: Vec<u8> = (0..4096).map(|i| (i % 97) as u8).collect();
    let mut fragmenter = Fragmenter::from_bytes(data.clone(), FragmentConfig::new(1000));

    let mut seen = 0;
    let _ = fragmenter.each(|index, _, _| {
        seen += 1;
        if index == 2 { Err("abort") } else { Ok(()) }
    });
    assert_eq!(seen, 2);

    let expected: [u8; 32] = Sha256::digest(&data).into();
    assert_eq!(fragmenter.hash().unwrap().as_bytes(), &expected);
}

#[test]
fn test_handler_error_is_wrapped() {
    let mut fragmenter = Fragmenter::from_bytes(vec![1u8; 10], FragmentConfig::new(2));
    let err = fragmenter
        .each(|_, _, _| Err(std::io::Error::other("handler io")))
        .unwrap_err();

    // Even an io::Error from the handler is a handler error, not an I/O one.
    assert!(matches!(err, FragmentError::Handler(_)));
    assert!(err.to_string().contains("handler io"));
}

// ============================================================================
// File Sources
// ============================================================================

#[test]
fn test_open_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("source.bin");
    let data: Vec<u8> = (0..10_000).map(|i| (i % 256) as u8).collect();
    std::fs::write(&path, &data).unwrap();

    let mut fragmenter = Fragmenter::open(&path, FragmentConfig::new(1024)).unwrap();
    assert_eq!(fragmenter.len(), 10_000);
    assert_eq!(fragmenter.total(), 10);

    let joined: Vec<u8> = collect(&mut fragmenter).into_iter().flat_map(|(_, _, d)| d).collect();
    assert_eq!(joined, data);
}

#[test]
fn test_open_directory() {
    let dir = tempfile::tempdir().unwrap();
    let err = Fragmenter::open(dir.path(), FragmentConfig::default()).unwrap_err();
    assert!(matches!(err, FragmentError::IsDirectory { .. }));
}

#[test]
fn test_open_missing() {
    let dir = tempfile::tempdir().unwrap();
    let err = Fragmenter::open(dir.path().join("noexist"), FragmentConfig::default()).unwrap_err();
    assert!(matches!(err, FragmentError::NotFound { .. }));
    assert!(err.to_string().contains("does not exist"));
}

#[test]
fn test_from_reader() {
    let fragmenter = Fragmenter::from_reader(Cursor::new(vec![0u8; 33]), FragmentConfig::new(8)).unwrap();
    assert_eq!(fragmenter.total(), 5);
}

// ============================================================================
// Properties
// ============================================================================

proptest! {
    #[test]
    fn fragment_count_formula(len in 0usize..=20_000, size in 1usize..=4096) {
        let mut fragmenter = Fragmenter::from_bytes(vec![0u8; len], FragmentConfig::new(size));
        let expected = len.div_ceil(size) as u64;

        prop_assert_eq!(fragmenter.total(), expected);
        prop_assert_eq!(fragmenter.total() == 0, len == 0);
        prop_assert_eq!(fragmenter.iter().unwrap().count() as u64, expected);
    }

    #[test]
    fn fragments_cover_source(data in proptest::collection::vec(any::<u8>(), 0..=8192), size in 1usize..=1024) {
        let mut fragmenter = Fragmenter::from_bytes(data.clone(), FragmentConfig::new(size));
        let fragments = collect(&mut fragmenter);

        for (position, (index, total, payload)) in fragments.iter().enumerate() {
            prop_assert_eq!(*index, position as u64 + 1);
            prop_assert_eq!(*total, fragmenter.total());
            prop_assert!(!payload.is_empty());
        }
        let joined: Vec<u8> = fragments.into_iter().flat_map(|(_, _, d)| d).collect();
        prop_assert_eq!(joined, data);
    }
}
