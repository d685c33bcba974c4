#![no_main]

use libfuzzer_sys::fuzz_target;
use fragmentrs::{FragmentConfig, Fragmenter};

fuzz_target!(|data: Vec<u8>| {
    for fragment_size in [1, 3, 64, 1024, 0] {
        let config = FragmentConfig::new(fragment_size);
        let mut fragmenter = Fragmenter::from_bytes(data.clone(), config);

        // Verify: count matches ceil(len / size)
        let expected_total = (data.len() as u64).div_ceil(config.fragment_size() as u64);
        assert_eq!(fragmenter.total(), expected_total);

        // Verify: dense 1-based indices, full windows except the last
        let mut joined = Vec::with_capacity(data.len());
        let mut last_index = 0u64;
        fragmenter
            .each(|index, total, payload| {
                assert_eq!(index, last_index + 1);
                assert_eq!(total, expected_total);
                if index < total {
                    assert_eq!(payload.len(), config.fragment_size());
                }
                last_index = index;
                joined.extend_from_slice(payload);
                Ok::<(), std::convert::Infallible>(())
            })
            .unwrap();

        assert_eq!(last_index, expected_total);
        assert_eq!(joined, data);

        // Verify: a second pass is identical
        let again: Vec<_> = fragmenter.iter().unwrap().map(|f| f.unwrap()).collect();
        assert_eq!(again.len() as u64, expected_total);
    }
});
