#![no_main]

use libfuzzer_sys::fuzz_target;
use fragmentrs::{FragmentConfig, Fragmenter, Reassembler};

// The first input bytes drive the submission order; the rest is the payload.
fuzz_target!(|input: (Vec<u16>, Vec<u8>)| {
    let (order, data) = input;
    if data.is_empty() {
        return;
    }

    let mut fragmenter = Fragmenter::from_bytes(data.clone(), FragmentConfig::new(7));
    let fragments: Vec<_> = fragmenter.iter().unwrap().map(|f| f.unwrap()).collect();
    let total = fragmenter.total();

    let mut r = Reassembler::in_memory(total);

    // Arbitrary submissions (duplicates included), then everything in order.
    for &pick in &order {
        let fragment = &fragments[pick as usize % fragments.len()];
        r.add_fragment(fragment).unwrap();
        assert!(r.next_expected() <= total + 1);
    }
    for fragment in &fragments {
        r.add_fragment(fragment).unwrap();
    }

    assert!(r.is_finished());
    assert_eq!(r.missing(), 0);
    assert_eq!(r.get().unwrap(), &data[..]);
    assert_eq!(r.hash().unwrap(), fragmenter.hash().unwrap());
});
