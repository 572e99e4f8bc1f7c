//! Fuzz target for the full XSVF to CSVF conversion.
//!
//! Run with: cargo +nightly fuzz run convert

#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // We don't care about rejections - we're looking for panics or hangs
    if let Ok(conversion) = csvf::convert(data) {
        // Every successful conversion must decode back to its normalized stream
        let decoded = csvf::codec::decompress(&conversion.csvf).expect("csvf does not decode");
        assert_eq!(decoded, conversion.normalized);
    }
});
