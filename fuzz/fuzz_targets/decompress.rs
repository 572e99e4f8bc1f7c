//! Fuzz target for the CSVF decoder with arbitrary byte input.
//!
//! The decode limit keeps length fields claiming gigabytes of zeros from
//! turning into out-of-memory reports.
//!
//! Run with: cargo +nightly fuzz run decompress

#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let _ = csvf::codec::decompress_with_limit(data, 1 << 20);
});
