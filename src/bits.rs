//! Bit-vector helpers shared by the normalizer and the codec.

/// Returns the number of bytes needed to hold `bits` bits.
///
/// A zero-length vector occupies zero bytes.
#[inline]
pub fn bits_to_bytes(bits: u32) -> usize {
    bits.div_ceil(8) as usize
}

/// Appends `src` to `out` with its byte order reversed end-to-end.
///
/// The first input byte becomes the last output byte, so the player can
/// stream the vector from its least significant end.
#[inline]
pub fn append_swapped(out: &mut Vec<u8>, src: &[u8]) {
    out.extend(src.iter().rev());
}

/// Returns a copy of `src` with its byte order reversed.
///
/// Applying it twice yields the original bytes.
pub fn swap_bytes(src: &[u8]) -> Vec<u8> {
    let mut out = Vec::with_capacity(src.len());
    append_swapped(&mut out, src);
    out
}

/// Overwrites the four bytes at `offset` with `value` in big-endian order.
///
/// # Panics
///
/// Panics if `offset + 4` exceeds `buf.len()`.
#[inline]
pub fn patch_u32_be(buf: &mut [u8], offset: usize, value: u32) {
    buf[offset..offset + 4].copy_from_slice(&value.to_be_bytes());
}
