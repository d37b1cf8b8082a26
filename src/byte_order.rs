//! Byte-order normalization.
//!
//! [`Uuid`](crate::Uuid) always holds its bytes in network order (big-endian fields). Values that
//! come from other in-memory layouts are normalized here on the way in and out, so that
//! name-based generation hashes a namespace identically however its value was constructed.

/// Reverses all the 16 bytes.
///
/// This converts between network order and the memory layout of a 128-bit integer on a
/// little-endian machine. The function is its own inverse.
pub const fn reverse(bytes: [u8; 16]) -> [u8; 16] {
    let mut dst = [0u8; 16];
    let mut i = 0;
    while i < 16 {
        dst[i] = bytes[15 - i];
        i += 1;
    }
    dst
}

/// Reverses the first three fields (4, 2, and 2 bytes) and keeps the last eight bytes.
///
/// This converts between network order and the mixed-endian layout of Microsoft GUID structures,
/// where `Data1`, `Data2`, and `Data3` are native little-endian integers. The function is its own
/// inverse.
pub const fn swap_fields(bytes: [u8; 16]) -> [u8; 16] {
    [
        bytes[3], bytes[2], bytes[1], bytes[0], bytes[5], bytes[4], bytes[7], bytes[6], bytes[8],
        bytes[9], bytes[10], bytes[11], bytes[12], bytes[13], bytes[14], bytes[15],
    ]
}
