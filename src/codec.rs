//! Bit-level layout of RFC 4122 / RFC 9562 UUIDs.
//!
//! The functions here are stateless and only move bits around. Generators call them after they
//! have obtained their inputs (a timestamp and clock sequence, or a digest) and before they wrap
//! the result in a [`Uuid`](crate::Uuid).

use crate::Error;

/// Field values of a UUID in the RFC 4122 layout.
///
/// The `time_*` names follow the version 1 semantics; for other versions the same bits hold
/// whatever the version puts there (e.g., digest bytes for versions 3 and 5).
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Default)]
pub struct Fields {
    /// Bytes 0-3.
    pub time_low: u32,
    /// Bytes 4-5.
    pub time_mid: u16,
    /// Bytes 6-7, version in the most significant nibble.
    pub time_hi_and_version: u16,
    /// Byte 8, variant in the most significant bits.
    pub clock_seq_hi_and_variant: u8,
    /// Byte 9.
    pub clock_seq_low: u8,
    /// Bytes 10-15.
    pub node: [u8; 6],
}

/// The number of 100-nanosecond ticks between the Gregorian epoch (1582-10-15 00:00:00 UTC) and
/// the Unix epoch (1970-01-01 00:00:00 UTC).
pub const GREGORIAN_OFFSET: u64 = 0x01b2_1dd2_1381_4000;

/// The largest timestamp that fits in the 60-bit time fields.
pub const MAX_TIMESTAMP: u64 = (1 << 60) - 1;

/// The largest clock sequence that fits in the 14-bit clock sequence fields.
pub const MAX_CLOCK_SEQ: u16 = (1 << 14) - 1;

/// Packs field values into the 16-byte layout, setting the version nibble and the `10` variant.
///
/// Only the low 12 bits of `time_hi` and the low 14 bits of `clock_seq` are encoded; the other
/// bits are overwritten by the version and variant.
///
/// # Errors
///
/// Returns [`Error::InvalidArgumentLength`] if `node` is not exactly six bytes long.
///
/// # Examples
///
/// ```rust
/// use uuid1::codec;
///
/// let node = [0x9f, 0x6b, 0xde, 0xce, 0xd8, 0x46];
/// let bytes = codec::pack(0xc232ab00, 0x9414, 0x01ec, 1, 0x33c8, &node)?;
/// assert_eq!(
///     uuid1::Uuid::from(bytes).to_string(),
///     "c232ab00-9414-11ec-b3c8-9f6bdeced846"
/// );
/// # Ok::<(), uuid1::Error>(())
/// ```
pub fn pack(
    time_low: u32,
    time_mid: u16,
    time_hi: u16,
    version: u8,
    clock_seq: u16,
    node: &[u8],
) -> Result<[u8; 16], Error> {
    let node = node_from_slice(node)?;
    Ok(pack_node(
        time_low, time_mid, time_hi, version, clock_seq, &node,
    ))
}

/// Packs a 60-bit count of 100-nanosecond ticks since 1582-10-15 into the time fields and the
/// rest of the arguments as [`pack`] does.
///
/// Bits above the 60th of `timestamp` are discarded.
pub fn pack_timestamp(timestamp: u64, version: u8, clock_seq: u16, node: &[u8; 6]) -> [u8; 16] {
    pack_node(
        timestamp as u32,
        (timestamp >> 32) as u16,
        (timestamp >> 48) as u16,
        version,
        clock_seq,
        node,
    )
}

fn pack_node(
    time_low: u32,
    time_mid: u16,
    time_hi: u16,
    version: u8,
    clock_seq: u16,
    node: &[u8; 6],
) -> [u8; 16] {
    let time_hi_and_version = (time_hi & 0x0fff) | (u16::from(version & 0x0f) << 12);

    let mut dst = [0u8; 16];
    dst[0..4].copy_from_slice(&time_low.to_be_bytes());
    dst[4..6].copy_from_slice(&time_mid.to_be_bytes());
    dst[6..8].copy_from_slice(&time_hi_and_version.to_be_bytes());
    dst[8] = 0x80 | ((clock_seq >> 8) as u8 & 0x3f);
    dst[9] = clock_seq as u8;
    dst[10..].copy_from_slice(node);
    dst
}

/// Validates the length of a node identifier.
pub(crate) fn node_from_slice(node: &[u8]) -> Result<[u8; 6], Error> {
    <[u8; 6]>::try_from(node).map_err(|_| Error::length("node", 6, node.len()))
}

/// Splits the 16-byte layout into field values.
pub const fn unpack(bytes: &[u8; 16]) -> Fields {
    Fields {
        time_low: u32::from_be_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]),
        time_mid: u16::from_be_bytes([bytes[4], bytes[5]]),
        time_hi_and_version: u16::from_be_bytes([bytes[6], bytes[7]]),
        clock_seq_hi_and_variant: bytes[8],
        clock_seq_low: bytes[9],
        node: [
            bytes[10], bytes[11], bytes[12], bytes[13], bytes[14], bytes[15],
        ],
    }
}

/// Overwrites the version nibble (high nibble of byte 6) and the variant bits (top two bits of
/// byte 8, set at `10`) of a digest-derived buffer, leaving all the other bits untouched.
pub const fn stamp_version_variant(mut buffer: [u8; 16], version: u8) -> [u8; 16] {
    buffer[6] = (buffer[6] & 0x0f) | ((version & 0x0f) << 4);
    buffer[8] = (buffer[8] & 0x3f) | 0x80;
    buffer
}

impl Fields {
    /// Returns the 60-bit timestamp that the time fields carry under the version 1 layout.
    pub const fn timestamp(&self) -> u64 {
        ((self.time_hi_and_version as u64 & 0x0fff) << 48)
            | ((self.time_mid as u64) << 32)
            | self.time_low as u64
    }

    /// Returns the 14-bit clock sequence, excluding the variant bits.
    pub const fn clock_seq(&self) -> u16 {
        ((self.clock_seq_hi_and_variant as u16 & 0x3f) << 8) | self.clock_seq_low as u16
    }

    /// Returns the fields as the 16-byte layout, without altering the version or variant bits.
    pub fn to_bytes(&self) -> [u8; 16] {
        let mut dst = [0u8; 16];
        dst[0..4].copy_from_slice(&self.time_low.to_be_bytes());
        dst[4..6].copy_from_slice(&self.time_mid.to_be_bytes());
        dst[6..8].copy_from_slice(&self.time_hi_and_version.to_be_bytes());
        dst[8] = self.clock_seq_hi_and_variant;
        dst[9] = self.clock_seq_low;
        dst[10..].copy_from_slice(&self.node);
        dst
    }
}
