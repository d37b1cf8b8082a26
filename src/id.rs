#[cfg(not(feature = "std"))]
use core as std;

use std::{fmt, str};

use crate::{byte_order, codec, Error, Fields};

/// Represents a Universally Unique IDentifier.
///
/// The 16 bytes are always held in network byte order, so the derived [`Ord`] is the unsigned
/// lexicographic order of the bytes and agrees with the order of [`Uuid::as_u128`].
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Debug, Default)]
pub struct Uuid([u8; 16]);

impl Uuid {
    /// Nil UUID (00000000-0000-0000-0000-000000000000)
    ///
    /// Also serves as the "no identifier" marker.
    pub const NIL: Self = Self([0x00; 16]);

    /// Max UUID (ffffffff-ffff-ffff-ffff-ffffffffffff)
    pub const MAX: Self = Self([0xff; 16]);

    /// Name space ID for fully-qualified domain names (6ba7b810-9dad-11d1-80b4-00c04fd430c8)
    pub const NAMESPACE_DNS: Self = Self::from_u128(0x6ba7b810_9dad_11d1_80b4_00c04fd430c8);

    /// Name space ID for URLs (6ba7b811-9dad-11d1-80b4-00c04fd430c8)
    pub const NAMESPACE_URL: Self = Self::from_u128(0x6ba7b811_9dad_11d1_80b4_00c04fd430c8);

    /// Name space ID for ISO OIDs (6ba7b812-9dad-11d1-80b4-00c04fd430c8)
    pub const NAMESPACE_OID: Self = Self::from_u128(0x6ba7b812_9dad_11d1_80b4_00c04fd430c8);

    /// Name space ID for X.500 DNs (6ba7b814-9dad-11d1-80b4-00c04fd430c8)
    pub const NAMESPACE_X500: Self = Self::from_u128(0x6ba7b814_9dad_11d1_80b4_00c04fd430c8);

    /// Creates an object from a 16-byte big-endian array.
    pub const fn from_bytes(bytes: [u8; 16]) -> Self {
        Self(bytes)
    }

    /// Creates an object from a byte slice of exactly 16 bytes in network order.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidArgumentLength`] if the slice is not 16 bytes long.
    pub fn from_slice(bytes: &[u8]) -> Result<Self, Error> {
        <[u8; 16]>::try_from(bytes)
            .map(Self)
            .map_err(|_| Error::length("identifier", 16, bytes.len()))
    }

    /// Returns a reference to the underlying byte array.
    pub const fn as_bytes(&self) -> &[u8; 16] {
        &self.0
    }

    /// Returns a copy of the underlying byte array.
    pub const fn to_bytes(self) -> [u8; 16] {
        self.0
    }

    /// Creates an object from a 128-bit unsigned integer.
    pub const fn from_u128(value: u128) -> Self {
        Self(value.to_be_bytes())
    }

    /// Returns the 128-bit unsigned integer representation.
    pub const fn as_u128(&self) -> u128 {
        u128::from_be_bytes(self.0)
    }

    /// Creates an object from a 128-bit integer whose bytes are in the reverse (little-endian)
    /// order of the network representation.
    pub const fn from_u128_le(value: u128) -> Self {
        Self(byte_order::reverse(value.to_be_bytes()))
    }

    /// Returns the 128-bit integer whose little-endian bytes are the network representation.
    pub const fn to_u128_le(&self) -> u128 {
        u128::from_be_bytes(byte_order::reverse(self.0))
    }

    /// Creates an object from the mixed-endian byte layout of a Microsoft GUID structure.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use uuid1::Uuid;
    ///
    /// let guid_bytes = [
    ///     0xa1, 0xa2, 0xa3, 0xa4, 0xb1, 0xb2, 0xc1, 0xc2, 0xd1, 0xd2, 0xd3, 0xd4, 0xd5, 0xd6, 0xd7,
    ///     0xd8,
    /// ];
    /// let uuid = Uuid::from_bytes_le(guid_bytes);
    /// assert_eq!(uuid.to_string(), "a4a3a2a1-b2b1-c2c1-d1d2-d3d4d5d6d7d8");
    /// assert_eq!(uuid.to_bytes_le(), guid_bytes);
    /// ```
    pub const fn from_bytes_le(bytes: [u8; 16]) -> Self {
        Self(byte_order::swap_fields(bytes))
    }

    /// Returns the mixed-endian byte layout of a Microsoft GUID structure.
    pub const fn to_bytes_le(&self) -> [u8; 16] {
        byte_order::swap_fields(self.0)
    }

    /// Returns the field values of the RFC 4122 layout.
    pub const fn fields(&self) -> Fields {
        codec::unpack(&self.0)
    }

    /// Returns `true` if `self` is the Nil UUID.
    pub const fn is_nil(&self) -> bool {
        self.as_u128() == 0
    }

    /// Returns `true` if `self` is the Max UUID.
    pub const fn is_max(&self) -> bool {
        self.as_u128() == u128::MAX
    }

    /// Reports the variant field value of the UUID or, if appropriate, "NIL" or "MAX".
    ///
    /// For convenience, this method reports [`Variant::VarNil`] or [`Variant::VarMax`] if `self`
    /// represents the Nil or Max UUID, although the Nil and Max UUIDs are technically subsumed
    /// under the variants `0b0` and `0b111`, respectively.
    pub const fn variant(&self) -> Variant {
        match self.0[8] >> 4 {
            0b0000..=0b0111 if self.is_nil() => Variant::VarNil,
            0b0000..=0b0111 => Variant::Var0,
            0b1000..=0b1011 => Variant::Var10,
            0b1100..=0b1101 => Variant::Var110,
            _ if self.is_max() => Variant::VarMax,
            _ => Variant::VarReserved,
        }
    }

    /// Returns the version field value of the UUID or `None` if `self` does not have the variant
    /// field value of `0b10`.
    pub const fn version(&self) -> Option<u8> {
        match self.variant() {
            Variant::Var10 => Some(self.0[6] >> 4),
            _ => None,
        }
    }
}

/// UUID variants defined by RFC 9562.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Debug)]
pub enum Variant {
    /// Nil UUID (00000000-0000-0000-0000-000000000000).
    VarNil,

    /// The variant field value of `0b0` (NCS backward compatibility).
    Var0,

    /// The variant field value of `0b10` (RFC 4122 / RFC 9562).
    Var10,

    /// The variant field value of `0b110` (Microsoft backward compatibility).
    Var110,

    /// The reserved variant field value of `0b111`.
    VarReserved,

    /// Max UUID (ffffffff-ffff-ffff-ffff-ffffffffffff).
    VarMax,
}

impl fmt::Display for Uuid {
    /// Returns the 8-4-4-4-12 canonical hexadecimal string representation.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.encode())
    }
}

impl str::FromStr for Uuid {
    type Err = Error;

    /// Creates an object from any of the supported string representations.
    ///
    /// See [`Uuid::parse`].
    fn from_str(src: &str) -> Result<Self, Self::Err> {
        Self::parse(src)
    }
}

impl From<Uuid> for [u8; 16] {
    fn from(src: Uuid) -> Self {
        src.0
    }
}

impl From<[u8; 16]> for Uuid {
    fn from(src: [u8; 16]) -> Self {
        Self(src)
    }
}

impl TryFrom<&[u8]> for Uuid {
    type Error = Error;

    fn try_from(src: &[u8]) -> Result<Self, Self::Error> {
        Self::from_slice(src)
    }
}

impl AsRef<[u8]> for Uuid {
    fn as_ref(&self) -> &[u8] {
        self.as_bytes()
    }
}

impl From<Uuid> for u128 {
    fn from(src: Uuid) -> Self {
        src.as_u128()
    }
}

impl From<u128> for Uuid {
    fn from(src: u128) -> Self {
        Self::from_u128(src)
    }
}

#[cfg(feature = "std")]
#[cfg_attr(docsrs, doc(cfg(feature = "std")))]
mod std_ext {
    use super::{Error, Uuid};

    impl From<Uuid> for String {
        fn from(src: Uuid) -> Self {
            src.to_string()
        }
    }

    impl TryFrom<String> for Uuid {
        type Error = Error;

        fn try_from(src: String) -> Result<Self, Self::Error> {
            src.parse()
        }
    }
}

#[cfg(feature = "uuid")]
#[cfg_attr(docsrs, doc(cfg(feature = "uuid")))]
mod uuid_support {
    use super::Uuid;

    impl From<Uuid> for uuid::Uuid {
        fn from(src: Uuid) -> Self {
            uuid::Uuid::from_bytes(src.0)
        }
    }

    impl From<uuid::Uuid> for Uuid {
        fn from(src: uuid::Uuid) -> Self {
            Self(src.into_bytes())
        }
    }
}

#[cfg(feature = "serde")]
#[cfg_attr(docsrs, doc(cfg(feature = "serde")))]
mod serde_support {
    use super::{fmt, Uuid};
    use serde::{de, Deserializer, Serializer};

    impl serde::Serialize for Uuid {
        fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
            if serializer.is_human_readable() {
                serializer.serialize_str(&self.encode())
            } else {
                serializer.serialize_bytes(self.as_bytes())
            }
        }
    }

    impl<'de> serde::Deserialize<'de> for Uuid {
        fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
            if deserializer.is_human_readable() {
                deserializer.deserialize_str(VisitorImpl)
            } else {
                deserializer.deserialize_bytes(VisitorImpl)
            }
        }
    }

    struct VisitorImpl;

    impl<'de> de::Visitor<'de> for VisitorImpl {
        type Value = Uuid;

        fn expecting(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
            write!(formatter, "a UUID representation")
        }

        fn visit_str<E: de::Error>(self, value: &str) -> Result<Self::Value, E> {
            value.parse::<Self::Value>().map_err(de::Error::custom)
        }

        fn visit_bytes<E: de::Error>(self, value: &[u8]) -> Result<Self::Value, E> {
            Self::Value::from_slice(value).map_err(de::Error::custom)
        }
    }

}
