//! Name-based (version 3 and version 5) UUIDs.

use md5::{Digest, Md5};
use sha1::Sha1;
#[cfg(feature = "tracing")]
use tracing::instrument;

use crate::{codec, Uuid, UuidV3, UuidV5};

/// Character encodings in which a name can be hashed.
///
/// The same name produces different identifiers under different encodings. RFC 9562 recommends
/// UTF-8, while some platforms hash names as UTF-16 in either byte order.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Default)]
pub enum Encoding {
    /// UTF-8.
    #[default]
    Utf8,

    /// UTF-16, little-endian code units, no byte order mark.
    Utf16Le,

    /// UTF-16, big-endian code units, no byte order mark.
    Utf16Be,
}

impl Encoding {
    /// Feeds `name` to `hasher` in this encoding, without an intermediate buffer.
    fn feed<D: Digest>(self, hasher: &mut D, name: &str) {
        match self {
            Self::Utf8 => hasher.update(name.as_bytes()),
            Self::Utf16Le => name
                .encode_utf16()
                .for_each(|unit| hasher.update(unit.to_le_bytes())),
            Self::Utf16Be => name
                .encode_utf16()
                .for_each(|unit| hasher.update(unit.to_be_bytes())),
        }
    }
}

/// Hashes the namespace bytes (in network order) followed by whatever `feed` supplies, then
/// stamps the first 16 bytes of the digest with `version` and the `10` variant.
fn hash_name<D: Digest>(namespace: &Uuid, version: u8, feed: impl FnOnce(&mut D)) -> Uuid {
    let mut hasher = D::new();
    hasher.update(namespace.as_bytes());
    feed(&mut hasher);

    let digest = hasher.finalize();
    let mut buffer = [0u8; 16];
    buffer.copy_from_slice(&digest[..16]);
    Uuid::from_bytes(codec::stamp_version_variant(buffer, version))
}

/// Derives a version 3 UUID from the MD5 hash of a namespace and a name.
///
/// The result depends only on the arguments, so equal inputs always yield equal identifiers.
///
/// # Examples
///
/// ```rust
/// use uuid1::{uuid3, Encoding, Uuid};
///
/// let x = uuid3(&Uuid::NAMESPACE_DNS, "www.example.com", Encoding::Utf8);
/// assert_eq!(x.to_string(), "5df41881-3aed-3515-88a7-2f4a814cf09e");
/// ```
#[cfg_attr(feature = "tracing", instrument(level = "trace", skip(name)))]
pub fn uuid3(namespace: &Uuid, name: &str, encoding: Encoding) -> UuidV3 {
    UuidV3::from_stamped(hash_name::<Md5>(namespace, 3, |hasher| {
        encoding.feed(hasher, name)
    }))
}

/// Derives a version 5 UUID from the SHA-1 hash of a namespace and a name.
///
/// The result depends only on the arguments, so equal inputs always yield equal identifiers.
///
/// # Examples
///
/// ```rust
/// use uuid1::{uuid5, Encoding, Uuid};
///
/// let x = uuid5(&Uuid::NAMESPACE_DNS, "www.example.com", Encoding::Utf8);
/// assert_eq!(x.to_string(), "2ed6657d-e927-568b-95e1-2665a8aea6a2");
/// ```
#[cfg_attr(feature = "tracing", instrument(level = "trace", skip(name)))]
pub fn uuid5(namespace: &Uuid, name: &str, encoding: Encoding) -> UuidV5 {
    UuidV5::from_stamped(hash_name::<Sha1>(namespace, 5, |hasher| {
        encoding.feed(hasher, name)
    }))
}

impl UuidV3 {
    /// Derives a version 3 UUID from a namespace and a name given as raw bytes.
    pub fn from_name_bytes(namespace: &Uuid, name: &[u8]) -> Self {
        Self::from_stamped(hash_name::<Md5>(namespace, 3, |hasher| {
            hasher.update(name)
        }))
    }
}

impl UuidV5 {
    /// Derives a version 5 UUID from a namespace and a name given as raw bytes.
    pub fn from_name_bytes(namespace: &Uuid, name: &[u8]) -> Self {
        Self::from_stamped(hash_name::<Sha1>(namespace, 5, |hasher| {
            hasher.update(name)
        }))
    }
}
