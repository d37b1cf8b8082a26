//! Version-specific identifier types.
//!
//! A value of [`UuidV1`], [`UuidV3`], or [`UuidV5`] always carries the `10` variant and its own
//! version number, so a name-based identifier can never be passed where a time-based one is
//! expected.

#[cfg(not(feature = "std"))]
use core as std;

use std::{fmt, str};

use crate::{Error, Format, Uuid};

/// Checks that `uuid` has the `10` variant and the `expected` version.
const fn check_version(uuid: &Uuid, expected: u8) -> Result<(), Error> {
    match uuid.version() {
        Some(v) if v == expected => Ok(()),
        found => Err(Error::VersionMismatch { expected, found }),
    }
}

macro_rules! family {
    ($(#[$attr:meta])* $name:ident, $version:literal) => {
        $(#[$attr])*
        #[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Debug)]
        #[repr(transparent)]
        pub struct $name(Uuid);

        impl $name {
            #[doc = concat!("The version number (`", stringify!($version), "`) of this family.")]
            pub const VERSION: u8 = $version;

            /// Wraps a value whose version and variant bits the caller has just set.
            pub(crate) const fn from_stamped(uuid: Uuid) -> Self {
                debug_assert!(matches!(uuid.version(), Some($version)));
                Self(uuid)
            }

            /// Returns a reference to the underlying [`Uuid`].
            pub const fn as_uuid(&self) -> &Uuid {
                &self.0
            }

            /// Unwraps the underlying [`Uuid`].
            pub const fn into_uuid(self) -> Uuid {
                self.0
            }

            /// Returns a reference to the underlying byte array.
            pub const fn as_bytes(&self) -> &[u8; 16] {
                self.0.as_bytes()
            }

            /// Creates an object from any of the supported string representations.
            ///
            /// # Errors
            ///
            /// Returns [`Error::MalformedText`] if the string is not a UUID representation at
            /// all, or [`Error::VersionMismatch`] if it is one of another version or variant.
            pub fn parse(src: &str) -> Result<Self, Error> {
                Uuid::parse(src).and_then(Self::try_from)
            }

            /// Creates an object from the string representation in the specified style only.
            ///
            /// # Errors
            ///
            /// Same as [`parse`](Self::parse).
            pub fn parse_exact(src: &str, format: Format) -> Result<Self, Error> {
                Uuid::parse_exact(src, format).and_then(Self::try_from)
            }

            /// Works like [`parse`](Self::parse) but returns `None` on failure.
            pub fn try_parse(src: &str) -> Option<Self> {
                Self::parse(src).ok()
            }

            /// Works like [`parse_exact`](Self::parse_exact) but returns `None` on failure.
            pub fn try_parse_exact(src: &str, format: Format) -> Option<Self> {
                Self::parse_exact(src, format).ok()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                fmt::Display::fmt(&self.0, f)
            }
        }

        impl str::FromStr for $name {
            type Err = Error;

            fn from_str(src: &str) -> Result<Self, Self::Err> {
                Self::parse(src)
            }
        }

        impl From<$name> for Uuid {
            fn from(src: $name) -> Self {
                src.0
            }
        }

        impl TryFrom<Uuid> for $name {
            type Error = Error;

            fn try_from(src: Uuid) -> Result<Self, Self::Error> {
                check_version(&src, $version).map(|_| Self(src))
            }
        }

        impl AsRef<Uuid> for $name {
            fn as_ref(&self) -> &Uuid {
                &self.0
            }
        }

        impl AsRef<[u8]> for $name {
            fn as_ref(&self) -> &[u8] {
                self.0.as_bytes()
            }
        }

        #[cfg(feature = "serde")]
        #[cfg_attr(docsrs, doc(cfg(feature = "serde")))]
        impl serde::Serialize for $name {
            fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                serde::Serialize::serialize(&self.0, serializer)
            }
        }

        #[cfg(feature = "serde")]
        #[cfg_attr(docsrs, doc(cfg(feature = "serde")))]
        impl<'de> serde::Deserialize<'de> for $name {
            fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
                let uuid = <Uuid as serde::Deserialize>::deserialize(deserializer)?;
                Self::try_from(uuid).map_err(serde::de::Error::custom)
            }
        }
    };
}

family! {
    /// A time-based (version 1) UUID.
    ///
    /// Obtain one from [`uuid1()`](crate::uuid1), a [`V1Generator`](crate::V1Generator),
    /// [`UuidV1::from_parts`], or by parsing.
    UuidV1, 1
}

family! {
    /// A name-based UUID derived with MD5 (version 3).
    ///
    /// Obtain one from [`uuid3()`](crate::uuid3) or by parsing.
    UuidV3, 3
}

family! {
    /// A name-based UUID derived with SHA-1 (version 5).
    ///
    /// Obtain one from [`uuid5()`](crate::uuid5) or by parsing.
    UuidV5, 5
}

#[cfg(test)]
mod tests {
    use super::{UuidV1, UuidV3, UuidV5};
    use crate::{Error, Format, Uuid};

    const V1: &str = "c232ab00-9414-11ec-b3c8-9f6bdeced846";
    const V3: &str = "5df41881-3aed-3515-88a7-2f4a814cf09e";
    const V5: &str = "2ed6657d-e927-568b-95e1-2665a8aea6a2";

    /// Accepts text of own version only
    #[test]
    fn accepts_text_of_own_version_only() {
        assert_eq!(UuidV1::parse(V1).unwrap().to_string(), V1);
        assert_eq!(UuidV3::parse(V3).unwrap().to_string(), V3);
        assert_eq!(UuidV5::parse(V5).unwrap().to_string(), V5);

        assert!(UuidV1::try_parse(V3).is_none());
        assert!(UuidV1::try_parse(V5).is_none());
        assert!(UuidV3::try_parse(V1).is_none());
        assert!(UuidV3::try_parse(V5).is_none());
        assert!(UuidV5::try_parse(V1).is_none());
        assert!(UuidV5::try_parse(V3).is_none());
    }

    /// Distinguishes malformed text from version mismatch
    #[test]
    fn distinguishes_malformed_text_from_version_mismatch() {
        assert_eq!(UuidV1::parse("not-a-guid"), Err(Error::MalformedText));
        assert_eq!(
            UuidV1::parse(V3),
            Err(Error::VersionMismatch {
                expected: 1,
                found: Some(3)
            })
        );
        assert_eq!(
            UuidV5::parse("00000000-0000-0000-0000-000000000000"),
            Err(Error::VersionMismatch {
                expected: 5,
                found: None
            })
        );
        assert_eq!(
            UuidV3::parse("5df41881-3aed-3515-c8a7-2f4a814cf09e"),
            Err(Error::VersionMismatch {
                expected: 3,
                found: None
            })
        );
    }

    /// Falls back to nil when mapped through try_parse
    #[test]
    fn falls_back_to_nil_when_mapped_through_try_parse() {
        let x = UuidV1::try_parse(V3).map_or(Uuid::NIL, Uuid::from);
        assert_eq!(x, Uuid::NIL);
        assert!(x.is_nil());

        let y = UuidV3::try_parse(V3).map_or(Uuid::NIL, Uuid::from);
        assert_eq!(y.to_string(), V3);
    }

    /// Parses other styles through family types
    #[test]
    fn parses_other_styles_through_family_types() {
        let x = UuidV5::parse(V5).unwrap();
        assert_eq!(
            UuidV5::parse("{2ED6657D-E927-568B-95E1-2665A8AEA6A2}"),
            Ok(x)
        );
        assert_eq!(
            UuidV5::parse_exact("2ed6657de927568b95e12665a8aea6a2", Format::Simple),
            Ok(x)
        );
        assert_eq!(
            UuidV5::parse_exact("2ed6657de927568b95e12665a8aea6a2", Format::Hyphenated),
            Err(Error::MalformedText)
        );
        assert_eq!(
            UuidV5::try_parse_exact(
                "urn:uuid:2ed6657d-e927-568b-95e1-2665a8aea6a2",
                Format::Urn
            ),
            Some(x)
        );
        assert_eq!(V5.parse::<UuidV5>(), Ok(x));
    }

    /// Converts to and from untyped values
    #[test]
    fn converts_to_and_from_untyped_values() {
        let uuid = Uuid::parse(V1).unwrap();
        let x = UuidV1::try_from(uuid).unwrap();
        assert_eq!(x.as_uuid(), &uuid);
        assert_eq!(x.into_uuid(), uuid);
        assert_eq!(Uuid::from(x), uuid);
        assert_eq!(x.as_bytes(), uuid.as_bytes());
        assert_eq!(AsRef::<[u8]>::as_ref(&x), uuid.as_bytes());
        assert_eq!(UuidV1::VERSION, 1);
        assert_eq!(UuidV3::VERSION, 3);
        assert_eq!(UuidV5::VERSION, 5);

        assert!(UuidV1::try_from(Uuid::MAX).is_err());
        assert!(UuidV3::try_from(uuid).is_err());
    }

    /// Orders like underlying values
    #[test]
    fn orders_like_underlying_values() {
        let a = UuidV1::parse("00000000-0000-1000-8000-000000000000").unwrap();
        let b = UuidV1::parse("00000000-0000-1000-8000-000000000001").unwrap();
        let c = UuidV1::parse("ffffffff-0000-1000-8000-000000000000").unwrap();
        assert!(a < b && b < c);
        assert_eq!(a.cmp(&c), a.as_uuid().cmp(c.as_uuid()));
    }

    #[cfg(feature = "serde")]
    mod serde_tests {
        use super::{UuidV1, UuidV5, V1, V5};
        use serde_test::{assert_de_tokens_error, assert_tokens, Configure, Token};

        /// Serializes family types like untyped values
        #[test]
        fn serializes_family_types_like_untyped_values() {
            let x = UuidV5::parse(V5).unwrap();
            assert_tokens(&x.readable(), &[Token::String(V5)]);
        }

        /// Rejects values of other versions on deserialization
        #[test]
        fn rejects_values_of_other_versions_on_deserialization() {
            assert_de_tokens_error::<serde_test::Readable<UuidV5>>(
                &[Token::String(V1)],
                "expected UUID version 5, found 1",
            );
            assert_de_tokens_error::<serde_test::Readable<UuidV1>>(
                &[Token::String("not-a-guid")],
                "invalid string representation",
            );
        }
    }
}
