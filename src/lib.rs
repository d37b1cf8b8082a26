//! An implementation of UUID versions 1, 3, and 5 as defined by RFC 9562 (formerly RFC 4122)
//!
//! ```rust
//! use uuid1::{uuid1, uuid5, Encoding, Uuid};
//!
//! let uuid = uuid1();
//! println!("{}", uuid); // e.g. "f3b4958c-52a1-11e7-802a-e7e4f0d1c3b5"
//! println!("{:?}", uuid.as_bytes()); // as 16-byte big-endian array
//!
//! let uuid = uuid5(&Uuid::NAMESPACE_DNS, "www.example.com", Encoding::Utf8);
//! assert_eq!(uuid.to_string(), "2ed6657d-e927-568b-95e1-2665a8aea6a2");
//! ```
//!
//! See [RFC 9562](https://www.rfc-editor.org/rfc/rfc9562).
//!
//! # Field and bit layout
//!
//! Version 1 identifiers have the following bit layout:
//!
//! ```text
//!  0                   1                   2                   3
//!  0 1 2 3 4 5 6 7 8 9 0 1 2 3 4 5 6 7 8 9 0 1 2 3 4 5 6 7 8 9 0 1
//! +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
//! |                           time_low                            |
//! +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
//! |           time_mid            |  ver  |       time_high       |
//! +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
//! |var|         clock_seq         |             node              |
//! +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
//! |                              node                             |
//! +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
//! ```
//!
//! Where:
//!
//! - The 60-bit timestamp, split into `time_high`, `time_mid`, and `time_low`, counts
//!   100-nanosecond intervals since 1582-10-15 00:00:00 UTC.
//! - The 4-bit `ver` field is set at `0001`.
//! - The 2-bit `var` field is set at `10`.
//! - The 14-bit `clock_seq` field is incremented by one for each new ID generated within the same
//!   timestamp and is randomly reseeded whenever the timestamp changes, in either direction. The
//!   counter wraps around after 16,384 IDs within the same 100-nanosecond tick.
//! - The 48-bit `node` field holds a random number with the multicast bit set, drawn once per
//!   generator, unless the caller supplies a node identifier (e.g., a MAC address).
//!
//! Versions 3 and 5 fill the same 128 bits with the first 16 bytes of the MD5 or SHA-1 digest of
//! a namespace identifier followed by a name, and then overwrite `ver` and `var`.
//!
//! # Crate features
//!
//! Default features:
//!
//! - `std` enables the clock sequence state, [`V1Generator`], and the integration with
//!   [`std::error::Error`] and `String`.
//! - `global_gen` (implies `std`) enables the process-wide generator behind [`uuid1()`].
//!
//! Optional features:
//!
//! - `serde` enables serialization and deserialization of [`Uuid`] and the version-specific
//!   types.
//! - `uuid` enables conversion from and to `uuid::Uuid`.
//! - `tracing` emits `trace`-level spans from the generation paths.
//! - `parking_lot` (implies `std`) guards the clock sequence state with `parking_lot::Mutex`.
//!
//! Without `std`, the value type, parsing, formatting, and name-based generation remain
//! available in `no_std` environments.

#![cfg_attr(all(not(feature = "std"), not(test)), no_std)]
#![cfg_attr(docsrs, feature(doc_cfg))]

mod error;
pub use error::Error;

pub mod codec;
pub use codec::Fields;

pub mod byte_order;

mod id;
pub use id::{Uuid, Variant};

mod format;
pub use format::{Format, Formatted};

mod family;
pub use family::{UuidV1, UuidV3, UuidV5};

pub mod rand_source;
pub use rand_source::RandSource;

pub mod clock;
#[cfg(feature = "std")]
pub use clock::TimeSource;

mod v1;
#[cfg(feature = "std")]
#[cfg_attr(docsrs, doc(cfg(feature = "std")))]
pub use v1::V1Generator;

mod name_based;
pub use name_based::{uuid3, uuid5, Encoding};

mod global_gen;
#[cfg(feature = "global_gen")]
pub use global_gen::{uuid1, uuid1_with_node};
