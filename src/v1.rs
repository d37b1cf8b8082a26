//! Time-based (version 1) UUIDs.

#[cfg(feature = "std")]
use std::time::SystemTime;

use crate::codec::{self, GREGORIAN_OFFSET};
use crate::{Error, Uuid, UuidV1};

#[cfg(feature = "std")]
pub use generator::V1Generator;

impl UuidV1 {
    /// Returns the 60-bit count of 100-nanosecond intervals since 1582-10-15 00:00:00 UTC.
    pub const fn timestamp(&self) -> u64 {
        self.as_uuid().fields().timestamp()
    }

    /// Returns the 14-bit clock sequence.
    pub const fn clock_sequence(&self) -> u16 {
        self.as_uuid().fields().clock_seq()
    }

    /// Returns the 48-bit node identifier.
    pub const fn node(&self) -> [u8; 6] {
        self.as_uuid().fields().node
    }

    /// Returns the timestamp as a [`SystemTime`], or `None` if the platform cannot represent it.
    #[cfg(feature = "std")]
    #[cfg_attr(docsrs, doc(cfg(feature = "std")))]
    pub fn to_system_time(&self) -> Option<SystemTime> {
        crate::clock::system_time_from_ticks(self.timestamp())
    }

    /// Assembles an identifier from a 60-bit timestamp, a two-byte big-endian clock sequence, and
    /// a six-byte node identifier.
    ///
    /// Bits above the 60th of `timestamp` and above the 14th of the clock sequence are discarded.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidArgumentLength`] if `clock_seq` is not two bytes long or `node` is
    /// not six bytes long.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use uuid1::UuidV1;
    ///
    /// let x = UuidV1::from_parts(
    ///     0x1ec_9414_c232_ab00,
    ///     &[0x33, 0xc8],
    ///     &[0x9f, 0x6b, 0xde, 0xce, 0xd8, 0x46],
    /// )?;
    /// assert_eq!(x.to_string(), "c232ab00-9414-11ec-b3c8-9f6bdeced846");
    /// # Ok::<(), uuid1::Error>(())
    /// ```
    pub fn from_parts(timestamp: u64, clock_seq: &[u8], node: &[u8]) -> Result<Self, Error> {
        let clock_seq = <[u8; 2]>::try_from(clock_seq)
            .map_err(|_| Error::length("clock_seq", 2, clock_seq.len()))?;
        let node = codec::node_from_slice(node)?;
        Ok(assemble(timestamp, u16::from_be_bytes(clock_seq), &node))
    }

    /// Assembles an identifier from a Unix timestamp, a clock sequence, and a node identifier.
    ///
    /// The sub-100-nanosecond part of `nanos` is truncated.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidArgumentLength`] if `node` is not six bytes long.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use uuid1::UuidV1;
    ///
    /// let x = UuidV1::from_unix(1497624119, 1234, 42, &[1, 2, 3, 4, 5, 6])?;
    /// assert_eq!(x.to_string(), "f3b4958c-52a1-11e7-802a-010203040506");
    /// # Ok::<(), uuid1::Error>(())
    /// ```
    pub fn from_unix(secs: u64, nanos: u32, clock_seq: u16, node: &[u8]) -> Result<Self, Error> {
        let node = codec::node_from_slice(node)?;
        let timestamp = secs
            .wrapping_mul(10_000_000)
            .wrapping_add(u64::from(nanos / 100))
            .wrapping_add(GREGORIAN_OFFSET);
        Ok(assemble(timestamp, clock_seq, &node))
    }
}

fn assemble(timestamp: u64, clock_seq: u16, node: &[u8; 6]) -> UuidV1 {
    UuidV1::from_stamped(Uuid::from_bytes(codec::pack_timestamp(
        timestamp, 1, clock_seq, node,
    )))
}

#[cfg(feature = "std")]
mod generator {
    #[cfg(feature = "tracing")]
    use tracing::instrument;

    use super::assemble;
    use crate::clock::{ClockSequence, StdSystemTime, TimeSource};
    use crate::rand_source::random_node;
    use crate::{codec, Error, RandSource, UuidV1};

    /// Represents a version 1 UUID generator that pairs a [`ClockSequence`] with a node
    /// identifier.
    ///
    /// All the generation methods take `&self`; the clock sequence state sits behind a mutex, so
    /// a single generator can be shared across threads (e.g., in an `Arc` or a `static`) and
    /// never returns the same (timestamp, clock sequence) pair twice while the clock moves
    /// forward.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use uuid1::{rand_source::Adapter, V1Generator};
    ///
    /// let g = V1Generator::with_node(Adapter(rand::rngs::OsRng), &[1, 2, 3, 4, 5, 6])?;
    /// let x = g.generate();
    /// assert_eq!(x.node(), [1, 2, 3, 4, 5, 6]);
    /// assert_eq!(x.as_uuid().version(), Some(1));
    ///
    /// let y = g.generate_with_node(&[0x03; 6])?;
    /// assert_eq!(y.node(), [0x03; 6]);
    /// assert!(g.generate_with_node(&[0x03; 4]).is_err());
    /// # Ok::<(), uuid1::Error>(())
    /// ```
    #[derive(Debug)]
    pub struct V1Generator<R, T = StdSystemTime> {
        clock: ClockSequence<R, T>,
        node: [u8; 6],
    }

    impl<R: RandSource> V1Generator<R> {
        /// Creates a generator that reads the system clock and uses a random node identifier
        /// (with the multicast bit set) drawn from `rng`.
        pub fn new(mut rng: R) -> Self {
            let node = random_node(&mut rng);
            Self {
                clock: ClockSequence::new(rng),
                node,
            }
        }

        /// Creates a generator that reads the system clock and uses the given node identifier.
        ///
        /// # Errors
        ///
        /// Returns [`Error::InvalidArgumentLength`] if `node` is not six bytes long.
        pub fn with_node(rng: R, node: &[u8]) -> Result<Self, Error> {
            Self::with_sources(rng, StdSystemTime, Some(node))
        }
    }

    impl<R: RandSource, T: TimeSource> V1Generator<R, T> {
        /// Creates a generator with a custom time source and, optionally, a fixed node
        /// identifier. A random node is drawn from `rng` if `node` is `None`.
        ///
        /// # Errors
        ///
        /// Returns [`Error::InvalidArgumentLength`] if `node` is not six bytes long.
        pub fn with_sources(mut rng: R, time: T, node: Option<&[u8]>) -> Result<Self, Error> {
            let node = match node {
                Some(node) => codec::node_from_slice(node)?,
                None => random_node(&mut rng),
            };
            Ok(Self {
                clock: ClockSequence::with_time_source(rng, time),
                node,
            })
        }

        /// Returns the node identifier that [`generate`](Self::generate) embeds.
        pub const fn node(&self) -> [u8; 6] {
            self.node
        }

        /// Generates a new version 1 UUID with the current timestamp.
        #[cfg_attr(feature = "tracing", instrument(level = "trace", skip(self)))]
        pub fn generate(&self) -> UuidV1 {
            let (timestamp, clock_seq) = self.clock.next();
            assemble(timestamp, clock_seq, &self.node)
        }

        /// Generates a new version 1 UUID with the current timestamp and the given node
        /// identifier in place of the generator's own.
        ///
        /// # Errors
        ///
        /// Returns [`Error::InvalidArgumentLength`] if `node` is not six bytes long, in which
        /// case the clock sequence state is left untouched.
        #[cfg_attr(feature = "tracing", instrument(level = "trace", skip(self), err))]
        pub fn generate_with_node(&self, node: &[u8]) -> Result<UuidV1, Error> {
            let node = codec::node_from_slice(node)?;
            let (timestamp, clock_seq) = self.clock.next();
            Ok(assemble(timestamp, clock_seq, &node))
        }

        /// Generates a new version 1 UUID with the given timestamp instead of one read from the
        /// time source, advancing the clock sequence as usual.
        #[cfg_attr(feature = "tracing", instrument(level = "trace", skip(self)))]
        pub fn generate_at(&self, timestamp: u64) -> UuidV1 {
            let (timestamp, clock_seq) = self.clock.next_at(timestamp);
            assemble(timestamp, clock_seq, &self.node)
        }
    }

    /// Supports operations as an infinite iterator that produces a new version 1 UUID in each
    /// iteration.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use uuid1::{rand_source::Adapter, V1Generator};
    ///
    /// let g = V1Generator::new(Adapter(rand::rngs::OsRng));
    /// for x in g.take(8) {
    ///     assert_eq!(x.as_uuid().version(), Some(1));
    /// }
    /// ```
    impl<R: RandSource, T: TimeSource> Iterator for V1Generator<R, T> {
        type Item = UuidV1;

        fn next(&mut self) -> Option<Self::Item> {
            Some(self.generate())
        }

        fn size_hint(&self) -> (usize, Option<usize>) {
            (usize::MAX, None)
        }
    }

    impl<R: RandSource, T: TimeSource> std::iter::FusedIterator for V1Generator<R, T> {}
}
