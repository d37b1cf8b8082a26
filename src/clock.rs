//! Timestamps and clock sequence state for version 1 generation.

#![cfg(feature = "std")]
#![cfg_attr(docsrs, doc(cfg(feature = "std")))]

use std::time::{Duration, SystemTime, UNIX_EPOCH};

#[cfg(feature = "parking_lot")]
use parking_lot::Mutex;
#[cfg(not(feature = "parking_lot"))]
use std::sync::{Mutex, PoisonError};
#[cfg(feature = "tracing")]
use tracing::instrument;

use crate::codec::{GREGORIAN_OFFSET, MAX_CLOCK_SEQ, MAX_TIMESTAMP};
use crate::RandSource;

const TICKS_PER_SEC: u64 = 10_000_000;

/// A trait that supplies the current time as 100-nanosecond ticks since the Gregorian epoch.
pub trait TimeSource {
    /// Returns the current timestamp.
    fn ticks(&self) -> u64;
}

/// The default [`TimeSource`] that reads [`SystemTime::now()`].
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Default)]
pub struct StdSystemTime;

impl TimeSource for StdSystemTime {
    fn ticks(&self) -> u64 {
        ticks_from_system_time(SystemTime::now())
    }
}

impl<F: Fn() -> u64> TimeSource for F {
    fn ticks(&self) -> u64 {
        self()
    }
}

/// Converts a [`SystemTime`] into 100-nanosecond ticks since the Gregorian epoch, saturating at
/// the bounds of the 60-bit timestamp.
pub fn ticks_from_system_time(time: SystemTime) -> u64 {
    let to_ticks = |d: Duration| {
        d.as_secs()
            .saturating_mul(TICKS_PER_SEC)
            .saturating_add(u64::from(d.subsec_nanos() / 100))
    };

    match time.duration_since(UNIX_EPOCH) {
        Ok(since) => GREGORIAN_OFFSET.saturating_add(to_ticks(since)),
        Err(err) => GREGORIAN_OFFSET.saturating_sub(to_ticks(err.duration())),
    }
    .min(MAX_TIMESTAMP)
}

/// Converts 100-nanosecond ticks since the Gregorian epoch into a [`SystemTime`], or returns `None`
/// if the platform cannot represent the time.
pub fn system_time_from_ticks(ticks: u64) -> Option<SystemTime> {
    let to_duration = |t: u64| Duration::new(t / TICKS_PER_SEC, (t % TICKS_PER_SEC) as u32 * 100);

    if ticks >= GREGORIAN_OFFSET {
        UNIX_EPOCH.checked_add(to_duration(ticks - GREGORIAN_OFFSET))
    } else {
        UNIX_EPOCH.checked_sub(to_duration(GREGORIAN_OFFSET - ticks))
    }
}

/// Represents the clock sequence state that disambiguates version 1 UUIDs generated within the
/// same timestamp tick.
///
/// The last timestamp, the sequence counter, and the random number generator that reseeds the
/// counter live behind a single mutex. [`next`](Self::next) and [`next_at`](Self::next_at) are the
/// only ways to touch them, and the critical section does nothing but compare and update two
/// integers (plus a random draw when the timestamp changes).
///
/// # Examples
///
/// ```rust
/// use uuid1::{clock::ClockSequence, rand_source::Adapter};
///
/// let clock = ClockSequence::new(Adapter(rand::rngs::OsRng));
/// let (ts0, seq0) = clock.next_at(0x1ec_9414_c232_ab00);
/// let (ts1, seq1) = clock.next_at(0x1ec_9414_c232_ab00);
/// assert_eq!(ts0, ts1);
/// assert_eq!(seq1, (seq0 + 1) & 0x3fff);
/// ```
#[derive(Debug)]
pub struct ClockSequence<R, T = StdSystemTime> {
    state: Mutex<State<R>>,
    time: T,
}

#[derive(Debug)]
struct State<R> {
    last_timestamp: u64,
    sequence: u16,
    rng: R,
}

impl<R: RandSource> ClockSequence<R> {
    /// Creates a clock sequence that reads [`SystemTime`].
    pub fn new(rng: R) -> Self {
        Self::with_time_source(rng, StdSystemTime)
    }
}

impl<R: RandSource, T: TimeSource> ClockSequence<R, T> {
    /// Creates a clock sequence with a custom time source. The sequence counter starts at a random
    /// value drawn from `rng`.
    pub fn with_time_source(mut rng: R, time: T) -> Self {
        let sequence = draw_sequence(&mut rng);
        Self {
            state: Mutex::new(State {
                last_timestamp: 0,
                sequence,
                rng,
            }),
            time,
        }
    }

    /// Returns the current timestamp and the clock sequence to encode with it.
    ///
    /// The sequence is incremented (wrapping within 14 bits) if the timestamp equals the one
    /// returned by the preceding call; otherwise, it is reseeded with a random value.
    #[cfg_attr(feature = "tracing", instrument(level = "trace", skip(self)))]
    pub fn next(&self) -> (u64, u16) {
        let mut state = self.lock();
        let timestamp = self.time.ticks();
        state.advance(timestamp)
    }

    /// Works like [`next`](Self::next) but takes the timestamp from the argument instead of the
    /// time source.
    ///
    /// Bits above the 60th of `timestamp` are discarded.
    #[cfg_attr(feature = "tracing", instrument(level = "trace", skip(self)))]
    pub fn next_at(&self, timestamp: u64) -> (u64, u16) {
        self.lock().advance(timestamp)
    }

    #[cfg(feature = "parking_lot")]
    fn lock(&self) -> parking_lot::MutexGuard<'_, State<R>> {
        self.state.lock()
    }

    #[cfg(not(feature = "parking_lot"))]
    fn lock(&self) -> std::sync::MutexGuard<'_, State<R>> {
        // the state is consistent at every point where a panic could occur
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl<R: RandSource> State<R> {
    fn advance(&mut self, timestamp: u64) -> (u64, u16) {
        let timestamp = timestamp & MAX_TIMESTAMP;
        if timestamp == self.last_timestamp {
            self.sequence = self.sequence.wrapping_add(1) & MAX_CLOCK_SEQ;
        } else {
            self.last_timestamp = timestamp;
            self.sequence = draw_sequence(&mut self.rng);
        }
        (self.last_timestamp, self.sequence)
    }
}

fn draw_sequence(rng: &mut impl RandSource) -> u16 {
    rng.next_u32() as u16 & MAX_CLOCK_SEQ
}

#[cfg(test)]
pub(crate) mod tests {
    use super::{
        system_time_from_ticks, ticks_from_system_time, ClockSequence, StdSystemTime, TimeSource,
    };
    use crate::codec::{GREGORIAN_OFFSET, MAX_CLOCK_SEQ};
    use crate::RandSource;
    use std::time::{Duration, SystemTime, UNIX_EPOCH};

    /// A random source that returns the same value over and over.
    #[derive(Debug)]
    pub(crate) struct ConstantRand(pub u32);

    impl RandSource for ConstantRand {
        fn next_u32(&mut self) -> u32 {
            self.0
        }

        fn fill_bytes(&mut self, dest: &mut [u8]) {
            for (d, s) in dest.iter_mut().zip(self.0.to_be_bytes().iter().cycle()) {
                *d = *s;
            }
        }
    }

    /// Increments sequence within same timestamp
    #[test]
    fn increments_sequence_within_same_timestamp() {
        let ts = 0x1ec_9414_c232_ab00;
        let clock = ClockSequence::new(ConstantRand(0x1234_33c8));
        assert_eq!(clock.next_at(ts), (ts, 0x33c8));
        assert_eq!(clock.next_at(ts), (ts, 0x33c9));
        assert_eq!(clock.next_at(ts), (ts, 0x33ca));
        assert_eq!(clock.next_at(ts + 1), (ts + 1, 0x33c8));
        assert_eq!(clock.next_at(ts + 1), (ts + 1, 0x33c9));
    }

    /// Reseeds sequence when timestamp changes in either direction
    #[test]
    fn reseeds_sequence_when_timestamp_changes_in_either_direction() {
        let clock = ClockSequence::new(crate::rand_source::Adapter(rand::thread_rng()));
        let mut reseeded = 0;
        for i in 0..1_000u64 {
            let ts = if i % 2 == 0 { 1_000_000 + i } else { 1_000_000 - i };
            let (t0, s0) = clock.next_at(ts);
            let (t1, s1) = clock.next_at(ts);
            assert_eq!(t0, ts);
            assert_eq!(t1, ts);
            assert_eq!(s1, (s0 + 1) & MAX_CLOCK_SEQ);
            let (t2, s2) = clock.next_at(ts + 7);
            assert_eq!(t2, ts + 7);
            assert!(s2 <= MAX_CLOCK_SEQ);
            reseeded += usize::from(s2 != (s1 + 1) & MAX_CLOCK_SEQ);
        }
        assert!(reseeded > 900);
    }

    /// Wraps sequence within 14 bits
    #[test]
    fn wraps_sequence_within_14_bits() {
        let clock = ClockSequence::new(ConstantRand(u32::MAX));
        assert_eq!(clock.next_at(42), (42, MAX_CLOCK_SEQ));
        assert_eq!(clock.next_at(42), (42, 0));
        assert_eq!(clock.next_at(42), (42, 1));
    }

    /// Increments from initial seed if first timestamp is zero
    #[test]
    fn increments_from_initial_seed_if_first_timestamp_is_zero() {
        let clock = ClockSequence::new(ConstantRand(5));
        assert_eq!(clock.next_at(0), (0, 6));
    }

    /// Discards timestamp bits above 60th
    #[test]
    fn discards_timestamp_bits_above_60th() {
        let clock = ClockSequence::new(ConstantRand(0));
        assert_eq!(clock.next_at(u64::MAX), ((1 << 60) - 1, 0));
        assert_eq!(clock.next_at(1 << 60), (0, 0));
    }

    /// Reads time from time source
    #[test]
    fn reads_time_from_time_source() {
        use std::sync::atomic::{AtomicU64, Ordering};

        let now = AtomicU64::new(100);
        let clock = ClockSequence::with_time_source(ConstantRand(7), || now.load(Ordering::Relaxed));
        assert_eq!(clock.next(), (100, 7));
        assert_eq!(clock.next(), (100, 8));
        now.store(101, Ordering::Relaxed);
        assert_eq!(clock.next(), (101, 7));
    }

    /// Produces distinct pairs under multithreading
    #[test]
    fn produces_distinct_pairs_under_multithreading() {
        use std::{collections::HashSet, sync::Arc, thread};

        let clock = Arc::new(ClockSequence::with_time_source(
            crate::rand_source::Adapter(rand::rngs::OsRng),
            || 0x0123_4567_89ab_u64,
        ));
        let handles: Vec<_> = (0..8)
            .map(|_| {
                let clock = Arc::clone(&clock);
                thread::spawn(move || (0..2_000).map(|_| clock.next()).collect::<Vec<_>>())
            })
            .collect();

        let mut s = HashSet::new();
        for h in handles {
            s.extend(h.join().unwrap());
        }
        assert_eq!(s.len(), 8 * 2_000);
    }

    /// Reads up-to-date system time
    #[test]
    fn reads_up_to_date_system_time() {
        let expected = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("clock may have gone backwards")
            .as_nanos() as u64
            / 100
            + GREGORIAN_OFFSET;
        let actual = StdSystemTime.ticks();
        assert!(actual >= expected);
        assert!(actual - expected < 10_000_000);
    }

    /// Converts between system time and ticks
    #[test]
    fn converts_between_system_time_and_ticks() {
        assert_eq!(ticks_from_system_time(UNIX_EPOCH), GREGORIAN_OFFSET);
        assert_eq!(
            ticks_from_system_time(UNIX_EPOCH + Duration::new(1, 250)),
            GREGORIAN_OFFSET + 10_000_002
        );
        assert_eq!(
            ticks_from_system_time(UNIX_EPOCH - Duration::from_secs(1)),
            GREGORIAN_OFFSET - 10_000_000
        );

        // 2022-02-22 19:22:22 UTC from the RFC 9562 version 1 example
        let time = UNIX_EPOCH + Duration::from_secs(1_645_557_742);
        assert_eq!(ticks_from_system_time(time), 0x1ec_9414_c232_ab00);
        assert_eq!(system_time_from_ticks(0x1ec_9414_c232_ab00), Some(time));
        assert_eq!(system_time_from_ticks(GREGORIAN_OFFSET), Some(UNIX_EPOCH));
        assert_eq!(
            system_time_from_ticks(GREGORIAN_OFFSET - 10_000_000),
            Some(UNIX_EPOCH - Duration::from_secs(1))
        );
    }
}
