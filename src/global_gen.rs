//! Default generator and entry point functions.

#![cfg(feature = "global_gen")]
#![cfg_attr(docsrs, doc(cfg(feature = "global_gen")))]

use std::sync;

use crate::{Error, UuidV1};
use inner::GlobalGenInner;

/// Returns the lock handle of process-wide global generator, creating one if none exists.
fn lock_global_gen() -> sync::MutexGuard<'static, GlobalGenInner> {
    static G: sync::OnceLock<sync::Mutex<GlobalGenInner>> = sync::OnceLock::new();
    G.get_or_init(Default::default)
        .lock()
        .unwrap_or_else(sync::PoisonError::into_inner)
}

/// Generates a version 1 UUID with a random node identifier.
///
/// This function employs a global generator whose clock sequence is shared by all threads, so no
/// two calls in a process return the same identifier while the system clock moves forward. On
/// Unix, this function resets the generator (drawing a new node identifier and clock sequence)
/// when the process ID changes (i.e., upon process forks) to prevent collisions across processes.
///
/// # Examples
///
/// ```rust
/// let uuid = uuid1::uuid1();
/// println!("{}", uuid); // e.g., "f3b4958c-52a1-11e7-802a-e7e4f0d1c3b5"
/// println!("{:?}", uuid.as_bytes()); // as 16-byte big-endian array
///
/// let uuid_string: String = uuid1::uuid1().to_string();
/// ```
pub fn uuid1() -> UuidV1 {
    lock_global_gen().generator().generate()
}

/// Generates a version 1 UUID with the given six-byte node identifier, sharing the clock sequence
/// with [`uuid1()`].
///
/// # Errors
///
/// Returns [`Error::InvalidArgumentLength`] if `node` is not six bytes long.
///
/// # Examples
///
/// ```rust
/// let uuid = uuid1::uuid1_with_node(&[0x01, 0x23, 0x45, 0x67, 0x89, 0xab])?;
/// assert!(uuid.to_string().ends_with("-0123456789ab"));
/// # Ok::<(), uuid1::Error>(())
/// ```
pub fn uuid1_with_node(node: &[u8]) -> Result<UuidV1, Error> {
    lock_global_gen().generator().generate_with_node(node)
}

mod inner {
    use rand::rngs::{adapter::ReseedingRng, OsRng};
    use rand::SeedableRng;
    use rand_chacha::ChaCha12Core;

    use crate::{RandSource, V1Generator};

    /// The random number generator of the global generator.
    ///
    /// The global generator currently employs [`ChaCha12Core`] with [`ReseedingRng`] wrapper to
    /// emulate the strategy used by [`rand::rngs::ThreadRng`].
    #[derive(Debug)]
    pub struct GlobalGenRng(ReseedingRng<ChaCha12Core, OsRng>);

    impl GlobalGenRng {
        fn new() -> Self {
            let core = ChaCha12Core::from_rng(OsRng)
                .expect("uuid1: could not initialize global generator");
            Self(ReseedingRng::new(core, 1024 * 64, OsRng))
        }
    }

    impl RandSource for GlobalGenRng {
        fn next_u32(&mut self) -> u32 {
            rand::RngCore::next_u32(&mut self.0)
        }

        fn fill_bytes(&mut self, dest: &mut [u8]) {
            rand::RngCore::fill_bytes(&mut self.0, dest)
        }
    }

    /// A thin wrapper to reset the state when the process ID changes (i.e., upon Unix forks).
    #[derive(Debug)]
    pub struct GlobalGenInner {
        #[cfg(unix)]
        pid: u32,
        generator: V1Generator<GlobalGenRng>,
    }

    impl Default for GlobalGenInner {
        fn default() -> Self {
            Self {
                #[cfg(unix)]
                pid: std::process::id(),
                generator: V1Generator::new(GlobalGenRng::new()),
            }
        }
    }

    impl GlobalGenInner {
        /// Returns a reference to the inner [`V1Generator`] instance, resetting the generator
        /// state on Unix if the process ID has changed.
        pub fn generator(&mut self) -> &V1Generator<GlobalGenRng> {
            #[cfg(unix)]
            if self.pid != std::process::id() {
                #[cfg(feature = "tracing")]
                tracing::debug!(pid = std::process::id(), "resetting global generator after fork");
                *self = Default::default();
            }
            &self.generator
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{uuid1, uuid1_with_node};
    use crate::{Error, Variant};

    const N_SAMPLES: usize = 100_000;
    thread_local!(static SAMPLES: Vec<String> = (0..N_SAMPLES).map(|_| uuid1().to_string()).collect());

    /// Generates canonical string
    #[test]
    fn generates_canonical_string() {
        let pattern = r"^[0-9a-f]{8}-[0-9a-f]{4}-1[0-9a-f]{3}-[89ab][0-9a-f]{3}-[0-9a-f]{12}$";
        let re = regex::Regex::new(pattern).unwrap();
        SAMPLES.with(|samples| {
            for e in samples {
                assert!(re.is_match(e));
            }
        });
    }

    /// Generates 100k identifiers without collision
    #[test]
    fn generates_100k_identifiers_without_collision() {
        use std::collections::HashSet;
        SAMPLES.with(|samples| {
            let s: HashSet<&String> = samples.iter().collect();
            assert_eq!(s.len(), N_SAMPLES);
        });
    }

    /// Shares one node identifier across calls
    #[test]
    fn shares_one_node_identifier_across_calls() {
        SAMPLES.with(|samples| {
            let node = &samples[0][24..];
            assert!(samples.iter().all(|e| &e[24..] == node));

            // multicast bit
            let first_octet = u8::from_str_radix(&node[..2], 16).unwrap();
            assert_eq!(first_octet & 0x01, 0x01);
        });
    }

    /// Encodes up-to-date timestamp
    #[test]
    fn encodes_up_to_date_timestamp() {
        use std::time;
        for _ in 0..10_000 {
            let ts_now = time::SystemTime::now()
                .duration_since(time::UNIX_EPOCH)
                .expect("clock may have gone backwards")
                .as_millis() as i64;
            let timestamp = uuid1()
                .to_system_time()
                .unwrap()
                .duration_since(time::UNIX_EPOCH)
                .expect("clock may have gone backwards")
                .as_millis() as i64;
            assert!((ts_now - timestamp).abs() < 16);
        }
    }

    /// Sets constant bits and random bits properly
    #[test]
    fn sets_constant_bits_and_random_bits_properly() {
        // count '1' of each bit
        let bins = SAMPLES.with(|samples| {
            let mut bins = [0u32; 128];
            for e in samples {
                let mut it = bins.iter_mut().rev();
                for c in e.chars().rev() {
                    if let Some(mut num) = c.to_digit(16) {
                        for _ in 0..4 {
                            *it.next().unwrap() += num & 1;
                            num >>= 1;
                        }
                    }
                }
            }
            bins
        });

        // test if constant bits are all set to 1 or 0
        let n = N_SAMPLES as u32;
        assert_eq!(bins[48], 0, "version bit 48");
        assert_eq!(bins[49], 0, "version bit 49");
        assert_eq!(bins[50], 0, "version bit 50");
        assert_eq!(bins[51], n, "version bit 51");
        assert_eq!(bins[64], n, "variant bit 64");
        assert_eq!(bins[65], 0, "variant bit 65");
        assert_eq!(bins[87], n, "multicast bit 87");
    }

    /// Sets correct variant and version bits
    #[test]
    fn sets_correct_variant_and_version_bits() {
        for _ in 0..1_000 {
            let e = uuid1();
            assert_eq!(e.as_uuid().variant(), Variant::Var10);
            assert_eq!(e.as_uuid().version(), Some(1));
        }
    }

    /// Embeds given node identifier
    #[test]
    fn embeds_given_node_identifier() {
        let node = [0x01, 0x23, 0x45, 0x67, 0x89, 0xab];
        for _ in 0..1_000 {
            assert_eq!(uuid1_with_node(&node).unwrap().node(), node);
        }
        assert_eq!(
            uuid1_with_node(&node[..4]),
            Err(Error::InvalidArgumentLength {
                argument: "node",
                expected: 6,
                found: 4
            })
        );
    }

    /// Generates no IDs sharing same timestamp and clock sequence under multithreading
    #[test]
    fn generates_no_ids_sharing_same_timestamp_and_clock_sequence_under_multithreading(
    ) -> Result<(), Box<dyn std::error::Error>> {
        use std::{collections::HashSet, sync::mpsc, thread};

        let (tx, rx) = mpsc::channel();
        for _ in 0..8 {
            let tx = tx.clone();
            thread::Builder::new()
                .spawn(move || {
                    for _ in 0..1_250 {
                        tx.send(uuid1()).unwrap();
                    }
                })
                .map_err(|err| format!("failed to spawn thread: {:?}", err))?;
        }
        drop(tx);

        let mut s = HashSet::new();
        while let Ok(e) = rx.recv() {
            s.insert(<[u8; 10]>::try_from(&e.as_bytes()[..10]).unwrap());
        }

        assert_eq!(s.len(), 8 * 1_250);
        Ok(())
    }
}
