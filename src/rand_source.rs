//! Random number sources for the version 1 generator.

/// A trait that defines the minimum random number generator interface for
/// [`V1Generator`](crate::V1Generator).
///
/// The source supplies the random node identifier and the clock sequence seeds, so it should be
/// cryptographically strong when identifiers have to be hard to predict.
pub trait RandSource {
    /// Returns the next random `u32`.
    fn next_u32(&mut self) -> u32;

    /// Fills `dest` with random data.
    fn fill_bytes(&mut self, dest: &mut [u8]);
}

/// An adapter that implements [`RandSource`] for [`RngCore`](rand::RngCore) types from `rand`
/// (v0.8) crate.
///
/// # Examples
///
/// ```rust
/// use uuid1::{rand_source::Adapter, V1Generator};
///
/// let g = V1Generator::new(Adapter(rand::rngs::OsRng));
/// println!("{}", g.generate());
/// ```
#[derive(Clone, Eq, PartialEq, Debug, Default)]
pub struct Adapter<T>(/** The wrapped [`RngCore`](rand::RngCore) type. */ pub T);

impl<T: rand::RngCore> RandSource for Adapter<T> {
    fn next_u32(&mut self) -> u32 {
        self.0.next_u32()
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        self.0.fill_bytes(dest)
    }
}

/// Draws a random node identifier with the multicast bit (the least significant bit of the first
/// byte) set, so that it can never collide with an IEEE 802 hardware address.
pub fn random_node(rng: &mut impl RandSource) -> [u8; 6] {
    let mut node = [0u8; 6];
    rng.fill_bytes(&mut node);
    node[0] |= 0x01;
    node
}

#[cfg(test)]
mod tests {
    use super::{random_node, Adapter, RandSource};

    /// Sets multicast bit of random nodes
    #[test]
    fn sets_multicast_bit_of_random_nodes() {
        let mut rng = Adapter(rand::thread_rng());
        let mut seen_zero_bit = false;
        for _ in 0..1_000 {
            let node = random_node(&mut rng);
            assert_eq!(node[0] & 0x01, 0x01);
            seen_zero_bit |= node[0] & 0x02 == 0;
        }
        assert!(seen_zero_bit);
    }

    /// Forwards to wrapped generator
    #[test]
    fn forwards_to_wrapped_generator() {
        use rand::SeedableRng;

        let mut a = Adapter(rand::rngs::StdRng::seed_from_u64(42));
        let mut b = rand::rngs::StdRng::seed_from_u64(42);
        assert_eq!(a.next_u32(), rand::RngCore::next_u32(&mut b));

        let mut x = [0u8; 10];
        let mut y = [0u8; 10];
        a.fill_bytes(&mut x);
        rand::RngCore::fill_bytes(&mut b, &mut y);
        assert_eq!(x, y);
    }
}
