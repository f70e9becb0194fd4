// Random sources for maze carving.
//
// None of these are cryptographically secure. They exist for reproducible
// layouts: the same seed always carves the same maze.

/// Random seam consumed by the generator.
///
/// Only [`next_u32`](RandomSource::next_u32) is required; the unbiased range
/// draw and the shuffle are built on top of it so every implementation
/// shuffles the same way for the same raw stream.
pub trait RandomSource {
    fn next_u32(&mut self) -> u32;

    /// Uniform value in `0..bound` by rejection sampling. `bound` must be > 0.
    fn below(&mut self, bound: u32) -> u32 {
        debug_assert!(bound > 0);
        let bound = bound.max(1);
        // Largest multiple of `bound` that fits; draws at or above it are biased.
        let limit = u32::MAX - u32::MAX % bound;
        loop {
            let v = self.next_u32();
            if v < limit {
                return v % bound;
            }
        }
    }

    /// Fisher–Yates: every permutation equally likely.
    fn shuffle<T>(&mut self, items: &mut [T])
    where
        Self: Sized,
    {
        for i in (1..items.len()).rev() {
            let j = self.below(i as u32 + 1) as usize;
            items.swap(i, j);
        }
    }
}

impl<R: RandomSource + ?Sized> RandomSource for &mut R {
    fn next_u32(&mut self) -> u32 {
        (**self).next_u32()
    }
}

const ZERO_STATE_REPLACEMENT: u64 = 0x9E37_79B9_7F4A_7C15;

/// Seeded xorshift64* stream.
#[derive(Debug, Clone)]
pub struct Prng {
    state: u64,
}

impl Prng {
    pub fn new(seed: u64) -> Self {
        // xorshift never leaves the zero state.
        let state = if seed == 0 {
            ZERO_STATE_REPLACEMENT
        } else {
            seed
        };
        Self { state }
    }

    #[inline]
    pub fn next_u64(&mut self) -> u64 {
        let mut x = self.state;
        x ^= x >> 12;
        x ^= x << 25;
        x ^= x >> 27;
        self.state = x;
        x.wrapping_mul(0x2545_F491_4F6C_DD1D)
    }
}

impl RandomSource for Prng {
    #[inline]
    fn next_u32(&mut self) -> u32 {
        (self.next_u64() >> 32) as u32
    }
}

/// Replays a fixed list of raw draws, cycling when exhausted.
///
/// Useful for pinning a carve order: `[0, 2, 1]` turns the base order
/// `[Up, Down, Left, Right]` into `[Right, Down, Left, Up]` at every cell.
#[derive(Debug, Clone)]
pub struct ScriptedSource {
    draws: Vec<u32>,
    idx: usize,
}

impl ScriptedSource {
    pub fn new(draws: Vec<u32>) -> Self {
        let draws = if draws.is_empty() { vec![0] } else { draws };
        Self { draws, idx: 0 }
    }
}

impl RandomSource for ScriptedSource {
    fn next_u32(&mut self) -> u32 {
        let v = self.draws[self.idx % self.draws.len()];
        self.idx = self.idx.wrapping_add(1);
        v
    }
}

/// Adapter so any `rand` generator can drive the carver.
#[cfg(feature = "rand")]
#[derive(Debug, Clone)]
pub struct RngSource<R>(pub R);

#[cfg(feature = "rand")]
impl<R: rand::RngCore> RandomSource for RngSource<R> {
    fn next_u32(&mut self) -> u32 {
        self.0.next_u32()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_seed_same_stream() {
        let mut a = Prng::new(7);
        let mut b = Prng::new(7);
        for _ in 0..32 {
            assert_eq!(a.next_u32(), b.next_u32());
        }
    }

    #[test]
    fn zero_seed_does_not_stick() {
        let mut p = Prng::new(0);
        let first = p.next_u64();
        assert_ne!(first, 0);
        assert_ne!(first, p.next_u64());
    }

    #[test]
    fn below_stays_in_range() {
        let mut p = Prng::new(99);
        for bound in 1..=9 {
            for _ in 0..200 {
                assert!(p.below(bound) < bound);
            }
        }
    }

    #[test]
    fn below_rejects_biased_tail() {
        // u32::MAX sits in the biased tail for bound 3 and must be skipped.
        let mut s = ScriptedSource::new(vec![u32::MAX, 5]);
        assert_eq!(s.below(3), 2);
    }

    #[test]
    fn shuffle_hits_every_permutation() {
        let mut p = Prng::new(0xDEC0DE);
        let mut seen = std::collections::HashSet::new();
        for _ in 0..2_000 {
            let mut v = [0u8, 1, 2, 3];
            p.shuffle(&mut v);
            seen.insert(v);
        }
        assert_eq!(seen.len(), 24);
    }

    #[test]
    fn scripted_source_pins_order() {
        let mut s = ScriptedSource::new(vec![0, 2, 1]);
        let mut v = ['U', 'D', 'L', 'R'];
        s.shuffle(&mut v);
        assert_eq!(v, ['R', 'D', 'L', 'U']);
        // Cycles, so the next shuffle repeats the same swaps.
        let mut w = ['U', 'D', 'L', 'R'];
        s.shuffle(&mut w);
        assert_eq!(w, ['R', 'D', 'L', 'U']);
    }

    #[cfg(feature = "rand")]
    #[test]
    fn rand_adapter_is_deterministic() {
        use rand::SeedableRng;
        let mut a = RngSource(rand::rngs::SmallRng::seed_from_u64(3));
        let mut b = RngSource(rand::rngs::SmallRng::seed_from_u64(3));
        assert_eq!(a.next_u32(), b.next_u32());
    }
}
