use rand::prelude::*;

use super::*;

/// Deterministic source: the same seed always produces the same sequence of positions, and thus the
/// same mine layout.
#[derive(Clone, Debug)]
pub struct SeededSource {
    rng: SmallRng,
}

impl SeededSource {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: SmallRng::seed_from_u64(seed),
        }
    }
}

impl PositionSource for SeededSource {
    fn next_position(&mut self, bound: CellCount) -> CellCount {
        self.rng.random_range(0..bound)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn positions_stay_in_bounds() {
        let mut source = SeededSource::new(7);

        for _ in 0..1000 {
            assert!(source.next_position(12) < 12);
        }
    }

    #[test]
    fn same_seed_repeats_sequence() {
        let mut a = SeededSource::new(42);
        let mut b = SeededSource::new(42);

        for _ in 0..32 {
            assert_eq!(a.next_position(96), b.next_position(96));
        }
    }
}
