use rand::Rng;
use rand::SeedableRng;
use rand::rngs::SmallRng;

/// Source of bounded random integers for question generation.
pub trait RandomSource {
    /// Uniform integer in `[min_inclusive, max_exclusive)`.
    /// An empty range yields `min_inclusive`.
    fn next_int(&mut self, min_inclusive: i64, max_exclusive: i64) -> i64;

    fn choose<'a, T>(&mut self, options: &'a [T]) -> Option<&'a T>
    where
        Self: Sized,
    {
        if options.is_empty() {
            return None;
        }
        let idx = self.next_int(0, options.len() as i64) as usize;
        options.get(idx)
    }
}

pub struct SeededRandom {
    rng: SmallRng,
}

impl SeededRandom {
    pub fn from_seed(seed: u64) -> Self {
        Self {
            rng: SmallRng::seed_from_u64(seed),
        }
    }

    pub fn from_entropy() -> Self {
        Self {
            rng: SmallRng::from_entropy(),
        }
    }
}

impl RandomSource for SeededRandom {
    fn next_int(&mut self, min_inclusive: i64, max_exclusive: i64) -> i64 {
        if max_exclusive <= min_inclusive {
            return min_inclusive;
        }
        self.rng.gen_range(min_inclusive..max_exclusive)
    }
}

#[cfg(test)]
pub(crate) mod scripted {
    use std::collections::VecDeque;

    use super::RandomSource;

    /// Replays a fixed list of draws. Each value is clamped into the requested
    /// range so scripts stay valid when the range changes.
    pub struct ScriptedRandom {
        values: VecDeque<i64>,
    }

    impl ScriptedRandom {
        pub fn new(values: &[i64]) -> Self {
            Self {
                values: values.iter().copied().collect(),
            }
        }
    }

    impl RandomSource for ScriptedRandom {
        fn next_int(&mut self, min_inclusive: i64, max_exclusive: i64) -> i64 {
            let v = self.values.pop_front().unwrap_or(min_inclusive);
            v.clamp(min_inclusive, (max_exclusive - 1).max(min_inclusive))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_next_int_stays_in_range() {
        let mut rng = SeededRandom::from_seed(42);
        for _ in 0..1000 {
            let v = rng.next_int(1, 10);
            assert!((1..10).contains(&v), "out of range: {v}");
        }
    }

    #[test]
    fn test_empty_range_returns_min() {
        let mut rng = SeededRandom::from_seed(7);
        assert_eq!(rng.next_int(5, 5), 5);
        assert_eq!(rng.next_int(5, 2), 5);
    }

    #[test]
    fn test_same_seed_same_sequence() {
        let mut a = SeededRandom::from_seed(1234);
        let mut b = SeededRandom::from_seed(1234);
        let xs: Vec<i64> = (0..20).map(|_| a.next_int(0, 1000)).collect();
        let ys: Vec<i64> = (0..20).map(|_| b.next_int(0, 1000)).collect();
        assert_eq!(xs, ys);
    }

    #[test]
    fn test_choose_empty_is_none() {
        let mut rng = SeededRandom::from_seed(3);
        let empty: [u8; 0] = [];
        assert!(rng.choose(&empty).is_none());
    }

    #[test]
    fn test_choose_eventually_hits_every_option() {
        let mut rng = SeededRandom::from_seed(99);
        let options = ['a', 'b', 'c'];
        let mut seen = [false; 3];
        for _ in 0..200 {
            if let Some(ch) = rng.choose(&options) {
                let idx = options.iter().position(|o| o == ch).unwrap();
                seen[idx] = true;
            }
        }
        assert!(seen.iter().all(|&s| s));
    }
}
