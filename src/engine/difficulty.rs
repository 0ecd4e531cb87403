pub const INITIAL_DIFFICULTY: u32 = 1;
pub const INITIAL_TIME_LIMIT_MS: u64 = 30_000;
pub const MIN_TIME_LIMIT_MS: u64 = 10_000;
pub const TIME_LIMIT_STEP_MS: u64 = 5_000;
/// Scores that are exact positive multiples of this advance the difficulty.
pub const ADVANCE_EVERY: u32 = 50;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Advance {
    pub difficulty_level: u32,
    pub time_limit_ms: u64,
    pub advanced: bool,
}

/// Checked after every correct answer, against the score with the combo
/// bonus already added. A score that jumps over a multiple of 50 does not
/// trigger an advance later.
pub fn maybe_advance(score: u32, difficulty_level: u32, time_limit_ms: u64) -> Advance {
    if score > 0 && score % ADVANCE_EVERY == 0 {
        Advance {
            difficulty_level: difficulty_level + 1,
            time_limit_ms: time_limit_ms
                .saturating_sub(TIME_LIMIT_STEP_MS)
                .max(MIN_TIME_LIMIT_MS),
            advanced: true,
        }
    } else {
        Advance {
            difficulty_level,
            time_limit_ms,
            advanced: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_advance_at_zero() {
        let adv = maybe_advance(0, 1, INITIAL_TIME_LIMIT_MS);
        assert!(!adv.advanced);
        assert_eq!(adv.difficulty_level, 1);
        assert_eq!(adv.time_limit_ms, INITIAL_TIME_LIMIT_MS);
    }

    #[test]
    fn test_advance_on_exact_multiple() {
        let adv = maybe_advance(50, 1, INITIAL_TIME_LIMIT_MS);
        assert!(adv.advanced);
        assert_eq!(adv.difficulty_level, 2);
        assert_eq!(adv.time_limit_ms, 25_000);
    }

    #[test]
    fn test_no_advance_off_multiple() {
        for score in [10, 35, 48, 55, 58, 70, 99, 101] {
            assert!(!maybe_advance(score, 1, INITIAL_TIME_LIMIT_MS).advanced, "score {score}");
        }
    }

    #[test]
    fn test_time_limit_floor() {
        let mut level = INITIAL_DIFFICULTY;
        let mut limit = INITIAL_TIME_LIMIT_MS;
        let mut limits = Vec::new();
        for k in 1..=8 {
            let adv = maybe_advance(50 * k, level, limit);
            assert!(adv.advanced);
            level = adv.difficulty_level;
            limit = adv.time_limit_ms;
            limits.push(limit);
        }
        assert_eq!(
            limits,
            vec![25_000, 20_000, 15_000, 10_000, 10_000, 10_000, 10_000, 10_000]
        );
        assert_eq!(level, 9);
    }

    #[test]
    fn test_floor_never_undershoots_from_odd_limit() {
        let adv = maybe_advance(100, 3, 12_000);
        assert_eq!(adv.time_limit_ms, MIN_TIME_LIMIT_MS);
    }
}
