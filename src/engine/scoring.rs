pub const BASE_POINTS: u32 = 10;
pub const COMBO_BONUS_POINTS: u32 = 5;
/// Streak length from which each correct answer earns the combo bonus.
pub const COMBO_THRESHOLD: u32 = 3;
/// Consecutive correct answers needed for one bonus-time grant.
pub const BONUS_STREAK: u32 = 5;
pub const BONUS_TIME_MS: u64 = 20_000;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ScoreState {
    pub score: u32,
    pub combo_count: u32,
    /// Always in `[0, BONUS_STREAK)` between answers.
    pub consecutive_correct: u32,
    pub time_left_ms: u64,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ScoringEvent {
    Awarded { points: u32 },
    BonusTime { bonus_ms: u64 },
    Incorrect,
}

pub fn points_for_combo(combo_count: u32) -> u32 {
    if combo_count >= COMBO_THRESHOLD {
        BASE_POINTS + COMBO_BONUS_POINTS
    } else {
        BASE_POINTS
    }
}

pub fn on_correct(state: ScoreState) -> (ScoreState, Vec<ScoringEvent>) {
    let mut next = state;
    let mut events = Vec::with_capacity(2);

    next.combo_count += 1;
    next.consecutive_correct += 1;

    let points = points_for_combo(next.combo_count);
    next.score += points;
    events.push(ScoringEvent::Awarded { points });

    if next.consecutive_correct == BONUS_STREAK {
        next.time_left_ms += BONUS_TIME_MS;
        next.consecutive_correct = 0;
        events.push(ScoringEvent::BonusTime {
            bonus_ms: BONUS_TIME_MS,
        });
    }

    (next, events)
}

pub fn on_incorrect(state: ScoreState) -> (ScoreState, Vec<ScoringEvent>) {
    let next = ScoreState {
        combo_count: 0,
        consecutive_correct: 0,
        ..state
    };
    (next, vec![ScoringEvent::Incorrect])
}

pub fn bonus_awarded(events: &[ScoringEvent]) -> bool {
    events
        .iter()
        .any(|e| matches!(e, ScoringEvent::BonusTime { .. }))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fresh() -> ScoreState {
        ScoreState {
            time_left_ms: 30_000,
            ..ScoreState::default()
        }
    }

    fn streak(state: ScoreState, n: usize) -> (ScoreState, Vec<Vec<ScoringEvent>>) {
        let mut s = state;
        let mut all = Vec::new();
        for _ in 0..n {
            let (next, events) = on_correct(s);
            s = next;
            all.push(events);
        }
        (s, all)
    }

    #[test]
    fn test_first_two_score_ten_then_fifteen() {
        let (_, events) = streak(fresh(), 6);
        let points: Vec<u32> = events
            .iter()
            .map(|evs| match evs[0] {
                ScoringEvent::Awarded { points } => points,
                _ => panic!("first event must be the award"),
            })
            .collect();
        assert_eq!(points, vec![10, 10, 15, 15, 15, 15]);
    }

    #[test]
    fn test_three_correct_is_thirty_five() {
        let (s, _) = streak(fresh(), 3);
        assert_eq!(s.score, 35);
        assert_eq!(s.combo_count, 3);
    }

    #[test]
    fn test_bonus_on_fifth_and_tenth_only() {
        let (s, events) = streak(fresh(), 10);
        let bonus_at: Vec<usize> = events
            .iter()
            .enumerate()
            .filter(|(_, evs)| bonus_awarded(evs))
            .map(|(i, _)| i + 1)
            .collect();
        assert_eq!(bonus_at, vec![5, 10]);
        assert_eq!(s.time_left_ms, 30_000 + 2 * BONUS_TIME_MS);
        assert_eq!(s.consecutive_correct, 0);
        assert_eq!(s.combo_count, 10);
    }

    #[test]
    fn test_consecutive_resets_right_after_grant() {
        let (s, _) = streak(fresh(), 5);
        assert_eq!(s.consecutive_correct, 0);
        let (s, events) = streak(s, 2);
        assert_eq!(s.consecutive_correct, 2);
        assert!(events.iter().all(|evs| !bonus_awarded(evs)));
    }

    #[test]
    fn test_incorrect_resets_streaks_but_keeps_score_and_time() {
        let (s, _) = streak(fresh(), 4);
        let (after, events) = on_incorrect(s);
        assert_eq!(events, vec![ScoringEvent::Incorrect]);
        assert_eq!(after.combo_count, 0);
        assert_eq!(after.consecutive_correct, 0);
        assert_eq!(after.score, s.score);
        assert_eq!(after.time_left_ms, s.time_left_ms);
    }

    #[test]
    fn test_incorrect_breaks_bonus_progress() {
        let (s, _) = streak(fresh(), 4);
        let (s, _) = on_incorrect(s);
        let (s, events) = streak(s, 4);
        assert!(events.iter().all(|evs| !bonus_awarded(evs)));
        assert_eq!(s.time_left_ms, 30_000);
    }
}
