use crate::generator::question::Question;
use crate::session::result::GameSummary;

/// Notifications produced by a [`crate::session::game::GameSession`]
/// transition, in the order they happened.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum GameEvent {
    QuestionChanged(Question),
    ScoreChanged(u32),
    TimeChanged { seconds_remaining: u64 },
    BonusAwarded { bonus_ms: u64 },
    IncorrectAnswer,
    DifficultyAdvanced { level: u32, time_limit_ms: u64 },
    GameOver(GameSummary),
}

/// Receiver side of [`GameEvent`]s. Every hook defaults to doing nothing.
pub trait GameObserver {
    fn on_question_changed(&mut self, _question: &Question) {}
    fn on_score_changed(&mut self, _score: u32) {}
    fn on_time_changed(&mut self, _seconds_remaining: u64) {}
    fn on_bonus_awarded(&mut self) {}
    fn on_incorrect_answer(&mut self) {}
    fn on_difficulty_advanced(&mut self, _level: u32, _time_limit_ms: u64) {}
    fn on_game_over(&mut self, _summary: &GameSummary) {}
}

pub fn dispatch<O: GameObserver + ?Sized>(events: &[GameEvent], observer: &mut O) {
    for event in events {
        match event {
            GameEvent::QuestionChanged(q) => observer.on_question_changed(q),
            GameEvent::ScoreChanged(score) => observer.on_score_changed(*score),
            GameEvent::TimeChanged { seconds_remaining } => {
                observer.on_time_changed(*seconds_remaining)
            }
            GameEvent::BonusAwarded { .. } => observer.on_bonus_awarded(),
            GameEvent::IncorrectAnswer => observer.on_incorrect_answer(),
            GameEvent::DifficultyAdvanced {
                level,
                time_limit_ms,
            } => observer.on_difficulty_advanced(*level, *time_limit_ms),
            GameEvent::GameOver(summary) => observer.on_game_over(summary),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generator::question::Operator;

    #[derive(Default)]
    struct Recorder {
        calls: Vec<String>,
    }

    impl GameObserver for Recorder {
        fn on_question_changed(&mut self, question: &Question) {
            self.calls.push(format!("question {question}"));
        }
        fn on_score_changed(&mut self, score: u32) {
            self.calls.push(format!("score {score}"));
        }
        fn on_bonus_awarded(&mut self) {
            self.calls.push("bonus".into());
        }
    }

    #[test]
    fn test_dispatch_preserves_order_and_skips_default_hooks() {
        let events = vec![
            GameEvent::ScoreChanged(10),
            GameEvent::BonusAwarded { bonus_ms: 20_000 },
            GameEvent::TimeChanged {
                seconds_remaining: 42,
            },
            GameEvent::QuestionChanged(Question::new(3, 4, Operator::Add)),
        ];
        let mut rec = Recorder::default();
        dispatch(&events, &mut rec);
        assert_eq!(rec.calls, vec!["score 10", "bonus", "question 3 + 4"]);
    }
}
