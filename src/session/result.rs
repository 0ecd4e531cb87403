use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Terminal summary of a finished session.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameSummary {
    pub final_score: u32,
    pub high_score: u32,
    #[serde(default)]
    pub new_high_score: bool,
    pub leaderboard: Vec<u32>,
    pub difficulty_level: u32,
    pub correct_answers: u32,
    pub incorrect_answers: u32,
    pub finished_at: DateTime<Utc>,
}

impl GameSummary {
    pub fn answered(&self) -> u32 {
        self.correct_answers + self.incorrect_answers
    }

    pub fn accuracy(&self) -> f64 {
        let total = self.answered();
        if total == 0 {
            return 100.0;
        }
        self.correct_answers as f64 / total as f64 * 100.0
    }

    /// 1-based rank of the final score on the board, if it made it.
    pub fn leaderboard_rank(&self) -> Option<usize> {
        self.leaderboard
            .iter()
            .position(|&s| s == self.final_score)
            .map(|i| i + 1)
    }
}
