use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PollAnswerView {
    pub id: uuid::Uuid,
    pub answer: String,
    pub votes: u64,
}

impl PollAnswerView {
    /// Share of `total` as a whole percentage.
    pub fn percentage(&self, total: u64) -> u64 {
        if total == 0 {
            0
        } else {
            (self.votes * 100 + total / 2) / total
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PollView {
    pub id: uuid::Uuid,
    pub topic_id: uuid::Uuid,
    pub answers: Vec<PollAnswerView>,
}

/// Result of a vote attempt, computed after the attempt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PollVoteResult {
    pub poll: PollView,
    pub total_votes: u64,
    pub already_voted: bool,
    /// False when the member had already voted on this poll and nothing
    /// was written.
    pub vote_accepted: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn percentage_rounds_and_handles_empty_polls() {
        let answer = PollAnswerView {
            id: uuid::Uuid::new_v4(),
            answer: "Yes".into(),
            votes: 1,
        };
        assert_eq!(answer.percentage(0), 0);
        assert_eq!(answer.percentage(3), 33);
        assert_eq!(answer.percentage(2), 50);
        assert_eq!(answer.percentage(1), 100);
    }
}
