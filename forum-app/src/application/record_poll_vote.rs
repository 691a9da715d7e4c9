use crate::domain::{PollAnswerView, PollView, PollVoteResult};
use crate::infrastructure::db::{MemberRepository, PollRepository, StoreError, UnitOfWorkManager};
use forum_errors::AppError;
use sea_orm::ConnectionTrait;
use std::collections::HashMap;
use uuid::Uuid;

const GENERIC_ERROR: &str = "Errors.GenericMessage";

/// Records at most one vote per member per poll and returns the poll's
/// current tallies.
pub struct RecordPollVote {
    uow: UnitOfWorkManager,
}

impl RecordPollVote {
    pub fn new(uow: UnitOfWorkManager) -> Self {
        Self { uow }
    }

    pub async fn execute(
        &self,
        poll_id: Uuid,
        answer_id: Uuid,
        member_id: Uuid,
    ) -> Result<PollVoteResult, AppError> {
        let uow = self.uow.begin(GENERIC_ERROR).await?;
        let result = record(uow.connection(), poll_id, answer_id, member_id).await;
        uow.complete("record_poll_vote", result).await
    }
}

async fn record<C: ConnectionTrait>(
    db: &C,
    poll_id: Uuid,
    answer_id: Uuid,
    member_id: Uuid,
) -> Result<PollVoteResult, StoreError> {
    let polls = PollRepository::new(db);

    let answer = polls
        .find_answer(answer_id)
        .await?
        .ok_or_else(|| StoreError::not_found("poll answer", answer_id))?;
    if answer.poll_id != poll_id {
        return Err(StoreError::Invalid("Poll.InvalidAnswer"));
    }

    let member = MemberRepository::new(db)
        .find_by_id(member_id)
        .await?
        .ok_or_else(|| StoreError::not_found("member", member_id))?;

    let vote_accepted = polls.insert_vote_if_absent(&answer, member.id).await?;
    if vote_accepted {
        tracing::info!("Member {} voted {} in poll {}", member.id, answer.id, poll_id);
    } else {
        tracing::info!("Member {} already voted in poll {}", member.id, poll_id);
    }

    let poll = polls
        .find_by_id(poll_id)
        .await?
        .ok_or_else(|| StoreError::not_found("poll", poll_id))?;
    let answers = polls.answers(poll.id).await?;
    let answer_ids: Vec<Uuid> = answers.iter().map(|a| a.id).collect();
    let votes = polls.votes_for_answers(&answer_ids).await?;

    let mut per_answer: HashMap<Uuid, u64> = HashMap::new();
    for vote in &votes {
        *per_answer.entry(vote.poll_answer_id).or_default() += 1;
    }
    let already_voted = votes.iter().any(|v| v.member_id == member.id);

    Ok(PollVoteResult {
        poll: PollView {
            id: poll.id,
            topic_id: poll.topic_id,
            answers: answers
                .into_iter()
                .map(|a| PollAnswerView {
                    votes: per_answer.get(&a.id).copied().unwrap_or(0),
                    id: a.id,
                    answer: a.answer,
                })
                .collect(),
        },
        total_votes: votes.len() as u64,
        already_voted,
        vote_accepted,
    })
}
