use super::entities::{poll, poll_answer, poll_vote, Poll, PollAnswer, PollVote};
use sea_orm::sea_query::OnConflict;
use sea_orm::{entity::*, query::*, ConnectionTrait, DbErr};
use uuid::Uuid;

pub struct PollRepository<'a, C> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> PollRepository<'a, C> {
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<poll::Model>, DbErr> {
        Poll::find_by_id(id).one(self.db).await
    }

    pub async fn find_answer(&self, id: Uuid) -> Result<Option<poll_answer::Model>, DbErr> {
        PollAnswer::find_by_id(id).one(self.db).await
    }

    /// Answers in display order.
    pub async fn answers(&self, poll_id: Uuid) -> Result<Vec<poll_answer::Model>, DbErr> {
        PollAnswer::find()
            .filter(poll_answer::Column::PollId.eq(poll_id))
            .order_by_asc(poll_answer::Column::Position)
            .all(self.db)
            .await
    }

    pub async fn votes_for_answers(&self, answer_ids: &[Uuid]) -> Result<Vec<poll_vote::Model>, DbErr> {
        if answer_ids.is_empty() {
            return Ok(Vec::new());
        }
        PollVote::find()
            .filter(poll_vote::Column::PollAnswerId.is_in(answer_ids.iter().copied()))
            .all(self.db)
            .await
    }

    /// Records the vote unless the member already voted on this poll.
    /// Returns whether a row was written.
    pub async fn insert_vote_if_absent(&self, answer: &poll_answer::Model, member_id: Uuid) -> Result<bool, DbErr> {
        let active = poll_vote::ActiveModel {
            id: Set(Uuid::new_v4()),
            poll_id: Set(answer.poll_id),
            poll_answer_id: Set(answer.id),
            member_id: Set(member_id),
            created_at: Set(Some(chrono::Utc::now())),
        };

        let result = PollVote::insert(active)
            .on_conflict(
                OnConflict::columns([poll_vote::Column::PollId, poll_vote::Column::MemberId])
                    .do_nothing()
                    .to_owned(),
            )
            .exec_without_returning(self.db)
            .await;

        match result {
            Ok(rows) => Ok(rows > 0),
            Err(DbErr::RecordNotInserted) => Ok(false),
            Err(e) => Err(e),
        }
    }
}
