use super::entities::{post, post_vote, topic, Post, PostVote, Topic};
use sea_orm::{entity::*, query::*, ConnectionTrait, DbErr, PaginatorTrait};
use uuid::Uuid;

pub struct PostRepository<'a, C> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> PostRepository<'a, C> {
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<post::Model>, DbErr> {
        Post::find_by_id(id).one(self.db).await
    }

    pub async fn find_topic(&self, topic_id: Uuid) -> Result<Option<topic::Model>, DbErr> {
        Topic::find_by_id(topic_id).one(self.db).await
    }

    /// Up and down vote counts for a post.
    pub async fn vote_counts(&self, post_id: Uuid) -> Result<(u64, u64), DbErr> {
        let up = PostVote::find()
            .filter(post_vote::Column::PostId.eq(post_id))
            .filter(post_vote::Column::Amount.gt(0))
            .count(self.db)
            .await?;
        let down = PostVote::find()
            .filter(post_vote::Column::PostId.eq(post_id))
            .filter(post_vote::Column::Amount.lt(0))
            .count(self.db)
            .await?;
        Ok((up, down))
    }
}
