use crate::domain::{FavouriteOutcome, FavouriteToggle};
use crate::infrastructure::db::{
    FavouriteRepository, MemberRepository, PostRepository, StoreError, UnitOfWorkManager,
};
use crate::infrastructure::localization::Localizer;
use forum_errors::AppError;
use sea_orm::ConnectionTrait;
use std::sync::Arc;
use uuid::Uuid;

const GENERIC_ERROR: &str = "Errors.Generic";

/// Adds a favourite when the member has none on the post, removes it
/// otherwise.
pub struct ToggleFavourite {
    uow: UnitOfWorkManager,
    localizer: Arc<Localizer>,
}

impl ToggleFavourite {
    pub fn new(uow: UnitOfWorkManager, localizer: Arc<Localizer>) -> Self {
        Self { uow, localizer }
    }

    pub async fn execute(&self, member_id: Uuid, post_id: Uuid) -> Result<FavouriteToggle, AppError> {
        let uow = self.uow.begin(GENERIC_ERROR).await?;
        let outcome = toggle(uow.connection(), member_id, post_id).await;
        let outcome = uow.complete("toggle_favourite", outcome).await?;

        Ok(match outcome {
            FavouriteOutcome::Added(id) => FavouriteToggle {
                message: Some(self.localizer.get("Post.Favourited")),
                id: Some(id),
            },
            FavouriteOutcome::Removed => FavouriteToggle {
                message: Some(self.localizer.get("Post.Favourite")),
                id: None,
            },
        })
    }
}

async fn toggle<C: ConnectionTrait>(
    db: &C,
    member_id: Uuid,
    post_id: Uuid,
) -> Result<FavouriteOutcome, StoreError> {
    let posts = PostRepository::new(db);
    let post = posts
        .find_by_id(post_id)
        .await?
        .ok_or_else(|| StoreError::not_found("post", post_id))?;
    let topic = posts
        .find_topic(post.topic_id)
        .await?
        .ok_or_else(|| StoreError::not_found("topic", post.topic_id))?;
    let member = MemberRepository::new(db)
        .find_by_id(member_id)
        .await?
        .ok_or_else(|| StoreError::not_found("member", member_id))?;

    let favourites = FavouriteRepository::new(db);

    if favourites.delete_by_member_and_post(member.id, post.id).await? > 0 {
        tracing::info!("Member {} removed favourite on post {}", member.id, post.id);
        return Ok(FavouriteOutcome::Removed);
    }

    let id = add(&favourites, member.id, post.id, topic.id).await?;
    Ok(FavouriteOutcome::Added(id))
}

/// Returns the id of the member's favourite on the post, whether written
/// here or by a concurrent request that got there first.
async fn add<C: ConnectionTrait>(
    favourites: &FavouriteRepository<'_, C>,
    member_id: Uuid,
    post_id: Uuid,
    topic_id: Uuid,
) -> Result<Uuid, StoreError> {
    let id = Uuid::new_v4();
    if favourites
        .insert_if_absent(id, member_id, post_id, topic_id)
        .await?
    {
        tracing::info!("Member {} favourited post {}", member_id, post_id);
        return Ok(id);
    }

    let existing = favourites
        .find_by_member_and_post(member_id, post_id)
        .await?
        .ok_or_else(|| StoreError::not_found("favourite", post_id))?;
    tracing::info!(
        "Member {} already favourited post {} concurrently",
        member_id,
        post_id
    );
    Ok(existing.id)
}
