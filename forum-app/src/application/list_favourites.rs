use crate::domain::{FavouritePostView, Member};
use crate::infrastructure::db::{
    FavouriteRepository, PermissionRepository, PostRepository, StoreError, UnitOfWorkManager,
};
use forum_errors::AppError;
use sea_orm::ConnectionTrait;

const GENERIC_ERROR: &str = "Errors.Generic";

/// Posts the member has favourited, newest favourite first.
pub struct ListFavourites {
    uow: UnitOfWorkManager,
}

impl ListFavourites {
    pub fn new(uow: UnitOfWorkManager) -> Self {
        Self { uow }
    }

    pub async fn execute(&self, member: &Member) -> Result<Vec<FavouritePostView>, AppError> {
        let uow = self.uow.begin(GENERIC_ERROR).await?;
        let posts = list(uow.connection(), member).await;
        uow.complete("list_favourites", posts).await
    }
}

async fn list<C: ConnectionTrait>(db: &C, member: &Member) -> Result<Vec<FavouritePostView>, StoreError> {
    let favourites = FavouriteRepository::new(db);
    let posts = PostRepository::new(db);
    let permissions = PermissionRepository::new(db);

    let mut views = Vec::new();
    // One round of lookups per post; favourites lists are short.
    for favourite in favourites.find_all_by_member(member.id).await? {
        let Some(post) = posts.find_by_id(favourite.post_id).await? else {
            continue;
        };
        let topic = posts
            .find_topic(post.topic_id)
            .await?
            .ok_or_else(|| StoreError::not_found("topic", post.topic_id))?;

        let granted = permissions
            .permissions_for(topic.category_id, member.primary_role())
            .await?;
        let (up_votes, down_votes) = posts.vote_counts(post.id).await?;
        let favourite_count = favourites.count_for_post(post.id).await?;

        views.push(FavouritePostView {
            post_id: post.id,
            topic_id: topic.id,
            topic_name: topic.name,
            content: post.content,
            posted_at: post.created_at,
            favourited_at: favourite.created_at,
            permissions: granted,
            up_votes,
            down_votes,
            favourite_count,
            show_topic_name: true,
        });
    }

    Ok(views)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::ToggleFavourite;
    use crate::domain::Permission;
    use crate::fixtures;
    use crate::infrastructure::db::MemberRepository;
    use crate::infrastructure::localization::Localizer;
    use sea_orm::DatabaseConnection;
    use std::sync::Arc;

    fn manager(db: &DatabaseConnection) -> UnitOfWorkManager {
        UnitOfWorkManager::new(db.clone(), Arc::new(Localizer::english()))
    }

    #[tokio::test]
    async fn lists_favourited_posts_with_counts_and_permissions() {
        let db = fixtures::memory_db().await;
        let reader = fixtures::member(&db, "reader", &["Standard Members"]).await;
        let fan = fixtures::member(&db, "fan", &[]).await;
        let thread = fixtures::thread(&db, &fan).await;
        let unrelated = fixtures::reply(&db, &thread.topic, &fan, "Not favourited").await;
        fixtures::permission(&db, thread.category.id, "Standard Members", "Vote In Polls", true).await;
        fixtures::post_vote(&db, &thread.post, &fan, 1).await;
        fixtures::post_vote(&db, &thread.post, &reader, -1).await;

        let toggle = ToggleFavourite::new(manager(&db), Arc::new(Localizer::english()));
        toggle.execute(reader.id, thread.post.id).await.expect("reader");
        toggle.execute(fan.id, thread.post.id).await.expect("fan");

        let member = MemberRepository::new(&db)
            .find_with_roles(reader.id)
            .await
            .expect("query")
            .expect("member");
        let views = ListFavourites::new(manager(&db))
            .execute(&member)
            .await
            .expect("list");

        assert_eq!(views.len(), 1);
        let view = &views[0];
        assert_eq!(view.post_id, thread.post.id);
        assert_ne!(view.post_id, unrelated.id);
        assert_eq!(view.topic_name, thread.topic.name);
        assert_eq!((view.up_votes, view.down_votes), (1, 1));
        assert_eq!(view.favourite_count, 2);
        assert!(view.show_topic_name);
        assert!(view.permissions.has(Permission::VoteInPolls));
        assert!(!view.permissions.has(Permission::EditPosts));
    }

    #[tokio::test]
    async fn member_without_favourites_gets_an_empty_list() {
        let db = fixtures::memory_db().await;
        let reader = fixtures::member(&db, "reader", &[]).await;
        let member = Member::new(reader.id, reader.username, vec![]);

        let views = ListFavourites::new(manager(&db))
            .execute(&member)
            .await
            .expect("list");

        assert!(views.is_empty());
    }
}
