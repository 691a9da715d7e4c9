use super::entities::{favourite, Favourite};
use sea_orm::sea_query::OnConflict;
use sea_orm::{entity::*, query::*, ConnectionTrait, DbErr, PaginatorTrait};
use uuid::Uuid;

pub struct FavouriteRepository<'a, C> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> FavouriteRepository<'a, C> {
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    pub async fn find_by_member_and_post(
        &self,
        member_id: Uuid,
        post_id: Uuid,
    ) -> Result<Option<favourite::Model>, DbErr> {
        Favourite::find()
            .filter(favourite::Column::MemberId.eq(member_id))
            .filter(favourite::Column::PostId.eq(post_id))
            .one(self.db)
            .await
    }

    /// Newest first.
    pub async fn find_all_by_member(&self, member_id: Uuid) -> Result<Vec<favourite::Model>, DbErr> {
        Favourite::find()
            .filter(favourite::Column::MemberId.eq(member_id))
            .order_by_desc(favourite::Column::CreatedAt)
            .all(self.db)
            .await
    }

    pub async fn count_for_post(&self, post_id: Uuid) -> Result<u64, DbErr> {
        Favourite::find()
            .filter(favourite::Column::PostId.eq(post_id))
            .count(self.db)
            .await
    }

    /// Returns the number of rows removed.
    pub async fn delete_by_member_and_post(&self, member_id: Uuid, post_id: Uuid) -> Result<u64, DbErr> {
        let result = Favourite::delete_many()
            .filter(favourite::Column::MemberId.eq(member_id))
            .filter(favourite::Column::PostId.eq(post_id))
            .exec(self.db)
            .await?;
        Ok(result.rows_affected)
    }

    /// Inserts unless a favourite for (member, post) already exists.
    /// Returns whether a row was written.
    pub async fn insert_if_absent(
        &self,
        id: Uuid,
        member_id: Uuid,
        post_id: Uuid,
        topic_id: Uuid,
    ) -> Result<bool, DbErr> {
        let active = favourite::ActiveModel {
            id: Set(id),
            member_id: Set(member_id),
            post_id: Set(post_id),
            topic_id: Set(topic_id),
            created_at: Set(chrono::Utc::now()),
        };

        let result = Favourite::insert(active)
            .on_conflict(
                OnConflict::columns([favourite::Column::MemberId, favourite::Column::PostId])
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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures;

    #[tokio::test]
    async fn second_insert_for_same_pair_is_ignored() {
        let db = fixtures::memory_db().await;
        let member = fixtures::member(&db, "ana", &[]).await;
        let thread = fixtures::thread(&db, &member).await;
        let repo = FavouriteRepository::new(&db);

        let first = repo
            .insert_if_absent(Uuid::new_v4(), member.id, thread.post.id, thread.topic.id)
            .await
            .expect("insert");
        let second = repo
            .insert_if_absent(Uuid::new_v4(), member.id, thread.post.id, thread.topic.id)
            .await
            .expect("insert");

        assert!(first);
        assert!(!second);
        assert_eq!(repo.count_for_post(thread.post.id).await.expect("count"), 1);
    }

    #[tokio::test]
    async fn delete_only_touches_the_matching_pair() {
        let db = fixtures::memory_db().await;
        let ana = fixtures::member(&db, "ana", &[]).await;
        let bo = fixtures::member(&db, "bo", &[]).await;
        let thread = fixtures::thread(&db, &ana).await;
        let repo = FavouriteRepository::new(&db);

        for member in [&ana, &bo] {
            repo.insert_if_absent(Uuid::new_v4(), member.id, thread.post.id, thread.topic.id)
                .await
                .expect("insert");
        }

        let removed = repo
            .delete_by_member_and_post(ana.id, thread.post.id)
            .await
            .expect("delete");

        assert_eq!(removed, 1);
        assert!(repo
            .find_by_member_and_post(bo.id, thread.post.id)
            .await
            .expect("query")
            .is_some());
        assert_eq!(repo.count_for_post(thread.post.id).await.expect("count"), 1);
    }
}
