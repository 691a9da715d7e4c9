use super::entities::{category_permission, CategoryPermission};
use crate::domain::{Permission, PermissionSet, ADMIN_ROLE};
use sea_orm::{entity::*, query::*, ConnectionTrait, DbErr};
use uuid::Uuid;

pub struct PermissionRepository<'a, C> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> PermissionRepository<'a, C> {
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    /// Permissions `role` holds in the category. Admins hold everything.
    pub async fn permissions_for(&self, category_id: Uuid, role: &str) -> Result<PermissionSet, DbErr> {
        if role == ADMIN_ROLE {
            return Ok(PermissionSet::full());
        }

        let rows = CategoryPermission::find()
            .filter(category_permission::Column::CategoryId.eq(category_id))
            .filter(category_permission::Column::Role.eq(role))
            .filter(category_permission::Column::Granted.eq(true))
            .all(self.db)
            .await?;

        let set = rows
            .into_iter()
            .filter_map(|row| match row.permission.parse::<Permission>() {
                Ok(p) => Some(p),
                Err(_) => {
                    tracing::warn!(
                        "Skipping unknown permission {:?} on category {}",
                        row.permission,
                        category_id
                    );
                    None
                }
            })
            .collect();

        Ok(set)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures;

    #[tokio::test]
    async fn admin_holds_every_capability() {
        let db = fixtures::memory_db().await;
        let set = PermissionRepository::new(&db)
            .permissions_for(Uuid::new_v4(), ADMIN_ROLE)
            .await
            .expect("query");
        assert_eq!(set, PermissionSet::full());
    }

    #[tokio::test]
    async fn only_granted_known_permissions_are_returned() {
        let db = fixtures::memory_db().await;
        let member = fixtures::member(&db, "ana", &[]).await;
        let thread = fixtures::thread(&db, &member).await;
        let category = thread.topic.category_id;

        fixtures::permission(&db, category, "Standard Members", "Vote In Polls", true).await;
        fixtures::permission(&db, category, "Standard Members", "Edit Posts", false).await;
        fixtures::permission(&db, category, "Standard Members", "Juggle", true).await;
        fixtures::permission(&db, category, "Guest", "Read Only", true).await;

        let set = PermissionRepository::new(&db)
            .permissions_for(category, "Standard Members")
            .await
            .expect("query");

        assert_eq!(set.iter().collect::<Vec<_>>(), vec![Permission::VoteInPolls]);
    }
}
