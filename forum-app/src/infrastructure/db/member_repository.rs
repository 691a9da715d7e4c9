use super::entities::{member, member_role, Member, MemberRole};
use sea_orm::{entity::*, query::*, ConnectionTrait, DbErr};
use uuid::Uuid;

pub struct MemberRepository<'a, C> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> MemberRepository<'a, C> {
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<member::Model>, DbErr> {
        Member::find_by_id(id).one(self.db).await
    }

    pub async fn roles(&self, member_id: Uuid) -> Result<Vec<String>, DbErr> {
        let roles = MemberRole::find()
            .filter(member_role::Column::MemberId.eq(member_id))
            .order_by_asc(member_role::Column::Role)
            .all(self.db)
            .await?;
        Ok(roles.into_iter().map(|r| r.role).collect())
    }

    /// Loads the member as a request principal, roles included.
    pub async fn find_with_roles(&self, id: Uuid) -> Result<Option<crate::domain::Member>, DbErr> {
        let Some(model) = self.find_by_id(id).await? else {
            return Ok(None);
        };
        let roles = self.roles(id).await?;
        Ok(Some(crate::domain::Member::new(model.id, model.username, roles)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures;

    #[tokio::test]
    async fn loads_member_with_sorted_roles() {
        let db = fixtures::memory_db().await;
        let member = fixtures::member(&db, "ana", &["Standard Members", "Admin"]).await;

        let loaded = MemberRepository::new(&db)
            .find_with_roles(member.id)
            .await
            .expect("query")
            .expect("member");

        assert_eq!(loaded.username, "ana");
        assert_eq!(loaded.roles, vec!["Admin", "Standard Members"]);
    }

    #[tokio::test]
    async fn unknown_member_is_none() {
        let db = fixtures::memory_db().await;
        let loaded = MemberRepository::new(&db)
            .find_with_roles(Uuid::new_v4())
            .await
            .expect("query");
        assert!(loaded.is_none());
    }
}
