use crate::application::{ListFavourites, RecordPollVote, ToggleFavourite};
use crate::domain::Member;
use crate::infrastructure::db::{MemberRepository, UnitOfWorkManager};
use crate::infrastructure::localization::Localizer;
use sea_orm::{DatabaseConnection, DbErr};
use std::sync::Arc;
use uuid::Uuid;

#[derive(Clone)]
pub struct AppContext {
    pub db: DatabaseConnection,
    pub localizer: Arc<Localizer>,
    pub toggle_favourite: Arc<ToggleFavourite>,
    pub record_poll_vote: Arc<RecordPollVote>,
    pub list_favourites: Arc<ListFavourites>,
}

impl AppContext {
    pub fn new(db: DatabaseConnection, localizer: Localizer) -> Self {
        let localizer = Arc::new(localizer);
        let uow = UnitOfWorkManager::new(db.clone(), localizer.clone());

        Self {
            toggle_favourite: Arc::new(ToggleFavourite::new(uow.clone(), localizer.clone())),
            record_poll_vote: Arc::new(RecordPollVote::new(uow.clone())),
            list_favourites: Arc::new(ListFavourites::new(uow)),
            db,
            localizer,
        }
    }

    /// Resolves the session principal.
    pub async fn find_member(&self, id: Uuid) -> Result<Option<Member>, DbErr> {
        MemberRepository::new(&self.db).find_with_roles(id).await
    }
}
