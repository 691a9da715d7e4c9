pub mod entities;
mod favourite_repository;
mod member_repository;
mod permission_repository;
mod poll_repository;
mod post_repository;
mod unit_of_work;

pub use favourite_repository::FavouriteRepository;
pub use member_repository::MemberRepository;
pub use permission_repository::PermissionRepository;
pub use poll_repository::PollRepository;
pub use post_repository::PostRepository;
pub use unit_of_work::{UnitOfWork, UnitOfWorkManager};

use entities::{
    favourite, poll_vote, Category, CategoryPermission, Favourite, Member, MemberRole, Poll,
    PollAnswer, PollVote, Post, PostVote, Topic,
};
use sea_orm::sea_query::{Index, IndexCreateStatement};
use sea_orm::{ConnectOptions, ConnectionTrait, Database, DatabaseConnection, DbErr, Schema};
use std::time::Duration;
use uuid::Uuid;

/// Errors raised inside a unit of work. Translated into user-facing
/// `AppError`s only by `UnitOfWork::complete`.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("database error: {0}")]
    Db(#[from] DbErr),

    #[error("not found: {resource} '{id}'")]
    NotFound { resource: &'static str, id: Uuid },

    /// Carries the resource key of the message shown to the user.
    #[error("invalid request: {0}")]
    Invalid(&'static str),
}

impl StoreError {
    pub fn not_found(resource: &'static str, id: Uuid) -> Self {
        Self::NotFound { resource, id }
    }
}

pub async fn create_connection(
    database_url: &str,
    max_connections: u32,
) -> Result<DatabaseConnection, DbErr> {
    let mut opt = ConnectOptions::new(database_url);
    opt.max_connections(max_connections)
        .min_connections(1)
        .connect_timeout(Duration::from_secs(10))
        .acquire_timeout(Duration::from_secs(10))
        .idle_timeout(Duration::from_secs(600))
        .sqlx_logging(false);

    Database::connect(opt).await
}

/// Creates every table and the unique indexes that hold the
/// one-favourite-per-post and one-vote-per-poll rules.
pub async fn run_migrations(db: &DatabaseConnection) -> Result<(), DbErr> {
    let backend = db.get_database_backend();
    let schema = Schema::new(backend);

    // Parents before children so foreign keys resolve on Postgres.
    let tables = [
        schema.create_table_from_entity(Member),
        schema.create_table_from_entity(MemberRole),
        schema.create_table_from_entity(Category),
        schema.create_table_from_entity(CategoryPermission),
        schema.create_table_from_entity(Topic),
        schema.create_table_from_entity(Post),
        schema.create_table_from_entity(PostVote),
        schema.create_table_from_entity(Favourite),
        schema.create_table_from_entity(Poll),
        schema.create_table_from_entity(PollAnswer),
        schema.create_table_from_entity(PollVote),
    ];

    for mut table in tables {
        table.if_not_exists();
        db.execute(backend.build(&table)).await?;
    }

    for index in unique_indexes() {
        db.execute(backend.build(&index)).await?;
    }

    tracing::info!("Database schema is up to date");
    Ok(())
}

fn unique_indexes() -> [IndexCreateStatement; 2] {
    [
        Index::create()
            .name("ux_favourites_member_post")
            .table(Favourite)
            .col(favourite::Column::MemberId)
            .col(favourite::Column::PostId)
            .unique()
            .if_not_exists()
            .to_owned(),
        Index::create()
            .name("ux_poll_votes_poll_member")
            .table(PollVote)
            .col(poll_vote::Column::PollId)
            .col(poll_vote::Column::MemberId)
            .unique()
            .if_not_exists()
            .to_owned(),
    ]
}
