//! In-memory SQLite database and seed helpers for tests.

use crate::infrastructure::db::entities::{
    category, category_permission, member, member_role, poll, poll_answer, poll_vote, post,
    post_vote, topic,
};
use crate::infrastructure::db::run_migrations;
use sea_orm::{entity::*, ConnectOptions, Database, DatabaseConnection};
use uuid::Uuid;

/// Fresh database with the full schema. A single pooled connection keeps
/// every query on the same in-memory database.
pub async fn memory_db() -> DatabaseConnection {
    let mut opt = ConnectOptions::new("sqlite::memory:");
    opt.max_connections(1).min_connections(1).sqlx_logging(false);
    let db = Database::connect(opt).await.expect("connect sqlite");
    run_migrations(&db).await.expect("migrate");
    db
}

pub async fn member(db: &DatabaseConnection, username: &str, roles: &[&str]) -> member::Model {
    let model = member::ActiveModel {
        id: Set(Uuid::new_v4()),
        username: Set(username.to_string()),
        email: Set(format!("{username}@example.com")),
        created_at: Set(Some(chrono::Utc::now())),
    }
    .insert(db)
    .await
    .expect("insert member");

    for role in roles {
        member_role::ActiveModel {
            member_id: Set(model.id),
            role: Set(role.to_string()),
        }
        .insert(db)
        .await
        .expect("insert role");
    }
    model
}

/// A category with one topic holding one post.
pub struct Thread {
    pub category: category::Model,
    pub topic: topic::Model,
    pub post: post::Model,
}

pub async fn thread(db: &DatabaseConnection, author: &member::Model) -> Thread {
    let category = category::ActiveModel {
        id: Set(Uuid::new_v4()),
        name: Set("General".to_string()),
    }
    .insert(db)
    .await
    .expect("insert category");

    let topic = topic::ActiveModel {
        id: Set(Uuid::new_v4()),
        category_id: Set(category.id),
        name: Set("Welcome <everyone>".to_string()),
        created_at: Set(Some(chrono::Utc::now())),
    }
    .insert(db)
    .await
    .expect("insert topic");

    let post = reply(db, &topic, author, "First post").await;

    Thread {
        category,
        topic,
        post,
    }
}

pub async fn reply(
    db: &DatabaseConnection,
    topic: &topic::Model,
    author: &member::Model,
    content: &str,
) -> post::Model {
    post::ActiveModel {
        id: Set(Uuid::new_v4()),
        topic_id: Set(topic.id),
        member_id: Set(author.id),
        content: Set(content.to_string()),
        created_at: Set(Some(chrono::Utc::now())),
    }
    .insert(db)
    .await
    .expect("insert post")
}

pub async fn post_vote(db: &DatabaseConnection, post: &post::Model, voter: &member::Model, amount: i32) {
    post_vote::ActiveModel {
        id: Set(Uuid::new_v4()),
        post_id: Set(post.id),
        member_id: Set(voter.id),
        amount: Set(amount),
        created_at: Set(None),
    }
    .insert(db)
    .await
    .expect("insert post vote");
}

pub async fn permission(
    db: &DatabaseConnection,
    category_id: Uuid,
    role: &str,
    permission: &str,
    granted: bool,
) {
    category_permission::ActiveModel {
        category_id: Set(category_id),
        role: Set(role.to_string()),
        permission: Set(permission.to_string()),
        granted: Set(granted),
    }
    .insert(db)
    .await
    .expect("insert permission");
}

/// A poll on `topic` with the given answers in order.
pub async fn poll(
    db: &DatabaseConnection,
    topic: &topic::Model,
    answers: &[&str],
) -> (poll::Model, Vec<poll_answer::Model>) {
    let poll = poll::ActiveModel {
        id: Set(Uuid::new_v4()),
        topic_id: Set(topic.id),
        created_at: Set(Some(chrono::Utc::now())),
    }
    .insert(db)
    .await
    .expect("insert poll");

    let mut models = Vec::with_capacity(answers.len());
    for (position, answer) in answers.iter().enumerate() {
        let model = poll_answer::ActiveModel {
            id: Set(Uuid::new_v4()),
            poll_id: Set(poll.id),
            answer: Set(answer.to_string()),
            position: Set(position as i32),
        }
        .insert(db)
        .await
        .expect("insert answer");
        models.push(model);
    }
    (poll, models)
}

/// `count` fresh members each voting for `answer`.
pub async fn votes(db: &DatabaseConnection, answer: &poll_answer::Model, count: usize) {
    for _ in 0..count {
        let voter = member(db, &format!("voter-{}", Uuid::new_v4().simple()), &[]).await;
        poll_vote::ActiveModel {
            id: Set(Uuid::new_v4()),
            poll_id: Set(answer.poll_id),
            poll_answer_id: Set(answer.id),
            member_id: Set(voter.id),
            created_at: Set(None),
        }
        .insert(db)
        .await
        .expect("insert vote");
    }
}
