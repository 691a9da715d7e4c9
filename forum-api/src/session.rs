use forum_app::domain::Member;
use forum_app::AppContext;
use forum_errors::AppError;
use time::Duration;
use tower_sessions::{Expiry, MemoryStore, Session, SessionManagerLayer};
use uuid::Uuid;

/// Written by the membership subsystem on log on.
pub const MEMBER_ID_KEY: &str = "member_id";

pub fn layer(secure: bool) -> SessionManagerLayer<MemoryStore> {
    SessionManagerLayer::new(MemoryStore::default())
        .with_secure(secure)
        .with_expiry(Expiry::OnInactivity(Duration::days(7)))
}

/// The authenticated member of the request, if any.
pub async fn current_member(session: &Session, ctx: &AppContext) -> Result<Option<Member>, AppError> {
    let member_id: Option<Uuid> = match session.get(MEMBER_ID_KEY).await {
        Ok(id) => id,
        Err(e) => {
            tracing::warn!("Unreadable session, treating request as anonymous: {}", e);
            None
        }
    };

    let Some(id) = member_id else {
        return Ok(None);
    };

    match ctx.find_member(id).await {
        Ok(member) => {
            if member.is_none() {
                tracing::info!("Session member {} no longer exists", id);
            }
            Ok(member)
        }
        Err(e) => {
            tracing::error!("Failed to load session member {}: {:?}", id, e);
            Err(AppError::Internal(ctx.localizer.get("Errors.Generic")))
        }
    }
}
