use super::PermissionSet;
use serde::{Deserialize, Serialize};

/// What a favourite toggle did to storage.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FavouriteOutcome {
    Added(uuid::Uuid),
    Removed,
}

/// JSON body of the favourite endpoint: `{ "message": ..., "id": ... }`.
///
/// The default value is the empty body returned to callers that fail the
/// AJAX or authentication checks.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FavouriteToggle {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<uuid::Uuid>,
}

/// A favourited post as shown on the member's favourites page.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FavouritePostView {
    pub post_id: uuid::Uuid,
    pub topic_id: uuid::Uuid,
    pub topic_name: String,
    pub content: String,
    pub posted_at: Option<chrono::DateTime<chrono::Utc>>,
    pub favourited_at: chrono::DateTime<chrono::Utc>,
    pub permissions: PermissionSet,
    pub up_votes: u64,
    pub down_votes: u64,
    pub favourite_count: u64,
    pub show_topic_name: bool,
}
