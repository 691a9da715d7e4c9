use serde::{Deserialize, Serialize};

pub const ADMIN_ROLE: &str = "Admin";
pub const GUEST_ROLE: &str = "Guest";

/// The authenticated principal of a request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Member {
    pub id: uuid::Uuid,
    pub username: String,
    /// Sorted by name.
    pub roles: Vec<String>,
}

impl Member {
    pub fn new(id: uuid::Uuid, username: String, mut roles: Vec<String>) -> Self {
        roles.sort();
        roles.dedup();
        Self { id, username, roles }
    }

    /// Role used for permission lookups; members without a role are guests.
    /// Roles are kept in name order, so the first by name wins.
    pub fn primary_role(&self) -> &str {
        self.roles.first().map(String::as_str).unwrap_or(GUEST_ROLE)
    }
}
