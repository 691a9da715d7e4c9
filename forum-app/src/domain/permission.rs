use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Permission {
    DenyAccess,
    ReadOnly,
    EditPosts,
    DeletePosts,
    VoteInPolls,
    CreatePolls,
    CreateTopics,
}

impl Permission {
    pub const ALL: [Permission; 7] = [
        Permission::DenyAccess,
        Permission::ReadOnly,
        Permission::EditPosts,
        Permission::DeletePosts,
        Permission::VoteInPolls,
        Permission::CreatePolls,
        Permission::CreateTopics,
    ];

    /// Name stored in `category_permissions.permission`.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::DenyAccess => "Deny Access",
            Self::ReadOnly => "Read Only",
            Self::EditPosts => "Edit Posts",
            Self::DeletePosts => "Delete Posts",
            Self::VoteInPolls => "Vote In Polls",
            Self::CreatePolls => "Create Polls",
            Self::CreateTopics => "Create Topics",
        }
    }

    /// Restrictions rather than capabilities.
    pub fn is_restriction(&self) -> bool {
        matches!(self, Self::DenyAccess | Self::ReadOnly)
    }
}

impl fmt::Display for Permission {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownPermission(pub String);

impl FromStr for Permission {
    type Err = UnknownPermission;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|p| p.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| UnknownPermission(s.to_string()))
    }
}

/// Permissions a role holds inside one category.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PermissionSet {
    granted: BTreeSet<Permission>,
}

impl PermissionSet {
    /// Every capability, no restriction.
    pub fn full() -> Self {
        Self {
            granted: Permission::ALL
                .into_iter()
                .filter(|p| !p.is_restriction())
                .collect(),
        }
    }

    pub fn has(&self, permission: Permission) -> bool {
        self.granted.contains(&permission)
    }

    pub fn iter(&self) -> impl Iterator<Item = Permission> + '_ {
        self.granted.iter().copied()
    }
}

impl FromIterator<Permission> for PermissionSet {
    fn from_iter<I: IntoIterator<Item = Permission>>(iter: I) -> Self {
        Self {
            granted: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_stored_names() {
        assert_eq!("Vote In Polls".parse::<Permission>(), Ok(Permission::VoteInPolls));
        assert_eq!("deny access".parse::<Permission>(), Ok(Permission::DenyAccess));
        assert!("Fly".parse::<Permission>().is_err());
    }

    #[test]
    fn full_set_has_no_restrictions() {
        let set = PermissionSet::full();
        assert!(set.has(Permission::EditPosts));
        assert!(set.has(Permission::VoteInPolls));
        assert!(!set.has(Permission::DenyAccess));
        assert!(!set.has(Permission::ReadOnly));
    }
}
