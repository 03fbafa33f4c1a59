//! User model and roles

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;
use validator::Validate;

/// Closed set of roles; governs which mutations are permitted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "UPPERCASE")]
#[sqlx(type_name = "user_role", rename_all = "UPPERCASE")]
pub enum Role {
    Guest,
    Member,
    Admin,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Guest => "GUEST",
            Role::Member => "MEMBER",
            Role::Admin => "ADMIN",
        }
    }

    /// Parse a role token as carried in session claims; unknown values are None
    pub fn parse(value: &str) -> Option<Role> {
        match value {
            "GUEST" => Some(Role::Guest),
            "MEMBER" => Some(Role::Member),
            "ADMIN" => Some(Role::Admin),
            _ => None,
        }
    }

    /// True when this role meets or exceeds the required minimum
    pub fn grants(&self, minimum: Role) -> bool {
        self.rank() >= minimum.rank()
    }

    fn rank(&self) -> u8 {
        match self {
            Role::Guest => 0,
            Role::Member => 1,
            Role::Admin => 2,
        }
    }
}

impl Default for Role {
    fn default() -> Self {
        Role::Guest
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: Uuid,
    pub name: String,
    pub email: Option<String>,
    pub avatar_url: Option<String>,
    pub description: Option<String>,
    pub role: Role,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Public profile shape; never carries the email address
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MemberProfile {
    pub id: Uuid,
    pub name: String,
    pub avatar_url: Option<String>,
    pub description: Option<String>,
    pub role: Role,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<User> for MemberProfile {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            name: user.name,
            avatar_url: user.avatar_url,
            description: user.description,
            role: user.role,
            created_at: user.created_at,
            updated_at: user.updated_at,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateMemberRequest {
    #[validate(length(min = 1, max = 100))]
    pub name: String,
    #[validate(url)]
    pub avatar_url: Option<String>,
    #[validate(length(min = 1, max = 2000))]
    pub description: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateMemberRequest {
    #[validate(length(min = 1, max = 100))]
    pub name: Option<String>,
    #[validate(url)]
    pub avatar_url: Option<String>,
    #[validate(length(min = 1, max = 2000))]
    pub description: Option<String>,
}

impl UpdateMemberRequest {
    pub fn has_changes(&self) -> bool {
        self.name.is_some() || self.avatar_url.is_some() || self.description.is_some()
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct UpdateRoleRequest {
    pub role: Role,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_parse_round_trip() {
        for role in [Role::Guest, Role::Member, Role::Admin] {
            assert_eq!(Role::parse(role.as_str()), Some(role));
        }
        assert_eq!(Role::parse("OWNER"), None);
        assert_eq!(Role::parse("member"), None);
    }

    #[test]
    fn test_role_serde_tokens() {
        assert_eq!(serde_json::to_string(&Role::Admin).unwrap(), "\"ADMIN\"");
        let parsed: Role = serde_json::from_str("\"MEMBER\"").unwrap();
        assert_eq!(parsed, Role::Member);
    }

    #[test]
    fn test_role_grants_is_ordered() {
        assert!(Role::Admin.grants(Role::Member));
        assert!(Role::Admin.grants(Role::Admin));
        assert!(Role::Member.grants(Role::Guest));
        assert!(!Role::Member.grants(Role::Admin));
        assert!(!Role::Guest.grants(Role::Member));
    }

    #[test]
    fn test_update_member_request_has_changes() {
        let empty = UpdateMemberRequest::default();
        assert!(!empty.has_changes());

        let named = UpdateMemberRequest {
            name: Some("Lena".to_string()),
            ..Default::default()
        };
        assert!(named.has_changes());
    }
}
