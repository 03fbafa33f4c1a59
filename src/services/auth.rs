//! Authentication service implementation
//!
//! Decodes bearer tokens and resolves the caller's context. The role claim
//! inside a token is advisory only: the authoritative role is re-read from
//! the database on every request, so promotions and demotions take effect
//! on the next call rather than the next login.

use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};
use uuid::Uuid;

use crate::config::AuthConfig;
use crate::database::repositories::UserRepository;
use crate::models::user::Role;
use crate::utils::errors::{Result, StageCrewError};

/// Claims carried in a session token
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: Uuid,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub role: Option<String>,
    pub exp: i64,
}

/// Resolved caller context for one request
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthContext {
    pub user_id: Option<Uuid>,
    pub name: Option<String>,
    pub email: Option<String>,
    pub role: Role,
}

impl AuthContext {
    /// Context for a caller without a token
    pub fn anonymous() -> Self {
        Self {
            user_id: None,
            name: None,
            email: None,
            role: Role::Guest,
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.user_id.is_some()
    }

    /// The caller's id, or the 401 error when the caller is anonymous
    pub fn require_subject(&self) -> Result<Uuid> {
        self.user_id
            .ok_or_else(|| StageCrewError::Authentication("sign in required".to_string()))
    }

    pub fn has_role(&self, minimum: Role) -> bool {
        self.role.grants(minimum)
    }

    /// Enforce a minimum role, 403 on failure
    pub fn require_role(&self, minimum: Role) -> Result<()> {
        if self.has_role(minimum) {
            Ok(())
        } else {
            Err(StageCrewError::PermissionDenied(format!(
                "Forbidden, requires {} role",
                minimum
            )))
        }
    }
}

/// Authentication service for resolving caller contexts
#[derive(Clone)]
pub struct AuthService {
    user_repository: UserRepository,
    decoding_key: DecodingKey,
    validation: Validation,
}

impl AuthService {
    /// Create a new AuthService instance
    pub fn new(user_repository: UserRepository, config: &AuthConfig) -> Self {
        let decoding_key = DecodingKey::from_secret(config.jwt_secret.as_bytes());
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = config.token_leeway_seconds;

        Self {
            user_repository,
            decoding_key,
            validation,
        }
    }

    /// Resolve a caller context from an optional bearer token.
    ///
    /// A missing, expired, or otherwise undecodable token degrades to an
    /// anonymous guest rather than failing the request; role checks further
    /// down decide whether a guest may proceed. Only the database read can
    /// error here.
    pub async fn authenticate(&self, token: Option<&str>) -> Result<AuthContext> {
        let Some(token) = token else {
            return Ok(AuthContext::anonymous());
        };

        let Some(claims) = self.decode_claims(token) else {
            return Ok(AuthContext::anonymous());
        };

        let Some(user) = self.user_repository.find_by_id(claims.sub).await? else {
            warn!(subject = %claims.sub, "Token subject has no account, treating as guest");
            return Ok(AuthContext::anonymous());
        };

        if let Some(claimed) = claims.role.as_deref() {
            if Role::parse(claimed) != Some(user.role) {
                debug!(
                    user_id = %user.id,
                    claimed_role = claimed,
                    db_role = %user.role,
                    "Token role claim is stale, using database role"
                );
            }
        }

        Ok(AuthContext {
            user_id: Some(user.id),
            name: Some(user.name),
            email: user.email,
            role: user.role,
        })
    }

    fn decode_claims(&self, token: &str) -> Option<Claims> {
        match decode::<Claims>(token, &self.decoding_key, &self.validation) {
            Ok(data) => Some(data.claims),
            Err(e) => {
                debug!(error = %e, "Bearer token rejected, treating as guest");
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_anonymous_context_is_guest() {
        let context = AuthContext::anonymous();
        assert!(!context.is_authenticated());
        assert_eq!(context.role, Role::Guest);
        assert!(context.require_subject().is_err());
    }

    #[test]
    fn test_require_role_enforces_minimum() {
        let admin = AuthContext {
            user_id: Some(Uuid::new_v4()),
            name: Some("Sasha".to_string()),
            email: None,
            role: Role::Admin,
        };
        assert!(admin.require_role(Role::Member).is_ok());
        assert!(admin.require_role(Role::Admin).is_ok());

        let member = AuthContext {
            role: Role::Member,
            ..admin.clone()
        };
        assert!(member.require_role(Role::Member).is_ok());
        assert!(matches!(
            member.require_role(Role::Admin),
            Err(StageCrewError::PermissionDenied(_))
        ));
    }

    #[test]
    fn test_claims_tolerate_missing_optionals() {
        let json = format!(r#"{{"sub": "{}", "exp": 4102444800}}"#, Uuid::nil());
        let claims: Claims = serde_json::from_str(&json).unwrap();
        assert_eq!(claims.sub, Uuid::nil());
        assert!(claims.role.is_none());
    }
}
