//! Test data builders
//!
//! Helper functions for inserting users and events directly into the test
//! database and minting session tokens for the HTTP layer.

use chrono::{DateTime, Duration, Utc};
use fake::faker::name::en::Name;
use fake::Fake;
use jsonwebtoken::{encode, EncodingKey, Header};
use sqlx::PgPool;
use uuid::Uuid;

use StageCrew::models::event::Event;
use StageCrew::models::user::{Role, User};
use StageCrew::services::{AuthContext, Claims};

/// Insert a user with the given name and role
pub async fn create_test_user(pool: &PgPool, name: &str, role: Role) -> User {
    let email = format!("{}@test.example", Uuid::new_v4().simple());
    sqlx::query_as::<_, User>(
        r#"
        INSERT INTO users (name, email, role)
        VALUES ($1, $2, $3)
        RETURNING id, name, email, avatar_url, description, role, created_at, updated_at
        "#,
    )
    .bind(name)
    .bind(email)
    .bind(role)
    .fetch_one(pool)
    .await
    .expect("failed to insert test user")
}

/// Insert a user with a generated name
pub async fn create_random_user(pool: &PgPool, role: Role) -> User {
    let name: String = Name().fake();
    create_test_user(pool, &name, role).await
}

/// Insert an event dated the given number of days from now (negative = past)
pub async fn create_test_event(pool: &PgPool, title: &str, days_from_now: i64) -> Event {
    let date = Utc::now() + Duration::days(days_from_now);
    sqlx::query_as::<_, Event>(
        r#"
        INSERT INTO events (title, location, date)
        VALUES ($1, $2, $3)
        RETURNING id, title, location, date, cover_url, final_mix_provider,
                  final_mix_title, final_mix_url, created_at, updated_at
        "#,
    )
    .bind(title)
    .bind("Test Studio")
    .bind(date)
    .fetch_one(pool)
    .await
    .expect("failed to insert test event")
}

/// Resolved caller context for a stored user, as the auth layer would build it
pub fn auth_context_for(user: &User) -> AuthContext {
    AuthContext {
        user_id: Some(user.id),
        name: Some(user.name.clone()),
        email: user.email.clone(),
        role: user.role,
    }
}

/// Mint a valid session token for a user
pub fn issue_token(secret: &str, user: &User) -> String {
    issue_token_with_expiry(secret, user, Utc::now() + Duration::hours(1))
}

/// Mint a session token with an explicit expiry instant
pub fn issue_token_with_expiry(secret: &str, user: &User, expires_at: DateTime<Utc>) -> String {
    let claims = Claims {
        sub: user.id,
        name: Some(user.name.clone()),
        email: user.email.clone(),
        role: Some(user.role.as_str().to_string()),
        exp: expires_at.timestamp(),
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .expect("failed to encode test token")
}
