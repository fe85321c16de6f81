use serde::{Deserialize, Serialize};
use serde_json::Value;
use sqlx::{FromRow, PgPool};
use time::OffsetDateTime;
use uuid::Uuid;

/// User record in the database.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct User {
    pub id: Uuid,
    pub email: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    /// Opaque credential, overwritten on every successful login.
    pub access_token: Option<String>,
    /// Extra registration fields, stored verbatim.
    pub profile: Value,
    pub created_at: OffsetDateTime,
}

impl User {
    /// Find a user by email.
    pub async fn find_by_email(db: &PgPool, email: &str) -> anyhow::Result<Option<User>> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT id, email, password_hash, access_token, profile, created_at
            FROM users
            WHERE email = $1
            "#,
        )
        .bind(email)
        .fetch_optional(db)
        .await?;
        Ok(user)
    }

    /// Create a new user with hashed password and pass-through profile.
    ///
    /// Returns the raw `sqlx::Error` so the caller can recognize a
    /// uniqueness violation from a racing registration.
    pub async fn create(
        db: &PgPool,
        email: &str,
        password_hash: &str,
        profile: &Value,
    ) -> Result<User, sqlx::Error> {
        let user = sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (email, password_hash, profile)
            VALUES ($1, $2, $3)
            RETURNING id, email, password_hash, access_token, profile, created_at
            "#,
        )
        .bind(email)
        .bind(password_hash)
        .bind(profile)
        .fetch_one(db)
        .await?;
        Ok(user)
    }

    /// Persist a fresh access token, create-or-update by id. Concurrent
    /// logins for one account interleave with last write winning.
    pub async fn set_access_token(&self, db: &PgPool, token: &str) -> anyhow::Result<()> {
        sqlx::query(
            r#"
            INSERT INTO users (id, email, password_hash, profile, access_token)
            VALUES ($1, $2, $3, $4, $5)
            ON CONFLICT (id) DO UPDATE SET access_token = EXCLUDED.access_token
            "#,
        )
        .bind(self.id)
        .bind(&self.email)
        .bind(&self.password_hash)
        .bind(&self.profile)
        .bind(token)
        .execute(db)
        .await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn password_hash_never_serialized() {
        let user = User {
            id: Uuid::new_v4(),
            email: "a@x.com".into(),
            password_hash: "argon2-secret".into(),
            access_token: None,
            profile: serde_json::json!({ "name": "Ada" }),
            created_at: OffsetDateTime::now_utc(),
        };
        let json = serde_json::to_string(&user).unwrap();
        assert!(!json.contains("argon2-secret"));
        assert!(json.contains("a@x.com"));
    }
}
