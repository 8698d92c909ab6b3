//! User repository for database operations

use argon2::{Argon2, PasswordHash, PasswordHasher, PasswordVerifier, password_hash::SaltString};
use sqlx::postgres::PgRow;
use sqlx::{PgPool, Row};
use tracing::info;
use uuid::Uuid;

use crate::error::{ApiError, ApiResult};
use crate::models::{RegisterRequest, User, UserRole};

const USER_COLUMNS: &str =
    "id, email, username, full_name, password_hash, user_type, bio, specializations, created_at";

/// User repository
#[derive(Clone)]
pub struct UserRepository {
    pool: PgPool,
}

impl UserRepository {
    /// Create a new user repository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Create a new user with a freshly hashed password.
    ///
    /// Uniqueness of email and username is enforced by the database; a
    /// violation surfaces as a Conflict naming the offending field.
    pub async fn create(&self, request: &RegisterRequest) -> ApiResult<User> {
        info!("Creating new user: {}", request.username);

        let salt = SaltString::generate(&mut rand::thread_rng());
        let argon2 = Argon2::default();
        let password_hash = argon2
            .hash_password(request.password.as_bytes(), &salt)
            .map_err(|e| ApiError::Internal(format!("Failed to hash password: {e}")))?
            .to_string();

        // Specializations only apply to counsellor accounts
        let specializations = match request.user_type {
            UserRole::Counsellor => request.specializations.clone().unwrap_or_default(),
            UserRole::Student => Vec::new(),
        };

        let row = sqlx::query(
            r#"
            INSERT INTO users (email, username, full_name, password_hash, user_type, bio, specializations)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING id, email, username, full_name, password_hash, user_type, bio, specializations, created_at
            "#,
        )
        .bind(&request.email)
        .bind(&request.username)
        .bind(&request.full_name)
        .bind(&password_hash)
        .bind(request.user_type.as_str())
        .bind(&request.bio)
        .bind(&specializations)
        .fetch_one(&self.pool)
        .await
        .map_err(map_unique_violation)?;

        user_from_row(&row)
    }

    /// Find a user by email
    pub async fn find_by_email(&self, email: &str) -> ApiResult<Option<User>> {
        let row = sqlx::query(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE email = $1"
        ))
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;

        row.as_ref().map(user_from_row).transpose()
    }

    /// Find a user by ID
    pub async fn find_by_id(&self, id: Uuid) -> ApiResult<Option<User>> {
        let row = sqlx::query(&format!("SELECT {USER_COLUMNS} FROM users WHERE id = $1"))
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        row.as_ref().map(user_from_row).transpose()
    }

    /// Verify a user's password
    pub fn verify_password(&self, user: &User, password: &str) -> ApiResult<bool> {
        let parsed_hash = PasswordHash::new(&user.password_hash)
            .map_err(|e| ApiError::Internal(format!("Failed to parse password hash: {e}")))?;

        let argon2 = Argon2::default();
        Ok(argon2
            .verify_password(password.as_bytes(), &parsed_hash)
            .is_ok())
    }

    /// Case-insensitive partial match over username and full name.
    ///
    /// Ordered by username then id so pagination stays reproducible.
    pub async fn search(&self, query: &str) -> ApiResult<Vec<User>> {
        let pattern = format!("%{}%", escape_like(query));

        let rows = sqlx::query(&format!(
            r#"
            SELECT {USER_COLUMNS} FROM users
            WHERE username ILIKE $1 OR full_name ILIKE $1
            ORDER BY username ASC, id ASC
            LIMIT 50
            "#
        ))
        .bind(&pattern)
        .fetch_all(&self.pool)
        .await?;

        rows.iter().map(user_from_row).collect()
    }

    /// List all counsellor accounts
    pub async fn list_counsellors(&self) -> ApiResult<Vec<User>> {
        let rows = sqlx::query(&format!(
            r#"
            SELECT {USER_COLUMNS} FROM users
            WHERE user_type = 'counsellor'
            ORDER BY username ASC, id ASC
            "#
        ))
        .fetch_all(&self.pool)
        .await?;

        rows.iter().map(user_from_row).collect()
    }
}

fn user_from_row(row: &PgRow) -> ApiResult<User> {
    let role: String = row.get("user_type");
    let user_type = role
        .parse::<UserRole>()
        .map_err(|e| ApiError::Internal(format!("Corrupt user record: {e}")))?;

    Ok(User {
        id: row.get("id"),
        email: row.get("email"),
        username: row.get("username"),
        full_name: row.get("full_name"),
        password_hash: row.get("password_hash"),
        user_type,
        bio: row.get("bio"),
        specializations: row.get("specializations"),
        created_at: row.get("created_at"),
    })
}

fn map_unique_violation(err: sqlx::Error) -> ApiError {
    if let sqlx::Error::Database(db_err) = &err {
        if db_err.code().as_deref() == Some("23505") {
            return conflict_for_unique(db_err.constraint());
        }
    }
    ApiError::Database(err)
}

/// Translate a unique-constraint name into a Conflict naming the field
fn conflict_for_unique(constraint: Option<&str>) -> ApiError {
    match constraint {
        Some("users_email_key") => ApiError::Conflict("Email is already registered".to_string()),
        Some("users_username_key") => ApiError::Conflict("Username is already taken".to_string()),
        _ => ApiError::Conflict("User already exists".to_string()),
    }
}

/// Escape LIKE metacharacters in user-supplied search input
fn escape_like(input: &str) -> String {
    input
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_like() {
        assert_eq!(escape_like("plain"), "plain");
        assert_eq!(escape_like("100%"), "100\\%");
        assert_eq!(escape_like("a_b"), "a\\_b");
        assert_eq!(escape_like("back\\slash"), "back\\\\slash");
    }

    #[test]
    fn test_duplicate_registration_maps_to_conflict() {
        let email = conflict_for_unique(Some("users_email_key"));
        assert_eq!(email.kind(), "conflict");
        assert!(email.to_string().contains("Email"));

        let username = conflict_for_unique(Some("users_username_key"));
        assert_eq!(username.kind(), "conflict");
        assert!(username.to_string().contains("Username"));

        // Unknown constraints still surface as a duplicate user, not a 500
        assert_eq!(conflict_for_unique(None).kind(), "conflict");
        assert_eq!(conflict_for_unique(Some("users_pkey")).kind(), "conflict");
    }

    #[test]
    fn test_non_unique_errors_pass_through() {
        let err = map_unique_violation(sqlx::Error::PoolClosed);
        assert_eq!(err.kind(), "internal");
    }
}
