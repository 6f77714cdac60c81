//! User accounts

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{Business, Customer};
use crate::password::{self, PasswordError};
use crate::validation::{normalize_optional, require, validate_email, validate_full_name};

/// A user account on the platform
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct User {
    pub id: Uuid,
    pub full_name: String,
    pub email: String,
    /// bcrypt hash; absent for accounts imported without credentials
    #[serde(skip_serializing, default)]
    pub password_hash: Option<String>,
    pub phone: Option<String>,
    pub role: Option<String>,
    pub status: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl User {
    /// Check a candidate password against the stored hash
    pub fn check_password(&self, candidate: &str) -> bool {
        password::check_password(self.password_hash.as_deref(), candidate)
    }
}

/// User together with the business and customer profiles it owns
#[derive(Debug, Clone, Serialize)]
pub struct UserDetail {
    #[serde(flatten)]
    pub user: User,
    pub business: Option<Business>,
    pub customer: Option<Customer>,
}

/// Input for creating a user
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CreateUserInput {
    pub full_name: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
    pub phone: Option<String>,
    pub role: Option<String>,
    pub status: Option<String>,
}

/// Input for updating a user
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateUserInput {
    pub full_name: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
    pub phone: Option<String>,
    pub role: Option<String>,
    pub status: Option<String>,
}

/// A validated user ready to insert
#[derive(Debug, Clone)]
pub struct NewUser {
    pub full_name: String,
    pub email: String,
    pub password_hash: String,
    pub phone: Option<String>,
    pub role: Option<String>,
    pub status: Option<String>,
}

impl NewUser {
    /// Validate every field and hash the password at `bcrypt_cost`
    pub fn validate(input: CreateUserInput, bcrypt_cost: u32) -> Result<Self, PasswordError> {
        let full_name = validate_full_name(&require("full_name", input.full_name)?)?;
        let email = validate_email(&require("email", input.email)?)?;
        let raw_password = require("password", input.password)?;
        let password_hash = password::hash_password(&raw_password, bcrypt_cost)?;

        Ok(Self {
            full_name,
            email,
            password_hash,
            phone: normalize_optional(input.phone),
            role: normalize_optional(input.role),
            status: normalize_optional(input.status),
        })
    }
}

/// The full set of mutable user columns after an update is merged
#[derive(Debug, Clone)]
pub struct UserChanges {
    pub full_name: String,
    pub email: String,
    pub password_hash: Option<String>,
    pub phone: Option<String>,
    pub role: Option<String>,
    pub status: Option<String>,
}

impl UserChanges {
    /// Merge an update over the stored record and re-validate the result
    pub fn apply(
        existing: &User,
        input: UpdateUserInput,
        bcrypt_cost: u32,
    ) -> Result<Self, PasswordError> {
        let full_name =
            validate_full_name(input.full_name.as_deref().unwrap_or(&existing.full_name))?;
        let email = validate_email(input.email.as_deref().unwrap_or(&existing.email))?;
        let password_hash = match input.password {
            Some(raw) => Some(password::hash_password(&raw, bcrypt_cost)?),
            None => existing.password_hash.clone(),
        };

        Ok(Self {
            full_name,
            email,
            password_hash,
            phone: merge_optional(input.phone, &existing.phone),
            role: merge_optional(input.role, &existing.role),
            status: merge_optional(input.status, &existing.status),
        })
    }
}

/// Keep the stored value unless the update supplies one
fn merge_optional(update: Option<String>, existing: &Option<String>) -> Option<String> {
    match update {
        Some(value) => normalize_optional(Some(value)),
        None => existing.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TEST_COST: u32 = 4;

    fn input() -> CreateUserInput {
        CreateUserInput {
            full_name: Some(" Test User ".into()),
            email: Some("test@example.com".into()),
            password: Some("s3cret".into()),
            phone: Some("0712345678".into()),
            role: Some("customer".into()),
            status: None,
        }
    }

    fn stored(new: NewUser) -> User {
        User {
            id: Uuid::new_v4(),
            full_name: new.full_name,
            email: new.email,
            password_hash: Some(new.password_hash),
            phone: new.phone,
            role: new.role,
            status: new.status,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_new_user_hashes_password() {
        let user = stored(NewUser::validate(input(), TEST_COST).unwrap());
        assert_eq!(user.full_name, "Test User");
        assert!(user.check_password("s3cret"));
        assert!(!user.check_password("wrong"));
    }

    #[test]
    fn test_missing_email_reported() {
        let mut missing = input();
        missing.email = None;
        match NewUser::validate(missing, TEST_COST) {
            Err(PasswordError::Invalid(err)) => assert_eq!(err.message, "email is required"),
            other => panic!("unexpected: {:?}", other),
        }
    }

    #[test]
    fn test_password_hash_never_serialized() {
        let user = stored(NewUser::validate(input(), TEST_COST).unwrap());
        let json = serde_json::to_value(&user).unwrap();
        assert!(json.get("password_hash").is_none());
        assert!(json.get("password").is_none());
    }

    #[test]
    fn test_update_keeps_hash_without_password() {
        let user = stored(NewUser::validate(input(), TEST_COST).unwrap());
        let changes = UserChanges::apply(
            &user,
            UpdateUserInput {
                phone: Some("0799999999".into()),
                ..Default::default()
            },
            TEST_COST,
        )
        .unwrap();
        assert_eq!(changes.password_hash, user.password_hash);
        assert_eq!(changes.phone.as_deref(), Some("0799999999"));
    }

    #[test]
    fn test_update_revalidates_email() {
        let user = stored(NewUser::validate(input(), TEST_COST).unwrap());
        let result = UserChanges::apply(
            &user,
            UpdateUserInput {
                email: Some("not-an-email".into()),
                ..Default::default()
            },
            TEST_COST,
        );
        assert!(matches!(result, Err(PasswordError::Invalid(e)) if e.field == "email"));
    }

    #[test]
    fn test_user_without_hash_fails_closed() {
        let mut user = stored(NewUser::validate(input(), TEST_COST).unwrap());
        user.password_hash = None;
        assert!(!user.check_password("s3cret"));
    }
}
