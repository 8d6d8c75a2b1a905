//! User domain entity and related types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::constants::{USER_TYPE_OWNER, USER_TYPE_VET};
use crate::error::{DomainError, DomainResult};
use crate::lifecycle::{Lifecycle, SoftDelete};
use crate::password::Password;

/// Account types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum UserType {
    Owner,
    Vet,
}

impl UserType {
    /// Parse a user type, ignoring case and surrounding whitespace.
    pub fn parse(s: &str) -> DomainResult<Self> {
        match s.trim().to_uppercase().as_str() {
            USER_TYPE_OWNER => Ok(UserType::Owner),
            USER_TYPE_VET => Ok(UserType::Vet),
            _ => Err(DomainError::NoValidType),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            UserType::Owner => USER_TYPE_OWNER,
            UserType::Vet => USER_TYPE_VET,
        }
    }

    pub fn is_vet(&self) -> bool {
        matches!(self, UserType::Vet)
    }
}

impl std::fmt::Display for UserType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Optional contact details
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contact {
    pub phone: Option<String>,
    pub address: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub country: Option<String>,
    pub zip: Option<String>,
}

/// User domain entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub lifecycle: Lifecycle,
    pub user_type: UserType,
    pub email: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub name: String,
    pub surname: String,
    #[serde(default)]
    pub contact: Contact,
}

impl User {
    pub fn password(&self) -> Password {
        Password::from_hash(self.password_hash.clone())
    }

    pub fn is_vet(&self) -> bool {
        self.user_type.is_vet()
    }
}

impl SoftDelete for User {
    fn lifecycle(&self) -> Lifecycle {
        self.lifecycle
    }

    fn set_lifecycle(&mut self, lifecycle: Lifecycle) {
        self.lifecycle = lifecycle;
    }
}

/// Validated user ready to be stored; the store assigns id and timestamps.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub user_type: UserType,
    pub email: String,
    pub password_hash: String,
    pub name: String,
    pub surname: String,
    pub contact: Contact,
}

/// User registration data
#[derive(Debug, Clone, Deserialize)]
pub struct CreateUser {
    /// `OWNER` or `VET`
    pub user_type: String,
    pub email: String,
    pub password: String,
    pub name: String,
    pub surname: String,
    #[serde(default)]
    pub contact: Contact,
}

/// Profile update; a full replacement of the mutable fields.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateUser {
    pub id: Uuid,
    pub email: String,
    pub name: String,
    pub surname: String,
    #[serde(default)]
    pub contact: Contact,
}

/// Login credentials
#[derive(Debug, Clone, Deserialize)]
pub struct Login {
    pub email: String,
    pub password: String,
}

/// User response (safe to return to client)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserResponse {
    pub id: Uuid,
    pub user_type: UserType,
    pub email: String,
    pub name: String,
    pub surname: String,
    pub contact: Contact,
    pub created_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deleted_at: Option<DateTime<Utc>>,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            user_type: user.user_type,
            email: user.email,
            name: user.name,
            surname: user.surname,
            contact: user.contact,
            created_at: user.created_at,
            deleted_at: user.lifecycle.deleted_at(),
        }
    }
}
