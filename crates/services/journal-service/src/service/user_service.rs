//! User service - account rules: email uniqueness, password policy,
//! soft delete, authentication and token gating.

use std::sync::Arc;

use async_trait::async_trait;
use serde::Serialize;
use uuid::Uuid;

use common::{AppResult, OptionExt};
use domain::validation::{require_text, validate_email};
use domain::{
    CreateUser, DomainError, Login, NewUser, Password, SoftDelete, UpdateUser, User, UserType,
};

use super::token::{TokenIssuer, TokenResponse};
use crate::repository::UserRepository;

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// A user together with a freshly issued token.
#[derive(Debug, Clone, Serialize)]
pub struct Session {
    pub user: User,
    pub token: TokenResponse,
}

/// User service trait for dependency injection.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait UserService: Send + Sync {
    async fn user(&self, id: Uuid, include_deleted: bool) -> AppResult<User>;

    async fn users(&self, include_deleted: bool) -> AppResult<Vec<User>>;

    async fn users_by_type(&self, user_type: UserType, include_deleted: bool)
        -> AppResult<Vec<User>>;

    /// A user of the given type. A user of another type is reported as not found.
    async fn user_by_type(
        &self,
        id: Uuid,
        user_type: UserType,
        include_deleted: bool,
    ) -> AppResult<User>;

    /// Register and issue a token.
    async fn create_user(&self, opts: CreateUser) -> AppResult<Session>;

    async fn update_user(&self, opts: UpdateUser, include_deleted: bool) -> AppResult<User>;

    async fn authenticate(&self, login: Login) -> AppResult<Session>;

    /// Soft delete a live user.
    async fn delete_user(&self, id: Uuid) -> AppResult<User>;

    /// Refused for deleted users.
    async fn issue_token(&self, user: &User) -> AppResult<TokenResponse>;
}

/// Concrete implementation of UserService using repository.
pub struct UserManager {
    repo: Arc<dyn UserRepository>,
    tokens: Arc<dyn TokenIssuer>,
}

impl UserManager {
    pub fn new(repo: Arc<dyn UserRepository>, tokens: Arc<dyn TokenIssuer>) -> Self {
        Self { repo, tokens }
    }

    /// Format check, then uniqueness against every other account in scope.
    async fn check_email(
        &self,
        email: &str,
        self_id: Option<Uuid>,
        include_deleted: bool,
    ) -> AppResult<()> {
        validate_email(email)?;
        match self.repo.find_by_email(email, include_deleted).await? {
            Some(existing) if Some(existing.id) != self_id => Err(DomainError::MailExists.into()),
            _ => Ok(()),
        }
    }
}

#[async_trait]
impl UserService for UserManager {
    async fn user(&self, id: Uuid, include_deleted: bool) -> AppResult<User> {
        self.repo
            .find_by_id(id, include_deleted)
            .await?
            .or_not_found(DomainError::UserNotFound)
    }

    async fn users(&self, include_deleted: bool) -> AppResult<Vec<User>> {
        self.repo.list(include_deleted).await
    }

    async fn users_by_type(
        &self,
        user_type: UserType,
        include_deleted: bool,
    ) -> AppResult<Vec<User>> {
        let users = self.repo.list(include_deleted).await?;
        Ok(users
            .into_iter()
            .filter(|u| u.user_type == user_type)
            .collect())
    }

    async fn user_by_type(
        &self,
        id: Uuid,
        user_type: UserType,
        include_deleted: bool,
    ) -> AppResult<User> {
        self.repo
            .find_by_id(id, include_deleted)
            .await?
            .filter(|u| u.user_type == user_type)
            .or_not_found(DomainError::UserNotFound)
    }

    async fn create_user(&self, opts: CreateUser) -> AppResult<Session> {
        let user_type = UserType::parse(&opts.user_type)?;
        self.check_email(&opts.email, None, true).await?;
        let password = Password::new(&opts.password)?;
        require_text(&opts.name, DomainError::NoValidName)?;
        require_text(&opts.surname, DomainError::NoValidSurname)?;

        let user = self
            .repo
            .create(NewUser {
                user_type,
                email: opts.email,
                password_hash: password.into_string(),
                name: opts.name.trim().to_string(),
                surname: opts.surname.trim().to_string(),
                contact: opts.contact,
            })
            .await?;
        tracing::info!(user_id = %user.id, user_type = %user.user_type, "User created");

        let token = self.issue_token(&user).await?;
        Ok(Session { user, token })
    }

    async fn update_user(&self, opts: UpdateUser, include_deleted: bool) -> AppResult<User> {
        let mut user = self.user(opts.id, include_deleted).await?;
        self.check_email(&opts.email, Some(user.id), include_deleted)
            .await?;
        require_text(&opts.name, DomainError::NoValidName)?;
        require_text(&opts.surname, DomainError::NoValidSurname)?;

        user.email = opts.email;
        user.name = opts.name.trim().to_string();
        user.surname = opts.surname.trim().to_string();
        user.contact = opts.contact;

        self.repo.update(user).await
    }

    async fn authenticate(&self, login: Login) -> AppResult<Session> {
        let user = self
            .repo
            .find_by_email(&login.email, true)
            .await?
            .or_not_found(DomainError::UserNotFound)?;

        if user.is_deleted() {
            tracing::warn!(user_id = %user.id, "Login refused for deleted user");
            return Err(DomainError::UserDeleted.into());
        }
        if !user.password().verify(&login.password) {
            tracing::warn!(user_id = %user.id, "Login refused: wrong credentials");
            return Err(DomainError::Authentication.into());
        }

        let token = self.issue_token(&user).await?;
        Ok(Session { user, token })
    }

    async fn delete_user(&self, id: Uuid) -> AppResult<User> {
        let mut user = self.user(id, false).await?;
        user.soft_delete();

        let user = self.repo.update(user).await?;
        tracing::info!(user_id = %user.id, "User soft deleted");
        Ok(user)
    }

    async fn issue_token(&self, user: &User) -> AppResult<TokenResponse> {
        if user.is_deleted() {
            return Err(DomainError::UserDeleted.into());
        }
        self.tokens.issue(user.id, user.user_type)
    }
}
