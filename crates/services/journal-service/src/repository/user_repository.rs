//! User repository implementation with soft delete support.

use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter,
    QueryOrder, Select, Set, SqlErr,
};
use uuid::Uuid;

use super::entities::user::{self, ActiveModel, Entity as UserEntity};
use common::{AppError, AppResult};
use domain::{DomainError, NewUser, User};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// User repository trait for dependency injection.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Insert a new user, assigning id and timestamps
    async fn create(&self, user: NewUser) -> AppResult<User>;

    async fn find_by_id(&self, id: Uuid, include_deleted: bool) -> AppResult<Option<User>>;

    async fn find_by_email(&self, email: &str, include_deleted: bool) -> AppResult<Option<User>>;

    async fn list(&self, include_deleted: bool) -> AppResult<Vec<User>>;

    /// Full replacement; stamps `updated_at`
    async fn update(&self, user: User) -> AppResult<User>;
}

/// SeaORM-backed user store
pub struct UserStore {
    db: DatabaseConnection,
}

impl UserStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    fn scoped(include_deleted: bool) -> Select<UserEntity> {
        let query = UserEntity::find();
        if include_deleted {
            query
        } else {
            query.filter(user::Column::DeletedAt.is_null())
        }
    }
}

fn to_active_model(user: User) -> ActiveModel {
    ActiveModel {
        id: Set(user.id),
        user_type: Set(user.user_type.as_str().to_string()),
        email: Set(user.email),
        password_hash: Set(user.password_hash),
        name: Set(user.name),
        surname: Set(user.surname),
        phone: Set(user.contact.phone),
        address: Set(user.contact.address),
        city: Set(user.contact.city),
        state: Set(user.contact.state),
        country: Set(user.contact.country),
        zip: Set(user.contact.zip),
        created_at: Set(user.created_at),
        updated_at: Set(user.updated_at),
        deleted_at: Set(user.lifecycle.deleted_at()),
    }
}

/// Translate write failures; a live email collision surfaces as `MailExists`.
fn write_error(err: DbErr) -> AppError {
    if let Some(SqlErr::UniqueConstraintViolation(_)) = err.sql_err() {
        return DomainError::MailExists.into();
    }
    match err {
        DbErr::RecordNotUpdated => DomainError::UserNotFound.into(),
        e => AppError::from(e),
    }
}

#[async_trait]
impl UserRepository for UserStore {
    async fn create(&self, new_user: NewUser) -> AppResult<User> {
        let now = chrono::Utc::now();
        let active_model = ActiveModel {
            id: Set(Uuid::new_v4()),
            user_type: Set(new_user.user_type.as_str().to_string()),
            email: Set(new_user.email),
            password_hash: Set(new_user.password_hash),
            name: Set(new_user.name),
            surname: Set(new_user.surname),
            phone: Set(new_user.contact.phone),
            address: Set(new_user.contact.address),
            city: Set(new_user.contact.city),
            state: Set(new_user.contact.state),
            country: Set(new_user.contact.country),
            zip: Set(new_user.contact.zip),
            created_at: Set(now),
            updated_at: Set(now),
            deleted_at: Set(None),
        };

        let model = active_model.insert(&self.db).await.map_err(write_error)?;
        User::try_from(model)
    }

    async fn find_by_id(&self, id: Uuid, include_deleted: bool) -> AppResult<Option<User>> {
        Self::scoped(include_deleted)
            .filter(user::Column::Id.eq(id))
            .one(&self.db)
            .await?
            .map(User::try_from)
            .transpose()
    }

    async fn find_by_email(&self, email: &str, include_deleted: bool) -> AppResult<Option<User>> {
        Self::scoped(include_deleted)
            .filter(user::Column::Email.eq(email))
            .one(&self.db)
            .await?
            .map(User::try_from)
            .transpose()
    }

    async fn list(&self, include_deleted: bool) -> AppResult<Vec<User>> {
        let models = Self::scoped(include_deleted)
            .order_by_asc(user::Column::CreatedAt)
            .all(&self.db)
            .await?;

        models.into_iter().map(User::try_from).collect()
    }

    async fn update(&self, mut user: User) -> AppResult<User> {
        user.updated_at = chrono::Utc::now();

        let model = to_active_model(user)
            .update(&self.db)
            .await
            .map_err(write_error)?;
        User::try_from(model)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_row_on_update_is_user_not_found() {
        let err = write_error(DbErr::RecordNotUpdated);
        assert!(err.is_domain(&DomainError::UserNotFound));
    }

    #[test]
    fn test_other_write_failures_stay_database_errors() {
        let err = write_error(DbErr::Custom("connection reset".to_string()));
        assert!(matches!(err, AppError::Database(_)));
        assert!(!err.is_domain(&DomainError::MailExists));
    }
}
