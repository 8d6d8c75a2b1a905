//! User database entity for SeaORM.

use sea_orm::entity::prelude::*;

use common::AppError;
use domain::{Contact, Lifecycle, User, UserType};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "users")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub user_type: String,
    pub email: String,
    pub password_hash: String,
    pub name: String,
    pub surname: String,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub country: Option<String>,
    pub zip: Option<String>,
    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
    /// Soft delete timestamp (NULL = active, set = deleted)
    pub deleted_at: Option<DateTimeUtc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

/// Convert database model to domain entity
impl TryFrom<Model> for User {
    type Error = AppError;

    fn try_from(model: Model) -> Result<Self, Self::Error> {
        let user_type = UserType::parse(&model.user_type).map_err(|_| {
            AppError::internal(format!(
                "user {} has unknown type {:?}",
                model.id, model.user_type
            ))
        })?;

        Ok(User {
            id: model.id,
            created_at: model.created_at,
            updated_at: model.updated_at,
            lifecycle: Lifecycle::from_deleted_at(model.deleted_at),
            user_type,
            email: model.email,
            password_hash: model.password_hash,
            name: model.name,
            surname: model.surname,
            contact: Contact {
                phone: model.phone,
                address: model.address,
                city: model.city,
                state: model.state,
                country: model.country,
                zip: model.zip,
            },
        })
    }
}
