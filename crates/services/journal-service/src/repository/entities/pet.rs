//! Pet database entity for SeaORM.

use std::collections::BTreeMap;

use sea_orm::entity::prelude::*;

use common::AppError;
use domain::{Gender, Lifecycle, Pet, PetProfile};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "pets")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub name: String,
    pub date_of_birth: DateTimeUtc,
    pub gender: String,
    pub breed_name: String,
    /// JSON array of strings
    pub colors: Json,
    pub description: Option<String>,
    pub pedigree: Option<String>,
    pub microchip: Option<String>,
    pub avatar: Option<String>,
    /// JSON object of string values
    pub metas: Json,
    pub owner_id: Uuid,
    pub vet_id: Option<Uuid>,
    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
    pub deleted_at: Option<DateTimeUtc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl TryFrom<Model> for Pet {
    type Error = AppError;

    fn try_from(model: Model) -> Result<Self, Self::Error> {
        let gender = Gender::parse(&model.gender).map_err(|_| {
            AppError::internal(format!(
                "pet {} has unknown gender {:?}",
                model.id, model.gender
            ))
        })?;
        let colors: Vec<String> = serde_json::from_value(model.colors)
            .map_err(|e| AppError::internal(format!("pet {} colors: {}", model.id, e)))?;
        let metas: BTreeMap<String, String> = serde_json::from_value(model.metas)
            .map_err(|e| AppError::internal(format!("pet {} metas: {}", model.id, e)))?;

        Ok(Pet {
            id: model.id,
            created_at: model.created_at,
            updated_at: model.updated_at,
            lifecycle: Lifecycle::from_deleted_at(model.deleted_at),
            name: model.name,
            date_of_birth: model.date_of_birth,
            gender,
            breed_name: model.breed_name,
            profile: PetProfile {
                colors,
                description: model.description,
                pedigree: model.pedigree,
                microchip: model.microchip,
                avatar: model.avatar,
                metas,
            },
            owner_id: model.owner_id,
            vet_id: model.vet_id,
        })
    }
}
