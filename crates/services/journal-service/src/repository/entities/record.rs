//! Record database entity for SeaORM.

use sea_orm::entity::prelude::*;

use common::AppError;
use domain::{Actors, Lifecycle, Record, RecordDetails, RecordType};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "records")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub pet_id: Uuid,
    pub record_type: String,
    pub name: String,
    pub date: DateTimeUtc,
    pub lot: Option<String>,
    pub result: Option<String>,
    pub description: Option<String>,
    pub notes: Option<String>,
    pub administered_by: Option<Uuid>,
    pub verified_by: Option<Uuid>,
    pub group_id: Option<Uuid>,
    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
    pub deleted_at: Option<DateTimeUtc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl TryFrom<Model> for Record {
    type Error = AppError;

    fn try_from(model: Model) -> Result<Self, Self::Error> {
        let record_type = RecordType::parse(&model.record_type).map_err(|_| {
            AppError::internal(format!(
                "record {} has unknown type {:?}",
                model.id, model.record_type
            ))
        })?;

        Ok(Record {
            id: model.id,
            created_at: model.created_at,
            updated_at: model.updated_at,
            lifecycle: Lifecycle::from_deleted_at(model.deleted_at),
            pet_id: model.pet_id,
            record_type,
            name: model.name,
            date: model.date,
            details: RecordDetails {
                lot: model.lot,
                result: model.result,
                description: model.description,
                notes: model.notes,
            },
            actors: Actors {
                administered_by: model.administered_by,
                verified_by: model.verified_by,
            },
            group_id: model.group_id,
        })
    }
}
