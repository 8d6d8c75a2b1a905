//! Record repository implementation with soft delete support.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter,
    QueryOrder, Select, Set, TransactionTrait,
};
use uuid::Uuid;

use super::entities::record::{self, ActiveModel, Entity as RecordEntity};
use common::{AppError, AppResult};
use domain::{DomainError, Lifecycle, NewRecord, Record};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Record repository trait for dependency injection.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait RecordRepository: Send + Sync {
    async fn create(&self, record: NewRecord) -> AppResult<Record>;

    /// Insert all records in one batch under a fresh shared group id.
    /// Either every record is stored or none is.
    async fn create_group(&self, records: Vec<NewRecord>) -> AppResult<Vec<Record>>;

    async fn find_by_id(&self, id: Uuid, include_deleted: bool) -> AppResult<Option<Record>>;

    /// Records of any of the given pets, oldest first
    async fn list_by_pets(&self, pet_ids: Vec<Uuid>, include_deleted: bool)
        -> AppResult<Vec<Record>>;

    /// Full replacement; stamps `updated_at`
    async fn update(&self, record: Record) -> AppResult<Record>;
}

/// SeaORM-backed record store
pub struct RecordStore {
    db: DatabaseConnection,
}

impl RecordStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    fn scoped(include_deleted: bool) -> Select<RecordEntity> {
        let query = RecordEntity::find();
        if include_deleted {
            query
        } else {
            query.filter(record::Column::DeletedAt.is_null())
        }
    }
}

fn stamp(new: NewRecord, group_id: Option<Uuid>, now: DateTime<Utc>) -> Record {
    Record {
        id: Uuid::new_v4(),
        created_at: now,
        updated_at: now,
        lifecycle: Lifecycle::Active,
        pet_id: new.pet_id,
        record_type: new.record_type,
        name: new.name,
        date: new.date,
        details: new.details,
        actors: new.actors,
        group_id,
    }
}

fn to_active_model(record: Record) -> ActiveModel {
    ActiveModel {
        id: Set(record.id),
        pet_id: Set(record.pet_id),
        record_type: Set(record.record_type.as_str().to_string()),
        name: Set(record.name),
        date: Set(record.date),
        lot: Set(record.details.lot),
        result: Set(record.details.result),
        description: Set(record.details.description),
        notes: Set(record.details.notes),
        administered_by: Set(record.actors.administered_by),
        verified_by: Set(record.actors.verified_by),
        group_id: Set(record.group_id),
        created_at: Set(record.created_at),
        updated_at: Set(record.updated_at),
        deleted_at: Set(record.lifecycle.deleted_at()),
    }
}

#[async_trait]
impl RecordRepository for RecordStore {
    async fn create(&self, new_record: NewRecord) -> AppResult<Record> {
        let record = stamp(new_record, None, Utc::now());
        let model = to_active_model(record).insert(&self.db).await?;
        Record::try_from(model)
    }

    async fn create_group(&self, new_records: Vec<NewRecord>) -> AppResult<Vec<Record>> {
        if new_records.is_empty() {
            return Ok(Vec::new());
        }

        let group_id = Uuid::new_v4();
        let now = Utc::now();
        let records: Vec<Record> = new_records
            .into_iter()
            .map(|r| stamp(r, Some(group_id), now))
            .collect();

        let txn = self.db.begin().await?;
        RecordEntity::insert_many(records.iter().cloned().map(to_active_model))
            .exec(&txn)
            .await?;
        txn.commit().await?;

        tracing::debug!(%group_id, count = records.len(), "Record group stored");
        Ok(records)
    }

    async fn find_by_id(&self, id: Uuid, include_deleted: bool) -> AppResult<Option<Record>> {
        Self::scoped(include_deleted)
            .filter(record::Column::Id.eq(id))
            .one(&self.db)
            .await?
            .map(Record::try_from)
            .transpose()
    }

    async fn list_by_pets(
        &self,
        pet_ids: Vec<Uuid>,
        include_deleted: bool,
    ) -> AppResult<Vec<Record>> {
        if pet_ids.is_empty() {
            return Ok(Vec::new());
        }

        let models = Self::scoped(include_deleted)
            .filter(record::Column::PetId.is_in(pet_ids))
            .order_by_asc(record::Column::Date)
            .all(&self.db)
            .await?;

        models.into_iter().map(Record::try_from).collect()
    }

    async fn update(&self, mut record: Record) -> AppResult<Record> {
        record.updated_at = Utc::now();

        match to_active_model(record).update(&self.db).await {
            Ok(model) => Record::try_from(model),
            Err(DbErr::RecordNotUpdated) => Err(DomainError::RecordNotFound.into()),
            Err(e) => Err(AppError::from(e)),
        }
    }
}
