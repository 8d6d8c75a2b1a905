//! Pet repository implementation with soft delete support.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sea_orm::{
    sea_query::Condition, ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait,
    QueryFilter, QueryOrder, Select, Set,
};
use uuid::Uuid;

use super::entities::pet::{self, ActiveModel, Entity as PetEntity};
use common::{AppError, AppResult};
use domain::{DomainError, Lifecycle, NewPet, Pet, PetProfile};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Pet repository trait for dependency injection.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait PetRepository: Send + Sync {
    async fn create(&self, pet: NewPet) -> AppResult<Pet>;

    async fn find_by_id(&self, id: Uuid, include_deleted: bool) -> AppResult<Option<Pet>>;

    async fn list(&self, include_deleted: bool) -> AppResult<Vec<Pet>>;

    /// Pets the user owns or attends as vet
    async fn list_related(&self, user_id: Uuid, include_deleted: bool) -> AppResult<Vec<Pet>>;

    /// Full replacement; stamps `updated_at`
    async fn update(&self, pet: Pet) -> AppResult<Pet>;
}

/// SeaORM-backed pet store
pub struct PetStore {
    db: DatabaseConnection,
}

impl PetStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    fn scoped(include_deleted: bool) -> Select<PetEntity> {
        let query = PetEntity::find();
        if include_deleted {
            query
        } else {
            query.filter(pet::Column::DeletedAt.is_null())
        }
    }

    /// SQL form of [`Pet::has_relationship`]: owner or attending vet.
    fn related(user_id: Uuid, include_deleted: bool) -> Select<PetEntity> {
        Self::scoped(include_deleted).filter(
            Condition::any()
                .add(pet::Column::OwnerId.eq(user_id))
                .add(pet::Column::VetId.eq(user_id)),
        )
    }
}

fn profile_json(profile: &PetProfile) -> AppResult<(serde_json::Value, serde_json::Value)> {
    let colors = serde_json::to_value(&profile.colors)
        .map_err(|e| AppError::internal(format!("pet colors: {}", e)))?;
    let metas = serde_json::to_value(&profile.metas)
        .map_err(|e| AppError::internal(format!("pet metas: {}", e)))?;
    Ok((colors, metas))
}

fn stamp(new: NewPet, now: DateTime<Utc>) -> Pet {
    Pet {
        id: Uuid::new_v4(),
        created_at: now,
        updated_at: now,
        lifecycle: Lifecycle::Active,
        name: new.fields.name,
        date_of_birth: new.fields.date_of_birth,
        gender: new.fields.gender,
        breed_name: new.fields.breed_name,
        profile: new.profile,
        owner_id: new.owner_id,
        vet_id: new.vet_id,
    }
}

fn to_active_model(pet: Pet) -> AppResult<ActiveModel> {
    let (colors, metas) = profile_json(&pet.profile)?;
    Ok(ActiveModel {
        id: Set(pet.id),
        name: Set(pet.name),
        date_of_birth: Set(pet.date_of_birth),
        gender: Set(pet.gender.as_str().to_string()),
        breed_name: Set(pet.breed_name),
        colors: Set(colors),
        description: Set(pet.profile.description),
        pedigree: Set(pet.profile.pedigree),
        microchip: Set(pet.profile.microchip),
        avatar: Set(pet.profile.avatar),
        metas: Set(metas),
        owner_id: Set(pet.owner_id),
        vet_id: Set(pet.vet_id),
        created_at: Set(pet.created_at),
        updated_at: Set(pet.updated_at),
        deleted_at: Set(pet.lifecycle.deleted_at()),
    })
}

#[async_trait]
impl PetRepository for PetStore {
    async fn create(&self, new_pet: NewPet) -> AppResult<Pet> {
        let model = to_active_model(stamp(new_pet, Utc::now()))?
            .insert(&self.db)
            .await?;
        Pet::try_from(model)
    }

    async fn find_by_id(&self, id: Uuid, include_deleted: bool) -> AppResult<Option<Pet>> {
        Self::scoped(include_deleted)
            .filter(pet::Column::Id.eq(id))
            .one(&self.db)
            .await?
            .map(Pet::try_from)
            .transpose()
    }

    async fn list(&self, include_deleted: bool) -> AppResult<Vec<Pet>> {
        let models = Self::scoped(include_deleted)
            .order_by_asc(pet::Column::CreatedAt)
            .all(&self.db)
            .await?;

        models.into_iter().map(Pet::try_from).collect()
    }

    async fn list_related(&self, user_id: Uuid, include_deleted: bool) -> AppResult<Vec<Pet>> {
        let models = Self::related(user_id, include_deleted)
            .order_by_asc(pet::Column::CreatedAt)
            .all(&self.db)
            .await?;

        models.into_iter().map(Pet::try_from).collect()
    }

    async fn update(&self, mut pet: Pet) -> AppResult<Pet> {
        pet.updated_at = Utc::now();

        match to_active_model(pet)?.update(&self.db).await {
            Ok(model) => Pet::try_from(model),
            Err(DbErr::RecordNotUpdated) => Err(DomainError::PetNotFound.into()),
            Err(e) => Err(AppError::from(e)),
        }
    }
}
