//! Pet service - field validation, the owner-or-vet visibility boundary and
//! the asymmetric deletion rule.

use std::sync::Arc;

use async_trait::async_trait;
use uuid::Uuid;

use common::{AppResult, OptionExt};
use domain::{
    CreatePet, DomainError, NewPet, Pet, PetRemoval, Relationship, SoftDelete, UpdatePet,
    UserType,
};

use super::user_service::UserService;
use crate::repository::PetRepository;

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Pet service trait for dependency injection.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait PetService: Send + Sync {
    async fn pet(&self, id: Uuid, include_deleted: bool) -> AppResult<Pet>;

    async fn pets(&self, include_deleted: bool) -> AppResult<Vec<Pet>>;

    /// Pets the user owns or attends as vet.
    async fn pets_by_user(&self, user_id: Uuid, include_deleted: bool) -> AppResult<Vec<Pet>>;

    /// A pet visible to the user. Unrelated pets are reported as not found.
    async fn pet_by_user(&self, user_id: Uuid, id: Uuid, include_deleted: bool)
        -> AppResult<Pet>;

    async fn create_pet(&self, opts: CreatePet) -> AppResult<Pet>;

    async fn update_pet(&self, opts: UpdatePet) -> AppResult<Pet>;

    /// Owner: soft delete. Attending vet: detach the vet only.
    async fn delete_pet(&self, user_id: Uuid, id: Uuid) -> AppResult<PetRemoval>;
}

/// Concrete implementation of PetService using repository.
pub struct PetManager {
    repo: Arc<dyn PetRepository>,
    users: Arc<dyn UserService>,
}

impl PetManager {
    pub fn new(repo: Arc<dyn PetRepository>, users: Arc<dyn UserService>) -> Self {
        Self { repo, users }
    }

    async fn resolve_vet(&self, vet_id: Option<Uuid>) -> AppResult<Option<Uuid>> {
        match vet_id {
            Some(id) => {
                let vet = self.users.user_by_type(id, UserType::Vet, false).await?;
                Ok(Some(vet.id))
            }
            None => Ok(None),
        }
    }
}

#[async_trait]
impl PetService for PetManager {
    async fn pet(&self, id: Uuid, include_deleted: bool) -> AppResult<Pet> {
        self.repo
            .find_by_id(id, include_deleted)
            .await?
            .or_not_found(DomainError::PetNotFound)
    }

    async fn pets(&self, include_deleted: bool) -> AppResult<Vec<Pet>> {
        self.repo.list(include_deleted).await
    }

    async fn pets_by_user(&self, user_id: Uuid, include_deleted: bool) -> AppResult<Vec<Pet>> {
        self.repo.list_related(user_id, include_deleted).await
    }

    async fn pet_by_user(
        &self,
        user_id: Uuid,
        id: Uuid,
        include_deleted: bool,
    ) -> AppResult<Pet> {
        self.repo
            .find_by_id(id, include_deleted)
            .await?
            .filter(|pet| pet.has_relationship(user_id))
            .or_not_found(DomainError::PetNotFound)
    }

    async fn create_pet(&self, opts: CreatePet) -> AppResult<Pet> {
        let owner = self.users.user(opts.owner_id, false).await?;
        let vet_id = self.resolve_vet(opts.vet_id).await?;
        let fields = opts.fields()?;

        let pet = self
            .repo
            .create(NewPet {
                fields,
                profile: opts.profile,
                owner_id: owner.id,
                vet_id,
            })
            .await?;
        tracing::info!(pet_id = %pet.id, owner_id = %pet.owner_id, "Pet created");
        Ok(pet)
    }

    async fn update_pet(&self, opts: UpdatePet) -> AppResult<Pet> {
        let mut pet = self.pet_by_user(opts.user_id, opts.id, false).await?;
        let fields = opts.fields()?;
        let vet_id = self.resolve_vet(opts.vet_id).await?;

        pet.name = fields.name;
        pet.date_of_birth = fields.date_of_birth;
        pet.gender = fields.gender;
        pet.breed_name = fields.breed_name;
        pet.profile = opts.profile;
        pet.vet_id = vet_id;

        self.repo.update(pet).await
    }

    async fn delete_pet(&self, user_id: Uuid, id: Uuid) -> AppResult<PetRemoval> {
        let mut pet = self.pet(id, false).await?;

        let removal = match pet.relationship(user_id) {
            Some(Relationship::Owner) => {
                pet.soft_delete();
                PetRemoval::Deleted
            }
            Some(Relationship::AttendingVet) => {
                pet.remove_vet();
                PetRemoval::VetDetached
            }
            None => return Err(DomainError::PetNotFound.into()),
        };

        self.repo.update(pet).await?;
        tracing::info!(pet_id = %id, %user_id, ?removal, "Pet removal");
        Ok(removal)
    }
}
