//! Application - the entry point transports call.
//!
//! Composes the three services and adds the reads that span pets and
//! records. Each operation performs its relationship check exactly once,
//! either here or in the service it delegates to.

use std::sync::Arc;

use async_trait::async_trait;
use sea_orm::DatabaseConnection;
use uuid::Uuid;

use common::{AppResult, JwtConfig};
use domain::{
    CreatePet, CreateRecord, CreateRecords, CreateUser, Login, Pet, PetRemoval, Record,
    UpdatePet, UpdateRecord, UpdateUser, User, UserType,
};

use super::pet_service::{PetManager, PetService};
use super::record_service::{RecordManager, RecordService};
use super::token::{JwtIssuer, TokenResponse};
use super::user_service::{Session, UserManager, UserService};
use crate::repository::{PetStore, RecordStore, UserStore};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait Application: Send + Sync {
    // Users
    async fn create_user(&self, opts: CreateUser) -> AppResult<Session>;

    async fn update_user(&self, opts: UpdateUser, include_deleted: bool) -> AppResult<User>;

    async fn authenticate(&self, login: Login) -> AppResult<Session>;

    /// Fresh token for an existing, live user.
    async fn refresh_token(&self, user_id: Uuid) -> AppResult<TokenResponse>;

    async fn user(&self, id: Uuid, include_deleted: bool) -> AppResult<User>;

    async fn users(&self, include_deleted: bool) -> AppResult<Vec<User>>;

    async fn users_by_type(&self, user_type: UserType, include_deleted: bool)
        -> AppResult<Vec<User>>;

    async fn delete_user(&self, id: Uuid) -> AppResult<User>;

    // Pets
    async fn create_pet(&self, opts: CreatePet) -> AppResult<Pet>;

    async fn update_pet(&self, opts: UpdatePet) -> AppResult<Pet>;

    async fn delete_pet(&self, user_id: Uuid, id: Uuid) -> AppResult<PetRemoval>;

    async fn pets_by_user(&self, user_id: Uuid, include_deleted: bool) -> AppResult<Vec<Pet>>;

    async fn pet_by_user(&self, user_id: Uuid, id: Uuid, include_deleted: bool)
        -> AppResult<Pet>;

    // Records
    async fn create_record(&self, opts: CreateRecord) -> AppResult<Record>;

    async fn create_records(&self, opts: CreateRecords) -> AppResult<Vec<Record>>;

    async fn update_record(&self, opts: UpdateRecord) -> AppResult<Record>;

    /// Records of every pet visible to the user.
    async fn records_by_user(&self, user_id: Uuid, include_deleted: bool)
        -> AppResult<Vec<Record>>;

    async fn records_by_user_pet(
        &self,
        user_id: Uuid,
        pet_id: Uuid,
        include_deleted: bool,
    ) -> AppResult<Vec<Record>>;

    async fn record_by_user_pet(
        &self,
        user_id: Uuid,
        pet_id: Uuid,
        id: Uuid,
        include_deleted: bool,
    ) -> AppResult<Record>;

    async fn delete_record_user_pet(&self, user_id: Uuid, pet_id: Uuid, id: Uuid)
        -> AppResult<Record>;
}

/// Service composition behind [`Application`].
pub struct Journal {
    users: Arc<dyn UserService>,
    pets: Arc<dyn PetService>,
    records: Arc<dyn RecordService>,
}

impl Journal {
    pub fn new(
        users: Arc<dyn UserService>,
        pets: Arc<dyn PetService>,
        records: Arc<dyn RecordService>,
    ) -> Self {
        Self {
            users,
            pets,
            records,
        }
    }

    /// Wire stores and services over one database connection.
    pub fn from_connection(db: DatabaseConnection, jwt: &JwtConfig) -> Self {
        let tokens = Arc::new(JwtIssuer::new(jwt));
        let users: Arc<dyn UserService> =
            Arc::new(UserManager::new(Arc::new(UserStore::new(db.clone())), tokens));
        let pets: Arc<dyn PetService> = Arc::new(PetManager::new(
            Arc::new(PetStore::new(db.clone())),
            users.clone(),
        ));
        let records: Arc<dyn RecordService> = Arc::new(RecordManager::new(
            Arc::new(RecordStore::new(db)),
            pets.clone(),
            users.clone(),
        ));

        Self::new(users, pets, records)
    }
}

#[async_trait]
impl Application for Journal {
    async fn create_user(&self, opts: CreateUser) -> AppResult<Session> {
        self.users.create_user(opts).await
    }

    async fn update_user(&self, opts: UpdateUser, include_deleted: bool) -> AppResult<User> {
        self.users.update_user(opts, include_deleted).await
    }

    async fn authenticate(&self, login: Login) -> AppResult<Session> {
        self.users.authenticate(login).await
    }

    async fn refresh_token(&self, user_id: Uuid) -> AppResult<TokenResponse> {
        let user = self.users.user(user_id, true).await?;
        self.users.issue_token(&user).await
    }

    async fn user(&self, id: Uuid, include_deleted: bool) -> AppResult<User> {
        self.users.user(id, include_deleted).await
    }

    async fn users(&self, include_deleted: bool) -> AppResult<Vec<User>> {
        self.users.users(include_deleted).await
    }

    async fn users_by_type(
        &self,
        user_type: UserType,
        include_deleted: bool,
    ) -> AppResult<Vec<User>> {
        self.users.users_by_type(user_type, include_deleted).await
    }

    async fn delete_user(&self, id: Uuid) -> AppResult<User> {
        self.users.delete_user(id).await
    }

    async fn create_pet(&self, opts: CreatePet) -> AppResult<Pet> {
        self.pets.create_pet(opts).await
    }

    async fn update_pet(&self, opts: UpdatePet) -> AppResult<Pet> {
        self.pets.update_pet(opts).await
    }

    async fn delete_pet(&self, user_id: Uuid, id: Uuid) -> AppResult<PetRemoval> {
        self.pets.delete_pet(user_id, id).await
    }

    async fn pets_by_user(&self, user_id: Uuid, include_deleted: bool) -> AppResult<Vec<Pet>> {
        self.pets.pets_by_user(user_id, include_deleted).await
    }

    async fn pet_by_user(
        &self,
        user_id: Uuid,
        id: Uuid,
        include_deleted: bool,
    ) -> AppResult<Pet> {
        self.pets.pet_by_user(user_id, id, include_deleted).await
    }

    async fn create_record(&self, opts: CreateRecord) -> AppResult<Record> {
        self.records.create_record(opts).await
    }

    async fn create_records(&self, opts: CreateRecords) -> AppResult<Vec<Record>> {
        self.records.create_records(opts).await
    }

    async fn update_record(&self, opts: UpdateRecord) -> AppResult<Record> {
        self.records.update_record(opts).await
    }

    async fn records_by_user(
        &self,
        user_id: Uuid,
        include_deleted: bool,
    ) -> AppResult<Vec<Record>> {
        let pet_ids = self
            .pets
            .pets_by_user(user_id, include_deleted)
            .await?
            .into_iter()
            .map(|pet| pet.id)
            .collect();

        self.records.pets_records(pet_ids, include_deleted).await
    }

    async fn records_by_user_pet(
        &self,
        user_id: Uuid,
        pet_id: Uuid,
        include_deleted: bool,
    ) -> AppResult<Vec<Record>> {
        let pet = self.pets.pet_by_user(user_id, pet_id, include_deleted).await?;
        self.records.pet_records(pet.id, include_deleted).await
    }

    async fn record_by_user_pet(
        &self,
        user_id: Uuid,
        pet_id: Uuid,
        id: Uuid,
        include_deleted: bool,
    ) -> AppResult<Record> {
        let pet = self.pets.pet_by_user(user_id, pet_id, include_deleted).await?;
        self.records.pet_record(pet.id, id, include_deleted).await
    }

    async fn delete_record_user_pet(
        &self,
        user_id: Uuid,
        pet_id: Uuid,
        id: Uuid,
    ) -> AppResult<Record> {
        self.records.delete_record(user_id, pet_id, id).await
    }
}
