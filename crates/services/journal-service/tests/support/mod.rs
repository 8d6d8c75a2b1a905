//! In-memory stores and fixtures for driving the application end to end.

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use uuid::Uuid;

use common::{AppResult, JwtConfig};
use domain::{
    Contact, CreatePet, CreateRecord, CreateUser, DomainError, Lifecycle, NewPet, NewRecord,
    NewUser, Pet, PetProfile, Record, RecordDetails, SoftDelete, User,
};
use journal_service_lib::repository::{PetRepository, RecordRepository, UserRepository};
use journal_service_lib::service::{
    Journal, JwtIssuer, PetManager, PetService, RecordManager, RecordService, Session,
    UserManager, UserService, Application,
};

pub const PASSWORD: &str = "Str0ng.pass";

#[derive(Debug, Default)]
pub struct InMemoryUserStore {
    users: RwLock<HashMap<Uuid, User>>,
}

#[async_trait]
impl UserRepository for InMemoryUserStore {
    async fn create(&self, new: NewUser) -> AppResult<User> {
        let now = Utc::now();
        let user = User {
            id: Uuid::new_v4(),
            created_at: now,
            updated_at: now,
            lifecycle: Lifecycle::Active,
            user_type: new.user_type,
            email: new.email,
            password_hash: new.password_hash,
            name: new.name,
            surname: new.surname,
            contact: new.contact,
        };
        self.users.write().unwrap().insert(user.id, user.clone());
        Ok(user)
    }

    async fn find_by_id(&self, id: Uuid, include_deleted: bool) -> AppResult<Option<User>> {
        let users = self.users.read().unwrap();
        Ok(users
            .get(&id)
            .filter(|u| u.is_visible(include_deleted))
            .cloned())
    }

    async fn find_by_email(&self, email: &str, include_deleted: bool) -> AppResult<Option<User>> {
        let users = self.users.read().unwrap();
        Ok(users
            .values()
            .find(|u| u.email == email && u.is_visible(include_deleted))
            .cloned())
    }

    async fn list(&self, include_deleted: bool) -> AppResult<Vec<User>> {
        let users = self.users.read().unwrap();
        let mut list: Vec<User> = users
            .values()
            .filter(|u| u.is_visible(include_deleted))
            .cloned()
            .collect();
        list.sort_by_key(|u| u.created_at);
        Ok(list)
    }

    async fn update(&self, mut user: User) -> AppResult<User> {
        let mut users = self.users.write().unwrap();
        if !users.contains_key(&user.id) {
            return Err(DomainError::UserNotFound.into());
        }
        user.updated_at = Utc::now();
        users.insert(user.id, user.clone());
        Ok(user)
    }
}

#[derive(Debug, Default)]
pub struct InMemoryPetStore {
    pets: RwLock<HashMap<Uuid, Pet>>,
}

#[async_trait]
impl PetRepository for InMemoryPetStore {
    async fn create(&self, new: NewPet) -> AppResult<Pet> {
        let now = Utc::now();
        let pet = Pet {
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
        };
        self.pets.write().unwrap().insert(pet.id, pet.clone());
        Ok(pet)
    }

    async fn find_by_id(&self, id: Uuid, include_deleted: bool) -> AppResult<Option<Pet>> {
        let pets = self.pets.read().unwrap();
        Ok(pets
            .get(&id)
            .filter(|p| p.is_visible(include_deleted))
            .cloned())
    }

    async fn list(&self, include_deleted: bool) -> AppResult<Vec<Pet>> {
        let pets = self.pets.read().unwrap();
        let mut list: Vec<Pet> = pets
            .values()
            .filter(|p| p.is_visible(include_deleted))
            .cloned()
            .collect();
        list.sort_by_key(|p| p.created_at);
        Ok(list)
    }

    async fn list_related(&self, user_id: Uuid, include_deleted: bool) -> AppResult<Vec<Pet>> {
        let list = self.list(include_deleted).await?;
        Ok(list
            .into_iter()
            .filter(|p| p.has_relationship(user_id))
            .collect())
    }

    async fn update(&self, mut pet: Pet) -> AppResult<Pet> {
        let mut pets = self.pets.write().unwrap();
        if !pets.contains_key(&pet.id) {
            return Err(DomainError::PetNotFound.into());
        }
        pet.updated_at = Utc::now();
        pets.insert(pet.id, pet.clone());
        Ok(pet)
    }
}

#[derive(Debug, Default)]
pub struct InMemoryRecordStore {
    records: RwLock<HashMap<Uuid, Record>>,
}

impl InMemoryRecordStore {
    /// Every stored record regardless of lifecycle
    pub fn all(&self) -> Vec<Record> {
        self.records.read().unwrap().values().cloned().collect()
    }

    fn stamp(new: NewRecord, group_id: Option<Uuid>) -> Record {
        let now = Utc::now();
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
}

#[async_trait]
impl RecordRepository for InMemoryRecordStore {
    async fn create(&self, new: NewRecord) -> AppResult<Record> {
        let record = Self::stamp(new, None);
        self.records
            .write()
            .unwrap()
            .insert(record.id, record.clone());
        Ok(record)
    }

    async fn create_group(&self, batch: Vec<NewRecord>) -> AppResult<Vec<Record>> {
        let group_id = Uuid::new_v4();
        let stored: Vec<Record> = batch
            .into_iter()
            .map(|new| Self::stamp(new, Some(group_id)))
            .collect();

        let mut records = self.records.write().unwrap();
        for record in &stored {
            records.insert(record.id, record.clone());
        }
        Ok(stored)
    }

    async fn find_by_id(&self, id: Uuid, include_deleted: bool) -> AppResult<Option<Record>> {
        let records = self.records.read().unwrap();
        Ok(records
            .get(&id)
            .filter(|r| r.is_visible(include_deleted))
            .cloned())
    }

    async fn list_by_pets(
        &self,
        pet_ids: Vec<Uuid>,
        include_deleted: bool,
    ) -> AppResult<Vec<Record>> {
        let records = self.records.read().unwrap();
        let mut list: Vec<Record> = records
            .values()
            .filter(|r| pet_ids.contains(&r.pet_id) && r.is_visible(include_deleted))
            .cloned()
            .collect();
        list.sort_by_key(|r| r.date);
        Ok(list)
    }

    async fn update(&self, mut record: Record) -> AppResult<Record> {
        let mut records = self.records.write().unwrap();
        if !records.contains_key(&record.id) {
            return Err(DomainError::RecordNotFound.into());
        }
        record.updated_at = Utc::now();
        records.insert(record.id, record.clone());
        Ok(record)
    }
}

/// Application wired over in-memory stores.
pub struct TestApp {
    pub journal: Journal,
    pub records: Arc<InMemoryRecordStore>,
}

impl TestApp {
    pub fn new() -> Self {
        let tokens = Arc::new(JwtIssuer::new(&JwtConfig {
            secret: "integration-test-secret-0123456789".to_string(),
            expiration_hours: 1,
        }));
        let record_store = Arc::new(InMemoryRecordStore::default());

        let users: Arc<dyn UserService> = Arc::new(UserManager::new(
            Arc::new(InMemoryUserStore::default()),
            tokens,
        ));
        let pets: Arc<dyn PetService> = Arc::new(PetManager::new(
            Arc::new(InMemoryPetStore::default()),
            users.clone(),
        ));
        let records: Arc<dyn RecordService> = Arc::new(RecordManager::new(
            record_store.clone(),
            pets.clone(),
            users.clone(),
        ));

        Self {
            journal: Journal::new(users, pets, records),
            records: record_store,
        }
    }

    pub async fn register(&self, user_type: &str, email: &str) -> Session {
        self.journal
            .create_user(registration(user_type, email, PASSWORD))
            .await
            .unwrap()
    }

    pub async fn owner(&self, email: &str) -> User {
        self.register("OWNER", email).await.user
    }

    pub async fn vet(&self, email: &str) -> User {
        self.register("VET", email).await.user
    }

    pub async fn pet(&self, owner: &User, vet: Option<&User>) -> Pet {
        self.journal
            .create_pet(pet_opts(owner.id, vet.map(|v| v.id)))
            .await
            .unwrap()
    }
}

pub fn registration(user_type: &str, email: &str, password: &str) -> CreateUser {
    CreateUser {
        user_type: user_type.to_string(),
        email: email.to_string(),
        password: password.to_string(),
        name: "Ana".to_string(),
        surname: "Lopez".to_string(),
        contact: Contact::default(),
    }
}

pub fn pet_opts(owner_id: Uuid, vet_id: Option<Uuid>) -> CreatePet {
    CreatePet {
        owner_id,
        vet_id,
        name: "Luna".to_string(),
        date_of_birth: Some(Utc::now() - Duration::days(400)),
        gender: "F".to_string(),
        breed_name: "Border Collie".to_string(),
        profile: PetProfile {
            colors: vec!["black".to_string(), "white".to_string()],
            ..Default::default()
        },
    }
}

pub fn record_opts(
    pet_id: Uuid,
    administered_by: Uuid,
    record_type: &str,
    date: DateTime<Utc>,
) -> CreateRecord {
    CreateRecord {
        pet_id,
        record_type: record_type.to_string(),
        name: "Rabies".to_string(),
        date: Some(date),
        details: RecordDetails {
            lot: Some("L-2024".to_string()),
            notes: Some("left shoulder".to_string()),
            ..Default::default()
        },
        administered_by,
        verified_by: None,
    }
}
