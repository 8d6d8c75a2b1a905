//! Record service - type-dependent validation, the future-date actor rule
//! and the current plus next occurrence batch.
//!
//! Reads filter by pet only. Callers resolve the pet through
//! [`PetService::pet_by_user`] first.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use uuid::Uuid;

use common::{AppError, AppResult, OptionExt};
use domain::{
    CreateRecord, CreateRecords, DomainError, NewRecord, Record, SoftDelete, UpdateRecord,
    UserType,
};

use super::pet_service::PetService;
use super::user_service::UserService;
use crate::repository::RecordRepository;

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Record service trait for dependency injection.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait RecordService: Send + Sync {
    async fn pets_records(&self, pet_ids: Vec<Uuid>, include_deleted: bool)
        -> AppResult<Vec<Record>>;

    async fn pet_records(&self, pet_id: Uuid, include_deleted: bool) -> AppResult<Vec<Record>>;

    async fn pet_record(&self, pet_id: Uuid, id: Uuid, include_deleted: bool)
        -> AppResult<Record>;

    async fn create_record(&self, opts: CreateRecord) -> AppResult<Record>;

    /// The record and a bare placeholder at `next_date`, sharing a group id.
    async fn create_records(&self, opts: CreateRecords) -> AppResult<Vec<Record>>;

    async fn update_record(&self, opts: UpdateRecord) -> AppResult<Record>;

    /// Soft delete a record of a pet visible to the user.
    async fn delete_record(&self, user_id: Uuid, pet_id: Uuid, id: Uuid) -> AppResult<Record>;
}

/// Concrete implementation of RecordService using repository.
pub struct RecordManager {
    repo: Arc<dyn RecordRepository>,
    pets: Arc<dyn PetService>,
    users: Arc<dyn UserService>,
}

impl RecordManager {
    pub fn new(
        repo: Arc<dyn RecordRepository>,
        pets: Arc<dyn PetService>,
        users: Arc<dyn UserService>,
    ) -> Self {
        Self { repo, pets, users }
    }

    /// A verifier must be a vet; anything else is `NotValidVerifier`.
    async fn check_verifier(&self, verified_by: Option<Uuid>) -> AppResult<()> {
        let Some(id) = verified_by else {
            return Ok(());
        };

        match self.users.user_by_type(id, UserType::Vet, true).await {
            Ok(_) => Ok(()),
            Err(e) if e.is_domain(&DomainError::UserNotFound) => {
                Err(DomainError::NotValidVerifier.into())
            }
            Err(e) => Err(e),
        }
    }

    /// Relationship to the pet, then verifier, then the record fields.
    async fn prepare(&self, opts: &CreateRecord) -> AppResult<NewRecord> {
        self.pets
            .pet_by_user(opts.administered_by, opts.pet_id, false)
            .await?;
        self.check_verifier(opts.verified_by).await?;

        let now = Utc::now();
        let fields = opts.fields(now)?;
        Ok(NewRecord::from_create(opts, fields, now))
    }
}

#[async_trait]
impl RecordService for RecordManager {
    async fn pets_records(
        &self,
        pet_ids: Vec<Uuid>,
        include_deleted: bool,
    ) -> AppResult<Vec<Record>> {
        self.repo.list_by_pets(pet_ids, include_deleted).await
    }

    async fn pet_records(&self, pet_id: Uuid, include_deleted: bool) -> AppResult<Vec<Record>> {
        self.repo.list_by_pets(vec![pet_id], include_deleted).await
    }

    async fn pet_record(
        &self,
        pet_id: Uuid,
        id: Uuid,
        include_deleted: bool,
    ) -> AppResult<Record> {
        self.repo
            .find_by_id(id, include_deleted)
            .await?
            .filter(|record| record.pet_id == pet_id)
            .or_not_found(DomainError::RecordNotFound)
    }

    async fn create_record(&self, opts: CreateRecord) -> AppResult<Record> {
        let new_record = self.prepare(&opts).await?;

        let record = self.repo.create(new_record).await?;
        tracing::info!(record_id = %record.id, pet_id = %record.pet_id, "Record created");
        Ok(record)
    }

    async fn create_records(&self, opts: CreateRecords) -> AppResult<Vec<Record>> {
        let current = self.prepare(&opts.record).await?;
        let next_date = opts.next_date.ok_or(DomainError::NotValidDate)?;
        let next = current.next_occurrence(next_date);

        let records = self.repo.create_group(vec![current, next]).await?;
        tracing::info!(
            pet_id = %opts.record.pet_id,
            group_id = ?records.first().and_then(|r| r.group_id),
            "Record group created"
        );
        Ok(records)
    }

    async fn update_record(&self, opts: UpdateRecord) -> AppResult<Record> {
        let mut record = self
            .repo
            .find_by_id(opts.id, false)
            .await?
            .or_not_found(DomainError::RecordNotFound)?;

        self.pets
            .pet_by_user(opts.user_id, record.pet_id, false)
            .await
            .map_err(|e| {
                if e.is_domain(&DomainError::PetNotFound) {
                    AppError::from(DomainError::RecordNotFound)
                } else {
                    e
                }
            })?;
        self.check_verifier(opts.verified_by).await?;

        let now = Utc::now();
        let fields = opts.fields(now)?;
        record.apply_update(&opts, fields, now);

        self.repo.update(record).await
    }

    async fn delete_record(&self, user_id: Uuid, pet_id: Uuid, id: Uuid) -> AppResult<Record> {
        self.pets.pet_by_user(user_id, pet_id, false).await?;
        let mut record = self.pet_record(pet_id, id, false).await?;
        record.soft_delete();

        let record = self.repo.update(record).await?;
        tracing::info!(record_id = %record.id, %user_id, "Record soft deleted");
        Ok(record)
    }
}

#[cfg(test)]
mod tests {
    use chrono::{DateTime, Duration};
    use mockall::predicate::eq;

    use domain::{
        Actors, Contact, Gender, Lifecycle, Pet, PetProfile, RecordDetails, RecordType, User,
    };

    use super::*;
    use crate::repository::MockRecordRepository;
    use crate::service::pet_service::MockPetService;
    use crate::service::user_service::MockUserService;

    fn test_pet(id: Uuid, owner_id: Uuid) -> Pet {
        Pet {
            id,
            created_at: Utc::now(),
            updated_at: Utc::now(),
            lifecycle: Lifecycle::Active,
            name: "Rex".to_string(),
            date_of_birth: Utc::now(),
            gender: Gender::M,
            breed_name: "Beagle".to_string(),
            profile: PetProfile::default(),
            owner_id,
            vet_id: None,
        }
    }

    fn test_user(id: Uuid, user_type: UserType) -> User {
        User {
            id,
            created_at: Utc::now(),
            updated_at: Utc::now(),
            lifecycle: Lifecycle::Active,
            user_type,
            email: "user@example.com".to_string(),
            password_hash: "hashed".to_string(),
            name: "Test".to_string(),
            surname: "User".to_string(),
            contact: Contact::default(),
        }
    }

    fn stored(new: NewRecord, group_id: Option<Uuid>) -> Record {
        Record {
            id: Uuid::new_v4(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
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

    fn create_opts(
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
                lot: Some("L-1".to_string()),
                ..Default::default()
            },
            administered_by,
            verified_by: None,
        }
    }

    fn pets_allowing(owner_id: Uuid) -> MockPetService {
        let mut pets = MockPetService::new();
        pets.expect_pet_by_user().returning(move |user_id, id, _| {
            if user_id == owner_id {
                Ok(test_pet(id, owner_id))
            } else {
                Err(DomainError::PetNotFound.into())
            }
        });
        pets
    }

    fn manager(
        repo: MockRecordRepository,
        pets: MockPetService,
        users: MockUserService,
    ) -> RecordManager {
        RecordManager::new(Arc::new(repo), Arc::new(pets), Arc::new(users))
    }

    #[tokio::test]
    async fn test_create_record_requires_relationship() {
        let owner_id = Uuid::new_v4();
        let mut repo = MockRecordRepository::new();
        repo.expect_create().never();

        let err = manager(repo, pets_allowing(owner_id), MockUserService::new())
            .create_record(create_opts(Uuid::new_v4(), Uuid::new_v4(), "vaccine", Utc::now()))
            .await
            .unwrap_err();

        assert!(err.is_domain(&DomainError::PetNotFound));
    }

    #[tokio::test]
    async fn test_owner_as_verifier_rejected() {
        let owner_id = Uuid::new_v4();
        let mut users = MockUserService::new();
        users
            .expect_user_by_type()
            .with(eq(owner_id), eq(UserType::Vet), eq(true))
            .returning(|_, _, _| Err(DomainError::UserNotFound.into()));

        let mut opts = create_opts(Uuid::new_v4(), owner_id, "vaccine", Utc::now());
        opts.verified_by = Some(owner_id);

        let err = manager(MockRecordRepository::new(), pets_allowing(owner_id), users)
            .create_record(opts)
            .await
            .unwrap_err();

        assert!(err.is_domain(&DomainError::NotValidVerifier));
    }

    #[tokio::test]
    async fn test_future_record_stored_without_actors() {
        let owner_id = Uuid::new_v4();
        let vet_id = Uuid::new_v4();
        let mut users = MockUserService::new();
        users
            .expect_user_by_type()
            .returning(|id, t, _| Ok(test_user(id, t)));

        let mut repo = MockRecordRepository::new();
        repo.expect_create()
            .withf(|new| new.actors == Actors::default())
            .returning(|new| Ok(stored(new, None)));

        let mut opts = create_opts(
            Uuid::new_v4(),
            owner_id,
            "vaccine",
            Utc::now() + Duration::hours(1),
        );
        opts.verified_by = Some(vet_id);

        let record = manager(repo, pets_allowing(owner_id), users)
            .create_record(opts)
            .await
            .unwrap();

        assert!(record.actors.administered_by.is_none());
        assert!(record.actors.verified_by.is_none());
    }

    #[tokio::test]
    async fn test_create_records_needs_next_date() {
        let owner_id = Uuid::new_v4();
        let mut repo = MockRecordRepository::new();
        repo.expect_create_group().never();

        let err = manager(repo, pets_allowing(owner_id), MockUserService::new())
            .create_records(CreateRecords {
                record: create_opts(Uuid::new_v4(), owner_id, "vaccine", Utc::now()),
                next_date: None,
            })
            .await
            .unwrap_err();

        assert!(err.is_domain(&DomainError::NotValidDate));
    }

    #[tokio::test]
    async fn test_create_records_pairs_current_and_next() {
        let owner_id = Uuid::new_v4();
        let next_date = Utc::now() + Duration::days(365);
        let mut repo = MockRecordRepository::new();
        repo.expect_create_group()
            .withf(move |batch| {
                batch.len() == 2
                    && batch[0].actors.administered_by.is_some()
                    && batch[1].date == next_date
                    && batch[1].actors == Actors::default()
                    && batch[1].details == RecordDetails::default()
            })
            .returning(|batch| {
                let group_id = Some(Uuid::new_v4());
                Ok(batch.into_iter().map(|r| stored(r, group_id)).collect())
            });

        let records = manager(repo, pets_allowing(owner_id), MockUserService::new())
            .create_records(CreateRecords {
                record: create_opts(Uuid::new_v4(), owner_id, "vaccine", Utc::now()),
                next_date: Some(next_date),
            })
            .await
            .unwrap();

        assert_eq!(records.len(), 2);
        assert_eq!(records[0].group_id, records[1].group_id);
    }

    #[tokio::test]
    async fn test_update_record_by_stranger_not_found() {
        let owner_id = Uuid::new_v4();
        let record_id = Uuid::new_v4();
        let mut repo = MockRecordRepository::new();
        repo.expect_find_by_id()
            .with(eq(record_id), eq(false))
            .returning(|id, _| {
                let new = NewRecord {
                    pet_id: Uuid::new_v4(),
                    record_type: RecordType::Vaccine,
                    name: "Rabies".to_string(),
                    date: Utc::now(),
                    details: RecordDetails::default(),
                    actors: Actors::default(),
                };
                let mut record = stored(new, None);
                record.id = id;
                Ok(Some(record))
            });
        repo.expect_update().never();

        let err = manager(repo, pets_allowing(owner_id), MockUserService::new())
            .update_record(UpdateRecord {
                id: record_id,
                user_id: Uuid::new_v4(),
                record_type: "vaccine".to_string(),
                name: "Rabies".to_string(),
                date: Some(Utc::now()),
                details: RecordDetails::default(),
                administered_by: None,
                verified_by: None,
            })
            .await
            .unwrap_err();

        assert!(err.is_domain(&DomainError::RecordNotFound));
    }

    #[tokio::test]
    async fn test_pet_record_must_belong_to_pet() {
        let mut repo = MockRecordRepository::new();
        repo.expect_find_by_id().returning(|_, _| {
            Ok(Some(stored(
                NewRecord {
                    pet_id: Uuid::new_v4(),
                    record_type: RecordType::Weight,
                    name: String::new(),
                    date: Utc::now(),
                    details: RecordDetails::default(),
                    actors: Actors::default(),
                },
                None,
            )))
        });

        let err = manager(repo, MockPetService::new(), MockUserService::new())
            .pet_record(Uuid::new_v4(), Uuid::new_v4(), false)
            .await
            .unwrap_err();

        assert!(err.is_domain(&DomainError::RecordNotFound));
    }
}
