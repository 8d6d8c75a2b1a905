//! Repository layer for data access.
//!
//! Stores are plain persistence: they never validate and never physically
//! delete. Every read takes `include_deleted`.

pub mod entities;
mod pet_repository;
mod record_repository;
mod user_repository;

pub use pet_repository::{PetRepository, PetStore};
pub use record_repository::{RecordRepository, RecordStore};
pub use user_repository::{UserRepository, UserStore};

#[cfg(any(test, feature = "test-utils"))]
pub use pet_repository::MockPetRepository;
#[cfg(any(test, feature = "test-utils"))]
pub use record_repository::MockRecordRepository;
#[cfg(any(test, feature = "test-utils"))]
pub use user_repository::MockUserRepository;
