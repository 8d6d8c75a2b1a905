//! Domain layer - Core business entities and value objects.
//!
//! This crate contains pure domain logic with no infrastructure dependencies.

pub mod constants;
pub mod error;
pub mod lifecycle;
pub mod password;
pub mod pet;
pub mod record;
pub mod user;
pub mod validation;

pub use constants::*;
pub use error::{DomainError, DomainResult, ErrorKind, PasswordError};
pub use lifecycle::{Lifecycle, SoftDelete};
pub use password::Password;
pub use pet::{
    CreatePet, Gender, NewPet, Pet, PetFields, PetProfile, PetRemoval, Relationship, UpdatePet,
};
pub use record::{
    Actors, CreateRecord, CreateRecords, NewRecord, Record, RecordDetails, RecordFields,
    RecordType, UpdateRecord,
};
pub use user::{Contact, CreateUser, Login, NewUser, UpdateUser, User, UserResponse, UserType};
