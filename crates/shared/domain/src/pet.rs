//! Pet domain entity.
//!
//! A pet has exactly one owner and at most one attending vet. Both count as
//! a relationship for visibility; only the owner may delete the pet.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{DomainError, DomainResult};
use crate::lifecycle::{Lifecycle, SoftDelete};
use crate::validation::require_text;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Gender {
    M,
    F,
}

impl Gender {
    /// Parse `M` or `F`, ignoring case and surrounding whitespace.
    pub fn parse(s: &str) -> DomainResult<Self> {
        match s.trim().to_uppercase().as_str() {
            "M" => Ok(Gender::M),
            "F" => Ok(Gender::F),
            _ => Err(DomainError::NoValidGender),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Gender::M => "M",
            Gender::F => "F",
        }
    }
}

impl std::fmt::Display for Gender {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How a user is related to a pet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Relationship {
    Owner,
    AttendingVet,
}

/// Outcome of a delete request, which depends on who asked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PetRemoval {
    /// The owner soft-deleted the pet
    Deleted,
    /// The attending vet withdrew; the pet stays live
    VetDetached,
}

/// Free-form descriptive fields
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PetProfile {
    #[serde(default)]
    pub colors: Vec<String>,
    pub description: Option<String>,
    pub pedigree: Option<String>,
    pub microchip: Option<String>,
    pub avatar: Option<String>,
    #[serde(default)]
    pub metas: BTreeMap<String, String>,
}

/// Pet domain entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Pet {
    pub id: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub lifecycle: Lifecycle,
    pub name: String,
    pub date_of_birth: DateTime<Utc>,
    pub gender: Gender,
    pub breed_name: String,
    #[serde(flatten)]
    pub profile: PetProfile,
    pub owner_id: Uuid,
    pub vet_id: Option<Uuid>,
}

impl Pet {
    /// Owner takes precedence when the same user is also the vet.
    pub fn relationship(&self, user_id: Uuid) -> Option<Relationship> {
        if self.owner_id == user_id {
            Some(Relationship::Owner)
        } else if self.vet_id == Some(user_id) {
            Some(Relationship::AttendingVet)
        } else {
            None
        }
    }

    /// Owner or attending vet.
    pub fn has_relationship(&self, user_id: Uuid) -> bool {
        self.relationship(user_id).is_some()
    }

    pub fn remove_vet(&mut self) {
        self.vet_id = None;
    }
}

impl SoftDelete for Pet {
    fn lifecycle(&self) -> Lifecycle {
        self.lifecycle
    }

    fn set_lifecycle(&mut self, lifecycle: Lifecycle) {
        self.lifecycle = lifecycle;
    }
}

/// Required pet fields after parsing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PetFields {
    pub name: String,
    pub date_of_birth: DateTime<Utc>,
    pub gender: Gender,
    pub breed_name: String,
}

impl PetFields {
    /// Checks in order: name, date of birth, gender, breed.
    pub fn parse(
        name: &str,
        date_of_birth: Option<DateTime<Utc>>,
        gender: &str,
        breed_name: &str,
    ) -> DomainResult<Self> {
        require_text(name, DomainError::NoValidPetName)?;
        let date_of_birth = date_of_birth.ok_or(DomainError::NoValidBirthDate)?;
        let gender = Gender::parse(gender)?;
        require_text(breed_name, DomainError::NoValidBreed)?;

        Ok(Self {
            name: name.trim().to_string(),
            date_of_birth,
            gender,
            breed_name: breed_name.trim().to_string(),
        })
    }
}

/// Validated pet ready to be stored.
#[derive(Debug, Clone)]
pub struct NewPet {
    pub fields: PetFields,
    pub profile: PetProfile,
    pub owner_id: Uuid,
    pub vet_id: Option<Uuid>,
}

/// Pet creation data
#[derive(Debug, Clone, Deserialize)]
pub struct CreatePet {
    pub owner_id: Uuid,
    pub vet_id: Option<Uuid>,
    pub name: String,
    pub date_of_birth: Option<DateTime<Utc>>,
    pub gender: String,
    pub breed_name: String,
    #[serde(flatten)]
    pub profile: PetProfile,
}

impl CreatePet {
    pub fn fields(&self) -> DomainResult<PetFields> {
        PetFields::parse(
            &self.name,
            self.date_of_birth,
            &self.gender,
            &self.breed_name,
        )
    }
}

/// Pet update issued by `user_id`, who must be related to the pet.
/// The owner is not part of the update.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdatePet {
    pub id: Uuid,
    pub user_id: Uuid,
    pub vet_id: Option<Uuid>,
    pub name: String,
    pub date_of_birth: Option<DateTime<Utc>>,
    pub gender: String,
    pub breed_name: String,
    #[serde(flatten)]
    pub profile: PetProfile,
}

impl UpdatePet {
    pub fn fields(&self) -> DomainResult<PetFields> {
        PetFields::parse(
            &self.name,
            self.date_of_birth,
            &self.gender,
            &self.breed_name,
        )
    }
}
