//! Medical record domain entity.
//!
//! Validation depends on the record type: measurements carry a `result`,
//! everything else carries a `name`. A record dated in the future is a
//! scheduled event and never carries actor references.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{DomainError, DomainResult};
use crate::lifecycle::{Lifecycle, SoftDelete};
use crate::validation::{require_some_text, require_text};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecordType {
    Vaccine,
    Weight,
    Temperature,
    Nutering,
    Surgery,
    Medicine,
    Endoparasite,
    Ectoparasite,
    Examination,
    Microchip,
    Diagnostic,
    Dental,
    Other,
}

impl RecordType {
    pub const ALL: [RecordType; 13] = [
        RecordType::Vaccine,
        RecordType::Weight,
        RecordType::Temperature,
        RecordType::Nutering,
        RecordType::Surgery,
        RecordType::Medicine,
        RecordType::Endoparasite,
        RecordType::Ectoparasite,
        RecordType::Examination,
        RecordType::Microchip,
        RecordType::Diagnostic,
        RecordType::Dental,
        RecordType::Other,
    ];

    /// Parse a lower-case type name, ignoring case and surrounding whitespace.
    pub fn parse(s: &str) -> DomainResult<Self> {
        let wanted = s.trim().to_lowercase();
        Self::ALL
            .into_iter()
            .find(|t| t.as_str() == wanted)
            .ok_or(DomainError::NotValidRecordType)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            RecordType::Vaccine => "vaccine",
            RecordType::Weight => "weight",
            RecordType::Temperature => "temperature",
            RecordType::Nutering => "nutering",
            RecordType::Surgery => "surgery",
            RecordType::Medicine => "medicine",
            RecordType::Endoparasite => "endoparasite",
            RecordType::Ectoparasite => "ectoparasite",
            RecordType::Examination => "examination",
            RecordType::Microchip => "microchip",
            RecordType::Diagnostic => "diagnostic",
            RecordType::Dental => "dental",
            RecordType::Other => "other",
        }
    }

    /// Weight and temperature: a `result` is required, a `name` is not.
    pub fn is_measurement(&self) -> bool {
        matches!(self, RecordType::Weight | RecordType::Temperature)
    }
}

impl std::fmt::Display for RecordType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Optional descriptive fields
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordDetails {
    pub lot: Option<String>,
    pub result: Option<String>,
    pub description: Option<String>,
    pub notes: Option<String>,
}

/// Who administered and who verified a record.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Actors {
    pub administered_by: Option<Uuid>,
    pub verified_by: Option<Uuid>,
}

impl Actors {
    /// Drop both actors when `date` is after `now`.
    pub fn for_date(self, date: DateTime<Utc>, now: DateTime<Utc>) -> Self {
        if is_scheduled(date, now) {
            Actors::default()
        } else {
            self
        }
    }
}

/// A date strictly after `now` describes something that has not happened yet.
pub fn is_scheduled(date: DateTime<Utc>, now: DateTime<Utc>) -> bool {
    date > now
}

/// Medical record domain entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Record {
    pub id: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub lifecycle: Lifecycle,
    pub pet_id: Uuid,
    pub record_type: RecordType,
    pub name: String,
    pub date: DateTime<Utc>,
    #[serde(flatten)]
    pub details: RecordDetails,
    #[serde(flatten)]
    pub actors: Actors,
    pub group_id: Option<Uuid>,
}

impl Record {
    /// Replace the mutable fields from an update.
    ///
    /// An existing administrator is kept; the verifier is replaced. A date in
    /// the future clears both.
    pub fn apply_update(&mut self, update: &UpdateRecord, fields: RecordFields, now: DateTime<Utc>) {
        self.record_type = fields.record_type;
        self.name = fields.name;
        self.date = fields.date;
        self.details = update.details.clone();
        self.actors = Actors {
            administered_by: self.actors.administered_by.or(update.administered_by),
            verified_by: update.verified_by,
        }
        .for_date(self.date, now);
    }
}

impl SoftDelete for Record {
    fn lifecycle(&self) -> Lifecycle {
        self.lifecycle
    }

    fn set_lifecycle(&mut self, lifecycle: Lifecycle) {
        self.lifecycle = lifecycle;
    }
}

/// Type-checked core of a record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordFields {
    pub record_type: RecordType,
    pub name: String,
    pub date: DateTime<Utc>,
}

impl RecordFields {
    /// Validate in order: type, then `result` and no future date for
    /// measurements or `name` for everything else, then date present.
    pub fn parse(
        record_type: &str,
        name: &str,
        date: Option<DateTime<Utc>>,
        result: Option<&str>,
        now: DateTime<Utc>,
    ) -> DomainResult<Self> {
        let record_type = RecordType::parse(record_type)?;

        if record_type.is_measurement() {
            require_some_text(result, DomainError::NotValidResult)?;
            if date.is_some_and(|d| is_scheduled(d, now)) {
                return Err(DomainError::NotValidDate);
            }
        } else {
            require_text(name, DomainError::NotValidRecordName)?;
        }

        let date = date.ok_or(DomainError::NotValidDate)?;

        Ok(Self {
            record_type,
            name: name.trim().to_string(),
            date,
        })
    }
}

/// Validated record ready to be stored; the store assigns id, timestamps
/// and, for batches, the group id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewRecord {
    pub pet_id: Uuid,
    pub record_type: RecordType,
    pub name: String,
    pub date: DateTime<Utc>,
    pub details: RecordDetails,
    pub actors: Actors,
}

impl NewRecord {
    /// Build from a create request, dropping actors for a scheduled date.
    pub fn from_create(opts: &CreateRecord, fields: RecordFields, now: DateTime<Utc>) -> Self {
        let actors = Actors {
            administered_by: Some(opts.administered_by),
            verified_by: opts.verified_by,
        }
        .for_date(fields.date, now);

        Self {
            pet_id: opts.pet_id,
            record_type: fields.record_type,
            name: fields.name,
            date: fields.date,
            details: opts.details.clone(),
            actors,
        }
    }

    /// Bare placeholder for the next expected occurrence.
    pub fn next_occurrence(&self, next_date: DateTime<Utc>) -> Self {
        Self {
            pet_id: self.pet_id,
            record_type: self.record_type,
            name: self.name.clone(),
            date: next_date,
            details: RecordDetails::default(),
            actors: Actors::default(),
        }
    }
}

/// Record creation by `administered_by`, who must be related to the pet.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateRecord {
    pub pet_id: Uuid,
    pub record_type: String,
    #[serde(default)]
    pub name: String,
    pub date: Option<DateTime<Utc>>,
    #[serde(flatten)]
    pub details: RecordDetails,
    pub administered_by: Uuid,
    pub verified_by: Option<Uuid>,
}

impl CreateRecord {
    pub fn fields(&self, now: DateTime<Utc>) -> DomainResult<RecordFields> {
        RecordFields::parse(
            &self.record_type,
            &self.name,
            self.date,
            self.details.result.as_deref(),
            now,
        )
    }
}

/// A record plus the date of its next occurrence.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateRecords {
    #[serde(flatten)]
    pub record: CreateRecord,
    pub next_date: Option<DateTime<Utc>>,
}

/// Record update issued by `user_id`. The pet is immutable.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateRecord {
    pub id: Uuid,
    pub user_id: Uuid,
    pub record_type: String,
    #[serde(default)]
    pub name: String,
    pub date: Option<DateTime<Utc>>,
    #[serde(flatten)]
    pub details: RecordDetails,
    pub administered_by: Option<Uuid>,
    pub verified_by: Option<Uuid>,
}

impl UpdateRecord {
    pub fn fields(&self, now: DateTime<Utc>) -> DomainResult<RecordFields> {
        RecordFields::parse(
            &self.record_type,
            &self.name,
            self.date,
            self.details.result.as_deref(),
            now,
        )
    }
}

#[cfg(test)]
mod tests {
    use chrono::Duration;

    use super::*;

    fn create_opts(record_type: &str, date: DateTime<Utc>) -> CreateRecord {
        CreateRecord {
            pet_id: Uuid::new_v4(),
            record_type: record_type.to_string(),
            name: "Rabies".to_string(),
            date: Some(date),
            details: RecordDetails {
                lot: Some("L-77".to_string()),
                ..Default::default()
            },
            administered_by: Uuid::new_v4(),
            verified_by: Some(Uuid::new_v4()),
        }
    }

    #[test]
    fn test_record_type_parse() {
        assert_eq!(RecordType::parse(" Vaccine ").unwrap(), RecordType::Vaccine);
        assert_eq!(RecordType::parse("nutering").unwrap(), RecordType::Nutering);
        assert_eq!(
            RecordType::parse("grooming"),
            Err(DomainError::NotValidRecordType)
        );
        for t in RecordType::ALL {
            assert_eq!(RecordType::parse(t.as_str()).unwrap(), t);
        }
    }

    #[test]
    fn test_measurement_requires_result_not_name() {
        let now = Utc::now();
        assert_eq!(
            RecordFields::parse("weight", "", Some(now), None, now),
            Err(DomainError::NotValidResult)
        );
        assert!(RecordFields::parse("weight", "", Some(now), Some("12kg"), now).is_ok());
    }

    #[test]
    fn test_other_types_require_name_not_result() {
        let now = Utc::now();
        assert_eq!(
            RecordFields::parse("examination", " ", Some(now), Some("ok"), now),
            Err(DomainError::NotValidRecordName)
        );
        assert!(RecordFields::parse("examination", "Checkup", Some(now), None, now).is_ok());
    }

    #[test]
    fn test_date_is_required() {
        let now = Utc::now();
        assert_eq!(
            RecordFields::parse("vaccine", "Rabies", None, None, now),
            Err(DomainError::NotValidDate)
        );
    }

    #[test]
    fn test_future_measurement_rejected() {
        let now = Utc::now();
        assert_eq!(
            RecordFields::parse("temperature", "", Some(now + Duration::hours(1)), Some("38.5"), now),
            Err(DomainError::NotValidDate)
        );
    }

    #[test]
    fn test_future_record_drops_actors() {
        let now = Utc::now();
        let opts = create_opts("vaccine", now + Duration::hours(1));
        let record = NewRecord::from_create(&opts, opts.fields(now).unwrap(), now);
        assert_eq!(record.actors, Actors::default());
    }

    #[test]
    fn test_present_record_keeps_actors() {
        let now = Utc::now();
        let opts = create_opts("vaccine", now);
        let record = NewRecord::from_create(&opts, opts.fields(now).unwrap(), now);
        assert_eq!(record.actors.administered_by, Some(opts.administered_by));
        assert_eq!(record.actors.verified_by, opts.verified_by);
    }

    #[test]
    fn test_next_occurrence_is_bare() {
        let now = Utc::now();
        let opts = create_opts("vaccine", now);
        let current = NewRecord::from_create(&opts, opts.fields(now).unwrap(), now);
        let next = current.next_occurrence(now + Duration::days(365));

        assert_eq!(next.pet_id, current.pet_id);
        assert_eq!(next.record_type, current.record_type);
        assert_eq!(next.name, current.name);
        assert_eq!(next.details, RecordDetails::default());
        assert_eq!(next.actors, Actors::default());
    }

    #[test]
    fn test_apply_update_keeps_administrator() {
        let now = Utc::now();
        let original_admin = Uuid::new_v4();
        let mut record = Record {
            id: Uuid::new_v4(),
            created_at: now,
            updated_at: now,
            lifecycle: Lifecycle::Active,
            pet_id: Uuid::new_v4(),
            record_type: RecordType::Vaccine,
            name: "Rabies".to_string(),
            date: now,
            details: RecordDetails::default(),
            actors: Actors {
                administered_by: Some(original_admin),
                verified_by: None,
            },
            group_id: None,
        };
        let verifier = Uuid::new_v4();
        let update = UpdateRecord {
            id: record.id,
            user_id: original_admin,
            record_type: "vaccine".to_string(),
            name: "Rabies booster".to_string(),
            date: Some(now),
            details: RecordDetails::default(),
            administered_by: None,
            verified_by: Some(verifier),
        };

        record.apply_update(&update, update.fields(now).unwrap(), now);
        assert_eq!(record.name, "Rabies booster");
        assert_eq!(record.actors.administered_by, Some(original_admin));
        assert_eq!(record.actors.verified_by, Some(verifier));

        let rescheduled = UpdateRecord {
            date: Some(now + Duration::days(2)),
            ..update
        };
        record.apply_update(&rescheduled, rescheduled.fields(now).unwrap(), now);
        assert_eq!(record.actors, Actors::default());
    }
}
