//! Domain-level errors.
//!
//! Every business rule violation has its own variant so callers can tell
//! them apart without string matching. They are independent of
//! infrastructure concerns (HTTP, database).

use thiserror::Error;

/// Password policy violations, one per missing character class.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum PasswordError {
    #[error("password should be at least 8 characters long")]
    Length,

    #[error("password should contain at least one lower case character")]
    LowerCase,

    #[error("password should contain at least one upper case character")]
    UpperCase,

    #[error("password should contain at least one digit")]
    Digit,

    #[error("password should contain at least one special character")]
    SpecialChar,
}

/// Broad classification used by transports to pick a response status.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Id did not resolve, or resolved outside the caller's relationships
    NotFound,
    /// Caller-supplied data violates an invariant
    Validation,
    /// Input conflicts with existing data
    Conflict,
    /// Entity is in a state that forbids the operation
    State,
    /// Credentials did not match
    Credentials,
    /// Anything unclassified
    Internal,
}

/// Domain-specific errors for business rule violations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    // Users
    #[error("user not found")]
    UserNotFound,

    #[error("mail in use")]
    MailExists,

    #[error("a valid mail should be provided")]
    NoValidMail,

    #[error("a valid name should be provided")]
    NoValidName,

    #[error("a valid surname should be provided")]
    NoValidSurname,

    #[error("a valid userType should be provided")]
    NoValidType,

    #[error("wrong credentials")]
    Authentication,

    #[error("user has been deleted")]
    UserDeleted,

    #[error(transparent)]
    Password(#[from] PasswordError),

    // Pets
    #[error("pet not found")]
    PetNotFound,

    #[error("a valid pet name should be provided")]
    NoValidPetName,

    #[error("a valid breed should be provided")]
    NoValidBreed,

    #[error("a valid birthdate should be provided")]
    NoValidBirthDate,

    #[error("a valid gender should be provided")]
    NoValidGender,

    // Records
    #[error("record not found")]
    RecordNotFound,

    #[error("record name not valid")]
    NotValidRecordName,

    #[error("record result not valid")]
    NotValidResult,

    #[error("record date not valid")]
    NotValidDate,

    #[error("record type not valid")]
    NotValidRecordType,

    #[error("record cannot be validated by this user")]
    NotValidVerifier,

    /// Internal domain error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl DomainError {
    /// Create an internal error
    pub fn internal(msg: impl Into<String>) -> Self {
        DomainError::Internal(msg.into())
    }

    /// Classify the error for transport mapping.
    pub fn kind(&self) -> ErrorKind {
        match self {
            DomainError::UserNotFound | DomainError::PetNotFound | DomainError::RecordNotFound => {
                ErrorKind::NotFound
            }
            DomainError::MailExists => ErrorKind::Conflict,
            DomainError::UserDeleted => ErrorKind::State,
            DomainError::Authentication => ErrorKind::Credentials,
            DomainError::Internal(_) => ErrorKind::Internal,
            DomainError::NoValidMail
            | DomainError::NoValidName
            | DomainError::NoValidSurname
            | DomainError::NoValidType
            | DomainError::Password(_)
            | DomainError::NoValidPetName
            | DomainError::NoValidBreed
            | DomainError::NoValidBirthDate
            | DomainError::NoValidGender
            | DomainError::NotValidRecordName
            | DomainError::NotValidResult
            | DomainError::NotValidDate
            | DomainError::NotValidRecordType
            | DomainError::NotValidVerifier => ErrorKind::Validation,
        }
    }

    /// True for any of the not-found sentinels
    pub fn is_not_found(&self) -> bool {
        self.kind() == ErrorKind::NotFound
    }
}

/// Result type alias for domain operations
pub type DomainResult<T> = Result<T, DomainError>;
