//! Service layer - business rules over the stores.

mod application;
mod pet_service;
mod record_service;
mod token;
mod user_service;

pub use application::{Application, Journal};
pub use pet_service::{PetManager, PetService};
pub use record_service::{RecordManager, RecordService};
pub use token::{Claims, JwtIssuer, TokenIssuer, TokenResponse};
pub use user_service::{Session, UserManager, UserService};

#[cfg(any(test, feature = "test-utils"))]
pub use application::MockApplication;
#[cfg(any(test, feature = "test-utils"))]
pub use pet_service::MockPetService;
#[cfg(any(test, feature = "test-utils"))]
pub use record_service::MockRecordService;
#[cfg(any(test, feature = "test-utils"))]
pub use token::MockTokenIssuer;
#[cfg(any(test, feature = "test-utils"))]
pub use user_service::MockUserService;
