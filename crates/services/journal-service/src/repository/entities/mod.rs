//! SeaORM entities.

pub mod pet;
pub mod record;
pub mod user;
