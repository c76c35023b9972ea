//! Repository layer — entity-scoped database operations.
//!
//! Free functions over an explicit `&Connection` handle. Multi-statement
//! writes are composed by the caller inside a `rusqlite` transaction, which
//! derefs to `Connection` and can be passed straight into these functions.

mod drug;
mod patient;
mod prescription;
mod user;

pub use drug::*;
pub use patient::*;
pub use prescription::*;
pub use user::*;

use uuid::Uuid;

use super::DatabaseError;

fn parse_uuid(s: &str) -> Result<Uuid, DatabaseError> {
    Uuid::parse_str(s).map_err(|e| DatabaseError::ConstraintViolation(e.to_string()))
}
