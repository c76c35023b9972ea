use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::enums::Role;

/// A provisioned staff account. Immutable after creation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: Uuid,
    pub username: String,
    pub password_hash: String,
    pub role: Role,
}
