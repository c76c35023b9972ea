use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A patient, keyed by their unique file number. Created lazily the first
/// time a prescription references an unseen file number; the stored name is
/// never updated afterwards, even if later requests spell it differently.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Patient {
    pub id: Uuid,
    pub name: String,
    pub file_number: String,
}
