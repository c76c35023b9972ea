use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A catalog drug. Name/strength pairs are not unique — the catalog may
/// legitimately carry the same name at two strengths, or duplicates.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Drug {
    pub id: Uuid,
    pub name: String,
    pub strength: String,
    pub instructions: String,
    pub warnings: String,
}
