use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Status a prescription starts in.
pub const STATUS_PENDING: &str = "pending";

/// A prescription header row. Status is deliberately an open string —
/// "pending", "preparing", "ready" and "dispensed" are the well-known
/// stages, but any non-empty value is stored as-is (see DESIGN.md).
/// The associated drugs live in the ordered `prescription_drugs` table.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Prescription {
    pub id: Uuid,
    pub patient_id: Uuid,
    pub doctor_id: Uuid,
    pub status: String,
    pub created_at: DateTime<Utc>,
}
