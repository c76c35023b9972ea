//! Prescription engine — creation, retrieval, status tracking and
//! dispensing labels.
//!
//! Creation resolves the prescribing doctor, finds-or-creates the patient by
//! file number, validates every referenced drug, then commits the
//! prescription and its ordered drug associations as one transaction. The
//! patient write is deliberately outside that transaction: a new patient is
//! durable before the prescription references it, and is not rolled back if
//! the prescription commit fails (patients are idempotently reusable by file
//! number — see DESIGN.md).

use chrono::{DateTime, NaiveDate, Utc};
use rusqlite::{params, Connection, OptionalExtension};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use crate::db::{is_unique_violation, repository, DatabaseError};
use crate::models::{Drug, Patient, Prescription, STATUS_PENDING};

#[derive(Error, Debug)]
pub enum PrescriptionError {
    #[error("Missing required field: {0}")]
    MissingField(&'static str),

    #[error("A prescription must reference at least one drug")]
    EmptyDrugList,

    #[error("Doctor {0} not found or not authorized to prescribe")]
    UnauthorizedDoctor(Uuid),

    #[error("Drug {0} not found")]
    DrugNotFound(Uuid),

    #[error("Prescription {0} not found")]
    NotFound(Uuid),

    #[error(transparent)]
    Database(#[from] DatabaseError),
}

// ═══════════════════════════════════════════
// View types — serialised to clients
// ═══════════════════════════════════════════

/// Input for creating a prescription.
#[derive(Debug, Clone, Deserialize)]
pub struct NewPrescription {
    pub patient_name: String,
    pub patient_file_number: String,
    pub doctor_id: Uuid,
    pub drug_ids: Vec<Uuid>,
}

/// What the creator gets back.
#[derive(Debug, Clone, Serialize)]
pub struct PrescriptionReceipt {
    pub id: Uuid,
    pub status: String,
    pub created_at: DateTime<Utc>,
}

/// Full prescription detail.
#[derive(Debug, Clone, Serialize)]
pub struct PrescriptionView {
    pub id: Uuid,
    pub patient: PatientSummary,
    pub doctor: DoctorSummary,
    pub status: String,
    pub created_at: DateTime<Utc>,
    pub drugs: Vec<Drug>,
}

#[derive(Debug, Clone, Serialize)]
pub struct PatientSummary {
    pub id: Uuid,
    pub name: String,
    pub file_number: String,
}

/// Doctor identity as exposed on a prescription — id and username only.
#[derive(Debug, Clone, Serialize)]
pub struct DoctorSummary {
    pub id: Uuid,
    pub username: String,
}

/// One dispensing label per associated drug. The date is the day the label
/// was generated, not the day the prescription was written.
#[derive(Debug, Clone, Serialize)]
pub struct DispenseLabel {
    pub patient_name: String,
    pub file_number: String,
    pub drug_name: String,
    pub strength: String,
    pub instructions: String,
    pub warnings: String,
    pub date: NaiveDate,
}

impl DispenseLabel {
    /// Render the label as the multi-line text handed to the printer.
    pub fn to_text(&self) -> String {
        format!(
            "Patient: {}\nFile number: {}\nDrug: {}\nStrength: {}\nInstructions: {}\nWarning: {}\nDate: {}",
            self.patient_name,
            self.file_number,
            self.drug_name,
            self.strength,
            self.instructions,
            self.warnings,
            self.date,
        )
    }
}

// ═══════════════════════════════════════════
// Engine operations
// ═══════════════════════════════════════════

/// Create a prescription.
///
/// Ordering matters and is observable: doctor check first, then patient
/// resolution, then drug validation (short-circuiting on the first missing
/// id), then the transactional prescription+association commit.
pub fn create_prescription(
    conn: &mut Connection,
    input: &NewPrescription,
) -> Result<PrescriptionReceipt, PrescriptionError> {
    if input.patient_name.is_empty() {
        return Err(PrescriptionError::MissingField("patient_name"));
    }
    if input.patient_file_number.is_empty() {
        return Err(PrescriptionError::MissingField("patient_file_number"));
    }
    if input.drug_ids.is_empty() {
        return Err(PrescriptionError::EmptyDrugList);
    }

    let doctor = repository::get_doctor(conn, &input.doctor_id)?
        .ok_or(PrescriptionError::UnauthorizedDoctor(input.doctor_id))?;

    let patient =
        find_or_create_patient(conn, &input.patient_name, &input.patient_file_number)?;

    for drug_id in &input.drug_ids {
        if repository::get_drug(conn, drug_id)?.is_none() {
            return Err(PrescriptionError::DrugNotFound(*drug_id));
        }
    }

    let prescription = Prescription {
        id: Uuid::new_v4(),
        patient_id: patient.id,
        doctor_id: doctor.id,
        status: STATUS_PENDING.into(),
        created_at: Utc::now(),
    };

    let tx = conn.transaction().map_err(DatabaseError::from)?;
    repository::insert_prescription(&tx, &prescription)?;
    for (position, drug_id) in input.drug_ids.iter().enumerate() {
        repository::add_prescription_drug(&tx, &prescription.id, drug_id, position as i64)?;
    }
    tx.commit().map_err(DatabaseError::from)?;

    tracing::info!(
        prescription_id = %prescription.id,
        file_number = %patient.file_number,
        drugs = input.drug_ids.len(),
        "prescription created"
    );

    Ok(PrescriptionReceipt {
        id: prescription.id,
        status: prescription.status,
        created_at: prescription.created_at,
    })
}

/// Full prescription detail, or `NotFound`.
pub fn fetch_prescription(
    conn: &Connection,
    id: &Uuid,
) -> Result<PrescriptionView, PrescriptionError> {
    let header = conn
        .query_row(
            "SELECT p.status, p.created_at,
                    pa.id, pa.name, pa.file_number,
                    u.id, u.username
             FROM prescriptions p
             JOIN patients pa ON p.patient_id = pa.id
             JOIN users u ON p.doctor_id = u.id
             WHERE p.id = ?1",
            params![id.to_string()],
            |row| {
                Ok((
                    row.get::<_, String>(0)?,
                    row.get::<_, String>(1)?,
                    row.get::<_, String>(2)?,
                    row.get::<_, String>(3)?,
                    row.get::<_, String>(4)?,
                    row.get::<_, String>(5)?,
                    row.get::<_, String>(6)?,
                ))
            },
        )
        .optional()
        .map_err(DatabaseError::from)?
        .ok_or(PrescriptionError::NotFound(*id))?;

    let (status, created_at, patient_id, patient_name, file_number, doctor_id, username) =
        header;
    let drugs = repository::get_prescription_drugs(conn, id)?;

    Ok(PrescriptionView {
        id: *id,
        patient: PatientSummary {
            id: parse_uuid(&patient_id)?,
            name: patient_name,
            file_number,
        },
        doctor: DoctorSummary {
            id: parse_uuid(&doctor_id)?,
            username,
        },
        status,
        created_at: parse_timestamp(&created_at)?,
        drugs,
    })
}

/// Overwrite a prescription's status and return the refreshed view.
///
/// Any non-empty string is accepted; there is no transition graph. Setting
/// the current status again is a no-op that still succeeds.
pub fn update_status(
    conn: &Connection,
    id: &Uuid,
    new_status: &str,
) -> Result<PrescriptionView, PrescriptionError> {
    if new_status.is_empty() {
        return Err(PrescriptionError::MissingField("status"));
    }

    if !repository::update_prescription_status(conn, id, new_status)? {
        return Err(PrescriptionError::NotFound(*id));
    }

    tracing::info!(prescription_id = %id, status = new_status, "prescription status updated");
    fetch_prescription(conn, id)
}

/// One dispensing label per associated drug, in association order, dated at
/// generation time.
pub fn generate_labels(
    conn: &Connection,
    id: &Uuid,
) -> Result<Vec<DispenseLabel>, PrescriptionError> {
    let view = fetch_prescription(conn, id)?;
    let today = Utc::now().date_naive();

    Ok(view
        .drugs
        .into_iter()
        .map(|drug| DispenseLabel {
            patient_name: view.patient.name.clone(),
            file_number: view.patient.file_number.clone(),
            drug_name: drug.name,
            strength: drug.strength,
            instructions: drug.instructions,
            warnings: drug.warnings,
            date: today,
        })
        .collect())
}

/// Find the patient by file number, creating them if unseen. The insert
/// commits on its own, before the caller's prescription transaction.
///
/// A UNIQUE violation on the insert means a concurrent request created the
/// same file number between our lookup and insert — re-fetch and reuse
/// their row instead of failing.
fn find_or_create_patient(
    conn: &Connection,
    name: &str,
    file_number: &str,
) -> Result<Patient, PrescriptionError> {
    if let Some(existing) = repository::get_patient_by_file_number(conn, file_number)? {
        return Ok(existing);
    }

    let patient = Patient {
        id: Uuid::new_v4(),
        name: name.to_string(),
        file_number: file_number.to_string(),
    };

    match repository::insert_patient(conn, &patient) {
        Ok(()) => {
            tracing::info!(file_number, "patient created");
            Ok(patient)
        }
        Err(DatabaseError::Sqlite(ref e)) if is_unique_violation(e) => {
            repository::get_patient_by_file_number(conn, file_number)?.ok_or_else(|| {
                DatabaseError::ConstraintViolation(format!(
                    "patient {file_number} vanished after unique violation"
                ))
                .into()
            })
        }
        Err(e) => Err(e.into()),
    }
}

fn parse_uuid(s: &str) -> Result<Uuid, PrescriptionError> {
    Uuid::parse_str(s)
        .map_err(|e| DatabaseError::ConstraintViolation(e.to_string()).into())
}

fn parse_timestamp(s: &str) -> Result<DateTime<Utc>, PrescriptionError> {
    DateTime::parse_from_rfc3339(s)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| DatabaseError::ConstraintViolation(e.to_string()).into())
}
