use chrono::{DateTime, Utc};
use rusqlite::{params, Connection, OptionalExtension};
use uuid::Uuid;

use crate::db::DatabaseError;
use crate::models::{Drug, Prescription};

use super::parse_uuid;

pub fn insert_prescription(
    conn: &Connection,
    prescription: &Prescription,
) -> Result<(), DatabaseError> {
    conn.execute(
        "INSERT INTO prescriptions (id, patient_id, doctor_id, status, created_at)
         VALUES (?1, ?2, ?3, ?4, ?5)",
        params![
            prescription.id.to_string(),
            prescription.patient_id.to_string(),
            prescription.doctor_id.to_string(),
            prescription.status,
            prescription.created_at.to_rfc3339(),
        ],
    )?;
    Ok(())
}

/// Link one drug to a prescription at the given position. Positions start
/// at 0 and preserve the prescriber's input order; the same drug may appear
/// at several positions.
pub fn add_prescription_drug(
    conn: &Connection,
    prescription_id: &Uuid,
    drug_id: &Uuid,
    position: i64,
) -> Result<(), DatabaseError> {
    conn.execute(
        "INSERT INTO prescription_drugs (prescription_id, drug_id, position)
         VALUES (?1, ?2, ?3)",
        params![prescription_id.to_string(), drug_id.to_string(), position],
    )?;
    Ok(())
}

pub fn get_prescription(
    conn: &Connection,
    id: &Uuid,
) -> Result<Option<Prescription>, DatabaseError> {
    let row = conn
        .query_row(
            "SELECT id, patient_id, doctor_id, status, created_at
             FROM prescriptions WHERE id = ?1",
            params![id.to_string()],
            |row| {
                Ok((
                    row.get::<_, String>(0)?,
                    row.get::<_, String>(1)?,
                    row.get::<_, String>(2)?,
                    row.get::<_, String>(3)?,
                    row.get::<_, String>(4)?,
                ))
            },
        )
        .optional()?;

    row.map(|(id, patient_id, doctor_id, status, created_at)| {
        Ok(Prescription {
            id: parse_uuid(&id)?,
            patient_id: parse_uuid(&patient_id)?,
            doctor_id: parse_uuid(&doctor_id)?,
            status,
            created_at: parse_timestamp(&created_at)?,
        })
    })
    .transpose()
}

/// Overwrite a prescription's status. Returns `false` when no row matched.
pub fn update_prescription_status(
    conn: &Connection,
    id: &Uuid,
    status: &str,
) -> Result<bool, DatabaseError> {
    let changed = conn.execute(
        "UPDATE prescriptions SET status = ?2 WHERE id = ?1",
        params![id.to_string(), status],
    )?;
    Ok(changed > 0)
}

/// Drug details for a prescription, in persisted association order.
pub fn get_prescription_drugs(
    conn: &Connection,
    prescription_id: &Uuid,
) -> Result<Vec<Drug>, DatabaseError> {
    let mut stmt = conn.prepare(
        "SELECT d.id, d.name, d.strength, d.instructions, d.warnings
         FROM prescription_drugs pd
         JOIN drugs d ON pd.drug_id = d.id
         WHERE pd.prescription_id = ?1
         ORDER BY pd.position",
    )?;

    let rows = stmt.query_map(params![prescription_id.to_string()], |row| {
        Ok((
            row.get::<_, String>(0)?,
            row.get::<_, String>(1)?,
            row.get::<_, String>(2)?,
            row.get::<_, String>(3)?,
            row.get::<_, String>(4)?,
        ))
    })?;

    let mut drugs = Vec::new();
    for row in rows {
        let (id, name, strength, instructions, warnings) = row?;
        drugs.push(Drug {
            id: parse_uuid(&id)?,
            name,
            strength,
            instructions,
            warnings,
        });
    }
    Ok(drugs)
}

fn parse_timestamp(s: &str) -> Result<DateTime<Utc>, DatabaseError> {
    DateTime::parse_from_rfc3339(s)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| DatabaseError::ConstraintViolation(e.to_string()))
}
