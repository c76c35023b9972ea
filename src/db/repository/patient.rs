use rusqlite::{params, Connection, OptionalExtension};
use uuid::Uuid;

use crate::db::DatabaseError;
use crate::models::Patient;

use super::parse_uuid;

pub fn insert_patient(conn: &Connection, patient: &Patient) -> Result<(), DatabaseError> {
    conn.execute(
        "INSERT INTO patients (id, name, file_number) VALUES (?1, ?2, ?3)",
        params![
            patient.id.to_string(),
            patient.name,
            patient.file_number,
        ],
    )?;
    Ok(())
}

/// Patient lookup is keyed solely by file number, never by name.
pub fn get_patient_by_file_number(
    conn: &Connection,
    file_number: &str,
) -> Result<Option<Patient>, DatabaseError> {
    let row = conn
        .query_row(
            "SELECT id, name, file_number FROM patients WHERE file_number = ?1",
            params![file_number],
            |row| {
                Ok((
                    row.get::<_, String>(0)?,
                    row.get::<_, String>(1)?,
                    row.get::<_, String>(2)?,
                ))
            },
        )
        .optional()?;

    row.map(|(id, name, file_number)| {
        Ok(Patient {
            id: parse_uuid(&id)?,
            name,
            file_number,
        })
    })
    .transpose()
}

pub fn get_patient(conn: &Connection, id: &Uuid) -> Result<Option<Patient>, DatabaseError> {
    let row = conn
        .query_row(
            "SELECT id, name, file_number FROM patients WHERE id = ?1",
            params![id.to_string()],
            |row| {
                Ok((
                    row.get::<_, String>(0)?,
                    row.get::<_, String>(1)?,
                    row.get::<_, String>(2)?,
                ))
            },
        )
        .optional()?;

    row.map(|(id, name, file_number)| {
        Ok(Patient {
            id: parse_uuid(&id)?,
            name,
            file_number,
        })
    })
    .transpose()
}
