use rusqlite::{params, Connection, OptionalExtension};
use uuid::Uuid;

use crate::db::DatabaseError;
use crate::models::Drug;

use super::parse_uuid;

pub fn insert_drug(conn: &Connection, drug: &Drug) -> Result<(), DatabaseError> {
    conn.execute(
        "INSERT INTO drugs (id, name, strength, instructions, warnings)
         VALUES (?1, ?2, ?3, ?4, ?5)",
        params![
            drug.id.to_string(),
            drug.name,
            drug.strength,
            drug.instructions,
            drug.warnings,
        ],
    )?;
    Ok(())
}

pub fn get_drug(conn: &Connection, id: &Uuid) -> Result<Option<Drug>, DatabaseError> {
    let row = conn
        .query_row(
            "SELECT id, name, strength, instructions, warnings FROM drugs WHERE id = ?1",
            params![id.to_string()],
            drug_row,
        )
        .optional()?;
    row.map(drug_from_row).transpose()
}

/// The whole catalog, in a stable order (name, then id as tiebreaker).
pub fn list_drugs(conn: &Connection) -> Result<Vec<Drug>, DatabaseError> {
    let mut stmt = conn.prepare(
        "SELECT id, name, strength, instructions, warnings FROM drugs ORDER BY name, id",
    )?;

    let rows = stmt.query_map([], |row| Ok(drug_row(row)))?;

    let mut drugs = Vec::new();
    for row in rows {
        drugs.push(drug_from_row(row??)?);
    }
    Ok(drugs)
}

type DrugRow = (String, String, String, String, String);

fn drug_row(row: &rusqlite::Row<'_>) -> Result<DrugRow, rusqlite::Error> {
    Ok((
        row.get(0)?,
        row.get(1)?,
        row.get(2)?,
        row.get(3)?,
        row.get(4)?,
    ))
}

fn drug_from_row((id, name, strength, instructions, warnings): DrugRow) -> Result<Drug, DatabaseError> {
    Ok(Drug {
        id: parse_uuid(&id)?,
        name,
        strength,
        instructions,
        warnings,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::open_memory_database;

    fn sample_drug(name: &str, strength: &str) -> Drug {
        Drug {
            id: Uuid::new_v4(),
            name: name.into(),
            strength: strength.into(),
            instructions: "Take one tablet daily".into(),
            warnings: "May cause drowsiness.".into(),
        }
    }

    #[test]
    fn insert_and_fetch() {
        let conn = open_memory_database().unwrap();
        let drug = sample_drug("Lisinopril", "10mg");
        insert_drug(&conn, &drug).unwrap();

        let fetched = get_drug(&conn, &drug.id).unwrap().unwrap();
        assert_eq!(fetched.name, "Lisinopril");
        assert_eq!(fetched.strength, "10mg");
    }

    #[test]
    fn unknown_id_yields_none() {
        let conn = open_memory_database().unwrap();
        assert!(get_drug(&conn, &Uuid::new_v4()).unwrap().is_none());
    }

    #[test]
    fn list_is_name_ordered() {
        let conn = open_memory_database().unwrap();
        insert_drug(&conn, &sample_drug("Metformin", "500mg")).unwrap();
        insert_drug(&conn, &sample_drug("Amoxicillin", "250mg")).unwrap();

        let names: Vec<String> = list_drugs(&conn).unwrap().into_iter().map(|d| d.name).collect();
        assert_eq!(names, vec!["Amoxicillin", "Metformin"]);
    }

    #[test]
    fn same_name_and_strength_twice_is_allowed() {
        let conn = open_memory_database().unwrap();
        insert_drug(&conn, &sample_drug("Amoxicillin", "250mg")).unwrap();
        // No uniqueness constraint on the catalog
        insert_drug(&conn, &sample_drug("Amoxicillin", "250mg")).unwrap();
        assert_eq!(list_drugs(&conn).unwrap().len(), 2);
    }
}
