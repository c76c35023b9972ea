//! Drug catalog — the shared list of prescribable drugs.
//!
//! Catalog entries are created administratively and never deleted. There is
//! no uniqueness rule: the same name/strength pair may appear twice, which
//! is why prescriptions reference drugs by id.

use rusqlite::Connection;
use serde::Deserialize;
use thiserror::Error;
use uuid::Uuid;

use crate::db::{repository, DatabaseError};
use crate::models::Drug;

#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("Missing required field: {0}")]
    MissingField(&'static str),

    #[error(transparent)]
    Database(#[from] DatabaseError),
}

/// Input for a new catalog entry. All four fields are required.
#[derive(Debug, Clone, Deserialize)]
pub struct NewDrug {
    pub name: String,
    pub strength: String,
    pub instructions: String,
    pub warnings: String,
}

/// Add a drug to the catalog and return the stored record.
pub fn add_drug(conn: &Connection, input: &NewDrug) -> Result<Drug, CatalogError> {
    if input.name.is_empty() {
        return Err(CatalogError::MissingField("name"));
    }
    if input.strength.is_empty() {
        return Err(CatalogError::MissingField("strength"));
    }
    if input.instructions.is_empty() {
        return Err(CatalogError::MissingField("instructions"));
    }
    if input.warnings.is_empty() {
        return Err(CatalogError::MissingField("warnings"));
    }

    let drug = Drug {
        id: Uuid::new_v4(),
        name: input.name.clone(),
        strength: input.strength.clone(),
        instructions: input.instructions.clone(),
        warnings: input.warnings.clone(),
    };
    repository::insert_drug(conn, &drug)?;

    tracing::info!(drug_id = %drug.id, name = %drug.name, "drug added to catalog");
    Ok(drug)
}

/// The whole catalog in stable listing order.
pub fn list_drugs(conn: &Connection) -> Result<Vec<Drug>, CatalogError> {
    Ok(repository::list_drugs(conn)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::open_memory_database;

    fn new_drug(name: &str) -> NewDrug {
        NewDrug {
            name: name.into(),
            strength: "500mg".into(),
            instructions: "Take one tablet twice daily with meals".into(),
            warnings: "May cause gastrointestinal upset.".into(),
        }
    }

    #[test]
    fn add_then_list() {
        let conn = open_memory_database().unwrap();
        let created = add_drug(&conn, &new_drug("Metformin")).unwrap();

        let listed = list_drugs(&conn).unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].id, created.id);
        assert_eq!(listed[0].name, "Metformin");
    }

    #[test]
    fn every_field_is_required() {
        let conn = open_memory_database().unwrap();

        let mut input = new_drug("Metformin");
        input.name = String::new();
        assert!(matches!(
            add_drug(&conn, &input).unwrap_err(),
            CatalogError::MissingField("name")
        ));

        let mut input = new_drug("Metformin");
        input.strength = String::new();
        assert!(matches!(
            add_drug(&conn, &input).unwrap_err(),
            CatalogError::MissingField("strength")
        ));

        let mut input = new_drug("Metformin");
        input.instructions = String::new();
        assert!(matches!(
            add_drug(&conn, &input).unwrap_err(),
            CatalogError::MissingField("instructions")
        ));

        let mut input = new_drug("Metformin");
        input.warnings = String::new();
        assert!(matches!(
            add_drug(&conn, &input).unwrap_err(),
            CatalogError::MissingField("warnings")
        ));
    }

    #[test]
    fn no_duplicate_check() {
        let conn = open_memory_database().unwrap();
        let first = add_drug(&conn, &new_drug("Metformin")).unwrap();
        let second = add_drug(&conn, &new_drug("Metformin")).unwrap();
        assert_ne!(first.id, second.id);
        assert_eq!(list_drugs(&conn).unwrap().len(), 2);
    }
}
