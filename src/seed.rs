//! Idempotent development seed — a doctor, a pharmacist and three catalog
//! drugs, inserted only when absent so repeated startups are safe.

use rusqlite::{params, Connection};
use uuid::Uuid;

use crate::auth::hash_password;
use crate::db::{repository, DatabaseError};
use crate::models::{Drug, Role, User};

const SAMPLE_DRUGS: [(&str, &str, &str, &str); 3] = [
    (
        "Amoxicillin",
        "250mg",
        "Take one tablet every 8 hours",
        "May cause allergic reaction.",
    ),
    (
        "Lisinopril",
        "10mg",
        "Take one tablet daily",
        "Monitor blood pressure.",
    ),
    (
        "Metformin",
        "500mg",
        "Take one tablet twice daily with meals",
        "May cause gastrointestinal upset.",
    ),
];

/// Seed demo accounts and catalog entries.
pub fn seed_demo_data(conn: &Connection) -> Result<(), DatabaseError> {
    seed_user(conn, "testdoctor", "password123", Role::Doctor)?;
    seed_user(conn, "testpharmacist", "pharmacypass", Role::Pharmacist)?;

    for (name, strength, instructions, warnings) in SAMPLE_DRUGS {
        if !drug_exists(conn, name)? {
            let drug = Drug {
                id: Uuid::new_v4(),
                name: name.into(),
                strength: strength.into(),
                instructions: instructions.into(),
                warnings: warnings.into(),
            };
            repository::insert_drug(conn, &drug)?;
            tracing::info!(name, "sample drug seeded");
        }
    }

    Ok(())
}

fn seed_user(
    conn: &Connection,
    username: &str,
    password: &str,
    role: Role,
) -> Result<(), DatabaseError> {
    if repository::get_user_by_username(conn, username)?.is_some() {
        return Ok(());
    }
    let user = User {
        id: Uuid::new_v4(),
        username: username.into(),
        password_hash: hash_password(password),
        role,
    };
    repository::insert_user(conn, &user)?;
    tracing::info!(username, role = role.as_str(), "demo user seeded");
    Ok(())
}

fn drug_exists(conn: &Connection, name: &str) -> Result<bool, DatabaseError> {
    let count: i64 = conn.query_row(
        "SELECT COUNT(*) FROM drugs WHERE name = ?1",
        params![name],
        |row| row.get(0),
    )?;
    Ok(count > 0)
}
