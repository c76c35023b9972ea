use std::str::FromStr;

use rusqlite::{params, Connection, OptionalExtension};
use uuid::Uuid;

use crate::db::DatabaseError;
use crate::models::{Role, User};

use super::parse_uuid;

pub fn insert_user(conn: &Connection, user: &User) -> Result<(), DatabaseError> {
    conn.execute(
        "INSERT INTO users (id, username, password_hash, role) VALUES (?1, ?2, ?3, ?4)",
        params![
            user.id.to_string(),
            user.username,
            user.password_hash,
            user.role.as_str(),
        ],
    )?;
    Ok(())
}

pub fn get_user_by_username(
    conn: &Connection,
    username: &str,
) -> Result<Option<User>, DatabaseError> {
    let row = conn
        .query_row(
            "SELECT id, username, password_hash, role FROM users WHERE username = ?1",
            params![username],
            user_row,
        )
        .optional()?;
    row.map(user_from_row).transpose()
}

/// Look up a user by id, but only if they hold the doctor role. The single
/// authorization check the prescription flow performs.
pub fn get_doctor(conn: &Connection, id: &Uuid) -> Result<Option<User>, DatabaseError> {
    let row = conn
        .query_row(
            "SELECT id, username, password_hash, role FROM users WHERE id = ?1 AND role = 'doctor'",
            params![id.to_string()],
            user_row,
        )
        .optional()?;
    row.map(user_from_row).transpose()
}

type UserRow = (String, String, String, String);

fn user_row(row: &rusqlite::Row<'_>) -> Result<UserRow, rusqlite::Error> {
    Ok((row.get(0)?, row.get(1)?, row.get(2)?, row.get(3)?))
}

fn user_from_row((id, username, password_hash, role): UserRow) -> Result<User, DatabaseError> {
    Ok(User {
        id: parse_uuid(&id)?,
        username,
        password_hash,
        role: Role::from_str(&role)?,
    })
}
