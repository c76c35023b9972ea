//! Read-only reporting over prescription data — the pharmacist dashboard
//! feed and per-drug usage counts.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use rusqlite::Connection;
use serde::Serialize;
use uuid::Uuid;

use crate::db::DatabaseError;

/// Digest entry for a prescription awaiting pharmacist action.
#[derive(Debug, Clone, Serialize)]
pub struct PendingNotification {
    pub id: Uuid,
    pub patient_name: String,
    pub created_at: DateTime<Utc>,
}

/// All prescriptions whose status is exactly "pending", newest first.
pub fn pending_notifications(
    conn: &Connection,
) -> Result<Vec<PendingNotification>, DatabaseError> {
    let mut stmt = conn.prepare(
        "SELECT p.id, pa.name, p.created_at
         FROM prescriptions p
         JOIN patients pa ON p.patient_id = pa.id
         WHERE p.status = 'pending'
         ORDER BY p.created_at DESC",
    )?;

    let rows = stmt.query_map([], |row| {
        Ok((
            row.get::<_, String>(0)?,
            row.get::<_, String>(1)?,
            row.get::<_, String>(2)?,
        ))
    })?;

    let mut notifications = Vec::new();
    for row in rows {
        let (id, patient_name, created_at) = row?;
        notifications.push(PendingNotification {
            id: Uuid::parse_str(&id)
                .map_err(|e| DatabaseError::ConstraintViolation(e.to_string()))?,
            patient_name,
            created_at: DateTime::parse_from_rfc3339(&created_at)
                .map(|dt| dt.with_timezone(&Utc))
                .map_err(|e| DatabaseError::ConstraintViolation(e.to_string()))?,
        });
    }
    Ok(notifications)
}

/// For every catalog drug, the number of distinct prescriptions referencing
/// it (0 when uncited).
///
/// The result is keyed by drug name: two catalog entries sharing a name
/// overwrite one another here. Kept as-is for parity — see DESIGN.md.
pub fn drug_prescription_counts(
    conn: &Connection,
) -> Result<HashMap<String, i64>, DatabaseError> {
    let mut stmt = conn.prepare(
        "SELECT d.name, COUNT(DISTINCT pd.prescription_id)
         FROM drugs d
         LEFT JOIN prescription_drugs pd ON pd.drug_id = d.id
         GROUP BY d.id
         ORDER BY d.name, d.id",
    )?;

    let rows = stmt.query_map([], |row| {
        Ok((row.get::<_, String>(0)?, row.get::<_, i64>(1)?))
    })?;

    let mut counts = HashMap::new();
    for row in rows {
        let (name, count) = row?;
        counts.insert(name, count);
    }
    Ok(counts)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::open_memory_database;
    use crate::db::repository::{
        add_prescription_drug, insert_drug, insert_patient, insert_prescription, insert_user,
    };
    use crate::models::{Drug, Patient, Prescription, Role, User, STATUS_PENDING};
    use chrono::TimeZone;

    struct Fixture {
        patient: Patient,
        doctor: User,
        drugs: Vec<Drug>,
    }

    fn fixture(conn: &Connection, drug_names: &[&str]) -> Fixture {
        let doctor = User {
            id: Uuid::new_v4(),
            username: "drhouse".into(),
            password_hash: "hash".into(),
            role: Role::Doctor,
        };
        insert_user(conn, &doctor).unwrap();

        let patient = Patient {
            id: Uuid::new_v4(),
            name: "Jane Smith".into(),
            file_number: "JS001".into(),
        };
        insert_patient(conn, &patient).unwrap();

        let drugs: Vec<Drug> = drug_names
            .iter()
            .map(|name| {
                let drug = Drug {
                    id: Uuid::new_v4(),
                    name: (*name).into(),
                    strength: "10mg".into(),
                    instructions: "One daily".into(),
                    warnings: "None noted.".into(),
                };
                insert_drug(conn, &drug).unwrap();
                drug
            })
            .collect();

        Fixture { patient, doctor, drugs }
    }

    fn prescription_at(
        conn: &Connection,
        fx: &Fixture,
        status: &str,
        created_at: DateTime<Utc>,
        drug_ids: &[Uuid],
    ) -> Uuid {
        let rx = Prescription {
            id: Uuid::new_v4(),
            patient_id: fx.patient.id,
            doctor_id: fx.doctor.id,
            status: status.into(),
            created_at,
        };
        insert_prescription(conn, &rx).unwrap();
        for (position, drug_id) in drug_ids.iter().enumerate() {
            add_prescription_drug(conn, &rx.id, drug_id, position as i64).unwrap();
        }
        rx.id
    }

    fn at(hour: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 3, 14, hour, 0, 0).unwrap()
    }

    #[test]
    fn pending_feed_is_newest_first_and_pending_only() {
        let conn = open_memory_database().unwrap();
        let fx = fixture(&conn, &["Amoxicillin"]);
        let drug = fx.drugs[0].id;

        let older = prescription_at(&conn, &fx, STATUS_PENDING, at(8), &[drug]);
        let newer = prescription_at(&conn, &fx, STATUS_PENDING, at(12), &[drug]);
        prescription_at(&conn, &fx, "ready", at(10), &[drug]);
        prescription_at(&conn, &fx, "dispensed", at(14), &[drug]);

        let feed = pending_notifications(&conn).unwrap();
        let ids: Vec<Uuid> = feed.iter().map(|n| n.id).collect();
        assert_eq!(ids, vec![newer, older]);
        assert_eq!(feed[0].patient_name, "Jane Smith");
        assert_eq!(feed[0].created_at, at(12));
    }

    #[test]
    fn pending_feed_is_empty_without_pending_prescriptions() {
        let conn = open_memory_database().unwrap();
        let fx = fixture(&conn, &["Amoxicillin"]);
        prescription_at(&conn, &fx, "ready", at(9), &[fx.drugs[0].id]);

        assert!(pending_notifications(&conn).unwrap().is_empty());
    }

    #[test]
    fn counts_cover_every_drug_including_uncited() {
        let conn = open_memory_database().unwrap();
        let fx = fixture(&conn, &["Amoxicillin", "Lisinopril", "Metformin"]);
        let (d1, d2) = (fx.drugs[0].id, fx.drugs[1].id);

        prescription_at(&conn, &fx, STATUS_PENDING, at(8), &[d1, d2]);
        prescription_at(&conn, &fx, STATUS_PENDING, at(9), &[d1]);

        let counts = drug_prescription_counts(&conn).unwrap();
        assert_eq!(counts["Amoxicillin"], 2);
        assert_eq!(counts["Lisinopril"], 1);
        assert_eq!(counts["Metformin"], 0);
    }

    #[test]
    fn duplicate_positions_count_one_prescription() {
        let conn = open_memory_database().unwrap();
        let fx = fixture(&conn, &["Amoxicillin"]);
        let d1 = fx.drugs[0].id;

        // Same drug twice on one prescription — still one distinct prescription
        prescription_at(&conn, &fx, STATUS_PENDING, at(8), &[d1, d1]);

        let counts = drug_prescription_counts(&conn).unwrap();
        assert_eq!(counts["Amoxicillin"], 1);
    }

    #[test]
    fn shared_names_collapse_to_one_key() {
        let conn = open_memory_database().unwrap();
        let fx = fixture(&conn, &["Amoxicillin", "Amoxicillin"]);
        prescription_at(&conn, &fx, STATUS_PENDING, at(8), &[fx.drugs[0].id]);

        // Name-keyed map: the two catalog entries overwrite each other
        let counts = drug_prescription_counts(&conn).unwrap();
        assert_eq!(counts.len(), 1);
    }

    #[test]
    fn empty_catalog_yields_empty_map() {
        let conn = open_memory_database().unwrap();
        assert!(drug_prescription_counts(&conn).unwrap().is_empty());
    }
}
