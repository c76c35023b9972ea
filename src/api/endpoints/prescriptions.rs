//! Prescription endpoints.
//!
//! - `POST /api/prescriptions` — create
//! - `GET /api/prescriptions/:id` — full detail
//! - `PUT /api/prescriptions/:id/status` — overwrite status
//! - `GET /api/prescriptions/:id/labels` — dispensing labels

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::api::error::ApiError;
use crate::api::types::ApiContext;
use crate::prescriptions::{self, NewPrescription, PrescriptionReceipt, PrescriptionView};

#[derive(Deserialize)]
pub struct CreatePrescriptionRequest {
    pub patient_name: Option<String>,
    pub patient_file_number: Option<String>,
    pub doctor_id: Option<String>,
    pub drug_ids: Option<Vec<String>>,
}

/// `POST /api/prescriptions` — issue a new prescription.
pub async fn create(
    State(ctx): State<ApiContext>,
    Json(req): Json<CreatePrescriptionRequest>,
) -> Result<(StatusCode, Json<PrescriptionReceipt>), ApiError> {
    let doctor_id = req
        .doctor_id
        .ok_or(ApiError::MissingField("doctor_id"))
        .and_then(|raw| parse_id(&raw, "doctor id"))?;

    let drug_ids = req.drug_ids.ok_or(ApiError::InvalidDrugList)?;
    if drug_ids.is_empty() {
        return Err(ApiError::InvalidDrugList);
    }
    let drug_ids = drug_ids
        .iter()
        .map(|raw| parse_id(raw, "drug id"))
        .collect::<Result<Vec<Uuid>, ApiError>>()?;

    let input = NewPrescription {
        patient_name: req.patient_name.unwrap_or_default(),
        patient_file_number: req.patient_file_number.unwrap_or_default(),
        doctor_id,
        drug_ids,
    };

    let mut conn = ctx.open_db()?;
    let receipt = prescriptions::create_prescription(&mut conn, &input)?;
    Ok((StatusCode::CREATED, Json(receipt)))
}

/// `GET /api/prescriptions/:id` — full prescription detail.
pub async fn detail(
    State(ctx): State<ApiContext>,
    Path(id): Path<String>,
) -> Result<Json<PrescriptionView>, ApiError> {
    let id = parse_id(&id, "prescription id")?;
    let conn = ctx.open_db()?;
    let view = prescriptions::fetch_prescription(&conn, &id)?;
    Ok(Json(view))
}

#[derive(Deserialize)]
pub struct UpdateStatusRequest {
    pub status: Option<String>,
}

/// `PUT /api/prescriptions/:id/status` — overwrite the status.
pub async fn update_status(
    State(ctx): State<ApiContext>,
    Path(id): Path<String>,
    Json(req): Json<UpdateStatusRequest>,
) -> Result<Json<PrescriptionView>, ApiError> {
    let id = parse_id(&id, "prescription id")?;
    let conn = ctx.open_db()?;
    let view = prescriptions::update_status(&conn, &id, req.status.as_deref().unwrap_or(""))?;
    Ok(Json(view))
}

#[derive(Serialize)]
pub struct LabelsResponse {
    pub prescription_id: Uuid,
    pub labels: Vec<String>,
}

/// `GET /api/prescriptions/:id/labels` — one label per associated drug.
pub async fn labels(
    State(ctx): State<ApiContext>,
    Path(id): Path<String>,
) -> Result<Json<LabelsResponse>, ApiError> {
    let id = parse_id(&id, "prescription id")?;
    let conn = ctx.open_db()?;
    let labels = prescriptions::generate_labels(&conn, &id)?
        .iter()
        .map(|label| label.to_text())
        .collect();
    Ok(Json(LabelsResponse {
        prescription_id: id,
        labels,
    }))
}

fn parse_id(raw: &str, what: &str) -> Result<Uuid, ApiError> {
    Uuid::parse_str(raw).map_err(|e| ApiError::BadRequest(format!("Invalid {what}: {e}")))
}
