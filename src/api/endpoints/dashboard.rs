//! Pharmacist dashboard endpoints — the pending feed and drug statistics.

use std::collections::HashMap;

use axum::extract::State;
use axum::Json;

use crate::api::error::ApiError;
use crate::api::types::ApiContext;
use crate::reporting::{self, PendingNotification};

/// `GET /api/dashboard/notifications` — pending prescriptions, newest first.
pub async fn notifications(
    State(ctx): State<ApiContext>,
) -> Result<Json<Vec<PendingNotification>>, ApiError> {
    let conn = ctx.open_db()?;
    let feed = reporting::pending_notifications(&conn)?;
    Ok(Json(feed))
}

/// `GET /api/dashboard/statistics/drugs` — prescription count per drug name.
pub async fn drug_statistics(
    State(ctx): State<ApiContext>,
) -> Result<Json<HashMap<String, i64>>, ApiError> {
    let conn = ctx.open_db()?;
    let counts = reporting::drug_prescription_counts(&conn)?;
    Ok(Json(counts))
}
