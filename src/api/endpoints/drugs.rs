//! Drug catalog endpoints.
//!
//! - `GET /api/drugs` — the whole catalog
//! - `POST /api/drugs` — add a catalog entry

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;

use crate::api::error::ApiError;
use crate::api::types::ApiContext;
use crate::catalog::{self, NewDrug};
use crate::models::Drug;

/// `GET /api/drugs` — list the catalog.
pub async fn list(State(ctx): State<ApiContext>) -> Result<Json<Vec<Drug>>, ApiError> {
    let conn = ctx.open_db()?;
    let drugs = catalog::list_drugs(&conn)?;
    Ok(Json(drugs))
}

#[derive(Deserialize)]
pub struct AddDrugRequest {
    pub name: Option<String>,
    pub strength: Option<String>,
    pub instructions: Option<String>,
    pub warnings: Option<String>,
}

/// `POST /api/drugs` — add a drug to the catalog.
pub async fn create(
    State(ctx): State<ApiContext>,
    Json(req): Json<AddDrugRequest>,
) -> Result<(StatusCode, Json<Drug>), ApiError> {
    let conn = ctx.open_db()?;
    let input = NewDrug {
        name: req.name.unwrap_or_default(),
        strength: req.strength.unwrap_or_default(),
        instructions: req.instructions.unwrap_or_default(),
        warnings: req.warnings.unwrap_or_default(),
    };
    let drug = catalog::add_drug(&conn, &input)?;
    Ok((StatusCode::CREATED, Json(drug)))
}
