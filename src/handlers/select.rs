use axum::{extract::rejection::JsonRejection, Json};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::info;

use crate::{carriers, error::AppError, metrics};

#[derive(Debug, Deserialize)]
pub struct SelectPlanRequest {
    #[serde(default)]
    pub carrier: String,
    #[serde(default)]
    pub plan_name: String,
    #[serde(default)]
    pub price: Option<f64>,
    /// Number or display string, passed through untouched
    #[serde(default)]
    pub data: Option<Value>,
    #[serde(default)]
    pub id: Option<Value>,
}

#[derive(Debug, Serialize, PartialEq)]
pub struct Selection {
    pub carrier: String,
    pub plan_name: String,
    pub plan_price: Option<f64>,
    pub plan_data: Option<Value>,
    pub plan_id: Option<Value>,
}

#[derive(Debug, Serialize)]
pub struct SelectPlanResponse {
    pub success: bool,
    pub redirect: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub selection: Option<Selection>,
}

/// Handle /select_plan
///
/// Carriers with their own bring-your-own-phone signup page get a redirect;
/// every other selection is acknowledged and echoed back for checkout.
pub async fn select_plan(
    payload: Result<Json<SelectPlanRequest>, JsonRejection>,
) -> Result<Json<SelectPlanResponse>, AppError> {
    metrics::record_request("/select_plan");

    let Json(request) = payload.map_err(|e| AppError::BadRequest(e.body_text()))?;
    if request.carrier.trim().is_empty() {
        return Err(AppError::BadRequest("\"carrier\" field is required.".to_string()));
    }

    if let Some(url) = carriers::signup_url(&request.carrier) {
        info!("Redirecting {} selection to carrier signup", request.carrier);
        return Ok(Json(SelectPlanResponse {
            success: true,
            redirect: true,
            url: Some(url.to_string()),
            selection: None,
        }));
    }

    info!(
        "Plan selected: {} - {}",
        request.carrier, request.plan_name
    );
    Ok(Json(SelectPlanResponse {
        success: true,
        redirect: false,
        url: None,
        selection: Some(Selection {
            carrier: request.carrier,
            plan_name: request.plan_name,
            plan_price: request.price,
            plan_data: request.data,
            plan_id: request.id,
        }),
    }))
}
