use axum::{extract::State, Json};
use serde_json::{json, Value};
use tracing::{info, warn};

use super::AppState;
use crate::{
    catalog::{Plan, PlanType},
    error::AppError,
    metrics,
};

/// Handle /api/plans/featured: every postpaid plan
pub async fn featured_plans(State(state): State<AppState>) -> Result<Json<Vec<Plan>>, AppError> {
    metrics::record_request("/api/plans/featured");
    plans_of_type(&state, PlanType::Postpaid).await
}

/// Handle /api/plans/prepaid: every prepaid plan
pub async fn prepaid_plans(State(state): State<AppState>) -> Result<Json<Vec<Plan>>, AppError> {
    metrics::record_request("/api/plans/prepaid");
    plans_of_type(&state, PlanType::Prepaid).await
}

async fn plans_of_type(state: &AppState, plan_type: PlanType) -> Result<Json<Vec<Plan>>, AppError> {
    let catalog = state.catalog.get_catalog().await?;
    let plans: Vec<Plan> = catalog.by_type(plan_type).cloned().collect();

    info!("Returning {} {} plans", plans.len(), plan_type);
    Ok(Json(plans))
}

/// Handle /api/plans/all
///
/// An empty catalog forces one reload before giving up.
pub async fn all_plans(State(state): State<AppState>) -> Result<Json<Vec<Plan>>, AppError> {
    metrics::record_request("/api/plans/all");

    let mut catalog = state.catalog.get_catalog().await?;
    if catalog.is_empty() {
        warn!("Catalog is empty, forcing reload");
        catalog = state.catalog.reload().await?;
        if catalog.is_empty() {
            return Err(AppError::CatalogUnavailable("No plans available".to_string()));
        }
    }

    info!("Returning {} plans", catalog.len());
    Ok(Json(catalog.plans().to_vec()))
}

/// Handle /api/plans/reload
pub async fn reload_plans(State(state): State<AppState>) -> Result<Json<Value>, AppError> {
    metrics::record_request("/api/plans/reload");

    let catalog = state.catalog.reload().await.map_err(|e| {
        AppError::CatalogUnavailable(format!("Failed to reload plans data: {}", e))
    })?;

    info!("Plans reloaded: {} plans", catalog.len());
    Ok(Json(json!({
        "message": "Plans reloaded successfully",
        "plans": catalog.len(),
    })))
}
