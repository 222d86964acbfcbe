use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use super::AppState;
use crate::{
    catalog::Plan,
    error::AppError,
    extract::{extract_details, PlanDetails},
    metrics,
    recommend::{recommend_detailed, Strategy},
};

const RECOMMENDATION_MESSAGE: &str = "Based on your current plan details, here are my recommendations:";

const KEYWORD_MESSAGE: &str = "Based on what you're looking for, here are some plans you might like:";

const FALLBACK_MESSAGE: &str = "I couldn't determine your current plan details from your input. \
If you're not sure, you can browse all our plans at <a href='all-plans.html'>all-plans.html</a> \
for a wider selection. Alternatively, please provide your plan price, data usage, and provider \
so I can give you a personalized recommendation.";

#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    #[serde(rename = "userMessage")]
    pub user_message: Option<String>,

    #[serde(rename = "planDetails", default)]
    pub plan_details: Option<PlanDetails>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatResponse {
    pub message: String,
    pub current_plan_details: PlanDetails,
    pub recommended_plans: Vec<Plan>,
}

/// Handle /chat
///
/// Explicit `planDetails` win over whatever can be extracted from the
/// message text.
pub async fn handle_chat(
    State(state): State<AppState>,
    payload: Result<Json<ChatRequest>, JsonRejection>,
) -> Result<Json<ChatResponse>, AppError> {
    metrics::record_request("/chat");

    let Json(request) = payload.map_err(|e| AppError::BadRequest(e.body_text()))?;

    let user_message = request
        .user_message
        .map(|m| m.trim().to_string())
        .ok_or_else(|| AppError::BadRequest("\"userMessage\" field is required.".to_string()))?;
    info!("Received chat message: {}", user_message);

    let catalog = state.catalog.get_catalog().await?;

    let details = match request.plan_details.filter(|d| !d.is_empty()) {
        Some(details) => {
            info!("Using provided plan details: {:?}", details);
            details
        }
        None => {
            let details = extract_details(&user_message, &catalog);
            info!("Extracted plan details from message: {:?}", details);
            details
        }
    };

    if details.is_empty() {
        return Ok(Json(ChatResponse {
            message: FALLBACK_MESSAGE.to_string(),
            current_plan_details: details,
            recommended_plans: Vec::new(),
        }));
    }

    let recommendation = recommend_detailed(&catalog, &details.to_query());
    debug!(
        "Recommendation strategy {} returned {} plans",
        recommendation.strategy.as_str(),
        recommendation.plans.len()
    );
    metrics::record_recommendation(recommendation.strategy.as_str(), recommendation.plans.len());

    let message = match recommendation.strategy {
        Strategy::Keyword => KEYWORD_MESSAGE,
        _ => RECOMMENDATION_MESSAGE,
    };

    Ok(Json(ChatResponse {
        message: message.to_string(),
        current_plan_details: details,
        recommended_plans: recommendation.plans,
    }))
}
