use axum::{
    extract::{rejection::FormRejection, MatchedPath, State},
    Form, Json,
};
use serde::Deserialize;
use serde_json::{json, Value};

use super::AppState;
use crate::{error::AppError, feedback::FeedbackEntry, metrics};

#[derive(Debug, Deserialize)]
pub struct FeedbackForm {
    pub name: Option<String>,
    pub email: Option<String>,
    pub feedback: Option<String>,
}

fn non_empty(field: Option<String>) -> Option<String> {
    field.map(|v| v.trim().to_string()).filter(|v| !v.is_empty())
}

/// Handle /contact-feedback and /feedback-submit
pub async fn submit_feedback(
    State(state): State<AppState>,
    path: MatchedPath,
    form: Result<Form<FeedbackForm>, FormRejection>,
) -> Result<Json<Value>, AppError> {
    // Mounted on two routes; label by the one that matched
    metrics::record_request(path.as_str());

    let Form(form) = form.map_err(|e| AppError::BadRequest(e.body_text()))?;

    let (Some(name), Some(feedback)) = (non_empty(form.name), non_empty(form.feedback)) else {
        return Err(AppError::BadRequest("Name and feedback are required".to_string()));
    };

    let entry = FeedbackEntry {
        name,
        email: non_empty(form.email).unwrap_or_default(),
        feedback,
    };
    state.feedback.append(&entry).await?;
    metrics::record_feedback();

    Ok(Json(json!({ "message": "Feedback submitted successfully" })))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_non_empty() {
        assert_eq!(non_empty(Some("  Ana ".to_string())), Some("Ana".to_string()));
        assert_eq!(non_empty(Some("   ".to_string())), None);
        assert_eq!(non_empty(None), None);
    }
}
