use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use formkit_core::validate::check_submission;
use formkit_core::{Delivery, FormMessage, Outcome, SessionId};

use crate::error::AppError;
use crate::state::AppState;

/// POST /api/sessions/{id}/messages: deliver one inbound message.
///
/// A `formSubmit` that fails the submission checks is answered with 422 and
/// the field issues; the session stays open so the user can correct it.
pub async fn post_message(
    State(app): State<AppState>,
    Path(id): Path<String>,
    Json(message): Json<FormMessage>,
) -> Result<Response, AppError> {
    let session: SessionId = id
        .parse()
        .map_err(|_| AppError::bad_request(format!("invalid session id '{id}'")))?;

    let mut ctl = app.session.lock().await;
    if ctl.active_id() != Some(session) {
        tracing::debug!(%session, kind = message.kind(), "message for inactive session rejected");
        return Err(AppError::conflict(format!(
            "session '{session}' is no longer active"
        )));
    }

    if let (FormMessage::FormSubmit { data }, Some(definition)) =
        (&message, ctl.active_definition())
    {
        let issues = check_submission(definition, data);
        if !issues.is_empty() {
            tracing::debug!(%session, issues = issues.len(), "submission rejected");
            let body = serde_json::json!({
                "error": "submission rejected",
                "issues": issues,
            });
            return Ok((StatusCode::UNPROCESSABLE_ENTITY, Json(body)).into_response());
        }
    }

    let delivery = ctl.receive_from(session, message);
    drop(ctl);

    let body = match &delivery {
        Delivery::Resolved(Outcome::Submitted { .. }) => serde_json::json!({ "status": "submitted" }),
        Delivery::Resolved(Outcome::SubmitFailed { error }) => {
            serde_json::json!({ "status": "failed", "error": error })
        }
        Delivery::Resolved(Outcome::Cancelled) => serde_json::json!({ "status": "cancelled" }),
        Delivery::Acknowledged => serde_json::json!({ "status": "acknowledged" }),
        Delivery::Ignored => serde_json::json!({ "status": "ignored" }),
    };
    if let Delivery::Resolved(outcome) = delivery {
        app.publish_outcome(outcome);
    }
    Ok(Json(body).into_response())
}
