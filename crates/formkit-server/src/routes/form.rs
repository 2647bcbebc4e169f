use axum::extract::State;
use axum::Json;

use crate::error::AppError;
use crate::state::AppState;

/// GET /api/form: the active session's id, title and bare form markup.
pub async fn get_form(State(app): State<AppState>) -> Result<Json<serde_json::Value>, AppError> {
    let ctl = app.session.lock().await;
    let page = ctl
        .surface()
        .page()
        .ok_or_else(|| AppError::not_found("no form is open"))?;
    let steps = ctl.active_definition().map_or(0, |d| d.steps().len());
    Ok(Json(serde_json::json!({
        "session": page.session,
        "title": page.title,
        "steps": steps,
        "markup": page.markup,
    })))
}
