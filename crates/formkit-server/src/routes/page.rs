use axum::extract::State;
use axum::response::Html;

use crate::error::AppError;
use crate::state::AppState;

/// GET /: the composed page for the active session.
pub async fn get_page(State(app): State<AppState>) -> Result<Html<String>, AppError> {
    let ctl = app.session.lock().await;
    match ctl.surface().page() {
        Some(page) => Ok(Html(page.html.clone())),
        None => Err(AppError::not_found("no form is open")),
    }
}
