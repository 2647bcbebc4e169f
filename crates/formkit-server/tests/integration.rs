use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use axum::http::StatusCode;
use formkit_core::builder::{CheckboxOptions, DropdownOptions, TextOptions};
use formkit_core::field::Validation;
use formkit_core::{create_form, FormData, FormDefinition, Outcome, SessionId};
use formkit_server::build_router;
use formkit_server::state::AppState;
use http_body_util::BodyExt;
use serde_json::json;
use tower::ServiceExt;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn survey() -> FormDefinition {
    create_form("survey", "Survey")
        .add_step("about", "About you")
        .add_text(
            "name",
            "Name",
            TextOptions {
                required: true,
                ..Default::default()
            },
        )
        .add_text(
            "handle",
            "Handle",
            TextOptions {
                validation: Some(Validation::pattern("[a-z]+", "Lowercase only")),
                ..Default::default()
            },
        )
        .add_step("prefs", "Preferences")
        .add_dropdown("theme", "Theme", ["Light", "Dark"], DropdownOptions::default())
        .add_checkbox("agree", "I agree", CheckboxOptions::default())
        .build()
        .unwrap()
}

/// Start `survey()` on a fresh state; returns the state, session id and a
/// log of callback invocations.
async fn started() -> (AppState, SessionId, Arc<Mutex<Vec<String>>>) {
    let state = AppState::new().unwrap();
    let log = Arc::new(Mutex::new(Vec::new()));
    let submit_log = log.clone();
    let cancel_log = log.clone();
    let id = state.session.lock().await.start(
        survey(),
        Some(Box::new(move |data: &FormData| -> anyhow::Result<()> {
            let name = data["name"].as_str().unwrap_or_default().to_string();
            submit_log.lock().unwrap().push(format!("submit:{name}"));
            Ok(())
        })),
        Some(Box::new(move || -> anyhow::Result<()> {
            cancel_log.lock().unwrap().push("cancel".into());
            Ok(())
        })),
    );
    (state, id, log)
}

/// Send a GET request via `oneshot` and return (status, raw body).
async fn get_text(app: axum::Router, uri: &str) -> (StatusCode, String) {
    let req = axum::http::Request::builder()
        .uri(uri)
        .body(axum::body::Body::empty())
        .unwrap();
    let response = app.oneshot(req).await.unwrap();
    let status = response.status();
    let body = response.into_body().collect().await.unwrap().to_bytes();
    (status, String::from_utf8_lossy(&body).into_owned())
}

/// Send a GET request via `oneshot` and return (status, parsed JSON body).
async fn get(app: axum::Router, uri: &str) -> (StatusCode, serde_json::Value) {
    let (status, body) = get_text(app, uri).await;
    let json = serde_json::from_str(&body).unwrap_or(serde_json::Value::Null);
    (status, json)
}

/// Send a POST request with a JSON body via `oneshot` and return (status, parsed JSON body).
async fn post_json(
    app: axum::Router,
    uri: &str,
    body: serde_json::Value,
) -> (StatusCode, serde_json::Value) {
    let req = axum::http::Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(axum::body::Body::from(serde_json::to_vec(&body).unwrap()))
        .unwrap();
    let response = app.oneshot(req).await.unwrap();
    let status = response.status();
    let body = response.into_body().collect().await.unwrap().to_bytes();
    let json: serde_json::Value = serde_json::from_slice(&body).unwrap_or(serde_json::Value::Null);
    (status, json)
}

fn messages_uri(id: SessionId) -> String {
    format!("/api/sessions/{id}/messages")
}

fn valid_submission() -> serde_json::Value {
    json!({
        "type": "formSubmit",
        "data": { "name": "Ada", "handle": "ada", "theme": "Dark", "agree": true }
    })
}

// ---------------------------------------------------------------------------
// Page and form
// ---------------------------------------------------------------------------

#[tokio::test]
async fn idle_server_has_no_page() {
    let app = build_router(AppState::new().unwrap());
    let (status, body) = get(app.clone(), "/").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "no form is open");

    let (status, _) = get(app, "/api/form").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn page_embeds_rendered_form() {
    let (state, id, _) = started().await;
    let (status, html) = get_text(build_router(state), "/").await;
    assert_eq!(status, StatusCode::OK);
    assert!(html.contains("<title>Survey</title>"));
    assert!(html.contains(&format!("data-session=\"{id}\"")));
    assert!(html.contains("<div id=\"app\"><div class=\"form-container\" data-form-id=\"survey\">"));
    assert!(!html.contains("{{nonce}}"));
}

#[tokio::test]
async fn form_endpoint_returns_markup() {
    let (state, id, _) = started().await;
    let (status, body) = get(build_router(state), "/api/form").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["session"], id.to_string());
    assert_eq!(body["title"], "Survey");
    assert_eq!(body["steps"], 2);
    assert!(body["markup"].as_str().unwrap().starts_with("<div class=\"form-container\""));
}

// ---------------------------------------------------------------------------
// Messages
// ---------------------------------------------------------------------------

#[tokio::test]
async fn informational_messages_are_acknowledged() {
    let (state, id, log) = started().await;
    let app = build_router(state.clone());

    let (status, body) = post_json(app.clone(), &messages_uri(id), json!({"type": "ready"})).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "acknowledged");

    let (_, body) = post_json(app, &messages_uri(id), json!({"type": "stepChanged", "step": 1})).await;
    assert_eq!(body["status"], "acknowledged");
    assert!(state.session.lock().await.is_active());
    assert!(log.lock().unwrap().is_empty());
}

#[tokio::test]
async fn valid_submit_resolves_session() {
    let (state, id, log) = started().await;
    let mut outcomes = state.outcome_tx.subscribe();
    let app = build_router(state.clone());

    let (status, body) = post_json(app.clone(), &messages_uri(id), valid_submission()).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "submitted");
    assert_eq!(log.lock().unwrap().as_slice(), ["submit:Ada"]);

    match outcomes.recv().await.unwrap() {
        Outcome::Submitted { data } => assert_eq!(data["theme"].as_str(), Some("Dark")),
        other => panic!("unexpected outcome: {other:?}"),
    }

    // The page is gone and a second submit is stale.
    let (status, _) = get(app.clone(), "/").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    let (status, _) = post_json(app, &messages_uri(id), valid_submission()).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(log.lock().unwrap().len(), 1);
}

#[tokio::test]
async fn invalid_submit_is_rejected_and_session_stays_open() {
    let (state, id, log) = started().await;
    let app = build_router(state.clone());

    let (status, body) = post_json(
        app,
        &messages_uri(id),
        json!({
            "type": "formSubmit",
            "data": { "name": "", "handle": "ADA", "theme": "Blue", "agree": false }
        }),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    let fields: Vec<&str> = body["issues"]
        .as_array()
        .unwrap()
        .iter()
        .map(|i| i["field"].as_str().unwrap())
        .collect();
    assert_eq!(fields, ["name", "handle", "theme"]);
    assert_eq!(body["issues"][1]["message"], "Lowercase only");

    assert!(state.session.lock().await.is_active());
    assert!(log.lock().unwrap().is_empty());
}

#[tokio::test]
async fn cancel_fires_cancel_callback_once() {
    let (state, id, log) = started().await;
    let app = build_router(state.clone());

    let (status, body) = post_json(app.clone(), &messages_uri(id), json!({"type": "formCancel"})).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "cancelled");

    let (status, _) = post_json(app, &messages_uri(id), json!({"type": "formCancel"})).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(state.session.lock().await.dispose(), None);
    assert_eq!(log.lock().unwrap().as_slice(), ["cancel"]);
}

#[tokio::test]
async fn messages_for_pre_empted_session_conflict() {
    let (state, first, log) = started().await;
    let second = state.session.lock().await.start(survey(), None, None);
    let app = build_router(state.clone());

    let (status, body) = post_json(app.clone(), &messages_uri(first), valid_submission()).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert!(body["error"].as_str().unwrap().contains("no longer active"));

    let (status, body) = post_json(app, &messages_uri(second), valid_submission()).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "submitted");

    // The pre-empted session's callbacks never ran.
    assert!(log.lock().unwrap().is_empty());
}

#[tokio::test]
async fn malformed_session_id_is_bad_request() {
    let (state, _, _) = started().await;
    let (status, body) = post_json(
        build_router(state),
        "/api/sessions/not-a-uuid/messages",
        json!({"type": "ready"}),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("not-a-uuid"));
}

#[tokio::test]
async fn failing_definition_hook_reports_failure() {
    let state = AppState::new().unwrap();
    let calls = Arc::new(AtomicUsize::new(0));
    let hook_calls = calls.clone();
    let definition = create_form("f", "F")
        .add_step("s", "S")
        .on_submit(move |_| {
            hook_calls.fetch_add(1, Ordering::SeqCst);
            anyhow::bail!("webhook unreachable")
        })
        .build()
        .unwrap();
    let id = state.session.lock().await.start(definition, None, None);

    let (status, body) = post_json(
        build_router(state.clone()),
        &messages_uri(id),
        json!({"type": "formSubmit", "data": {}}),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "failed");
    assert_eq!(body["error"], "webhook unreachable");
    assert_eq!(calls.load(Ordering::SeqCst), 1);
    assert!(!state.session.lock().await.is_active());
}

// ---------------------------------------------------------------------------
// Assets
// ---------------------------------------------------------------------------

#[tokio::test]
async fn serves_embedded_assets() {
    let app = build_router(AppState::new().unwrap());
    let req = axum::http::Request::builder()
        .uri("/assets/form.js")
        .body(axum::body::Body::empty())
        .unwrap();
    let response = app.clone().oneshot(req).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let content_type = response.headers()["content-type"].to_str().unwrap().to_string();
    assert!(content_type.contains("javascript"), "{content_type}");

    let (status, _) = get_text(app.clone(), "/assets/index.html").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    let (status, _) = get_text(app, "/assets/missing.png").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}
