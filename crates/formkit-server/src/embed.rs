use axum::extract::Path;
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use rust_embed::Embed;

#[derive(Embed)]
#[folder = "$CARGO_MANIFEST_DIR/assets/"]
struct Assets;

const PAGE_TEMPLATE: &str = "index.html";

/// The page shell that form markup is injected into.
pub fn page_template() -> anyhow::Result<String> {
    let file = <Assets as Embed>::get(PAGE_TEMPLATE)
        .ok_or_else(|| anyhow::anyhow!("embedded asset '{PAGE_TEMPLATE}' is missing"))?;
    Ok(String::from_utf8(file.data.into_owned())?)
}

/// GET /assets/{*path}: embedded script and stylesheet.
pub async fn asset_handler(Path(path): Path<String>) -> Response {
    // The template is only ever served composed, via `GET /`.
    if path == PAGE_TEMPLATE {
        return (StatusCode::NOT_FOUND, "not found").into_response();
    }
    match <Assets as Embed>::get(&path) {
        Some(content) => {
            let mime = mime_guess::from_path(&path).first_or_octet_stream();
            (
                StatusCode::OK,
                [(header::CONTENT_TYPE, mime.as_ref())],
                content.data.to_vec(),
            )
                .into_response()
        }
        None => (StatusCode::NOT_FOUND, "not found").into_response(),
    }
}
