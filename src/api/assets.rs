//! Embedded static assets for release builds
//!
//! Falls back to serving from the filesystem during development.

use axum::{
    extract::Path,
    http::{header, StatusCode},
    response::{IntoResponse, Response},
};
use rust_embed::Embed;
use std::borrow::Cow;
use std::path::PathBuf;

const ASSET_DIR: &str = "ui";

#[derive(Embed)]
#[folder = "ui"]
struct Assets;

/// Serve an embedded static file, with filesystem fallback for development
pub async fn serve_static(Path(path): Path<String>) -> Response {
    match load(&path) {
        Some(content) => {
            let mime = mime_guess::from_path(&path).first_or_octet_stream();
            (
                StatusCode::OK,
                [(header::CONTENT_TYPE, mime.as_ref().to_string())],
                content.into_owned(),
            )
                .into_response()
        }
        None => (StatusCode::NOT_FOUND, "Not found").into_response(),
    }
}

/// The page shell (embedded or from filesystem)
pub fn get_index_html() -> Option<String> {
    load("index.html").and_then(|content| String::from_utf8(content.into_owned()).ok())
}

fn load(path: &str) -> Option<Cow<'static, [u8]>> {
    if path.split('/').any(|part| part == "..") {
        return None;
    }

    if let Some(file) = Assets::get(path) {
        return Some(file.data);
    }

    let fs_path = PathBuf::from(ASSET_DIR).join(path);
    std::fs::read(fs_path).ok().map(Cow::Owned)
}
