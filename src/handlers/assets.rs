//! Fixed static assets.
//! Used by: server.
//!
//! The stylesheet path is load-bearing: the rendered document links to
//! `/style.css` by absolute path.

use axum::http::header;
use axum::response::IntoResponse;

const STYLESHEET: &str = include_str!("../../assets/style.css");
const BOOTSTRAP: &str = include_str!("../../assets/app.js");

pub async fn stylesheet() -> impl IntoResponse {
    ([(header::CONTENT_TYPE, "text/css; charset=utf-8")], STYLESHEET)
}

pub async fn bootstrap() -> impl IntoResponse {
    (
        [(header::CONTENT_TYPE, "text/javascript; charset=utf-8")],
        BOOTSTRAP,
    )
}
