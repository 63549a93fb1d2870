//! Server-rendered document endpoints.
//! Used by: server.

use axum::extract::{Path, State};
use axum::response::Html;

use crate::console;
use crate::error::Result;
use crate::render::{prepare_render, render_document, RenderContext};
use crate::state::AppState;

pub async fn root(State(state): State<AppState>) -> Result<Html<String>> {
    render_page(&state, "/".to_string()).await
}

pub async fn show(
    State(state): State<AppState>,
    Path(page): Path<String>,
) -> Result<Html<String>> {
    render_page(&state, format!("/{page}")).await
}

async fn render_page(state: &AppState, pathname: String) -> Result<Html<String>> {
    state.increment_requests();
    let ctx = RenderContext { pathname };
    let props = prepare_render(state, &ctx).await?;
    let html = render_document(&props)?;
    state.metrics.record_page_render();
    console::log_render(&ctx.pathname);
    Ok(Html(html))
}
