use std::sync::Arc;

use axum::extract::State;
use axum::routing::get;
use axum::{Json, Router};

use crate::global::Global;

pub mod articles;
pub mod bookmarks;

pub fn routes() -> Router<Arc<Global>> {
    Router::new()
        .route("/", get(root))
        .nest("/api", articles::routes().merge(bookmarks::routes()))
}

#[derive(serde::Serialize)]
struct RootResponse {
    message: &'static str,
    version: &'static str,
    uptime: u64,
    endpoints: &'static [&'static str],
}

#[tracing::instrument(skip(global))]
async fn root(State(global): State<Arc<Global>>) -> Json<RootResponse> {
    Json(RootResponse {
        message: "Daily Tech Insights API",
        version: env!("CARGO_PKG_VERSION"),
        uptime: global.started_at.elapsed().as_secs(),
        endpoints: &[
            "GET /api/articles/today",
            "GET /api/articles/:id",
            "POST /api/articles/:id/favorite",
            "GET /api/bookmarks",
            "DELETE /api/bookmarks/:id",
        ],
    })
}
