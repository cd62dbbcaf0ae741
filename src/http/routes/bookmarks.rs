use std::sync::Arc;

use axum::extract::{Path, State};
use axum::routing::{delete, get};
use axum::{Json, Router};

use crate::dashboard::{remove_favorite, FeedPage};
use crate::global::Global;
use crate::http::error::ApiError;
use crate::store::{ArticleQuery, SortField};
use crate::types::ArticleId;

pub fn routes() -> Router<Arc<Global>> {
    Router::new()
        .route("/bookmarks", get(get_bookmarks))
        .route("/bookmarks/:id", delete(delete_bookmark))
}

/// GET /api/bookmarks
///
/// Reloads the favorites from the store; the result becomes the list that
/// DELETE operates on.
#[tracing::instrument(skip(global))]
async fn get_bookmarks(State(global): State<Arc<Global>>) -> Result<Json<FeedPage>, ApiError> {
    let query = ArticleQuery::new()
        .favorites_only()
        .newest_first(SortField::PublishedAt);

    let articles = global
        .store
        .fetch_articles(&query)
        .await
        .map_err(|e| ApiError::upstream("failed to fetch bookmarks", &e))?;

    let page = FeedPage::bookmarks(&articles);
    global.bookmarks.lock().await.replace(articles);

    Ok(Json(page))
}

/// DELETE /api/bookmarks/:id
#[tracing::instrument(skip(global))]
async fn delete_bookmark(
    State(global): State<Arc<Global>>,
    Path(id): Path<String>,
) -> Result<Json<FeedPage>, ApiError> {
    let id = ArticleId::new(id);

    remove_favorite(&global.bookmarks, global.store.as_ref(), &id).await?;

    let board = global.bookmarks.lock().await;
    Ok(Json(FeedPage::bookmarks(board.articles())))
}
