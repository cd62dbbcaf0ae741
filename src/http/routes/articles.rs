use std::sync::Arc;

use axum::extract::{Path, State};
use axum::routing::{get, post};
use axum::{Json, Router};

use crate::dashboard::{build_daily_digest, ArticleDetail, FeedPage};
use crate::global::Global;
use crate::http::error::{ApiError, ApiErrorCode};
use crate::store::{ArticleQuery, SortField};
use crate::types::ArticleId;

pub fn routes() -> Router<Arc<Global>> {
    Router::new()
        .route("/articles/today", get(get_today))
        .route("/articles/:id", get(get_article))
        .route("/articles/:id/favorite", post(add_favorite))
}

/// GET /api/articles/today
///
/// Articles created today in the display offset, best sources first.
#[tracing::instrument(skip(global))]
async fn get_today(State(global): State<Arc<Global>>) -> Result<Json<FeedPage>, ApiError> {
    let query = ArticleQuery::new()
        .newest_first(SortField::CreatedAt)
        .limit(global.config.store.fetch_limit);

    let articles = global
        .store
        .fetch_articles(&query)
        .await
        .map_err(|e| ApiError::upstream("failed to fetch articles", &e))?;

    let digest = build_daily_digest(articles, chrono::Utc::now(), global.display_offset);

    tracing::debug!(count = digest.articles.len(), skipped = digest.skipped, "daily digest built");

    Ok(Json(FeedPage::daily(&digest)))
}

/// GET /api/articles/:id
#[tracing::instrument(skip(global))]
async fn get_article(
    State(global): State<Arc<Global>>,
    Path(id): Path<String>,
) -> Result<Json<ArticleDetail>, ApiError> {
    let query = ArticleQuery::new().with_id(ArticleId::new(id.as_str()));

    let articles = global
        .store
        .fetch_articles(&query)
        .await
        .map_err(|e| ApiError::upstream("failed to fetch article", &e))?;

    let article = articles
        .first()
        .ok_or_else(|| ApiError::not_found(ApiErrorCode::ARTICLE_NOT_FOUND, format!("article {id} not found")))?;

    Ok(Json(ArticleDetail::from(article)))
}

#[derive(serde::Serialize)]
struct FavoriteResponse {
    id: ArticleId,
    is_favorite: bool,
}

/// POST /api/articles/:id/favorite
#[tracing::instrument(skip(global))]
async fn add_favorite(
    State(global): State<Arc<Global>>,
    Path(id): Path<String>,
) -> Result<Json<FavoriteResponse>, ApiError> {
    let id = ArticleId::new(id);

    global
        .store
        .set_favorite(&id, true)
        .await
        .map_err(|e| ApiError::upstream("failed to update favorite", &e))?;

    Ok(Json(FavoriteResponse {
        id,
        is_favorite: true,
    }))
}
