use std::sync::atomic::{AtomicBool, Ordering as AtomicOrdering};
use std::sync::Mutex;

use async_trait::async_trait;

use super::{ArticleQuery, ArticleStore, SortField, StoreError};
use crate::types::{Article, ArticleId};

/// In-memory store used by the unit and router tests.
#[derive(Default)]
pub(crate) struct FakeStore {
    articles: Mutex<Vec<Article>>,
    updates: Mutex<Vec<(ArticleId, bool)>>,
    fail_fetch: AtomicBool,
    fail_updates: AtomicBool,
}

impl FakeStore {
    pub(crate) fn with_articles(articles: Vec<Article>) -> Self {
        Self {
            articles: Mutex::new(articles),
            ..Self::default()
        }
    }

    pub(crate) fn fail_fetch(&self) {
        self.fail_fetch.store(true, AtomicOrdering::SeqCst);
    }

    pub(crate) fn fail_updates(&self) {
        self.fail_updates.store(true, AtomicOrdering::SeqCst);
    }

    pub(crate) fn updates(&self) -> Vec<(ArticleId, bool)> {
        self.updates.lock().unwrap().clone()
    }

    pub(crate) fn is_favorite(&self, id: &str) -> Option<bool> {
        self.articles
            .lock()
            .unwrap()
            .iter()
            .find(|a| a.id.as_str() == id)
            .map(|a| a.is_favorite)
    }
}

fn unavailable() -> StoreError {
    StoreError::Status {
        status: reqwest::StatusCode::SERVICE_UNAVAILABLE,
        body: "store offline".to_string(),
    }
}

#[async_trait]
impl ArticleStore for FakeStore {
    async fn fetch_articles(&self, query: &ArticleQuery) -> Result<Vec<Article>, StoreError> {
        if self.fail_fetch.load(AtomicOrdering::SeqCst) {
            return Err(unavailable());
        }

        let mut rows: Vec<Article> = self
            .articles
            .lock()
            .unwrap()
            .iter()
            .filter(|a| query.favorite.map_or(true, |f| a.is_favorite == f))
            .filter(|a| query.id.as_ref().map_or(true, |id| &a.id == id))
            .cloned()
            .collect();

        if let Some(order) = query.order {
            rows.sort_by_key(|a| match order.field {
                SortField::CreatedAt => a.created_at,
                SortField::PublishedAt => a.published_at,
            });
            if order.descending {
                rows.reverse();
            }
        }
        if let Some(limit) = query.limit {
            rows.truncate(limit as usize);
        }

        Ok(rows)
    }

    async fn set_favorite(&self, id: &ArticleId, favorite: bool) -> Result<(), StoreError> {
        self.updates.lock().unwrap().push((id.clone(), favorite));

        if self.fail_updates.load(AtomicOrdering::SeqCst) {
            return Err(unavailable());
        }

        let mut articles = self.articles.lock().unwrap();
        let article = articles
            .iter_mut()
            .find(|a| &a.id == id)
            .ok_or_else(|| StoreError::NotFound(id.clone()))?;
        article.is_favorite = favorite;
        Ok(())
    }
}

/// Builds a minimal article for tests.
pub(crate) fn article(id: &str, source: Option<&str>) -> Article {
    Article {
        id: ArticleId::new(id),
        title: format!("title {id}"),
        url: format!("https://example.com/{id}"),
        summary: format!("summary {id}"),
        published_at: None,
        created_at: None,
        source_name: source.map(str::to_string),
        insight: None,
        example: None,
        explanation_terms: Vec::new(),
        is_favorite: false,
    }
}
