use async_trait::async_trait;

use crate::types::{Article, ArticleId};

pub mod supabase;

#[cfg(test)]
pub(crate) mod fake;

pub use supabase::SupabaseStore;

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("article store request failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("article store returned {status}: {body}")]
    Status {
        status: reqwest::StatusCode,
        body: String,
    },
    #[error("failed to decode article store response: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("article {0} not found")]
    NotFound(ArticleId),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortField {
    CreatedAt,
    PublishedAt,
}

impl SortField {
    pub fn column(&self) -> &'static str {
        match self {
            Self::CreatedAt => "created_at",
            Self::PublishedAt => "published_at",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ordering {
    pub field: SortField,
    pub descending: bool,
}

/// Filters understood by [`ArticleStore::fetch_articles`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ArticleQuery {
    pub favorite: Option<bool>,
    pub id: Option<ArticleId>,
    pub order: Option<Ordering>,
    pub limit: Option<u32>,
}

impl ArticleQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn favorites_only(mut self) -> Self {
        self.favorite = Some(true);
        self
    }

    pub fn with_id(mut self, id: ArticleId) -> Self {
        self.id = Some(id);
        self
    }

    pub fn newest_first(mut self, field: SortField) -> Self {
        self.order = Some(Ordering {
            field,
            descending: true,
        });
        self
    }

    pub fn limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }
}

/// The remote article store. Only reads and the favorite flag are touched.
#[async_trait]
pub trait ArticleStore: Send + Sync {
    async fn fetch_articles(&self, query: &ArticleQuery) -> Result<Vec<Article>, StoreError>;

    async fn set_favorite(&self, id: &ArticleId, favorite: bool) -> Result<(), StoreError>;
}
