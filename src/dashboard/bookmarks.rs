use tokio::sync::Mutex;

use crate::store::{ArticleQuery, ArticleStore, StoreError};
use crate::types::{Article, ArticleId};

#[derive(Debug, thiserror::Error)]
pub enum BookmarkError {
    #[error("article {0} is not bookmarked")]
    NotBookmarked(ArticleId),
    #[error("failed to clear favorite on article {id}: {source}")]
    Store {
        id: ArticleId,
        #[source]
        source: StoreError,
    },
}

/// The bookmarks list of one view load.
#[derive(Debug, Default)]
pub struct BookmarkBoard {
    articles: Vec<Article>,
    // Load position of each article, kept in step with `articles`.
    ranks: Vec<usize>,
}

/// An article taken off the board whose remote update is still pending.
#[derive(Debug)]
pub struct PendingRemoval {
    rank: usize,
    article: Article,
}

impl PendingRemoval {
    pub fn article(&self) -> &Article {
        &self.article
    }

    pub fn into_article(self) -> Article {
        self.article
    }
}

impl BookmarkBoard {
    pub fn new(articles: Vec<Article>) -> Self {
        let ranks = (0..articles.len()).collect();
        Self { articles, ranks }
    }

    pub fn articles(&self) -> &[Article] {
        &self.articles
    }

    pub fn len(&self) -> usize {
        self.articles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.articles.is_empty()
    }

    /// Swaps in a freshly fetched list.
    pub fn replace(&mut self, articles: Vec<Article>) {
        *self = Self::new(articles);
    }

    /// Removes `id` from the board right away.
    pub fn begin_removal(&mut self, id: &ArticleId) -> Option<PendingRemoval> {
        let index = self.articles.iter().position(|a| &a.id == id)?;
        let article = self.articles.remove(index);
        let rank = self.ranks.remove(index);
        Some(PendingRemoval { rank, article })
    }

    /// Puts a removed article back ahead of the first entry that was loaded
    /// after it, so overlapping rollbacks keep the load order. An id that is
    /// already present again is left alone.
    pub fn restore(&mut self, pending: PendingRemoval) {
        if self.articles.iter().any(|a| a.id == pending.article.id) {
            return;
        }
        let index = self
            .ranks
            .iter()
            .position(|&rank| rank > pending.rank)
            .unwrap_or(self.articles.len());
        self.articles.insert(index, pending.article);
        self.ranks.insert(index, pending.rank);
    }
}

/// Takes `id` off the board and clears its favorite flag in the store.
///
/// The board changes before the store is called and the lock is released
/// while the request is in flight. If the store rejects the update the
/// article is put back and the error returned. Ids missing from the board
/// are looked up in the store, so favorites added since the last reload can
/// still be removed.
#[tracing::instrument(skip(board, store))]
pub async fn remove_favorite(
    board: &Mutex<BookmarkBoard>,
    store: &dyn ArticleStore,
    id: &ArticleId,
) -> Result<Article, BookmarkError> {
    let taken = board.lock().await.begin_removal(id);
    let Some(pending) = taken else {
        return remove_unlisted(store, id).await;
    };

    match store.set_favorite(id, false).await {
        Ok(()) => {
            tracing::info!("bookmark removed");
            Ok(pending.into_article())
        }
        Err(source) => {
            tracing::warn!(error = %source, "favorite update failed, bookmark rolled back");
            board.lock().await.restore(pending);
            Err(BookmarkError::Store {
                id: id.clone(),
                source,
            })
        }
    }
}

async fn remove_unlisted(store: &dyn ArticleStore, id: &ArticleId) -> Result<Article, BookmarkError> {
    let store_error = |source: StoreError| BookmarkError::Store {
        id: id.clone(),
        source,
    };

    let query = ArticleQuery::new().favorites_only().with_id(id.clone());
    let article = store
        .fetch_articles(&query)
        .await
        .map_err(store_error)?
        .into_iter()
        .next()
        .ok_or_else(|| BookmarkError::NotBookmarked(id.clone()))?;

    store.set_favorite(id, false).await.map_err(|source| {
        tracing::warn!(error = %source, "favorite update failed");
        store_error(source)
    })?;

    tracing::info!("bookmark removed, was not on the board");
    Ok(article)
}
