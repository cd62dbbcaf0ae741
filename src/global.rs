use std::sync::Arc;

use anyhow::Context as _;
use chrono::FixedOffset;
use tokio::sync::Mutex;

use crate::config::Config;
use crate::dashboard::BookmarkBoard;
use crate::store::{ArticleStore, SupabaseStore};

pub struct Global {
    pub config: Config,
    pub store: Arc<dyn ArticleStore>,
    /// Bookmarks list of the most recent bookmarks view load.
    pub bookmarks: Mutex<BookmarkBoard>,
    pub display_offset: FixedOffset,
    pub started_at: std::time::Instant,
}

impl Global {
    pub fn init(config: Config) -> anyhow::Result<Arc<Self>> {
        let store = SupabaseStore::new(&config.store).context("article store client")?;

        tracing::info!(url = %config.store.url, "article store configured");

        Self::with_store(config, Arc::new(store))
    }

    pub fn with_store(config: Config, store: Arc<dyn ArticleStore>) -> anyhow::Result<Arc<Self>> {
        let display_offset = config.dashboard.offset().context("display offset")?;

        Ok(Arc::new(Self {
            config,
            store,
            bookmarks: Mutex::new(BookmarkBoard::default()),
            display_offset,
            started_at: std::time::Instant::now(),
        }))
    }
}
