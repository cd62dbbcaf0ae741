use chrono::{DateTime, FixedOffset, NaiveDate, Utc};

use super::priority::sort_for_display;
use crate::types::Article;

/// Articles created on the current local day, ordered for display.
#[derive(Debug, Clone)]
pub struct DailyDigest {
    pub date: NaiveDate,
    pub articles: Vec<Article>,
    /// Records dropped because their creation time was missing or unreadable.
    pub skipped: usize,
}

pub fn local_date(instant: DateTime<Utc>, offset: FixedOffset) -> NaiveDate {
    instant.with_timezone(&offset).date_naive()
}

pub fn is_same_local_day(instant: DateTime<Utc>, now: DateTime<Utc>, offset: FixedOffset) -> bool {
    local_date(instant, offset) == local_date(now, offset)
}

/// Keeps the articles created "today" in `offset` and sorts them with
/// [`sort_for_display`].
pub fn build_daily_digest(
    articles: Vec<Article>,
    now: DateTime<Utc>,
    offset: FixedOffset,
) -> DailyDigest {
    let mut skipped = 0;
    let mut todays: Vec<Article> = articles
        .into_iter()
        .filter(|article| match article.created_at {
            Some(created_at) => is_same_local_day(created_at, now, offset),
            None => {
                tracing::warn!(article_id = %article.id, "article without creation time skipped");
                skipped += 1;
                false
            }
        })
        .collect();

    sort_for_display(&mut todays);

    DailyDigest {
        date: local_date(now, offset),
        articles: todays,
        skipped,
    }
}
