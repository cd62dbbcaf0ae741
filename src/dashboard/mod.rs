//! Dashboard logic: source badges, the daily feed and the bookmarks list.

pub mod bookmarks;
pub mod daily;
pub mod priority;
pub mod style;
pub mod view;

pub use bookmarks::{remove_favorite, BookmarkBoard, BookmarkError};
pub use daily::{build_daily_digest, DailyDigest};
pub use view::{ArticleCard, ArticleDetail, FeedPage};
