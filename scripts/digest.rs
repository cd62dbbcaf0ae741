//! Prints the daily tech insights feed in the terminal.
//!
//! Loads the same layered config as the API, fetches today's articles from the
//! store and prints them as text cards in display order. With `--bookmarks` it
//! prints the saved articles instead.
//!
//! Run with: cargo run --bin digest
//!           cargo run --bin digest -- --bookmarks

use chrono::FixedOffset;
use tech_insights::config::Config;
use tech_insights::dashboard::{build_daily_digest, ArticleCard, FeedPage};
use tech_insights::store::{ArticleQuery, ArticleStore, SortField, SupabaseStore};
use tracing_subscriber::EnvFilter;

const SUMMARY_WIDTH: usize = 160;

fn print_page(page: &FeedPage, offset: FixedOffset) {
    match page.date {
        Some(date) => println!("{} | {} | {} Updates", page.heading, date, page.count),
        None => println!("{} | {} Bookmarks", page.heading, page.count),
    }
    if page.skipped > 0 {
        println!("({} articles without a creation time were skipped)", page.skipped);
    }
    println!();

    if page.cards.is_empty() {
        println!("  nothing here yet");
        return;
    }

    for card in &page.cards {
        print_card(card, offset);
    }
}

fn print_card(card: &ArticleCard, offset: FixedOffset) {
    let published = card
        .published_at
        .map(|t| t.with_timezone(&offset).format("%Y-%m-%d %H:%M").to_string())
        .unwrap_or_else(|| "-".to_string());

    println!(
        "[{:<2}] {}  {}{}",
        card.style.icon,
        card.source_name.as_deref().unwrap_or("unknown source"),
        published,
        if card.is_favorite { "  *" } else { "" }
    );
    println!("     {}", card.title);

    let summary: String = card.summary.chars().take(SUMMARY_WIDTH).collect();
    if !summary.is_empty() {
        let ellipsis = if card.summary.chars().count() > SUMMARY_WIDTH { "..." } else { "" };
        println!("     {summary}{ellipsis}");
    }
    println!("     id: {}", card.id);
    println!();
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_target(false)
        .with_env_filter(EnvFilter::new("warn"))
        .compact()
        .init();

    let bookmarks = std::env::args().skip(1).any(|arg| arg == "--bookmarks");

    let config = Config::load()?;
    let offset = config.dashboard.offset()?;
    let store = SupabaseStore::new(&config.store)?;

    let page = if bookmarks {
        let articles = store
            .fetch_articles(
                &ArticleQuery::new()
                    .favorites_only()
                    .newest_first(SortField::PublishedAt),
            )
            .await?;
        FeedPage::bookmarks(&articles)
    } else {
        let articles = store
            .fetch_articles(
                &ArticleQuery::new()
                    .newest_first(SortField::CreatedAt)
                    .limit(config.store.fetch_limit),
            )
            .await?;
        FeedPage::daily(&build_daily_digest(articles, chrono::Utc::now(), offset))
    };

    print_page(&page, offset);

    Ok(())
}
