use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;

use super::style::{self, SourceStyle};
use crate::types::{Article, ArticleId};

pub const FEED_HEADING: &str = "Daily Tech Insights";
pub const BOOKMARKS_HEADING: &str = "Saved Articles";

#[derive(Debug, Clone, Serialize)]
pub struct ArticleCard {
    pub id: ArticleId,
    pub title: String,
    pub summary: String,
    pub source_name: Option<String>,
    pub published_at: Option<DateTime<Utc>>,
    pub is_favorite: bool,
    pub style: SourceStyle,
}

impl From<&Article> for ArticleCard {
    fn from(article: &Article) -> Self {
        Self {
            id: article.id.clone(),
            title: article.title.clone(),
            summary: article.summary.clone(),
            source_name: article.source_name.clone(),
            published_at: article.published_at,
            is_favorite: article.is_favorite,
            style: style::resolve(article.source_name()),
        }
    }
}

/// Payload of the detail overlay.
#[derive(Debug, Clone, Serialize)]
pub struct ArticleDetail {
    #[serde(flatten)]
    pub card: ArticleCard,
    pub url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub insight: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub example: Option<String>,
    pub glossary: Vec<String>,
}

impl From<&Article> for ArticleDetail {
    fn from(article: &Article) -> Self {
        Self {
            card: ArticleCard::from(article),
            url: article.url.clone(),
            insight: non_empty(article.insight.as_deref()),
            example: non_empty(article.example.as_deref()),
            glossary: article
                .explanation_terms
                .iter()
                .map(|term| glossary_term(term))
                .filter(|term| !term.is_empty())
                .map(str::to_string)
                .collect(),
        }
    }
}

fn non_empty(text: Option<&str>) -> Option<String> {
    text.filter(|t| !t.is_empty()).map(str::to_string)
}

/// Drops list markers the generator sometimes leaves in front of a term.
pub fn glossary_term(raw: &str) -> &str {
    raw.trim_start_matches(|c: char| c.is_whitespace() || matches!(c, '・' | '-' | '*'))
}

/// A card grid with its header line.
#[derive(Debug, Clone, Serialize)]
pub struct FeedPage {
    pub heading: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<NaiveDate>,
    pub count: usize,
    pub skipped: usize,
    pub cards: Vec<ArticleCard>,
}

impl FeedPage {
    pub fn daily(digest: &super::DailyDigest) -> Self {
        Self {
            heading: FEED_HEADING,
            date: Some(digest.date),
            count: digest.articles.len(),
            skipped: digest.skipped,
            cards: digest.articles.iter().map(ArticleCard::from).collect(),
        }
    }

    pub fn bookmarks(articles: &[Article]) -> Self {
        Self {
            heading: BOOKMARKS_HEADING,
            date: None,
            count: articles.len(),
            skipped: 0,
            cards: articles.iter().map(ArticleCard::from).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::fake::article;

    #[test]
    fn glossary_markers_are_stripped() {
        assert_eq!(glossary_term("・RAG: retrieval augmented generation"), "RAG: retrieval augmented generation");
        assert_eq!(glossary_term("  - * LLM"), "LLM");
        assert_eq!(glossary_term("\u{3000}・MCP"), "MCP");
        assert_eq!(glossary_term("A-B testing"), "A-B testing");
    }

    #[test]
    fn detail_omits_empty_commentary() {
        let article = Article {
            insight: Some(String::new()),
            example: Some("Use it for code review".to_string()),
            explanation_terms: vec!["・Agent".to_string(), " - ".to_string(), "Token".to_string()],
            ..article("1", Some("OpenAI Blog"))
        };

        let detail = ArticleDetail::from(&article);
        assert_eq!(detail.insight, None);
        assert_eq!(detail.example.as_deref(), Some("Use it for code review"));
        assert_eq!(detail.glossary, ["Agent", "Token"]);
        assert_eq!(detail.card.style.icon, "O");

        let json = serde_json::to_value(&detail).unwrap();
        assert!(json.get("insight").is_none());
        assert_eq!(json["url"], "https://example.com/1");
        assert_eq!(json["id"], "1");
        assert_eq!(json["style"]["icon"], "O");
    }

    #[test]
    fn bookmarks_page_has_no_date() {
        let page = FeedPage::bookmarks(&[article("a", None), article("b", Some("Qiita Trends"))]);
        assert_eq!(page.heading, BOOKMARKS_HEADING);
        assert_eq!(page.count, 2);
        assert_eq!(page.cards[0].style.icon, "?");
        assert_eq!(page.cards[1].style.icon, "Qi");

        let json = serde_json::to_value(&page).unwrap();
        assert!(json.get("date").is_none());
    }
}
