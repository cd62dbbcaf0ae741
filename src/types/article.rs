use std::fmt;

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

/// Opaque article identifier.
///
/// The store may hand out text or numeric keys, both are kept as text.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct ArticleId(String);

impl ArticleId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ArticleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ArticleId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl<'de> Deserialize<'de> for ArticleId {
    fn deserialize<D: Deserializer<'de>>(d: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum RawId {
            Text(String),
            Signed(i64),
            Unsigned(u64),
        }

        Ok(match RawId::deserialize(d)? {
            RawId::Text(s) => Self(s),
            RawId::Signed(n) => Self(n.to_string()),
            RawId::Unsigned(n) => Self(n.to_string()),
        })
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct SourceRow {
    pub name: Option<String>,
}

/// Row returned by `select=*,source:sources(name)`.
#[derive(Debug, Clone, Deserialize)]
pub struct ArticleRow {
    pub id: ArticleId,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub summary: Option<String>,
    #[serde(default)]
    pub published_at: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub source: Option<SourceRow>,
    #[serde(default)]
    pub gemini_insight: Option<String>,
    #[serde(default)]
    pub gemini_example: Option<String>,
    #[serde(default)]
    pub gemini_explanation: Option<Vec<String>>,
    #[serde(default)]
    pub is_favorite: Option<bool>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Article {
    pub id: ArticleId,
    pub title: String,
    pub url: String,
    pub summary: String,
    /// `None` when the store sent no value or one that failed to parse.
    pub published_at: Option<DateTime<Utc>>,
    pub created_at: Option<DateTime<Utc>>,
    pub source_name: Option<String>,
    pub insight: Option<String>,
    pub example: Option<String>,
    pub explanation_terms: Vec<String>,
    pub is_favorite: bool,
}

impl Article {
    pub fn source_name(&self) -> Option<&str> {
        self.source_name.as_deref()
    }
}

impl From<ArticleRow> for Article {
    fn from(row: ArticleRow) -> Self {
        let published_at = parse_column(&row.id, "published_at", row.published_at.as_deref());
        let created_at = parse_column(&row.id, "created_at", row.created_at.as_deref());

        Self {
            id: row.id,
            title: row.title.unwrap_or_default(),
            url: row.url.unwrap_or_default(),
            summary: row.summary.unwrap_or_default(),
            published_at,
            created_at,
            source_name: row.source.and_then(|s| s.name),
            insight: row.gemini_insight,
            example: row.gemini_example,
            explanation_terms: row.gemini_explanation.unwrap_or_default(),
            is_favorite: row.is_favorite.unwrap_or(false),
        }
    }
}

fn parse_column(id: &ArticleId, column: &'static str, raw: Option<&str>) -> Option<DateTime<Utc>> {
    let raw = raw?;
    let parsed = parse_timestamp(raw);
    if parsed.is_none() {
        tracing::warn!(article_id = %id, column, value = raw, "unparseable timestamp");
    }
    parsed
}

/// Parses a store timestamp. Values without an offset are read as UTC.
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }

    ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"]
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
        .map(|naive| naive.and_utc())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn id_accepts_text_and_any_integer_width() {
        let rows: Vec<ArticleRow> = serde_json::from_str(
            r#"[{"id": "uuid-1"}, {"id": -7}, {"id": 18446744073709551615}]"#,
        )
        .unwrap();

        let ids: Vec<&str> = rows.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, ["uuid-1", "-7", "18446744073709551615"]);
    }

    #[test]
    fn decodes_joined_row() {
        let row: ArticleRow = serde_json::from_value(serde_json::json!({
            "id": 42,
            "title": "Gemini 2.0",
            "url": "https://blog.google/gemini",
            "summary": "New model",
            "published_at": "2024-06-01T10:00:00+00:00",
            "created_at": "2024-06-01T15:30:00.123456+00:00",
            "source": { "name": "Google News" },
            "gemini_insight": "Big deal",
            "gemini_example": null,
            "gemini_explanation": ["・LLM", "- RAG"],
            "is_favorite": true
        }))
        .unwrap();

        let article = Article::from(row);
        assert_eq!(article.id, ArticleId::new("42"));
        assert_eq!(article.source_name(), Some("Google News"));
        assert_eq!(
            article.published_at,
            Some(Utc.with_ymd_and_hms(2024, 6, 1, 10, 0, 0).unwrap())
        );
        assert!(article.created_at.is_some());
        assert_eq!(article.example, None);
        assert_eq!(article.explanation_terms, vec!["・LLM", "- RAG"]);
        assert!(article.is_favorite);
    }

    #[test]
    fn missing_fields_degrade() {
        let row: ArticleRow = serde_json::from_value(serde_json::json!({
            "id": "a1",
            "title": null,
            "source": null,
            "published_at": "yesterday-ish"
        }))
        .unwrap();

        let article = Article::from(row);
        assert_eq!(article.title, "");
        assert_eq!(article.source_name(), None);
        assert_eq!(article.published_at, None);
        assert_eq!(article.created_at, None);
        assert!(article.explanation_terms.is_empty());
        assert!(!article.is_favorite);
    }

    #[test]
    fn timestamp_without_offset_is_utc() {
        assert_eq!(
            parse_timestamp("2024-06-01T14:59:00"),
            Some(Utc.with_ymd_and_hms(2024, 6, 1, 14, 59, 0).unwrap())
        );
        assert_eq!(
            parse_timestamp("2024-06-01 14:59:00.5"),
            Some(Utc.with_ymd_and_hms(2024, 6, 1, 14, 59, 0).unwrap() + chrono::Duration::milliseconds(500))
        );
        assert_eq!(
            parse_timestamp("2024-06-02T00:30:00+09:00"),
            Some(Utc.with_ymd_and_hms(2024, 6, 1, 15, 30, 0).unwrap())
        );
        assert_eq!(parse_timestamp(""), None);
    }
}
