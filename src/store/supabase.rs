use anyhow::Context as _;
use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION};
use reqwest::{Client, Response};

use super::{ArticleQuery, ArticleStore, StoreError};
use crate::config::StoreConfig;
use crate::types::{Article, ArticleId, ArticleRow};

/// PostgREST client for the `articles` table of a Supabase project.
pub struct SupabaseStore {
    client: Client,
    articles_url: String,
    select: String,
}

impl SupabaseStore {
    pub fn new(config: &StoreConfig) -> anyhow::Result<Self> {
        let mut api_key = HeaderValue::from_str(&config.api_key).context("store api key")?;
        api_key.set_sensitive(true);
        let mut bearer = HeaderValue::from_str(&format!("Bearer {}", config.api_key))
            .context("store bearer token")?;
        bearer.set_sensitive(true);

        let mut headers = HeaderMap::new();
        headers.insert("apikey", api_key);
        headers.insert(AUTHORIZATION, bearer);

        let client = Client::builder()
            .user_agent(&config.user_agent)
            .default_headers(headers)
            .build()
            .context("http client")?;

        Ok(Self {
            client,
            articles_url: format!(
                "{}/rest/v1/{}",
                config.url.trim_end_matches('/'),
                config.articles_table
            ),
            select: format!("*,source:{}(name)", config.sources_table),
        })
    }

    fn query_params(&self, query: &ArticleQuery) -> Vec<(&'static str, String)> {
        let mut params = vec![("select", self.select.clone())];

        if let Some(favorite) = query.favorite {
            params.push(("is_favorite", format!("eq.{favorite}")));
        }
        if let Some(id) = &query.id {
            params.push(("id", format!("eq.{id}")));
        }
        if let Some(order) = query.order {
            let direction = if order.descending { "desc" } else { "asc" };
            params.push(("order", format!("{}.{direction}", order.field.column())));
        }
        if let Some(limit) = query.limit {
            params.push(("limit", limit.to_string()));
        }

        params
    }
}

async fn read_body(response: Response) -> Result<String, StoreError> {
    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        return Err(StoreError::Status { status, body });
    }

    Ok(response.text().await?)
}

#[async_trait]
impl ArticleStore for SupabaseStore {
    #[tracing::instrument(skip(self))]
    async fn fetch_articles(&self, query: &ArticleQuery) -> Result<Vec<Article>, StoreError> {
        let response = self
            .client
            .get(&self.articles_url)
            .query(&self.query_params(query))
            .send()
            .await?;

        let body = read_body(response).await?;
        let rows: Vec<ArticleRow> = serde_json::from_str(&body)?;

        tracing::debug!(rows = rows.len(), "fetched articles");
        Ok(rows.into_iter().map(Article::from).collect())
    }

    #[tracing::instrument(skip(self))]
    async fn set_favorite(&self, id: &ArticleId, favorite: bool) -> Result<(), StoreError> {
        let response = self
            .client
            .patch(&self.articles_url)
            .query(&[("id", format!("eq.{id}"))])
            .header("Prefer", "return=representation")
            .json(&serde_json::json!({ "is_favorite": favorite }))
            .send()
            .await?;

        let body = read_body(response).await?;
        let updated: Vec<serde_json::Value> = serde_json::from_str(&body)?;
        if updated.is_empty() {
            return Err(StoreError::NotFound(id.clone()));
        }

        tracing::debug!("favorite flag updated");
        Ok(())
    }
}
