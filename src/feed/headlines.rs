use super::types::Article;
use super::NewsSource;
use crate::fetch::{self, FetchError};
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;

/// Top-headlines API: `{ "articles": [...] }` with flat records and a nested
/// `source.name` label.
pub struct Headlines {
    base_url: String,
    api_key: String,
    country: String,
}

#[derive(Debug, Deserialize)]
pub struct HeadlinesResponse {
    #[serde(default)]
    pub articles: Vec<RawHeadline>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawHeadline {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub author: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub url_to_image: Option<String>,
    #[serde(default)]
    pub source: Option<RawHeadlineSource>,
    #[serde(default)]
    pub published_at: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct RawHeadlineSource {
    #[serde(default)]
    pub name: Option<String>,
}

/// Map the raw response into normalized articles, preserving input order.
pub fn normalize(resp: HeadlinesResponse) -> Vec<Article> {
    resp.articles
        .into_iter()
        .map(|raw| Article {
            title: raw.title.unwrap_or_default(),
            author: raw.author.unwrap_or_default(),
            url: raw.url.unwrap_or_default(),
            image_url: raw.url_to_image.unwrap_or_default(),
            source: raw.source.and_then(|s| s.name).unwrap_or_default(),
            published_at: raw.published_at.unwrap_or_default(),
            summary: raw.description.unwrap_or_default(),
        })
        .collect()
}

impl Headlines {
    pub fn new(base_url: &str, api_key: String, country: &str) -> Self {
        Self {
            base_url: base_url.to_string(),
            api_key,
            country: country.to_string(),
        }
    }
}

#[async_trait]
impl NewsSource for Headlines {
    fn label(&self) -> &str {
        "headlines"
    }

    async fn fetch(&self, client: &Client) -> Result<Vec<Article>, FetchError> {
        let req = client
            .get(&self.base_url)
            .query(&[("country", self.country.as_str()), ("apiKey", self.api_key.as_str())]);
        let resp: HeadlinesResponse = fetch::get_json(req).await?;
        Ok(normalize(resp))
    }
}
