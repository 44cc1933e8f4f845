use super::types::Article;
use super::NewsSource;
use crate::fetch::{self, FetchError};
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;

/// Link-aggregator API: a listing wrapped in `data.children`, each child
/// wrapping the post under its own `data` key. The grouping label
/// (`subreddit_name_prefixed`) doubles as the source and the summary, and
/// `created` is epoch seconds rather than a timestamp string.
pub struct Aggregator {
    base_url: String,
}

#[derive(Debug, Deserialize)]
pub struct ListingResponse {
    #[serde(default)]
    pub data: Listing,
}

#[derive(Debug, Deserialize, Default)]
pub struct Listing {
    #[serde(default)]
    pub children: Vec<ListingChild>,
}

#[derive(Debug, Deserialize)]
pub struct ListingChild {
    #[serde(default)]
    pub data: RawPost,
}

#[derive(Debug, Deserialize, Default)]
pub struct RawPost {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub author: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub thumbnail: Option<String>,
    #[serde(default)]
    pub subreddit_name_prefixed: Option<String>,
    #[serde(default)]
    pub created: Option<f64>,
}

/// Render epoch seconds as a UTC timestamp string, so `published_at` has one
/// shape across all slots. Unparseable or missing values map to empty.
fn format_epoch(created: Option<f64>) -> String {
    created
        .and_then(|secs| chrono::DateTime::from_timestamp(secs as i64, 0))
        .map(|dt| dt.format("%Y-%m-%dT%H:%M:%SZ").to_string())
        .unwrap_or_default()
}

/// Map the raw listing into normalized articles, preserving input order.
pub fn normalize(resp: ListingResponse) -> Vec<Article> {
    resp.data
        .children
        .into_iter()
        .map(|child| {
            let post = child.data;
            let group = post.subreddit_name_prefixed.unwrap_or_default();
            Article {
                title: post.title.unwrap_or_default(),
                author: post.author.unwrap_or_default(),
                url: post.url.unwrap_or_default(),
                image_url: post.thumbnail.unwrap_or_default(),
                source: group.clone(),
                published_at: format_epoch(post.created),
                summary: group,
            }
        })
        .collect()
}

impl Aggregator {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.to_string(),
        }
    }
}

#[async_trait]
impl NewsSource for Aggregator {
    fn label(&self) -> &str {
        "aggregator"
    }

    async fn fetch(&self, client: &Client) -> Result<Vec<Article>, FetchError> {
        let resp: ListingResponse = fetch::get_json(client.get(&self.base_url)).await?;
        Ok(normalize(resp))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"{
        "kind": "Listing",
        "data": {
            "children": [
                {
                    "kind": "t3",
                    "data": {
                        "title": "Telescope spots new comet",
                        "author": "stargazer",
                        "url": "https://example.com/comet",
                        "thumbnail": "https://example.com/comet-thumb.jpg",
                        "subreddit_name_prefixed": "r/space",
                        "created": 1700000000.0
                    }
                },
                {
                    "kind": "t3",
                    "data": {
                        "title": "Untitled post"
                    }
                }
            ]
        }
    }"#;

    #[test]
    fn test_normalize_maps_all_fields() {
        let resp: ListingResponse = serde_json::from_str(SAMPLE).unwrap();
        let articles = normalize(resp);
        assert_eq!(articles.len(), 2);

        let first = &articles[0];
        assert_eq!(first.title, "Telescope spots new comet");
        assert_eq!(first.author, "stargazer");
        assert_eq!(first.url, "https://example.com/comet");
        assert_eq!(first.image_url, "https://example.com/comet-thumb.jpg");
        assert_eq!(first.source, "r/space");
        assert_eq!(first.published_at, "2023-11-14T22:13:20Z");
        // the grouping label doubles as the summary for this slot
        assert_eq!(first.summary, "r/space");
    }

    #[test]
    fn test_missing_fields_become_empty_strings() {
        let resp: ListingResponse = serde_json::from_str(SAMPLE).unwrap();
        let articles = normalize(resp);
        let second = &articles[1];
        assert_eq!(second.title, "Untitled post");
        assert_eq!(second.author, "");
        assert_eq!(second.source, "");
        assert_eq!(second.published_at, "");
        assert_eq!(second.summary, "");
    }

    #[test]
    fn test_format_epoch() {
        assert_eq!(format_epoch(Some(1700000000.0)), "2023-11-14T22:13:20Z");
        assert_eq!(format_epoch(None), "");
    }

    #[test]
    fn test_empty_listing() {
        let resp: ListingResponse = serde_json::from_str(r#"{"kind": "Listing"}"#).unwrap();
        assert!(normalize(resp).is_empty());
    }
}
