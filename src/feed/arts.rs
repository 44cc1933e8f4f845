use super::types::Article;
use super::NewsSource;
use crate::fetch::{self, FetchError};
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;

/// Arts-desk API: `{ "results": [...] }` with a `byline` for the author, a
/// `section` label, and images nested in a `multimedia` array that may be
/// empty or absent.
pub struct ArtsDesk {
    base_url: String,
    api_key: String,
}

#[derive(Debug, Deserialize)]
pub struct TopStoriesResponse {
    #[serde(default)]
    pub results: Vec<RawStory>,
}

#[derive(Debug, Deserialize)]
pub struct RawStory {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub byline: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub multimedia: Option<Vec<RawMultimedia>>,
    #[serde(default)]
    pub section: Option<String>,
    #[serde(default)]
    pub created_date: Option<String>,
    #[serde(default, rename = "abstract")]
    pub summary: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct RawMultimedia {
    #[serde(default)]
    pub url: Option<String>,
}

/// Map the raw response into normalized articles, preserving input order.
/// The image is the first multimedia entry's url; an empty or absent array
/// maps to an empty string rather than an out-of-bounds access.
pub fn normalize(resp: TopStoriesResponse) -> Vec<Article> {
    resp.results
        .into_iter()
        .map(|raw| {
            let image_url = raw
                .multimedia
                .unwrap_or_default()
                .into_iter()
                .next()
                .and_then(|m| m.url)
                .unwrap_or_default();
            Article {
                title: raw.title.unwrap_or_default(),
                author: raw.byline.unwrap_or_default(),
                url: raw.url.unwrap_or_default(),
                image_url,
                source: raw.section.unwrap_or_default(),
                published_at: raw.created_date.unwrap_or_default(),
                summary: raw.summary.unwrap_or_default(),
            }
        })
        .collect()
}

impl ArtsDesk {
    pub fn new(base_url: &str, api_key: String) -> Self {
        Self {
            base_url: base_url.to_string(),
            api_key,
        }
    }
}

#[async_trait]
impl NewsSource for ArtsDesk {
    fn label(&self) -> &str {
        "arts"
    }

    async fn fetch(&self, client: &Client) -> Result<Vec<Article>, FetchError> {
        let req = client
            .get(&self.base_url)
            .query(&[("api-key", self.api_key.as_str())]);
        let resp: TopStoriesResponse = fetch::get_json(req).await?;
        Ok(normalize(resp))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"{
        "status": "OK",
        "results": [
            {
                "section": "arts",
                "title": "Gallery reopens downtown",
                "abstract": "After two years of renovation, the gallery reopens.",
                "url": "https://example.com/gallery",
                "byline": "By Maria Chen",
                "created_date": "2021-02-04T12:00:00-05:00",
                "multimedia": [
                    {"url": "https://example.com/gallery-large.jpg", "format": "superJumbo"},
                    {"url": "https://example.com/gallery-small.jpg", "format": "thumbLarge"}
                ]
            },
            {
                "section": "arts",
                "title": "Quartet tours midwest",
                "url": "https://example.com/quartet",
                "multimedia": []
            }
        ]
    }"#;

    #[test]
    fn test_normalize_maps_all_fields() {
        let resp: TopStoriesResponse = serde_json::from_str(SAMPLE).unwrap();
        let articles = normalize(resp);
        assert_eq!(articles.len(), 2);

        let first = &articles[0];
        assert_eq!(first.title, "Gallery reopens downtown");
        assert_eq!(first.author, "By Maria Chen");
        assert_eq!(first.url, "https://example.com/gallery");
        assert_eq!(first.image_url, "https://example.com/gallery-large.jpg");
        assert_eq!(first.source, "arts");
        assert_eq!(first.published_at, "2021-02-04T12:00:00-05:00");
        assert_eq!(first.summary, "After two years of renovation, the gallery reopens.");
    }

    #[test]
    fn test_empty_multimedia_maps_to_empty_image() {
        let resp: TopStoriesResponse = serde_json::from_str(SAMPLE).unwrap();
        let articles = normalize(resp);
        let second = &articles[1];
        assert_eq!(second.image_url, "");
        assert_eq!(second.author, "");
        assert_eq!(second.summary, "");
    }

    #[test]
    fn test_null_multimedia_maps_to_empty_image() {
        let json = r#"{"results": [{"title": "No art", "multimedia": null}]}"#;
        let resp: TopStoriesResponse = serde_json::from_str(json).unwrap();
        let articles = normalize(resp);
        assert_eq!(articles[0].image_url, "");
    }
}
