use crate::fetch::FetchError;

/// Normalized article record (provider-agnostic). Every field is best-effort:
/// a missing or null upstream field becomes an empty string, never a fault.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Article {
    pub title: String,
    pub author: String,
    pub url: String,
    pub image_url: String,
    pub source: String,
    pub published_at: String,
    pub summary: String,
}

/// Outcome of one source slot's fetch. Slots are joined independently so one
/// provider's outage never blanks the others.
#[derive(Debug)]
pub struct SourceBatch {
    pub label: String,
    pub outcome: Result<Vec<Article>, FetchError>,
}

impl SourceBatch {
    pub fn articles(&self) -> &[Article] {
        match &self.outcome {
            Ok(articles) => articles,
            Err(_) => &[],
        }
    }
}
