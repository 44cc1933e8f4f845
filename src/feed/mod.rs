pub mod aggregator;
pub mod arts;
pub mod headlines;
pub mod types;

use crate::fetch::FetchError;
use async_trait::async_trait;
use futures_util::future::join_all;
use reqwest::Client;
use types::{Article, SourceBatch};

#[async_trait]
pub trait NewsSource: Send + Sync {
    fn label(&self) -> &str;
    async fn fetch(&self, client: &Client) -> Result<Vec<Article>, FetchError>;
}

/// Fetch every source concurrently and wait for all of them. Results come back
/// in slot order, each slot's success or failure kept independently, so one
/// provider's outage never drops the whole batch.
pub async fn fetch_all(client: &Client, sources: &[Box<dyn NewsSource>]) -> Vec<SourceBatch> {
    let outcomes = join_all(sources.iter().map(|s| s.fetch(client))).await;
    sources
        .iter()
        .zip(outcomes)
        .map(|(source, outcome)| SourceBatch {
            label: source.label().to_string(),
            outcome,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FixedSource {
        label: &'static str,
        titles: Vec<&'static str>,
    }

    struct FailingSource;

    #[async_trait]
    impl NewsSource for FixedSource {
        fn label(&self) -> &str {
            self.label
        }

        async fn fetch(&self, _client: &Client) -> Result<Vec<Article>, FetchError> {
            Ok(self
                .titles
                .iter()
                .map(|t| Article {
                    title: t.to_string(),
                    ..Default::default()
                })
                .collect())
        }
    }

    #[async_trait]
    impl NewsSource for FailingSource {
        fn label(&self) -> &str {
            "failing"
        }

        async fn fetch(&self, _client: &Client) -> Result<Vec<Article>, FetchError> {
            Err(FetchError::RequestFailed {
                status: None,
                message: "connection refused".to_string(),
            })
        }
    }

    #[tokio::test]
    async fn test_fetch_all_preserves_slot_order() {
        let sources: Vec<Box<dyn NewsSource>> = vec![
            Box::new(FixedSource { label: "first", titles: vec!["a1", "a2"] }),
            Box::new(FixedSource { label: "second", titles: vec!["b1"] }),
            Box::new(FixedSource { label: "third", titles: vec!["c1", "c2"] }),
        ];
        let client = Client::new();
        let batches = fetch_all(&client, &sources).await;

        assert_eq!(batches.len(), 3);
        assert_eq!(batches[0].label, "first");
        assert_eq!(batches[1].label, "second");
        assert_eq!(batches[2].label, "third");

        let titles: Vec<&str> = batches
            .iter()
            .flat_map(|b| b.articles().iter().map(|a| a.title.as_str()))
            .collect();
        assert_eq!(titles, vec!["a1", "a2", "b1", "c1", "c2"]);
    }

    #[tokio::test]
    async fn test_one_failing_slot_keeps_the_others() {
        let sources: Vec<Box<dyn NewsSource>> = vec![
            Box::new(FixedSource { label: "first", titles: vec!["a1"] }),
            Box::new(FailingSource),
            Box::new(FixedSource { label: "third", titles: vec!["c1"] }),
        ];
        let client = Client::new();
        let batches = fetch_all(&client, &sources).await;

        assert!(batches[0].outcome.is_ok());
        assert!(batches[1].outcome.is_err());
        assert!(batches[2].outcome.is_ok());
        assert!(batches[1].articles().is_empty());
        assert_eq!(batches[2].articles()[0].title, "c1");
    }
}
