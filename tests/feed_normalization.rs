// Integration tests for the three-slot feed normalization

#[cfg(test)]
mod tests {
    use daybrief::feed::types::Article;
    use daybrief::feed::{aggregator, arts, headlines};

    const HEADLINES_SAMPLE: &str = r#"{
        "status": "ok",
        "articles": [
            {
                "source": {"id": "wire", "name": "Wire Service"},
                "author": "A. Reporter",
                "title": "Headline One",
                "description": "First summary.",
                "url": "https://example.com/one",
                "urlToImage": "https://example.com/one.jpg",
                "publishedAt": "2021-02-05T10:00:00Z"
            },
            {
                "source": {"name": "Wire Service"},
                "author": "B. Reporter",
                "title": "Headline Two",
                "description": "Second summary.",
                "url": "https://example.com/two",
                "urlToImage": "https://example.com/two.jpg",
                "publishedAt": "2021-02-05T11:00:00Z"
            }
        ]
    }"#;

    const AGGREGATOR_SAMPLE: &str = r#"{
        "kind": "Listing",
        "data": {
            "children": [
                {"data": {
                    "title": "Post One",
                    "author": "poster1",
                    "url": "https://example.com/p1",
                    "thumbnail": "https://example.com/p1.jpg",
                    "subreddit_name_prefixed": "r/news",
                    "created": 1700000000.0
                }},
                {"data": {
                    "title": "Post Two",
                    "author": "poster2",
                    "url": "https://example.com/p2",
                    "thumbnail": "self",
                    "subreddit_name_prefixed": "r/upliftingnews",
                    "created": 1700000100.0
                }}
            ]
        }
    }"#;

    const ARTS_SAMPLE: &str = r#"{
        "status": "OK",
        "results": [
            {
                "section": "arts",
                "title": "Story One",
                "abstract": "An opening.",
                "url": "https://example.com/s1",
                "byline": "By C. Critic",
                "created_date": "2021-02-04T12:00:00-05:00",
                "multimedia": [{"url": "https://example.com/s1.jpg"}]
            },
            {
                "section": "arts",
                "title": "Story Two",
                "abstract": "A closing.",
                "url": "https://example.com/s2",
                "byline": "By D. Critic",
                "created_date": "2021-02-04T13:00:00-05:00",
                "multimedia": []
            }
        ]
    }"#;

    fn normalize_all() -> Vec<Article> {
        let slot0 = headlines::normalize(serde_json::from_str(HEADLINES_SAMPLE).unwrap());
        let slot1 = aggregator::normalize(serde_json::from_str(AGGREGATOR_SAMPLE).unwrap());
        let slot2 = arts::normalize(serde_json::from_str(ARTS_SAMPLE).unwrap());

        let mut all = Vec::new();
        all.extend(slot0);
        all.extend(slot1);
        all.extend(slot2);
        all
    }

    #[test]
    fn test_slot_order_and_within_slot_order_preserved() {
        let all = normalize_all();
        let titles: Vec<&str> = all.iter().map(|a| a.title.as_str()).collect();
        assert_eq!(
            titles,
            vec![
                "Headline One",
                "Headline Two",
                "Post One",
                "Post Two",
                "Story One",
                "Story Two",
            ]
        );
    }

    #[test]
    fn test_each_slot_maps_its_own_schema() {
        let all = normalize_all();

        // slot 0: nested source.name, urlToImage, description
        assert_eq!(all[0].source, "Wire Service");
        assert_eq!(all[0].image_url, "https://example.com/one.jpg");
        assert_eq!(all[0].summary, "First summary.");

        // slot 1: grouping label doubles as source and summary, epoch timestamp
        assert_eq!(all[2].source, "r/news");
        assert_eq!(all[2].summary, "r/news");
        assert_eq!(all[2].published_at, "2023-11-14T22:13:20Z");

        // slot 2: byline, section, first multimedia url
        assert_eq!(all[4].author, "By C. Critic");
        assert_eq!(all[4].source, "arts");
        assert_eq!(all[4].image_url, "https://example.com/s1.jpg");
        assert_eq!(all[5].image_url, "");
    }

    #[test]
    fn test_malformed_slot_contributes_nothing_but_fails_alone() {
        // slot 1 body isn't the listing shape; slots 0 and 2 still normalize
        let slot0 = headlines::normalize(serde_json::from_str(HEADLINES_SAMPLE).unwrap());
        let slot1: Result<aggregator::ListingResponse, _> = serde_json::from_str("[1, 2, 3]");
        let slot2 = arts::normalize(serde_json::from_str(ARTS_SAMPLE).unwrap());

        assert!(slot1.is_err());
        assert_eq!(slot0.len(), 2);
        assert_eq!(slot2.len(), 2);
    }
}
