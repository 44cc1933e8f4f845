use crate::config::{ApiKeys, Config};
use crate::feed::{self, aggregator::Aggregator, arts::ArtsDesk, headlines::Headlines, NewsSource};
use crate::location::geocode::{self, Geocoder};
use crate::location::source as position;
use crate::location::weather::WeatherService;
use crate::tui::state::{AppState, SourceHealth, SourceStatus};
use reqwest::Client;
use tokio::sync::watch;

/// Build the three fixed source slots, in render order: headlines first, then
/// the link aggregator, then the arts desk.
pub fn build_sources(config: &Config, keys: &ApiKeys) -> Vec<Box<dyn NewsSource>> {
    vec![
        Box::new(Headlines::new(
            &config.headlines.base_url,
            keys.headlines.clone(),
            &config.headlines.country,
        )),
        Box::new(Aggregator::new(&config.aggregator.base_url)),
        Box::new(ArtsDesk::new(&config.arts.base_url, keys.arts.clone())),
    ]
}

/// The sequential half of the orchestrator: position, then city, then weather.
/// Each stage needs the prior stage's output; the first failure abandons the
/// rest of the chain. Runs independently of the feed path.
pub async fn run_location_chain(
    client: &Client,
    config: &Config,
    keys: &ApiKeys,
    state_tx: &watch::Sender<AppState>,
) {
    let Some(source) = position::position_source(&config.location) else {
        tracing::warn!("no position source configured; city and weather stay blank");
        state_tx.send_modify(|s| s.push_log("WARN", "geolocation not available".to_string()));
        return;
    };

    let coords = match source.resolve(client).await {
        Ok(coords) => coords,
        Err(e) => {
            tracing::warn!(error = %e, "position lookup failed");
            state_tx.send_modify(|s| s.push_log("WARN", format!("position lookup failed: {}", e)));
            return;
        }
    };

    let geocoder = Geocoder::new(&config.geocoder.base_url, keys.geocoder.clone());
    let city = match geocoder.city_for(client, coords).await {
        Ok(city) => city,
        Err(e) => {
            tracing::warn!(error = %e, "reverse geocode failed");
            state_tx.send_modify(|s| s.push_log("WARN", format!("reverse geocode failed: {}", e)));
            return;
        }
    };

    state_tx.send_modify(|s| {
        s.push_log("INFO", format!("resolved city: {}", city));
        s.wiki_url = Some(geocode::wiki_url(&city));
        s.city = Some(city.clone());
    });

    let weather = WeatherService::new(
        &config.weather.base_url,
        keys.weather.clone(),
        &config.weather.country,
    );
    match weather.temperature_for(client, &city).await {
        Ok(temp) => {
            state_tx.send_modify(|s| {
                s.push_log("INFO", format!("current temperature: {} \u{00b0}F", temp));
                s.temperature_f = Some(temp);
            });
        }
        Err(e) => {
            tracing::warn!(city = city.as_str(), error = %e, "weather lookup failed");
            state_tx.send_modify(|s| s.push_log("WARN", format!("weather lookup failed: {}", e)));
        }
    }
}

/// One feed cycle: fetch every slot concurrently, keep per-slot outcomes, and
/// publish the concatenated articles in slot order. A failed slot contributes
/// a log line and a FAILED status, never an empty screen.
pub async fn run_feed_cycle(
    client: &Client,
    sources: &[Box<dyn NewsSource>],
    state_tx: &watch::Sender<AppState>,
) {
    state_tx.send_modify(|s| {
        s.refreshing = true;
        s.source_status = sources
            .iter()
            .map(|src| SourceStatus {
                label: src.label().to_string(),
                health: SourceHealth::Pending,
            })
            .collect();
    });

    let batches = feed::fetch_all(client, sources).await;

    let mut all = Vec::new();
    let mut statuses = Vec::with_capacity(batches.len());
    for batch in &batches {
        let health = match &batch.outcome {
            Ok(articles) => SourceHealth::Ok(articles.len()),
            Err(e) => {
                tracing::warn!(source = batch.label.as_str(), error = %e, "feed fetch failed");
                SourceHealth::Failed(e.to_string())
            }
        };
        statuses.push(SourceStatus {
            label: batch.label.clone(),
            health,
        });
        all.extend_from_slice(batch.articles());
    }

    let total = all.len();
    let refreshed_at = chrono::Local::now().format("%H:%M:%S").to_string();
    state_tx.send_modify(|s| {
        for status in &statuses {
            if let SourceHealth::Failed(message) = &status.health {
                s.push_log("WARN", format!("{}: {}", status.label, message));
            }
        }
        s.push_log("INFO", format!("feed cycle done: {} articles", total));
        s.set_articles(all);
        s.source_status = statuses;
        s.refreshing = false;
        s.last_refresh = Some(refreshed_at);
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_config() -> Config {
        toml::from_str(
            r#"
            [geocoder]
            base_url = "http://geo.example"
            [weather]
            base_url = "http://weather.example"
            [headlines]
            base_url = "http://news.example"
            [aggregator]
            base_url = "http://agg.example"
            [arts]
            base_url = "http://arts.example"
        "#,
        )
        .unwrap()
    }

    fn test_keys() -> ApiKeys {
        ApiKeys {
            geocoder: "k1".to_string(),
            weather: "k2".to_string(),
            headlines: "k3".to_string(),
            arts: "k4".to_string(),
        }
    }

    #[test]
    fn test_sources_built_in_slot_order() {
        let sources = build_sources(&test_config(), &test_keys());
        let labels: Vec<&str> = sources.iter().map(|s| s.label()).collect();
        assert_eq!(labels, vec!["headlines", "aggregator", "arts"]);
    }
}
