use anyhow::{Context, Result};
use serde::Deserialize;
use std::io::{self, Write};
use std::path::Path;

const ENV_FILE: &str = ".env";

/// Whole-app configuration, loaded once and passed into the orchestrator.
/// Endpoints live here; API keys come from the environment (see `ApiKeys`).
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    #[serde(default)]
    pub location: LocationConfig,
    pub geocoder: GeocoderConfig,
    pub weather: WeatherConfig,
    pub headlines: HeadlinesConfig,
    pub aggregator: AggregatorConfig,
    pub arts: ArtsConfig,
    #[serde(default)]
    pub ui: UiConfig,
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct LocationConfig {
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub ip_lookup_url: Option<String>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct GeocoderConfig {
    pub base_url: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct WeatherConfig {
    pub base_url: String,
    /// The weather lookup only supports US cities.
    #[serde(default = "default_country")]
    pub country: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct HeadlinesConfig {
    pub base_url: String,
    #[serde(default = "default_country")]
    pub country: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct AggregatorConfig {
    pub base_url: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ArtsConfig {
    pub base_url: String,
}

fn default_country() -> String {
    "us".to_string()
}

#[derive(Debug, Deserialize, Clone)]
pub struct UiConfig {
    /// Periodic feed refresh. 0 disables it; manual refresh still works.
    #[serde(default = "default_refresh_interval")]
    pub refresh_interval_s: u64,
}

fn default_refresh_interval() -> u64 {
    900
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            refresh_interval_s: 900,
        }
    }
}

impl Config {
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        let config: Config = toml::from_str(&content)
            .with_context(|| "Failed to parse config TOML")?;
        Ok(config)
    }

    /// Load .env file into process environment. Real env vars take precedence.
    pub fn load_env_file() {
        let path = Path::new(ENV_FILE);
        let content = match std::fs::read_to_string(path) {
            Ok(c) => c,
            Err(_) => return,
        };
        // Strip BOM if present (common on Windows-created files)
        let content = content.strip_prefix('\u{feff}').unwrap_or(&content);
        for line in content.lines() {
            let line = line.trim().trim_matches('\r');
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            if let Some((key, value)) = line.split_once('=') {
                let key = key.trim();
                let value = value.trim().trim_matches('"').trim_matches('\'');
                if std::env::var(key).is_err() {
                    std::env::set_var(key, value);
                }
            }
        }
    }
}

/// The four provider credentials. Opaque strings as far as this program is
/// concerned; never validated or rotated. The aggregator slot is keyless.
#[derive(Debug, Clone)]
pub struct ApiKeys {
    pub geocoder: String,
    pub weather: String,
    pub headlines: String,
    pub arts: String,
}

impl ApiKeys {
    /// Keys come from environment variables (or .env), or are prompted at
    /// startup. Prompted values are saved to .env for future runs.
    pub fn load() -> Result<Self> {
        Ok(Self {
            geocoder: key_from_env("MAPQUEST_API_KEY", "MapQuest API Key")?,
            weather: key_from_env("OPENWEATHER_API_KEY", "OpenWeatherMap API Key")?,
            headlines: key_from_env("NEWS_API_KEY", "NewsAPI Key")?,
            arts: key_from_env("NYT_API_KEY", "NYT API Key")?,
        })
    }
}

fn key_from_env(var: &str, label: &str) -> Result<String> {
    match std::env::var(var) {
        Ok(key) if !key.is_empty() => Ok(sanitize_key(&key)),
        _ => {
            let key = prompt(label)?;
            save_env_var(var, &key);
            Ok(key)
        }
    }
}

fn prompt(label: &str) -> Result<String> {
    print!("  {} > ", label);
    io::stdout().flush()?;
    let mut input = String::new();
    io::stdin().read_line(&mut input)?;
    let value = input.trim().to_string();
    if value.is_empty() {
        anyhow::bail!("{} cannot be empty", label);
    }
    Ok(value)
}

/// Strip carriage returns, BOM, and other invisible chars from a key value.
fn sanitize_key(raw: &str) -> String {
    raw.replace(['\r', '\u{feff}', '\u{200b}'], "")
        .trim()
        .to_string()
}

/// Append a KEY=VALUE line to .env and set it in the current process.
fn save_env_var(key: &str, value: &str) {
    std::env::set_var(key, value);
    let path = Path::new(ENV_FILE);
    let mut contents = std::fs::read_to_string(path).unwrap_or_default();
    if !contents.is_empty() && !contents.ends_with('\n') {
        contents.push('\n');
    }
    contents.push_str(&format!("{}={}\n", key, value));
    let _ = std::fs::write(path, contents);
}
