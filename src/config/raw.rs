use duration_str::{deserialize_duration, deserialize_option_duration};
use serde::Deserialize;
use std::time::Duration;

const DEFAULT_CONFIG_FILE: &str = include_str!("officemap.default.toml");

#[derive(Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Config {
    pub geocoding: Option<Geocoding>,
    pub gateway: Option<Gateway>,
    pub offices: Option<Offices>,
}

impl Default for Config {
    fn default() -> Self {
        let cfg: Self = toml::from_str(DEFAULT_CONFIG_FILE).expect("Default configuration");
        cfg
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Geocoding {
    pub gateway: Option<GeocodingGateway>,
    #[serde(default, deserialize_with = "deserialize_option_duration")]
    pub timeout: Option<Duration>,
    pub max_retries: Option<u32>,
    #[serde(default, deserialize_with = "deserialize_option_duration")]
    pub retry_delay: Option<Duration>,
    pub cache: Option<bool>,
    pub cache_capacity: Option<usize>,
}

impl Default for Geocoding {
    fn default() -> Self {
        Config::default()
            .geocoding
            .expect("Geocoding configuration")
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum GeocodingGateway {
    GoogleMaps,
}

#[derive(Clone, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Gateway {
    pub google_maps: Option<GoogleMaps>,
}

#[derive(Clone, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct GoogleMaps {
    pub api_key: Option<String>,
    pub api_url: Option<String>,
}

#[derive(Clone, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Offices {
    pub default_radius: f64,
    #[serde(deserialize_with = "deserialize_duration")]
    pub debounce: Duration,
}

impl Default for Offices {
    fn default() -> Self {
        Config::default().offices.expect("Offices configuration")
    }
}
