use anyhow::{anyhow, Result};
use officemap_entities::office::Radius;
use officemap_gateways::{
    cache::DEFAULT_CAPACITY,
    google_maps::{DEFAULT_API_URL, DEFAULT_TIMEOUT},
};
use std::{env, fs, io::ErrorKind, path::Path, time::Duration};

mod raw;

const DEFAULT_CONFIG_FILE_NAME: &str = "officemap.toml";

const ENV_NAME_GOOGLE_MAPS_API_KEY: &str = "GOOGLE_MAPS_API_KEY";

const DEFAULT_RETRY_DELAY: Duration = Duration::from_millis(250);

pub struct Config {
    pub geocoding: Geocoding,
    pub offices: Offices,
}

impl Config {
    pub fn try_load_from_file_or_default<P: AsRef<Path>>(file_path: Option<P>) -> Result<Self> {
        let file_path: &Path = file_path.as_ref().map(|p| p.as_ref()).unwrap_or_else(|| {
            log::info!("No configuration file specified. load {DEFAULT_CONFIG_FILE_NAME}");
            Path::new(DEFAULT_CONFIG_FILE_NAME)
        });

        let mut raw_config = match fs::read_to_string(file_path) {
            Ok(cfg_string) => toml::from_str(&cfg_string)?,
            Err(err) => match err.kind() {
                ErrorKind::NotFound => {
                    log::info!(
                        "{} not found => load default configuration.",
                        file_path.display()
                    );
                    Ok(raw::Config::default())
                }
                _ => Err(err),
            }?,
        };
        if let Ok(api_key) = env::var(ENV_NAME_GOOGLE_MAPS_API_KEY) {
            override_google_maps_api_key(&mut raw_config, api_key);
        }
        Self::try_from(raw_config)
    }
}

fn override_google_maps_api_key(cfg: &mut raw::Config, api_key: String) {
    let geocoding = cfg.geocoding.get_or_insert_with(Default::default);
    if geocoding.gateway.is_none() {
        log::info!("Found {ENV_NAME_GOOGLE_MAPS_API_KEY}: use Google Maps geocoding");
        geocoding.gateway = Some(raw::GeocodingGateway::GoogleMaps);
    }
    let gateway = cfg.gateway.get_or_insert_with(Default::default);
    gateway
        .google_maps
        .get_or_insert_with(Default::default)
        .api_key = Some(api_key);
}

pub struct Geocoding {
    pub gateway: Option<GeocodingGateway>,
    pub timeout: Duration,
    pub max_retries: u32,
    pub retry_delay: Duration,
    /// Capacity of the result cache, if enabled.
    pub cache_capacity: Option<usize>,
}

#[derive(Clone)]
pub enum GeocodingGateway {
    GoogleMaps {
        api_key: String,
        api_url: String, // TODO: use url::Url
    },
}

pub struct Offices {
    pub default_radius: Radius,
    /// Quiet period before an address is resolved.
    pub debounce: Duration,
}

impl TryFrom<raw::Config> for Config {
    type Error = anyhow::Error;
    fn try_from(from: raw::Config) -> Result<Self> {
        let raw::Config {
            geocoding,
            gateway,
            offices,
        } = from;

        let raw::Geocoding {
            gateway: gw_name,
            timeout,
            max_retries,
            retry_delay,
            cache,
            cache_capacity,
        } = geocoding.unwrap_or_default();

        let geo_gateway = match gw_name {
            Some(gw_name) => {
                let gateway = gateway.unwrap_or_default();
                let gw = match gw_name {
                    raw::GeocodingGateway::GoogleMaps => {
                        let toml_name = "google-maps";
                        let raw::GoogleMaps { api_key, api_url } =
                            gateway.google_maps.ok_or_else(|| {
                                anyhow!("Missing {toml_name} gateway configuration")
                            })?;
                        let api_key = api_key
                            .filter(|key| !key.trim().is_empty())
                            .ok_or_else(|| {
                                anyhow!(
                                    "Missing {toml_name} API key (set {ENV_NAME_GOOGLE_MAPS_API_KEY})"
                                )
                            })?;
                        let api_url = api_url.unwrap_or_else(|| DEFAULT_API_URL.to_string());
                        log::info!("Use Google Maps geocoding gateway");
                        GeocodingGateway::GoogleMaps { api_key, api_url }
                    }
                };
                Some(gw)
            }
            None => None,
        };

        let timeout = timeout.unwrap_or(DEFAULT_TIMEOUT);
        if timeout.is_zero() {
            return Err(anyhow!("The geocoding timeout must not be zero"));
        }
        let cache_capacity = if cache.unwrap_or(false) {
            Some(cache_capacity.unwrap_or(DEFAULT_CAPACITY))
        } else {
            None
        };
        let max_retries = max_retries.unwrap_or(0);
        let retry_delay = retry_delay.unwrap_or(DEFAULT_RETRY_DELAY);
        if retry_delay.checked_mul(max_retries).is_none() {
            return Err(anyhow!("The geocoding retry delay is too long"));
        }
        let geocoding = Geocoding {
            gateway: geo_gateway,
            timeout,
            max_retries,
            retry_delay,
            cache_capacity,
        };

        let raw::Offices {
            default_radius,
            debounce,
        } = offices.unwrap_or_default();
        let default_radius = Radius::from_meters(default_radius);
        if !default_radius.is_valid() {
            return Err(anyhow!("The default radius must be positive"));
        }
        let offices = Offices {
            default_radius,
            debounce,
        };

        Ok(Self { geocoding, offices })
    }
}
