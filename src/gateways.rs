use crate::config;
use anyhow::Result;
use officemap_core::gateways::geocode::GeoCodingGateway;
use officemap_gateways::{cache::CachedGeoCoding, dummy::DummyGeoCoding, google_maps::GoogleMaps};

pub type GeoCodingGw = Box<dyn GeoCodingGateway + Send + Sync>;

pub fn geocoding_gateway(cfg: &config::Geocoding) -> Result<GeoCodingGw> {
    let gw: GeoCodingGw = match &cfg.gateway {
        Some(config::GeocodingGateway::GoogleMaps { api_key, api_url }) => {
            let gw = GoogleMaps::new(api_key.clone(), cfg.timeout)?
                .with_api_url(api_url.clone())
                .with_retries(cfg.max_retries, cfg.retry_delay);
            match cfg.cache_capacity {
                Some(capacity) => {
                    log::debug!("Cache up to {capacity} resolved addresses");
                    Box::new(CachedGeoCoding::new(gw, capacity))
                }
                None => Box::new(gw),
            }
        }
        None => {
            log::warn!("No geocoding gateway was configured");
            Box::new(DummyGeoCoding)
        }
    };
    Ok(gw)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn geocoding(gateway: Option<config::GeocodingGateway>) -> config::Geocoding {
        config::Geocoding {
            gateway,
            timeout: Duration::from_secs(1),
            max_retries: 0,
            retry_delay: Duration::ZERO,
            cache_capacity: Some(10),
        }
    }

    #[test]
    fn unconfigured_gateway_finds_nothing() {
        let gw = geocoding_gateway(&geocoding(None)).unwrap();
        assert_eq!(None, gw.resolve_address_lat_lng("Jakarta"));
    }

    #[test]
    fn google_maps_gateway() {
        let gw = geocoding_gateway(&geocoding(Some(config::GeocodingGateway::GoogleMaps {
            api_key: "key".into(),
            // Nothing listens on the discard port
            api_url: "http://127.0.0.1:9/geocode".into(),
        })))
        .unwrap();
        assert_eq!(None, gw.resolve_address_lat_lng("Jakarta"));
    }
}
