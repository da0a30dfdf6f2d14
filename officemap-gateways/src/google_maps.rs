use officemap_core::{entities::MapPoint, gateways::geocode::GeoCodingGateway};
use reqwest::{blocking::Client, StatusCode};
use serde::Deserialize;
use std::{thread, time::Duration};
use thiserror::Error;

pub const DEFAULT_API_URL: &str = "https://maps.googleapis.com/maps/api/geocode/json";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(5);

const STATUS_OK: &str = "OK";
const STATUS_ZERO_RESULTS: &str = "ZERO_RESULTS";
const STATUS_OVER_QUERY_LIMIT: &str = "OVER_QUERY_LIMIT";
const STATUS_UNKNOWN_ERROR: &str = "UNKNOWN_ERROR";

#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Transport(reqwest::Error),
    #[error("Unexpected HTTP status: {0}")]
    HttpStatus(StatusCode),
    #[error("Malformed response: {0}")]
    Malformed(#[from] serde_json::Error),
    #[error("Request rejected with status {status}")]
    Rejected {
        status: String,
        message: Option<String>,
    },
    #[error("No results")]
    NoResults,
    #[error("Invalid coordinates {lat},{lng}")]
    InvalidCoordinates { lat: f64, lng: f64 },
}

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        // The URL contains the API key
        Self::Transport(err.without_url())
    }
}

impl Error {
    /// Failures that might disappear if the request is repeated.
    pub fn is_transient(&self) -> bool {
        match self {
            Self::Transport(_) => true,
            Self::HttpStatus(status) => {
                status.is_server_error() || *status == StatusCode::TOO_MANY_REQUESTS
            }
            Self::Rejected { status, .. } => {
                status == STATUS_OVER_QUERY_LIMIT || status == STATUS_UNKNOWN_ERROR
            }
            Self::Malformed(_) | Self::NoResults | Self::InvalidCoordinates { .. } => false,
        }
    }
}

#[derive(Debug, Deserialize)]
struct GeocodeResponse {
    status: String,
    #[serde(default)]
    results: Vec<GeocodeResult>,
    error_message: Option<String>,
}

#[derive(Debug, Deserialize)]
struct GeocodeResult {
    geometry: Geometry,
}

#[derive(Debug, Deserialize)]
struct Geometry {
    location: LatLng,
}

#[derive(Debug, Deserialize)]
struct LatLng {
    lat: f64,
    lng: f64,
}

fn parse_response(body: &str) -> Result<MapPoint, Error> {
    let GeocodeResponse {
        status,
        results,
        error_message,
    } = serde_json::from_str(body)?;
    match status.as_str() {
        STATUS_OK => {}
        STATUS_ZERO_RESULTS => return Err(Error::NoResults),
        _ => {
            return Err(Error::Rejected {
                status,
                message: error_message,
            })
        }
    }
    let LatLng { lat, lng } = results
        .into_iter()
        .next()
        .map(|r| r.geometry.location)
        .ok_or(Error::NoResults)?;
    MapPoint::try_from_lat_lng_deg(lat, lng).ok_or(Error::InvalidCoordinates { lat, lng })
}

/// Geocoding with the Google Maps Geocoding API.
#[derive(Debug, Clone)]
pub struct GoogleMaps {
    api_key: String,
    api_url: String,
    max_retries: u32,
    retry_delay: Duration,
    client: Client,
}

impl GoogleMaps {
    pub fn new(api_key: String, timeout: Duration) -> Result<Self, Error> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            api_key,
            api_url: DEFAULT_API_URL.to_string(),
            max_retries: 0,
            retry_delay: Duration::ZERO,
            client,
        })
    }

    pub fn with_api_url(mut self, api_url: String) -> Self {
        self.api_url = api_url;
        self
    }

    /// Repeats requests that failed for transient reasons.
    ///
    /// The n-th retry waits `n * delay`.
    pub fn with_retries(mut self, max_retries: u32, delay: Duration) -> Self {
        self.max_retries = max_retries;
        self.retry_delay = delay;
        self
    }

    fn request(&self, address: &str) -> Result<MapPoint, Error> {
        let response = self
            .client
            .get(&self.api_url)
            .query(&[("address", address), ("key", self.api_key.as_str())])
            .send()?;
        let status = response.status();
        if !status.is_success() {
            return Err(Error::HttpStatus(status));
        }
        let body = response.text()?;
        parse_response(&body)
    }

    pub fn resolve(&self, address: &str) -> Result<MapPoint, Error> {
        let mut retries = 0;
        loop {
            match self.request(address) {
                Err(err) if err.is_transient() && retries < self.max_retries => {
                    retries += 1;
                    log::debug!(
                        "Retrying to resolve '{}' ({}/{}) after: {}",
                        address,
                        retries,
                        self.max_retries,
                        err
                    );
                    thread::sleep(self.retry_delay.saturating_mul(retries));
                }
                res => return res,
            }
        }
    }
}

impl GeoCodingGateway for GoogleMaps {
    fn resolve_address_lat_lng(&self, address: &str) -> Option<MapPoint> {
        match self.resolve(address) {
            Ok(pos) => {
                log::debug!("Resolved address location '{}': {}", address, pos);
                Some(pos)
            }
            Err(Error::NoResults) => {
                log::info!("No location found for address '{}'", address);
                None
            }
            Err(err) => {
                log::warn!("Failed to resolve address location '{}': {}", address, err);
                None
            }
        }
    }
}
