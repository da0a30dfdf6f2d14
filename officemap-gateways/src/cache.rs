use officemap_core::{entities::MapPoint, gateways::geocode::GeoCodingGateway};
use parking_lot::Mutex;
use std::collections::HashMap;

pub const DEFAULT_CAPACITY: usize = 1024;

/// Lower-cased, trimmed address with collapsed inner whitespace.
pub fn normalize_address(address: &str) -> String {
    address
        .split_whitespace()
        .map(str::to_lowercase)
        .collect::<Vec<_>>()
        .join(" ")
}

/// Remembers resolved addresses of an inner gateway.
///
/// Only found locations are cached: a failed lookup is always
/// repeated because the failure might have been temporary.
pub struct CachedGeoCoding<G> {
    inner: G,
    capacity: usize,
    cache: Mutex<HashMap<String, MapPoint>>,
}

impl<G> CachedGeoCoding<G> {
    pub fn new(inner: G, capacity: usize) -> Self {
        Self {
            inner,
            capacity,
            cache: Mutex::new(HashMap::new()),
        }
    }

    pub fn len(&self) -> usize {
        self.cache.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.cache.lock().is_empty()
    }

    pub fn clear(&self) {
        self.cache.lock().clear();
    }
}

impl<G> GeoCodingGateway for CachedGeoCoding<G>
where
    G: GeoCodingGateway,
{
    fn resolve_address_lat_lng(&self, address: &str) -> Option<MapPoint> {
        let key = normalize_address(address);
        if let Some(pos) = self.cache.lock().get(&key).copied() {
            log::debug!("Found cached location of '{}': {}", address, pos);
            return Some(pos);
        }
        // The lock must not be held during the lookup
        let pos = self.inner.resolve_address_lat_lng(address)?;
        if self.capacity == 0 {
            return Some(pos);
        }
        let mut cache = self.cache.lock();
        if cache.len() >= self.capacity {
            log::debug!("Clearing geocoding cache with {} entries", cache.len());
            cache.clear();
        }
        cache.insert(key, pos);
        Some(pos)
    }
}
