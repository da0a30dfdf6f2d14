use officemap_core::{entities::MapPoint, gateways::geocode::GeoCodingGateway};

/// Used if no geocoding provider has been configured.
#[derive(Debug, Clone, Copy, Default)]
pub struct DummyGeoCoding;

impl GeoCodingGateway for DummyGeoCoding {
    fn resolve_address_lat_lng(&self, address: &str) -> Option<MapPoint> {
        log::debug!(
            "Cannot resolve '{}' because no geocoding gateway was configured",
            address
        );
        None
    }
}
