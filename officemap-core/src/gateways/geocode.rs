use officemap_entities::geo::MapPoint;

/// Resolves free-text addresses into map positions.
///
/// Implementations never fail: every kind of error is reported as `None`.
/// A returned point is always complete and valid.
pub trait GeoCodingGateway {
    fn resolve_address_lat_lng(&self, address: &str) -> Option<MapPoint>;
}

impl<G> GeoCodingGateway for &G
where
    G: GeoCodingGateway + ?Sized,
{
    fn resolve_address_lat_lng(&self, address: &str) -> Option<MapPoint> {
        (**self).resolve_address_lat_lng(address)
    }
}

impl<G> GeoCodingGateway for Box<G>
where
    G: GeoCodingGateway + ?Sized,
{
    fn resolve_address_lat_lng(&self, address: &str) -> Option<MapPoint> {
        (**self).resolve_address_lat_lng(address)
    }
}
