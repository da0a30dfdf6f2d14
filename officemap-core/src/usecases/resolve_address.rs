use super::prelude::*;
use crate::location::is_blank_address;

/// Resolves an address, skipping the gateway for blank input.
pub fn resolve_address<G>(geo_gw: &G, address: &str) -> Option<MapPoint>
where
    G: GeoCodingGateway + ?Sized,
{
    if is_blank_address(address) {
        log::debug!("Not resolving an empty address");
        return None;
    }
    geo_gw.resolve_address_lat_lng(address.trim())
}
