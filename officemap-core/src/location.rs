//! The location field group of an office form.
//!
//! Four inputs are kept consistent with each other: the address
//! search text, the latitude, the longitude and the map marker.
//! A single edit of one field results in exactly one new state
//! in which the dependent fields have already been updated.

use crate::{
    entities::{MapPoint, Office},
    gateways::geocode::GeoCodingGateway,
};

#[derive(Debug, Clone, PartialEq)]
pub struct LocationFields {
    /// The address search text as typed.
    pub address: String,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    /// Position of the map marker. Never edited independently.
    pub location: MapPoint,
}

/// An edit of exactly one field.
#[derive(Debug, Clone, PartialEq)]
pub enum LocationEdit {
    Address(String),
    /// The map marker has been dragged.
    Marker(MapPoint),
    Latitude(Option<f64>),
    Longitude(Option<f64>),
}

impl Default for LocationFields {
    fn default() -> Self {
        Self {
            address: String::new(),
            latitude: None,
            longitude: None,
            location: MapPoint::ORIGIN,
        }
    }
}

impl LocationFields {
    /// Initializes the fields from stored values.
    ///
    /// The marker is only placed if both coordinates are present.
    pub fn load(address: Option<String>, latitude: Option<f64>, longitude: Option<f64>) -> Self {
        let location = marker_pos(latitude, longitude).unwrap_or(MapPoint::ORIGIN);
        Self {
            address: address.unwrap_or_default(),
            latitude,
            longitude,
            location,
        }
    }

    fn clear_coordinates(&mut self) {
        self.latitude = None;
        self.longitude = None;
        self.location = MapPoint::ORIGIN;
    }

    fn set_coordinates(&mut self, pos: MapPoint) {
        let (lat, lng) = pos.to_lat_lng_deg();
        self.latitude = Some(lat);
        self.longitude = Some(lng);
        self.location = pos;
    }

    fn sync_marker(&mut self) {
        if let Some(pos) = marker_pos(self.latitude, self.longitude) {
            self.location = pos;
        }
    }
}

impl From<&Office> for LocationFields {
    fn from(from: &Office) -> Self {
        Self::load(
            from.address.clone(),
            from.latitude.map(|lat| lat.to_deg()),
            from.longitude.map(|lng| lng.to_deg()),
        )
    }
}

fn marker_pos(latitude: Option<f64>, longitude: Option<f64>) -> Option<MapPoint> {
    match (latitude, longitude) {
        (Some(lat), Some(lng)) => Some(MapPoint::from_lat_lng_deg_unchecked(lat, lng)),
        _ => None,
    }
}

/// Returns `true` if an address text contains nothing to resolve.
pub fn is_blank_address(address: &str) -> bool {
    address.trim().is_empty()
}

/// Applies a single edit and propagates it to the dependent fields.
///
/// Only an edit of the address text consults the gateway.
pub fn apply_edit<G>(state: LocationFields, edit: LocationEdit, geo_gw: &G) -> LocationFields
where
    G: GeoCodingGateway + ?Sized,
{
    let mut next = state;
    match edit {
        LocationEdit::Address(address) => {
            if is_blank_address(&address) {
                next.clear_coordinates();
            } else {
                match geo_gw.resolve_address_lat_lng(address.trim()) {
                    Some(pos) => {
                        log::debug!("Resolved address '{}' to {}", address, pos);
                        next.set_coordinates(pos);
                    }
                    None => {
                        log::debug!("Address '{}' could not be resolved", address);
                        next.clear_coordinates();
                    }
                }
            }
            next.address = address;
        }
        LocationEdit::Marker(pos) => {
            // The marker is not reverse geocoded: the address stays as it is.
            next.set_coordinates(pos);
        }
        LocationEdit::Latitude(latitude) => {
            next.latitude = latitude;
            next.sync_marker();
        }
        LocationEdit::Longitude(longitude) => {
            next.longitude = longitude;
            next.sync_marker();
        }
    }
    next
}
