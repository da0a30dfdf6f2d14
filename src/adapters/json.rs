pub use officemap_boundary::*;

use officemap_core::{entities as e, location, usecases};

pub mod from_json {
    //! JSON -> Entity

    use super::*;

    // NOTE:
    // We cannot impl From<T> here, because the JSON structs
    // and the core types both are outside this crate.

    /// Loads a stored state. The marker is always derived from the coordinates.
    pub fn location_fields(from: LocationFields) -> location::LocationFields {
        let LocationFields {
            address,
            latitude,
            longitude,
            location: _,
        } = from;
        location::LocationFields::load(Some(address), latitude, longitude)
    }

    pub fn location_edit(from: LocationEdit) -> location::LocationEdit {
        match from {
            LocationEdit::Address(address) => location::LocationEdit::Address(address),
            LocationEdit::Location(pos) => location::LocationEdit::Marker(pos.into()),
            LocationEdit::Latitude(lat) => location::LocationEdit::Latitude(lat),
            LocationEdit::Longitude(lng) => location::LocationEdit::Longitude(lng),
        }
    }

    pub fn new_office(from: NewOffice) -> usecases::NewOffice {
        let NewOffice {
            name,
            address,
            latitude,
            longitude,
            radius,
        } = from;
        usecases::NewOffice {
            name,
            address,
            latitude,
            longitude,
            radius,
        }
    }

    pub fn try_offices(from: Vec<Office>) -> anyhow::Result<Vec<e::Office>> {
        from.into_iter()
            .map(|o| {
                let id = o.id.clone();
                e::Office::try_from(o)
                    .map_err(|err| anyhow::anyhow!("Invalid office {id}: {err}"))
            })
            .collect()
    }
}

pub mod to_json {
    //! Entity -> JSON

    use super::*;

    pub fn location_fields(from: location::LocationFields) -> LocationFields {
        let location::LocationFields {
            address,
            latitude,
            longitude,
            location,
        } = from;
        LocationFields {
            address,
            latitude,
            longitude,
            location: location.into(),
        }
    }

    pub fn offices(from: Vec<e::Office>) -> Vec<Office> {
        from.into_iter().map(Office::from).collect()
    }
}
