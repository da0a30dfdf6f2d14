use super::prelude::*;
use crate::{
    location::{apply_edit, LocationEdit, LocationFields},
    util::validate::{AutoCorrect, Validate},
};

#[rustfmt::skip]
#[derive(Debug, Clone, PartialEq, Default)]
pub struct NewOffice {
    pub name      : String,
    pub address   : Option<String>,
    pub latitude  : Option<f64>,
    pub longitude : Option<f64>,
    /// Meters, defaults to 10
    pub radius    : Option<f64>,
}

/// Derives the stored coordinates of a new or updated office.
///
/// Coordinates that have been entered explicitly win. Otherwise
/// the address is resolved the same way the form would do it.
pub(crate) fn location_fields<G>(
    address: Option<String>,
    latitude: Option<f64>,
    longitude: Option<f64>,
    geo_gw: &G,
) -> LocationFields
where
    G: GeoCodingGateway + ?Sized,
{
    let fields = LocationFields::load(address.clone(), latitude, longitude);
    if fields.latitude.is_some() && fields.longitude.is_some() {
        return fields;
    }
    match address {
        Some(address) => apply_edit(fields, LocationEdit::Address(address), geo_gw),
        None => fields,
    }
}

pub(crate) fn store_fields(office: &mut Office, fields: &LocationFields) -> Result<()> {
    office.latitude = fields
        .latitude
        .map(|lat| LatCoord::try_from_deg(lat).ok_or(Error::InvalidPosition))
        .transpose()?;
    office.longitude = fields
        .longitude
        .map(|lng| LngCoord::try_from_deg(lng).ok_or(Error::InvalidPosition))
        .transpose()?;
    Ok(())
}

pub fn create_office<G>(new: NewOffice, geo_gw: &G) -> Result<Office>
where
    G: GeoCodingGateway + ?Sized,
{
    let NewOffice {
        name,
        address,
        latitude,
        longitude,
        radius,
    } = new;
    let mut office = Office {
        id: Id::new(),
        name,
        address: address.clone(),
        latitude: None,
        longitude: None,
        radius: radius.map(Radius::from_meters).unwrap_or_default(),
        created: Activity::now(None),
        updated: None,
        deleted: None,
    }
    .auto_correct();
    office.validate()?;
    let fields = location_fields(address, latitude, longitude, geo_gw);
    store_fields(&mut office, &fields)?;
    log::info!("Created office '{}' ({})", office.name, office.id);
    Ok(office)
}
