use super::{
    create_office::{location_fields, store_fields, NewOffice},
    prelude::*,
};
use crate::util::validate::{AutoCorrect, Validate};

pub fn update_office<G>(office: Office, update: NewOffice, geo_gw: &G) -> Result<Office>
where
    G: GeoCodingGateway + ?Sized,
{
    if office.is_deleted() {
        return Err(Error::Deleted);
    }
    let NewOffice {
        name,
        address,
        latitude,
        longitude,
        radius,
    } = update;
    let Office {
        id,
        created,
        radius: old_radius,
        ..
    } = office;
    let mut office = Office {
        id,
        name,
        address: address.clone(),
        latitude: None,
        longitude: None,
        radius: radius.map(Radius::from_meters).unwrap_or(old_radius),
        created,
        updated: Some(Activity::now(None)),
        deleted: None,
    }
    .auto_correct();
    office.validate()?;
    let fields = location_fields(address, latitude, longitude, geo_gw);
    store_fields(&mut office, &fields)?;
    log::info!("Updated office '{}' ({})", office.name, office.id);
    Ok(office)
}
