use super::{create_office::store_fields, prelude::*};
use crate::location::{apply_edit, LocationEdit, LocationFields};

/// Resolves the addresses of all offices without a position.
///
/// Deleted offices and offices without an address are skipped.
/// Returns the number of offices that have been located.
pub fn locate_offices<G>(offices: &mut [Office], geo_gw: &G) -> usize
where
    G: GeoCodingGateway + ?Sized,
{
    let mut count = 0;
    for office in offices.iter_mut() {
        if office.is_deleted() || office.pos().is_some() {
            continue;
        }
        let Some(address) = office.address.clone() else {
            continue;
        };
        let fields = apply_edit(
            LocationFields::from(&*office),
            LocationEdit::Address(address),
            geo_gw,
        );
        if fields.latitude.is_none() {
            log::warn!("Failed to locate office {}", office.id);
            continue;
        }
        if let Err(err) = store_fields(office, &fields) {
            log::warn!("Failed to update location of office {}: {}", office.id, err);
            continue;
        }
        office.updated = Some(Activity::now(None));
        log::info!("Updated location of office {}", office.id);
        count += 1;
    }
    count
}
