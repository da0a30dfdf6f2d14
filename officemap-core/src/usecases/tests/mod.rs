use super::*;
use crate::{entities::*, gateways::geocode::GeoCodingGateway};
use officemap_entities::builders::*;
use std::{cell::RefCell, collections::HashMap};

/// A deterministic geocoder backed by a fixed table.
#[derive(Default)]
pub struct MockGeoGW {
    known: HashMap<String, MapPoint>,
    pub requests: RefCell<Vec<String>>,
}

impl MockGeoGW {
    pub fn with(mut self, address: &str, lat: f64, lng: f64) -> Self {
        self.known
            .insert(address.to_string(), MapPoint::from_lat_lng_deg(lat, lng));
        self
    }
}

impl GeoCodingGateway for MockGeoGW {
    fn resolve_address_lat_lng(&self, address: &str) -> Option<MapPoint> {
        self.requests.borrow_mut().push(address.to_string());
        self.known.get(address).copied()
    }
}

pub struct DummyGeoGW;

impl GeoCodingGateway for DummyGeoGW {
    fn resolve_address_lat_lng(&self, _: &str) -> Option<MapPoint> {
        None
    }
}

fn new_office(name: &str) -> NewOffice {
    NewOffice {
        name: name.into(),
        ..Default::default()
    }
}

#[test]
fn resolve_blank_address_without_lookup() {
    let gw = MockGeoGW::default().with("", 1.0, 1.0);
    assert_eq!(None, resolve_address(&gw, "  "));
    assert!(gw.requests.borrow().is_empty());
}

#[test]
fn resolve_the_same_address_twice() {
    let gw = MockGeoGW::default().with("Yogyakarta", -7.7956, 110.3695);
    let a = resolve_address(&gw, "Yogyakarta");
    let b = resolve_address(&gw, " Yogyakarta ");
    assert!(a.is_some());
    assert_eq!(a, b);
    assert_eq!(2, gw.requests.borrow().len());
}

#[test]
fn create_office_with_defaults() {
    let office = create_office(new_office(" Head office "), &DummyGeoGW).unwrap();
    assert!(office.id.is_valid());
    assert_eq!("Head office", office.name);
    assert_eq!(Radius::DEFAULT, office.radius);
    assert_eq!(None, office.pos());
    assert!(office.updated.is_none());
    assert!(!office.is_deleted());
}

#[test]
fn create_office_with_invalid_name_or_radius() {
    assert_eq!(Err(Error::Name), create_office(new_office(""), &DummyGeoGW));
    assert_eq!(
        Err(Error::Name),
        create_office(new_office(&"o".repeat(256)), &DummyGeoGW)
    );
    let new = NewOffice {
        radius: Some(-5.0),
        ..new_office("Branch")
    };
    assert_eq!(Err(Error::Radius), create_office(new, &DummyGeoGW));
}

#[test]
fn do_not_resolve_addresses_of_invalid_offices() {
    let gw = MockGeoGW::default().with("Bali", -8.4, 115.2);
    let new = NewOffice {
        address: Some("Bali".into()),
        ..new_office("")
    };
    assert!(create_office(new, &gw).is_err());
    assert!(gw.requests.borrow().is_empty());
}

#[test]
fn create_office_resolves_address() {
    let gw = MockGeoGW::default().with("Jl. Malioboro, Yogyakarta", -7.7926, 110.3658);
    let new = NewOffice {
        address: Some("Jl. Malioboro, Yogyakarta".into()),
        radius: Some(50.0),
        ..new_office("Branch")
    };
    let office = create_office(new, &gw).unwrap();
    assert_eq!(
        Some(MapPoint::from_lat_lng_deg(-7.7926, 110.3658)),
        office.pos()
    );
    assert_eq!(50.0, office.radius.to_meters());
}

#[test]
fn create_office_keeps_explicit_coordinates() {
    let gw = MockGeoGW::default().with("Bandung", -6.9, 107.6);
    let new = NewOffice {
        address: Some("Bandung".into()),
        latitude: Some(1.0),
        longitude: Some(2.0),
        ..new_office("Branch")
    };
    let office = create_office(new, &gw).unwrap();
    assert_eq!(Some(MapPoint::from_lat_lng_deg(1.0, 2.0)), office.pos());
    assert!(gw.requests.borrow().is_empty());
}

#[test]
fn create_office_with_unknown_address() {
    let new = NewOffice {
        address: Some("Atlantis".into()),
        latitude: Some(3.0),
        ..new_office("Branch")
    };
    let office = create_office(new, &DummyGeoGW).unwrap();
    assert_eq!(Some("Atlantis".to_string()), office.address);
    assert_eq!(None, office.latitude);
    assert_eq!(None, office.longitude);
}

#[test]
fn create_office_with_partial_coordinates() {
    let new = NewOffice {
        latitude: Some(3.0),
        ..new_office("Branch")
    };
    let office = create_office(new, &DummyGeoGW).unwrap();
    assert_eq!(Some(LatCoord::from_deg(3.0)), office.latitude);
    assert_eq!(None, office.longitude);
}

#[test]
fn create_office_with_out_of_range_coordinates() {
    let new = NewOffice {
        latitude: Some(91.0),
        longitude: Some(2.0),
        ..new_office("Branch")
    };
    assert_eq!(Err(Error::InvalidPosition), create_office(new, &DummyGeoGW));
    let new = NewOffice {
        latitude: Some(1.0),
        longitude: Some(-181.0),
        ..new_office("Branch")
    };
    assert_eq!(Err(Error::InvalidPosition), create_office(new, &DummyGeoGW));
}

#[test]
fn update_office_keeps_identity() {
    let office = Office::build()
        .name("Old name")
        .radius(25.0)
        .pos(MapPoint::from_lat_lng_deg(1.0, 1.0))
        .finish();
    let id = office.id.clone();
    let created = office.created.clone();
    let update = NewOffice {
        latitude: Some(2.0),
        longitude: Some(3.0),
        ..new_office("New name")
    };
    let updated = update_office(office, update, &DummyGeoGW).unwrap();
    assert_eq!(id, updated.id);
    assert_eq!(created, updated.created);
    assert_eq!("New name", updated.name);
    assert_eq!(25.0, updated.radius.to_meters());
    assert_eq!(Some(MapPoint::from_lat_lng_deg(2.0, 3.0)), updated.pos());
    assert!(updated.updated.is_some());
}

#[test]
fn update_office_with_new_address() {
    let gw = MockGeoGW::default().with("Semarang", -6.97, 110.42);
    let office = Office::build()
        .name("Branch")
        .address(Some("Solo"))
        .pos(MapPoint::from_lat_lng_deg(-7.57, 110.82))
        .finish();
    let update = NewOffice {
        address: Some("Semarang".into()),
        ..new_office("Branch")
    };
    let updated = update_office(office, update, &gw).unwrap();
    assert_eq!(
        Some(MapPoint::from_lat_lng_deg(-6.97, 110.42)),
        updated.pos()
    );
}

#[test]
fn update_deleted_office() {
    let office = Office::build().name("Branch").deleted().finish();
    assert_eq!(
        Err(Error::Deleted),
        update_office(office, new_office("Branch"), &DummyGeoGW)
    );
}

#[test]
fn locate_offices_without_position() {
    let gw = MockGeoGW::default()
        .with("Medan", 3.59, 98.67)
        .with("Padang", -0.95, 100.35);
    let mut offices = vec![
        Office::build().name("a").address(Some("Medan")).finish(),
        Office::build()
            .name("b")
            .address(Some("Padang"))
            .pos(MapPoint::from_lat_lng_deg(1.0, 1.0))
            .finish(),
        Office::build().name("c").finish(),
        Office::build().name("d").address(Some("Unknown")).finish(),
        Office::build()
            .name("e")
            .address(Some("Padang"))
            .deleted()
            .finish(),
    ];
    assert_eq!(1, locate_offices(&mut offices, &gw));
    assert_eq!(
        Some(MapPoint::from_lat_lng_deg(3.59, 98.67)),
        offices[0].pos()
    );
    assert!(offices[0].updated.is_some());
    assert_eq!(
        Some(MapPoint::from_lat_lng_deg(1.0, 1.0)),
        offices[1].pos()
    );
    assert_eq!(None, offices[2].pos());
    assert_eq!(None, offices[3].pos());
    assert!(offices[3].updated.is_none());
    assert_eq!(None, offices[4].pos());
    assert_eq!(vec!["Medan", "Unknown"], *gw.requests.borrow());
}
