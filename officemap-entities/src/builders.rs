pub trait Builder {
    type Build;
    fn build() -> Self::Build;
}

pub use self::office_builder::*;

pub mod office_builder {

    use super::*;
    use crate::{activity::*, geo::*, id::*, office::*};

    #[derive(Debug)]
    pub struct OfficeBuild {
        office: Office,
    }

    impl OfficeBuild {
        pub fn id(mut self, id: &str) -> Self {
            self.office.id = id.into();
            self
        }
        pub fn name(mut self, name: &str) -> Self {
            self.office.name = name.into();
            self
        }
        pub fn address(mut self, address: Option<&str>) -> Self {
            self.office.address = address.map(Into::into);
            self
        }
        pub fn pos(mut self, pos: MapPoint) -> Self {
            self.office.set_pos(Some(pos));
            self
        }
        pub fn latitude(mut self, lat: f64) -> Self {
            self.office.latitude = Some(LatCoord::from_deg(lat));
            self
        }
        pub fn longitude(mut self, lng: f64) -> Self {
            self.office.longitude = Some(LngCoord::from_deg(lng));
            self
        }
        pub fn radius(mut self, meters: f64) -> Self {
            self.office.radius = Radius::from_meters(meters);
            self
        }
        pub fn deleted(mut self) -> Self {
            self.office.deleted = Some(Activity::now(None));
            self
        }
        pub fn finish(self) -> Office {
            self.office
        }
    }

    impl Builder for Office {
        type Build = OfficeBuild;
        fn build() -> OfficeBuild {
            OfficeBuild {
                office: Office {
                    id: Id::new(),
                    name: "".into(),
                    address: None,
                    latitude: None,
                    longitude: None,
                    radius: Radius::default(),
                    created: Activity::now(None),
                    updated: None,
                    deleted: None,
                },
            }
        }
    }
}
