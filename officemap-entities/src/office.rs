use crate::{activity::*, geo::*, id::*};

/// Maximum number of characters of an office name.
pub const MAX_NAME_LEN: usize = 255;

/// Search radius around an office in meters.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct Radius(f64);

impl Radius {
    pub const DEFAULT: Self = Self(10.0);

    pub const fn from_meters(meters: f64) -> Self {
        Self(meters)
    }

    pub const fn to_meters(self) -> f64 {
        self.0
    }

    pub fn is_valid(self) -> bool {
        self.0.is_finite() && self.0 > 0.0
    }

    pub const fn to_distance(self) -> Distance {
        Distance::from_meters(self.0)
    }
}

impl Default for Radius {
    fn default() -> Self {
        Self::DEFAULT
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Office {
    pub id: Id,
    pub name: String,
    /// Free text that is only used as input for geocoding.
    pub address: Option<String>,
    pub latitude: Option<LatCoord>,
    pub longitude: Option<LngCoord>,
    pub radius: Radius,
    pub created: Activity,
    pub updated: Option<Activity>,
    pub deleted: Option<Activity>,
}

impl Office {
    /// The position of the office if both coordinates are known.
    pub fn pos(&self) -> Option<MapPoint> {
        match (self.latitude, self.longitude) {
            (Some(lat), Some(lng)) => Some(MapPoint::new(lat, lng)),
            _ => None,
        }
    }

    pub fn set_pos(&mut self, pos: Option<MapPoint>) {
        self.latitude = pos.map(MapPoint::lat);
        self.longitude = pos.map(MapPoint::lng);
    }

    /// Checks if `pos` is within the radius around this office.
    pub fn covers(&self, pos: MapPoint) -> bool {
        self.pos()
            .and_then(|center| MapPoint::distance(center, pos))
            .map(|d| d <= self.radius.to_distance())
            .unwrap_or(false)
    }

    pub fn is_deleted(&self) -> bool {
        self.deleted.is_some()
    }

    /// Marks the office as deleted. Deleting twice keeps the first activity.
    pub fn soft_delete(&mut self, activity: Activity) {
        if self.deleted.is_none() {
            self.deleted = Some(activity);
        }
    }

    pub fn restore(&mut self) {
        self.deleted = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::time::TimestampMs;

    fn office() -> Office {
        Office {
            id: Id::new(),
            name: "Head office".into(),
            address: None,
            latitude: None,
            longitude: None,
            radius: Radius::default(),
            created: Activity::at(TimestampMs::from_milliseconds(1_000)),
            updated: None,
            deleted: None,
        }
    }

    #[test]
    fn default_radius_is_ten_meters() {
        assert_eq!(10.0, Radius::default().to_meters());
        assert!(Radius::default().is_valid());
        assert!(!Radius::from_meters(0.0).is_valid());
        assert!(!Radius::from_meters(-1.0).is_valid());
        assert!(!Radius::from_meters(f64::INFINITY).is_valid());
    }

    #[test]
    fn pos_requires_both_coordinates() {
        let mut o = office();
        assert_eq!(None, o.pos());
        o.latitude = Some(LatCoord::from_deg(1.0));
        assert_eq!(None, o.pos());
        o.longitude = Some(LngCoord::from_deg(2.0));
        assert_eq!(Some(MapPoint::from_lat_lng_deg(1.0, 2.0)), o.pos());
        o.set_pos(None);
        assert_eq!(None, o.latitude);
        assert_eq!(None, o.longitude);
    }

    #[test]
    fn covers_points_within_radius() {
        let mut o = office();
        let center = MapPoint::from_lat_lng_deg(-6.2, 106.8);
        assert!(!o.covers(center));
        o.set_pos(Some(center));
        o.radius = Radius::from_meters(100.0);
        assert!(o.covers(center));
        // ~55 m north
        assert!(o.covers(MapPoint::from_lat_lng_deg(-6.1995, 106.8)));
        // ~1.1 km north
        assert!(!o.covers(MapPoint::from_lat_lng_deg(-6.19, 106.8)));
    }

    #[test]
    fn soft_delete_and_restore() {
        let mut o = office();
        assert!(!o.is_deleted());
        let first = Activity::at(TimestampMs::from_milliseconds(2_000));
        o.soft_delete(first.clone());
        o.soft_delete(Activity::at(TimestampMs::from_milliseconds(3_000)));
        assert!(o.is_deleted());
        assert_eq!(Some(first), o.deleted);
        o.restore();
        assert!(!o.is_deleted());
    }
}
