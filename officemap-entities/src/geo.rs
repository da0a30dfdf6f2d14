use itertools::Itertools;
use std::{fmt, str::FromStr};
use thiserror::Error;

macro_rules! degrees {
    ($(#[$doc:meta])* $name:ident, $limit:expr) => {
        $(#[$doc])*
        ///
        /// The default value is invalid (NaN) and marks an unset coordinate.
        #[derive(Clone, Copy, Debug, PartialEq, PartialOrd)]
        pub struct $name(f64);

        impl $name {
            const LIMIT: f64 = $limit;

            pub fn is_valid(self) -> bool {
                (-Self::LIMIT..=Self::LIMIT).contains(&self.0)
            }

            pub const fn to_deg(self) -> f64 {
                self.0
            }

            /// Radians of a valid coordinate, NaN otherwise.
            pub fn to_rad(self) -> f64 {
                if self.is_valid() {
                    self.0.to_radians()
                } else {
                    f64::NAN
                }
            }

            pub fn from_deg<T: Into<f64>>(deg: T) -> Self {
                let coord = Self(deg.into());
                debug_assert!(coord.is_valid());
                coord
            }

            pub fn try_from_deg<T: Into<f64>>(deg: T) -> Option<Self> {
                Some(Self(deg.into())).filter(|coord| coord.is_valid())
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self(f64::NAN)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

degrees!(
    /// Latitude in decimal degrees.
    LatCoord,
    90.0
);

degrees!(
    /// Longitude in decimal degrees.
    LngCoord,
    180.0
);

/// A geographical location on a (flat) map.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct MapPoint {
    lat: LatCoord,
    lng: LngCoord,
}

impl MapPoint {
    /// The position a map widget shows when nothing is known: `{0, 0}`.
    pub const ORIGIN: Self = Self {
        lat: LatCoord(0.0),
        lng: LngCoord(0.0),
    };

    pub const fn new(lat: LatCoord, lng: LngCoord) -> Self {
        Self { lat, lng }
    }

    pub const fn lat(self) -> LatCoord {
        self.lat
    }

    pub const fn lng(self) -> LngCoord {
        self.lng
    }

    pub fn is_valid(self) -> bool {
        self.lat.is_valid() && self.lng.is_valid()
    }

    pub fn to_lat_lng_rad(self) -> (f64, f64) {
        (self.lat.to_rad(), self.lng.to_rad())
    }

    pub const fn to_lat_lng_deg(self) -> (f64, f64) {
        (self.lat.to_deg(), self.lng.to_deg())
    }

    pub fn from_lat_lng_deg<LAT: Into<f64>, LNG: Into<f64>>(lat: LAT, lng: LNG) -> Self {
        Self::new(LatCoord::from_deg(lat), LngCoord::from_deg(lng))
    }

    pub fn try_from_lat_lng_deg<LAT: Into<f64>, LNG: Into<f64>>(
        lat: LAT,
        lng: LNG,
    ) -> Option<Self> {
        let lat = LatCoord::try_from_deg(lat)?;
        let lng = LngCoord::try_from_deg(lng)?;
        Some(Self::new(lat, lng))
    }

    /// A point built from raw degrees without any range check.
    ///
    /// Map widgets and form inputs may hand over anything, so the field
    /// group stores what it gets and validation happens later.
    pub const fn from_lat_lng_deg_unchecked(lat: f64, lng: f64) -> Self {
        Self::new(LatCoord(lat), LngCoord(lng))
    }
}

impl fmt::Display for MapPoint {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{},{}", self.lat, self.lng)
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum MapPointParseError {
    #[error("Expected 'LAT,LNG' but got '{0}'")]
    Format(String),
    #[error("Invalid latitude: {0}")]
    Latitude(String),
    #[error("Invalid longitude: {0}")]
    Longitude(String),
}

/// Parses `"LAT,LNG"` in decimal degrees, e.g. `"-6.9,107.6"`.
impl FromStr for MapPoint {
    type Err = MapPointParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (lat, lng) = s
            .split(',')
            .map(str::trim)
            .collect_tuple()
            .ok_or_else(|| MapPointParseError::Format(s.to_string()))?;
        let lat = lat
            .parse::<f64>()
            .ok()
            .and_then(LatCoord::try_from_deg)
            .ok_or_else(|| MapPointParseError::Latitude(lat.to_string()))?;
        let lng = lng
            .parse::<f64>()
            .ok()
            .and_then(LngCoord::try_from_deg)
            .ok_or_else(|| MapPointParseError::Longitude(lng.to_string()))?;
        Ok(Self::new(lat, lng))
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, PartialOrd)]
pub struct Distance(pub f64);

impl Distance {
    pub const fn from_meters(meters: f64) -> Self {
        Self(meters)
    }

    pub const fn to_meters(self) -> f64 {
        self.0
    }
}

const MEAN_EARTH_RADIUS: Distance = Distance::from_meters(6_371_200.0);

impl MapPoint {
    /// Great-circle distance on the surface of the earth.
    ///
    /// Uses the special case of the Vincenty formula for spheres:
    /// <https://en.wikipedia.org/wiki/Great-circle_distance>
    pub fn distance(p1: MapPoint, p2: MapPoint) -> Option<Distance> {
        if !p1.is_valid() || !p2.is_valid() {
            return None;
        }
        // Evaluate in a fixed order for bitwise identical results
        let (from, to) = if (p1.lat, p1.lng) <= (p2.lat, p2.lng) {
            (p1, p2)
        } else {
            (p2, p1)
        };

        let (from_lat, from_lng) = from.to_lat_lng_rad();
        let (to_lat, to_lng) = to.to_lat_lng_rad();
        let (sin_from, cos_from) = from_lat.sin_cos();
        let (sin_to, cos_to) = to_lat.sin_cos();
        let (sin_dlng, cos_dlng) = (from_lng - to_lng).abs().sin_cos();

        let y1 = cos_to * sin_dlng;
        let y2 = cos_from * sin_to - sin_from * cos_to * cos_dlng;
        let y = y1.hypot(y2);
        let x = sin_from * sin_to + cos_from * cos_to * cos_dlng;

        Some(Distance::from_meters(
            MEAN_EARTH_RADIUS.to_meters() * y.atan2(x),
        ))
    }
}
