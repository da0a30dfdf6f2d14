use super::*;
use officemap_entities as e;
use std::convert::TryFrom;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConversionError {
    #[error("Invalid latitude")]
    Latitude,
    #[error("Invalid longitude")]
    Longitude,
}

impl From<e::geo::MapPoint> for Coordinate {
    fn from(from: e::geo::MapPoint) -> Self {
        let (lat, lng) = from.to_lat_lng_deg();
        Self { lat, lng }
    }
}

impl From<Coordinate> for e::geo::MapPoint {
    fn from(from: Coordinate) -> Self {
        let Coordinate { lat, lng } = from;
        Self::from_lat_lng_deg_unchecked(lat, lng)
    }
}

impl From<e::office::Office> for Office {
    fn from(from: e::office::Office) -> Self {
        let e::office::Office {
            id,
            name,
            address,
            latitude,
            longitude,
            radius,
            created,
            updated,
            deleted,
        } = from;
        Self {
            id: id.into(),
            name,
            address,
            latitude: latitude.map(e::geo::LatCoord::to_deg),
            longitude: longitude.map(e::geo::LngCoord::to_deg),
            radius: radius.to_meters(),
            created_at: created.at.into_milliseconds(),
            updated_at: updated.map(|a| a.at.into_milliseconds()),
            deleted_at: deleted.map(|a| a.at.into_milliseconds()),
        }
    }
}

fn activity(ms: i64) -> e::activity::Activity {
    e::activity::Activity::at(e::time::TimestampMs::from_milliseconds(ms))
}

impl TryFrom<Office> for e::office::Office {
    type Error = ConversionError;

    fn try_from(from: Office) -> Result<Self, Self::Error> {
        let Office {
            id,
            name,
            address,
            latitude,
            longitude,
            radius,
            created_at,
            updated_at,
            deleted_at,
        } = from;
        let latitude = latitude
            .map(|lat| e::geo::LatCoord::try_from_deg(lat).ok_or(ConversionError::Latitude))
            .transpose()?;
        let longitude = longitude
            .map(|lng| e::geo::LngCoord::try_from_deg(lng).ok_or(ConversionError::Longitude))
            .transpose()?;
        Ok(Self {
            id: id.into(),
            name,
            address,
            latitude,
            longitude,
            radius: e::office::Radius::from_meters(radius),
            created: activity(created_at),
            updated: updated_at.map(activity),
            deleted: deleted_at.map(activity),
        })
    }
}
