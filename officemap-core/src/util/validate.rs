use crate::entities::{Office, MAX_NAME_LEN};
use thiserror::Error;

pub trait Validate {
    type Error;
    fn validate(&self) -> Result<(), Self::Error>;
}

pub trait AutoCorrect {
    fn auto_correct(self) -> Self;
}

pub fn is_valid_office_name(name: &str) -> bool {
    !name.trim().is_empty() && name.chars().count() <= MAX_NAME_LEN
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum OfficeInvalidation {
    #[error("The name is empty")]
    EmptyName,
    #[error("The name is longer than 255 characters")]
    NameTooLong,
    #[error("The radius must be a positive number of meters")]
    Radius,
    #[error("Invalid latitude")]
    Latitude,
    #[error("Invalid longitude")]
    Longitude,
}

impl Validate for Office {
    type Error = OfficeInvalidation;
    fn validate(&self) -> Result<(), Self::Error> {
        if self.name.trim().is_empty() {
            return Err(Self::Error::EmptyName);
        }
        if !is_valid_office_name(&self.name) {
            return Err(Self::Error::NameTooLong);
        }
        if !self.radius.is_valid() {
            return Err(Self::Error::Radius);
        }
        if self.latitude.map(|lat| !lat.is_valid()).unwrap_or(false) {
            return Err(Self::Error::Latitude);
        }
        if self.longitude.map(|lng| !lng.is_valid()).unwrap_or(false) {
            return Err(Self::Error::Longitude);
        }
        Ok(())
    }
}

impl AutoCorrect for Office {
    fn auto_correct(mut self) -> Self {
        self.name = self.name.trim().to_string();
        self.address = self
            .address
            .map(|a| a.trim().to_string())
            .filter(|a| !a.is_empty());
        self
    }
}
