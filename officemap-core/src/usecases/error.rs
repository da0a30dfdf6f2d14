use crate::util::validate::OfficeInvalidation;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum Error {
    #[error("The name is invalid")]
    Name,
    #[error("The radius is invalid")]
    Radius,
    #[error("Invalid position")]
    InvalidPosition,
    #[error("The office has been deleted")]
    Deleted,
}

impl From<OfficeInvalidation> for Error {
    fn from(err: OfficeInvalidation) -> Self {
        match err {
            OfficeInvalidation::EmptyName | OfficeInvalidation::NameTooLong => Self::Name,
            OfficeInvalidation::Radius => Self::Radius,
            OfficeInvalidation::Latitude | OfficeInvalidation::Longitude => Self::InvalidPosition,
        }
    }
}
