mod create_office;
mod error;
mod locate_offices;
mod resolve_address;
mod update_office;

#[cfg(test)]
pub mod tests;

pub use self::{
    create_office::*, error::Error, locate_offices::*, resolve_address::*, update_office::*,
};

mod prelude {
    pub use super::error::Error;
    pub type Result<T> = std::result::Result<T, Error>;
    pub use crate::{entities::*, gateways::geocode::GeoCodingGateway};
}
