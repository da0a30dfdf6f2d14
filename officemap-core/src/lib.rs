pub mod debounce;
pub mod gateways;
pub mod location;
pub mod usecases;
pub mod util;

pub mod entities {
    pub use officemap_entities::{activity::*, geo::*, id::*, office::*, time::*};
}
