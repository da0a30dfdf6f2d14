pub mod cache;
pub mod dummy;
pub mod google_maps;
