#![deny(missing_debug_implementations)]
#![deny(rustdoc::broken_intra_doc_links)]
#![cfg_attr(test, deny(warnings))]

//! # officemap-entities
//!
//! Reusable, agnostic domain entities for officemap.
//!
//! The entities only contain generic functionality that does not reveal any application-specific business logic.

pub mod activity;
pub mod geo;
pub mod id;
pub mod office;
pub mod time;

#[cfg(any(test, feature = "builders"))]
pub mod builders;
