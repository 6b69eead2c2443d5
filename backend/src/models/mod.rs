//! Core record types shared by the loader, the filter engine and the
//! statistics services.

pub mod record;

pub use record::*;
