//! Saved query domain module.
//!
//! # Module Structure
//!
//! - `model`: SavedQuery domain model

mod model;

pub use model::SavedQuery;
