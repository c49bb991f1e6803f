//! Profile domain module.
//!
//! # Module Structure
//!
//! - `model`: the Profile composition and its operation contract
//! - `repository`: persistence delegate trait

mod model;
mod repository;

pub use model::Profile;
pub use repository::ProfileRepository;
