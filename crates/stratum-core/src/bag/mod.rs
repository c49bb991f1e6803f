//! Saved bag domain module.
//!
//! # Module Structure
//!
//! - `model`: SavedBag variants and the BagKind discriminator

mod model;

pub use model::{BagKind, IdBag, PrimitiveBag, SavedBag};
