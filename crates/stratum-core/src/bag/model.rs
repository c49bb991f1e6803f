//! Saved bag domain models.
//!
//! A bag is a named, user-saved set of either object identifiers or
//! primitive scalar values. The profile core only ever classifies a bag by
//! variant when producing filtered views; it never inspects contents.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Variant discriminator for [`SavedBag`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BagKind {
    /// Bag of object identifiers.
    Id,
    /// Bag of primitive scalar values.
    Primitive,
}

/// A named set of object identifiers.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct IdBag {
    /// Identifiers of the objects in the bag.
    pub ids: BTreeSet<u64>,
}

/// A named set of primitive scalar values.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct PrimitiveBag {
    /// Scalar values in the bag, opaque to the profile core.
    pub values: Vec<serde_json::Value>,
}

/// A user-saved bag, one of two variants.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum SavedBag {
    /// Bag of object identifiers.
    Id(IdBag),
    /// Bag of primitive scalar values.
    Primitive(PrimitiveBag),
}

impl SavedBag {
    /// Returns the variant discriminator.
    pub fn kind(&self) -> BagKind {
        match self {
            Self::Id(_) => BagKind::Id,
            Self::Primitive(_) => BagKind::Primitive,
        }
    }
}

impl From<IdBag> for SavedBag {
    fn from(bag: IdBag) -> Self {
        Self::Id(bag)
    }
}

impl From<PrimitiveBag> for SavedBag {
    fn from(bag: PrimitiveBag) -> Self {
        Self::Primitive(bag)
    }
}
