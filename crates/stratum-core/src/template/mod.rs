//! Template query domain module.
//!
//! # Module Structure
//!
//! - `model`: TemplateQuery domain model
//! - `category`: derived grouping of templates by category label
//! - `indexer`: search-index trigger contract and the opaque handle it yields

mod category;
mod indexer;
mod model;

pub use category::CategoryIndex;
pub use indexer::{IndexHandle, IndexScope, TemplateIndexer};
pub use model::TemplateQuery;
