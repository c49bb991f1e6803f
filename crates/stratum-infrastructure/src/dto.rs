//! Data Transfer Objects (DTOs) for profile persistence.
//!
//! These DTOs represent the versioned schema for persisting a profile to
//! TOML. They are owned by the infrastructure layer and shield the domain
//! models from storage-format concerns.
//!
//! ## Schema Versioning (Semantic Versioning)
//!
//! - **MAJOR (X.0.0)**: Breaking changes (field removal, type changes)
//! - **MINOR (1.X.0)**: Backward-compatible additions (new optional fields)
//!
//! ### Profile Version History
//! - **1.0.0**: Initial schema. Saved queries, bags, and templates only;
//!   query history is session-scoped and never stored.
//!
//! Opaque JSON payloads (query definitions, primitive bag values) are
//! stored as JSON strings so the TOML document stays flat and stable.

use anyhow::Context;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use stratum_core::bag::{BagKind, IdBag, PrimitiveBag, SavedBag};
use stratum_core::profile::Profile;
use stratum_core::query::SavedQuery;
use stratum_core::template::TemplateQuery;

/// Current schema version for ProfileV1.
pub const PROFILE_V1_VERSION: &str = "1.0.0";

/// V1 of the on-disk profile schema.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProfileV1 {
    /// The schema version of this document.
    pub schema_version: String,
    /// Username of the owning user.
    pub username: String,
    /// The user's opaque credential.
    pub credential: String,
    /// Saved queries, keyed by their collection name.
    #[serde(default)]
    pub queries: Vec<SavedQueryEntryV1>,
    /// Saved bags, keyed by their collection name.
    #[serde(default)]
    pub bags: Vec<SavedBagEntryV1>,
    /// Saved templates, keyed by their collection name.
    #[serde(default)]
    pub templates: Vec<TemplateEntryV1>,
}

/// A saved query together with the name it is stored under.
///
/// The collection key is stored separately from the query's own name
/// because the two are allowed to differ.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SavedQueryEntryV1 {
    pub name: String,
    pub query: SavedQueryV1,
}

/// V1 serialization of a saved query.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SavedQueryV1 {
    pub name: String,
    pub created_at: DateTime<Utc>,
    /// JSON-encoded opaque query definition.
    pub definition: String,
}

/// A saved bag together with the name it is stored under.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SavedBagEntryV1 {
    pub name: String,
    pub bag: SavedBagV1,
}

/// V1 serialization of a bag.
///
/// Flattened rather than an enum so the TOML stays a plain table: `kind`
/// picks the variant, and only the matching contents field is populated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SavedBagV1 {
    pub kind: BagKind,
    /// Object identifiers, for `kind = "id"` bags.
    #[serde(default)]
    pub ids: Vec<u64>,
    /// JSON-encoded scalar values, for `kind = "primitive"` bags.
    #[serde(default)]
    pub values: Vec<String>,
}

/// A saved template together with the name it is stored under.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TemplateEntryV1 {
    pub name: String,
    pub template: TemplateQueryV1,
}

/// V1 serialization of a template query.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TemplateQueryV1 {
    pub name: String,
    pub created_at: DateTime<Utc>,
    /// JSON-encoded opaque query definition.
    pub definition: String,
    pub category: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub keywords: Vec<String>,
}

// ============================================================================
// Domain -> DTO
// ============================================================================

/// Builds the on-disk document from a live profile.
pub fn profile_to_dto(profile: &Profile) -> anyhow::Result<ProfileV1> {
    let queries = profile
        .queries()
        .map(|(name, query)| {
            Ok(SavedQueryEntryV1 {
                name: name.to_string(),
                query: query_to_dto(query)?,
            })
        })
        .collect::<anyhow::Result<Vec<_>>>()?;

    let bags = profile
        .bags()
        .map(|(name, bag)| {
            Ok(SavedBagEntryV1 {
                name: name.to_string(),
                bag: bag_to_dto(bag)?,
            })
        })
        .collect::<anyhow::Result<Vec<_>>>()?;

    let templates = profile
        .templates()
        .map(|(name, template)| {
            Ok(TemplateEntryV1 {
                name: name.to_string(),
                template: template_to_dto(template)?,
            })
        })
        .collect::<anyhow::Result<Vec<_>>>()?;

    Ok(ProfileV1 {
        schema_version: PROFILE_V1_VERSION.to_string(),
        username: profile.username().to_string(),
        credential: profile.credential().expose().to_string(),
        queries,
        bags,
        templates,
    })
}

fn query_to_dto(query: &SavedQuery) -> anyhow::Result<SavedQueryV1> {
    Ok(SavedQueryV1 {
        name: query.name.clone(),
        created_at: query.created_at,
        definition: serde_json::to_string(&query.definition)
            .with_context(|| format!("Failed to encode definition of query '{}'", query.name))?,
    })
}

fn bag_to_dto(bag: &SavedBag) -> anyhow::Result<SavedBagV1> {
    match bag {
        SavedBag::Id(id_bag) => Ok(SavedBagV1 {
            kind: BagKind::Id,
            ids: id_bag.ids.iter().copied().collect(),
            values: Vec::new(),
        }),
        SavedBag::Primitive(primitive_bag) => Ok(SavedBagV1 {
            kind: BagKind::Primitive,
            ids: Vec::new(),
            values: primitive_bag
                .values
                .iter()
                .map(|value| {
                    serde_json::to_string(value).context("Failed to encode primitive bag value")
                })
                .collect::<anyhow::Result<Vec<_>>>()?,
        }),
    }
}

fn template_to_dto(template: &TemplateQuery) -> anyhow::Result<TemplateQueryV1> {
    Ok(TemplateQueryV1 {
        name: template.name.clone(),
        created_at: template.created_at,
        definition: serde_json::to_string(&template.definition).with_context(|| {
            format!("Failed to encode definition of template '{}'", template.name)
        })?,
        category: template.category.clone(),
        title: template.title.clone(),
        description: template.description.clone(),
        keywords: template.keywords.clone(),
    })
}

// ============================================================================
// DTO -> Domain
// ============================================================================

/// Rebuilds `(name, value)` pairs for the three persisted collections.
pub fn dto_to_collections(
    dto: &ProfileV1,
) -> anyhow::Result<(
    Vec<(String, SavedQuery)>,
    Vec<(String, SavedBag)>,
    Vec<(String, TemplateQuery)>,
)> {
    let queries = dto
        .queries
        .iter()
        .map(|entry| Ok((entry.name.clone(), query_from_dto(&entry.query)?)))
        .collect::<anyhow::Result<Vec<_>>>()?;

    let bags = dto
        .bags
        .iter()
        .map(|entry| Ok((entry.name.clone(), bag_from_dto(&entry.bag)?)))
        .collect::<anyhow::Result<Vec<_>>>()?;

    let templates = dto
        .templates
        .iter()
        .map(|entry| Ok((entry.name.clone(), template_from_dto(&entry.template)?)))
        .collect::<anyhow::Result<Vec<_>>>()?;

    Ok((queries, bags, templates))
}

fn query_from_dto(dto: &SavedQueryV1) -> anyhow::Result<SavedQuery> {
    Ok(SavedQuery {
        name: dto.name.clone(),
        created_at: dto.created_at,
        definition: serde_json::from_str(&dto.definition)
            .with_context(|| format!("Failed to decode definition of query '{}'", dto.name))?,
    })
}

fn bag_from_dto(dto: &SavedBagV1) -> anyhow::Result<SavedBag> {
    match dto.kind {
        BagKind::Id => Ok(SavedBag::Id(IdBag {
            ids: dto.ids.iter().copied().collect(),
        })),
        BagKind::Primitive => Ok(SavedBag::Primitive(PrimitiveBag {
            values: dto
                .values
                .iter()
                .map(|value| {
                    serde_json::from_str(value).context("Failed to decode primitive bag value")
                })
                .collect::<anyhow::Result<Vec<_>>>()?,
        })),
    }
}

fn template_from_dto(dto: &TemplateQueryV1) -> anyhow::Result<TemplateQuery> {
    Ok(TemplateQuery {
        name: dto.name.clone(),
        created_at: dto.created_at,
        definition: serde_json::from_str(&dto.definition)
            .with_context(|| format!("Failed to decode definition of template '{}'", dto.name))?,
        category: dto.category.clone(),
        title: dto.title.clone(),
        description: dto.description.clone(),
        keywords: dto.keywords.clone(),
    })
}
