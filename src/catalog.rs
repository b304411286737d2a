//! Catalog of searchable substation components
//!
//! Entity records, the built-in substation catalog and JSON catalog loading.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::Path;
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("Duplicate entity id: {0}")]
    DuplicateId(String),
    #[error("Entity {field} cannot be empty (id: '{id}')")]
    EmptyField { field: &'static str, id: String },
    #[error("Failed to read catalog: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to parse catalog: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Classification of a catalog component
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum EntityType {
    Transformer,
    Breaker,
    Generator,
    Isolator,
    Unknown,
}

impl EntityType {
    /// Lowercase tag, also used as a search token
    pub fn as_str(&self) -> &'static str {
        match self {
            EntityType::Transformer => "transformer",
            EntityType::Breaker => "breaker",
            EntityType::Generator => "generator",
            EntityType::Isolator => "isolator",
            EntityType::Unknown => "unknown",
        }
    }
}

impl fmt::Display for EntityType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A searchable catalog record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct Entity {
    /// Unique, stable identifier (e.g. "T-L-3")
    pub id: String,
    /// Display name (e.g. "Left Side Transformer 3")
    pub name: String,
    #[serde(rename = "type")]
    pub kind: EntityType,
}

impl Entity {
    pub fn new(id: impl Into<String>, name: impl Into<String>, kind: EntityType) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            kind,
        }
    }

    /// Reject records with blank id or name
    pub fn validate(&self) -> Result<(), CatalogError> {
        if self.id.trim().is_empty() {
            return Err(CatalogError::EmptyField {
                field: "id",
                id: self.id.clone(),
            });
        }
        if self.name.trim().is_empty() {
            return Err(CatalogError::EmptyField {
                field: "name",
                id: self.id.clone(),
            });
        }
        Ok(())
    }
}

/// Load a catalog from a JSON array of `{ "id", "name", "type" }` records
pub fn load_catalog(path: &Path) -> Result<Vec<Entity>, CatalogError> {
    let data = fs::read_to_string(path)?;
    let entities: Vec<Entity> = serde_json::from_str(&data)?;
    debug!("Loaded {} entities from {}", entities.len(), path.display());
    Ok(entities)
}

/// JSON Schema of the catalog file format
pub fn catalog_schema() -> Result<serde_json::Value, CatalogError> {
    let schema = schemars::schema_for!(Vec<Entity>);
    Ok(serde_json::to_value(schema)?)
}

const SIDES: [(&str, &str); 2] = [("L", "Left"), ("R", "Right")];
const BAYS_PER_SIDE: u32 = 8;
const PHASES: [&str; 3] = ["A", "B", "C"];

/// Components of the substation yard, in display order
pub fn substation_catalog() -> Vec<Entity> {
    let mut items = vec![
        Entity::new("CR-MAIN", "Main Control HQ", EntityType::Unknown),
        Entity::new("CR-GEN", "Side B Control Room", EntityType::Unknown),
        Entity::new("GEN-01", "Turbo-Generator Unit 1", EntityType::Generator),
        Entity::new("BAT-BLDG", "Battery Room Annex", EntityType::Unknown),
        Entity::new("BAT-110V-DC", "110V DC Battery Bank", EntityType::Unknown),
    ];

    for (side, side_name) in SIDES {
        for bay in 1..=BAYS_PER_SIDE {
            items.push(Entity::new(
                format!("T-{}-{}", side, bay),
                format!("{} Side Transformer {}", side_name, bay),
                EntityType::Transformer,
            ));
            items.push(Entity::new(
                format!("GANTRY-LINE-{}-{}", side, bay),
                format!("{} Gantry Tower {}", side_name, bay),
                EntityType::Unknown,
            ));
            for (phase, phase_name) in PHASES.iter().enumerate() {
                items.push(Entity::new(
                    format!("CB-{}-{}-{}", side, bay, phase),
                    format!("{} Breaker {} Ph-{}", side_name, bay, phase_name),
                    EntityType::Breaker,
                ));
            }
        }
    }

    items
}
