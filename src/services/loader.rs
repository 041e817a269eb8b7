use serde::Deserialize;
use serde_json::Value;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::models::{Entity, Role};

/// Errors that can occur while loading a registry file
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },
}

/// One row of a registry file as exported from the spreadsheet
#[derive(Debug, Deserialize)]
struct RawRow {
    #[serde(default)]
    company_name: Option<String>,
    #[serde(default)]
    city: Option<String>,
    #[serde(default)]
    latitude: Option<Value>,
    #[serde(default)]
    longitude: Option<Value>,
    #[serde(default)]
    produce_needed: Option<String>,
    #[serde(default)]
    type_produced: Option<String>,
}

impl RawRow {
    fn into_entity(self, role: Role) -> Option<Entity> {
        let latitude = self.latitude.as_ref().and_then(parse_coordinate)?;
        let longitude = self.longitude.as_ref().and_then(parse_coordinate)?;
        let company_name = self.company_name?;

        let product_terms = match role {
            Role::Buyer => self.produce_needed,
            Role::Producer => self.type_produced,
        };

        Some(Entity::new(
            company_name,
            self.city.unwrap_or_default(),
            latitude,
            longitude,
            product_terms.unwrap_or_default(),
        ))
    }
}

/// Both registries, ready to be published as a snapshot
#[derive(Debug, Clone, Default)]
pub struct RecordSets {
    pub buyers: Vec<Entity>,
    pub producers: Vec<Entity>,
}

/// Accept JSON numbers and numeric strings; anything non-finite is rejected
fn parse_coordinate(value: &Value) -> Option<f64> {
    let parsed = match value {
        Value::Number(number) => number.as_f64(),
        Value::String(text) => text.trim().parse::<f64>().ok(),
        _ => None,
    };

    parsed.filter(|coordinate| coordinate.is_finite())
}

/// Parse a registry from a JSON array of rows
///
/// Rows without a company name or a usable coordinate pair are dropped, so
/// every returned entity can be handed straight to the distance calculator.
pub fn parse_entities(role: Role, json: &str) -> Result<Vec<Entity>, serde_json::Error> {
    let rows: Vec<RawRow> = serde_json::from_str(json)?;
    let total = rows.len();

    let entities: Vec<Entity> = rows
        .into_iter()
        .enumerate()
        .filter_map(|(index, row)| {
            let entity = row.into_entity(role);
            if entity.is_none() {
                tracing::debug!("Dropping {} row {}: missing name or coordinates", role, index);
            }
            entity
        })
        .collect();

    if entities.len() < total {
        tracing::info!(
            "Loaded {} of {} {} rows ({} dropped)",
            entities.len(),
            total,
            role,
            total - entities.len()
        );
    }

    Ok(entities)
}

/// Load one registry file
pub fn load_entities(role: Role, path: &Path) -> Result<Vec<Entity>, LoadError> {
    let json = std::fs::read_to_string(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    parse_entities(role, &json).map_err(|source| LoadError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

/// Load both registry files
pub fn load_record_sets(buyers_path: &Path, producers_path: &Path) -> Result<RecordSets, LoadError> {
    let buyers = load_entities(Role::Buyer, buyers_path)?;
    let producers = load_entities(Role::Producer, producers_path)?;

    tracing::info!(
        "Loaded {} buyers from {} and {} producers from {}",
        buyers.len(),
        buyers_path.display(),
        producers.len(),
        producers_path.display()
    );

    Ok(RecordSets { buyers, producers })
}
