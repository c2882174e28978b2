use std::path::Path;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::Deserialize;

use crate::pricing::{PricingTier, Product};
use crate::rules::types::FeeRule;
use crate::store::InMemoryStore;

/// Loads a rule set from a JSON array of [`FeeRule`] records.
pub fn load_rules_json(path: &Path) -> Result<Vec<FeeRule>> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read rules file: {}", path.display()))?;
    serde_json::from_str(&raw).context("Failed to parse rules JSON")
}

/// One row of an administrative CSV rule export. Empty cells mean "unset".
#[derive(Debug, Deserialize)]
struct CsvRule {
    id: u64,
    category_id: Option<i64>,
    listing_type: Option<String>,
    min_price: Option<f64>,
    max_price: Option<f64>,
    effective_from: String,
    effective_to: Option<String>,
    fee_type: String,
    fee_value: f64,
    payment_processing_fee: Option<f64>,
    listing_fee: Option<f64>,
    priority: i32,
    version: i32,
    is_active: bool,
}

fn parse_timestamp(raw: &str) -> Result<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(raw)
        .map(|t| t.with_timezone(&Utc))
        .with_context(|| format!("Invalid timestamp (use RFC3339): {}", raw))
}

impl CsvRule {
    fn into_rule(self) -> Result<FeeRule> {
        Ok(FeeRule {
            id: self.id,
            category_id: self.category_id,
            listing_type: self
                .listing_type
                .as_deref()
                .filter(|s| !s.is_empty())
                .map(str::parse)
                .transpose()?,
            min_price: self.min_price,
            max_price: self.max_price,
            effective_from: parse_timestamp(&self.effective_from)?,
            effective_to: self
                .effective_to
                .as_deref()
                .filter(|s| !s.is_empty())
                .map(parse_timestamp)
                .transpose()?,
            fee_type: self.fee_type.parse()?,
            fee_value: self.fee_value,
            payment_processing_fee: self.payment_processing_fee,
            listing_fee: self.listing_fee,
            priority: self.priority,
            version: self.version,
            is_active: self.is_active,
        })
    }
}

/// Loads a rule set from a CSV export with a header row.
pub fn load_rules_csv(path: &Path) -> Result<Vec<FeeRule>> {
    let mut reader = csv::Reader::from_path(path)
        .with_context(|| format!("Failed to open rules CSV: {}", path.display()))?;

    let mut rules = Vec::new();
    for record in reader.deserialize() {
        let row: CsvRule = record.context("Failed to parse rules CSV row")?;
        rules.push(row.into_rule()?);
    }
    Ok(rules)
}

/// Loads rules from JSON or CSV based on the file extension.
pub fn load_rules(path: &Path) -> Result<Vec<FeeRule>> {
    match path.extension().and_then(|s| s.to_str()) {
        Some("csv") => load_rules_csv(path),
        _ => load_rules_json(path),
    }
}

#[derive(Debug, Deserialize)]
struct CatalogTier {
    min_quantity: u32,
    #[serde(default)]
    max_quantity: Option<u32>,
    price_per_unit: f64,
}

#[derive(Debug, Deserialize)]
struct CatalogProduct {
    id: u64,
    name: String,
    base_price: f64,
    #[serde(default)]
    tiers: Vec<CatalogTier>,
}

#[derive(Debug, Deserialize)]
struct CatalogFile {
    products: Vec<CatalogProduct>,
}

/// Loads a wholesale catalog (products plus their tier schedules) from JSON
/// into an [`InMemoryStore`].
pub fn load_catalog_json(path: &Path) -> Result<InMemoryStore> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read catalog file: {}", path.display()))?;
    let catalog: CatalogFile = serde_json::from_str(&raw).context("Failed to parse catalog JSON")?;

    let mut store = InMemoryStore::new();
    for product in catalog.products {
        let tiers = product
            .tiers
            .into_iter()
            .map(|t| PricingTier {
                product_id: product.id,
                min_quantity: t.min_quantity,
                max_quantity: t.max_quantity,
                price_per_unit: t.price_per_unit,
            })
            .collect();
        store.add_product(
            Product {
                id: product.id,
                name: product.name,
                base_price: product.base_price,
            },
            tiers,
        );
    }
    Ok(store)
}
