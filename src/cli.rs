use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::fees::{FeeCalculator, FeeInput};
use crate::pricing::PricingTierResolver;
use crate::rules::types::ListingType;
use crate::rules::validate::validate_rules;
use crate::store::loader::{load_catalog_json, load_rules};
use crate::store::InMemoryStore;

#[derive(Parser)]
#[command(name = "fee-engine")]
#[command(about = "Marketplace fee and tiered pricing calculator")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Compute the fee breakdown for a listing sale
    Quote {
        /// Sale price
        #[arg(long)]
        price: f64,
        /// Category id the listing belongs to
        #[arg(long)]
        category: Option<i64>,
        /// Listing type (buy_now, auction)
        #[arg(long)]
        listing_type: Option<String>,
        /// Currency code carried through to the breakdown
        #[arg(long)]
        currency: Option<String>,
        /// Path to the rule set (JSON array or CSV export)
        #[arg(long)]
        rules: PathBuf,
        /// Evaluate as of this instant (RFC3339) instead of now
        #[arg(long)]
        at: Option<String>,
        /// Ignore rules with a version above this (historical recomputation)
        #[arg(long)]
        pin_version: Option<i32>,
    },
    /// Quote a wholesale quantity against a product's tier schedule
    Tier {
        /// Product id
        #[arg(long)]
        product: u64,
        /// Requested quantity
        #[arg(long)]
        quantity: u32,
        /// Path to the catalog JSON (products with tier schedules)
        #[arg(long)]
        catalog: PathBuf,
    },
    /// Sanity-check a rule set and report issues
    ValidateRules {
        /// Path to the rule set (JSON array or CSV export)
        #[arg(long)]
        rules: PathBuf,
    },
}

fn parse_instant(raw: &str) -> Result<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(raw)
        .map(|t| t.with_timezone(&Utc))
        .context("Invalid --at instant (use RFC3339)")
}

impl Cli {
    pub fn execute(self) -> Result<()> {
        match self.command {
            Commands::Quote {
                price,
                category,
                listing_type,
                currency,
                rules,
                at,
                pin_version,
            } => {
                let listing_type = listing_type
                    .as_deref()
                    .map(str::parse::<ListingType>)
                    .transpose()?;
                let rule_set = load_rules(&rules)?;
                let calculator = FeeCalculator::new(InMemoryStore::with_rules(rule_set));

                let input = FeeInput {
                    price,
                    category_id: category,
                    listing_type,
                    currency,
                };

                let breakdown = match (pin_version, at) {
                    (Some(version), at) => {
                        let instant = at
                            .as_deref()
                            .map(parse_instant)
                            .transpose()?
                            .unwrap_or_else(Utc::now);
                        calculator.calculate_fees_with_version(&input, version, instant)?
                    }
                    (None, Some(at)) => {
                        // Pinning a date without a version still replays the
                        // rule set as of that instant.
                        calculator.calculate_fees_with_version(
                            &input,
                            i32::MAX,
                            parse_instant(&at)?,
                        )?
                    }
                    (None, None) => calculator.calculate_fees(&input)?,
                };

                println!("{}", serde_json::to_string_pretty(&breakdown)?);
                Ok(())
            }
            Commands::Tier {
                product,
                quantity,
                catalog,
            } => {
                let store = load_catalog_json(&catalog)?;
                let resolver = PricingTierResolver::new(store);
                let pricing = resolver.price_for_quantity(product, quantity)?;
                println!("{}", serde_json::to_string_pretty(&pricing)?);
                Ok(())
            }
            Commands::ValidateRules { rules } => {
                let rule_set = load_rules(&rules)?;
                let issues = validate_rules(&rule_set);
                if issues.is_empty() {
                    println!("OK: {} rules, no issues", rule_set.len());
                } else {
                    for issue in &issues {
                        println!("{:?}", issue);
                    }
                    anyhow::bail!("{} issue(s) found", issues.len());
                }
                Ok(())
            }
        }
    }
}
