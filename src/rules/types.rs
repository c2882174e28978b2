use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// How a listing is sold. A rule with no listing type applies to both.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ListingType {
    BuyNow,
    Auction,
}

/// How the platform-fee value of a rule is interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FeeType {
    /// `fee_value` is a percentage of the sale price.
    Percentage,
    /// `fee_value` is a flat amount in the request currency.
    Fixed,
}

impl std::str::FromStr for ListingType {
    type Err = anyhow::Error;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw {
            "buy_now" => Ok(ListingType::BuyNow),
            "auction" => Ok(ListingType::Auction),
            _ => anyhow::bail!("Unknown listing type: {}", raw),
        }
    }
}

impl std::str::FromStr for FeeType {
    type Err = anyhow::Error;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw {
            "PERCENTAGE" => Ok(FeeType::Percentage),
            "FIXED" => Ok(FeeType::Fixed),
            _ => anyhow::bail!("Unknown fee type: {}", raw),
        }
    }
}

/// One configurable fee policy entry.
///
/// Scope fields are nullable: `None` means "applies to everything" on that
/// axis. A rule is applicable to a request when every scope axis matches,
/// the rule is active, and the evaluation instant falls inside its
/// effective window (see [`FeeRule::applies_to`]).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeeRule {
    pub id: u64,
    #[serde(default)]
    pub category_id: Option<i64>,
    #[serde(default)]
    pub listing_type: Option<ListingType>,
    #[serde(default)]
    pub min_price: Option<f64>,
    #[serde(default)]
    pub max_price: Option<f64>,
    pub effective_from: DateTime<Utc>,
    #[serde(default)]
    pub effective_to: Option<DateTime<Utc>>,
    pub fee_type: FeeType,
    pub fee_value: f64,
    /// Percentage charged for payment processing, when this rule overrides it.
    #[serde(default)]
    pub payment_processing_fee: Option<f64>,
    /// Flat listing fee, when this rule charges one.
    #[serde(default)]
    pub listing_fee: Option<f64>,
    #[serde(default)]
    pub priority: i32,
    #[serde(default = "default_version")]
    pub version: i32,
    #[serde(default = "default_active")]
    pub is_active: bool,
}

fn default_version() -> i32 {
    1
}

fn default_active() -> bool {
    true
}

/// The scope filter a fee calculation runs against.
///
/// `at` is the evaluation instant; live calculations pass the current time,
/// historical recomputation pins a past instant and optionally a maximum
/// rule version via `max_version`.
#[derive(Debug, Clone, Copy)]
pub struct RuleQuery {
    pub category_id: Option<i64>,
    pub listing_type: Option<ListingType>,
    pub price: f64,
    pub at: DateTime<Utc>,
    pub max_version: Option<i32>,
}

impl RuleQuery {
    pub fn live(
        category_id: Option<i64>,
        listing_type: Option<ListingType>,
        price: f64,
        at: DateTime<Utc>,
    ) -> Self {
        Self {
            category_id,
            listing_type,
            price,
            at,
            max_version: None,
        }
    }
}

impl FeeRule {
    /// Whether this rule applies to the given request.
    pub fn applies_to(&self, query: &RuleQuery) -> bool {
        if !self.is_active {
            return false;
        }
        if self.effective_from > query.at {
            return false;
        }
        if let Some(until) = self.effective_to {
            if until < query.at {
                return false;
            }
        }
        if let Some(max_version) = query.max_version {
            if self.version > max_version {
                return false;
            }
        }
        // Scope axes: a null attribute matches everything.
        if self.category_id.is_some() && self.category_id != query.category_id {
            return false;
        }
        if self.listing_type.is_some() && self.listing_type != query.listing_type {
            return false;
        }
        if let Some(min) = self.min_price {
            if query.price < min {
                return false;
            }
        }
        if let Some(max) = self.max_price {
            if query.price > max {
                return false;
            }
        }
        true
    }
}
