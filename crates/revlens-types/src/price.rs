//! Prices, legacy plans, and products.

use serde::{Deserialize, Serialize};

/// Price record. Covers both the modern price shape (`unit_amount`,
/// `recurring.interval`) and the legacy plan shape (`amount`, `interval`);
/// the accessors below own the precedence between them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Price {
    pub id: String,
    /// Unit amount in minor currency units (cents).
    #[serde(default)]
    pub unit_amount: Option<i64>,
    /// Decimal string variant of the unit amount.
    #[serde(default)]
    pub unit_amount_decimal: Option<String>,
    /// Legacy plan amount in minor currency units.
    #[serde(default)]
    pub amount: Option<i64>,
    #[serde(default)]
    pub currency: Option<String>,
    #[serde(default)]
    pub recurring: Option<Recurring>,
    /// Legacy plan billing interval.
    #[serde(default)]
    pub interval: Option<BillingInterval>,
    #[serde(default)]
    pub nickname: Option<String>,
    #[serde(default)]
    pub product: Option<ProductRef>,
}

impl Price {
    /// Unit amount in minor units across all shapes:
    /// `unit_amount`, then legacy `amount`, then `unit_amount_decimal`.
    pub fn effective_unit_amount(&self) -> Option<f64> {
        if let Some(unit_amount) = self.unit_amount {
            return Some(unit_amount as f64);
        }
        if let Some(amount) = self.amount {
            return Some(amount as f64);
        }
        self.unit_amount_decimal
            .as_deref()
            .and_then(|decimal| decimal.parse().ok())
    }

    /// Billing interval across both shapes: `recurring.interval`, then the
    /// legacy top-level `interval`.
    pub fn effective_interval(&self) -> Option<BillingInterval> {
        self.recurring
            .as_ref()
            .map(|recurring| recurring.interval)
            .or(self.interval)
    }
}

/// Recurrence sub-record of a modern price.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Recurring {
    pub interval: BillingInterval,
    #[serde(default)]
    pub interval_count: Option<u32>,
}

/// Billing interval.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BillingInterval {
    Day,
    Week,
    Month,
    Year,
}

/// Price field as it appears on subscription items and legacy plans: either
/// a bare id string (requires a directory lookup before monetary use) or the
/// expanded price record.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PriceRef {
    Id(String),
    Expanded(Box<Price>),
}

impl PriceRef {
    /// Price id regardless of shape.
    pub fn id(&self) -> &str {
        match self {
            PriceRef::Id(id) => id,
            PriceRef::Expanded(price) => &price.id,
        }
    }
}

/// Product record (only the fields the dashboard reads).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Product {
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
}

/// Product field on a price: bare id or expanded record.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ProductRef {
    Id(String),
    Expanded(Product),
}
