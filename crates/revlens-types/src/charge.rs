//! Charge records and payment-method detail shapes.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::customer::CustomerRef;

/// One payment attempt.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Charge {
    pub id: String,
    /// Amount in minor currency units (cents).
    pub amount: i64,
    pub currency: String,
    pub status: ChargeStatus,
    /// Creation timestamp, epoch seconds.
    pub created: i64,
    #[serde(default)]
    pub customer: Option<CustomerRef>,
    #[serde(default)]
    pub payment_method_details: Option<PaymentMethodDetails>,
    /// Legacy card source, present on older charges without
    /// `payment_method_details`.
    #[serde(default)]
    pub source: Option<CardSource>,
    #[serde(default)]
    pub metadata: HashMap<String, String>,
    #[serde(default)]
    pub description: Option<String>,
}

impl Charge {
    /// Customer id when a customer reference is present in either shape.
    pub fn customer_id(&self) -> Option<&str> {
        self.customer.as_ref().map(CustomerRef::id)
    }
}

/// Charge status. Unrecognized statuses (dispute sub-states and the like)
/// bucket as `Other` rather than failing deserialization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChargeStatus {
    Succeeded,
    Failed,
    Pending,
    Canceled,
    Refunded,
    Disputed,
    #[serde(other)]
    Other,
}

/// Payment method detail record on a charge.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaymentMethodDetails {
    /// Raw method type: `card`, `ach_debit`, `sepa_debit`, ...
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub card: Option<CardDetails>,
}

/// Card sub-record of the payment method details.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CardDetails {
    #[serde(default)]
    pub brand: Option<String>,
    #[serde(default)]
    pub wallet: Option<Wallet>,
}

/// Wallet used for a card payment (Apple Pay, Google Pay, ...).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Wallet {
    #[serde(rename = "type")]
    pub kind: String,
}

/// Legacy `source` shape on older charges.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CardSource {
    #[serde(default)]
    pub object: Option<String>,
    #[serde(default)]
    pub brand: Option<String>,
}
