//! Subscription records across their historical shapes.

use serde::{Deserialize, Serialize};

use crate::customer::CustomerRef;
use crate::price::PriceRef;

/// Subscription record. Line items arrive in one of several shapes: an
/// embedded `items` list, nothing embedded (items fetched separately), or
/// the legacy single `plan` + `quantity` pair. `normalize_items` in
/// `revlens-analytics` owns the resolution order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Subscription {
    pub id: String,
    pub status: SubscriptionStatus,
    #[serde(default)]
    pub customer: Option<CustomerRef>,
    /// Creation timestamp, epoch seconds.
    pub created: i64,
    #[serde(default)]
    pub items: Option<ItemList>,
    /// Legacy single-plan shape.
    #[serde(default)]
    pub plan: Option<PriceRef>,
    /// Quantity accompanying the legacy `plan` field.
    #[serde(default)]
    pub quantity: Option<u64>,
}

/// Subscription status. Unrecognized statuses bucket as `Other`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SubscriptionStatus {
    Active,
    Trialing,
    PastDue,
    Canceled,
    Incomplete,
    IncompleteExpired,
    Unpaid,
    #[serde(other)]
    Other,
}

/// Embedded list wrapper around subscription items.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ItemList {
    #[serde(default)]
    pub data: Vec<SubscriptionItem>,
}

/// One subscription line item: a price reference plus a quantity.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubscriptionItem {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub price: Option<PriceRef>,
    /// Defaults to 1 when absent.
    #[serde(default)]
    pub quantity: Option<u64>,
}
