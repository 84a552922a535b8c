//! Subscription line-item normalization.
//!
//! Subscriptions arrive in at least four shapes: embedded `items.data`,
//! items fetched separately, the legacy single `plan` + `quantity` pair, or
//! nothing at all. All calculators go through [`normalize_items`] so that
//! shape handling lives in exactly one place.

use tracing::debug;

use revlens_types::{BillingInterval, Price, PriceRef, Subscription};

use crate::resolve::BillingDirectory;

/// A normalized line item: a price reference plus its quantity.
#[derive(Debug, Clone)]
pub struct LineItem {
    pub price: PriceRef,
    pub quantity: u64,
}

/// Normalize a subscription's line items. Resolution order, first success
/// wins:
///
/// 1. embedded `items.data`,
/// 2. a directory lookup by subscription id (an `Ok` result wins even when
///    the list is empty),
/// 3. the legacy `plan` field, synthesized as a single item with the
///    subscription-level quantity,
/// 4. no items.
///
/// Items carrying no price reference at all are dropped here; bare price ids
/// are kept and resolved later via [`resolve_price`].
pub fn normalize_items(subscription: &Subscription, directory: &dyn BillingDirectory) -> Vec<LineItem> {
    if let Some(list) = &subscription.items {
        return collect_items(&list.data);
    }

    match directory.subscription_items(&subscription.id) {
        Ok(data) => return collect_items(&data),
        Err(err) => {
            debug!(subscription = %subscription.id, %err, "items lookup failed, trying legacy plan");
        }
    }

    if let Some(plan) = &subscription.plan {
        return vec![LineItem {
            price: plan.clone(),
            quantity: subscription.quantity.unwrap_or(1),
        }];
    }

    Vec::new()
}

fn collect_items(data: &[revlens_types::SubscriptionItem]) -> Vec<LineItem> {
    data.iter()
        .filter_map(|item| {
            let price = match &item.price {
                Some(price) => price.clone(),
                None => {
                    debug!(item = ?item.id, "subscription item has no price, skipping");
                    return None;
                }
            };
            Some(LineItem {
                price,
                quantity: item.quantity.unwrap_or(1),
            })
        })
        .collect()
}

/// Resolve a price reference to a full price record, fetching through the
/// directory when only an id is present. `None` means the price could not be
/// resolved and the item should be skipped.
pub fn resolve_price(price: &PriceRef, directory: &dyn BillingDirectory) -> Option<Price> {
    match price {
        PriceRef::Expanded(price) => Some((**price).clone()),
        PriceRef::Id(id) => match directory.price(id) {
            Ok(price) => Some(price),
            Err(err) => {
                debug!(price = %id, %err, "price resolution failed, skipping item");
                None
            }
        },
    }
}

/// Major-unit amount of a subscription's first line item
/// (`unit_amount / 100 * quantity`), or 0.0 when nothing resolves.
pub fn subscription_amount(subscription: &Subscription, directory: &dyn BillingDirectory) -> f64 {
    let items = normalize_items(subscription, directory);
    let Some(item) = items.first() else {
        return 0.0;
    };
    let Some(price) = resolve_price(&item.price, directory) else {
        return 0.0;
    };
    match price.effective_unit_amount() {
        Some(unit_amount) => unit_amount / 100.0 * item.quantity as f64,
        None => 0.0,
    }
}

/// Billing interval of a subscription's first line item. Falls back to
/// monthly when nothing resolves, which is what the dashboard displays for
/// malformed records.
pub fn subscription_interval(
    subscription: &Subscription,
    directory: &dyn BillingDirectory,
) -> BillingInterval {
    normalize_items(subscription, directory)
        .first()
        .and_then(|item| resolve_price(&item.price, directory))
        .and_then(|price| price.effective_interval())
        .unwrap_or(BillingInterval::Month)
}

/// Human-readable plan name for a subscription: product name, product id,
/// price nickname, then an id-derived placeholder.
pub fn plan_display_name(subscription: &Subscription, directory: &dyn BillingDirectory) -> String {
    use revlens_types::ProductRef;

    let price = normalize_items(subscription, directory)
        .first()
        .and_then(|item| resolve_price(&item.price, directory));

    if let Some(price) = price {
        match &price.product {
            Some(ProductRef::Expanded(product)) => {
                if let Some(name) = &product.name {
                    return name.clone();
                }
            }
            Some(ProductRef::Id(id)) => return id.clone(),
            None => {}
        }
        if let Some(nickname) = &price.nickname {
            return nickname.clone();
        }
        return format!("Plan ({})", tail(&price.id, 8));
    }

    format!("Plan ({})", tail(&subscription.id, 8))
}

/// Last `n` characters of an id. Ids are normally ascii, but slicing must
/// stay on char boundaries for anything else.
fn tail(s: &str, n: usize) -> &str {
    let start = s
        .char_indices()
        .rev()
        .take(n)
        .last()
        .map_or(0, |(index, _)| index);
    &s[start..]
}
