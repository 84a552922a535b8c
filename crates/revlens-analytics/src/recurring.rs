//! Monthly and annual recurring revenue.

use serde::Serialize;
use tracing::debug;

use revlens_types::{BillingInterval, Subscription, SubscriptionStatus};

use crate::items::{normalize_items, resolve_price};
use crate::resolve::BillingDirectory;
use crate::round2;

/// Recurring-revenue run rate in major currency units.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RecurringRevenue {
    pub mrr: f64,
    pub arr: f64,
}

/// Compute MRR and ARR over active and trialing subscriptions.
///
/// Each subscription contributes its *first* line item only, converted to a
/// monthly equivalent by billing interval (year / 12, week x 4.33, day x 30).
/// ARR is always the blended `mrr * 12`, not the sum of genuinely-annual
/// subscriptions; multiple generations of the dashboard agreed on that
/// simplification and reports are calibrated against it. Subscriptions whose
/// price or interval cannot be resolved contribute nothing.
pub fn compute_mrr_arr(
    subscriptions: &[Subscription],
    directory: &dyn BillingDirectory,
) -> RecurringRevenue {
    let mut mrr = 0.0;

    for subscription in subscriptions {
        if !matches!(
            subscription.status,
            SubscriptionStatus::Active | SubscriptionStatus::Trialing
        ) {
            continue;
        }

        let items = normalize_items(subscription, directory);
        let Some(item) = items.first() else {
            debug!(subscription = %subscription.id, "no line items, contributes nothing");
            continue;
        };
        let Some(price) = resolve_price(&item.price, directory) else {
            continue;
        };
        let Some(unit_amount) = price.effective_unit_amount() else {
            debug!(price = %price.id, "price has no amount in any shape");
            continue;
        };
        let Some(interval) = price.effective_interval() else {
            debug!(price = %price.id, "price has no billing interval");
            continue;
        };

        let amount = unit_amount / 100.0 * item.quantity as f64;
        mrr += match interval {
            BillingInterval::Month => amount,
            BillingInterval::Year => amount / 12.0,
            BillingInterval::Week => amount * 4.33,
            BillingInterval::Day => amount * 30.0,
        };
    }

    let mrr = round2(mrr);
    RecurringRevenue { mrr, arr: mrr * 12.0 }
}
