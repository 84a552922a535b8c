//! Churn and trial-conversion rates.

use serde::Serialize;

use revlens_types::{Subscription, SubscriptionStatus};

use crate::round2;

/// Subscription status counts and the derived rates, in percent.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ChurnMetrics {
    pub total_subscriptions: usize,
    pub active_subscriptions: usize,
    pub trialing_subscriptions: usize,
    pub canceled_subscriptions: usize,
    /// `canceled / total * 100`, 0 when there are no subscriptions.
    pub churn_rate: f64,
    /// `active / (active + trialing) * 100`, a point-in-time proxy rather
    /// than a cohort conversion rate. 0 when the denominator is 0.
    pub trial_conversion_rate: f64,
}

/// Count subscription statuses and derive churn and trial-conversion rates.
/// Only exact status matches participate; `past_due`, `unpaid` and the rest
/// count toward the total only.
pub fn compute_churn_metrics(subscriptions: &[Subscription]) -> ChurnMetrics {
    let total = subscriptions.len();
    let count = |status: SubscriptionStatus| {
        subscriptions.iter().filter(|s| s.status == status).count()
    };
    let active = count(SubscriptionStatus::Active);
    let trialing = count(SubscriptionStatus::Trialing);
    let canceled = count(SubscriptionStatus::Canceled);

    let churn_rate = if total > 0 {
        canceled as f64 / total as f64 * 100.0
    } else {
        0.0
    };
    let trial_conversion_rate = if active + trialing > 0 {
        active as f64 / (active + trialing) as f64 * 100.0
    } else {
        0.0
    };

    ChurnMetrics {
        total_subscriptions: total,
        active_subscriptions: active,
        trialing_subscriptions: trialing,
        canceled_subscriptions: canceled,
        churn_rate: round2(churn_rate),
        trial_conversion_rate: round2(trial_conversion_rate),
    }
}
