//! Billing metrics derivation layer.
//!
//! Pure, synchronous transformations from payment-API records
//! (`revlens-types`) to normalized financial metrics:
//!
//! ```text
//! charges ──────────┬─► estimate_fees ──────────► FeeAnalysis
//!                   ├─► forecast_revenue ───────► Vec<MonthForecast>
//!                   └─► customer_lifetime_value ► f64
//! subscriptions ────┬─► compute_mrr_arr ────────► RecurringRevenue
//!                   └─► compute_churn_metrics ──► ChurnMetrics
//! ```
//!
//! Every function is stateless and side-effect-free: the caller fetches the
//! record collections (and handles pagination, retries and caching upstream),
//! then invokes these directly. Unresolvable records are skipped with a
//! `tracing` debug event, and "no data" is always a first-class zero/empty
//! answer rather than an error: the dashboard renders partial results even
//! when some inputs are malformed.
//!
//! Monetary inputs are minor currency units (cents); monetary outputs are
//! major units rounded to 2 decimal places.

pub mod churn;
pub mod fees;
pub mod forecast;
pub mod items;
pub mod payment_method;
pub mod recurring;
pub mod resolve;

pub use churn::{compute_churn_metrics, ChurnMetrics};
pub use fees::{estimate_fees, estimate_fees_with, FeeAnalysis, MethodFees};
pub use forecast::{customer_lifetime_value, forecast_revenue, MonthForecast};
pub use items::{
    normalize_items, plan_display_name, resolve_price, subscription_amount,
    subscription_interval, LineItem,
};
pub use payment_method::payment_method_label;
pub use recurring::{compute_mrr_arr, RecurringRevenue};
pub use resolve::{BillingDirectory, CachingDirectory, DirectoryError, NoDirectory, StaticDirectory};

/// Round to 2 decimal places, applied at the API boundary of every monetary
/// output.
pub(crate) fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
