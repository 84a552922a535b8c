//! Trend-based revenue forecasting and customer lifetime value.

use chrono::{DateTime, Datelike};
use serde::Serialize;
use std::collections::BTreeMap;

use revlens_types::{Charge, ChargeStatus};

use crate::round2;

/// One forecasted month.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonthForecast {
    /// Calendar month label, `YYYY-MM`.
    pub month: String,
    pub forecasted_revenue: f64,
    /// Decreases with horizon distance, floored at 0.5.
    pub confidence: f64,
}

/// Forecast revenue `months_ahead` months past the last observed month.
///
/// Succeeded charges are bucketed by calendar month; the average
/// month-over-month growth rate (transitions out of a zero-revenue month are
/// skipped, and fewer than 3 observed months means zero growth) is dampened
/// by 0.8 and compounded from the last observed month's revenue. Fewer than
/// 2 distinct months is insufficient data and yields an empty forecast, not
/// an error; the dashboard simply has nothing to plot yet.
pub fn forecast_revenue(charges: &[Charge], months_ahead: u32) -> Vec<MonthForecast> {
    // Keyed by (year, month) so ordering is calendar order for free.
    let mut monthly: BTreeMap<(i32, u32), f64> = BTreeMap::new();
    for charge in charges {
        if charge.status != ChargeStatus::Succeeded {
            continue;
        }
        let Some(created) = DateTime::from_timestamp(charge.created, 0) else {
            continue;
        };
        *monthly.entry((created.year(), created.month())).or_insert(0.0) +=
            charge.amount as f64 / 100.0;
    }

    if monthly.len() < 2 {
        return Vec::new();
    }

    let revenues: Vec<f64> = monthly.values().copied().collect();
    let avg_growth = if revenues.len() < 3 {
        0.0
    } else {
        let growth_rates: Vec<f64> = revenues
            .windows(2)
            .filter(|pair| pair[0] > 0.0)
            .map(|pair| (pair[1] - pair[0]) / pair[0])
            .collect();
        if growth_rates.is_empty() {
            0.0
        } else {
            growth_rates.iter().sum::<f64>() / growth_rates.len() as f64
        }
    };
    // 20% more conservative than the observed trend.
    let dampened_growth = avg_growth * 0.8;

    let Some((&(last_year, last_month), &last_revenue)) = monthly.iter().next_back() else {
        return Vec::new();
    };

    (1..=months_ahead)
        .map(|i| {
            let months_from_jan = last_month - 1 + i;
            let year = last_year + (months_from_jan / 12) as i32;
            let month = months_from_jan % 12 + 1;
            MonthForecast {
                month: format!("{year:04}-{month:02}"),
                forecasted_revenue: round2(last_revenue * (1.0 + dampened_growth).powi(i as i32)),
                confidence: f64::max(0.5, 0.9 - i as f64 * 0.1),
            }
        })
        .collect()
}

/// Estimated lifetime value of one customer from their charge history.
///
/// Sums the customer's succeeded charges; a single transaction returns its
/// revenue as-is (nothing to project from), otherwise the monthly run rate
/// over the active span (whole days / 30.44, at least one month) is
/// projected over a fixed 24-month lifespan. No matching charges is a valid
/// answer of 0.0.
pub fn customer_lifetime_value(customer_id: &str, charges: &[Charge]) -> f64 {
    let matching: Vec<&Charge> = charges
        .iter()
        .filter(|charge| {
            charge.status == ChargeStatus::Succeeded
                && charge.customer_id() == Some(customer_id)
        })
        .collect();

    if matching.is_empty() {
        return 0.0;
    }

    let total_revenue: f64 = matching
        .iter()
        .map(|charge| charge.amount as f64 / 100.0)
        .sum();

    if matching.len() < 2 {
        return total_revenue;
    }

    let earliest = matching.iter().map(|c| c.created).min().unwrap_or(0);
    let latest = matching.iter().map(|c| c.created).max().unwrap_or(0);
    // Whole days between first and last charge, matching the reporting the
    // dashboard has always shown.
    let days = ((latest - earliest) / 86_400) as f64;
    let months_active = f64::max(1.0, days / 30.44);
    let monthly_value = total_revenue / months_active;

    round2(monthly_value * 24.0)
}
