//! Processor-fee estimation.
//!
//! Fees are estimates from the published rate card, not ledger data: the
//! payment API does not expose the actual fee on a charge without a separate
//! balance-transaction fetch. Rates are matched by case-insensitive substring
//! on the payment-method label, in priority order.

use serde::Serialize;
use std::collections::HashMap;

use revlens_types::{Charge, ChargeStatus};

use crate::payment_method::payment_method_label;
use crate::round2;

/// Fee aggregate for one payment-method label.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct MethodFees {
    pub total_fees: f64,
    pub count: u64,
    pub revenue: f64,
}

/// Fee analysis across a batch of charges, amounts in major currency units.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FeeAnalysis {
    pub total_fees: f64,
    pub total_revenue: f64,
    /// `total_fees / total_revenue * 100`, 0 without revenue.
    pub fee_percentage: f64,
    pub transaction_count: u64,
    pub average_fee_per_transaction: f64,
    pub fees_by_payment_method: HashMap<String, MethodFees>,
    /// Advisory text derived from fixed thresholds; not consumed elsewhere.
    pub recommendations: Vec<String>,
}

/// Estimate fees using the built-in payment-method labeler.
pub fn estimate_fees(charges: &[Charge]) -> FeeAnalysis {
    estimate_fees_with(charges, payment_method_label)
}

/// Estimate fees with a caller-supplied payment-method labeler. Only
/// succeeded charges are counted.
pub fn estimate_fees_with<F>(charges: &[Charge], label: F) -> FeeAnalysis
where
    F: Fn(&Charge) -> String,
{
    let mut total_fees = 0.0;
    let mut total_revenue = 0.0;
    let mut transaction_count = 0u64;
    let mut by_method: HashMap<String, MethodFees> = HashMap::new();

    for charge in charges {
        if charge.status != ChargeStatus::Succeeded {
            continue;
        }
        transaction_count += 1;
        let amount = charge.amount as f64 / 100.0;
        total_revenue += amount;

        let method = label(charge);
        let fee = estimate_fee(amount, &method);
        total_fees += fee;

        let entry = by_method.entry(method).or_default();
        entry.total_fees += fee;
        entry.count += 1;
        entry.revenue += amount;
    }

    let fee_percentage = if total_revenue > 0.0 {
        total_fees / total_revenue * 100.0
    } else {
        0.0
    };
    let average_fee = if transaction_count > 0 {
        total_fees / transaction_count as f64
    } else {
        0.0
    };

    let mut recommendations = Vec::new();
    if fee_percentage > 3.5 {
        recommendations
            .push("Consider negotiating lower rates with Stripe for your volume".to_string());
    }
    if by_method.keys().any(|method| method.to_lowercase().contains("amex")) {
        recommendations.push(
            "American Express transactions have higher fees - consider surcharging".to_string(),
        );
    }
    if transaction_count > 100 {
        recommendations
            .push("With your transaction volume, you may qualify for custom pricing".to_string());
    }

    FeeAnalysis {
        total_fees: round2(total_fees),
        total_revenue: round2(total_revenue),
        fee_percentage: round2(fee_percentage),
        transaction_count,
        average_fee_per_transaction: round2(average_fee),
        fees_by_payment_method: by_method,
        recommendations,
    }
}

/// Rate card, matched against the lowercased label in priority order.
fn estimate_fee(amount: f64, method: &str) -> f64 {
    let method = method.to_lowercase();
    if method.contains("amex") {
        amount * 0.035 + 0.30
    } else if method.contains("ach") || method.contains("bank") {
        f64::min(5.00, amount * 0.008)
    } else if method.contains("international") {
        amount * 0.039 + 0.30
    } else {
        amount * 0.029 + 0.30
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn charges(value: serde_json::Value) -> Vec<Charge> {
        serde_json::from_value(value).unwrap()
    }

    fn card_charge(id: &str, amount: i64, brand: &str) -> serde_json::Value {
        json!({
            "id": id,
            "amount": amount,
            "currency": "usd",
            "status": "succeeded",
            "created": 1700000000,
            "payment_method_details": {"type": "card", "card": {"brand": brand}}
        })
    }

    #[test]
    fn test_empty_input() {
        let analysis = estimate_fees(&[]);
        assert_eq!(analysis.total_fees, 0.0);
        assert_eq!(analysis.total_revenue, 0.0);
        assert_eq!(analysis.fee_percentage, 0.0);
        assert_eq!(analysis.transaction_count, 0);
        assert_eq!(analysis.average_fee_per_transaction, 0.0);
        assert!(analysis.fees_by_payment_method.is_empty());
        assert!(analysis.recommendations.is_empty());
    }

    #[test]
    fn test_standard_card_rate() {
        let analysis = estimate_fees(&charges(json!([card_charge("ch_1", 10000, "visa")])));
        // 100 * 0.029 + 0.30
        assert_eq!(analysis.total_fees, 3.2);
        assert_eq!(analysis.total_revenue, 100.0);
        assert_eq!(analysis.fee_percentage, 3.2);
        assert_eq!(analysis.average_fee_per_transaction, 3.2);
    }

    #[test]
    fn test_amex_rate_and_recommendation() {
        let analysis = estimate_fees(&charges(json!([card_charge("ch_1", 10000, "amex")])));
        // 100 * 0.035 + 0.30
        assert_eq!(analysis.total_fees, 3.8);
        assert!(analysis
            .recommendations
            .iter()
            .any(|r| r.contains("American Express")));
        // 3.8% also trips the rate-negotiation threshold.
        assert!(analysis.recommendations.iter().any(|r| r.contains("negotiating")));
    }

    #[test]
    fn test_ach_fee_is_capped() {
        let analysis = estimate_fees_with(
            &charges(json!([{
                "id": "ch_ach",
                "amount": 100000,
                "currency": "usd",
                "status": "succeeded",
                "created": 1700000000,
                "payment_method_details": {"type": "ach_debit"}
            }])),
            payment_method_label,
        );
        // min(5.00, 1000 * 0.008) = 5.00
        assert_eq!(analysis.total_fees, 5.0);
        let ach = &analysis.fees_by_payment_method["ACH/Bank Transfer"];
        assert_eq!(ach.count, 1);
        assert_eq!(ach.revenue, 1000.0);
    }

    #[test]
    fn test_custom_labeler_international_rate() {
        let analysis = estimate_fees_with(
            &charges(json!([card_charge("ch_1", 10000, "visa")])),
            |_| "Visa (International)".to_string(),
        );
        // 100 * 0.039 + 0.30
        assert_eq!(analysis.total_fees, 4.2);
    }

    #[test]
    fn test_non_succeeded_charges_excluded() {
        let mut batch = charges(json!([card_charge("ch_1", 10000, "visa")]));
        batch.extend(charges(json!([
            {"id": "ch_2", "amount": 5000, "currency": "usd", "status": "failed",
             "created": 1700000000},
            {"id": "ch_3", "amount": 5000, "currency": "usd", "status": "refunded",
             "created": 1700000000}
        ])));
        let analysis = estimate_fees(&batch);
        assert_eq!(analysis.transaction_count, 1);
        assert_eq!(analysis.total_revenue, 100.0);
    }

    #[test]
    fn test_per_method_breakdown() {
        let analysis = estimate_fees(&charges(json!([
            card_charge("ch_1", 10000, "visa"),
            card_charge("ch_2", 20000, "visa"),
            card_charge("ch_3", 10000, "mastercard")
        ])));
        assert_eq!(analysis.fees_by_payment_method.len(), 2);
        let visa = &analysis.fees_by_payment_method["Visa"];
        assert_eq!(visa.count, 2);
        assert_eq!(visa.revenue, 300.0);
        assert_eq!(analysis.transaction_count, 3);
    }

    #[test]
    fn test_volume_recommendation() {
        let batch: Vec<serde_json::Value> = (0..101)
            .map(|i| card_charge(&format!("ch_{i}"), 1000, "visa"))
            .collect();
        let analysis = estimate_fees(&charges(json!(batch)));
        assert_eq!(analysis.transaction_count, 101);
        assert!(analysis
            .recommendations
            .iter()
            .any(|r| r.contains("custom pricing")));
    }
}
