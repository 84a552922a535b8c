//! Payment-method labeling.
//!
//! Produces the stable label vocabulary the fee estimator matches on:
//! title-cased card brands with a wallet suffix when present
//! ("Visa (Apple Pay)"), "ACH/Bank Transfer", "SEPA Direct Debit", a
//! title-cased raw method type for everything else, and "Unknown" when the
//! charge carries no method details at all.

use revlens_types::Charge;

/// Detailed payment-method label for a charge.
pub fn payment_method_label(charge: &Charge) -> String {
    if let Some(details) = &charge.payment_method_details {
        if details.kind == "card" {
            if let Some(card) = &details.card {
                if let Some(brand) = &card.brand {
                    let brand = title_case(brand);
                    if let Some(wallet) = &card.wallet {
                        let wallet_name = match wallet.kind.as_str() {
                            "apple_pay" => "Apple Pay".to_string(),
                            "google_pay" => "Google Pay".to_string(),
                            "samsung_pay" => "Samsung Pay".to_string(),
                            other => title_case(other),
                        };
                        return format!("{brand} ({wallet_name})");
                    }
                    return brand;
                }
            }
            return "Card".to_string();
        }
        return match details.kind.as_str() {
            "ach_debit" => "ACH/Bank Transfer".to_string(),
            "sepa_debit" => "SEPA Direct Debit".to_string(),
            other => title_case(other),
        };
    }

    // Older charges only carry the legacy `source` shape.
    if let Some(source) = &charge.source {
        if let Some(brand) = &source.brand {
            return title_case(brand);
        }
        if source.object.as_deref() == Some("card") {
            return "Card".to_string();
        }
    }

    "Unknown".to_string()
}

/// Title-case an identifier: underscores become spaces, each word starts
/// uppercase with the rest lowered ("apple_pay" -> "Apple Pay").
fn title_case(s: &str) -> String {
    s.split(['_', ' '])
        .filter(|word| !word.is_empty())
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => {
                    first.to_uppercase().collect::<String>() + &chars.as_str().to_lowercase()
                }
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn charge(value: serde_json::Value) -> Charge {
        serde_json::from_value(value).unwrap()
    }

    fn base(extra: serde_json::Value) -> serde_json::Value {
        let mut value = json!({
            "id": "ch_1",
            "amount": 1000,
            "currency": "usd",
            "status": "succeeded",
            "created": 1700000000
        });
        value
            .as_object_mut()
            .unwrap()
            .extend(extra.as_object().unwrap().clone());
        value
    }

    #[test]
    fn test_card_brand() {
        let c = charge(base(json!({
            "payment_method_details": {"type": "card", "card": {"brand": "visa"}}
        })));
        assert_eq!(payment_method_label(&c), "Visa");
    }

    #[test]
    fn test_card_with_wallet() {
        let c = charge(base(json!({
            "payment_method_details": {
                "type": "card",
                "card": {"brand": "amex", "wallet": {"type": "apple_pay"}}
            }
        })));
        assert_eq!(payment_method_label(&c), "Amex (Apple Pay)");
    }

    #[test]
    fn test_unrecognized_wallet_is_title_cased() {
        let c = charge(base(json!({
            "payment_method_details": {
                "type": "card",
                "card": {"brand": "visa", "wallet": {"type": "link_wallet"}}
            }
        })));
        assert_eq!(payment_method_label(&c), "Visa (Link Wallet)");
    }

    #[test]
    fn test_card_without_brand() {
        let c = charge(base(json!({
            "payment_method_details": {"type": "card"}
        })));
        assert_eq!(payment_method_label(&c), "Card");
    }

    #[test]
    fn test_ach_and_sepa() {
        let ach = charge(base(json!({"payment_method_details": {"type": "ach_debit"}})));
        assert_eq!(payment_method_label(&ach), "ACH/Bank Transfer");

        let sepa = charge(base(json!({"payment_method_details": {"type": "sepa_debit"}})));
        assert_eq!(payment_method_label(&sepa), "SEPA Direct Debit");
    }

    #[test]
    fn test_other_method_type_is_title_cased() {
        let c = charge(base(json!({"payment_method_details": {"type": "us_bank_account"}})));
        assert_eq!(payment_method_label(&c), "Us Bank Account");
    }

    #[test]
    fn test_legacy_source_fallbacks() {
        let branded = charge(base(json!({"source": {"object": "card", "brand": "mastercard"}})));
        assert_eq!(payment_method_label(&branded), "Mastercard");

        let unbranded = charge(base(json!({"source": {"object": "card"}})));
        assert_eq!(payment_method_label(&unbranded), "Card");
    }

    #[test]
    fn test_unknown() {
        let c = charge(base(json!({})));
        assert_eq!(payment_method_label(&c), "Unknown");
    }
}
