//! Customer records and references.

use serde::{Deserialize, Serialize};

/// Customer record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Customer {
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    /// Creation timestamp, epoch seconds.
    #[serde(default)]
    pub created: Option<i64>,
    #[serde(default)]
    pub description: Option<String>,
}

/// Customer field as it appears on charges and subscriptions: either a bare
/// id string or the expanded customer record.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CustomerRef {
    Id(String),
    Expanded(Customer),
}

impl CustomerRef {
    /// Customer id regardless of shape.
    pub fn id(&self) -> &str {
        match self {
            CustomerRef::Id(id) => id,
            CustomerRef::Expanded(customer) => &customer.id,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bare_id_deserializes() {
        let c: CustomerRef = serde_json::from_value(serde_json::json!("cus_abc123")).unwrap();
        assert_eq!(c.id(), "cus_abc123");
    }

    #[test]
    fn test_expanded_customer_deserializes() {
        let c: CustomerRef = serde_json::from_value(serde_json::json!({
            "id": "cus_abc123",
            "name": "Ada Lovelace",
            "email": "ada@example.com"
        }))
        .unwrap();
        assert_eq!(c.id(), "cus_abc123");
        match c {
            CustomerRef::Expanded(cust) => assert_eq!(cust.name.as_deref(), Some("Ada Lovelace")),
            CustomerRef::Id(_) => panic!("expected expanded customer"),
        }
    }
}
