//! Stripe-shaped billing records.
//!
//! Read-only record types as delivered by the payment API. The payment API
//! has shipped several historical shapes for the same data (modern prices vs.
//! legacy plans, expanded objects vs. bare id strings), so multi-shape fields
//! are modeled as explicit variant types here and normalized once in
//! `revlens-analytics` instead of shape-checking inside the calculators.
//!
//! This crate holds no logic beyond shape accessors: records are constructed
//! by the caller from API responses (or from JSON fixtures in tests) and
//! discarded after a single metrics pass.

pub mod charge;
pub mod customer;
pub mod price;
pub mod subscription;

pub use charge::{CardDetails, CardSource, Charge, ChargeStatus, PaymentMethodDetails, Wallet};
pub use customer::{Customer, CustomerRef};
pub use price::{BillingInterval, Price, PriceRef, Product, ProductRef, Recurring};
pub use subscription::{ItemList, Subscription, SubscriptionItem, SubscriptionStatus};
