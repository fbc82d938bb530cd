//! Checkout Records

use rust_decimal::Decimal;

use crate::domain::products::records::ProductRecord;

/// The products being bought and what they cost together.
#[derive(Debug, Clone, PartialEq)]
pub struct CheckoutSummary {
    pub products: Vec<ProductRecord>,
    pub total_price: Decimal,
}
