//! Dabro Domain Concerns

pub mod carts;
pub mod categories;
pub mod checkout;
pub mod media;
pub mod products;
pub mod tags;
pub mod tenants;
