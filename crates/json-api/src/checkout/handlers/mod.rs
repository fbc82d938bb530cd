//! Checkout Handlers

pub(crate) mod products;
