//! Checkout

mod handlers;

pub(crate) use handlers::*;
