//! Tenants

mod handlers;

pub(crate) use handlers::*;
