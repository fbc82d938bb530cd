//! Catalog services, persistence, and carts for Dabro storefronts.

pub mod context;
pub mod database;
pub mod domain;
pub mod memory;
pub mod store;

#[cfg(test)]
mod test;

mod uuids;
