//! Carts
//!
//! Shopper carts, one per tenant, persisted through a [`CartStorage`] port.

pub mod errors;
pub mod records;
pub mod service;
mod storage;

pub use errors::{CartStorageError, CartsError};
pub use service::*;
pub use storage::{CartStorage, MemoryCartStorage, MockCartStorage};
