//! Dabro
//!
//! Dabro is the catalog query core of a multi-tenant storefront. It turns a storefront's product
//! listing request (category, price bounds, tags, tenant, sort and page) into a single compiled
//! query that any product store can execute, either by evaluating it in memory or by rendering it
//! into its own query language.

pub mod categories;
pub mod compiler;
pub mod filters;
pub mod pagination;
pub mod predicate;
pub mod prelude;
pub mod pricing;
pub mod references;
pub mod sorting;
