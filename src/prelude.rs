//! Dabro prelude.
//!
//! Convenience exports for common library consumers.

pub use crate::{
    categories::{CategoryScope, UnknownCategoryPolicy},
    compiler::{CompiledQuery, QueryCompiler},
    filters::{DEFAULT_LIMIT, FilterParams},
    pagination::{Page, PageRequest},
    predicate::{Condition, Filterable, PriceBound, PriceRange, ProductPredicate},
    pricing::{TotalPriceError, total_price},
    references::Reference,
    sorting::{ProductSort, SortDirection, SortField, SortMode},
};
