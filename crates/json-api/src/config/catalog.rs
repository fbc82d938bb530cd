//! Catalog Config

use clap::Args;
use dabro::categories::UnknownCategoryPolicy;

/// Catalog query settings.
#[derive(Debug, Args)]
pub struct CatalogConfig {
    /// What a listing filtered by an unknown category returns (`match_all`, `match_none`)
    #[arg(
        long,
        env = "UNKNOWN_CATEGORY_POLICY",
        default_value_t = UnknownCategoryPolicy::MatchAll
    )]
    pub unknown_category_policy: UnknownCategoryPolicy,
}
