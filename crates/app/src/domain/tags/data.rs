//! Tag Data

use dabro::pagination::PageRequest;
use serde::Deserialize;

/// Default number of tags on a page.
pub const DEFAULT_TAGS_LIMIT: u32 = 10;

/// Tag listing request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ListTags {
    pub cursor: u32,
    pub limit: u32,
}

impl Default for ListTags {
    fn default() -> Self {
        Self {
            cursor: 1,
            limit: DEFAULT_TAGS_LIMIT,
        }
    }
}

impl ListTags {
    #[must_use]
    pub fn page_request(&self) -> PageRequest {
        PageRequest::new(self.cursor, self.limit)
    }
}
