//! Raw space content moved around by the migration workflow.

use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use std::fmt;

/// Collections that can be listed from (and partly written to) a space.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContentCollection {
    ContentTypes,
    Entries,
    Assets,
    Locales,
}

impl ContentCollection {
    pub const ALL: [ContentCollection; 4] = [
        ContentCollection::ContentTypes,
        ContentCollection::Locales,
        ContentCollection::Assets,
        ContentCollection::Entries,
    ];

    pub fn path_segment(&self) -> &'static str {
        match self {
            ContentCollection::ContentTypes => "content_types",
            ContentCollection::Entries => "entries",
            ContentCollection::Assets => "assets",
            ContentCollection::Locales => "locales",
        }
    }
}

impl fmt::Display for ContentCollection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path_segment())
    }
}

/// One page of a collection listing.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Page {
    pub total: u64,
    pub skip: u64,
    pub limit: u64,
    pub items: Vec<JsonValue>,
}

impl Page {
    /// Whether another page follows this one.
    pub fn has_more(&self) -> bool {
        !self.items.is_empty() && self.skip + (self.items.len() as u64) < self.total
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn page_has_more_until_total_is_covered() {
        let page = Page { total: 3, skip: 0, limit: 2, items: vec![json!({}), json!({})] };
        assert!(page.has_more());

        let last = Page { total: 3, skip: 2, limit: 2, items: vec![json!({})] };
        assert!(!last.has_more());

        let empty = Page { total: 10, skip: 0, limit: 2, items: vec![] };
        assert!(!empty.has_more());
    }
}
