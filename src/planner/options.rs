//! Scan options carried by dataset scan nodes

use serde::{Deserialize, Serialize};

fn default_allow_pushdown_filter() -> bool {
    true
}

/// Options of a dataset scan. Always fully specified.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ScanOptions {
    /// Allow filters applied after the scan to be evaluated by the dataset
    /// itself. The dataset's null handling can differ from the host
    /// engine's, so results may differ for predicates on nullable columns.
    #[serde(default = "default_allow_pushdown_filter")]
    pub allow_pushdown_filter: bool,
}

impl Default for ScanOptions {
    fn default() -> Self {
        Self {
            allow_pushdown_filter: default_allow_pushdown_filter(),
        }
    }
}

impl ScanOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_allow_pushdown_filter(mut self, allow: bool) -> Self {
        self.allow_pushdown_filter = allow;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_pushdown_allowed_by_default() {
        assert!(ScanOptions::default().allow_pushdown_filter);
        let parsed: ScanOptions = serde_json::from_value(json!({})).unwrap();
        assert_eq!(parsed, ScanOptions::default());
    }

    #[test]
    fn test_explicit_value_kept() {
        let parsed: ScanOptions =
            serde_json::from_value(json!({"allow_pushdown_filter": false})).unwrap();
        assert!(!parsed.allow_pushdown_filter);
        assert_eq!(parsed, ScanOptions::new().with_allow_pushdown_filter(false));
    }
}
