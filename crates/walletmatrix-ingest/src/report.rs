use serde::{Deserialize, Serialize};

/// Accumulated non-fatal load anomalies. Every entry here was skipped, not
/// fatal: the rest of the dataset still loaded.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct IngestReport {
    pub skipped_documents: Vec<String>,
    pub invalid_records: Vec<String>,
    pub duplicate_keys: Vec<String>,
    pub alias_collisions: Vec<String>,
    pub unresolved_keys: Vec<String>,
    pub invalid_values: Vec<String>,
    #[serde(default)]
    pub wallets_loaded: u64,
    #[serde(default)]
    pub features_loaded: u64,
    #[serde(default)]
    pub associations_built: u64,
}

impl IngestReport {
    #[must_use]
    pub fn has_warnings(&self) -> bool {
        self.warning_count() > 0
    }

    #[must_use]
    pub fn warning_count(&self) -> usize {
        self.skipped_documents.len()
            + self.invalid_records.len()
            + self.duplicate_keys.len()
            + self.alias_collisions.len()
            + self.unresolved_keys.len()
            + self.invalid_values.len()
    }

    /// Flattens every anomaly into `(category, message)` pairs, in report
    /// field order, for callers that log or print them uniformly.
    #[must_use]
    pub fn warnings(&self) -> Vec<(&'static str, &str)> {
        let mut out = Vec::with_capacity(self.warning_count());
        for (category, entries) in [
            ("skipped_document", &self.skipped_documents),
            ("invalid_record", &self.invalid_records),
            ("duplicate_key", &self.duplicate_keys),
            ("alias_collision", &self.alias_collisions),
            ("unresolved_key", &self.unresolved_keys),
            ("invalid_value", &self.invalid_values),
        ] {
            for entry in entries {
                out.push((category, entry.as_str()));
            }
        }
        out
    }
}
