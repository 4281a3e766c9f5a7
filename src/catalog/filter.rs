//! Free-text catalog search.
//!
//! The query is lowercased once and matched as a substring against the
//! lowercased searchable fields of each record. An exactly empty query
//! matches everything; no trimming is applied.

use super::RsoRecord;

impl RsoRecord {
    /// True if any searchable field contains `lowered_query`.
    ///
    /// The query must already be lowercase.
    pub fn matches(&self, lowered_query: &str) -> bool {
        let hit = |field: &str| field.to_lowercase().contains(lowered_query);

        hit(self.display_name.as_str())
            || hit(self.international_designator.as_str())
            || hit(self.satcat_number.as_str())
            || self.aliases().iter().any(|a| hit(a.as_str()))
            || self.tags().iter().any(|t| hit(t.as_str()))
    }
}

/// Records matching `query`, in their original relative order.
pub fn filter<'a>(records: &'a [RsoRecord], query: &str) -> Vec<&'a RsoRecord> {
    if query.is_empty() {
        return records.iter().collect();
    }
    let query = query.to_lowercase();
    records.iter().filter(|r| r.matches(&query)).collect()
}
