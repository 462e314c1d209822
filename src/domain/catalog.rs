//! Country ⇄ STEO series-id catalog.
//!
//! Both directions are materialized once at construction, so name→id and
//! id→name lookups are plain map hits rather than repeated scans.

use std::collections::{BTreeMap, HashMap};

/// OPEC+ countries tracked by the monitor, with their STEO crude-oil
/// production series ids (`COPR_*`).
const OPEC_PLUS_SERIES: &[(&str, &str)] = &[
    ("Azerbaijan", "COPR_AJ"),
    ("Bahrain", "COPR_BA"),
    ("Brunei", "COPR_BX"),
    ("Kazakhstan", "COPR_KZ"),
    ("Malaysia", "COPR_MY"),
    ("Mexico", "COPR_MX"),
    ("Oman", "COPR_MU"),
    ("Russia", "COPR_RS"),
    ("Sudan", "COPR_SU"),
    ("South Sudan", "COPR_OD"),
];

/// Bidirectional mapping between entity display names and series ids.
#[derive(Debug, Clone)]
pub struct EntityCatalog {
    by_name: BTreeMap<String, String>,
    by_id: HashMap<String, String>,
}

impl EntityCatalog {
    /// The OPEC+ set tracked by this tool.
    pub fn opec_plus() -> Self {
        Self::from_pairs(OPEC_PLUS_SERIES)
    }

    pub fn from_pairs(pairs: &[(&str, &str)]) -> Self {
        let mut by_name = BTreeMap::new();
        let mut by_id = HashMap::new();
        for &(name, id) in pairs {
            by_name.insert(name.to_string(), id.to_string());
            by_id.insert(id.to_string(), name.to_string());
        }
        Self { by_name, by_id }
    }

    /// Resolve a display name to its series id.
    ///
    /// Exact match first; falls back to an ASCII case-insensitive comparison
    /// so `crude report -c russia` works.
    pub fn series_id(&self, name: &str) -> Option<&str> {
        if let Some(id) = self.by_name.get(name) {
            return Some(id.as_str());
        }
        self.by_name
            .iter()
            .find(|(n, _)| n.eq_ignore_ascii_case(name))
            .map(|(_, id)| id.as_str())
    }

    /// Resolve a series id back to its display name.
    pub fn entity_name(&self, series_id: &str) -> Option<&str> {
        self.by_id.get(series_id).map(String::as_str)
    }

    /// Iterate `(name, series_id)` pairs in alphabetical name order.
    pub fn entries(&self) -> impl Iterator<Item = (&str, &str)> {
        self.by_name.iter().map(|(n, id)| (n.as_str(), id.as_str()))
    }

    pub fn len(&self) -> usize {
        self.by_name.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_name.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn catalog_is_bidirectional() {
        let catalog = EntityCatalog::opec_plus();
        assert_eq!(catalog.len(), 10);
        for (name, id) in catalog.entries() {
            assert_eq!(catalog.series_id(name), Some(id));
            assert_eq!(catalog.entity_name(id), Some(name));
        }
    }

    #[test]
    fn name_lookup_is_case_insensitive() {
        let catalog = EntityCatalog::opec_plus();
        assert_eq!(catalog.series_id("Kazakhstan"), Some("COPR_KZ"));
        assert_eq!(catalog.series_id("kazakhstan"), Some("COPR_KZ"));
        assert_eq!(catalog.series_id("KAZAKHSTAN"), Some("COPR_KZ"));
        assert_eq!(catalog.series_id("Atlantis"), None);
    }

    #[test]
    fn entries_are_alphabetical() {
        let catalog = EntityCatalog::opec_plus();
        let names: Vec<&str> = catalog.entries().map(|(n, _)| n).collect();
        let mut sorted = names.clone();
        sorted.sort_unstable();
        assert_eq!(names, sorted);
    }
}
