//! Data types for the TP53 explorer

use once_cell::sync::Lazy;
use serde::Serialize;
use std::collections::HashMap;
use std::path::PathBuf;

/// One row of the features table. Every field except `id` is optional:
/// upstream pipeline runs differ in which columns they emit, and blank
/// cells within a column are absent values, not errors.
#[derive(Debug, Clone, Serialize)]
pub struct FeatureRecord {
    pub id: String,
    /// Sequence length in amino acids
    pub length: Option<u64>,
    /// Percent identity to the human TP53 reference, 0-100
    pub identity_to_human: Option<f64>,
    /// G+C count over the coding sequence
    pub gc_like: Option<u64>,
    /// AI cluster assignment, domain {0, 1, 2}
    pub cluster: Option<i64>,
    /// Amino-acid composition fractions from `frac_*` columns,
    /// in column order. Empty when the table has no such columns.
    pub composition: Vec<(String, f64)>,
}

/// The features table, loaded once at startup and read-only afterwards.
///
/// `id` values are assumed unique but not enforced; `find` returns the
/// first match when duplicates slip through an upstream merge.
#[derive(Debug, Clone)]
pub struct FeatureTable {
    pub records: Vec<FeatureRecord>,
    /// Whether the source CSV carried a `cluster` column at all.
    /// Decided once at load time.
    pub has_cluster: bool,
    /// File name the table was loaded from, for the status bar.
    pub source_file: String,
}

impl FeatureTable {
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Ordered ID list, as read from the file. Drives the dropdown.
    pub fn ids(&self) -> Vec<String> {
        self.records.iter().map(|r| r.id.clone()).collect()
    }

    /// First record with an exactly matching ID (case-sensitive).
    pub fn find(&self, id: &str) -> Option<&FeatureRecord> {
        self.records.iter().find(|r| r.id == id)
    }

    /// Row indices sorted by identity to human, descending.
    /// Records without an identity value sort last, in table order.
    pub fn indices_by_identity_desc(&self) -> Vec<usize> {
        let mut idx: Vec<usize> = (0..self.records.len()).collect();
        idx.sort_by(|&a, &b| {
            let ia = self.records[a].identity_to_human;
            let ib = self.records[b].identity_to_human;
            match (ia, ib) {
                (Some(x), Some(y)) => y.partial_cmp(&x).unwrap_or(std::cmp::Ordering::Equal),
                (Some(_), None) => std::cmp::Ordering::Less,
                (None, Some(_)) => std::cmp::Ordering::Greater,
                (None, None) => std::cmp::Ordering::Equal,
            }
        });
        idx
    }
}

/// Cluster number to human-readable label
static CLUSTER_LABELS: Lazy<HashMap<i64, &'static str>> = Lazy::new(|| {
    let mut map = HashMap::new();
    map.insert(0, "High TP53-like, AI");
    map.insert(1, "Intermediate");
    map.insert(2, "Divergent");
    map
});

/// Fixed mapping from AI cluster number to display label.
///
/// Only carried by a context whose table actually has a cluster column;
/// values outside the known domain fall back to the divergent label
/// rather than erroring.
#[derive(Debug, Clone, Copy, Default)]
pub struct ClusterLabelCatalog;

impl ClusterLabelCatalog {
    pub fn label(&self, cluster: i64) -> &'static str {
        CLUSTER_LABELS.get(&cluster).copied().unwrap_or("Divergent")
    }
}

/// One pre-rendered figure: its resolved path plus whether the file
/// existed at load time. Existence is checked once, never per request.
#[derive(Debug, Clone)]
pub struct ImageAsset {
    pub path: PathBuf,
    pub exists: bool,
}

/// The three session-global figures. Resolved once at startup and
/// treated as immutable for the life of the process.
#[derive(Debug, Clone)]
pub struct AssetPaths {
    pub tree: ImageAsset,
    pub logo: ImageAsset,
    pub barplot: ImageAsset,
}

/// Output of one `explain` call: the composed summary plus the three
/// fixed figure paths (always returned, found or not).
#[derive(Debug, Clone, PartialEq)]
pub struct Explanation {
    pub summary: String,
    pub tree_path: PathBuf,
    pub logo_path: PathBuf,
    pub barplot_path: PathBuf,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(id: &str) -> FeatureRecord {
        FeatureRecord {
            id: id.to_string(),
            length: None,
            identity_to_human: None,
            gc_like: None,
            cluster: None,
            composition: Vec::new(),
        }
    }

    #[test]
    fn test_cluster_labels() {
        let catalog = ClusterLabelCatalog;
        assert_eq!(catalog.label(0), "High TP53-like, AI");
        assert_eq!(catalog.label(1), "Intermediate");
        assert_eq!(catalog.label(2), "Divergent");
    }

    #[test]
    fn test_cluster_label_out_of_domain_is_divergent() {
        let catalog = ClusterLabelCatalog;
        assert_eq!(catalog.label(3), "Divergent");
        assert_eq!(catalog.label(-1), "Divergent");
        assert_eq!(catalog.label(99), "Divergent");
    }

    #[test]
    fn test_find_returns_first_match() {
        // Duplicate IDs can arise from separate upstream merge steps;
        // the contract is first-row-wins, pinned here on purpose.
        let mut first = record("DUP");
        first.length = Some(100);
        let mut second = record("DUP");
        second.length = Some(200);
        let table = FeatureTable {
            records: vec![first, second],
            has_cluster: false,
            source_file: String::new(),
        };
        assert_eq!(table.find("DUP").unwrap().length, Some(100));
    }

    #[test]
    fn test_find_is_case_sensitive() {
        let table = FeatureTable {
            records: vec![record("Elephant_01")],
            has_cluster: false,
            source_file: String::new(),
        };
        assert!(table.find("Elephant_01").is_some());
        assert!(table.find("ELEPHANT_01").is_none());
    }

    #[test]
    fn test_identity_sort_descending_with_missing_last() {
        let mut a = record("a");
        a.identity_to_human = Some(40.0);
        let b = record("b");
        let mut c = record("c");
        c.identity_to_human = Some(90.0);
        let table = FeatureTable {
            records: vec![a, b, c],
            has_cluster: false,
            source_file: String::new(),
        };
        let order = table.indices_by_identity_desc();
        assert_eq!(order, vec![2, 0, 1]);
    }
}
