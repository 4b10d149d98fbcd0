//! Sequence lookup and summary templating

use super::assets::resolve_assets;
use super::features::load_features;
use super::sequences::{load_sequences, SequenceStore};
use super::types::{AssetPaths, ClusterLabelCatalog, Explanation, FeatureTable};
use std::path::Path;

/// Summary returned for an ID with no row in the features table.
pub const NOT_FOUND_SUMMARY: &str = "Sequence not found in feature table.";

const HIGH_IDENTITY_NOTE: &str = "This sequence is highly similar to human TP53 \
and may preserve strong tumor-suppressor function.";
const MODERATE_IDENTITY_NOTE: &str = "This sequence is moderately similar to human TP53 \
and may have partial or diverged function.";
const DISTANT_IDENTITY_NOTE: &str = "This sequence is distant from human TP53 \
and is more likely a diverged retrogene.";

/// Read-only session state: the features table, the protein sequences,
/// the three figure paths, and the cluster-label capability. Built once
/// at startup; `explain` is a pure function over it.
#[derive(Debug, Clone)]
pub struct ExplorerContext {
    pub table: FeatureTable,
    pub sequences: SequenceStore,
    pub assets: AssetPaths,
    /// Present only when the loaded table has a cluster column.
    pub cluster_labels: Option<ClusterLabelCatalog>,
}

impl ExplorerContext {
    pub fn new(table: FeatureTable, sequences: SequenceStore, assets: AssetPaths) -> Self {
        let cluster_labels = table.has_cluster.then_some(ClusterLabelCatalog);
        Self {
            table,
            sequences,
            assets,
            cluster_labels,
        }
    }

    /// One-time startup load of everything under `base_dir`. Any failure
    /// here is terminal for the session; callers display it and stop.
    pub fn load(base_dir: &Path) -> Result<Self, String> {
        let table = load_features(base_dir)?;
        let sequences = load_sequences(base_dir)?;
        let assets = resolve_assets(base_dir);
        Ok(Self::new(table, sequences, assets))
    }

    /// Produce the summary for `sequence_id` plus the three fixed figure
    /// paths. The paths are session-global and returned unchanged whether
    /// or not the lookup succeeds.
    ///
    /// Every field of a matched record is independently optional: an
    /// absent field skips its line and never blocks the remaining lines.
    pub fn explain(&self, sequence_id: &str) -> Explanation {
        let summary = match self.table.find(sequence_id) {
            None => NOT_FOUND_SUMMARY.to_string(),
            Some(record) => {
                let mut lines = vec![format!("Sequence ID: {}", record.id)];
                if let Some(length) = record.length {
                    lines.push(format!("Length: {} amino acids", length));
                }
                if let Some(identity) = record.identity_to_human {
                    lines.push(format!("Identity to human TP53: {:.2}%", identity));
                }
                if let Some(gc) = record.gc_like {
                    lines.push(format!("GC-like count (G+C): {}", gc));
                }
                if let (Some(catalog), Some(cluster)) = (&self.cluster_labels, record.cluster) {
                    lines.push(format!("AI Cluster: {}", catalog.label(cluster)));
                }
                if let Some(identity) = record.identity_to_human {
                    lines.push(identity_note(identity).to_string());
                }
                lines.join("\n")
            }
        };

        Explanation {
            summary,
            tree_path: self.assets.tree.path.clone(),
            logo_path: self.assets.logo.path.clone(),
            barplot_path: self.assets.barplot.path.clone(),
        }
    }
}

/// Interpretive sentence for an identity percentage. Thresholds are
/// inclusive lower bounds, first match wins.
fn identity_note(identity: f64) -> &'static str {
    if identity >= 80.0 {
        HIGH_IDENTITY_NOTE
    } else if identity >= 50.0 {
        MODERATE_IDENTITY_NOTE
    } else {
        DISTANT_IDENTITY_NOTE
    }
}
