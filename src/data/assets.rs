//! Pre-rendered figure paths

use super::types::{AssetPaths, ImageAsset};
use std::path::Path;

pub const TREE_IMAGE: &str = "images/TP53_tree.png";
pub const LOGO_IMAGE: &str = "images/TP53_MSA_logo.png";
pub const BARPLOT_IMAGE: &str = "images/identity_barplot.png";

/// Resolve the three fixed figure paths under `base_dir` and record
/// whether each file exists. Checked once here; a missing figure is a
/// per-panel warning in the UI, never a load failure.
pub fn resolve_assets(base_dir: &Path) -> AssetPaths {
    let resolve = |rel: &str| {
        let path = base_dir.join(rel);
        let exists = path.exists();
        ImageAsset { path, exists }
    };
    AssetPaths {
        tree: resolve(TREE_IMAGE),
        logo: resolve(LOGO_IMAGE),
        barplot: resolve(BARPLOT_IMAGE),
    }
}
