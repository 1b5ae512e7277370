//! Application Configuration

use std::path::PathBuf;

/// Pon application configuration
#[derive(Debug, Clone)]
pub struct PonConfig {
    /// Catalog root: one sub-folder per pon
    pub pons_dir: PathBuf,
    /// Metadata file looked up in each pon folder
    pub meta_file_name: String,
}

impl Default for PonConfig {
    fn default() -> Self {
        Self {
            pons_dir: PathBuf::from("pons"),
            meta_file_name: "meta.json".to_string(),
        }
    }
}

impl PonConfig {
    pub fn with_pons_dir(pons_dir: impl Into<PathBuf>) -> Self {
        Self {
            pons_dir: pons_dir.into(),
            ..Default::default()
        }
    }
}
