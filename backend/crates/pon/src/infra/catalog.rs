//! Catalog Loader
//!
//! Scans `<pons_dir>/<folder>/<meta_file_name>`. Bad folders are skipped with a
//! warning; loading itself never fails.

use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use tokio::sync::RwLock;

use crate::application::config::PonConfig;
use crate::domain::catalog::{Catalog, CatalogError, PonDefinition};

/// Build a catalog from the configured directory.
///
/// Folders are visited in sorted order; on duplicate pon ids the first folder wins.
pub async fn load_catalog(config: &PonConfig) -> Catalog {
    let mut catalog = Catalog::empty();

    let folders = match list_folders(&config.pons_dir).await {
        Ok(folders) => folders,
        Err(e) => {
            tracing::warn!(
                pons_dir = %config.pons_dir.display(),
                error = %e,
                "Catalog directory unreadable, starting with an empty catalog"
            );
            return catalog;
        }
    };

    for folder in folders {
        let meta_path = folder.join(&config.meta_file_name);
        let json = match tokio::fs::read_to_string(&meta_path).await {
            Ok(json) => json,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                tracing::debug!(folder = %folder.display(), "No metadata file, skipping");
                continue;
            }
            Err(e) => {
                tracing::warn!(path = %meta_path.display(), error = %e, "Unreadable metadata, skipping");
                continue;
            }
        };

        let pon = match PonDefinition::from_json(&json, &folder) {
            Ok(pon) => pon,
            Err(e) => {
                log_skipped(&meta_path, &e);
                continue;
            }
        };

        if let Err(duplicate) = catalog.insert(pon) {
            tracing::warn!(
                pon_id = %duplicate.id,
                folder = %folder.display(),
                "Duplicate pon id, keeping the first folder"
            );
        }
    }

    tracing::info!(pons = catalog.len(), "Catalog loaded");
    catalog
}

async fn list_folders(root: &Path) -> io::Result<Vec<PathBuf>> {
    let mut entries = tokio::fs::read_dir(root).await?;
    let mut folders = Vec::new();

    while let Some(entry) = entries.next_entry().await? {
        let path = entry.path();
        // `metadata` follows symlinks, so a linked pon folder counts
        match tokio::fs::metadata(&path).await {
            Ok(meta) if meta.is_dir() => folders.push(path),
            Ok(_) => {}
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "Unreadable catalog entry, skipping");
            }
        }
    }

    folders.sort();
    Ok(folders)
}

fn log_skipped(meta_path: &Path, error: &CatalogError) {
    tracing::warn!(path = %meta_path.display(), error = %error, "Invalid pon metadata, skipping");
}

// ============================================================================
// Shared snapshot
// ============================================================================

/// Process-wide catalog handle.
///
/// Readers take an `Arc<Catalog>` snapshot and keep it for the whole request; a
/// reload swaps the snapshot without disturbing them.
#[derive(Clone)]
pub struct SharedCatalog {
    current: Arc<RwLock<Arc<Catalog>>>,
    config: Arc<PonConfig>,
}

impl SharedCatalog {
    /// Load from disk
    pub async fn load(config: PonConfig) -> Self {
        let catalog = load_catalog(&config).await;
        Self::from_catalog(catalog, config)
    }

    /// Wrap an already built catalog
    pub fn from_catalog(catalog: Catalog, config: PonConfig) -> Self {
        Self {
            current: Arc::new(RwLock::new(Arc::new(catalog))),
            config: Arc::new(config),
        }
    }

    pub async fn snapshot(&self) -> Arc<Catalog> {
        self.current.read().await.clone()
    }

    /// Re-scan the directory and swap the snapshot. Returns the new pon count.
    pub async fn reload(&self) -> usize {
        let catalog = Arc::new(load_catalog(&self.config).await);
        let count = catalog.len();
        *self.current.write().await = catalog;
        tracing::info!(pons = count, "Catalog reloaded");
        count
    }
}
