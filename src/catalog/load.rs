use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use tracing::info;

use super::model::Catalog;
use super::parse::parse_catalog;

pub fn load_catalog(path: &Path) -> Result<Catalog> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("failed to read catalog at {}", path.display()))?;
    let catalog = parse_catalog(&raw)
        .with_context(|| format!("failed to parse catalog at {}", path.display()))?;

    info!(
        path = %path.display(),
        groups = catalog.groups.len(),
        albums = catalog.album_count(),
        "catalog loaded"
    );
    Ok(catalog)
}
