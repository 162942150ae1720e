//! YAML loading for the curated showcase catalog.
//!
//! The default catalog is compiled into the binary from
//! `catalog/genres.yaml`. A user-supplied file with the same layout can
//! replace it:
//!
//! ```text
//! genres:
//!   - name: Action
//!     link: https://rawg.io/games/action
//!     games:
//!       - title: "God of War: Chains of Olympus"
//!         slug: god-of-war-chains-of-olympus
//! ```

use std::path::Path;

use crate::error::CatalogError;
use crate::types::GenreCatalog;

const BUNDLED_CATALOG: &str = include_str!("../catalog/genres.yaml");

/// Parse and validate a catalog from YAML text. `source` names the origin in
/// error messages.
pub fn parse_catalog(contents: &str, source: &str) -> Result<GenreCatalog, CatalogError> {
    let catalog: GenreCatalog =
        serde_yml::from_str(contents).map_err(|e| CatalogError::Parse {
            path: source.to_string(),
            source: e,
        })?;
    catalog.validate()?;
    log::debug!(
        "Loaded {} genres ({} curated games) from {}",
        catalog.len(),
        catalog.genres.iter().map(|g| g.games.len()).sum::<usize>(),
        source,
    );
    Ok(catalog)
}

/// Load a catalog from a YAML file.
pub fn load_catalog(path: &Path) -> Result<GenreCatalog, CatalogError> {
    let contents =
        std::fs::read_to_string(path).map_err(|e| CatalogError::io(path.display(), e))?;
    parse_catalog(&contents, &path.display().to_string())
}

/// The catalog shipped with the application.
pub fn bundled_catalog() -> Result<GenreCatalog, CatalogError> {
    parse_catalog(BUNDLED_CATALOG, "bundled catalog")
}
