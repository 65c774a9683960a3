//! JSON export and import of recipe bundles.
//!
//! A bundle carries complete recipes (steps and ingredients included) so it
//! can move between databases. Exported recipes are neutralized: they are
//! never favorites and always anchored at their start date. Imported recipes
//! get fresh IDs; every recipe is validated as a step forest before anything
//! is written.

use std::path::Path;

use jiff::Timestamp;
use log::{debug, warn};
use serde::{Deserialize, Serialize};

use super::{Bakery, BatchOptions};
use crate::{
    error::{BakeryError, Result},
    models::{Recipe, RecipeTree},
    params::ExportRecipes,
};

/// Version written into every bundle.
pub const BUNDLE_FORMAT_VERSION: u32 = 1;

/// A set of recipes in exchange format.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RecipeBundle {
    pub format_version: u32,
    pub exported_at: Timestamp,
    pub recipes: Vec<Recipe>,
}

impl RecipeBundle {
    /// Bundles neutralized copies of the given recipes.
    pub fn new(recipes: &[Recipe]) -> Self {
        Self {
            format_version: BUNDLE_FORMAT_VERSION,
            exported_at: Timestamp::now(),
            recipes: recipes.iter().map(Recipe::neutralized_for_export).collect(),
        }
    }

    /// Pretty-printed JSON.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Parses a bundle, rejecting versions this build does not know.
    ///
    /// ```rust
    /// use levain_core::bakery::RecipeBundle;
    ///
    /// let bundle = RecipeBundle::from_json(
    ///     r#"{"format_version": 1, "exported_at": "2026-10-17T06:00:00Z", "recipes": []}"#,
    /// )?;
    /// assert!(bundle.recipes.is_empty());
    ///
    /// let future = r#"{"format_version": 9, "exported_at": "2026-10-17T06:00:00Z", "recipes": []}"#;
    /// assert!(RecipeBundle::from_json(future).is_err());
    /// # use levain_core::Result;
    /// # Result::<()>::Ok(())
    /// ```
    pub fn from_json(json: &str) -> Result<Self> {
        let bundle: Self = serde_json::from_str(json)?;
        if bundle.format_version > BUNDLE_FORMAT_VERSION {
            return Err(BakeryError::invalid_input("format_version").with_reason(format!(
                "Bundle format {} is newer than the supported format {BUNDLE_FORMAT_VERSION}",
                bundle.format_version
            )));
        }
        Ok(bundle)
    }

    /// Reads a bundle from a file.
    pub fn read_from(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path).map_err(|e| BakeryError::FileSystem {
            path: path.to_path_buf(),
            source: e,
        })?;
        Self::from_json(&json)
    }

    /// Writes the bundle to a file, replacing it if it exists.
    pub fn write_to(&self, path: &Path) -> Result<()> {
        std::fs::write(path, self.to_json()?).map_err(|e| BakeryError::FileSystem {
            path: path.to_path_buf(),
            source: e,
        })
    }
}

impl Bakery {
    /// Exports the given recipes, or all recipes when no IDs are given.
    pub async fn export_recipes(&self, params: &ExportRecipes) -> Result<RecipeBundle> {
        let ids = params.ids.clone();

        let recipes = self
            .with_database(move |db| {
                let ids = if ids.is_empty() {
                    db.list_recipes(None)?.iter().map(|s| s.id).collect()
                } else {
                    ids
                };
                ids.into_iter()
                    .map(|id| db.get_recipe(id)?.ok_or(BakeryError::RecipeNotFound { id }))
                    .collect::<Result<Vec<_>>>()
            })
            .await?;

        debug!("Exporting {} recipes", recipes.len());
        Ok(RecipeBundle::new(&recipes))
    }

    /// Imports every recipe of a bundle as one batch and returns the stored
    /// copies with their new IDs.
    ///
    /// # Errors
    ///
    /// * `BakeryError::MalformedRecipe` - a recipe's steps do not form a
    ///   forest; nothing is imported in that case
    pub async fn import_recipes(&self, bundle: RecipeBundle) -> Result<Vec<Recipe>> {
        let trees = bundle
            .recipes
            .into_iter()
            .map(RecipeTree::resolve)
            .collect::<Result<Vec<_>>>()
            .map_err(|e| {
                warn!("Refusing to import bundle: {e}");
                e
            })?;

        self.perform_batch(BatchOptions::default(), move |db| {
            trees
                .iter()
                .map(|tree| db.import_recipe(tree))
                .collect::<Result<Vec<_>>>()
        })
        .await
    }
}
