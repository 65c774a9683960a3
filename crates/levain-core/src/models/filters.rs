//! Filter types for querying recipes.

/// Filter options for listing recipes.
#[derive(Debug, Clone, Default)]
pub struct RecipeFilter {
    /// Filter by recipe name (case-insensitive partial match)
    pub name_contains: Option<String>,

    /// Only favorites
    pub favorites_only: bool,
}

impl From<&crate::params::ListRecipes> for RecipeFilter {
    /// Convert ListRecipes parameters to a RecipeFilter.
    ///
    /// ```rust
    /// use levain_core::{models::RecipeFilter, params::ListRecipes};
    ///
    /// let params = ListRecipes {
    ///     favorites: true,
    ///     name: Some("rye".to_string()),
    /// };
    /// let filter: RecipeFilter = (&params).into();
    /// assert!(filter.favorites_only);
    /// assert_eq!(filter.name_contains.as_deref(), Some("rye"));
    /// ```
    fn from(params: &crate::params::ListRecipes) -> Self {
        Self {
            name_contains: params
                .name
                .as_ref()
                .map(|n| n.trim().to_string())
                .filter(|n| !n.is_empty()),
            favorites_only: params.favorites,
        }
    }
}
