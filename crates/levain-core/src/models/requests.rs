//! Request types for updating models.

use jiff::{SignedDuration, Timestamp};

use super::{Difficulty, IngredientKind};

/// Validated partial update of a recipe.
#[derive(Debug, Default)]
pub struct UpdateRecipeRequest {
    pub name: Option<String>,
    pub info: Option<String>,
    pub is_favorite: Option<bool>,
    pub difficulty: Option<Difficulty>,
    pub inverted: Option<bool>,
    /// `Some(None)` clears the batch count
    pub times: Option<Option<f64>>,
    pub date: Option<Timestamp>,
    /// `Some(None)` removes the image
    pub image_data: Option<Option<String>>,
}

impl UpdateRecipeRequest {
    /// Whether the request changes anything at all.
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.info.is_none()
            && self.is_favorite.is_none()
            && self.difficulty.is_none()
            && self.inverted.is_none()
            && self.times.is_none()
            && self.date.is_none()
            && self.image_data.is_none()
    }
}

impl TryFrom<crate::params::UpdateRecipe> for UpdateRecipeRequest {
    type Error = crate::BakeryError;

    /// Convert UpdateRecipe parameters into a validated request.
    ///
    /// ```rust
    /// use levain_core::{models::UpdateRecipeRequest, params::UpdateRecipe};
    ///
    /// let params = UpdateRecipe {
    ///     id: 1,
    ///     date: Some("2026-10-17T08:00:00Z".to_string()),
    ///     inverted: Some(true),
    ///     ..Default::default()
    /// };
    /// let request: UpdateRecipeRequest = params.try_into()?;
    /// assert_eq!(request.inverted, Some(true));
    /// assert!(request.date.is_some());
    /// # use levain_core::Result;
    /// # Result::<()>::Ok(())
    /// ```
    fn try_from(params: crate::params::UpdateRecipe) -> Result<Self, Self::Error> {
        let (difficulty, date, times) = params.validate()?;

        Ok(Self {
            name: params.name,
            info: params.info,
            is_favorite: params.favorite,
            difficulty,
            inverted: params.inverted,
            times: if params.clear_times { Some(None) } else { times.map(Some) },
            date,
            image_data: if params.clear_image {
                Some(None)
            } else {
                params.image_data.map(Some)
            },
        })
    }
}

/// Validated partial update of a step.
#[derive(Debug, Default)]
pub struct UpdateStepRequest {
    pub name: Option<String>,
    pub duration: Option<SignedDuration>,
    pub temperature: Option<i32>,
    pub is_dynamic_temperature: Option<bool>,
    pub second_temperature: Option<i32>,
    pub notes: Option<String>,
}

impl TryFrom<crate::params::UpdateStep> for UpdateStepRequest {
    type Error = crate::BakeryError;

    fn try_from(params: crate::params::UpdateStep) -> Result<Self, Self::Error> {
        let duration = params.validate()?;

        Ok(Self {
            name: params.name,
            duration,
            temperature: params.temperature,
            is_dynamic_temperature: params.dynamic_temperature,
            second_temperature: params.second_temperature,
            notes: params.notes,
        })
    }
}

/// Validated partial update of an ingredient.
#[derive(Debug, Default)]
pub struct UpdateIngredientRequest {
    pub name: Option<String>,
    pub amount: Option<f64>,
    pub kind: Option<IngredientKind>,
}

impl TryFrom<crate::params::UpdateIngredient> for UpdateIngredientRequest {
    type Error = crate::BakeryError;

    fn try_from(params: crate::params::UpdateIngredient) -> Result<Self, Self::Error> {
        let kind = params.validate()?;

        Ok(Self {
            name: params.name,
            amount: params.amount,
            kind,
        })
    }
}

/// Validated fields of a recipe about to be created.
#[derive(Debug, Clone)]
pub struct NewRecipe {
    pub name: String,
    pub info: String,
    pub difficulty: Difficulty,
    pub inverted: bool,
    pub times: Option<f64>,
    pub date: Timestamp,
}

impl TryFrom<&crate::params::CreateRecipe> for NewRecipe {
    type Error = crate::BakeryError;

    /// Convert CreateRecipe parameters; the anchor date defaults to now.
    ///
    /// ```rust
    /// use levain_core::{models::{Difficulty, NewRecipe}, params::CreateRecipe};
    ///
    /// let params = CreateRecipe {
    ///     name: "Rye".to_string(),
    ///     difficulty: Some("medium".to_string()),
    ///     ..Default::default()
    /// };
    /// let recipe = NewRecipe::try_from(&params)?;
    /// assert_eq!(recipe.difficulty, Difficulty::Medium);
    /// assert!(recipe.info.is_empty());
    /// # use levain_core::Result;
    /// # Result::<()>::Ok(())
    /// ```
    fn try_from(params: &crate::params::CreateRecipe) -> Result<Self, Self::Error> {
        let (difficulty, date) = params.validate()?;

        Ok(Self {
            name: params.name.trim().to_string(),
            info: params.info.clone().unwrap_or_default(),
            difficulty,
            inverted: params.inverted,
            times: params.times,
            date: date.unwrap_or_else(Timestamp::now),
        })
    }
}

/// Validated fields of a step about to be created.
#[derive(Debug, Clone)]
pub struct NewStep {
    pub name: String,
    pub duration: SignedDuration,
    pub temperature: i32,
    pub is_dynamic_temperature: bool,
    pub second_temperature: i32,
    pub notes: String,
}

impl TryFrom<&crate::params::StepCreate> for NewStep {
    type Error = crate::BakeryError;

    fn try_from(params: &crate::params::StepCreate) -> Result<Self, Self::Error> {
        let duration = params.validate()?;

        Ok(Self {
            name: params.name.clone(),
            duration,
            temperature: params.temperature_or_default(),
            is_dynamic_temperature: params.dynamic_temperature,
            second_temperature: params.second_temperature_or_default(),
            notes: params.notes.clone().unwrap_or_default(),
        })
    }
}

/// Validated fields of an ingredient about to be created.
#[derive(Debug, Clone)]
pub struct NewIngredient {
    pub name: String,
    pub amount: f64,
    pub kind: IngredientKind,
}

impl TryFrom<&crate::params::IngredientCreate> for NewIngredient {
    type Error = crate::BakeryError;

    fn try_from(params: &crate::params::IngredientCreate) -> Result<Self, Self::Error> {
        let kind = params.validate()?;

        Ok(Self {
            name: params.name.clone(),
            amount: params.amount,
            kind,
        })
    }
}
