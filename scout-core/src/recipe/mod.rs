//! Smoothie recipes: catalog lookup by goal and flavor, remaining daily
//! nutrient needs, and the layer breakdown of a picked recipe.
//!
//! The catalog is loaded once and queried read-only. Picks are
//! deterministic for a given seed so that the CLI can reproduce a
//! suggestion.
//!
//! # Examples
//!
//! ```
//! use scout_core::recipe::{NutrientTargets, Recipe, RecipeCatalog, layer_breakdown};
//!
//! # fn main() -> Result<(), scout_core::RecipeError> {
//! let catalog: RecipeCatalog = vec![Recipe::new(
//!     "S1",
//!     "Energy",
//!     "Berry",
//!     Recipe::parse_ingredients("Whey, Oats, Spinach, Almond Milk, Honey"),
//!     30.0,
//!     8.0,
//! )?]
//! .into();
//!
//! let recipe = catalog.pick("Energy", "Berry", 7).expect("one recipe matches");
//! let remaining = NutrientTargets::DAILY.remaining(recipe);
//! assert_eq!(remaining.protein_g, 20.0);
//! assert_eq!(layer_breakdown(recipe).len(), 5);
//! # Ok(())
//! # }
//! ```

mod layers;

use std::collections::BTreeSet;

use rand::SeedableRng;
use rand::seq::SliceRandom;
use rand_chacha::ChaCha8Rng;
use thiserror::Error;

pub use layers::{DEFAULT_SMOOTHIE_WEIGHT_G, Layer, LayerCategory, layer_breakdown, layers_for};

/// A catalogued smoothie.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Recipe {
    /// Catalog identifier.
    pub id: String,
    /// Wellness goal the recipe targets.
    pub goal: String,
    /// Dominant flavor.
    pub flavor: String,
    /// Ingredients in layering order.
    pub ingredients: Vec<String>,
    /// Protein per serving, in grams.
    pub total_protein_g: f64,
    /// Fiber per serving, in grams.
    pub total_fiber_g: f64,
}

/// Errors returned by [`Recipe::new`].
#[derive(Debug, Clone, Error, PartialEq)]
pub enum RecipeError {
    /// A required text field was blank.
    #[error("recipe {field} must not be empty")]
    EmptyField {
        /// Name of the blank field.
        field: &'static str,
    },
    /// The ingredient list was empty.
    #[error("recipe {id:?} lists no ingredients")]
    NoIngredients {
        /// Identifier of the offending recipe.
        id: String,
    },
    /// A nutrient total was negative or not finite.
    #[error("recipe {id:?} has an invalid {nutrient} total of {value}")]
    InvalidNutrient {
        /// Identifier of the offending recipe.
        id: String,
        /// Nutrient that failed validation.
        nutrient: &'static str,
        /// Value found.
        value: f64,
    },
}

impl Recipe {
    /// Validates and constructs a [`Recipe`].
    ///
    /// # Errors
    /// Returns [`RecipeError`] when a text field is blank, the ingredient
    /// list is empty, or a nutrient total is negative or not finite.
    pub fn new(
        id: impl Into<String>,
        goal: impl Into<String>,
        flavor: impl Into<String>,
        ingredients: Vec<String>,
        total_protein_g: f64,
        total_fiber_g: f64,
    ) -> Result<Self, RecipeError> {
        let recipe = Self {
            id: id.into(),
            goal: goal.into(),
            flavor: flavor.into(),
            ingredients,
            total_protein_g,
            total_fiber_g,
        };
        for (field, value) in [
            ("id", &recipe.id),
            ("goal", &recipe.goal),
            ("flavor", &recipe.flavor),
        ] {
            if value.trim().is_empty() {
                return Err(RecipeError::EmptyField { field });
            }
        }
        if recipe.ingredients.is_empty() {
            return Err(RecipeError::NoIngredients { id: recipe.id });
        }
        for (nutrient, value) in [
            ("protein", recipe.total_protein_g),
            ("fiber", recipe.total_fiber_g),
        ] {
            if !(value.is_finite() && value >= 0.0) {
                return Err(RecipeError::InvalidNutrient {
                    id: recipe.id,
                    nutrient,
                    value,
                });
            }
        }
        Ok(recipe)
    }

    /// Split a comma-separated ingredient cell, trimming whitespace and
    /// dropping empty entries.
    #[must_use]
    pub fn parse_ingredients(cell: &str) -> Vec<String> {
        cell.split(',')
            .map(str::trim)
            .filter(|entry| !entry.is_empty())
            .map(ToOwned::to_owned)
            .collect()
    }
}

/// Immutable collection of recipes, kept in load order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RecipeCatalog {
    recipes: Vec<Recipe>,
}

impl RecipeCatalog {
    /// All recipes in load order.
    #[must_use]
    pub const fn recipes(&self) -> &[Recipe] {
        self.recipes.as_slice()
    }

    /// Iterate over the recipes in load order.
    pub fn iter(&self) -> std::slice::Iter<'_, Recipe> {
        self.recipes.iter()
    }

    /// Number of recipes.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.recipes.len()
    }

    /// Report whether the catalog holds no recipes.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.recipes.is_empty()
    }

    /// Distinct goals, sorted.
    #[must_use]
    pub fn goals(&self) -> Vec<&str> {
        self.recipes
            .iter()
            .map(|recipe| recipe.goal.as_str())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    /// Distinct flavors offered for `goal`, sorted.
    #[must_use]
    pub fn flavors_for(&self, goal: &str) -> Vec<&str> {
        self.recipes
            .iter()
            .filter(|recipe| recipe.goal == goal)
            .map(|recipe| recipe.flavor.as_str())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    /// Recipes matching both `goal` and `flavor`, in load order.
    #[must_use]
    pub fn matching(&self, goal: &str, flavor: &str) -> Vec<&Recipe> {
        self.recipes
            .iter()
            .filter(|recipe| recipe.goal == goal && recipe.flavor == flavor)
            .collect()
    }

    /// Choose one matching recipe using a `ChaCha8` generator seeded with
    /// `seed`. Returns `None` when nothing matches.
    #[must_use]
    pub fn pick(&self, goal: &str, flavor: &str, seed: u64) -> Option<&Recipe> {
        let matches = self.matching(goal, flavor);
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        matches.choose(&mut rng).copied()
    }
}

impl From<Vec<Recipe>> for RecipeCatalog {
    fn from(recipes: Vec<Recipe>) -> Self {
        Self { recipes }
    }
}

impl FromIterator<Recipe> for RecipeCatalog {
    fn from_iter<I: IntoIterator<Item = Recipe>>(iter: I) -> Self {
        Self {
            recipes: iter.into_iter().collect(),
        }
    }
}

impl<'a> IntoIterator for &'a RecipeCatalog {
    type Item = &'a Recipe;
    type IntoIter = std::slice::Iter<'a, Recipe>;

    fn into_iter(self) -> Self::IntoIter {
        self.recipes.iter()
    }
}

/// Daily nutrient needs a smoothie contributes towards.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct NutrientTargets {
    /// Daily protein need, in grams.
    pub protein_g: f64,
    /// Daily fiber need, in grams.
    pub fiber_g: f64,
}

impl NutrientTargets {
    /// Reference adult needs: 50 g protein and 25 g fiber.
    pub const DAILY: Self = Self {
        protein_g: 50.0,
        fiber_g: 25.0,
    };

    /// Needs left after drinking `recipe`, floored at zero.
    #[must_use]
    #[expect(
        clippy::float_arithmetic,
        reason = "remaining needs subtract the recipe totals"
    )]
    pub fn remaining(&self, recipe: &Recipe) -> RemainingNutrients {
        RemainingNutrients {
            protein_g: (self.protein_g - recipe.total_protein_g).max(0.0),
            fiber_g: (self.fiber_g - recipe.total_fiber_g).max(0.0),
        }
    }
}

impl Default for NutrientTargets {
    fn default() -> Self {
        Self::DAILY
    }
}

/// Nutrient needs still open after a recipe.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RemainingNutrients {
    /// Protein still needed, in grams.
    pub protein_g: f64,
    /// Fiber still needed, in grams.
    pub fiber_g: f64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::{fixture, rstest};

    fn recipe(id: &str, goal: &str, flavor: &str, protein: f64, fiber: f64) -> Recipe {
        Recipe::new(
            id,
            goal,
            flavor,
            vec!["Whey".to_owned(), "Oats".to_owned()],
            protein,
            fiber,
        )
        .expect("valid recipe")
    }

    #[fixture]
    fn catalog() -> RecipeCatalog {
        vec![
            recipe("S1", "Energy", "Berry", 20.0, 10.0),
            recipe("S2", "Recovery", "Chocolate", 35.0, 6.0),
            recipe("S3", "Energy", "Tropical", 12.0, 9.0),
            recipe("S4", "Energy", "Berry", 25.0, 12.0),
            recipe("S5", "Detox", "Green", 8.0, 14.0),
            recipe("S6", "Energy", "Berry", 18.0, 7.0),
        ]
        .into()
    }

    #[rstest]
    #[case("Whey, Oats ,Spinach", &["Whey", "Oats", "Spinach"])]
    #[case("  Banana  ", &["Banana"])]
    #[case("Mango,,  , Lime", &["Mango", "Lime"])]
    #[case("", &[])]
    fn parses_comma_separated_ingredients(#[case] cell: &str, #[case] expected: &[&str]) {
        assert_eq!(Recipe::parse_ingredients(cell), expected);
    }

    #[rstest]
    fn iterates_in_load_order(catalog: RecipeCatalog) {
        let ids: Vec<_> = catalog.iter().map(|recipe| recipe.id.as_str()).collect();
        assert_eq!(ids, vec!["S1", "S2", "S3", "S4", "S5", "S6"]);
        let mut visited = Vec::new();
        for recipe in &catalog {
            visited.push(recipe.id.as_str());
        }
        assert_eq!(visited, ids);
    }

    #[rstest]
    fn rejects_blank_goal() {
        let err = Recipe::new("S1", " ", "Berry", vec!["Whey".to_owned()], 1.0, 1.0)
            .expect_err("blank goal should fail");
        assert_eq!(err, RecipeError::EmptyField { field: "goal" });
    }

    #[rstest]
    fn rejects_empty_ingredient_list() {
        let err = Recipe::new("S1", "Energy", "Berry", Vec::new(), 1.0, 1.0)
            .expect_err("missing ingredients should fail");
        assert!(matches!(err, RecipeError::NoIngredients { .. }));
    }

    #[rstest]
    #[case(-1.0, 2.0, "protein")]
    #[case(1.0, f64::NAN, "fiber")]
    fn rejects_invalid_nutrients(
        #[case] protein: f64,
        #[case] fiber: f64,
        #[case] expected: &str,
    ) {
        let err = Recipe::new("S1", "Energy", "Berry", vec!["Whey".to_owned()], protein, fiber)
            .expect_err("invalid nutrient should fail");
        let RecipeError::InvalidNutrient { nutrient, .. } = err else {
            panic!("unexpected error: {err:?}");
        };
        assert_eq!(nutrient, expected);
    }

    #[rstest]
    fn goals_are_sorted_and_distinct(catalog: RecipeCatalog) {
        assert_eq!(catalog.goals(), vec!["Detox", "Energy", "Recovery"]);
    }

    #[rstest]
    fn flavors_are_scoped_to_the_goal(catalog: RecipeCatalog) {
        assert_eq!(catalog.flavors_for("Energy"), vec!["Berry", "Tropical"]);
        assert!(catalog.flavors_for("Sleep").is_empty());
    }

    #[rstest]
    fn matching_keeps_catalog_order(catalog: RecipeCatalog) {
        let ids: Vec<_> = catalog
            .matching("Energy", "Berry")
            .into_iter()
            .map(|recipe| recipe.id.as_str())
            .collect();
        assert_eq!(ids, vec!["S1", "S4", "S6"]);
    }

    #[rstest]
    fn pick_is_deterministic_per_seed(catalog: RecipeCatalog) {
        for seed in 0..16 {
            let first = catalog.pick("Energy", "Berry", seed).expect("match");
            let second = catalog.pick("Energy", "Berry", seed).expect("match");
            assert_eq!(first, second);
            assert_eq!(first.goal, "Energy");
            assert_eq!(first.flavor, "Berry");
        }
    }

    #[rstest]
    fn pick_without_matches_is_none(catalog: RecipeCatalog) {
        assert!(catalog.pick("Energy", "Green", 1).is_none());
        assert!(RecipeCatalog::default().pick("Energy", "Berry", 1).is_none());
    }

    #[rstest]
    #[case(20.0, 10.0, 30.0, 15.0)]
    #[case(60.0, 25.0, 0.0, 0.0)]
    #[case(0.0, 30.0, 50.0, 0.0)]
    fn remaining_needs_floor_at_zero(
        #[case] protein: f64,
        #[case] fiber: f64,
        #[case] protein_left: f64,
        #[case] fiber_left: f64,
    ) {
        let remaining = NutrientTargets::default().remaining(&recipe("S1", "Energy", "Berry", protein, fiber));
        assert_eq!(
            remaining,
            RemainingNutrients {
                protein_g: protein_left,
                fiber_g: fiber_left,
            }
        );
    }
}
