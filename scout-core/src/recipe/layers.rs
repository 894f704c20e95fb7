//! Proportional layering of a smoothie's ingredients.

use super::Recipe;

/// Serving weight used by [`layer_breakdown`], in grams.
pub const DEFAULT_SMOOTHIE_WEIGHT_G: f64 = 250.0;

/// Role an ingredient plays in the glass, bottom to top.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum LayerCategory {
    /// Protein source, 20% of the weight.
    #[cfg_attr(feature = "serde", serde(rename = "Protein Source"))]
    Protein,
    /// Grain or carbohydrate base, 20%.
    #[cfg_attr(feature = "serde", serde(rename = "Grain / Carb Base"))]
    Base,
    /// Vegetable or fruit, 20%.
    #[cfg_attr(feature = "serde", serde(rename = "Vegetable / Fruit"))]
    Produce,
    /// Liquid or extract, 30%.
    #[cfg_attr(feature = "serde", serde(rename = "Liquid / Extract"))]
    Liquid,
    /// Booster or flavor enhancer, 10%.
    #[cfg_attr(feature = "serde", serde(rename = "Booster / Flavor Enhancer"))]
    Booster,
}

impl LayerCategory {
    /// Categories in layering order.
    pub const ALL: [Self; 5] = [
        Self::Protein,
        Self::Base,
        Self::Produce,
        Self::Liquid,
        Self::Booster,
    ];

    /// Human-readable label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Protein => "Protein Source",
            Self::Base => "Grain / Carb Base",
            Self::Produce => "Vegetable / Fruit",
            Self::Liquid => "Liquid / Extract",
            Self::Booster => "Booster / Flavor Enhancer",
        }
    }

    /// Share of the serving weight; the five shares sum to one.
    #[must_use]
    pub const fn proportion(self) -> f64 {
        match self {
            Self::Protein | Self::Base | Self::Produce => 0.2,
            Self::Liquid => 0.3,
            Self::Booster => 0.1,
        }
    }
}

impl std::fmt::Display for LayerCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// One ingredient placed in its layer.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Layer {
    /// Ingredient name.
    pub ingredient: String,
    /// Layer the ingredient fills.
    pub category: LayerCategory,
    /// Share of the serving weight.
    pub proportion: f64,
    /// Weight of the layer, rounded to whole grams.
    pub grams: f64,
}

/// Layers for `recipe` in a [`DEFAULT_SMOOTHIE_WEIGHT_G`] serving.
#[must_use]
pub fn layer_breakdown(recipe: &Recipe) -> Vec<Layer> {
    layers_for(&recipe.ingredients, DEFAULT_SMOOTHIE_WEIGHT_G)
}

/// Pair `ingredients` with [`LayerCategory::ALL`] in order.
///
/// Ingredients beyond the fifth are ignored; shorter lists fill only the
/// leading categories.
#[must_use]
#[expect(
    clippy::float_arithmetic,
    reason = "layer weights scale the serving by each proportion"
)]
pub fn layers_for(ingredients: &[String], total_weight_g: f64) -> Vec<Layer> {
    ingredients
        .iter()
        .zip(LayerCategory::ALL)
        .map(|(ingredient, category)| Layer {
            ingredient: ingredient.clone(),
            category,
            proportion: category.proportion(),
            grams: (category.proportion() * total_weight_g).round(),
        })
        .collect()
}
