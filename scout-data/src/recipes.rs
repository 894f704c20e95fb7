//! Recipe catalog loader.

use std::io::Read;

use camino::Utf8Path;
use log::debug;
use scout_core::{Recipe, RecipeCatalog};
use serde::Deserialize;

use crate::DataSourceError;
use crate::fs::open_utf8_file;
use crate::table::read_rows;

#[derive(Debug, Deserialize)]
struct RecipeRow {
    #[serde(rename = "SmoothieID")]
    id: String,
    #[serde(rename = "Goal")]
    goal: String,
    #[serde(rename = "Flavor")]
    flavor: String,
    #[serde(rename = "Ingredients")]
    ingredients: String,
    #[serde(rename = "Total_Protein")]
    total_protein: f64,
    #[serde(rename = "Total_Fiber")]
    total_fiber: f64,
}

/// Load the recipe catalog stored at `path`.
///
/// # Errors
/// Returns [`DataSourceError`] when the file cannot be opened, the CSV is
/// malformed, or a row fails validation.
pub fn load_recipes(path: &Utf8Path) -> Result<RecipeCatalog, DataSourceError> {
    let file = open_utf8_file(path).map_err(|source| DataSourceError::Open {
        path: path.to_owned(),
        source,
    })?;
    read_recipes(file, path)
}

/// Read a recipe catalog from `reader`; `path` labels errors.
///
/// Expects the columns `SmoothieID`, `Goal`, `Flavor`, `Ingredients`,
/// `Total_Protein` and `Total_Fiber`. Ingredients are a comma-separated
/// list inside one quoted cell.
///
/// # Errors
/// Returns [`DataSourceError`] when the CSV is malformed or a row fails
/// validation.
pub fn read_recipes<R: Read>(reader: R, path: &Utf8Path) -> Result<RecipeCatalog, DataSourceError> {
    let recipes = read_rows(reader, path, |row: RecipeRow, line| {
        Recipe::new(
            row.id,
            row.goal,
            row.flavor,
            Recipe::parse_ingredients(&row.ingredients),
            row.total_protein,
            row.total_fiber,
        )
        .map_err(|source| DataSourceError::InvalidRecipe {
            path: path.to_owned(),
            line,
            source,
        })
    })?;
    let catalog = RecipeCatalog::from(recipes);
    debug!(
        "loaded {} recipes across {} goals from {path}",
        catalog.len(),
        catalog.goals().len()
    );
    Ok(catalog)
}
