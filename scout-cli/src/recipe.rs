//! Recipe command implementation for the Smoothie Scout CLI.

use camino::Utf8PathBuf;
use clap::Parser;
use ortho_config::{OrthoConfig, SubcmdConfigMerge};
use scout_core::{Layer, NutrientTargets, Recipe, RecipeCatalog, RemainingNutrients, layer_breakdown};
use scout_data::load_recipes;
use serde::{Deserialize, Serialize};
use std::io::Write;

use crate::{
    ARG_RECIPE_CATALOG, ARG_RECIPE_FLAVOR, ARG_RECIPE_GOAL, ARG_RECIPE_SEED, CliError,
    ENV_RECIPE_CATALOG, ENV_RECIPE_GOAL, require_existing,
};

/// Seed used when none is configured, so repeated runs agree.
pub(crate) const DEFAULT_RECIPE_SEED: u64 = 0;

/// CLI arguments for the `recipe` subcommand.
#[derive(Debug, Clone, Parser, Deserialize, Serialize, OrthoConfig, Default)]
#[command(
    name = "recipe",
    long_about = "Browse the recipe catalog. Without a goal, list the goals; \
                 with a goal, list its flavors; with a goal and a flavor, \
                 pick a recipe and print it with the remaining daily \
                 nutrient needs and its layer breakdown.",
    about = "Pick a smoothie recipe by goal and flavor"
)]
#[ortho_config(prefix = "SCOUT")]
pub(crate) struct RecipeArgs {
    /// Path to the recipe catalog CSV.
    #[arg(value_name = "path")]
    #[serde(default)]
    pub(crate) catalog: Option<Utf8PathBuf>,
    /// Wellness goal, for example `Energy`.
    #[arg(long = ARG_RECIPE_GOAL, value_name = "goal")]
    #[serde(default)]
    pub(crate) goal: Option<String>,
    /// Dominant flavor, for example `Berry`.
    #[arg(long = ARG_RECIPE_FLAVOR, value_name = "flavor")]
    #[serde(default)]
    pub(crate) flavor: Option<String>,
    /// Seed for choosing among matching recipes.
    #[arg(long = ARG_RECIPE_SEED, value_name = "seed")]
    #[serde(default)]
    pub(crate) seed: Option<u64>,
}

impl RecipeArgs {
    pub(crate) fn into_config(self) -> Result<RecipeConfig, CliError> {
        let merged = self.load_and_merge().map_err(CliError::Configuration)?;
        RecipeConfig::try_from(merged)
    }
}

/// What the `recipe` command should print.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum RecipeQuery {
    /// List every goal.
    Goals,
    /// List the flavors offered for a goal.
    Flavors { goal: String },
    /// Pick one recipe.
    Pick { goal: String, flavor: String },
}

/// Resolved `recipe` command configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct RecipeConfig {
    /// Path to the recipe catalog CSV.
    pub(crate) catalog: Utf8PathBuf,
    /// Requested listing or pick.
    pub(crate) query: RecipeQuery,
    /// Seed for the pick.
    pub(crate) seed: u64,
}

impl TryFrom<RecipeArgs> for RecipeConfig {
    type Error = CliError;

    fn try_from(args: RecipeArgs) -> Result<Self, Self::Error> {
        let catalog = args.catalog.ok_or(CliError::MissingArgument {
            field: ARG_RECIPE_CATALOG,
            env: ENV_RECIPE_CATALOG,
        })?;
        let query = match (args.goal, args.flavor) {
            (None, None) => RecipeQuery::Goals,
            (None, Some(_)) => {
                return Err(CliError::MissingArgument {
                    field: ARG_RECIPE_GOAL,
                    env: ENV_RECIPE_GOAL,
                });
            }
            (Some(goal), None) => RecipeQuery::Flavors { goal },
            (Some(goal), Some(flavor)) => RecipeQuery::Pick { goal, flavor },
        };
        Ok(Self {
            catalog,
            query,
            seed: args.seed.unwrap_or(DEFAULT_RECIPE_SEED),
        })
    }
}

#[derive(Debug, Serialize)]
struct GoalListing<'a> {
    goals: Vec<&'a str>,
}

#[derive(Debug, Serialize)]
struct FlavorListing<'a> {
    goal: &'a str,
    flavors: Vec<&'a str>,
}

/// A picked recipe with what it leaves to eat and how to layer it.
#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub(crate) struct RecipeSuggestion {
    pub(crate) recipe: Recipe,
    pub(crate) remaining: RemainingNutrients,
    pub(crate) layers: Vec<Layer>,
}

pub(crate) fn run_recipe(args: RecipeArgs) -> Result<(), CliError> {
    let mut stdout = std::io::stdout().lock();
    run_recipe_with(args, &mut stdout)
}

pub(crate) fn run_recipe_with(args: RecipeArgs, writer: &mut dyn Write) -> Result<(), CliError> {
    let config = args.into_config()?;
    require_existing(&config.catalog, ARG_RECIPE_CATALOG)?;
    let catalog = load_recipes(&config.catalog)?;
    answer_query(&catalog, &config, writer)
}

fn answer_query(
    catalog: &RecipeCatalog,
    config: &RecipeConfig,
    writer: &mut dyn Write,
) -> Result<(), CliError> {
    match &config.query {
        RecipeQuery::Goals => write_json(
            writer,
            &GoalListing {
                goals: catalog.goals(),
            },
        ),
        RecipeQuery::Flavors { goal } => {
            let flavors = catalog.flavors_for(goal);
            if flavors.is_empty() {
                return Err(CliError::UnknownGoal { goal: goal.clone() });
            }
            write_json(writer, &FlavorListing { goal, flavors })
        }
        RecipeQuery::Pick { goal, flavor } => {
            let suggestion = suggest(catalog, goal, flavor, config.seed)?;
            write_json(writer, &suggestion)
        }
    }
}

/// Pick a recipe and derive its remaining needs and layers.
pub(crate) fn suggest(
    catalog: &RecipeCatalog,
    goal: &str,
    flavor: &str,
    seed: u64,
) -> Result<RecipeSuggestion, CliError> {
    let recipe = catalog.pick(goal, flavor, seed).ok_or_else(|| {
        if catalog.flavors_for(goal).is_empty() {
            CliError::UnknownGoal {
                goal: goal.to_owned(),
            }
        } else {
            CliError::NoMatchingRecipe {
                goal: goal.to_owned(),
                flavor: flavor.to_owned(),
            }
        }
    })?;
    Ok(RecipeSuggestion {
        remaining: NutrientTargets::DAILY.remaining(recipe),
        layers: layer_breakdown(recipe),
        recipe: recipe.clone(),
    })
}

fn write_json<T: Serialize>(writer: &mut dyn Write, value: &T) -> Result<(), CliError> {
    let payload = serde_json::to_string_pretty(value).map_err(CliError::SerializeOutput)?;
    writer
        .write_all(payload.as_bytes())
        .map_err(CliError::WriteOutput)?;
    writer.write_all(b"\n").map_err(CliError::WriteOutput)?;
    Ok(())
}
