use std::net::SocketAddr;
use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::models::{Filters, Goal, Macro, SearchParams};
use crate::needs::{ActivityLevel, Profile, Sex};
use crate::planner::constants::*;

/// MealSuggest: find food combinations that hit a calorie and protein target.
#[derive(Parser, Debug)]
#[command(name = "meal_suggest")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Path to the food catalog (CSV, or JSON when the extension is .json).
    #[arg(short, long, global = true, default_value = "foods.csv")]
    pub catalog: PathBuf,

    /// Path to the pairing rules JSON file. Falls back to the built-in table.
    #[arg(short, long, global = true, default_value = "pairings.json")]
    pub pairings: PathBuf,

    /// Enable debug logging (overridden by RUST_LOG).
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Answer a few questions and get a meal suggestion.
    Interactive,

    /// Suggest a meal for the given goals.
    Suggest {
        /// Calorie target (kcal).
        #[arg(long)]
        calories: f64,

        /// Protein target (g).
        #[arg(long)]
        protein: f64,

        /// Carbohydrate target (g), reported only.
        #[arg(long)]
        carbs: Option<f64>,

        /// Fat target (g), reported only.
        #[arg(long)]
        fat: Option<f64>,

        /// Fiber target (g), reported only.
        #[arg(long)]
        fiber: Option<f64>,

        /// Only consider these items, by name (repeatable).
        #[arg(long = "only")]
        shortlist: Vec<String>,

        #[command(flatten)]
        filters: FilterArgs,

        #[command(flatten)]
        search: SearchArgs,

        /// Print the result as JSON.
        #[arg(long)]
        json: bool,
    },

    /// List eligible foods.
    List {
        #[command(flatten)]
        filters: FilterArgs,

        /// Sort by this value, highest first. Catalog order when omitted.
        #[arg(long, value_enum)]
        sort: Option<Macro>,
    },

    /// Compute daily nutrition targets from a body profile.
    Needs {
        /// Age in years.
        #[arg(long)]
        age: f64,

        /// Weight in kilograms.
        #[arg(long)]
        weight: f64,

        /// Height in centimetres.
        #[arg(long)]
        height: f64,

        #[arg(long, value_enum)]
        sex: Sex,

        #[arg(long, value_enum, default_value = "moderately_active")]
        activity: ActivityLevel,

        /// Also print the per-meal goal for this many meals a day.
        #[arg(long)]
        meals: Option<u32>,
    },

    /// Serve the HTTP API.
    Serve {
        /// Address to bind.
        #[arg(long, default_value = "127.0.0.1:5000")]
        addr: SocketAddr,

        /// Per-request search deadline in milliseconds.
        #[arg(long, default_value_t = 5000)]
        deadline_ms: u64,

        #[command(flatten)]
        search: SearchArgs,
    },
}

impl Default for Command {
    fn default() -> Self {
        Command::Interactive
    }
}

/// Dietary filters shared by several subcommands.
#[derive(Args, Debug, Clone, Default)]
pub struct FilterArgs {
    /// Only vegan items.
    #[arg(long)]
    pub vegan: bool,

    /// Skip items listing this allergen.
    #[arg(long)]
    pub allergen: Option<String>,

    /// Exclude a food category (beef, pork, poultry, fish, shellfish, dairy, egg).
    #[arg(long = "exclude")]
    pub exclude: Vec<String>,
}

impl FilterArgs {
    pub fn to_filters(&self) -> Filters {
        Filters {
            vegan_only: self.vegan,
            allergen: self.allergen.clone(),
            excluded_categories: self.exclude.clone(),
        }
    }
}

/// Search bounds shared by `suggest` and `serve`.
#[derive(Args, Debug, Clone)]
pub struct SearchArgs {
    /// Base relative tolerance for calories and protein.
    #[arg(long, default_value_t = DEFAULT_TOLERANCE)]
    pub tolerance: f64,

    /// Maximum distinct items per meal.
    #[arg(long, default_value_t = DEFAULT_MAX_ITEMS)]
    pub max_items: usize,

    /// Maximum servings per item.
    #[arg(long, default_value_t = DEFAULT_MAX_SERVINGS)]
    pub max_servings: u32,

    /// Number of top-ranked items searched.
    #[arg(long, default_value_t = DEFAULT_TOP_K)]
    pub top_k: usize,

    /// Protein window (g) around the best meal for alternatives.
    #[arg(long, default_value_t = DEFAULT_PROTEIN_WINDOW)]
    pub protein_window: f64,

    /// Maximum alternatives returned.
    #[arg(long, default_value_t = DEFAULT_MAX_ALTERNATIVES)]
    pub max_alternatives: usize,
}

impl Default for SearchArgs {
    fn default() -> Self {
        Self::from(&SearchParams::default())
    }
}

impl From<&SearchParams> for SearchArgs {
    fn from(p: &SearchParams) -> Self {
        Self {
            tolerance: p.tolerance,
            max_items: p.max_items,
            max_servings: p.max_servings,
            top_k: p.top_k,
            protein_window: p.protein_window,
            max_alternatives: p.max_alternatives,
        }
    }
}

impl SearchArgs {
    pub fn to_params(&self) -> SearchParams {
        SearchParams {
            tolerance: self.tolerance,
            max_items: self.max_items,
            max_servings: self.max_servings,
            top_k: self.top_k,
            protein_window: self.protein_window,
            max_alternatives: self.max_alternatives,
        }
    }
}

/// Goal assembled from `suggest` flags.
pub fn goal_from_args(
    calories: f64,
    protein: f64,
    carbs: Option<f64>,
    fat: Option<f64>,
    fiber: Option<f64>,
) -> Goal {
    Goal {
        calories,
        protein_g: protein,
        carbs_g: carbs,
        fat_g: fat,
        fiber_g: fiber,
    }
}

/// Profile assembled from `needs` flags.
pub fn profile_from_args(
    age: f64,
    weight: f64,
    height: f64,
    sex: Sex,
    activity: ActivityLevel,
) -> Profile {
    Profile {
        age,
        weight_kg: weight,
        height_cm: height,
        sex,
        activity,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_subcommand_defaults_to_interactive() {
        let cli = Cli::try_parse_from(["meal_suggest"]).unwrap();
        assert!(matches!(cli.command.unwrap_or_default(), Command::Interactive));
        assert_eq!(cli.catalog, PathBuf::from("foods.csv"));
        assert!(!cli.verbose);
    }

    #[test]
    fn test_suggest_flags() {
        let cli = Cli::try_parse_from([
            "meal_suggest",
            "suggest",
            "--calories",
            "600",
            "--protein",
            "40",
            "--vegan",
            "--exclude",
            "beef",
            "--exclude",
            "fish",
            "--max-items",
            "2",
            "--json",
            "-c",
            "menu.json",
        ])
        .unwrap();

        assert_eq!(cli.catalog, PathBuf::from("menu.json"));
        match cli.command {
            Some(Command::Suggest {
                calories,
                protein,
                filters,
                search,
                json,
                ..
            }) => {
                assert_eq!(calories, 600.0);
                assert_eq!(protein, 40.0);
                assert!(json);
                let f = filters.to_filters();
                assert!(f.vegan_only);
                assert_eq!(f.excluded_categories, vec!["beef", "fish"]);
                let p = search.to_params();
                assert_eq!(p.max_items, 2);
                assert_eq!(p.top_k, DEFAULT_TOP_K);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_needs_activity_default() {
        let cli = Cli::try_parse_from([
            "meal_suggest",
            "needs",
            "--age",
            "30",
            "--weight",
            "75",
            "--height",
            "180",
            "--sex",
            "male",
        ])
        .unwrap();
        match cli.command {
            Some(Command::Needs { activity, meals, .. }) => {
                assert_eq!(activity, ActivityLevel::ModeratelyActive);
                assert_eq!(meals, None);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_search_args_default_matches_params() {
        assert_eq!(SearchArgs::default().to_params(), SearchParams::default());
    }
}
