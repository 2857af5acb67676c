use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use clap::Parser;
use tracing::{debug, info};

use meal_suggest_rs::catalog::{load_catalog, load_pairings};
use meal_suggest_rs::cli::{
    Cli, Command, FilterArgs, SearchArgs, goal_from_args, profile_from_args,
};
use meal_suggest_rs::error::Result;
use meal_suggest_rs::interface::{
    collect_meal_request, display_food_list, display_needs, display_suggestion,
    prompt_pick_alternative,
};
use meal_suggest_rs::logging;
use meal_suggest_rs::models::{Catalog, Goal, Macro, SearchParams};
use meal_suggest_rs::needs::calculate_nutrition_needs;
use meal_suggest_rs::planner::{PairingTable, filter_eligible, suggest, suggest_from_shortlist};
use meal_suggest_rs::server::{self, AppState};

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    logging::init(cli.verbose);
    let command = cli.command.unwrap_or_default();

    match command {
        Command::Interactive => cmd_interactive(&cli.catalog, &cli.pairings),
        Command::Suggest {
            calories,
            protein,
            carbs,
            fat,
            fiber,
            shortlist,
            filters,
            search,
            json,
        } => {
            let goal = goal_from_args(calories, protein, carbs, fat, fiber);
            cmd_suggest(&cli.catalog, &cli.pairings, goal, shortlist, &filters, &search, json)
        }
        Command::List { filters, sort } => cmd_list(&cli.catalog, &filters, sort),
        Command::Needs {
            age,
            weight,
            height,
            sex,
            activity,
            meals,
        } => {
            let profile = profile_from_args(age, weight, height, sex, activity);
            let needs = calculate_nutrition_needs(&profile)?;
            display_needs(&needs);
            if let Some(meals) = meals {
                let goal = needs.meal_goal(meals);
                println!(
                    "Per-meal goal ({} meals): {:.0} kcal, {:.1} g protein",
                    meals.max(1),
                    goal.calories,
                    goal.protein_g
                );
            }
            Ok(())
        }
        Command::Serve {
            addr,
            deadline_ms,
            search,
        } => {
            let defaults = search.to_params();
            defaults.validate()?;
            let (catalog, pairings) = load_inputs(&cli.catalog, &cli.pairings)?;
            let state = AppState::new(catalog, pairings)
                .with_defaults(defaults)
                .with_deadline(Duration::from_millis(deadline_ms));

            let runtime = tokio::runtime::Runtime::new()?;
            runtime.block_on(server::serve(addr, Arc::new(state)))
        }
    }
}

fn load_inputs(catalog_path: &Path, pairings_path: &Path) -> Result<(Catalog, PairingTable)> {
    let catalog = load_catalog(catalog_path)?;
    let pairings = load_pairings(pairings_path);
    info!(
        items = catalog.len(),
        rules = pairings.len(),
        "loaded catalog"
    );
    Ok((catalog, pairings))
}

/// Ask for goals and filters, then show the best meal and its alternatives.
fn cmd_interactive(catalog_path: &Path, pairings_path: &Path) -> Result<()> {
    let (catalog, pairings) = load_inputs(catalog_path, pairings_path)?;
    if catalog.is_empty() {
        println!("The catalog at {} has no items.", catalog_path.display());
        return Ok(());
    }

    println!("Loaded {} foods", catalog.len());
    println!();

    let request = collect_meal_request(&catalog)?;
    request.goal.validate()?;
    let params = SearchParams::default();
    if let Some(names) = &request.shortlist {
        params.for_shortlist(names.len()).validate()?;
    }

    println!();
    println!(
        "Searching for {:.0} kcal and {:.1} g protein...",
        request.goal.calories, request.goal.protein_g
    );

    let meal = match &request.shortlist {
        Some(names) => suggest_from_shortlist(
            &catalog,
            names,
            &request.goal,
            &request.filters,
            &params,
            &pairings,
        ),
        None => suggest(&catalog, &request.goal, &request.filters, &params, &pairings),
    };

    display_suggestion(meal.as_ref(), &catalog, &request.goal);

    if let Some(meal) = meal {
        if let Some(i) = prompt_pick_alternative(&meal)? {
            debug!(option = i + 1, "alternative picked");
            println!("You picked option {}:", i + 1);
            display_suggestion(Some(&meal.alternatives[i]), &catalog, &request.goal);
        }
    }

    Ok(())
}

/// Non-interactive suggestion from flags.
fn cmd_suggest(
    catalog_path: &Path,
    pairings_path: &Path,
    goal: Goal,
    shortlist: Vec<String>,
    filters: &FilterArgs,
    search: &SearchArgs,
    json: bool,
) -> Result<()> {
    goal.validate()?;
    let params = search.to_params();
    if shortlist.is_empty() {
        params.validate()?;
    } else {
        params.for_shortlist(shortlist.len()).validate()?;
    }

    let (catalog, pairings) = load_inputs(catalog_path, pairings_path)?;
    let filters = filters.to_filters();
    let meal = if shortlist.is_empty() {
        suggest(&catalog, &goal, &filters, &params, &pairings)
    } else {
        suggest_from_shortlist(&catalog, &shortlist, &goal, &filters, &params, &pairings)
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&meal)?);
    } else {
        display_suggestion(meal.as_ref(), &catalog, &goal);
    }
    Ok(())
}

/// Print eligible foods, optionally sorted.
fn cmd_list(catalog_path: &Path, filters: &FilterArgs, sort: Option<Macro>) -> Result<()> {
    let catalog = load_catalog(catalog_path)?;
    let filters = filters.to_filters();

    let ordered = match sort {
        Some(key) => catalog.sorted_by(key),
        None => catalog.iter().collect(),
    };
    let eligible = filter_eligible(&catalog, &filters);
    let foods: Vec<_> = ordered
        .into_iter()
        .filter(|f| eligible.iter().any(|e| e.name == f.name))
        .collect();

    display_food_list(&foods, "Eligible foods");
    Ok(())
}
