use dialoguer::{Confirm, Input, MultiSelect, Select};
use strsim::jaro_winkler;

use crate::error::Result;
use crate::models::{Catalog, Filters, Goal, Solution};
use crate::needs::{ActivityLevel, Profile, Sex, calculate_nutrition_needs};
use crate::planner::constants::CATEGORY_TOKENS;
use crate::planner::eligibility::eligible_names;

/// Minimum Jaro-Winkler score for suggesting a correction.
const CORRECTION_THRESHOLD: f64 = 0.85;

/// Everything the interactive session collects before searching.
#[derive(Debug, Clone)]
pub struct MealRequest {
    pub goal: Goal,
    pub filters: Filters,
    /// Restrict the search to these items, when set.
    pub shortlist: Option<Vec<String>>,
}

/// Prompt for a non-negative number; re-asks on bad input.
pub fn prompt_number(prompt: &str, default: f64) -> Result<f64> {
    let value = Input::<f64>::new()
        .with_prompt(prompt)
        .default(default)
        .validate_with(|v: &f64| -> std::result::Result<(), &str> {
            if v.is_finite() && *v >= 0.0 {
                Ok(())
            } else {
                Err("Please enter a non-negative number (e.g., 2000 or 50).")
            }
        })
        .interact_text()?;
    Ok(value)
}

/// Prompt for a body profile.
pub fn prompt_profile() -> Result<Profile> {
    let age = prompt_number("Age (years)", 30.0)?;
    let weight_kg = prompt_number("Weight (kg)", 70.0)?;
    let height_cm = prompt_number("Height (cm)", 170.0)?;

    let sexes = [Sex::Male, Sex::Female];
    let sex = Select::new()
        .with_prompt("Sex")
        .items(&["male", "female"])
        .default(0)
        .interact()?;

    let levels = [
        ActivityLevel::Sedentary,
        ActivityLevel::LightlyActive,
        ActivityLevel::ModeratelyActive,
        ActivityLevel::VeryActive,
        ActivityLevel::ExtremelyActive,
    ];
    let activity = Select::new()
        .with_prompt("Activity level")
        .items(&[
            "sedentary",
            "lightly active",
            "moderately active",
            "very active",
            "extremely active",
        ])
        .default(2)
        .interact()?;

    Ok(Profile {
        age,
        weight_kg,
        height_cm,
        sex: sexes[sex],
        activity: levels[activity],
    })
}

/// Prompt for meal goals, either directly or from a body profile.
pub fn prompt_goal() -> Result<Goal> {
    let from_profile = prompt_yes_no("Compute goals from your age, weight and height?", false)?;

    if from_profile {
        let profile = prompt_profile()?;
        let needs = calculate_nutrition_needs(&profile)?;
        let meals = prompt_number("Meals per day", 3.0)?.round().max(1.0) as u32;
        let goal = needs.meal_goal(meals);
        println!(
            "Per-meal target: {:.0} kcal, {:.1} g protein",
            goal.calories, goal.protein_g
        );
        return Ok(goal);
    }

    let calories = prompt_number("Enter calorie goal (kcal)", 600.0)?;
    let protein_g = prompt_number("Enter protein goal (g)", 40.0)?;
    Ok(Goal::new(calories, protein_g))
}

/// Distinct lowercase allergen words present in the catalog.
pub fn known_allergens(catalog: &Catalog) -> Vec<String> {
    let mut known: Vec<String> = Vec::new();
    for food in catalog.iter() {
        for word in food
            .allergens
            .to_lowercase()
            .split(|c: char| c == ',' || c == ';' || c == '/')
            .map(str::trim)
            .filter(|w| !w.is_empty())
        {
            if !known.iter().any(|k| k == word) {
                known.push(word.to_string());
            }
        }
    }
    known
}

/// Closest known token for a misspelled input, if it is close enough.
pub fn suggest_correction<'a>(input: &str, known: &'a [String]) -> Option<&'a str> {
    let input = input.trim().to_lowercase();
    if input.is_empty() || known.iter().any(|k| *k == input) {
        return None;
    }

    known
        .iter()
        .map(|k| (k.as_str(), jaro_winkler(k, &input)))
        .filter(|(_, score)| *score >= CORRECTION_THRESHOLD)
        .max_by(|a, b| a.1.total_cmp(&b.1))
        .map(|(k, _)| k)
}

/// Prompt for one allergen to avoid, offering a correction for typos.
pub fn prompt_allergen(known: &[String]) -> Result<Option<String>> {
    let input: String = Input::new()
        .with_prompt("Allergen to avoid (leave blank if none)")
        .allow_empty(true)
        .interact_text()?;

    let input = input.trim().to_lowercase();
    if input.is_empty() {
        return Ok(None);
    }

    if let Some(candidate) = suggest_correction(&input, known) {
        let confirm = Confirm::new()
            .with_prompt(format!("Did you mean '{}'?", candidate))
            .default(true)
            .interact()?;
        if confirm {
            return Ok(Some(candidate.to_string()));
        }
    }

    Ok(Some(input))
}

/// Prompt for food categories to exclude.
pub fn prompt_exclusions() -> Result<Vec<String>> {
    let categories: Vec<&str> = CATEGORY_TOKENS.iter().map(|(name, _)| *name).collect();
    let picked = MultiSelect::new()
        .with_prompt("Exclude food categories (space to toggle, enter to confirm)")
        .items(&categories)
        .interact()?;

    Ok(picked.into_iter().map(|i| categories[i].to_string()).collect())
}

/// Optionally pick a shortlist of eligible items to search within.
pub fn prompt_shortlist(catalog: &Catalog, filters: &Filters) -> Result<Option<Vec<String>>> {
    let use_shortlist = prompt_yes_no(
        "Would you like to shortlist items to choose from first?",
        false,
    )?;
    if !use_shortlist {
        return Ok(None);
    }

    let names = eligible_names(catalog, filters);
    if names.is_empty() {
        println!("No items match your filters.");
        return Ok(None);
    }

    let picked = MultiSelect::new()
        .with_prompt("Items to consider (none selected = use all)")
        .items(&names)
        .interact()?;

    if picked.is_empty() {
        return Ok(None);
    }
    Ok(Some(picked.into_iter().map(|i| names[i].clone()).collect()))
}

/// Let the user keep the best meal or choose an alternative.
pub fn prompt_pick_alternative(meal: &Solution) -> Result<Option<usize>> {
    if meal.alternatives.is_empty() {
        return Ok(None);
    }

    let mut options = vec!["Keep best match".to_string()];
    options.extend((1..=meal.alternatives.len()).map(|i| format!("Option {}", i)));

    let selection = Select::new()
        .with_prompt("Accept a different option?")
        .items(&options)
        .default(0)
        .interact()?;

    Ok(selection.checked_sub(1))
}

/// Prompt for yes/no confirmation.
pub fn prompt_yes_no(prompt: &str, default: bool) -> Result<bool> {
    Ok(Confirm::new()
        .with_prompt(prompt)
        .default(default)
        .interact()?)
}

/// Collect goals, filters and an optional shortlist.
pub fn collect_meal_request(catalog: &Catalog) -> Result<MealRequest> {
    let goal = prompt_goal()?;
    let vegan_only = prompt_yes_no("Are you vegan?", false)?;
    let allergen = prompt_allergen(&known_allergens(catalog))?;
    let excluded_categories = prompt_exclusions()?;

    let filters = Filters {
        vegan_only,
        allergen,
        excluded_categories,
    };
    let shortlist = prompt_shortlist(catalog, &filters)?;

    Ok(MealRequest {
        goal,
        filters,
        shortlist,
    })
}
