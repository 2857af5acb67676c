use crate::models::{Catalog, Filters, FoodItem};
use crate::planner::constants::category_tokens;

/// Expand excluded categories into the tokens they exclude.
///
/// Known categories expand through the category table; anything else is
/// used as a literal token. Lowercased, duplicates removed, order kept.
pub fn expand_exclusions<S: AsRef<str>>(categories: &[S]) -> Vec<String> {
    let mut tokens: Vec<String> = Vec::new();
    let mut push = |token: &str| {
        if !tokens.iter().any(|t| t == token) {
            tokens.push(token.to_string());
        }
    };

    for category in categories {
        let category = category.as_ref().trim().to_lowercase();
        if category.is_empty() {
            continue;
        }
        match category_tokens(&category) {
            Some(expanded) => expanded.iter().for_each(|t| push(t)),
            None => push(&category),
        }
    }

    tokens
}

/// Whether a single item passes the dietary filters.
///
/// `excluded` must already be expanded and lowercased.
pub fn is_eligible(food: &FoodItem, vegan_only: bool, allergen: Option<&str>, excluded: &[String]) -> bool {
    if vegan_only && !food.is_vegan {
        return false;
    }

    let allergens = food.allergens.to_lowercase();
    if let Some(allergen) = allergen {
        if allergens.contains(allergen) {
            return false;
        }
    }

    let name = food.key();
    !excluded
        .iter()
        .any(|token| name.contains(token.as_str()) || allergens.contains(token.as_str()))
}

/// Items that satisfy every dietary filter, in catalog order.
pub fn filter_eligible<'a>(catalog: &'a Catalog, filters: &Filters) -> Vec<&'a FoodItem> {
    let allergen = filters
        .allergen
        .as_deref()
        .map(|a| a.trim().to_lowercase())
        .filter(|a| !a.is_empty());
    let excluded = expand_exclusions(&filters.excluded_categories);

    catalog
        .iter()
        .filter(|food| is_eligible(food, filters.vegan_only, allergen.as_deref(), &excluded))
        .collect()
}

/// Alphabetical names of eligible items, for listing and shortlisting.
pub fn eligible_names(catalog: &Catalog, filters: &Filters) -> Vec<String> {
    let mut names: Vec<String> = filter_eligible(catalog, filters)
        .into_iter()
        .map(|f| f.name.clone())
        .collect();
    names.sort();
    names
}
