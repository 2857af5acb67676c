use crate::models::{Catalog, FoodItem, Goal, Solution};
use crate::needs::NutritionNeeds;

/// Render one meal: a line per item, then totals.
pub fn format_meal(meal: &Solution, catalog: &Catalog) -> String {
    let mut lines = Vec::with_capacity(meal.items.len() + 1);

    for item in &meal.items {
        let q = item.quantity as f64;
        let line = match catalog.get(&item.name) {
            Some(food) => format!(
                "{} x {} ({}) - {:.0} kcal, {:.1} g protein, {:.1} g carbs, {:.1} g fiber",
                item.quantity,
                item.name,
                food.serving_label(),
                food.calories * q,
                food.protein_g * q,
                food.carbs_g * q,
                food.fiber_g * q
            ),
            None => format!("{} x {}", item.quantity, item.name),
        };
        lines.push(line);
    }

    let t = &meal.totals;
    lines.push(format!(
        "Total: {:.0} kcal, {:.1} g protein, {:.1} g carbs, {:.1} g fat, {:.1} g fiber (tol {:.0}%{})",
        t.calories,
        t.protein_g,
        t.carbs_g,
        t.fat_g,
        t.fiber_g,
        meal.tolerance_tier * 100.0,
        if meal.within_tolerance {
            ""
        } else {
            ", outside tolerance"
        }
    ));

    lines.join("\n")
}

/// Compare secondary macros with their targets, when any are set.
pub fn format_secondary_goals(meal: &Solution, goal: &Goal) -> Option<String> {
    let parts: Vec<String> = [
        ("carbs", meal.totals.carbs_g, goal.carbs_g),
        ("fat", meal.totals.fat_g, goal.fat_g),
        ("fiber", meal.totals.fiber_g, goal.fiber_g),
    ]
    .into_iter()
    .filter_map(|(label, actual, target)| {
        target.map(|t| format!("{} {:.1}/{:.1} g", label, actual, t))
    })
    .collect();

    (!parts.is_empty()).then(|| format!("Secondary goals: {}", parts.join(", ")))
}

/// Full text for a suggestion: best meal then numbered alternatives.
pub fn format_suggestion(meal: &Solution, catalog: &Catalog, goal: &Goal) -> String {
    let mut out = format_meal(meal, catalog);
    if let Some(secondary) = format_secondary_goals(meal, goal) {
        out.push('\n');
        out.push_str(&secondary);
    }

    if !meal.alternatives.is_empty() {
        out.push_str("\n\nOther close options:");
        for (i, alt) in meal.alternatives.iter().enumerate() {
            out.push_str(&format!("\n\nOption {}:\n{}", i + 1, format_meal(alt, catalog)));
        }
    }
    out
}

/// Print a suggestion, or the no-result message.
pub fn display_suggestion(meal: Option<&Solution>, catalog: &Catalog, goal: &Goal) {
    match meal {
        Some(meal) => {
            println!();
            println!("=== Suggested meal (best match) ===");
            println!("{}", format_suggestion(meal, catalog, goal));
            println!();
        }
        None => println!("No matching meal found."),
    }
}

/// Print a numbered list of foods with their details.
pub fn display_food_list(foods: &[&FoodItem], title: &str) {
    if foods.is_empty() {
        println!("{}: (none)", title);
        return;
    }

    println!();
    println!("=== {} ({} items) ===", title, foods.len());
    println!();

    for (i, food) in foods.iter().enumerate() {
        println!(
            "{:>3}. {} - {:.0} kcal, {:.1} g protein, serving: {}",
            i + 1,
            food.name,
            food.calories,
            food.protein_g,
            food.serving_label()
        );
    }

    println!();
}

/// Print daily targets.
pub fn display_needs(needs: &NutritionNeeds) {
    println!();
    println!("--- Daily Nutrition Plan ---");
    println!("BMR: {:.0} calories", needs.bmr);
    println!("Activity Multiplier: {}", needs.activity_multiplier);
    println!();
    println!("Daily Targets:");
    println!("  Calories: {:.0}", needs.calories);
    println!("  Protein: {:.1}g", needs.protein_g);
    println!("  Carbohydrates: {:.1}g", needs.carbs_g);
    println!("  Fat: {:.1}g", needs.fat_g);
    println!("  Fiber: {:.1}g", needs.fiber_g);
    println!();
}
