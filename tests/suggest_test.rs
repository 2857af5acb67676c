use std::collections::HashSet;

use assert_float_eq::*;

use meal_suggest_rs::models::{Catalog, Filters, FoodItem, Goal, SearchParams, Solution};
use meal_suggest_rs::planner::{
    CompatibilityChecker, PairingTable, rank_candidates, relax, suggest, suggest_report,
};

fn menu() -> Catalog {
    Catalog::new(vec![
        FoodItem::new("Grilled Chicken", 250.0, 35.0).with_macros(0.0, 6.0, 0.0),
        FoodItem::new("Tofu Stir Fry", 300.0, 20.0)
            .with_macros(18.0, 14.0, 4.0)
            .vegan(true)
            .with_allergens("Soy"),
        FoodItem::new("Peanut Noodles", 450.0, 15.0)
            .with_macros(60.0, 16.0, 5.0)
            .vegan(true)
            .with_allergens("peanuts, wheat"),
        FoodItem::new("Lentil Soup", 230.0, 18.0)
            .with_macros(40.0, 1.0, 15.0)
            .vegan(true),
        FoodItem::new("Greek Yogurt", 150.0, 15.0)
            .with_macros(8.0, 4.0, 0.0)
            .with_allergens("milk"),
        FoodItem::new("Brown Rice", 220.0, 5.0)
            .with_macros(45.0, 2.0, 3.0)
            .vegan(true),
        FoodItem::new("Apple", 95.0, 0.5).with_macros(25.0, 0.3, 4.4).vegan(true),
    ])
}

fn every_solution(best: &Solution) -> Vec<&Solution> {
    std::iter::once(best).chain(best.alternatives.iter()).collect()
}

#[test]
fn test_filters_hold_for_every_returned_item() {
    let catalog = menu();
    let filters = Filters::vegan().with_allergen("SOY");
    let goal = Goal::new(500.0, 25.0);

    let best = suggest(
        &catalog,
        &goal,
        &filters,
        &SearchParams::default(),
        &PairingTable::empty(),
    )
    .expect("a vegan meal exists");

    for solution in every_solution(&best) {
        for item in &solution.items {
            let food = catalog.get(&item.name).unwrap();
            assert!(food.is_vegan, "{} is not vegan", food.name);
            assert!(!food.allergens.to_lowercase().contains("soy"));
        }
    }
}

#[test]
fn test_totals_are_exact_sums() {
    let catalog = menu();
    let goal = Goal::new(650.0, 45.0);

    let best = suggest(
        &catalog,
        &goal,
        &Filters::default(),
        &SearchParams::default(),
        &PairingTable::default(),
    )
    .unwrap();

    for solution in every_solution(&best) {
        let (mut cal, mut protein, mut carbs, mut fat, mut fiber) = (0.0, 0.0, 0.0, 0.0, 0.0);
        for item in &solution.items {
            let food = catalog.get(&item.name).unwrap();
            let q = item.quantity as f64;
            cal += food.calories * q;
            protein += food.protein_g * q;
            carbs += food.carbs_g * q;
            fat += food.fat_g * q;
            fiber += food.fiber_g * q;
        }
        assert_float_absolute_eq!(solution.totals.calories, cal, 1e-9);
        assert_float_absolute_eq!(solution.totals.protein_g, protein, 1e-9);
        assert_float_absolute_eq!(solution.totals.carbs_g, carbs, 1e-9);
        assert_float_absolute_eq!(solution.totals.fat_g, fat, 1e-9);
        assert_float_absolute_eq!(solution.totals.fiber_g, fiber, 1e-9);
    }
}

#[test]
fn test_within_tolerance_means_inside_the_band() {
    let catalog = menu();

    for goal in [
        Goal::new(400.0, 30.0),
        Goal::new(700.0, 50.0),
        Goal::new(300.0, 10.0),
    ] {
        let Some(best) = suggest(
            &catalog,
            &goal,
            &Filters::default(),
            &SearchParams::default(),
            &PairingTable::empty(),
        ) else {
            continue;
        };

        for solution in every_solution(&best) {
            if !solution.within_tolerance {
                continue;
            }
            let t = solution.tolerance_tier;
            let totals = &solution.totals;
            assert!(goal.calories * (1.0 - t) <= totals.calories);
            assert!(totals.calories <= goal.calories * (1.0 + t));
            assert!(goal.protein_g * (1.0 - t) <= totals.protein_g);
            assert!(totals.protein_g <= goal.protein_g * (1.0 + t));
        }
    }
}

#[test]
fn test_relaxation_stops_at_first_accepting_tier() {
    let catalog = Catalog::new(vec![
        FoodItem::new("Chicken", 200.0, 30.0),
        FoodItem::new("Rice", 200.0, 4.0),
    ]);
    let table = PairingTable::empty();
    let checker = CompatibilityChecker::new(&table);

    let report = suggest_report(
        &catalog,
        &Goal::new(400.0, 34.0),
        &Filters::default(),
        &SearchParams::default(),
        &checker,
    );
    assert_eq!(report.tiers_attempted, vec![0.1]);
    assert!(report.solution.unwrap().within_tolerance);
}

#[test]
fn test_relaxation_widens_until_match() {
    // 300 kcal against 400 is 25% off: only the 30% tier accepts it
    let catalog = Catalog::new(vec![FoodItem::new("Oats", 300.0, 10.0)]);
    let params = SearchParams {
        max_items: 1,
        max_servings: 1,
        ..Default::default()
    };
    let table = PairingTable::empty();
    let checker = CompatibilityChecker::new(&table);

    let report = suggest_report(
        &catalog,
        &Goal::new(400.0, 12.0),
        &Filters::default(),
        &params,
        &checker,
    );

    assert_eq!(report.tiers_attempted.len(), 3);
    let best = report.solution.unwrap();
    assert!(best.within_tolerance);
    assert_float_absolute_eq!(best.tolerance_tier, 0.3, 1e-9);
}

#[test]
fn test_closest_meal_when_no_tier_matches() {
    let catalog = Catalog::new(vec![FoodItem::new("Oats", 300.0, 10.0)]);
    let params = SearchParams {
        max_items: 1,
        max_servings: 1,
        ..Default::default()
    };

    let best = suggest(
        &catalog,
        &Goal::new(1000.0, 12.0),
        &Filters::default(),
        &params,
        &PairingTable::empty(),
    )
    .expect("falls back to the closest candidate");

    assert!(!best.within_tolerance);
    assert_eq!(best.quantity_of("Oats"), Some(1));
}

#[test]
fn test_repeated_calls_are_identical() {
    let catalog = menu();
    let goal = Goal::new(600.0, 40.0);
    let params = SearchParams::default();
    let table = PairingTable::default();

    let first = suggest(&catalog, &goal, &Filters::default(), &params, &table);
    let second = suggest(&catalog, &goal, &Filters::default(), &params, &table);
    assert!(first.is_some());
    assert_eq!(first, second);
}

#[test]
fn test_no_eligible_items_is_none() {
    let catalog = Catalog::new(vec![FoodItem::new("ItemA", 300.0, 20.0).vegan(false)]);
    let table = PairingTable::default();
    let checker = CompatibilityChecker::new(&table);

    let report = suggest_report(
        &catalog,
        &Goal::new(300.0, 20.0),
        &Filters::vegan(),
        &SearchParams::default(),
        &checker,
    );
    assert!(report.solution.is_none());
    assert_eq!(report.eligible, 0);
    assert!(report.tiers_attempted.is_empty());
}

#[test]
fn test_chicken_needs_rice() {
    let catalog = Catalog::new(vec![
        FoodItem::new("Chicken", 200.0, 30.0),
        FoodItem::new("Rice", 200.0, 4.0),
    ]);
    let table = PairingTable::new(vec![("chicken", vec!["rice"])]);
    let params = SearchParams {
        tolerance: 0.1,
        max_items: 2,
        max_servings: 1,
        ..Default::default()
    };

    let best = suggest(
        &catalog,
        &Goal::new(400.0, 34.0),
        &Filters::default(),
        &params,
        &table,
    )
    .unwrap();

    assert_eq!(best.items.len(), 2);
    assert_eq!(best.quantity_of("Chicken"), Some(1));
    assert_eq!(best.quantity_of("Rice"), Some(1));
    assert_float_absolute_eq!(best.totals.calories, 400.0, 1e-9);
    assert_float_absolute_eq!(best.totals.protein_g, 34.0, 1e-9);
    assert_float_absolute_eq!(best.score, 0.0, 1e-9);
}

#[test]
fn test_high_protein_item_never_doubled() {
    let catalog = Catalog::new(vec![
        FoodItem::new("Whey Shake", 120.0, 25.0),
        FoodItem::new("Oats", 150.0, 5.0),
        FoodItem::new("Banana", 105.0, 1.3),
    ]);
    let params = SearchParams {
        max_servings: 5,
        ..Default::default()
    };
    let goal = Goal::new(800.0, 60.0);
    let table = PairingTable::empty();
    let checker = CompatibilityChecker::new(&table);

    let foods: Vec<&FoodItem> = catalog.iter().collect();
    let ranked = rank_candidates(&foods, params.top_k);
    let outcome = relax(&ranked, &goal, &params, &checker);

    assert!(!outcome.candidates.is_empty());
    for solution in outcome.candidates.iter().chain(outcome.accepted.iter()) {
        if let Some(q) = solution.quantity_of("Whey Shake") {
            assert_eq!(q, 1);
        }
    }
    // the cap only applies to the high-protein item
    assert!(
        outcome
            .candidates
            .iter()
            .any(|s| s.quantity_of("Oats") == Some(5))
    );
}

#[test]
fn test_alternatives_stay_in_window_and_unique() {
    let catalog = menu();
    let params = SearchParams {
        protein_window: 8.0,
        max_alternatives: 4,
        ..Default::default()
    };

    let best = suggest(
        &catalog,
        &Goal::new(600.0, 40.0),
        &Filters::default(),
        &params,
        &PairingTable::empty(),
    )
    .unwrap();

    assert!(best.alternatives.len() <= params.max_alternatives);

    let mut signatures = HashSet::new();
    signatures.insert(best.signature());
    for alt in &best.alternatives {
        assert!((alt.totals.protein_g - best.totals.protein_g).abs() <= params.protein_window);
        assert!(alt.score >= best.score);
        assert!(signatures.insert(alt.signature()), "duplicate signature");
    }
}

#[test]
fn test_zero_goal_does_not_divide_by_zero() {
    let catalog = Catalog::new(vec![FoodItem::new("Water", 0.0, 0.0)]);
    let best = suggest(
        &catalog,
        &Goal::new(0.0, 0.0),
        &Filters::default(),
        &SearchParams::default(),
        &PairingTable::empty(),
    )
    .unwrap();

    assert!(best.score.is_finite());
    assert_float_absolute_eq!(best.score, 0.0, 1e-9);
}
