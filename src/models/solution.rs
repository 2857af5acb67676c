use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::models::FoodItem;

/// One item of a meal with its serving count.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectedItem {
    pub name: String,
    pub quantity: u32,
}

impl SelectedItem {
    pub fn new(name: impl Into<String>, quantity: u32) -> Self {
        Self {
            name: name.into(),
            quantity,
        }
    }
}

/// Aggregated macros of a meal.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Totals {
    pub calories: f64,
    pub protein_g: f64,
    pub carbs_g: f64,
    pub fat_g: f64,
    pub fiber_g: f64,
}

impl Totals {
    /// Add `quantity` servings of a food.
    pub fn add(&mut self, food: &FoodItem, quantity: u32) {
        let q = quantity as f64;
        self.calories += food.calories * q;
        self.protein_g += food.protein_g * q;
        self.carbs_g += food.carbs_g * q;
        self.fat_g += food.fat_g * q;
        self.fiber_g += food.fiber_g * q;
    }

    /// Sum of per-serving values times quantity, in item order.
    pub fn of<'a>(parts: impl IntoIterator<Item = (&'a FoodItem, u32)>) -> Self {
        let mut totals = Totals::default();
        for (food, quantity) in parts {
            totals.add(food, quantity);
        }
        totals
    }
}

/// A scored meal produced by the combination search.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Solution {
    pub items: Vec<SelectedItem>,
    pub totals: Totals,
    pub tolerance_tier: f64,
    pub score: f64,
    pub within_tolerance: bool,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub alternatives: Vec<Solution>,
}

impl Solution {
    /// Sorted distinct item names. Serving counts are not part of it.
    pub fn signature(&self) -> BTreeSet<&str> {
        self.items.iter().map(|i| i.name.as_str()).collect()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.items.iter().any(|i| i.name == name)
    }

    pub fn quantity_of(&self, name: &str) -> Option<u32> {
        self.items.iter().find(|i| i.name == name).map(|i| i.quantity)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_totals_of() {
        let chicken = FoodItem::new("Chicken", 200.0, 30.0).with_macros(0.0, 5.0, 0.0);
        let rice = FoodItem::new("Rice", 200.0, 4.0).with_macros(45.0, 0.5, 1.0);

        let totals = Totals::of([(&chicken, 1), (&rice, 2)]);
        assert_eq!(totals.calories, 600.0);
        assert_eq!(totals.protein_g, 38.0);
        assert_eq!(totals.carbs_g, 90.0);
        assert_eq!(totals.fat_g, 6.0);
        assert_eq!(totals.fiber_g, 2.0);
    }

    #[test]
    fn test_signature_ignores_order_and_quantity() {
        let a = Solution {
            items: vec![SelectedItem::new("Rice", 1), SelectedItem::new("Chicken", 2)],
            totals: Totals::default(),
            tolerance_tier: 0.1,
            score: 0.0,
            within_tolerance: true,
            alternatives: Vec::new(),
        };
        let b = Solution {
            items: vec![SelectedItem::new("Chicken", 1), SelectedItem::new("Rice", 3)],
            ..a.clone()
        };
        assert_eq!(a.signature(), b.signature());
        assert_eq!(a.quantity_of("Chicken"), Some(2));
    }
}
