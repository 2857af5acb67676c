use std::collections::HashMap;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::models::FoodItem;

/// Macro used to order catalog listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Macro {
    Calories,
    Protein,
    Carbs,
    Fat,
    Fiber,
}

impl Macro {
    pub fn of(self, item: &FoodItem) -> f64 {
        match self {
            Macro::Calories => item.calories,
            Macro::Protein => item.protein_g,
            Macro::Carbs => item.carbs_g,
            Macro::Fat => item.fat_g,
            Macro::Fiber => item.fiber_g,
        }
    }
}

/// An ordered food catalog with unique item names.
///
/// Catalog order is significant: it breaks ranking ties.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    items: Vec<FoodItem>,
    index: HashMap<String, usize>,
}

impl Catalog {
    /// Build a catalog, deduplicating by exact name.
    ///
    /// The last occurrence's values win; the first occurrence's position is kept.
    pub fn new(foods: Vec<FoodItem>) -> Self {
        let mut catalog = Self::default();
        for food in foods {
            catalog.insert(food);
        }
        catalog
    }

    fn insert(&mut self, food: FoodItem) {
        match self.index.get(&food.name) {
            Some(&pos) => self.items[pos] = food,
            None => {
                self.index.insert(food.name.clone(), self.items.len());
                self.items.push(food);
            }
        }
    }

    pub fn get(&self, name: &str) -> Option<&FoodItem> {
        self.index.get(name).map(|&pos| &self.items[pos])
    }

    pub fn items(&self) -> &[FoodItem] {
        &self.items
    }

    pub fn iter(&self) -> impl Iterator<Item = &FoodItem> {
        self.items.iter()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Sub-catalog holding only the named items, in shortlist order.
    ///
    /// Unknown names are ignored.
    pub fn restrict_to<S: AsRef<str>>(&self, names: &[S]) -> Catalog {
        Catalog::new(
            names
                .iter()
                .filter_map(|n| self.get(n.as_ref()))
                .cloned()
                .collect(),
        )
    }

    /// Items ordered by a macro, highest first. Ties keep catalog order.
    pub fn sorted_by(&self, key: Macro) -> Vec<&FoodItem> {
        let mut sorted: Vec<&FoodItem> = self.items.iter().collect();
        sorted.sort_by(|a, b| key.of(b).total_cmp(&key.of(a)));
        sorted
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_catalog() -> Catalog {
        Catalog::new(vec![
            FoodItem::new("Apple", 95.0, 0.5),
            FoodItem::new("Chicken Breast", 165.0, 31.0),
            FoodItem::new("Rice", 200.0, 4.0),
        ])
    }

    #[test]
    fn test_duplicate_names_last_values_first_position() {
        let catalog = Catalog::new(vec![
            FoodItem::new("Apple", 95.0, 0.5),
            FoodItem::new("Rice", 200.0, 4.0),
            FoodItem::new("Apple", 100.0, 1.0),
        ]);

        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog.items()[0].name, "Apple");
        assert_eq!(catalog.get("Apple").unwrap().calories, 100.0);
    }

    #[test]
    fn test_restrict_to_ignores_unknown() {
        let catalog = sample_catalog();
        let shortlist = catalog.restrict_to(&["Rice", "Pizza", "Apple"]);

        let names: Vec<&str> = shortlist.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, vec!["Rice", "Apple"]);
    }

    #[test]
    fn test_sorted_by_protein() {
        let catalog = sample_catalog();
        let sorted = catalog.sorted_by(Macro::Protein);
        assert_eq!(sorted[0].name, "Chicken Breast");
        assert_eq!(sorted[2].name, "Apple");
    }
}
