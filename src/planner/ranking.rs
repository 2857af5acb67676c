use crate::models::FoodItem;

/// An eligible item with its ranking density.
#[derive(Debug, Clone, Copy)]
pub struct Candidate<'a> {
    pub food: &'a FoodItem,
    pub protein_density: f64,
}

impl<'a> Candidate<'a> {
    pub fn new(food: &'a FoodItem) -> Self {
        Self {
            food,
            protein_density: protein_density(food),
        }
    }

    pub fn name(&self) -> &'a str {
        &self.food.name
    }
}

/// Protein grams per calorie; calories below 1 count as 1.
#[inline]
pub fn protein_density(food: &FoodItem) -> f64 {
    food.protein_g / food.calories.max(1.0)
}

/// Order items by protein density (highest first) and keep the first `top_k`.
///
/// The sort is stable, so equal densities keep their incoming order.
pub fn rank_candidates<'a>(eligible: &[&'a FoodItem], top_k: usize) -> Vec<Candidate<'a>> {
    let mut ranked: Vec<Candidate<'a>> = eligible.iter().map(|f| Candidate::new(f)).collect();
    ranked.sort_by(|a, b| b.protein_density.total_cmp(&a.protein_density));
    ranked.truncate(top_k);
    ranked
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_protein_density_zero_calories() {
        let water = FoodItem::new("Water", 0.0, 0.0);
        assert_eq!(protein_density(&water), 0.0);

        let powder = FoodItem::new("Isolate", 0.0, 5.0);
        assert_eq!(protein_density(&powder), 5.0);
    }

    #[test]
    fn test_rank_orders_by_density() {
        let foods = vec![
            FoodItem::new("Rice", 200.0, 4.0),
            FoodItem::new("Chicken", 200.0, 30.0),
            FoodItem::new("Beans", 220.0, 14.0),
        ];
        let refs: Vec<&FoodItem> = foods.iter().collect();

        let ranked = rank_candidates(&refs, 10);
        let names: Vec<&str> = ranked.iter().map(|c| c.name()).collect();
        assert_eq!(names, vec!["Chicken", "Beans", "Rice"]);
    }

    #[test]
    fn test_rank_ties_keep_catalog_order() {
        let foods = vec![
            FoodItem::new("Tuna A", 100.0, 20.0),
            FoodItem::new("Tuna B", 200.0, 40.0),
            FoodItem::new("Tuna C", 50.0, 10.0),
        ];
        let refs: Vec<&FoodItem> = foods.iter().collect();

        let ranked = rank_candidates(&refs, 10);
        let names: Vec<&str> = ranked.iter().map(|c| c.name()).collect();
        assert_eq!(names, vec!["Tuna A", "Tuna B", "Tuna C"]);
    }

    #[test]
    fn test_rank_truncates() {
        let foods: Vec<FoodItem> = (0..20)
            .map(|i| FoodItem::new(format!("Food {}", i), 100.0, i as f64))
            .collect();
        let refs: Vec<&FoodItem> = foods.iter().collect();

        let ranked = rank_candidates(&refs, 5);
        assert_eq!(ranked.len(), 5);
        assert_eq!(ranked[0].name(), "Food 19");
    }
}
