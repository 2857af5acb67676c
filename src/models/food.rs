use serde::{Deserialize, Serialize};

/// A catalog food item with per-serving nutrition.
///
/// Macro values are per single serving and never negative.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FoodItem {
    pub name: String,

    #[serde(default)]
    pub calories: f64,

    #[serde(default, alias = "protein")]
    pub protein_g: f64,

    #[serde(default, alias = "carbs")]
    pub carbs_g: f64,

    #[serde(default, alias = "fat")]
    pub fat_g: f64,

    #[serde(default, alias = "fiber")]
    pub fiber_g: f64,

    /// Free-text serving label such as "1 cup".
    #[serde(default, alias = "serving", skip_serializing_if = "Option::is_none")]
    pub serving_description: Option<String>,

    #[serde(default, alias = "vegan")]
    pub is_vegan: bool,

    #[serde(default)]
    pub allergens: String,
}

impl FoodItem {
    /// Create an item with calories and protein only; other macros are zero.
    pub fn new(name: impl Into<String>, calories: f64, protein_g: f64) -> Self {
        Self {
            name: name.into(),
            calories,
            protein_g,
            carbs_g: 0.0,
            fat_g: 0.0,
            fiber_g: 0.0,
            serving_description: None,
            is_vegan: false,
            allergens: String::new(),
        }
    }

    pub fn with_macros(mut self, carbs_g: f64, fat_g: f64, fiber_g: f64) -> Self {
        self.carbs_g = carbs_g;
        self.fat_g = fat_g;
        self.fiber_g = fiber_g;
        self
    }

    pub fn vegan(mut self, is_vegan: bool) -> Self {
        self.is_vegan = is_vegan;
        self
    }

    pub fn with_allergens(mut self, allergens: impl Into<String>) -> Self {
        self.allergens = allergens.into();
        self
    }

    pub fn with_serving(mut self, serving: impl Into<String>) -> Self {
        self.serving_description = Some(serving.into());
        self
    }

    /// Serving label for display, defaulting to "1 serving".
    pub fn serving_label(&self) -> &str {
        self.serving_description.as_deref().unwrap_or("1 serving")
    }

    /// Non-negative, finite macro values.
    pub fn is_valid(&self) -> bool {
        [
            self.calories,
            self.protein_g,
            self.carbs_g,
            self.fat_g,
            self.fiber_g,
        ]
        .iter()
        .all(|v| v.is_finite() && *v >= 0.0)
    }

    /// Lowercased name, used by every substring rule.
    pub fn key(&self) -> String {
        self.name.to_lowercase()
    }
}
