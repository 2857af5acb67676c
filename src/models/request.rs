use serde::{Deserialize, Serialize};

use crate::error::{MealError, Result};
use crate::planner::constants::*;

/// Nutritional targets for one meal.
///
/// Only calories and protein are scored; the secondary macros are reported.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Goal {
    pub calories: f64,
    pub protein_g: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub carbs_g: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fat_g: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fiber_g: Option<f64>,
}

impl Goal {
    pub fn new(calories: f64, protein_g: f64) -> Self {
        Self {
            calories,
            protein_g,
            ..Default::default()
        }
    }

    /// Reject negative, non-finite, or absurd targets.
    ///
    /// Zero is allowed; scoring treats it as a divisor of 1.
    pub fn validate(&self) -> Result<()> {
        check_range("calorie goal", self.calories, 0.0, MAX_CALORIE_GOAL)?;
        check_range("protein goal", self.protein_g, 0.0, MAX_GRAM_GOAL)?;
        for (label, value) in [
            ("carbs goal", self.carbs_g),
            ("fat goal", self.fat_g),
            ("fiber goal", self.fiber_g),
        ] {
            if let Some(v) = value {
                check_range(label, v, 0.0, MAX_GRAM_GOAL)?;
            }
        }
        Ok(())
    }
}

/// Dietary constraints applied before ranking.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Filters {
    #[serde(default)]
    pub vegan_only: bool,
    #[serde(default)]
    pub allergen: Option<String>,
    #[serde(default)]
    pub excluded_categories: Vec<String>,
}

impl Filters {
    pub fn vegan() -> Self {
        Self {
            vegan_only: true,
            ..Default::default()
        }
    }

    pub fn with_allergen(mut self, allergen: impl Into<String>) -> Self {
        self.allergen = Some(allergen.into());
        self
    }

    pub fn excluding(mut self, category: impl Into<String>) -> Self {
        self.excluded_categories.push(category.into());
        self
    }
}

/// Bounds and knobs for one search.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchParams {
    /// Base tolerance; relaxation tries 1x, 2x and 3x of it.
    pub tolerance: f64,
    pub max_items: usize,
    pub max_servings: u32,
    pub top_k: usize,
    /// Grams of protein an alternative may differ from the best.
    pub protein_window: f64,
    pub max_alternatives: usize,
}

impl Default for SearchParams {
    fn default() -> Self {
        Self {
            tolerance: DEFAULT_TOLERANCE,
            max_items: DEFAULT_MAX_ITEMS,
            max_servings: DEFAULT_MAX_SERVINGS,
            top_k: DEFAULT_TOP_K,
            protein_window: DEFAULT_PROTEIN_WINDOW,
            max_alternatives: DEFAULT_MAX_ALTERNATIVES,
        }
    }
}

impl SearchParams {
    /// Enforce the enumeration bounds that keep the search predictable.
    pub fn validate(&self) -> Result<()> {
        if !(self.tolerance.is_finite() && self.tolerance > 0.0 && self.tolerance <= 1.0) {
            return Err(MealError::InvalidInput(format!(
                "tolerance must be in (0, 1], got {}",
                self.tolerance
            )));
        }
        check_count("max_items", self.max_items, 1, LIMIT_MAX_ITEMS)?;
        check_count(
            "max_servings",
            self.max_servings as usize,
            1,
            LIMIT_MAX_SERVINGS as usize,
        )?;
        check_count("top_k", self.top_k, 1, LIMIT_TOP_K)?;
        check_count("max_alternatives", self.max_alternatives, 0, LIMIT_MAX_ALTERNATIVES)?;
        check_range("protein_window", self.protein_window, 0.0, MAX_GRAM_GOAL)?;

        let size = self.enumeration_size();
        if size > MAX_ENUMERATION {
            return Err(MealError::InvalidInput(format!(
                "search too large: {} serving assignments per tier (limit {}); lower top_k, max_items or max_servings",
                size, MAX_ENUMERATION
            )));
        }
        Ok(())
    }

    /// Worst-case serving assignments per tier: `Σ C(top_k, r) · max_servings^r`.
    pub fn enumeration_size(&self) -> u128 {
        let n = self.top_k as u128;
        let servings = self.max_servings as u128;
        let mut total: u128 = 0;
        let mut choose: u128 = 1;
        let mut per_subset: u128 = 1;

        for r in 1..=self.max_items.min(self.top_k) as u128 {
            choose = choose.saturating_mul(n - r + 1) / r;
            per_subset = per_subset.saturating_mul(servings);
            total = total.saturating_add(choose.saturating_mul(per_subset));
        }
        total
    }

    /// Parameters for searching a shortlist: every listed item is a candidate.
    pub fn for_shortlist(&self, len: usize) -> SearchParams {
        SearchParams {
            top_k: len.max(1),
            ..self.clone()
        }
    }

    /// Relaxation tiers, in the order they are tried.
    pub fn tiers(&self) -> Vec<f64> {
        TOLERANCE_TIER_FACTORS
            .iter()
            .map(|factor| self.tolerance * factor)
            .collect()
    }
}

fn check_range(label: &str, value: f64, min: f64, max: f64) -> Result<()> {
    if !value.is_finite() || value < min || value > max {
        return Err(MealError::InvalidInput(format!(
            "{} must be between {} and {}, got {}",
            label, min, max, value
        )));
    }
    Ok(())
}

fn check_count(label: &str, value: usize, min: usize, max: usize) -> Result<()> {
    if value < min || value > max {
        return Err(MealError::InvalidInput(format!(
            "{} must be between {} and {}, got {}",
            label, min, max, value
        )));
    }
    Ok(())
}
