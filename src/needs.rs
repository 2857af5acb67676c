//! Daily calorie and macro targets from body measurements.

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::error::{MealError, Result};
use crate::models::Goal;

/// Protein grams per kg of body weight.
pub const PROTEIN_G_PER_KG: f64 = 1.0;
/// Share of calories from carbohydrates.
pub const CARB_CALORIE_SHARE: f64 = 0.50;
/// Share of calories from fat.
pub const FAT_CALORIE_SHARE: f64 = 0.25;
/// Fiber grams per 1000 kcal.
pub const FIBER_G_PER_1000_KCAL: f64 = 14.0;

const KCAL_PER_G_CARB: f64 = 4.0;
const KCAL_PER_G_FAT: f64 = 9.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Sex {
    Male,
    Female,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[value(rename_all = "snake_case")]
pub enum ActivityLevel {
    /// Little to no exercise.
    Sedentary,
    /// Light exercise 1-3 days/week.
    LightlyActive,
    /// Moderate exercise 3-5 days/week.
    ModeratelyActive,
    /// Hard exercise 6-7 days/week.
    VeryActive,
    /// Very hard exercise or a physical job.
    ExtremelyActive,
}

impl ActivityLevel {
    pub fn multiplier(self) -> f64 {
        match self {
            ActivityLevel::Sedentary => 1.2,
            ActivityLevel::LightlyActive => 1.375,
            ActivityLevel::ModeratelyActive => 1.55,
            ActivityLevel::VeryActive => 1.725,
            ActivityLevel::ExtremelyActive => 1.9,
        }
    }
}

/// Body measurements used for the BMR formula.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Profile {
    pub age: f64,
    pub weight_kg: f64,
    pub height_cm: f64,
    pub sex: Sex,
    pub activity: ActivityLevel,
}

impl Profile {
    pub fn validate(&self) -> Result<()> {
        bounded("age", self.age, 1.0, 120.0)?;
        bounded("weight_kg", self.weight_kg, 1.0, 500.0)?;
        bounded("height_cm", self.height_cm, 30.0, 272.0)
    }
}

fn bounded(label: &str, value: f64, min: f64, max: f64) -> Result<()> {
    if !value.is_finite() || value < min || value > max {
        return Err(MealError::InvalidInput(format!(
            "{} must be between {} and {}, got {}",
            label, min, max, value
        )));
    }
    Ok(())
}

/// Daily targets derived from a profile.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NutritionNeeds {
    pub calories: f64,
    pub protein_g: f64,
    pub carbs_g: f64,
    pub fat_g: f64,
    pub fiber_g: f64,
    pub bmr: f64,
    pub activity_multiplier: f64,
}

impl NutritionNeeds {
    /// Per-meal goal when the day is split into `meals` equal parts.
    pub fn meal_goal(&self, meals: u32) -> Goal {
        let meals = meals.max(1) as f64;
        Goal {
            calories: (self.calories / meals).round(),
            protein_g: round1(self.protein_g / meals),
            carbs_g: Some(round1(self.carbs_g / meals)),
            fat_g: Some(round1(self.fat_g / meals)),
            fiber_g: Some(round1(self.fiber_g / meals)),
        }
    }
}

fn round1(v: f64) -> f64 {
    (v * 10.0).round() / 10.0
}

/// Mifflin-St Jeor basal metabolic rate (kcal/day).
pub fn basal_metabolic_rate(profile: &Profile) -> f64 {
    let base = 10.0 * profile.weight_kg + 6.25 * profile.height_cm - 5.0 * profile.age;
    match profile.sex {
        Sex::Male => base + 5.0,
        Sex::Female => base - 161.0,
    }
}

/// Daily calorie and macro targets for a validated profile.
pub fn calculate_nutrition_needs(profile: &Profile) -> Result<NutritionNeeds> {
    profile.validate()?;

    let bmr = basal_metabolic_rate(profile);
    let multiplier = profile.activity.multiplier();
    let calories = bmr * multiplier;

    Ok(NutritionNeeds {
        calories: calories.round(),
        protein_g: round1(profile.weight_kg * PROTEIN_G_PER_KG),
        carbs_g: round1(calories * CARB_CALORIE_SHARE / KCAL_PER_G_CARB),
        fat_g: round1(calories * FAT_CALORIE_SHARE / KCAL_PER_G_FAT),
        fiber_g: round1(calories / 1000.0 * FIBER_G_PER_1000_KCAL),
        bmr: bmr.round(),
        activity_multiplier: multiplier,
    })
}
