pub mod prompts;
pub mod render;

pub use prompts::{
    MealRequest, collect_meal_request, known_allergens, prompt_allergen, prompt_exclusions,
    prompt_goal, prompt_number, prompt_pick_alternative, prompt_profile, prompt_shortlist,
    prompt_yes_no, suggest_correction,
};
pub use render::{
    display_food_list, display_needs, display_suggestion, format_meal, format_secondary_goals,
    format_suggestion,
};
