use std::sync::LazyLock;

// ─────────────────────────────────────────────────────────────────────────────
// Search defaults
// ─────────────────────────────────────────────────────────────────────────────

/// Base tolerance (fraction of the goal) for the first relaxation tier.
pub const DEFAULT_TOLERANCE: f64 = 0.1;

/// Maximum distinct items in one meal.
pub const DEFAULT_MAX_ITEMS: usize = 3;

/// Maximum servings of any one item.
pub const DEFAULT_MAX_SERVINGS: u32 = 3;

/// Ranked candidates kept for enumeration.
pub const DEFAULT_TOP_K: usize = 10;

/// Protein distance (g) an alternative may have from the best meal.
pub const DEFAULT_PROTEIN_WINDOW: f64 = 10.0;

/// Alternatives attached to the best meal.
pub const DEFAULT_MAX_ALTERNATIVES: usize = 5;

/// Multipliers applied to the base tolerance, tried in order.
pub const TOLERANCE_TIER_FACTORS: [f64; 3] = [1.0, 2.0, 3.0];

// ─────────────────────────────────────────────────────────────────────────────
// Heuristics
// ─────────────────────────────────────────────────────────────────────────────

/// Items above this protein per serving are capped at one serving.
pub const HIGH_PROTEIN_THRESHOLD_G: f64 = 20.0;

/// Lead items at or above this calorie count may stand alone without a companion.
pub const SUBSTANTIAL_CALORIES: f64 = 400.0;

/// Minimum similarity for a fuzzy companion match (0..1 scale).
pub const FUZZY_CUTOFF: f64 = 0.8;

// ─────────────────────────────────────────────────────────────────────────────
// Input bounds
// ─────────────────────────────────────────────────────────────────────────────

pub const MAX_CALORIE_GOAL: f64 = 20_000.0;
pub const MAX_GRAM_GOAL: f64 = 2_000.0;
pub const LIMIT_MAX_ITEMS: usize = 5;
pub const LIMIT_MAX_SERVINGS: u32 = 10;
pub const LIMIT_TOP_K: usize = 60;
pub const LIMIT_MAX_ALTERNATIVES: usize = 20;

/// Upper bound on serving assignments one search may enumerate per tier:
/// `Σ C(top_k, r) · max_servings^r` for r in 1..=max_items.
pub const MAX_ENUMERATION: u128 = 250_000;

/// Food categories and the name/allergen tokens each one excludes.
pub static CATEGORY_TOKENS: LazyLock<Vec<(&'static str, Vec<&'static str>)>> =
    LazyLock::new(|| {
        vec![
            (
                "beef",
                vec!["beef", "hamburger", "burger", "steak", "sausage", "pepperoni", "meatball"],
            ),
            (
                "pork",
                vec!["pork", "bacon", "ham", "sausage", "pepperoni", "prosciutto"],
            ),
            ("poultry", vec!["chicken", "turkey", "duck"]),
            (
                "fish",
                vec!["fish", "salmon", "tuna", "cod", "tilapia", "sushi", "lox"],
            ),
            (
                "shellfish",
                vec!["shellfish", "shrimp", "crab", "lobster", "clam", "oyster"],
            ),
            (
                "dairy",
                vec!["dairy", "milk", "cheese", "yogurt", "butter", "cream"],
            ),
            ("egg", vec!["egg"]),
        ]
    });

/// Tokens a category exclusion expands to, or `None` for an unknown category.
pub fn category_tokens(category: &str) -> Option<&'static [&'static str]> {
    CATEGORY_TOKENS
        .iter()
        .find(|(name, _)| *name == category)
        .map(|(_, tokens)| tokens.as_slice())
}

/// Built-in lead → companion pairings.
pub static DEFAULT_PAIRINGS: LazyLock<Vec<(&'static str, Vec<&'static str>)>> =
    LazyLock::new(|| {
        vec![
            ("hamburger", vec!["bun", "bread", "roll", "fries"]),
            ("burger", vec!["bun", "bread", "roll", "fries"]),
            ("hot dog", vec!["bun", "ketchup", "mustard"]),
            ("taco", vec!["shell", "tortilla", "salsa"]),
            ("chicken", vec!["rice", "salad", "wrap", "bread"]),
            ("steak", vec!["potato", "rice", "salad"]),
            ("yogurt", vec!["granola", "berries", "fruit"]),
            ("granola", vec!["yogurt", "milk", "berries"]),
            ("oatmeal", vec!["milk", "berries", "banana"]),
            ("pancake", vec!["syrup", "butter"]),
            ("eggs", vec!["toast", "bacon", "sausage"]),
            ("bacon", vec!["eggs", "toast"]),
            ("salad", vec!["dressing", "bread", "chicken", "tofu"]),
            ("rice", vec!["chicken", "beans", "tofu"]),
            ("beans", vec!["rice", "tortilla"]),
            ("pizza", vec!["bread", "cheese"]),
            ("sushi", vec!["soy", "wasabi", "ginger"]),
            ("bagel", vec!["cream cheese", "lox", "butter"]),
        ]
    });
