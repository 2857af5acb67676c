use std::collections::BTreeMap;

use strsim::{jaro_winkler, normalized_levenshtein};

use crate::error::Result;
use crate::models::FoodItem;
use crate::planner::constants::{DEFAULT_PAIRINGS, FUZZY_CUTOFF, SUBSTANTIAL_CALORIES};

/// String similarity on a 0..1 scale (1 = identical).
pub trait Similarity: Send + Sync {
    fn similarity(&self, a: &str, b: &str) -> f64;
}

/// Edit-distance ratio: `1 - levenshtein / max_len`.
#[derive(Debug, Clone, Copy, Default)]
pub struct NormalizedLevenshtein;

impl Similarity for NormalizedLevenshtein {
    fn similarity(&self, a: &str, b: &str) -> f64 {
        normalized_levenshtein(a, b)
    }
}

/// Jaro-Winkler, which favours shared prefixes.
#[derive(Debug, Clone, Copy, Default)]
pub struct JaroWinkler;

impl Similarity for JaroWinkler {
    fn similarity(&self, a: &str, b: &str) -> f64 {
        jaro_winkler(a, b)
    }
}

static DEFAULT_SIMILARITY: NormalizedLevenshtein = NormalizedLevenshtein;

/// A lead token and the companion tokens that satisfy it.
#[derive(Debug, Clone, PartialEq)]
pub struct PairingRule {
    pub lead: String,
    pub companions: Vec<String>,
}

/// Lead → companion table. Tokens are lowercased and trimmed.
#[derive(Debug, Clone, PartialEq)]
pub struct PairingTable {
    rules: Vec<PairingRule>,
}

impl Default for PairingTable {
    fn default() -> Self {
        Self::new(
            DEFAULT_PAIRINGS
                .iter()
                .map(|(lead, companions)| (*lead, companions.clone())),
        )
    }
}

impl PairingTable {
    /// Build a table, dropping empty tokens and leads without companions.
    pub fn new<L, C, I>(rules: impl IntoIterator<Item = (L, I)>) -> Self
    where
        L: AsRef<str>,
        C: AsRef<str>,
        I: IntoIterator<Item = C>,
    {
        let rules = rules
            .into_iter()
            .filter_map(|(lead, companions)| {
                let lead = lead.as_ref().trim().to_lowercase();
                let companions: Vec<String> = companions
                    .into_iter()
                    .map(|c| c.as_ref().trim().to_lowercase())
                    .filter(|c| !c.is_empty())
                    .collect();
                (!lead.is_empty() && !companions.is_empty())
                    .then_some(PairingRule { lead, companions })
            })
            .collect();
        Self { rules }
    }

    /// A table with no rules; every combination is admissible.
    pub fn empty() -> Self {
        Self { rules: Vec::new() }
    }

    /// Parse a JSON object of `lead → [companion, ...]`.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let raw: BTreeMap<String, Vec<String>> = serde_json::from_str(json)?;
        Ok(Self::new(raw))
    }

    pub fn rules(&self) -> &[PairingRule] {
        &self.rules
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

/// Decides whether a combination of items satisfies every pairing rule.
pub struct CompatibilityChecker<'a> {
    table: &'a PairingTable,
    similarity: &'a dyn Similarity,
    cutoff: f64,
    substantial_calories: f64,
}

impl<'a> CompatibilityChecker<'a> {
    pub fn new(table: &'a PairingTable) -> Self {
        Self {
            table,
            similarity: &DEFAULT_SIMILARITY,
            cutoff: FUZZY_CUTOFF,
            substantial_calories: SUBSTANTIAL_CALORIES,
        }
    }

    pub fn with_similarity(mut self, similarity: &'a dyn Similarity) -> Self {
        self.similarity = similarity;
        self
    }

    /// AND over every rule whose lead appears in some item name.
    ///
    /// A triggered rule passes when a companion is present, or when an item
    /// carrying the lead is calorically substantial on its own.
    pub fn is_admissible(&self, combo: &[&FoodItem]) -> bool {
        let lower: Vec<String> = combo.iter().map(|f| f.key()).collect();

        self.table.rules().iter().all(|rule| {
            let carriers: Vec<usize> = lower
                .iter()
                .enumerate()
                .filter(|(_, name)| name.contains(rule.lead.as_str()))
                .map(|(i, _)| i)
                .collect();
            if carriers.is_empty() {
                return true;
            }

            rule.companions
                .iter()
                .any(|companion| self.companion_present(&lower, companion))
                || carriers
                    .iter()
                    .any(|&i| combo[i].calories >= self.substantial_calories)
        })
    }

    /// Exact substring match on any name, else a fuzzy match on any name token.
    pub fn companion_present(&self, lower_names: &[String], companion: &str) -> bool {
        if lower_names.iter().any(|name| name.contains(companion)) {
            return true;
        }

        lower_names
            .iter()
            .flat_map(|name| name.split(|c: char| c.is_whitespace() || c == '-'))
            .filter(|token| !token.is_empty())
            .any(|token| self.similarity.similarity(companion, token) >= self.cutoff)
    }
}
