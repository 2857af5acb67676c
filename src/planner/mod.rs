//! Constrained meal search.
//!
//! Pipeline: eligibility filter → protein-density ranking → combination
//! search under pairing rules → tolerance relaxation → dedup and alternatives.
//! Everything here is pure and synchronous; "no result" is `None`.

pub mod compatibility;
pub mod constants;
pub mod eligibility;
pub mod ranking;
pub mod relaxation;
pub mod search;
pub mod selection;

use tracing::info;

use crate::models::{Catalog, Filters, Goal, SearchParams, Solution};

pub use compatibility::{
    CompatibilityChecker, JaroWinkler, NormalizedLevenshtein, PairingRule, PairingTable, Similarity,
};
pub use constants::*;
pub use eligibility::{eligible_names, expand_exclusions, filter_eligible};
pub use ranking::{Candidate, protein_density, rank_candidates};
pub use relaxation::{RelaxationOutcome, relax};
pub use search::{SearchPass, score, search_combinations, serving_cap, within_tolerance};
pub use selection::{dedupe_by_signature, select_best};

/// A suggestion plus how the search got there.
#[derive(Debug, Clone, Default)]
pub struct SearchReport {
    pub solution: Option<Solution>,
    /// Eligible items after filtering.
    pub eligible: usize,
    /// Tolerances tried, in order.
    pub tiers_attempted: Vec<f64>,
    /// Serving assignments scored across all tiers.
    pub evaluated: usize,
}

/// Suggest a meal using the default similarity.
pub fn suggest(
    catalog: &Catalog,
    goal: &Goal,
    filters: &Filters,
    params: &SearchParams,
    pairings: &PairingTable,
) -> Option<Solution> {
    let checker = CompatibilityChecker::new(pairings);
    suggest_report(catalog, goal, filters, params, &checker).solution
}

/// Run the full pipeline and report tiers and evaluation counts.
pub fn suggest_report(
    catalog: &Catalog,
    goal: &Goal,
    filters: &Filters,
    params: &SearchParams,
    checker: &CompatibilityChecker<'_>,
) -> SearchReport {
    let eligible = filter_eligible(catalog, filters);
    if eligible.is_empty() {
        info!(catalog = catalog.len(), "no eligible items after filtering");
        return SearchReport::default();
    }

    let ranked = rank_candidates(&eligible, params.top_k);
    let outcome = relax(&ranked, goal, params, checker);

    let tiers_attempted = outcome.tiers_attempted.clone();
    let evaluated = outcome.evaluated;
    let accepted_tier = outcome.accepted_tier();
    let solution = select_best(outcome, params);

    match (&solution, accepted_tier) {
        (Some(best), Some(tier)) => info!(
            tier,
            score = best.score,
            alternatives = best.alternatives.len(),
            "meal found within tolerance"
        ),
        (Some(best), None) => info!(score = best.score, "no tier matched; using closest meal"),
        (None, _) => info!(evaluated, "no admissible combination"),
    }

    SearchReport {
        solution,
        eligible: eligible.len(),
        tiers_attempted,
        evaluated,
    }
}

/// Search only the named items, still subject to the dietary filters.
///
/// Every shortlisted item that passes the filters is a candidate
/// (`top_k` = shortlist size). Unknown names are ignored.
pub fn suggest_from_shortlist<S: AsRef<str>>(
    catalog: &Catalog,
    shortlist: &[S],
    goal: &Goal,
    filters: &Filters,
    params: &SearchParams,
    pairings: &PairingTable,
) -> Option<Solution> {
    let subset = catalog.restrict_to(shortlist);
    let params = params.for_shortlist(subset.len());
    suggest(&subset, goal, filters, &params, pairings)
}
