use tracing::debug;

use crate::models::{Goal, SearchParams, Solution};
use crate::planner::compatibility::CompatibilityChecker;
use crate::planner::ranking::Candidate;
use crate::planner::search::search_combinations;

/// Pools gathered by the relaxation loop.
#[derive(Debug, Clone, Default)]
pub struct RelaxationOutcome {
    /// Accepted solutions of the first tier that produced any; empty otherwise.
    pub accepted: Vec<Solution>,
    /// Best admissible solution per item subset, from the first tier.
    pub candidates: Vec<Solution>,
    pub tiers_attempted: Vec<f64>,
    pub evaluated: usize,
}

impl RelaxationOutcome {
    /// Tier that produced the accepted pool, if any.
    pub fn accepted_tier(&self) -> Option<f64> {
        self.accepted.first().map(|s| s.tolerance_tier)
    }
}

/// Run the search at `t`, `2t`, `3t`, stopping at the first tier with an
/// accepted solution.
pub fn relax(
    ranked: &[Candidate<'_>],
    goal: &Goal,
    params: &SearchParams,
    checker: &CompatibilityChecker<'_>,
) -> RelaxationOutcome {
    let mut outcome = RelaxationOutcome::default();

    for tier in params.tiers() {
        let pass = search_combinations(
            ranked,
            goal,
            params.max_items,
            params.max_servings,
            tier,
            checker,
        );
        debug!(
            tier,
            evaluated = pass.evaluated,
            accepted = pass.accepted.len(),
            rejected_subsets = pass.rejected_subsets,
            "search pass"
        );

        // later tiers enumerate the same assignments; one candidate pool is enough
        if outcome.tiers_attempted.is_empty() {
            outcome.candidates = pass.candidates;
        }
        outcome.tiers_attempted.push(tier);
        outcome.evaluated += pass.evaluated;

        if !pass.accepted.is_empty() {
            outcome.accepted = pass.accepted;
            break;
        }
    }

    outcome
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::FoodItem;
    use crate::planner::compatibility::PairingTable;
    use crate::planner::ranking::rank_candidates;

    fn run(foods: &[FoodItem], goal: Goal) -> RelaxationOutcome {
        let refs: Vec<&FoodItem> = foods.iter().collect();
        let ranked = rank_candidates(&refs, 10);
        let table = PairingTable::empty();
        let checker = CompatibilityChecker::new(&table);
        let params = SearchParams {
            tolerance: 0.1,
            max_items: 2,
            max_servings: 1,
            ..Default::default()
        };
        relax(&ranked, &goal, &params, &checker)
    }

    #[test]
    fn test_stops_at_first_tier() {
        let foods = vec![FoodItem::new("Bowl", 400.0, 30.0)];
        let outcome = run(&foods, Goal::new(400.0, 30.0));

        assert_eq!(outcome.tiers_attempted, vec![0.1]);
        assert_eq!(outcome.accepted.len(), 1);
        assert_eq!(outcome.accepted_tier(), Some(0.1));
    }

    #[test]
    fn test_relaxes_to_second_tier() {
        // 15% off the goal: outside 10%, inside 20%
        let foods = vec![FoodItem::new("Bowl", 460.0, 34.5)];
        let outcome = run(&foods, Goal::new(400.0, 30.0));

        assert_eq!(outcome.tiers_attempted, vec![0.1, 0.2]);
        assert_eq!(outcome.accepted_tier(), Some(0.2));
        assert!(outcome.accepted.iter().all(|s| s.within_tolerance));
    }

    #[test]
    fn test_no_tier_accepts() {
        let foods = vec![FoodItem::new("Snack", 100.0, 2.0)];
        let outcome = run(&foods, Goal::new(800.0, 60.0));

        assert_eq!(outcome.tiers_attempted.len(), 3);
        assert!(outcome.accepted.is_empty());
        // one subset, collected once across the three tiers
        assert_eq!(outcome.candidates.len(), 1);
        assert_eq!(outcome.candidates[0].tolerance_tier, 0.1);
        assert!(outcome.candidates.iter().all(|s| !s.within_tolerance));
        assert_eq!(outcome.accepted_tier(), None);
    }
}
