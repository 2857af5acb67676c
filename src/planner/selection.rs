use std::collections::{HashMap, HashSet};

use crate::models::{SearchParams, Solution};
use crate::planner::relaxation::RelaxationOutcome;

fn signature_key(solution: &Solution) -> Vec<String> {
    solution
        .signature()
        .into_iter()
        .map(str::to_owned)
        .collect()
}

/// Keep the lowest-score solution per signature.
///
/// Output follows first appearance of each signature; equal scores keep the
/// earlier solution.
pub fn dedupe_by_signature(solutions: Vec<Solution>) -> Vec<Solution> {
    let mut kept: Vec<Solution> = Vec::new();
    let mut position: HashMap<Vec<String>, usize> = HashMap::new();

    for solution in solutions {
        let key = signature_key(&solution);
        match position.get(&key) {
            Some(&pos) => {
                if solution.score < kept[pos].score {
                    kept[pos] = solution;
                }
            }
            None => {
                position.insert(key, kept.len());
                kept.push(solution);
            }
        }
    }

    kept
}

/// Pick the best solution and attach up to `max_alternatives` siblings whose
/// protein is within `protein_window` grams of it.
///
/// Draws from the accepted pool, or the all-candidates pool when nothing was
/// accepted. `None` when both are empty.
pub fn select_best(outcome: RelaxationOutcome, params: &SearchParams) -> Option<Solution> {
    let pool = if outcome.accepted.is_empty() {
        outcome.candidates
    } else {
        outcome.accepted
    };

    let mut ranked = dedupe_by_signature(pool);
    ranked.sort_by(|a, b| a.score.total_cmp(&b.score));

    let mut rest = ranked.into_iter();
    let mut best = rest.next()?;

    let mut chosen: HashSet<Vec<String>> = HashSet::new();
    chosen.insert(signature_key(&best));

    let mut alternatives = Vec::new();
    for solution in rest {
        if alternatives.len() >= params.max_alternatives {
            break;
        }
        if (solution.totals.protein_g - best.totals.protein_g).abs() > params.protein_window {
            continue;
        }
        if chosen.insert(signature_key(&solution)) {
            alternatives.push(solution);
        }
    }

    best.alternatives = alternatives;
    Some(best)
}
