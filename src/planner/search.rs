use crate::models::{FoodItem, Goal, SelectedItem, Solution, Totals};
use crate::planner::compatibility::CompatibilityChecker;
use crate::planner::constants::HIGH_PROTEIN_THRESHOLD_G;
use crate::planner::ranking::Candidate;

/// Result of enumerating every combination at one tolerance tier.
///
/// Both pools hold at most one solution per item subset: the lowest score
/// seen for it, the first one on ties.
#[derive(Debug, Clone, Default)]
pub struct SearchPass {
    /// Admissible solutions inside the tolerance band.
    pub accepted: Vec<Solution>,
    /// Admissible solutions, in or out of the band.
    pub candidates: Vec<Solution>,
    /// Serving assignments scored.
    pub evaluated: usize,
    /// Item subsets rejected by the pairing rules.
    pub rejected_subsets: usize,
}

/// Maximum servings for an item: high-protein items are held to one.
#[inline]
pub fn serving_cap(food: &FoodItem, max_servings: u32) -> u32 {
    if food.protein_g > HIGH_PROTEIN_THRESHOLD_G {
        max_servings.min(1)
    } else {
        max_servings
    }
}

/// Normalized distance from the goal: |Δcal|/cal + |Δprotein|/protein.
///
/// A zero goal divides by 1.
pub fn score(totals: &Totals, goal: &Goal) -> f64 {
    let cal_div = if goal.calories == 0.0 { 1.0 } else { goal.calories };
    let pro_div = if goal.protein_g == 0.0 { 1.0 } else { goal.protein_g };
    (totals.calories - goal.calories).abs() / cal_div
        + (totals.protein_g - goal.protein_g).abs() / pro_div
}

/// Whether a total lies in `[target·(1−tol), target·(1+tol)]`.
#[inline]
pub fn in_band(total: f64, target: f64, tolerance: f64) -> bool {
    target * (1.0 - tolerance) <= total && total <= target * (1.0 + tolerance)
}

/// Calories and protein both within the band.
pub fn within_tolerance(totals: &Totals, goal: &Goal, tolerance: f64) -> bool {
    in_band(totals.calories, goal.calories, tolerance)
        && in_band(totals.protein_g, goal.protein_g, tolerance)
}

/// Visit every `r`-subset of `0..n` in lexicographic order.
pub fn for_each_combination(n: usize, r: usize, mut visit: impl FnMut(&[usize])) {
    if r == 0 || r > n {
        return;
    }
    let mut idx: Vec<usize> = (0..r).collect();
    loop {
        visit(&idx);

        // rightmost position that can still advance
        let Some(pos) = (0..r).rev().find(|&i| idx[i] < n - r + i) else {
            return;
        };
        idx[pos] += 1;
        for j in pos + 1..r {
            idx[j] = idx[j - 1] + 1;
        }
    }
}

/// Visit every serving vector with `1 <= s[i] <= caps[i]`, last position fastest.
pub fn for_each_serving(caps: &[u32], mut visit: impl FnMut(&[u32])) {
    if caps.is_empty() || caps.contains(&0) {
        return;
    }
    let mut servings = vec![1u32; caps.len()];
    loop {
        visit(&servings);

        let Some(pos) = (0..caps.len()).rev().find(|&i| servings[i] < caps[i]) else {
            return;
        };
        servings[pos] += 1;
        for s in servings.iter_mut().skip(pos + 1) {
            *s = 1;
        }
    }
}

/// Enumerate subsets of 1..=max_items ranked candidates and every serving
/// assignment within the per-item caps, keeping the best assignment of each
/// admissible subset.
pub fn search_combinations(
    ranked: &[Candidate<'_>],
    goal: &Goal,
    max_items: usize,
    max_servings: u32,
    tolerance: f64,
    checker: &CompatibilityChecker<'_>,
) -> SearchPass {
    let mut pass = SearchPass::default();
    let largest = max_items.min(ranked.len());

    for r in 1..=largest {
        for_each_combination(ranked.len(), r, |subset| {
            let foods: Vec<&FoodItem> = subset.iter().map(|&i| ranked[i].food).collect();

            // pairing rules depend only on which items are present
            if !checker.is_admissible(&foods) {
                pass.rejected_subsets += 1;
                return;
            }

            let caps: Vec<u32> = foods.iter().map(|f| serving_cap(f, max_servings)).collect();
            let mut best_any: Option<(f64, Vec<u32>, Totals)> = None;
            let mut best_within: Option<(f64, Vec<u32>, Totals)> = None;

            for_each_serving(&caps, |servings| {
                pass.evaluated += 1;
                let totals = Totals::of(foods.iter().copied().zip(servings.iter().copied()));
                let s = score(&totals, goal);

                if best_any.as_ref().is_none_or(|(b, _, _)| s < *b) {
                    best_any = Some((s, servings.to_vec(), totals));
                }
                if within_tolerance(&totals, goal, tolerance)
                    && best_within.as_ref().is_none_or(|(b, _, _)| s < *b)
                {
                    best_within = Some((s, servings.to_vec(), totals));
                }
            });

            let build = |(s, servings, totals): (f64, Vec<u32>, Totals), within: bool| Solution {
                items: foods
                    .iter()
                    .zip(&servings)
                    .map(|(f, &q)| SelectedItem::new(f.name.clone(), q))
                    .collect(),
                totals,
                tolerance_tier: tolerance,
                score: s,
                within_tolerance: within,
                alternatives: Vec::new(),
            };

            if let Some(best) = best_within {
                pass.accepted.push(build(best, true));
            }
            if let Some(best) = best_any {
                let within = within_tolerance(&best.2, goal, tolerance);
                pass.candidates.push(build(best, within));
            }
        });
    }

    pass
}
