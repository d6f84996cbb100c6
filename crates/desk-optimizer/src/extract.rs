//! Turns solver output into the externally visible result.

use desk_core::{
    Assignment, OptimizationRequest, OptimizationResult, OptimizeError, OptimizeResult, Placement,
    ScoringWeights,
};

use crate::matrix::ScoreMatrix;
use crate::scorer::score_breakdown;
use crate::solver::{Infeasible, Matching};

/// Map a matching over matrix indices back to employee and desk ids.
///
/// The total is summed from the score matrix, in employee input order.
pub fn extract(
    req: &OptimizationRequest,
    matrix: &ScoreMatrix,
    weights: &ScoringWeights,
    outcome: Result<Matching, Infeasible>,
) -> OptimizeResult<OptimizationResult> {
    let matching = outcome.map_err(|inf| OptimizeError::infeasible(inf.reason))?;

    let mut assignments = Assignment::new();
    let mut placements = Vec::with_capacity(matching.desk_of.len());
    let mut score = 0.0;

    for (employee, &desk) in matching.desk_of.iter().enumerate() {
        let pair_score = matrix.score(employee, desk);
        score += pair_score;

        let emp = &req.employees[employee];
        let desk_ref = &req.desks[desk];
        assignments.insert(emp.employee_id.clone(), desk_ref.id.clone());
        placements.push(Placement {
            employee_id: emp.employee_id.clone(),
            desk_id: desk_ref.id.clone(),
            score: pair_score,
            breakdown: score_breakdown(emp, desk_ref, weights),
            preferred_day: emp.prefers_day(req.date),
        });
    }

    Ok(OptimizationResult {
        assignments,
        score,
        constraints_satisfied: true,
        placements,
    })
}
