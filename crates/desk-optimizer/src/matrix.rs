//! Dense employee × desk score matrix, built once per request.

use desk_core::{OptimizationRequest, ScoringWeights};

use crate::constraints::PermittedMask;
use crate::scorer::score;

#[derive(Debug, Clone)]
pub struct ScoreMatrix {
    employee_ids: Vec<String>,
    desk_ids: Vec<String>,
    /// Row-major, `employees × desks`.
    scores: Vec<f64>,
}

impl ScoreMatrix {
    /// Score every (employee, desk) pair of the request.
    pub fn build(req: &OptimizationRequest, weights: &ScoringWeights) -> Self {
        let scores = req
            .employees
            .iter()
            .flat_map(|emp| req.desks.iter().map(move |desk| score(emp, desk, weights)))
            .collect();

        Self {
            employee_ids: req.employees.iter().map(|e| e.employee_id.clone()).collect(),
            desk_ids: req.desks.iter().map(|d| d.id.clone()).collect(),
            scores,
        }
    }

    /// Build directly from raw scores. `scores[e][d]` is employee `e` at desk `d`.
    pub fn from_rows(employee_ids: Vec<String>, desk_ids: Vec<String>, scores: &[Vec<f64>]) -> Self {
        debug_assert_eq!(scores.len(), employee_ids.len());
        debug_assert!(scores.iter().all(|row| row.len() == desk_ids.len()));
        Self {
            employee_ids,
            desk_ids,
            scores: scores.iter().flatten().copied().collect(),
        }
    }

    pub fn employees(&self) -> usize {
        self.employee_ids.len()
    }

    pub fn desks(&self) -> usize {
        self.desk_ids.len()
    }

    pub fn employee_id(&self, employee: usize) -> &str {
        &self.employee_ids[employee]
    }

    pub fn desk_id(&self, desk: usize) -> &str {
        &self.desk_ids[desk]
    }

    /// Raw preference score, ignoring constraints.
    pub fn score(&self, employee: usize, desk: usize) -> f64 {
        self.scores[employee * self.desks() + desk]
    }

    /// Score of a pair, or `None` if the pair is forbidden.
    pub fn entry(&self, mask: &PermittedMask, employee: usize, desk: usize) -> Option<f64> {
        mask.is_permitted(employee, desk)
            .then(|| self.score(employee, desk))
    }

    /// Desk indices sorted by ascending id.
    pub fn desks_by_id(&self) -> Vec<usize> {
        let mut order: Vec<usize> = (0..self.desks()).collect();
        order.sort_by(|&a, &b| self.desk_ids[a].cmp(&self.desk_ids[b]));
        order
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use desk_core::{ConstraintConfig, Desk, EmployeePreference};

    fn sample_request() -> OptimizationRequest {
        let mut e1 = EmployeePreference::new("E1");
        e1.preferred_location = Some("A".to_string());
        let mut e2 = EmployeePreference::new("E2");
        e2.accessibility_required = true;

        OptimizationRequest::new(
            NaiveDate::from_ymd_opt(2024, 3, 4).unwrap(),
            vec![
                Desk::new("D2", "B", "quiet", "high").accessible(),
                Desk::new("D1", "A", "open", "low"),
            ],
            vec![e1, e2],
        )
    }

    #[test]
    fn builds_row_major_scores() {
        let matrix = ScoreMatrix::build(&sample_request(), &ScoringWeights::default());

        assert_eq!(matrix.employees(), 2);
        assert_eq!(matrix.desks(), 2);
        assert_eq!(matrix.score(0, 0), 0.0);
        assert_eq!(matrix.score(0, 1), 1.0);
        assert_eq!(matrix.score(1, 0), 2.0);
        assert_eq!(matrix.score(1, 1), 0.0);
    }

    #[test]
    fn entry_hides_forbidden_pairs() {
        let mut req = sample_request();
        req.current_occupancy.insert("D2".to_string(), true);
        let matrix = ScoreMatrix::build(&req, &ScoringWeights::default());
        let mask = PermittedMask::build(&req, &ConstraintConfig::default());

        assert_eq!(matrix.entry(&mask, 1, 0), None);
        assert_eq!(matrix.entry(&mask, 0, 1), Some(1.0));
    }

    #[test]
    fn desks_by_id_sorts_lexicographically() {
        let matrix = ScoreMatrix::build(&sample_request(), &ScoringWeights::default());
        assert_eq!(matrix.desks_by_id(), vec![1, 0]);
    }
}
