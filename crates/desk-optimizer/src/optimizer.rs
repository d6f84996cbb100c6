//! The optimization pipeline: validate → score → constrain → solve → extract.
//!
//! `Optimizer` holds only its configuration. Each call builds fresh
//! request-scoped data and returns a complete result or an error.

use tracing::{debug, info, warn};

use desk_core::{
    ConfigError, OptimizationRequest, OptimizationResult, OptimizeResult, OptimizerConfig,
    validate_request,
};

use crate::constraints::PermittedMask;
use crate::extract::extract;
use crate::matrix::ScoreMatrix;
use crate::scorer::{DeskScore, rank_desks};
use crate::solver::{Infeasible, solve};

/// A configured, stateless optimizer.
#[derive(Debug, Clone, Default)]
pub struct Optimizer {
    config: OptimizerConfig,
}

impl Optimizer {
    /// Rejects weights and tolerances the solver cannot work with.
    pub fn new(config: OptimizerConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &OptimizerConfig {
        &self.config
    }

    /// Assign desks for one request.
    ///
    /// Fails with `MalformedRequest` on duplicate or dangling ids and with
    /// `InfeasibleRequest` when no assignment covers every employee.
    pub fn optimize(&self, req: &OptimizationRequest) -> OptimizeResult<OptimizationResult> {
        validate_request(req)?;

        let matrix = ScoreMatrix::build(req, &self.config.scoring);
        let mask = PermittedMask::build(req, &self.config.constraints);
        debug!(
            date = %req.date,
            employees = matrix.employees(),
            desks = matrix.desks(),
            free_desks = mask.free_desks(),
            "built score matrix and constraints"
        );

        let outcome = match mask.capacity_shortfall(&matrix) {
            Some(reason) => Err(Infeasible { reason }),
            None => solve(&matrix, &mask, self.config.solver.epsilon),
        };

        match extract(req, &matrix, &self.config.scoring, outcome) {
            Ok(result) => {
                info!(
                    date = %req.date,
                    assigned = result.assignments.len(),
                    score = result.score,
                    "desk assignment optimized"
                );
                Ok(result)
            }
            Err(e) => {
                warn!(date = %req.date, error = %e, "desk assignment failed");
                Err(e)
            }
        }
    }

    /// Rank the desks one employee is permitted to take, best first.
    ///
    /// Returns `None` if the employee is not part of the request.
    pub fn explain(
        &self,
        req: &OptimizationRequest,
        employee_id: &str,
    ) -> OptimizeResult<Option<Vec<DeskScore>>> {
        validate_request(req)?;

        let Some(index) = req
            .employees
            .iter()
            .position(|e| e.employee_id == employee_id)
        else {
            return Ok(None);
        };

        let mask = PermittedMask::build(req, &self.config.constraints);
        let permitted = req
            .desks
            .iter()
            .enumerate()
            .filter(|(d, _)| mask.is_permitted(index, *d))
            .map(|(_, desk)| desk);

        Ok(Some(rank_desks(
            &req.employees[index],
            permitted,
            &self.config.scoring,
        )))
    }
}

/// Optimize with the default configuration.
pub fn optimize(req: &OptimizationRequest) -> OptimizeResult<OptimizationResult> {
    Optimizer::default().optimize(req)
}
