//! Hard constraints: which (employee, desk) pairs may be assigned at all.
//!
//! The one-desk-per-employee and one-employee-per-desk rules are structural
//! and enforced by the solver. This module only derives the per-pair
//! exclusions. Occupied desks are always excluded; the `[constraints]`
//! settings add the opt-in rules:
//!
//! - **accessibility** `require`: non-accessible desks are out for employees
//!   who need access
//! - **special_needs** `require`: a desk must carry every needed feature
//! - **executive_desks** `reserved`: executive desks go to executives only
//! - **emergency_desks** `excluded`: emergency desks and desks by an
//!   emergency exit are out for everyone

use desk_core::{
    AccessibilityMode, ConstraintConfig, Desk, EmergencyDeskPolicy, EmployeePreference,
    ExecutiveDeskPolicy, OptimizationRequest, SpecialNeedsMode,
};

use crate::matrix::ScoreMatrix;

#[derive(Debug, Clone)]
pub struct PermittedMask {
    employees: usize,
    desks: usize,
    /// Row-major, `employees × desks`.
    cells: Vec<bool>,
    free_desks: usize,
}

/// Rules that depend on both sides of the pair.
fn pair_allowed(rules: &ConstraintConfig, emp: &EmployeePreference, desk: &Desk) -> bool {
    if rules.accessibility == AccessibilityMode::Require
        && emp.accessibility_required
        && !desk.accessible
    {
        return false;
    }
    if rules.special_needs == SpecialNeedsMode::Require
        && !emp.special_needs.is_subset(&desk.features)
    {
        return false;
    }
    !(rules.executive_desks == ExecutiveDeskPolicy::Reserved && desk.executive && !emp.executive)
}

impl PermittedMask {
    pub fn build(req: &OptimizationRequest, rules: &ConstraintConfig) -> Self {
        let free: Vec<bool> = req
            .desks
            .iter()
            .map(|d| {
                !req.is_occupied(d)
                    && !(rules.emergency_desks == EmergencyDeskPolicy::Excluded
                        && d.is_emergency_area())
            })
            .collect();
        let free_desks = free.iter().filter(|f| **f).count();

        let cells = req
            .employees
            .iter()
            .flat_map(|emp| {
                req.desks
                    .iter()
                    .zip(&free)
                    .map(move |(desk, &is_free)| is_free && pair_allowed(rules, emp, desk))
            })
            .collect();

        Self {
            employees: req.employees.len(),
            desks: req.desks.len(),
            cells,
            free_desks,
        }
    }

    /// Mask with every pair permitted.
    pub fn all(employees: usize, desks: usize) -> Self {
        Self {
            employees,
            desks,
            cells: vec![true; employees * desks],
            free_desks: desks,
        }
    }

    pub fn forbid(&mut self, employee: usize, desk: usize) {
        self.cells[employee * self.desks + desk] = false;
    }

    pub fn is_permitted(&self, employee: usize, desk: usize) -> bool {
        self.cells[employee * self.desks + desk]
    }

    /// Desks open to at least someone: not occupied, not an excluded emergency desk.
    pub fn free_desks(&self) -> usize {
        self.free_desks
    }

    pub fn permitted_for(&self, employee: usize) -> usize {
        let row = &self.cells[employee * self.desks..(employee + 1) * self.desks];
        row.iter().filter(|p| **p).count()
    }

    /// Cheap necessary conditions for a covering matching.
    ///
    /// Returns a description of the first violated condition. Passing this
    /// check does not guarantee feasibility when per-employee exclusions
    /// differ; the solver settles that.
    pub fn capacity_shortfall(&self, matrix: &ScoreMatrix) -> Option<String> {
        if self.free_desks < self.employees {
            return Some(format!(
                "{} employees but only {} free desks",
                self.employees, self.free_desks
            ));
        }
        (0..self.employees)
            .find(|&e| self.permitted_for(e) == 0)
            .map(|e| format!("employee {} has no permitted desk", matrix.employee_id(e)))
    }
}
