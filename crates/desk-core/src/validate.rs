//! Well-formedness checks for optimization requests.
//!
//! The optimizer indexes desks and employees by position, so ids must be
//! unique and occupancy must only reference known desks.

use std::collections::HashSet;

use crate::error::MalformedReason;
use crate::types::OptimizationRequest;

/// Check a request for structural problems. Reports the first one found.
pub fn validate_request(req: &OptimizationRequest) -> Result<(), MalformedReason> {
    match (req.employees.is_empty(), req.desks.is_empty()) {
        (false, true) => {
            return Err(MalformedReason::NoDesks {
                employees: req.employees.len(),
            });
        }
        (true, false) => {
            return Err(MalformedReason::NoEmployees {
                desks: req.desks.len(),
            });
        }
        _ => {}
    }

    let mut seen = HashSet::with_capacity(req.employees.len());
    for emp in &req.employees {
        if !seen.insert(emp.employee_id.as_str()) {
            return Err(MalformedReason::DuplicateEmployee(emp.employee_id.clone()));
        }
    }

    let mut desk_ids = HashSet::with_capacity(req.desks.len());
    for desk in &req.desks {
        if !desk_ids.insert(desk.id.as_str()) {
            return Err(MalformedReason::DuplicateDesk(desk.id.clone()));
        }
    }

    // Sorted so the reported id does not depend on hash order.
    let mut unknown: Vec<&String> = req
        .current_occupancy
        .keys()
        .filter(|id| !desk_ids.contains(id.as_str()))
        .collect();
    unknown.sort();
    if let Some(id) = unknown.first() {
        return Err(MalformedReason::UnknownOccupancyDesk((*id).clone()));
    }

    Ok(())
}
