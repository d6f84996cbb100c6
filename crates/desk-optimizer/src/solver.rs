//! Maximum-weight assignment of employees to desks.
//!
//! Solved as a rectangular minimum-cost assignment (cost = −score, employees
//! ≤ desks) with the shortest-augmenting-path Hungarian method. Only employee
//! rows are inserted, so a solve costs O(employees² × desks) and a large
//! office with few people stays cheap.
//!
//! # Tie-breaking
//!
//! The Hungarian pass yields one optimal matching plus dual potentials
//! `u` (rows) and `v ≤ 0` (desks). With those fixed, an assignment is optimal
//! iff every pair it uses is tight (zero reduced cost) and every desk with
//! `v < 0` stays taken. Employees are then visited in input order and each
//! one is moved to the smallest desk id it can hold in *some* optimal
//! assignment that keeps every earlier employee where it was put.
//!
//! The move is found by following the vacancy left at the employee's
//! current desk: the holder of another desk may step into a vacancy over a
//! tight pair, leaving a vacancy behind. A vacancy at a desk with `v = 0`
//! may be dropped into the pool of untaken desks, and the pool hands out
//! any untaken desk as a fresh vacancy. The employee can take every desk a
//! vacancy can reach.

use std::collections::VecDeque;

use tracing::{debug, trace};

use crate::constraints::PermittedMask;
use crate::matrix::ScoreMatrix;

const UNSET: usize = usize::MAX;

/// An employee-covering matching, indexed by matrix position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Matching {
    /// `desk_of[employee]` is the desk index assigned to that employee.
    pub desk_of: Vec<usize>,
}

/// No matching covers every employee.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Infeasible {
    pub reason: String,
}

struct CostModel<'a> {
    matrix: &'a ScoreMatrix,
    mask: &'a PermittedMask,
}

impl CostModel<'_> {
    fn cost(&self, row: usize, col: usize) -> f64 {
        if self.mask.is_permitted(row, col) {
            -self.matrix.score(row, col)
        } else {
            f64::INFINITY
        }
    }
}

/// Find an optimal, deterministically tie-broken matching.
pub fn solve(
    matrix: &ScoreMatrix,
    mask: &PermittedMask,
    epsilon: f64,
) -> Result<Matching, Infeasible> {
    let employees = matrix.employees();
    let desks = matrix.desks();

    if employees > desks {
        return Err(Infeasible {
            reason: format!("{employees} employees but only {desks} desks"),
        });
    }
    if employees == 0 {
        return Ok(Matching { desk_of: Vec::new() });
    }

    let model = CostModel { matrix, mask };
    let mut state = hungarian(&model, employees, desks)?;
    debug!(employees, desks, "hungarian pass complete");

    break_ties(&model, &mut state, &matrix.desks_by_id(), epsilon);

    Ok(Matching {
        desk_of: state.desk_of,
    })
}

/// Assignment state with dual potentials (0-based).
struct Assigned {
    /// Per employee.
    desk_of: Vec<usize>,
    /// Per desk; `UNSET` for untaken desks.
    holder: Vec<usize>,
    u: Vec<f64>,
    v: Vec<f64>,
}

/// Shortest augmenting path Hungarian algorithm on an `n × m` instance, `n ≤ m`.
///
/// Rows are inserted one at a time in index order. A row that cannot be
/// reached through finite-cost pairs means no covering matching exists.
/// Desk potentials only ever decrease, and stay zero on desks never taken.
fn hungarian(model: &CostModel<'_>, n: usize, m: usize) -> Result<Assigned, Infeasible> {
    // 1-based internally; column 0 is the virtual source.
    let mut u = vec![0.0; n + 1];
    let mut v = vec![0.0; m + 1];
    let mut row_of = vec![0usize; m + 1];
    let mut way = vec![0usize; m + 1];

    for row in 1..=n {
        row_of[0] = row;
        let mut col0 = 0;
        let mut minv = vec![f64::INFINITY; m + 1];
        let mut used = vec![false; m + 1];

        loop {
            used[col0] = true;
            let row0 = row_of[col0];
            let mut delta = f64::INFINITY;
            let mut col1 = 0;

            for col in 1..=m {
                if used[col] {
                    continue;
                }
                let reduced = model.cost(row0 - 1, col - 1) - u[row0] - v[col];
                if reduced < minv[col] {
                    minv[col] = reduced;
                    way[col] = col0;
                }
                if minv[col] < delta {
                    delta = minv[col];
                    col1 = col;
                }
            }

            if !delta.is_finite() {
                return Err(Infeasible {
                    reason: format!(
                        "no assignment covers employee {} together with the employees before it",
                        model.matrix.employee_id(row - 1)
                    ),
                });
            }

            for col in 0..=m {
                if used[col] {
                    u[row_of[col]] += delta;
                    v[col] -= delta;
                } else {
                    minv[col] -= delta;
                }
            }

            col0 = col1;
            if row_of[col0] == 0 {
                break;
            }
        }

        // Flip the augmenting path.
        loop {
            let col1 = way[col0];
            row_of[col0] = row_of[col1];
            col0 = col1;
            if col0 == 0 {
                break;
            }
        }
    }

    let mut desk_of = vec![UNSET; n];
    let mut holder = vec![UNSET; m];
    for col in 1..=m {
        if let Some(row) = row_of[col].checked_sub(1) {
            desk_of[row] = col - 1;
            holder[col - 1] = row;
        }
    }

    Ok(Assigned {
        desk_of,
        holder,
        u: u[1..].to_vec(),
        v: v[1..].to_vec(),
    })
}

fn is_tight(model: &CostModel<'_>, state: &Assigned, row: usize, col: usize, epsilon: f64) -> bool {
    let cost = model.cost(row, col);
    cost.is_finite() && (cost - state.u[row] - state.v[col]).abs() <= epsilon
}

/// How a vacancy arrived at a desk during the search.
#[derive(Debug, Clone, Copy, PartialEq)]
enum Link {
    Unseen,
    /// The employee's own desk, where the search starts.
    Home,
    /// The holder of this desk steps into the given desk.
    Step(usize),
    /// Untaken desk handed out by the pool.
    Pool,
}

/// Rewrite the optimal matching into the lexicographically preferred one.
fn break_ties(model: &CostModel<'_>, state: &mut Assigned, desk_order: &[usize], epsilon: f64) {
    let rows = state.desk_of.len();
    let desks = state.holder.len();
    let mut fixed_row = vec![false; rows];
    let mut fixed_col = vec![false; desks];

    for employee in 0..rows {
        let home = state.desk_of[employee];

        let mut link = vec![Link::Unseen; desks];
        link[home] = Link::Home;
        // Desk whose vacancy was dropped into the pool, if any.
        let mut pooled = None;
        let mut queue = VecDeque::from([home]);

        while let Some(target) = queue.pop_front() {
            for row in 0..rows {
                if row == employee || fixed_row[row] {
                    continue;
                }
                let own = state.desk_of[row];
                if link[own] == Link::Unseen && is_tight(model, state, row, target, epsilon) {
                    link[own] = Link::Step(target);
                    queue.push_back(own);
                }
            }

            if pooled.is_none() && state.v[target].abs() <= epsilon {
                pooled = Some(target);
                for col in 0..desks {
                    if state.holder[col] == UNSET && link[col] == Link::Unseen {
                        link[col] = Link::Pool;
                        queue.push_back(col);
                    }
                }
            }
        }

        // `home` always qualifies, so the search cannot come up empty.
        let choice = desk_order
            .iter()
            .copied()
            .find(|&d| {
                !fixed_col[d]
                    && link[d] != Link::Unseen
                    && is_tight(model, state, employee, d, epsilon)
            })
            .unwrap_or(home);

        if choice != home {
            let mut moves = vec![(employee, choice)];
            let mut freed = None;
            let mut cur = choice;
            while cur != home {
                match link[cur] {
                    Link::Step(to) => {
                        moves.push((state.holder[cur], to));
                        cur = to;
                    }
                    Link::Pool => {
                        let Some(from) = pooled else { break };
                        freed = Some(from);
                        cur = from;
                    }
                    Link::Home | Link::Unseen => break,
                }
            }
            trace!(employee, from = home, to = choice, chain = moves.len(), "rotated tie");

            if let Some(col) = freed {
                state.holder[col] = UNSET;
            }
            for (row, col) in moves {
                state.desk_of[row] = col;
                state.holder[col] = row;
            }
        }

        fixed_row[employee] = true;
        fixed_col[choice] = true;
    }
}
