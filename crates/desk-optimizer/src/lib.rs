//! deskgrid assignment engine — scoring, constraints, optimal matching.
//!
//! Assigns desks to employees for a single day, maximizing total preference
//! score. Every call is independent: plain data in, plain data out.
//!
//! # Components
//!
//! - **`scorer`** — Per-pair preference score (location, type, access, privacy)
//! - **`matrix`** — Dense employee × desk score matrix
//! - **`constraints`** — Permitted pairs (occupancy, opt-in desk policy rules)
//! - **`solver`** — Maximum-weight assignment with deterministic tie-break
//! - **`extract`** — Index matching → employee/desk id mapping and total
//! - **`optimizer`** — The `optimize` pipeline tying the above together

pub mod constraints;
pub mod extract;
pub mod matrix;
pub mod optimizer;
pub mod scorer;
pub mod solver;

pub use constraints::PermittedMask;
pub use matrix::ScoreMatrix;
pub use optimizer::{Optimizer, optimize};
pub use scorer::{DeskScore, rank_desks, score, score_breakdown};
pub use solver::{Infeasible, Matching, solve};
