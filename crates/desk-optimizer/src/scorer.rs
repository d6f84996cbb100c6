//! Preference scoring for desk assignment.
//!
//! Scores an (employee, desk) pair as a weighted sum of independent terms:
//! - **Location**, **desk type**, **privacy**: exact match on the preference
//! - **Accessibility**: employee requires it and the desk provides it
//! - **Team adjacency** / **special needs**: extension terms, off by default
//!
//! Unset preferences contribute nothing; no term is ever negative.

use desk_core::{Desk, EmployeePreference, ScoreBreakdown, ScoringWeights};

/// A desk ranked for one employee.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct DeskScore {
    pub desk_id: String,
    pub score: f64,
    pub breakdown: ScoreBreakdown,
}

/// A desk without the attribute matches nothing.
fn matches(preference: &Option<String>, actual: &str) -> bool {
    !actual.is_empty() && preference.as_deref().is_some_and(|p| p == actual)
}

/// Score a single desk for an employee, term by term.
pub fn score_breakdown(
    employee: &EmployeePreference,
    desk: &Desk,
    weights: &ScoringWeights,
) -> ScoreBreakdown {
    let location = if matches(&employee.preferred_location, &desk.location) {
        weights.location
    } else {
        0.0
    };
    let desk_type = if matches(&employee.desk_type, &desk.desk_type) {
        weights.desk_type
    } else {
        0.0
    };
    let accessibility = if employee.accessibility_required && desk.accessible {
        weights.accessibility
    } else {
        0.0
    };
    let privacy = if matches(&employee.privacy_preference, &desk.privacy_level) {
        weights.privacy
    } else {
        0.0
    };

    let team_adjacency = match &desk.team_zone {
        Some(zone) if employee.team_adjacency.contains(zone) => weights.team_adjacency,
        _ => 0.0,
    };
    let needs_met = employee
        .special_needs
        .iter()
        .filter(|need| desk.features.contains(*need))
        .count();
    let special_needs = weights.special_needs * needs_met as f64;

    ScoreBreakdown {
        location,
        desk_type,
        accessibility,
        privacy,
        team_adjacency,
        special_needs,
    }
}

/// Total preference score for a pair.
pub fn score(employee: &EmployeePreference, desk: &Desk, weights: &ScoringWeights) -> f64 {
    score_breakdown(employee, desk, weights).total()
}

/// Score the given desks for one employee and return them best first.
///
/// Equal scores are ordered by ascending desk id, the same preference the
/// solver applies when breaking ties.
pub fn rank_desks<'a>(
    employee: &EmployeePreference,
    desks: impl IntoIterator<Item = &'a Desk>,
    weights: &ScoringWeights,
) -> Vec<DeskScore> {
    let mut ranked: Vec<DeskScore> = desks
        .into_iter()
        .map(|desk| {
            let breakdown = score_breakdown(employee, desk, weights);
            DeskScore {
                desk_id: desk.id.clone(),
                score: breakdown.total(),
                breakdown,
            }
        })
        .collect();

    ranked.sort_by(|a, b| {
        b.score
            .total_cmp(&a.score)
            .then_with(|| a.desk_id.cmp(&b.desk_id))
    });
    ranked
}
