//! Request and result types shared across deskgrid crates.

use std::collections::{BTreeMap, BTreeSet, HashMap};

use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Deserializer, Serialize, de};

/// A physical desk as seen for one target date.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Desk {
    pub id: String,
    /// Missing attributes are empty and match no preference.
    #[serde(default)]
    pub location: String,
    #[serde(rename = "type", alias = "desk_type", default)]
    pub desk_type: String,
    #[serde(rename = "is_accessible", alias = "accessible", default)]
    pub accessible: bool,
    #[serde(default)]
    pub privacy_level: String,
    /// Occupancy recorded on the desk itself. An entry in the request's
    /// occupancy map takes precedence.
    #[serde(default)]
    pub occupied: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub team_zone: Option<String>,
    /// Free-form feature tags (`dual-monitor`, `window`, ...).
    #[serde(default, skip_serializing_if = "BTreeSet::is_empty")]
    pub features: BTreeSet<String>,
    #[serde(default, alias = "is_executive")]
    pub executive: bool,
    #[serde(default, alias = "is_emergency_desk")]
    pub emergency: bool,
    #[serde(default)]
    pub near_emergency_exit: bool,
}

impl Desk {
    /// Minimal desk with no extended attributes.
    pub fn new(id: &str, location: &str, desk_type: &str, privacy_level: &str) -> Self {
        Self {
            id: id.to_string(),
            location: location.to_string(),
            desk_type: desk_type.to_string(),
            accessible: false,
            privacy_level: privacy_level.to_string(),
            occupied: false,
            team_zone: None,
            features: BTreeSet::new(),
            executive: false,
            emergency: false,
            near_emergency_exit: false,
        }
    }

    pub fn accessible(mut self) -> Self {
        self.accessible = true;
        self
    }

    pub fn with_feature(mut self, feature: &str) -> Self {
        self.features.insert(feature.to_string());
        self
    }

    /// Reserved for emergencies, or sitting by an emergency exit.
    pub fn is_emergency_area(&self) -> bool {
        self.emergency || self.near_emergency_exit
    }
}

/// One employee's preferences for the target date.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EmployeePreference {
    pub employee_id: String,
    #[serde(default)]
    pub preferred_location: Option<String>,
    #[serde(default)]
    pub desk_type: Option<String>,
    #[serde(default)]
    pub accessibility_required: bool,
    /// Weekday names (`"monday"`, `"Tue"`, ...). Informational only.
    #[serde(default)]
    pub preferred_days: BTreeSet<String>,
    #[serde(default)]
    pub privacy_preference: Option<String>,
    #[serde(default)]
    pub team_adjacency: BTreeSet<String>,
    #[serde(default)]
    pub special_needs: BTreeSet<String>,
    #[serde(default, alias = "is_executive")]
    pub executive: bool,
}

impl EmployeePreference {
    /// Employee with every preference unset.
    pub fn new(employee_id: &str) -> Self {
        Self {
            employee_id: employee_id.to_string(),
            ..Default::default()
        }
    }

    /// Whether `date` falls on one of the employee's preferred weekdays.
    ///
    /// Matches full names and three-letter abbreviations, case-insensitively.
    /// An empty set means "no preference" and always matches.
    pub fn prefers_day(&self, date: NaiveDate) -> bool {
        if self.preferred_days.is_empty() {
            return true;
        }
        let weekday = weekday_name(&date.weekday().to_string().to_lowercase());
        self.preferred_days.iter().any(|day| {
            let day = day.trim().to_lowercase();
            day.len() >= 3 && weekday.starts_with(&day)
        })
    }
}

/// chrono renders weekdays as `Mon`, `Tue`, ...; expand to full names.
fn weekday_name(short: &str) -> &'static str {
    match short {
        "mon" => "monday",
        "tue" => "tuesday",
        "wed" => "wednesday",
        "thu" => "thursday",
        "fri" => "friday",
        "sat" => "saturday",
        _ => "sunday",
    }
}

/// Everything needed to assign desks for one day.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OptimizationRequest {
    /// A plain date or a timestamp; timestamps keep only their date.
    #[serde(deserialize_with = "deserialize_date")]
    pub date: NaiveDate,
    pub desks: Vec<Desk>,
    pub employees: Vec<EmployeePreference>,
    /// Desk id → already occupied on `date`.
    #[serde(default, alias = "occupancy")]
    pub current_occupancy: HashMap<String, bool>,
}

impl OptimizationRequest {
    pub fn new(date: NaiveDate, desks: Vec<Desk>, employees: Vec<EmployeePreference>) -> Self {
        Self {
            date,
            desks,
            employees,
            current_occupancy: HashMap::new(),
        }
    }

    /// Effective occupancy of a desk for the target date.
    pub fn is_occupied(&self, desk: &Desk) -> bool {
        self.current_occupancy
            .get(&desk.id)
            .copied()
            .unwrap_or(desk.occupied)
    }

    pub fn from_json(content: &str) -> anyhow::Result<Self> {
        Ok(serde_json::from_str(content)?)
    }
}

fn deserialize_date<'de, D>(deserializer: D) -> Result<NaiveDate, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    parse_date(&raw).ok_or_else(|| {
        de::Error::custom(format!(
            "invalid date `{raw}`, expected YYYY-MM-DD or an ISO 8601 timestamp"
        ))
    })
}

fn parse_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .or_else(|| DateTime::parse_from_rfc3339(raw).ok().map(|dt| dt.date_naive()))
        .or_else(|| raw.parse::<NaiveDateTime>().ok().map(|dt| dt.date()))
        .or_else(|| {
            NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S%.f")
                .ok()
                .map(|dt| dt.date())
        })
}

/// Employee id → desk id. Each desk id appears at most once.
pub type Assignment = BTreeMap<String, String>;

/// Per-term contributions to a pair score.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ScoreBreakdown {
    pub location: f64,
    pub desk_type: f64,
    pub accessibility: f64,
    pub privacy: f64,
    pub team_adjacency: f64,
    pub special_needs: f64,
}

impl ScoreBreakdown {
    pub fn total(&self) -> f64 {
        self.location
            + self.desk_type
            + self.accessibility
            + self.privacy
            + self.team_adjacency
            + self.special_needs
    }
}

/// Details for one employee's chosen desk.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Placement {
    pub employee_id: String,
    pub desk_id: String,
    pub score: f64,
    pub breakdown: ScoreBreakdown,
    /// Target date is one of the employee's preferred days.
    pub preferred_day: bool,
}

/// Outcome of a successful optimization.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OptimizationResult {
    pub assignments: Assignment,
    pub score: f64,
    pub constraints_satisfied: bool,
    /// Same pairs as `assignments`, in employee input order.
    #[serde(default)]
    pub placements: Vec<Placement>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    #[test]
    fn parses_wire_format_keys() {
        let json = r#"{
            "date": "2024-03-04",
            "desks": [
                {"id": "D1", "location": "A", "type": "open", "is_accessible": false, "privacy_level": "low"},
                {"id": "D2", "location": "B", "type": "quiet", "is_accessible": true, "privacy_level": "high"}
            ],
            "employees": [
                {"employee_id": "E1", "preferred_location": "A"},
                {"employee_id": "E2", "accessibility_required": true, "preferred_days": ["monday"]}
            ],
            "current_occupancy": {"D1": false}
        }"#;

        let req = OptimizationRequest::from_json(json).unwrap();
        assert_eq!(req.desks.len(), 2);
        assert_eq!(req.desks[0].desk_type, "open");
        assert!(req.desks[1].accessible);
        assert!(req.employees[1].accessibility_required);
        assert_eq!(req.employees[0].desk_type, None);
        assert_eq!(req.current_occupancy.get("D1"), Some(&false));
    }

    fn request_with_date(value: &str) -> anyhow::Result<OptimizationRequest> {
        OptimizationRequest::from_json(&format!(
            r#"{{"date": "{value}", "desks": [], "employees": []}}"#
        ))
    }

    #[test]
    fn accepts_timestamp_dates() {
        let monday = date("2024-03-04");
        for value in [
            "2024-03-04",
            "2024-03-04T09:00:00",
            "2024-03-04T09:00:00.123456",
            "2024-03-04 09:00:00",
            "2024-03-04T09:00:00Z",
            "2024-03-04T23:30:00-05:00",
        ] {
            let req = request_with_date(value).unwrap();
            assert_eq!(req.date, monday, "{value}");
        }
    }

    #[test]
    fn rejects_unparseable_date() {
        let err = request_with_date("next monday").unwrap_err();
        assert!(err.to_string().contains("invalid date"), "{err}");
    }

    #[test]
    fn desk_attributes_default_when_missing() {
        let json = r#"{
            "date": "2024-03-04",
            "desks": [{"id": "D1", "is_executive": true, "is_emergency_desk": true}],
            "employees": [{"employee_id": "E1", "is_executive": true}]
        }"#;

        let req = OptimizationRequest::from_json(json).unwrap();
        let desk = &req.desks[0];
        assert_eq!(desk.location, "");
        assert_eq!(desk.desk_type, "");
        assert_eq!(desk.privacy_level, "");
        assert!(desk.executive);
        assert!(desk.is_emergency_area());
        assert!(req.employees[0].executive);
    }

    #[test]
    fn occupancy_map_overrides_desk_flag() {
        let mut desk = Desk::new("D1", "A", "open", "low");
        desk.occupied = true;
        let mut req = OptimizationRequest::new(date("2024-03-04"), vec![desk.clone()], vec![]);
        assert!(req.is_occupied(&desk));

        req.current_occupancy.insert("D1".to_string(), false);
        assert!(!req.is_occupied(&desk));
    }

    #[test]
    fn missing_occupancy_defaults_to_free() {
        let desk = Desk::new("D1", "A", "open", "low");
        let req = OptimizationRequest::new(date("2024-03-04"), vec![desk.clone()], vec![]);
        assert!(!req.is_occupied(&desk));
    }

    #[test]
    fn preferred_day_matching() {
        // 2024-03-04 is a Monday.
        let monday = date("2024-03-04");
        let mut emp = EmployeePreference::new("E1");
        assert!(emp.prefers_day(monday));

        emp.preferred_days.insert("Tuesday".to_string());
        assert!(!emp.prefers_day(monday));

        emp.preferred_days.insert("mon".to_string());
        assert!(emp.prefers_day(monday));
    }

    #[test]
    fn breakdown_total_sums_terms() {
        let b = ScoreBreakdown {
            location: 1.0,
            accessibility: 2.0,
            special_needs: 0.5,
            ..Default::default()
        };
        assert_eq!(b.total(), 3.5);
    }
}
