use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;

use super::features::{categorize, FeatureBuckets};

/// Lowest rent shown on the budget gauge
pub const RENT_DISPLAY_MIN: f64 = 500.0;
/// Highest rent shown on the budget gauge
pub const RENT_DISPLAY_MAX: f64 = 2000.0;
/// Circumference of the SVG gauge circle
const GAUGE_CIRCUMFERENCE: f64 = 75.3975;

/// A prospective roommate as returned by the recommendations API.
///
/// Profile columns are nullable server-side; `null` and missing keys both
/// deserialize to a blank value.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Candidate {
    pub id: i64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(default)]
    pub age: Option<u32>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub city: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub bio: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub university: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub profession: String,
    /// Stay-duration label, e.g. "6 months"
    #[serde(default, deserialize_with = "null_as_default")]
    pub duration: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub features: BTreeMap<String, serde_json::Value>,
    #[serde(default = "default_rent_filter", deserialize_with = "rent_filter_or_full_range")]
    pub rent_filter: [f64; 2],
    #[serde(default, deserialize_with = "moving_filter_or_none")]
    pub moving_filter: Option<[String; 2]>,
    /// Isochrone polygon, forwarded untouched to the map
    #[serde(default)]
    pub geo: serde_json::Value,
}

fn default_rent_filter() -> [f64; 2] {
    [RENT_DISPLAY_MIN, RENT_DISPLAY_MAX]
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// A null bound falls back to the edge of the display domain
fn rent_filter_or_full_range<'de, D>(deserializer: D) -> Result<[f64; 2], D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<[Option<f64>; 2]>::deserialize(deserializer)?;
    Ok(match raw {
        Some([min, max]) => [
            min.unwrap_or(RENT_DISPLAY_MIN),
            max.unwrap_or(RENT_DISPLAY_MAX),
        ],
        None => default_rent_filter(),
    })
}

/// A null date is kept as an empty string, which renders blank
fn moving_filter_or_none<'de, D>(deserializer: D) -> Result<Option<[String; 2]>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<[Option<String>; 2]>::deserialize(deserializer)?;
    Ok(raw.map(|[start, end]| [start.unwrap_or_default(), end.unwrap_or_default()]))
}

/// Monthly rent range clamped to the gauge's display domain
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RentRange {
    pub min: f64,
    pub max: f64,
}

impl RentRange {
    /// Clamps `[min, max]` into `[500, 2000]`. Values outside are pulled in, not rejected.
    pub fn clamped(raw: [f64; 2]) -> Self {
        Self {
            min: raw[0].max(RENT_DISPLAY_MIN),
            max: raw[1].min(RENT_DISPLAY_MAX),
        }
    }

    pub fn gauge(&self) -> BudgetGauge {
        let arc_length = GAUGE_CIRCUMFERENCE * (self.max - self.min) / 1500.0;
        BudgetGauge {
            rotation: (self.min - RENT_DISPLAY_MIN) * 360.0 / 2000.0 - 135.0,
            arc_length,
            remainder: GAUGE_CIRCUMFERENCE - arc_length,
        }
    }

    pub fn lower_label(&self) -> String {
        format!("£{}", self.min)
    }

    pub fn upper_label(&self) -> String {
        format!("£{}", self.max)
    }
}

/// Rotation and dash lengths for the circular budget gauge
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BudgetGauge {
    /// Degrees, applied around the gauge centre
    pub rotation: f64,
    /// Visible dash length
    pub arc_length: f64,
    /// Invisible dash length completing the circle
    pub remainder: f64,
}

/// Move-in window shown on the calendar
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DateRange {
    pub start: Option<NaiveDate>,
    pub end: Option<NaiveDate>,
}

impl DateRange {
    fn from_filter(filter: Option<&[String; 2]>) -> Self {
        match filter {
            Some([start, end]) => Self {
                start: parse_date(start),
                end: parse_date(end),
            },
            None => Self::default(),
        }
    }
}

/// Accepts plain dates and full timestamps; anything else renders blank.
fn parse_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .or_else(|| {
            chrono::DateTime::parse_from_rfc3339(raw)
                .ok()
                .map(|dt| dt.date_naive())
        })
        .or_else(|| raw.get(..10).and_then(|d| NaiveDate::parse_from_str(d, "%Y-%m-%d").ok()))
}

/// Everything the presentation layer needs to render one candidate card
#[derive(Debug, Clone, PartialEq)]
pub struct CandidateView {
    pub id: i64,
    pub name: String,
    pub age: String,
    pub city: String,
    pub bio: String,
    pub university: String,
    pub profession: String,
    pub duration: String,
    pub features: FeatureBuckets,
    pub rent: RentRange,
    pub gauge: BudgetGauge,
    pub lower_limit: String,
    pub upper_limit: String,
    pub move_in: DateRange,
}

impl From<&Candidate> for CandidateView {
    fn from(candidate: &Candidate) -> Self {
        let rent = RentRange::clamped(candidate.rent_filter);

        CandidateView {
            id: candidate.id,
            name: candidate.name.clone(),
            age: candidate.age.map(|a| a.to_string()).unwrap_or_default(),
            city: candidate.city.clone(),
            bio: candidate.bio.clone(),
            university: candidate.university.clone(),
            profession: candidate.profession.clone(),
            duration: candidate.duration.clone(),
            features: categorize(candidate.features.keys().map(String::as_str)),
            rent,
            gauge: rent.gauge(),
            lower_limit: rent.lower_label(),
            upper_limit: rent.upper_label(),
            move_in: DateRange::from_filter(candidate.moving_filter.as_ref()),
        }
    }
}
