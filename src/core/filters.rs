use crate::models::{Place, TermSet, TravelerProfile};
use serde::Serialize;
use std::fmt;

/// Why a place was removed by the eligibility gate
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum ExclusionReason {
    /// Traveler declared a condition the place is not recommended for
    #[serde(rename_all = "camelCase")]
    HealthCondition { conditions: Vec<String> },
    /// Traveler's age falls outside the place's well-formed age range
    #[serde(rename_all = "camelCase")]
    AgeOutOfRange { age: u8, min: f64, max: f64 },
}

impl fmt::Display for ExclusionReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExclusionReason::HealthCondition { conditions } => {
                write!(f, "not recommended for {}", conditions.join(", "))
            }
            ExclusionReason::AgeOutOfRange { age, min, max } => {
                write!(f, "age {} outside {}..={}", age, min, max)
            }
        }
    }
}

/// Outcome of the eligibility gate for one place
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Eligibility {
    pub reasons: Vec<ExclusionReason>,
}

impl Eligibility {
    pub fn is_eligible(&self) -> bool {
        self.reasons.is_empty()
    }
}

/// Run every hard gate against a place
///
/// Only health and age can exclude. Rules are evaluated independently so the
/// diagnostics list every failing rule.
pub fn check_eligibility(profile: &TravelerProfile, place: &Place) -> Eligibility {
    let reasons = [health_exclusion(profile, place), age_exclusion(profile, place)]
        .into_iter()
        .flatten()
        .collect();

    Eligibility { reasons }
}

#[inline]
pub fn is_eligible(profile: &TravelerProfile, place: &Place) -> bool {
    health_exclusion(profile, place).is_none() && age_exclusion(profile, place).is_none()
}

fn health_exclusion(profile: &TravelerProfile, place: &Place) -> Option<ExclusionReason> {
    let blocked = TermSet::from_raw(&place.suitable_for.health_considerations.not_recommended_for);
    if blocked.is_empty() {
        return None;
    }

    let conditions = profile.health_conditions().overlap(&blocked);
    if conditions.is_empty() {
        None
    } else {
        Some(ExclusionReason::HealthCondition { conditions })
    }
}

// Incomplete or inverted ranges never exclude.
fn age_exclusion(profile: &TravelerProfile, place: &Place) -> Option<ExclusionReason> {
    let range = place.suitable_for.age_range?;
    let (min, max) = range.bounds()?;
    if range.contains(profile.age) {
        None
    } else {
        Some(ExclusionReason::AgeOutOfRange {
            age: profile.age,
            min,
            max,
        })
    }
}
