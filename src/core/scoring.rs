use crate::models::{normalize_term, AgeRange, MatchDimension, Place, ScoringWeights, TermSet, TravelerProfile};
use std::collections::BTreeSet;

pub const MAX_SCORE: f64 = 100.0;

/// Score of one place plus the evidence behind it
#[derive(Debug, Clone, PartialEq)]
pub struct PlaceScore {
    pub score: f64,
    pub matched_dimensions: BTreeSet<MatchDimension>,
    /// Overlapping place types, in the traveler's order
    pub matched_place_types: Vec<String>,
    pub shared_hobbies: Vec<String>,
}

/// How a traveler's age relates to a place's age range
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AgeFit {
    /// Well-formed range containing the age
    Within,
    /// Missing or malformed range
    Unconstrained,
    /// Well-formed range not containing the age
    Outside,
}

impl AgeFit {
    pub fn classify(age: u8, range: Option<AgeRange>) -> Self {
        match range {
            Some(range) if range.is_well_formed() => {
                if range.contains(age) {
                    AgeFit::Within
                } else {
                    AgeFit::Outside
                }
            }
            _ => AgeFit::Unconstrained,
        }
    }
}

/// Calculate a place score (0-100) for a traveler
///
/// Additive across four independent dimensions, each capped by its weight:
/// ```text
/// score = place_type * |wanted ∩ offered| / |wanted|
///       + hobby      * |wanted ∩ offered| / |wanted|
///       + climate    (preferred climate accepted by the place)
///       + age_fit    (age within range, age_neutral when range is unusable)
/// ```
/// The sum is clamped to 100 and left unrounded.
pub fn calculate_place_score(
    profile: &TravelerProfile,
    place: &Place,
    weights: &ScoringWeights,
) -> PlaceScore {
    let mut matched_dimensions = BTreeSet::new();

    let offered_types = TermSet::from_raw(&place.place_type);
    let matched_place_types = profile.place_types.overlap(&offered_types);
    let place_type_score =
        overlap_score(matched_place_types.len(), profile.place_types.len(), weights.place_type);
    if place_type_score > 0.0 {
        matched_dimensions.insert(MatchDimension::PlaceType);
    }

    let offered_hobbies = TermSet::from_raw(&place.suitable_for.hobbies);
    let shared_hobbies = profile.hobbies.overlap(&offered_hobbies);
    let hobby_score = overlap_score(shared_hobbies.len(), profile.hobbies.len(), weights.hobby);
    if hobby_score > 0.0 {
        matched_dimensions.insert(MatchDimension::Hobby);
    }

    let climate_score = calculate_climate_score(profile, &place.suitable_for.climate, weights);
    if climate_score > 0.0 {
        matched_dimensions.insert(MatchDimension::Climate);
    }

    let age_fit = AgeFit::classify(profile.age, place.suitable_for.age_range);
    let age_score = calculate_age_score(age_fit, weights);
    // the neutral default is not a match
    if age_fit == AgeFit::Within && age_score > 0.0 {
        matched_dimensions.insert(MatchDimension::AgeFit);
    }

    let total = place_type_score + hobby_score + climate_score + age_score;

    PlaceScore {
        score: sanitize(total),
        matched_dimensions,
        matched_place_types,
        shared_hobbies,
    }
}

/// Share of the traveler's wishes a place covers, scaled to `cap`
///
/// No wishes means no credit and no penalty.
#[inline]
fn overlap_score(matches: usize, wanted: usize, cap: f64) -> f64 {
    if wanted == 0 {
        return 0.0;
    }
    cap * matches as f64 / wanted as f64
}

#[inline]
fn calculate_climate_score(profile: &TravelerProfile, accepted: &[String], weights: &ScoringWeights) -> f64 {
    if !profile.has_climate_preference() {
        return 0.0;
    }

    let preferred = normalize_term(&profile.climate);
    if accepted.iter().any(|c| normalize_term(c) == preferred) {
        weights.climate
    } else {
        0.0
    }
}

#[inline]
fn calculate_age_score(fit: AgeFit, weights: &ScoringWeights) -> f64 {
    match fit {
        AgeFit::Within => weights.age_fit,
        AgeFit::Unconstrained => weights.age_neutral,
        AgeFit::Outside => 0.0,
    }
}

#[inline]
fn sanitize(score: f64) -> f64 {
    if !score.is_finite() {
        return 0.0;
    }
    score.clamp(0.0, MAX_SCORE)
}
