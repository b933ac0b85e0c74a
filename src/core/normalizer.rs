use crate::core::error::RecommendError;
use crate::models::{normalize_term, Gender, RawAge, TermSet, TravelerProfile, TravelerProfileInput};

pub const MIN_TRAVELER_AGE: u8 = 1;
pub const MAX_TRAVELER_AGE: u8 = 120;

/// Coerce a raw traveler profile into its canonical form
///
/// Age is required and must land in 1..=120 after parsing; fractional ages
/// are truncated. List fields default to empty, entries are trimmed and
/// deduplicated case-insensitively. Climate defaults to "no preference".
pub fn normalize_profile(input: &TravelerProfileInput) -> Result<TravelerProfile, RecommendError> {
    let age = parse_age(input.age.as_ref())?;

    Ok(TravelerProfile {
        age,
        gender: input.gender.as_deref().map(Gender::parse).unwrap_or_default(),
        place_types: term_set(&input.place_types),
        hobbies: term_set(&input.hobbies),
        climate: input.climate.as_deref().map(normalize_term).unwrap_or_default(),
        diseases: term_set(&input.diseases),
        physical_disorders: term_set(&input.physical_disorders),
    })
}

fn term_set(values: &Option<Vec<String>>) -> TermSet {
    TermSet::from_raw(values.iter().flatten())
}

fn parse_age(raw: Option<&RawAge>) -> Result<u8, RecommendError> {
    let value = match raw {
        None => return Err(RecommendError::InvalidProfile("age is required".to_string())),
        Some(RawAge::Number(n)) => *n,
        Some(RawAge::Text(text)) => text.trim().parse::<f64>().map_err(|_| {
            RecommendError::InvalidProfile(format!("age '{}' is not a number", text))
        })?,
    };

    if !value.is_finite() {
        return Err(RecommendError::InvalidProfile("age is not a number".to_string()));
    }

    let whole = value.trunc();
    if whole < f64::from(MIN_TRAVELER_AGE) || whole > f64::from(MAX_TRAVELER_AGE) {
        return Err(RecommendError::InvalidProfile(format!(
            "age {} is outside {}..={}",
            value, MIN_TRAVELER_AGE, MAX_TRAVELER_AGE
        )));
    }

    Ok(whole as u8)
}
