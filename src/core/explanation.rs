use crate::core::scoring::PlaceScore;
use crate::models::MatchDimension;

pub const FALLBACK_REASON: &str = "Recommended based on similar travelers.";

/// Coarse band a score falls into
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScoreTier {
    High,
    Strong,
    Moderate,
}

impl ScoreTier {
    pub fn from_score(score: f64) -> Self {
        if score > 80.0 {
            ScoreTier::High
        } else if score > 60.0 {
            ScoreTier::Strong
        } else {
            ScoreTier::Moderate
        }
    }

    pub fn sentence(self) -> &'static str {
        match self {
            ScoreTier::High => "Highly recommended match.",
            ScoreTier::Strong => "Strong match for your preferences.",
            ScoreTier::Moderate => "Moderate match based on your preferences.",
        }
    }
}

/// Render the reasons shown to the traveler for one place
///
/// Always starts with the tier sentence. Only the place-type dimension has
/// its own sentence; when nothing matched a fallback sentence is appended.
pub fn build_reasons(score: &PlaceScore) -> Vec<String> {
    let mut reasons = vec![ScoreTier::from_score(score.score).sentence().to_string()];

    if score.matched_dimensions.contains(&MatchDimension::PlaceType)
        && !score.matched_place_types.is_empty()
    {
        reasons.push(format!(
            "Matches your preferred place types: {}.",
            score.matched_place_types.join(", ")
        ));
    }

    if score.matched_dimensions.is_empty() {
        reasons.push(FALLBACK_REASON.to_string());
    }

    reasons
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeSet;

    fn place_score(score: f64, dims: &[MatchDimension], types: &[&str]) -> PlaceScore {
        PlaceScore {
            score,
            matched_dimensions: dims.iter().copied().collect::<BTreeSet<_>>(),
            matched_place_types: types.iter().map(|s| s.to_string()).collect(),
            shared_hobbies: vec![],
        }
    }

    #[test]
    fn test_tier_boundaries() {
        assert_eq!(ScoreTier::from_score(80.1), ScoreTier::High);
        assert_eq!(ScoreTier::from_score(80.0), ScoreTier::Strong);
        assert_eq!(ScoreTier::from_score(60.5), ScoreTier::Strong);
        assert_eq!(ScoreTier::from_score(60.0), ScoreTier::Moderate);
        assert_eq!(ScoreTier::from_score(0.0), ScoreTier::Moderate);
    }

    #[test]
    fn test_place_type_sentence() {
        let score = place_score(
            90.0,
            &[MatchDimension::PlaceType, MatchDimension::Hobby],
            &["Nature", "Beach"],
        );

        assert_eq!(
            build_reasons(&score),
            vec![
                "Highly recommended match.".to_string(),
                "Matches your preferred place types: Nature, Beach.".to_string(),
            ]
        );
    }

    #[test]
    fn test_other_dimensions_have_no_sentence() {
        let score = place_score(40.0, &[MatchDimension::Hobby, MatchDimension::AgeFit], &[]);

        assert_eq!(
            build_reasons(&score),
            vec!["Moderate match based on your preferences.".to_string()]
        );
    }

    #[test]
    fn test_fallback_when_nothing_matched() {
        let score = place_score(5.0, &[], &[]);

        assert_eq!(
            build_reasons(&score),
            vec![
                "Moderate match based on your preferences.".to_string(),
                FALLBACK_REASON.to_string(),
            ]
        );
    }
}
