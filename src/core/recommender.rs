use crate::core::{
    error::RecommendError,
    explanation::build_reasons,
    filters::{check_eligibility, ExclusionReason},
    normalizer::normalize_profile,
    ranker::{rank_places, DEFAULT_MIN_SCORE},
    scoring::calculate_place_score,
};
use crate::models::{Place, ScoredPlace, ScoringWeights, TravelerProfile, TravelerProfileInput};
use serde::Serialize;

/// Place removed by the eligibility gate, kept for diagnostics
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExcludedPlace {
    pub id: String,
    pub name: String,
    pub reasons: Vec<ExclusionReason>,
}

/// Result of the recommendation process
#[derive(Debug)]
pub struct RecommendationResult {
    pub profile: TravelerProfile,
    pub places: Vec<ScoredPlace>,
    pub excluded: Vec<ExcludedPlace>,
    pub total_candidates: usize,
}

/// Recommendation orchestrator - runs the place recommendation pipeline
///
/// # Pipeline Stages
/// 1. Profile normalization
/// 2. Eligibility gate (health, age)
/// 3. Scoring
/// 4. Explanation
/// 5. Cutoff and ranking
#[derive(Debug, Clone)]
pub struct Recommender {
    weights: ScoringWeights,
    min_score: f64,
}

impl Recommender {
    pub fn new(weights: ScoringWeights, min_score: f64) -> Self {
        let min_score = if min_score.is_finite() { min_score } else { DEFAULT_MIN_SCORE };
        Self { weights, min_score }
    }

    pub fn with_defaults() -> Self {
        Self {
            weights: ScoringWeights::default(),
            min_score: DEFAULT_MIN_SCORE,
        }
    }

    pub fn weights(&self) -> &ScoringWeights {
        &self.weights
    }

    pub fn min_score(&self) -> f64 {
        self.min_score
    }

    /// Recommend places from a package for a traveler
    ///
    /// # Arguments
    /// * `input` - The traveler profile as submitted
    /// * `candidates` - The places of the package
    /// * `min_score` - Cutoff override; `None` or a non-finite value uses the configured cutoff
    ///
    /// # Returns
    /// Ranked, explained places, or `InvalidProfile` when the profile is unusable.
    /// Malformed places never fail the batch.
    pub fn recommend(
        &self,
        input: &TravelerProfileInput,
        candidates: &[Place],
        min_score: Option<f64>,
    ) -> Result<RecommendationResult, RecommendError> {
        let profile = normalize_profile(input)?;
        let min_score = min_score.filter(|s| s.is_finite()).unwrap_or(self.min_score);

        let mut excluded = Vec::new();
        let mut scored = Vec::with_capacity(candidates.len());

        for place in candidates {
            let eligibility = check_eligibility(&profile, place);
            if !eligibility.is_eligible() {
                tracing::debug!(
                    "Excluding place {} ({}): {}",
                    place.id,
                    place.name,
                    eligibility
                        .reasons
                        .iter()
                        .map(ToString::to_string)
                        .collect::<Vec<_>>()
                        .join("; ")
                );
                excluded.push(ExcludedPlace {
                    id: place.id.clone(),
                    name: place.name.clone(),
                    reasons: eligibility.reasons,
                });
                continue;
            }

            let place_score = calculate_place_score(&profile, place, &self.weights);
            let reasons = build_reasons(&place_score);

            scored.push(ScoredPlace {
                place: place.clone(),
                score: place_score.score,
                matched_dimensions: place_score.matched_dimensions,
                reasons,
            });
        }

        let places = rank_places(scored, min_score);

        tracing::debug!(
            "Recommended {} of {} places ({} excluded, cutoff {})",
            places.len(),
            candidates.len(),
            excluded.len(),
            min_score
        );

        Ok(RecommendationResult {
            profile,
            places,
            excluded,
            total_candidates: candidates.len(),
        })
    }
}

impl Default for Recommender {
    fn default() -> Self {
        Self::with_defaults()
    }
}

/// Rank and explain `candidates` for a traveler using the default weights
pub fn recommend(
    profile: &TravelerProfileInput,
    candidates: &[Place],
    min_score: f64,
) -> Result<Vec<ScoredPlace>, RecommendError> {
    Recommender::with_defaults()
        .recommend(profile, candidates, Some(min_score))
        .map(|result| result.places)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{AgeRange, RawAge, Suitability};

    fn create_candidate(id: &str, place_type: &[&str], age_range: Option<AgeRange>, warnings: &[&str]) -> Place {
        let mut suitable_for = Suitability {
            age_range,
            ..Default::default()
        };
        suitable_for.health_considerations.not_recommended_for =
            warnings.iter().map(|s| s.to_string()).collect();

        Place {
            id: id.to_string(),
            name: format!("Place {}", id),
            place_type: place_type.iter().map(|s| s.to_string()).collect(),
            suitable_for,
            ..Default::default()
        }
    }

    fn create_profile(age: f64, place_types: &[&str], diseases: &[&str]) -> TravelerProfileInput {
        TravelerProfileInput {
            age: Some(RawAge::Number(age)),
            place_types: Some(place_types.iter().map(|s| s.to_string()).collect()),
            diseases: Some(diseases.iter().map(|s| s.to_string()).collect()),
            ..Default::default()
        }
    }

    #[test]
    fn test_recommend_basic() {
        let recommender = Recommender::with_defaults();
        let profile = create_profile(25.0, &["Beach"], &["Asthma"]);
        let open = Some(AgeRange::new(0, 100));

        let candidates = vec![
            create_candidate("1", &["Beach"], open, &[]),             // Match
            create_candidate("2", &["Beach"], open, &["Asthma"]),     // Health gate
            create_candidate("3", &["Beach"], Some(AgeRange::new(40, 80)), &[]), // Too young
        ];

        let result = recommender.recommend(&profile, &candidates, None).unwrap();

        assert_eq!(result.places.len(), 1);
        assert_eq!(result.places[0].place.id, "1");
        assert_eq!(result.excluded.len(), 2);
        assert_eq!(result.total_candidates, 3);
    }

    #[test]
    fn test_invalid_profile_fails_whole_request() {
        let recommender = Recommender::with_defaults();
        let profile = TravelerProfileInput::default();
        let candidates = vec![create_candidate("1", &["Beach"], None, &[])];

        let result = recommender.recommend(&profile, &candidates, None);

        assert!(matches!(result, Err(RecommendError::InvalidProfile(_))));
    }

    #[test]
    fn test_min_score_override() {
        let recommender = Recommender::with_defaults();
        let profile = create_profile(25.0, &["Beach"], &[]);
        let candidates = vec![create_candidate("1", &["Beach"], Some(AgeRange::new(0, 100)), &[])];

        let strict = recommender.recommend(&profile, &candidates, Some(50.0)).unwrap();
        assert!(strict.places.is_empty());

        let loose = recommender.recommend(&profile, &candidates, Some(f64::NAN)).unwrap();
        assert_eq!(loose.places.len(), 1);
    }

    #[test]
    fn test_non_finite_configured_cutoff_uses_default() {
        let recommender = Recommender::new(ScoringWeights::default(), f64::INFINITY);
        assert_eq!(recommender.min_score(), DEFAULT_MIN_SCORE);
    }

    #[test]
    fn test_free_function_matches_recommender() {
        let profile = create_profile(30.0, &["Nature", "Beach"], &[]);
        let candidates = vec![
            create_candidate("1", &["Beach"], None, &[]),
            create_candidate("2", &["Nature", "Beach"], Some(AgeRange::new(10, 70)), &[]),
        ];

        let places = recommend(&profile, &candidates, DEFAULT_MIN_SCORE).unwrap();
        let result = Recommender::default().recommend(&profile, &candidates, None).unwrap();

        assert_eq!(places, result.places);
        assert_eq!(places[0].place.id, "2");
    }
}
