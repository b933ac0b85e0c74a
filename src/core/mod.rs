// Core algorithm exports
pub mod error;
pub mod explanation;
pub mod filters;
pub mod normalizer;
pub mod ranker;
pub mod recommender;
pub mod scoring;

pub use error::RecommendError;
pub use explanation::{build_reasons, ScoreTier, FALLBACK_REASON};
pub use filters::{check_eligibility, is_eligible, Eligibility, ExclusionReason};
pub use normalizer::normalize_profile;
pub use ranker::{rank_places, DEFAULT_MIN_SCORE};
pub use recommender::{recommend, ExcludedPlace, RecommendationResult, Recommender};
pub use scoring::{calculate_place_score, AgeFit, PlaceScore};
