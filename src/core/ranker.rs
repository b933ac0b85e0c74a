use crate::models::ScoredPlace;

pub const DEFAULT_MIN_SCORE: f64 = 10.0;

/// Drop places at or below the cutoff and sort the rest by score, descending
///
/// The sort is stable, so places tied on score keep their input order.
pub fn rank_places(mut places: Vec<ScoredPlace>, min_score: f64) -> Vec<ScoredPlace> {
    places.retain(|p| p.score > min_score);

    places.sort_by(|a, b| {
        b.score
            .partial_cmp(&a.score)
            .unwrap_or(std::cmp::Ordering::Equal)
    });

    places
}
