use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use crate::models::domain::{MatchDimension, ScoredPlace, TravelerProfile};

/// Package summary embedded in a customization response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PackageSummary {
    pub id: String,
    pub name: String,
}

/// One recommended place as presented to the traveler
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlaceRecommendation {
    pub id: String,
    pub name: String,
    /// Score formatted to one decimal place
    pub score: String,
    pub matched_dimensions: BTreeSet<MatchDimension>,
    pub reasons: Vec<String>,
    pub why_recommended: String,
    pub images: Vec<String>,
}

impl From<ScoredPlace> for PlaceRecommendation {
    fn from(scored: ScoredPlace) -> Self {
        Self {
            id: scored.place.id,
            name: scored.place.name,
            score: format!("{:.1}", scored.score),
            why_recommended: scored.reasons.join(" "),
            matched_dimensions: scored.matched_dimensions,
            reasons: scored.reasons,
            images: scored.place.images,
        }
    }
}

/// Response for the package customization endpoint
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomizePackageResponse {
    pub package: PackageSummary,
    pub user_preferences: TravelerProfile,
    pub recommendations: Vec<PlaceRecommendation>,
    pub algorithm: String,
    pub model_version: String,
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub timestamp: chrono::DateTime<chrono::Utc>,
}

/// Error response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
    pub status_code: u16,
}

/// Plain acknowledgement, e.g. after a delete
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}
