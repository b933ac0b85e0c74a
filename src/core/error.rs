use thiserror::Error;

/// The only way a recommendation request can fail
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RecommendError {
    #[error("Invalid profile: {0}")]
    InvalidProfile(String),
}
