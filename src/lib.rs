//! Tour Match - tour package catalog with personalized place recommendations
//!
//! The core of this library is a deterministic recommendation engine: it
//! normalizes a traveler profile, gates a package's places on health and age,
//! scores the survivors across place type, hobby, climate and age fit,
//! explains each score and returns the places ranked above a cutoff.

pub mod config;
pub mod core;
pub mod models;
pub mod routes;
pub mod services;

// Re-export commonly used types
pub use crate::core::{recommend, RecommendError, Recommender};
pub use crate::models::{Place, ScoredPlace, ScoringWeights, TourPackage, TravelerProfile, TravelerProfileInput};
