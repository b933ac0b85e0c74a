// Model exports
pub mod domain;
pub mod requests;
pub mod responses;

pub use domain::{
    normalize_term, AgeRange, Gender, GeoPoint, HealthConsiderations, MatchDimension, Place, RawAge,
    ScoredPlace, ScoringWeights, Suitability, TermSet, TourPackage, TravelerProfile,
    TravelerProfileInput,
};
pub use requests::{CustomizePackageRequest, PackageRequest, PlaceRequest};
pub use responses::{
    CustomizePackageResponse, ErrorResponse, HealthResponse, MessageResponse, PackageSummary,
    PlaceRecommendation,
};
