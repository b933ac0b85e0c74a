use crate::models::domain::{GeoPoint, Place, Suitability, TourPackage, TravelerProfileInput};
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Request body to create or replace a tour package
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct PackageRequest {
    #[validate(length(min = 1, message = "Package ID is required."))]
    #[serde(default, alias = "package_id")]
    pub package_id: String,
    #[validate(length(min = 1, message = "Package Name is required."))]
    #[serde(default)]
    pub name: String,
    #[validate(length(min = 1, message = "Description is required."))]
    #[serde(default)]
    pub description: String,
    #[validate(range(min = 1, message = "Duration must be a positive number of days."))]
    #[serde(default)]
    pub duration: u32,
    #[validate(length(min = 1, message = "District is required."))]
    #[serde(default)]
    pub district: String,
    #[validate(length(min = 1, message = "Package Image URL is required."))]
    #[serde(default)]
    pub package_image: String,
    #[validate(nested)]
    #[serde(default)]
    pub places: Vec<PlaceRequest>,
}

/// A place inside a package request.
///
/// Suitability metadata is stored as given; malformed age ranges are
/// tolerated and handled when recommending.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct PlaceRequest {
    #[serde(default, alias = "_id")]
    pub id: Option<String>,
    #[validate(length(min = 1, message = "Place name is required."))]
    #[serde(default)]
    pub name: String,
    #[validate(length(min = 1, message = "Place description is required."))]
    #[serde(default)]
    pub description: String,
    #[validate(length(min = 1, message = "At least one image is required."))]
    #[serde(default)]
    pub images: Vec<String>,
    #[validate(length(min = 1, message = "At least one place type is required."))]
    #[serde(default)]
    pub place_type: Vec<String>,
    #[serde(default)]
    pub suitable_for: Suitability,
    #[serde(default)]
    pub location: Option<GeoPoint>,
}

impl PackageRequest {
    /// Build the package document, assigning ids to new places
    pub fn into_package(self, id: String) -> TourPackage {
        TourPackage {
            id,
            package_id: self.package_id.trim().to_string(),
            name: self.name,
            description: self.description,
            duration: self.duration,
            district: self.district,
            package_image: self.package_image,
            places: self.places.into_iter().map(PlaceRequest::into_place).collect(),
            created_at: None,
            updated_at: None,
        }
    }
}

impl PlaceRequest {
    pub fn into_place(self) -> Place {
        let id = self
            .id
            .filter(|id| !id.trim().is_empty())
            .unwrap_or_else(|| uuid::Uuid::new_v4().to_string());

        Place {
            id,
            name: self.name,
            description: self.description,
            images: self.images,
            place_type: self.place_type,
            suitable_for: self.suitable_for,
            location: self.location,
        }
    }
}

/// Request body for the package customization endpoint
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CustomizePackageRequest {
    #[serde(flatten)]
    pub profile: TravelerProfileInput,
    #[validate(range(min = 0.0, max = 100.0, message = "minScore must be between 0 and 100."))]
    #[serde(default)]
    pub min_score: Option<f64>,
}
