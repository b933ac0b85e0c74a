use chrono::{DateTime, Utc};
use serde::ser::SerializeSeq;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;
use std::collections::BTreeSet;

/// Canonical matching key for a free-text term: trimmed and lower-cased
#[inline]
pub fn normalize_term(raw: &str) -> String {
    raw.trim().to_lowercase()
}

/// Age as sent by clients, either a JSON number or a numeric string
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawAge {
    Number(f64),
    Text(String),
}

/// Traveler profile exactly as submitted, before normalization
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TravelerProfileInput {
    #[serde(default)]
    pub age: Option<RawAge>,
    #[serde(default)]
    pub gender: Option<String>,
    #[serde(default, alias = "placeType")]
    pub place_types: Option<Vec<String>>,
    #[serde(default, alias = "hobby")]
    pub hobbies: Option<Vec<String>>,
    #[serde(default)]
    pub climate: Option<String>,
    #[serde(default)]
    pub diseases: Option<Vec<String>>,
    #[serde(default)]
    pub physical_disorders: Option<Vec<String>>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Male,
    Female,
    Other,
    #[default]
    Unspecified,
}

impl Gender {
    /// Informational only; anything unrecognized is `Unspecified`
    pub fn parse(raw: &str) -> Self {
        match normalize_term(raw).as_str() {
            "male" => Gender::Male,
            "female" => Gender::Female,
            "other" => Gender::Other,
            _ => Gender::Unspecified,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct Term {
    key: String,
    label: String,
}

/// Ordered set of case-insensitive terms.
///
/// Keeps the first spelling seen for each term as its display label and
/// preserves insertion order, so explanations can list overlaps in the
/// order the traveler gave them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TermSet {
    terms: Vec<Term>,
}

impl TermSet {
    pub fn from_raw<I, S>(raw: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut set = TermSet::default();
        for value in raw {
            set.insert(value.as_ref());
        }
        set
    }

    fn insert(&mut self, raw: &str) {
        let label = raw.trim();
        if label.is_empty() {
            return;
        }
        let key = normalize_term(label);
        if !self.terms.iter().any(|t| t.key == key) {
            self.terms.push(Term {
                key,
                label: label.to_string(),
            });
        }
    }

    pub fn len(&self) -> usize {
        self.terms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    /// Case-insensitive membership test
    pub fn contains(&self, value: &str) -> bool {
        let key = normalize_term(value);
        self.terms.iter().any(|t| t.key == key)
    }

    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.terms.iter().map(|t| t.label.as_str())
    }

    /// Canonical lower-cased forms, in insertion order
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.terms.iter().map(|t| t.key.as_str())
    }

    /// Labels of this set that also appear in `other`, in this set's order
    pub fn overlap(&self, other: &TermSet) -> Vec<String> {
        self.terms
            .iter()
            .filter(|t| other.terms.iter().any(|o| o.key == t.key))
            .map(|t| t.label.clone())
            .collect()
    }

    pub fn union(&self, other: &TermSet) -> TermSet {
        let mut merged = self.clone();
        for term in &other.terms {
            merged.insert(&term.label);
        }
        merged
    }
}

impl Serialize for TermSet {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut seq = serializer.serialize_seq(Some(self.terms.len()))?;
        for key in self.keys() {
            seq.serialize_element(key)?;
        }
        seq.end()
    }
}

/// Canonical traveler profile produced by the normalizer
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TravelerProfile {
    pub age: u8,
    pub gender: Gender,
    pub place_types: TermSet,
    pub hobbies: TermSet,
    /// Lower-cased; empty when the traveler has no climate preference
    pub climate: String,
    pub diseases: TermSet,
    pub physical_disorders: TermSet,
}

impl TravelerProfile {
    /// Every declared condition, diseases and physical disorders alike
    pub fn health_conditions(&self) -> TermSet {
        self.diseases.union(&self.physical_disorders)
    }

    pub fn has_climate_preference(&self) -> bool {
        !self.climate.is_empty()
    }
}

/// Inclusive age bounds a place is suitable for.
///
/// Stored as given: a bound that is missing, non-numeric or fractional is
/// kept or dropped rather than failing the whole document. Only a range
/// with both bounds and `min <= max` constrains anything.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct AgeRange {
    #[serde(
        default,
        deserialize_with = "lenient_bound",
        serialize_with = "serialize_bound",
        skip_serializing_if = "Option::is_none"
    )]
    pub min: Option<f64>,
    #[serde(
        default,
        deserialize_with = "lenient_bound",
        serialize_with = "serialize_bound",
        skip_serializing_if = "Option::is_none"
    )]
    pub max: Option<f64>,
}

impl AgeRange {
    pub fn new(min: i64, max: i64) -> Self {
        Self {
            min: Some(min as f64),
            max: Some(max as f64),
        }
    }

    /// Both bounds, when present and ordered
    pub fn bounds(&self) -> Option<(f64, f64)> {
        match (self.min, self.max) {
            (Some(min), Some(max)) if min <= max => Some((min, max)),
            _ => None,
        }
    }

    pub fn is_well_formed(&self) -> bool {
        self.bounds().is_some()
    }

    pub fn contains(&self, age: u8) -> bool {
        let age = f64::from(age);
        self.bounds().map_or(false, |(min, max)| age >= min && age <= max)
    }
}

fn bound_from_value(value: &Value) -> Option<f64> {
    let bound = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    bound.filter(|b| b.is_finite())
}

fn lenient_bound<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<f64>, D::Error> {
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.as_ref().and_then(bound_from_value))
}

fn serialize_bound<S: Serializer>(bound: &Option<f64>, serializer: S) -> Result<S::Ok, S::Error> {
    match bound {
        Some(b) if b.fract() == 0.0 && b.abs() < i64::MAX as f64 => serializer.serialize_i64(*b as i64),
        Some(b) => serializer.serialize_f64(*b),
        None => serializer.serialize_none(),
    }
}

/// Anything other than an object reads as "no range"
fn lenient_age_range<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<AgeRange>, D::Error> {
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::Object(map)) => Some(AgeRange {
            min: map.get("min").and_then(bound_from_value),
            max: map.get("max").and_then(bound_from_value),
        }),
        _ => None,
    })
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthConsiderations {
    #[serde(default)]
    pub not_recommended_for: Vec<String>,
    #[serde(default)]
    pub special_facilities: Vec<String>,
}

/// Suitability metadata attached to a place
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Suitability {
    #[serde(
        default,
        deserialize_with = "lenient_age_range",
        skip_serializing_if = "Option::is_none"
    )]
    pub age_range: Option<AgeRange>,
    #[serde(default)]
    pub hobbies: Vec<String>,
    #[serde(default)]
    pub climate: Vec<String>,
    #[serde(default)]
    pub health_considerations: HealthConsiderations,
}

/// GeoJSON point, `[longitude, latitude]`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    #[serde(rename = "type", default = "default_point_type")]
    pub kind: String,
    #[serde(default)]
    pub coordinates: Vec<f64>,
}

fn default_point_type() -> String {
    "Point".to_string()
}

/// A point of interest inside a tour package
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Place {
    #[serde(default, alias = "_id")]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub images: Vec<String>,
    #[serde(default)]
    pub place_type: Vec<String>,
    #[serde(default)]
    pub suitable_for: Suitability,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<GeoPoint>,
}

/// Tour package document as stored in the catalog
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TourPackage {
    #[serde(default, alias = "$id", alias = "_id")]
    pub id: String,
    #[serde(alias = "package_id")]
    pub package_id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub duration: u32,
    #[serde(default)]
    pub district: String,
    #[serde(default)]
    pub package_image: String,
    #[serde(default)]
    pub places: Vec<Place>,
    #[serde(default, alias = "$createdAt")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, alias = "$updatedAt")]
    pub updated_at: Option<DateTime<Utc>>,
}

/// Scoring factor that contributed to a place's score
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum MatchDimension {
    PlaceType,
    Hobby,
    Climate,
    AgeFit,
}

/// Place with its recommendation score and explanation
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoredPlace {
    #[serde(flatten)]
    pub place: Place,
    pub score: f64,
    pub matched_dimensions: BTreeSet<MatchDimension>,
    pub reasons: Vec<String>,
}

/// Per-dimension point caps
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoringWeights {
    pub place_type: f64,
    pub hobby: f64,
    pub climate: f64,
    pub age_fit: f64,
    /// Awarded when a place's age range is malformed or missing
    pub age_neutral: f64,
}

impl Default for ScoringWeights {
    fn default() -> Self {
        Self {
            place_type: 40.0,
            hobby: 30.0,
            climate: 20.0,
            age_fit: 10.0,
            age_neutral: 5.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_term_set_dedupes_case_insensitively() {
        let set = TermSet::from_raw(["Beach", " beach ", "", "Historical", "  "]);

        assert_eq!(set.len(), 2);
        assert_eq!(set.labels().collect::<Vec<_>>(), vec!["Beach", "Historical"]);
        assert!(set.contains("BEACH"));
        assert!(!set.contains("Nature"));
    }

    #[test]
    fn test_term_set_overlap_keeps_own_order() {
        let traveler = TermSet::from_raw(["Nature", "Beach", "Religious"]);
        let place = TermSet::from_raw(["religious", "beach"]);

        assert_eq!(traveler.overlap(&place), vec!["Beach", "Religious"]);
    }

    #[test]
    fn test_term_set_serializes_canonical_keys() {
        let set = TermSet::from_raw(["Hiking", " SURFING "]);
        let json = serde_json::to_value(&set).unwrap();
        assert_eq!(json, serde_json::json!(["hiking", "surfing"]));
    }

    #[test]
    fn test_age_range() {
        let range = AgeRange::new(18, 60);
        assert!(range.is_well_formed());
        assert!(range.contains(18));
        assert!(range.contains(60));
        assert!(!range.contains(10));

        assert!(!AgeRange::new(70, 20).is_well_formed());
    }

    #[test]
    fn test_place_deserializes_from_document() {
        let place: Place = serde_json::from_value(serde_json::json!({
            "_id": "p1",
            "name": "Mirissa Beach",
            "placeType": ["Beach"],
            "suitableFor": {
                "ageRange": { "min": 10, "max": 70 },
                "hobbies": ["Surfing"],
                "healthConsiderations": { "notRecommendedFor": ["Asthma"] }
            }
        }))
        .unwrap();

        assert_eq!(place.id, "p1");
        assert_eq!(place.suitable_for.age_range, Some(AgeRange::new(10, 70)));
        assert!(place.suitable_for.climate.is_empty());
        assert_eq!(place.suitable_for.health_considerations.not_recommended_for, vec!["Asthma"]);
    }

    #[test]
    fn test_incomplete_age_range_is_kept_unconstrained() {
        let place: Place = serde_json::from_value(serde_json::json!({
            "name": "Knuckles Range",
            "suitableFor": { "ageRange": { "min": 18 } }
        }))
        .unwrap();

        let range = place.suitable_for.age_range.unwrap();
        assert_eq!(range.min, Some(18.0));
        assert_eq!(range.max, None);
        assert!(!range.is_well_formed());
        assert!(!range.contains(30));
    }

    #[test]
    fn test_age_range_accepts_floats_and_strings() {
        let range: AgeRange =
            serde_json::from_value(serde_json::json!({ "min": 18.0, "max": "60.5" })).unwrap();
        assert_eq!(range.bounds(), Some((18.0, 60.5)));
        assert!(range.contains(60));
        assert!(!range.contains(61));

        let range: AgeRange = serde_json::from_value(serde_json::json!({ "min": null, "max": [1] })).unwrap();
        assert_eq!(range, AgeRange::default());
    }

    #[test]
    fn test_non_object_age_range_reads_as_absent() {
        let suitability: Suitability =
            serde_json::from_value(serde_json::json!({ "ageRange": "18-60" })).unwrap();
        assert!(suitability.age_range.is_none());
    }

    #[test]
    fn test_age_range_serializes_as_stored() {
        let json = serde_json::to_value(AgeRange::new(10, 70)).unwrap();
        assert_eq!(json, serde_json::json!({ "min": 10, "max": 70 }));

        let partial = AgeRange { min: Some(12.5), max: None };
        assert_eq!(serde_json::to_value(partial).unwrap(), serde_json::json!({ "min": 12.5 }));
    }

    #[test]
    fn test_package_with_loose_age_data_parses() {
        let package: TourPackage = serde_json::from_value(serde_json::json!({
            "$id": "doc-9",
            "packageId": "KNK-01",
            "name": "Knuckles Trek",
            "places": [
                { "id": "a", "suitableFor": { "ageRange": { "min": 18 } } },
                { "id": "b", "suitableFor": { "ageRange": { "min": 18.0, "max": 60.0 } } }
            ]
        }))
        .unwrap();

        assert_eq!(package.places.len(), 2);
        assert!(!package.places[0].suitable_for.age_range.unwrap().is_well_formed());
        assert!(package.places[1].suitable_for.age_range.unwrap().is_well_formed());
    }

    #[test]
    fn test_profile_input_accepts_source_field_names() {
        let input: TravelerProfileInput = serde_json::from_value(serde_json::json!({
            "age": "25",
            "placeType": ["Beach"],
            "hobby": ["Surfing"],
            "physicalDisorders": ["Back Pain"]
        }))
        .unwrap();

        assert_eq!(input.age, Some(RawAge::Text("25".to_string())));
        assert_eq!(input.place_types, Some(vec!["Beach".to_string()]));
        assert_eq!(input.hobbies, Some(vec!["Surfing".to_string()]));
        assert_eq!(input.physical_disorders, Some(vec!["Back Pain".to_string()]));
        assert!(input.climate.is_none());
    }

    #[test]
    fn test_gender_parse() {
        assert_eq!(Gender::parse(" Female "), Gender::Female);
        assert_eq!(Gender::parse("other"), Gender::Other);
        assert_eq!(Gender::parse("n/a"), Gender::Unspecified);
    }
}
