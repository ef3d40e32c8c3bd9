//! Geocoding API response types and the normalized output shape.
//!
//! The API wraps every response in a `{"status": "OK", ...}` envelope;
//! `results` and `error_message` are only present on some responses, so
//! both default to empty when missing.

use serde::{Deserialize, Serialize};

/// Envelope status for a successful request.
pub const STATUS_OK: &str = "OK";

/// Top-level envelope for geocoding API responses.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ApiResponse {
    pub status: String,
    #[serde(default)]
    pub results: Vec<GeocodeResult>,
    #[serde(default)]
    pub error_message: Option<String>,
}

/// A single geocoding match.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct GeocodeResult {
    #[serde(default)]
    pub address_components: Vec<AddressComponent>,
    pub geometry: Geometry,
    #[serde(default)]
    pub formatted_address: Option<String>,
    #[serde(default)]
    pub place_id: Option<String>,
    #[serde(default)]
    pub types: Vec<String>,
    #[serde(default)]
    pub partial_match: bool,
}

/// One tagged fragment of a structured address.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct AddressComponent {
    pub long_name: String,
    pub short_name: String,
    #[serde(default)]
    pub types: Vec<String>,
}

impl AddressComponent {
    #[must_use]
    pub fn has_type(&self, tag: &str) -> bool {
        self.types.iter().any(|t| t == tag)
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Geometry {
    pub location: LatLng,
    /// e.g. `"ROOFTOP"`, `"APPROXIMATE"`.
    #[serde(default)]
    pub location_type: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct LatLng {
    pub lat: f64,
    pub lng: f64,
}

// ---------------------------------------------------------------------------
// Normalized output
// ---------------------------------------------------------------------------

/// Postal address extracted from a geocoding result. Missing parts are `None`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostalAddress {
    pub street_address: Option<String>,
    pub address_locality: Option<String>,
    pub address_region: Option<String>,
    pub postal_code: Option<String>,
    pub address_country: Option<String>,
}

/// The normalized address and position of the first geocoding result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeoCoordinates {
    pub address: PostalAddress,
    pub latitude: f64,
    pub longitude: f64,
}
