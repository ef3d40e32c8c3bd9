//! Normalization of geocoding API responses into [`GeoCoordinates`].

use crate::error::GeocodeError;
use crate::types::{
    AddressComponent, ApiResponse, GeoCoordinates, GeocodeResult, PostalAddress, STATUS_OK,
};

/// Countries where the street number follows the route name (`"Via Roma 25"`).
const STREET_NUMBER_AFTER_ROUTE_COUNTRIES: &[&str] = &["CH", "ES", "IT"];

/// Outcome of reading the response envelope.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Envelope {
    pub ok: bool,
    pub status: String,
    /// `"{status}"` or `"{status}: {error_message}"`; `None` when `ok`.
    pub error_info: Option<String>,
}

/// A parsed geocoding API response. The envelope is never modified.
#[derive(Debug, Clone, PartialEq)]
pub struct GeocodingResponse {
    raw: ApiResponse,
}

impl GeocodingResponse {
    #[must_use]
    pub fn new(raw: ApiResponse) -> Self {
        Self { raw }
    }

    /// Parses a response body.
    ///
    /// # Errors
    ///
    /// Returns [`GeocodeError::Deserialize`] if `body` is not JSON or does not
    /// match the envelope shape.
    pub fn from_json(body: &str, context: &str) -> Result<Self, GeocodeError> {
        serde_json::from_str::<ApiResponse>(body)
            .map(Self::new)
            .map_err(|e| GeocodeError::Deserialize {
                context: context.to_string(),
                source: e,
            })
    }

    #[must_use]
    pub fn raw(&self) -> &ApiResponse {
        &self.raw
    }

    #[must_use]
    pub fn status(&self) -> &str {
        &self.raw.status
    }

    #[must_use]
    pub fn was_successful(&self) -> bool {
        self.raw.status == STATUS_OK
    }

    /// Status plus the API's error message, if any. `None` on success.
    #[must_use]
    pub fn error_info(&self) -> Option<String> {
        if self.was_successful() {
            return None;
        }

        let info = match self.raw.error_message.as_deref() {
            Some(message) if !message.is_empty() => format!("{}: {message}", self.raw.status),
            _ => self.raw.status.clone(),
        };
        Some(info)
    }

    #[must_use]
    pub fn envelope(&self) -> Envelope {
        Envelope {
            ok: self.was_successful(),
            status: self.raw.status.clone(),
            error_info: self.error_info(),
        }
    }

    /// Normalizes the first result; `None` when there are no results.
    #[must_use]
    pub fn first_geo_coordinates(&self) -> Option<GeoCoordinates> {
        self.raw.results.first().map(normalize_result)
    }
}

/// First component whose type tags contain `tag`, in component order.
#[must_use]
pub fn first_matching_component<'a>(
    result: &'a GeocodeResult,
    tag: &str,
) -> Option<&'a AddressComponent> {
    result.address_components.iter().find(|c| c.has_type(tag))
}

/// Extracts the postal address and location from one geocoding result.
#[must_use]
pub fn normalize_result(result: &GeocodeResult) -> GeoCoordinates {
    let address_country =
        first_matching_component(result, "country").map(|c| c.short_name.clone());

    let street_address = first_matching_component(result, "route").map(|route| {
        match first_matching_component(result, "street_number") {
            Some(number) => join_street(
                &route.long_name,
                &number.long_name,
                address_country.as_deref(),
            ),
            None => route.long_name.clone(),
        }
    });

    let address_locality = first_matching_component(result, "postal_town")
        .or_else(|| first_matching_component(result, "locality"))
        .map(|c| c.long_name.clone());

    let address_region = first_matching_component(result, "administrative_area_level_2")
        .map(|c| c.long_name.clone());
    let postal_code = first_matching_component(result, "postal_code").map(|c| c.long_name.clone());

    GeoCoordinates {
        address: PostalAddress {
            street_address,
            address_locality,
            address_region,
            postal_code,
            address_country,
        },
        latitude: result.geometry.location.lat,
        longitude: result.geometry.location.lng,
    }
}

fn join_street(route: &str, number: &str, country: Option<&str>) -> String {
    let number_after_route =
        country.is_some_and(|c| STREET_NUMBER_AFTER_ROUTE_COUNTRIES.contains(&c));
    if number_after_route {
        format!("{route} {number}")
    } else {
        format!("{number} {route}")
    }
}

#[cfg(test)]
#[path = "normalize_test.rs"]
mod tests;
