//! Geocoding facade.
//!
//! Composes [`RequestBuilder`], a [`Transport`] and [`GeocodingResponse`]
//! into the convenience lookups. Country codes are validated before any
//! request is made; no call is retried.

use std::fmt::Display;
use std::sync::Arc;

use crate::country::{Country, RegionNames, StaticRegionNames, DEFAULT_NAME_LANGUAGE};
use crate::error::GeocodeError;
use crate::normalize::GeocodingResponse;
use crate::request::{GeocodeParameters, RegionBias, RequestBuilder};
use crate::transport::{ReqwestTransport, Transport};
use crate::types::GeoCoordinates;

pub const DEFAULT_BASE_URL: &str = "https://maps.googleapis.com/maps/api/geocode/json";

const DEFAULT_USER_AGENT: &str = "geocoding-client/0.1";

/// Client for the geocoding API.
///
/// Use [`Geocoder::new`] for production, [`Geocoder::with_base_url`] to point
/// at a mock server in tests, or [`Geocoder::with_transport`] to supply a
/// custom HTTP collaborator.
pub struct Geocoder<T = ReqwestTransport> {
    transport: T,
    requests: RequestBuilder,
    region_names: Arc<dyn RegionNames + Send + Sync>,
    country_name_language: String,
}

impl Geocoder<ReqwestTransport> {
    /// Creates a client pointed at the production endpoint.
    ///
    /// # Errors
    ///
    /// Returns [`GeocodeError::Transport`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn new(api_key: &str, timeout_secs: u64) -> Result<Self, GeocodeError> {
        Self::with_base_url(api_key, timeout_secs, DEFAULT_BASE_URL)
    }

    /// Creates a client with a custom endpoint (for testing with wiremock).
    ///
    /// # Errors
    ///
    /// Returns [`GeocodeError::Transport`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn with_base_url(
        api_key: &str,
        timeout_secs: u64,
        base_url: &str,
    ) -> Result<Self, GeocodeError> {
        let transport = ReqwestTransport::new(timeout_secs, DEFAULT_USER_AGENT)?;
        Ok(Self::with_transport(
            transport,
            RequestBuilder::new(base_url, api_key),
        ))
    }
}

impl<T: Transport> Geocoder<T> {
    #[must_use]
    pub fn with_transport(transport: T, requests: RequestBuilder) -> Self {
        Self {
            transport,
            requests,
            region_names: Arc::new(StaticRegionNames),
            country_name_language: DEFAULT_NAME_LANGUAGE.to_string(),
        }
    }

    /// Replaces the lookup used to resolve country display names.
    #[must_use]
    pub fn with_region_names(mut self, names: Arc<dyn RegionNames + Send + Sync>) -> Self {
        self.region_names = names;
        self
    }

    /// Sets the language country display names are resolved in.
    #[must_use]
    pub fn with_country_name_language(mut self, language: &str) -> Self {
        language.clone_into(&mut self.country_name_language);
        self
    }

    #[must_use]
    pub fn request_builder(&self) -> &RequestBuilder {
        &self.requests
    }

    /// Validates a country code using this client's name lookup.
    ///
    /// # Errors
    ///
    /// [`GeocodeError::InvalidFormat`] or [`GeocodeError::UnknownCountry`].
    pub fn country(&self, code: &str) -> Result<Country, GeocodeError> {
        Country::resolve(code, &self.country_name_language, self.region_names.as_ref())
    }

    /// Sends one geocoding request and returns the parsed response, whatever its status.
    ///
    /// # Errors
    ///
    /// - [`GeocodeError::Transport`] on network failure or non-2xx HTTP status.
    /// - [`GeocodeError::Deserialize`] if the body is not a geocoding envelope.
    pub async fn geocode(
        &self,
        parameters: &GeocodeParameters,
        region_bias: &RegionBias,
    ) -> Result<GeocodingResponse, GeocodeError> {
        let url = self.requests.build_url(parameters, region_bias);
        let redacted = self.requests.redact(&url);
        tracing::debug!(url = %redacted, "sending geocoding request");

        let body = self.transport.fetch(&url).await?;
        let response = GeocodingResponse::from_json(&body, &redacted)?;

        tracing::debug!(
            status = response.status(),
            results = response.raw().results.len(),
            "geocoding response received"
        );
        Ok(response)
    }

    /// Geocodes a free-form address, optionally biased towards a country.
    ///
    /// Street address elements should be space-delimited.
    ///
    /// # Errors
    ///
    /// - [`GeocodeError::InvalidFormat`] / [`GeocodeError::UnknownCountry`] for a bad bias code.
    /// - [`GeocodeError::Transport`] / [`GeocodeError::Deserialize`] from the request.
    /// - [`GeocodeError::RequestUnsuccessful`] if the API status is not `"OK"`.
    /// - [`GeocodeError::NoResults`] if the API returned no results.
    pub async fn by_address(
        &self,
        address: &str,
        country_bias: Option<&str>,
    ) -> Result<GeoCoordinates, GeocodeError> {
        let parameters = GeocodeParameters::new().with("address", address);
        self.by_parameters(&parameters, country_bias).await
    }

    /// Geocodes a postcode within a country.
    ///
    /// The request address is `"{postcode} {country long name}"`, biased to
    /// the same country.
    ///
    /// # Errors
    ///
    /// As [`Geocoder::by_address`].
    pub async fn by_postcode(
        &self,
        postcode: &str,
        country_code: &str,
    ) -> Result<GeoCoordinates, GeocodeError> {
        let country = self.country(country_code)?;
        let address = format!("{postcode} {}", country.long_name());
        self.by_address(&address, Some(country.iso_alpha2())).await
    }

    /// Reverse-geocodes a position. Accepts numbers or strings; surrounding
    /// whitespace is trimmed since the API rejects spaces inside `latlng`.
    ///
    /// # Errors
    ///
    /// As [`Geocoder::by_address`].
    pub async fn by_lat_long(
        &self,
        lat: impl Display,
        long: impl Display,
        country_bias: Option<&str>,
    ) -> Result<GeoCoordinates, GeocodeError> {
        let latlng = format!("{},{}", lat.to_string().trim(), long.to_string().trim());
        let parameters = GeocodeParameters::new().with("latlng", latlng);
        self.by_parameters(&parameters, country_bias).await
    }

    async fn by_parameters(
        &self,
        parameters: &GeocodeParameters,
        country_bias: Option<&str>,
    ) -> Result<GeoCoordinates, GeocodeError> {
        let bias = RegionBias::from(country_bias.map(|code| self.country(code)).transpose()?);
        let response = self.geocode(parameters, &bias).await?;

        if let Some(info) = response.error_info() {
            tracing::warn!(
                status = response.status(),
                error = %info,
                "geocoding request unsuccessful"
            );
            return Err(GeocodeError::RequestUnsuccessful(info));
        }

        response.first_geo_coordinates().ok_or(GeocodeError::NoResults)
    }
}

#[cfg(test)]
#[path = "client_test.rs"]
mod tests;
