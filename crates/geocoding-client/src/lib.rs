//! Client for a geocoding HTTP API.
//!
//! Builds percent-encoded request URLs, fetches them through a pluggable
//! [`Transport`], and normalizes the first result into [`GeoCoordinates`].

pub mod client;
pub mod country;
pub mod error;
pub mod normalize;
pub mod request;
pub mod transport;
pub mod types;

pub use client::{Geocoder, DEFAULT_BASE_URL};
pub use country::{top_level_domain, Country, RegionNames, StaticRegionNames};
pub use error::{GeocodeError, TransportError};
pub use normalize::{Envelope, GeocodingResponse};
pub use request::{GeocodeParameters, RegionBias, RequestBuilder};
pub use transport::{ReqwestTransport, Transport};
pub use types::{AddressComponent, ApiResponse, GeoCoordinates, GeocodeResult, PostalAddress};
