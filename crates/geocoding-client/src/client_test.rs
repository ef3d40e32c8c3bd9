use std::sync::Mutex;

use serde_json::json;

use super::*;
use crate::error::TransportError;

/// Records requested URLs and answers every call with the same body.
struct StubTransport {
    body: String,
    urls: Mutex<Vec<String>>,
}

impl StubTransport {
    fn new(body: &serde_json::Value) -> Self {
        Self {
            body: body.to_string(),
            urls: Mutex::new(Vec::new()),
        }
    }
}

impl Transport for &StubTransport {
    async fn fetch(&self, url: &str) -> Result<String, TransportError> {
        self.urls.lock().unwrap().push(url.to_string());
        Ok(self.body.clone())
    }
}

fn geocoder(transport: &StubTransport) -> Geocoder<&StubTransport> {
    Geocoder::with_transport(transport, RequestBuilder::new("https://geo.test/json", "k"))
}

fn ok_body() -> serde_json::Value {
    json!({
        "status": "OK",
        "results": [{
            "address_components": [
                { "long_name": "Chamonix", "short_name": "Chamonix", "types": ["locality", "political"] },
                { "long_name": "France", "short_name": "FR", "types": ["country", "political"] }
            ],
            "geometry": { "location": { "lat": 45.923_697, "lng": 6.869_433 } }
        }]
    })
}

#[tokio::test]
async fn by_address_without_bias_sends_no_region() {
    let stub = StubTransport::new(&ok_body());
    let coords = geocoder(&stub)
        .by_address("Chamonix - Centre", None)
        .await
        .expect("should geocode");

    assert_eq!(coords.address.address_locality.as_deref(), Some("Chamonix"));
    let urls = stub.urls.lock().unwrap();
    assert_eq!(
        urls.as_slice(),
        ["https://geo.test/json?key=k&address=Chamonix%20-%20Centre&language=en-GB"]
    );
}

#[tokio::test]
async fn by_address_with_bias_sends_top_level_domain() {
    let stub = StubTransport::new(&ok_body());
    geocoder(&stub)
        .by_address("25 Old Gardens Close", Some("gb"))
        .await
        .unwrap();

    let urls = stub.urls.lock().unwrap();
    assert!(urls[0].ends_with("&language=en-GB&region=uk"), "got {}", urls[0]);
}

#[tokio::test]
async fn invalid_bias_fails_before_any_request() {
    let stub = StubTransport::new(&ok_body());
    let g = geocoder(&stub);

    let err = g.by_address("x", Some("United Kingdom")).await.unwrap_err();
    assert!(matches!(err, GeocodeError::InvalidFormat(_)));

    let err = g.by_address("x", Some("yz")).await.unwrap_err();
    assert!(matches!(err, GeocodeError::UnknownCountry(_)));

    let err = g.by_postcode("SW1E 5ND", "zz9").await.unwrap_err();
    assert!(matches!(err, GeocodeError::InvalidFormat(_)));

    assert!(stub.urls.lock().unwrap().is_empty());
}

#[tokio::test]
async fn by_postcode_embeds_country_name_and_biases_region() {
    let stub = StubTransport::new(&ok_body());
    geocoder(&stub).by_postcode("07001", "es").await.unwrap();

    let urls = stub.urls.lock().unwrap();
    assert_eq!(
        urls[0],
        "https://geo.test/json?key=k&address=07001%20Spain&language=en-GB&region=es"
    );
}

#[tokio::test]
async fn by_lat_long_trims_and_joins_without_spaces() {
    let stub = StubTransport::new(&ok_body());
    let g = geocoder(&stub);
    g.by_lat_long(" 43.549543 ", "7.014364\n", Some("FR")).await.unwrap();
    g.by_lat_long(43.549_543, 7.014_364, None).await.unwrap();

    let urls = stub.urls.lock().unwrap();
    assert_eq!(
        urls[0],
        "https://geo.test/json?key=k&latlng=43.549543%2C7.014364&language=en-GB&region=fr"
    );
    assert_eq!(
        urls[1],
        "https://geo.test/json?key=k&latlng=43.549543%2C7.014364&language=en-GB"
    );
}

#[tokio::test]
async fn unsuccessful_status_is_request_unsuccessful() {
    let stub = StubTransport::new(&json!({
        "status": "REQUEST_DENIED",
        "error_message": "The provided API key is invalid."
    }));
    let err = geocoder(&stub).by_address("x", None).await.unwrap_err();
    assert!(
        matches!(err, GeocodeError::RequestUnsuccessful(ref info)
            if info == "REQUEST_DENIED: The provided API key is invalid."),
        "got {err:?}"
    );
}

#[tokio::test]
async fn ok_without_results_is_no_results() {
    let stub = StubTransport::new(&json!({ "status": "OK", "results": [] }));
    let err = geocoder(&stub).by_address("x", None).await.unwrap_err();
    assert!(matches!(err, GeocodeError::NoResults));
}

#[tokio::test]
async fn geocode_returns_response_regardless_of_status() {
    let stub = StubTransport::new(&json!({ "status": "ZERO_RESULTS", "results": [] }));
    let params = GeocodeParameters::new().with("address", "nowhere");
    let response = geocoder(&stub)
        .geocode(&params, &RegionBias::NotProvided)
        .await
        .expect("envelope should parse");
    assert!(!response.was_successful());
    assert_eq!(response.error_info().as_deref(), Some("ZERO_RESULTS"));
    assert!(response.first_geo_coordinates().is_none());
}

#[tokio::test]
async fn custom_region_names_drive_postcode_address() {
    struct French;
    impl RegionNames for French {
        fn display_name(&self, _language: &str, iso_alpha2: &str) -> String {
            if iso_alpha2 == "ES" {
                "Espagne".to_string()
            } else {
                iso_alpha2.to_string()
            }
        }
    }

    let stub = StubTransport::new(&ok_body());
    let g = geocoder(&stub)
        .with_region_names(Arc::new(French))
        .with_country_name_language("fr");
    g.by_postcode("07001", "ES").await.unwrap();

    assert_eq!(g.country("es").unwrap().language(), "fr");
    assert!(stub.urls.lock().unwrap()[0].contains("address=07001%20Espagne"));
}
