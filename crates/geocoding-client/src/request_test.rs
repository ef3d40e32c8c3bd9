use super::*;

const BASE: &str = "https://maps.googleapis.com/maps/api/geocode/json";
const ADDRESS: &str = "25 Old Gardens Close Tunbridge Wells TN2 5ND";

fn builder(api_key: &str) -> RequestBuilder {
    RequestBuilder::new(BASE, api_key)
}

#[test]
fn build_url_adds_key_and_default_language() {
    let params = GeocodeParameters::new().with("address", ADDRESS);
    let url = builder("foo").build_url(&params, &RegionBias::NotProvided);
    assert_eq!(
        url,
        "https://maps.googleapis.com/maps/api/geocode/json?key=foo&address=25%20Old%20Gardens%20Close%20Tunbridge%20Wells%20TN2%205ND&language=en-GB"
    );
}

#[test]
fn build_url_keeps_caller_region_when_bias_not_provided() {
    let params = GeocodeParameters::new()
        .with("address", ADDRESS)
        .with("region", "uk");
    let url = builder("bar").build_url(&params, &RegionBias::NotProvided);
    assert_eq!(
        url,
        "https://maps.googleapis.com/maps/api/geocode/json?key=bar&address=25%20Old%20Gardens%20Close%20Tunbridge%20Wells%20TN2%205ND&region=uk&language=en-GB"
    );
}

#[test]
fn build_url_drops_absent_values() {
    let params = GeocodeParameters::new()
        .with("address", "X")
        .without("region");
    let url = builder("foo").build_url(&params, &RegionBias::NotProvided);
    assert_eq!(url, format!("{BASE}?key=foo&address=X&language=en-GB"));
}

#[test]
fn suppressed_bias_removes_caller_region() {
    let params = GeocodeParameters::new()
        .with("address", "X")
        .with("region", "uk");
    let url = builder("foo").build_url(&params, &RegionBias::Suppress);
    assert!(!url.contains("region"), "region should be dropped: {url}");
}

#[test]
fn explicit_region_overrides_caller_region_in_place() {
    let params = GeocodeParameters::new()
        .with("address", "X")
        .with("region", "uk");
    let url = builder("foo").build_url(&params, &RegionBias::Region("fr".to_string()));
    assert_eq!(url, format!("{BASE}?key=foo&address=X&region=fr&language=en-GB"));
}

#[test]
fn explicit_region_is_appended_after_language() {
    let params = GeocodeParameters::new().with("address", "X");
    let url = builder("foo").build_url(&params, &RegionBias::Region("fr".to_string()));
    assert_eq!(url, format!("{BASE}?key=foo&address=X&language=en-GB&region=fr"));
}

#[test]
fn country_bias_uses_top_level_domain() {
    let params = GeocodeParameters::new().with("address", "X");
    let bias = RegionBias::Country(Country::new("gb").unwrap());
    let url = builder("foo").build_url(&params, &bias);
    assert!(url.ends_with("&region=uk"), "got {url}");
}

#[test]
fn caller_language_is_not_overridden() {
    let params = GeocodeParameters::new()
        .with("language", "fr")
        .with("address", "X");
    let url = builder("foo").build_url(&params, &RegionBias::NotProvided);
    assert_eq!(url, format!("{BASE}?key=foo&language=fr&address=X"));
}

#[test]
fn absent_caller_language_suppresses_default() {
    let params = GeocodeParameters::new()
        .with("address", "X")
        .without("language");
    let url = builder("foo").build_url(&params, &RegionBias::NotProvided);
    assert_eq!(url, format!("{BASE}?key=foo&address=X"));
}

#[test]
fn caller_key_replaces_default_key() {
    let params = GeocodeParameters::new()
        .with("address", "X")
        .with("key", "other");
    let url = builder("foo").build_url(&params, &RegionBias::NotProvided);
    assert_eq!(url, format!("{BASE}?key=other&address=X&language=en-GB"));
}

#[test]
fn reserved_characters_are_percent_encoded() {
    let params = GeocodeParameters::new().with("address", "a b+c,d&e=f/g");
    let url = builder("foo").build_url(&params, &RegionBias::NotProvided);
    assert!(
        url.contains("address=a%20b%2Bc%2Cd%26e%3Df%2Fg"),
        "unexpected encoding: {url}"
    );
    assert!(!url.contains('+'), "space must never become '+': {url}");
}

#[test]
fn unreserved_characters_stay_literal() {
    let params = GeocodeParameters::new().with("address", "A-z_0.9~");
    let url = builder("foo").build_url(&params, &RegionBias::NotProvided);
    assert!(url.contains("address=A-z_0.9~"), "got {url}");
}

#[test]
fn build_url_is_deterministic() {
    let params = GeocodeParameters::new()
        .with("latlng", "43.549543,7.014364")
        .with("region", "fr");
    let b = builder("foo");
    let first = b.build_url(&params, &RegionBias::Suppress);
    let second = b.build_url(&params, &RegionBias::Suppress);
    assert_eq!(first, second);
    assert_eq!(first, format!("{BASE}?key=foo&latlng=43.549543%2C7.014364&language=en-GB"));
}

#[test]
fn custom_default_language_is_used() {
    let params = GeocodeParameters::new().with("address", "X");
    let url = builder("foo")
        .with_default_language("fr")
        .build_url(&params, &RegionBias::NotProvided);
    assert!(url.ends_with("&language=fr"), "got {url}");
}

#[test]
fn redact_masks_api_key() {
    let b = builder("s3cr3t key");
    let params = GeocodeParameters::new().with("address", "X");
    let url = b.build_url(&params, &RegionBias::NotProvided);
    let redacted = b.redact(&url);
    assert!(!redacted.contains("s3cr3t"), "key leaked: {redacted}");
    assert!(redacted.contains("key=[redacted]&address=X"));
}

#[test]
fn parameters_set_replaces_in_place() {
    let mut params = GeocodeParameters::new().with("a", "1").with("b", "2");
    params.set("a", Some("3".to_string()));
    let collected: Vec<_> = params.iter().collect();
    assert_eq!(collected, vec![("a", Some("3")), ("b", Some("2"))]);
    assert_eq!(params.get("a"), Some(Some("3")));
    assert_eq!(params.get("missing"), None);
}

#[test]
fn parameters_collect_from_iterator() {
    let params: GeocodeParameters = [("address", Some("X")), ("region", None)]
        .into_iter()
        .collect();
    assert_eq!(params.len(), 2);
    assert_eq!(params.get("region"), Some(None));
    assert_eq!(params.to_query_string(), "address=X");
}

#[test]
fn region_bias_from_optional_country() {
    assert_eq!(RegionBias::from(None::<Country>), RegionBias::Suppress);
    let fr = Country::new("fr").unwrap();
    assert_eq!(RegionBias::from(Some(fr.clone())), RegionBias::Country(fr));
}
