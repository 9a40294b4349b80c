use rankscope_core::{GridPoint, ZoneId};

use super::*;

fn test_client(base_url: &str) -> SerpApiClient {
    SerpApiClient::with_base_url("test-key", 30, "rankscope-test", base_url)
        .expect("client construction should not fail")
}

fn request(query: &str) -> SearchRequest {
    SearchRequest {
        query: query.to_string(),
        location: "123 Main St, Phoenix, AZ".to_string(),
        grid_point: GridPoint {
            lat: 33.5207,
            lng: -111.9876,
            zone: ZoneId::new("NE"),
        },
    }
}

fn query_value(url: &Url, key: &str) -> Option<String> {
    url.query_pairs()
        .find(|(k, _)| k == key)
        .map(|(_, v)| v.into_owned())
}

#[test]
fn build_url_targets_search_json() {
    let client = test_client("https://serpapi.com");
    let url = client.build_url(&request("hvac repair"));
    assert_eq!(url.path(), "/search.json");
    assert_eq!(query_value(&url, "engine").as_deref(), Some("google_maps"));
    assert_eq!(query_value(&url, "type").as_deref(), Some("search"));
    assert_eq!(query_value(&url, "api_key").as_deref(), Some("test-key"));
}

#[test]
fn build_url_encodes_grid_point_as_ll() {
    let client = test_client("https://serpapi.com/");
    let url = client.build_url(&request("hvac repair"));
    assert_eq!(
        query_value(&url, "ll").as_deref(),
        Some("@33.520700,-111.987600,14z")
    );
}

#[test]
fn build_url_percent_encodes_query() {
    let client = test_client("https://serpapi.com");
    let url = client.build_url(&request("heating & cooling near 123 Main St"));
    assert_eq!(
        query_value(&url, "q").as_deref(),
        Some("heating & cooling near 123 Main St")
    );
    assert!(
        !url.as_str().contains("heating & cooling"),
        "query param should be percent-encoded: {url}"
    );
}

#[test]
fn build_url_keeps_base_path_prefix() {
    let client = test_client("http://localhost:8080/serp/");
    let url = client.build_url(&request("plumber"));
    assert_eq!(url.path(), "/serp/search.json");
}

#[test]
fn invalid_base_url_is_rejected() {
    let result = SerpApiClient::with_base_url("k", 30, "ua", "not a url");
    assert!(matches!(result, Err(ProviderError::InvalidBaseUrl { .. })));
}

#[test]
fn to_listing_falls_back_to_index_rank() {
    let result = LocalResult {
        position: None,
        title: "Acme HVAC".to_string(),
        phone: Some(String::new()),
        address: None,
        rating: Some(4.2),
        reviews: Some(87),
    };
    let listing = to_listing(result, 2, &request("hvac"));
    assert_eq!(listing.rank, 3);
    assert_eq!(listing.zone, ZoneId::new("NE"));
    assert!(listing.phone.is_none(), "blank phone should be dropped");
}
