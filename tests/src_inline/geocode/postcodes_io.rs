use std::time::Duration;

use serde_json::json;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use super::*;
use crate::geocode::{GeocodeOutcome, geocode_postcode};

async fn lookup_blocking(
    base_url: String,
    postcode: &'static str,
) -> Result<Coordinates, GeocodeError> {
    tokio::task::spawn_blocking(move || {
        let mut client = PostcodesIoClient::new(&base_url, Duration::from_secs(5))?;
        client.lookup(postcode)
    })
    .await
    .unwrap()
}

#[test]
fn test_postcode_url_encodes_single_segment() {
    let client = PostcodesIoClient::new("https://api.postcodes.io", Duration::from_secs(1)).unwrap();
    let url = client.postcode_url("SW1A1AA").unwrap();
    assert_eq!(url.as_str(), "https://api.postcodes.io/postcodes/SW1A1AA");

    let url = client.postcode_url("AB/1?").unwrap();
    assert_eq!(url.as_str(), "https://api.postcodes.io/postcodes/AB%2F1%3F");
}

#[test]
fn test_postcode_url_keeps_base_path() {
    let client =
        PostcodesIoClient::new("http://mirror.local/geo/", Duration::from_secs(1)).unwrap();
    let url = client.postcode_url("M11AE").unwrap();
    assert_eq!(url.as_str(), "http://mirror.local/geo/postcodes/M11AE");
}

#[test]
fn test_invalid_base_url_is_rejected() {
    assert!(matches!(
        PostcodesIoClient::new("not a url", Duration::from_secs(1)),
        Err(GeocodeError::BaseUrl(_))
    ));
    assert!(matches!(
        PostcodesIoClient::new("mailto:someone@example.com", Duration::from_secs(1)),
        Err(GeocodeError::BaseUrl(_))
    ));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_lookup_success() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/postcodes/SW1A1AA"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "status": 200,
            "result": {"postcode": "SW1A 1AA", "latitude": 51.501009, "longitude": -0.141588}
        })))
        .expect(1)
        .mount(&server)
        .await;

    let coords = lookup_blocking(server.uri(), "SW1A1AA").await.unwrap();
    assert!((coords.latitude() - 51.501009).abs() < 1e-9);
    assert!((coords.longitude() + 0.141588).abs() < 1e-9);
}

#[tokio::test(flavor = "multi_thread")]
async fn test_lookup_not_found_status() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/postcodes/ZZ99ZZ"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({
            "status": 404,
            "error": "Invalid postcode"
        })))
        .mount(&server)
        .await;

    let err = lookup_blocking(server.uri(), "ZZ99ZZ").await.unwrap_err();
    assert!(matches!(err, GeocodeError::Status(404)));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_lookup_malformed_body() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>busy</html>"))
        .mount(&server)
        .await;

    let err = lookup_blocking(server.uri(), "M11AE").await.unwrap_err();
    assert!(matches!(err, GeocodeError::Malformed(_)));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_lookup_null_coordinates() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "status": 200,
            "result": {"latitude": null, "longitude": null}
        })))
        .mount(&server)
        .await;

    let err = lookup_blocking(server.uri(), "GY11AA").await.unwrap_err();
    assert!(matches!(err, GeocodeError::Malformed(_)));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_server_error_degrades_to_unavailable() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(500))
        .expect(1)
        .mount(&server)
        .await;

    let base_url = server.uri();
    let outcome = tokio::task::spawn_blocking(move || {
        let mut client = PostcodesIoClient::new(&base_url, Duration::from_secs(5)).unwrap();
        geocode_postcode(&mut client, Some("SW1A 1AA"))
    })
    .await
    .unwrap();
    assert_eq!(outcome, GeocodeOutcome::Unavailable);
}

#[test]
fn test_connection_refused_is_transport_error() {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let mut client =
        PostcodesIoClient::new(&format!("http://{addr}"), Duration::from_secs(5)).unwrap();
    let err = client.lookup("SW1A1AA").unwrap_err();
    assert!(matches!(err, GeocodeError::Transport(_)));
}
