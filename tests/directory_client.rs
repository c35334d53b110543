//! Directory client tests against a local stub of the API

mod common;

use axum::http::StatusCode;
use brewmap::data::{build_map_view, DirectoryClient, DirectoryConfig, DirectoryError};

use common::Canned;

fn client_for(stub: &common::StubDirectory) -> DirectoryClient {
    DirectoryClient::new(DirectoryConfig::new("test-key").with_base_url(stub.base_url.clone()))
}

#[tokio::test]
async fn test_fetch_locations_decodes_data() {
    let stub = common::start().await;
    let locations = client_for(&stub).fetch_locations("Austin").await.unwrap();

    assert_eq!(locations.len(), 3);
    assert_eq!(locations[0].brewery_name, "Jester King");
    assert_eq!(locations[1].brewery_name, "Hops & Grain");
    assert!((locations[2].latitude - 29.8).abs() < 0.0001);
    assert_eq!(
        stub.requests(),
        vec!["/v2/locations/?key=test-key&locality=Austin".to_string()]
    );
}

#[tokio::test]
async fn test_fetched_locations_build_expected_map() {
    let stub = common::start().await;
    let locations = client_for(&stub).fetch_locations("Austin").await.unwrap();
    let view = build_map_view(locations).unwrap();

    assert!((view.center.lat - 30.0).abs() < 0.0001);
    assert!((view.center.lon - (-97.0)).abs() < 0.0001);
    assert_eq!(view.markers.len(), 3);
}

#[tokio::test]
async fn test_fetch_locations_encodes_locality() {
    let stub = common::start().await;
    client_for(&stub)
        .fetch_locations("San Antonio&key=other")
        .await
        .unwrap();

    assert_eq!(
        stub.requests(),
        vec!["/v2/locations/?key=test-key&locality=San+Antonio%26key%3Dother".to_string()]
    );
}

#[tokio::test]
async fn test_fetch_locations_without_data_is_empty() {
    let stub = common::start_with(
        Canned::ok(r#"{"status": "success", "totalResults": 0}"#),
        Canned::ok(common::STYLES_BODY),
        Canned::ok(common::BEERS_BODY),
    )
    .await;

    let locations = client_for(&stub).fetch_locations("Nowhere").await.unwrap();
    assert!(locations.is_empty());
    assert!(matches!(
        build_map_view(locations),
        Err(DirectoryError::EmptyResult)
    ));
}

#[tokio::test]
async fn test_fetch_styles() {
    let stub = common::start().await;
    let styles = client_for(&stub).fetch_styles().await.unwrap();

    assert_eq!(styles.len(), 2);
    assert_eq!(styles[0].id, 15);
    assert_eq!(styles[0].name, "American-Style Stout");
    assert_eq!(styles[1].description, "");
    assert_eq!(stub.requests(), vec!["/v2/styles/?key=test-key".to_string()]);
}

#[tokio::test]
async fn test_fetch_beverages_by_style() {
    let stub = common::start().await;
    let beers = client_for(&stub).fetch_beverages_by_style(18).await.unwrap();

    assert_eq!(beers.len(), 2);
    assert_eq!(beers[0].name, "Pecan Porter");
    assert!((beers[0].abv - 6.8).abs() < 0.0001);
    assert!(!beers[0].is_organic);
    assert_eq!(beers[0].availability_description, "Available year round");
    assert_eq!(
        beers[0].image_url.as_deref(),
        Some("https://labels.test/porter.png")
    );

    // No isOrganic flag at all counts as organic
    assert!(beers[1].is_organic);
    assert!(beers[1].image_url.is_none());

    assert_eq!(
        stub.requests(),
        vec!["/v2/beers/?styleId=18&key=test-key".to_string()]
    );
}

#[tokio::test]
async fn test_malformed_body_is_decode_error() {
    let stub = common::start_with(
        Canned::ok("<html>maintenance</html>"),
        Canned::ok(common::STYLES_BODY),
        Canned::ok(common::BEERS_BODY),
    )
    .await;

    let result = client_for(&stub).fetch_locations("Austin").await;
    assert!(matches!(result, Err(DirectoryError::Decode(_))));
}

#[tokio::test]
async fn test_missing_fields_are_decode_error() {
    let stub = common::start_with(
        Canned::ok(common::LOCATIONS_BODY),
        Canned::ok(r#"{"status": "success", "data": [{"name": "No Id"}]}"#),
        Canned::ok(common::BEERS_BODY),
    )
    .await;

    let result = client_for(&stub).fetch_styles().await;
    assert!(matches!(result, Err(DirectoryError::Decode(_))));
}

#[tokio::test]
async fn test_http_error_is_upstream_error() {
    let stub = common::start_with(
        Canned::ok(common::LOCATIONS_BODY),
        Canned::ok(common::STYLES_BODY),
        Canned {
            status: StatusCode::UNAUTHORIZED,
            body: r#"{"status": "failure", "errorMessage": "API key could not be found"}"#
                .to_string(),
        },
    )
    .await;

    match client_for(&stub).fetch_beverages_by_style(1).await {
        Err(DirectoryError::Upstream { status, message }) => {
            assert_eq!(status, 401);
            assert_eq!(message, "API key could not be found");
        }
        other => panic!("expected upstream error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_unreachable_directory_is_network_error() {
    let client =
        DirectoryClient::new(DirectoryConfig::new("k").with_base_url("http://127.0.0.1:9/v2"));
    let result = client.fetch_styles().await;
    assert!(matches!(result, Err(DirectoryError::Network(_))));
}
