//! In-process stand-in for the BreweryDB directory API
//!
//! Serves canned JSON on `/v2/locations/`, `/v2/styles/` and `/v2/beers/`
//! from an ephemeral local port and records every query string it receives.

#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use axum::{
    extract::{RawQuery, State},
    http::StatusCode,
    routing::get,
    Router,
};

pub const LOCATIONS_BODY: &str = r#"{
    "currentPage": 1,
    "numberOfPages": 1,
    "totalResults": 3,
    "status": "success",
    "data": [
        {"id": "a", "latitude": 30.0, "longitude": -97.0, "brewery": {"id": "b1", "name": "Jester King"}},
        {"id": "b", "latitude": 30.2, "longitude": -97.2, "brewery": {"id": "b2", "name": "Hops & Grain"}},
        {"id": "c", "latitude": 29.8, "longitude": -96.8, "brewery": {"id": "b3", "name": "Independence"}}
    ]
}"#;

pub const STYLES_BODY: &str = r#"{
    "status": "success",
    "data": [
        {"id": 15, "categoryId": 2, "name": "American-Style Stout", "description": "Roasted malt character"},
        {"id": 30, "categoryId": 4, "name": "Session Beer"}
    ]
}"#;

pub const BEERS_BODY: &str = r#"{
    "status": "success",
    "data": [
        {
            "id": "oeGSxs",
            "name": "Pecan Porter",
            "description": "Brewed with toasted pecans",
            "abv": "6.8",
            "ibu": "30",
            "isOrganic": "N",
            "available": {"id": 1, "name": "Year Round", "description": "Available year round"},
            "labels": {"medium": "https://labels.test/porter.png"}
        },
        {
            "id": "Zx81Qa",
            "name": "Green Ale",
            "abv": 5.2,
            "ibu": 18
        }
    ]
}"#;

/// What a stub endpoint answers with
#[derive(Clone)]
pub struct Canned {
    pub status: StatusCode,
    pub body: String,
}

impl Canned {
    pub fn ok(body: &str) -> Self {
        Self {
            status: StatusCode::OK,
            body: body.to_string(),
        }
    }
}

#[derive(Clone)]
struct StubState {
    locations: Canned,
    styles: Canned,
    beers: Canned,
    requests: Arc<Mutex<Vec<String>>>,
}

/// A running stub directory
pub struct StubDirectory {
    pub base_url: String,
    requests: Arc<Mutex<Vec<String>>>,
}

impl StubDirectory {
    /// Every request seen so far, as `path?query`
    pub fn requests(&self) -> Vec<String> {
        self.requests.lock().unwrap().clone()
    }
}

/// Start a stub answering with the default canned bodies
pub async fn start() -> StubDirectory {
    start_with(
        Canned::ok(LOCATIONS_BODY),
        Canned::ok(STYLES_BODY),
        Canned::ok(BEERS_BODY),
    )
    .await
}

/// Start a stub with custom answers per endpoint
pub async fn start_with(locations: Canned, styles: Canned, beers: Canned) -> StubDirectory {
    let requests = Arc::new(Mutex::new(Vec::new()));
    let state = StubState {
        locations,
        styles,
        beers,
        requests: requests.clone(),
    };

    let app = Router::new()
        .route("/v2/locations/", get(self::locations))
        .route("/v2/styles/", get(self::styles))
        .route("/v2/beers/", get(self::beers))
        .with_state(state);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    StubDirectory {
        base_url: format!("http://{}/v2", addr),
        requests,
    }
}

fn record(state: &StubState, path: &str, query: Option<String>) {
    let entry = match query {
        Some(q) => format!("{}?{}", path, q),
        None => path.to_string(),
    };
    state.requests.lock().unwrap().push(entry);
}

async fn locations(State(state): State<StubState>, RawQuery(query): RawQuery) -> (StatusCode, String) {
    record(&state, "/v2/locations/", query);
    (state.locations.status, state.locations.body.clone())
}

async fn styles(State(state): State<StubState>, RawQuery(query): RawQuery) -> (StatusCode, String) {
    record(&state, "/v2/styles/", query);
    (state.styles.status, state.styles.body.clone())
}

async fn beers(State(state): State<StubState>, RawQuery(query): RawQuery) -> (StatusCode, String) {
    record(&state, "/v2/beers/", query);
    (state.beers.status, state.beers.body.clone())
}
