//! HTTP host for the brewmap views
//!
//! Routes:
//! - `GET /beer-map?height=&width=&location=` - map page
//! - `GET /beer-selector` - style browser page
//! - `POST /ajax/beer-selector` - drilldown fragment (form: `style_id`, `token`)
//! - `GET /health` - liveness
//!
//! Failures answer with an empty body and a status code; no partial markup is
//! ever sent. That includes requests the extractors reject.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::{
    extract::{
        rejection::{FormRejection, QueryRejection},
        Query, State,
    },
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    routing::{get, post},
    Form, Router,
};
use serde::Deserialize;
use tower_http::trace::TraceLayer;

use crate::data::DirectoryError;
use crate::render::{self, MapOptions, RenderError};
use crate::views::{ViewError, Views};

/// Path of the drilldown endpoint
pub const DRILLDOWN_PATH: &str = "/ajax/beer-selector";

#[derive(Clone)]
pub struct AppState {
    views: Arc<Views>,
}

impl IntoResponse for ViewError {
    fn into_response(self) -> Response {
        let status = match &self {
            ViewError::Auth(_) => StatusCode::FORBIDDEN,
            ViewError::Directory(DirectoryError::EmptyResult) => StatusCode::NOT_FOUND,
            ViewError::Directory(_) => StatusCode::BAD_GATEWAY,
            ViewError::Render(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        status.into_response()
    }
}

/// A handler failure, answered with a bare status
enum Failure {
    View(ViewError),
    Rejected(StatusCode),
}

impl From<ViewError> for Failure {
    fn from(e: ViewError) -> Self {
        Failure::View(e)
    }
}

impl From<RenderError> for Failure {
    fn from(e: RenderError) -> Self {
        Failure::View(e.into())
    }
}

impl From<QueryRejection> for Failure {
    fn from(rejection: QueryRejection) -> Self {
        tracing::warn!(reason = %rejection.body_text(), "query rejected");
        Failure::Rejected(rejection.status())
    }
}

impl From<FormRejection> for Failure {
    fn from(rejection: FormRejection) -> Self {
        tracing::warn!(reason = %rejection.body_text(), "form rejected");
        Failure::Rejected(rejection.status())
    }
}

impl IntoResponse for Failure {
    fn into_response(self) -> Response {
        match self {
            Failure::View(e) => e.into_response(),
            Failure::Rejected(status) => status.into_response(),
        }
    }
}

/// Build the router for a view service
pub fn create_router(views: Views) -> Router {
    let state = AppState {
        views: Arc::new(views),
    };

    Router::new()
        .route("/health", get(health_check))
        .route("/beer-map", get(beer_map_page))
        .route("/beer-selector", get(beer_selector_page))
        .route(DRILLDOWN_PATH, post(beer_selector_drilldown))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Bind and serve until the process is stopped
pub async fn serve(views: Views, addr: SocketAddr) -> anyhow::Result<()> {
    let app = create_router(views);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Server listening on {}", addr);

    axum::serve(listener, app).await?;
    Ok(())
}

async fn health_check() -> &'static str {
    "ok"
}

async fn beer_map_page(
    State(state): State<AppState>,
    options: Result<Query<MapOptions>, QueryRejection>,
) -> Result<Html<String>, Failure> {
    let Query(options) = options?;
    let fragment = state.views.beer_map(&options).await.map_err(|e| {
        tracing::warn!(location = %options.location, error = %e, "beer map unavailable");
        e
    })?;

    let scripts = vec![state.views.maps_script_url()];
    let page = render::render_page("Breweries", &scripts, &fragment)?;
    Ok(Html(page))
}

async fn beer_selector_page(State(state): State<AppState>) -> Result<Html<String>, Failure> {
    let fragment = state.views.beer_selector().await.map_err(|e| {
        tracing::warn!(error = %e, "beer selector unavailable");
        e
    })?;

    let page = render::render_page("Beer styles", &[], &fragment)?;
    Ok(Html(page))
}

#[derive(Debug, Deserialize)]
struct DrilldownForm {
    #[serde(default)]
    style_id: String,
    token: Option<String>,
}

async fn beer_selector_drilldown(
    State(state): State<AppState>,
    form: Result<Form<DrilldownForm>, FormRejection>,
) -> Result<Html<String>, Failure> {
    let Form(form) = form?;
    let fragment = state
        .views
        .beer_selector_drilldown(&form.style_id, form.token.as_deref())
        .await
        .map_err(|e| {
            tracing::warn!(style_id = %form.style_id, error = %e, "drilldown refused or failed");
            e
        })?;

    Ok(Html(fragment))
}
