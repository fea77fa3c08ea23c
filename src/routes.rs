use axum::{
    Json, Router,
    extract::State,
    response::{Html, IntoResponse, Response},
    routing::get,
};
use chrono::{DateTime, Utc};
use chrono_tz::America::New_York;
use serde::Serialize;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, services::ServeDir, trace::TraceLayer};

use crate::config::Settings;
use crate::error::ApiError;

#[derive(Serialize, Debug)]
pub struct MessageResponse {
    pub message: String,
}

#[derive(Serialize, Debug)]
pub struct HealthResponse {
    pub status: &'static str,
}

pub fn build_router(settings: Arc<Settings>) -> Router {
    let mut router = Router::new()
        .route("/", get(root))
        .route("/hello", get(hello))
        .route("/health", get(health_check));

    // Mounted only when the directory is there at startup
    if settings.frontend_dir.is_dir() {
        router = router.nest_service("/static", ServeDir::new(&settings.frontend_dir));
    } else {
        tracing::warn!(
            dir = %settings.frontend_dir.display(),
            "frontend directory not found, /static disabled"
        );
    }

    router
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(settings)
}

/// Serve the frontend index page, or a pointer to the API when there is none.
async fn root(State(settings): State<Arc<Settings>>) -> Result<Response, ApiError> {
    let path = settings.frontend_dir.join("index.html");
    // Raw bytes: the page is served whatever its encoding
    match tokio::fs::read(&path).await {
        Ok(html) => Ok(Html(html).into_response()),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(Json(MessageResponse {
            message: "Frontend not found. API is running at /hello".to_string(),
        })
        .into_response()),
        Err(source) => Err(ApiError::Frontend { path, source }),
    }
}

async fn hello() -> impl IntoResponse {
    Json(MessageResponse {
        message: hello_message(Utc::now()),
    })
}

/// Health check for the load balancer
async fn health_check() -> impl IntoResponse {
    Json(HealthResponse { status: "healthy" })
}

fn hello_message(now: DateTime<Utc>) -> String {
    let local = now.with_timezone(&New_York);
    format!(
        "hello - Current EST time: {}",
        local.format("%Y-%m-%d %H:%M:%S %Z")
    )
}
