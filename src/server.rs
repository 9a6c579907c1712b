use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Result;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::Serialize;
use tower_http::cors::{Any, CorsLayer};
use tracing::{error, info};

use crate::scoring::{ScoringError, ScoringService};
use crate::types::{FeatureRequestDiff, SubmissionConstraints};

#[derive(Clone)]
struct ApiState {
    scorer: Arc<dyn ScoringService>,
}

#[derive(Debug, Serialize)]
struct ApiErrorBody {
    error: String,
}

#[derive(Debug)]
struct ApiError {
    status: StatusCode,
    message: String,
}

impl ApiError {
    fn internal(error: impl std::fmt::Display) -> Self {
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            message: error.to_string(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = Json(ApiErrorBody {
            error: self.message,
        });
        (self.status, body).into_response()
    }
}

pub fn router(scorer: Arc<dyn ScoringService>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/", get(index))
        .route("/get_top_ideas", post(get_top_ideas))
        .layer(cors)
        .with_state(ApiState { scorer })
}

pub async fn run_server(scorer: Arc<dyn ScoringService>, bind: SocketAddr) -> Result<()> {
    let listener = tokio::net::TcpListener::bind(bind).await?;
    info!("scoring stand-in listening on http://{bind}");
    axum::serve(listener, router(scorer)).await?;
    Ok(())
}

async fn index() -> &'static str {
    "IdeaGenie scoring stand-in is running"
}

async fn get_top_ideas(
    State(state): State<ApiState>,
    Json(constraints): Json<SubmissionConstraints>,
) -> Result<Json<Vec<FeatureRequestDiff>>, ApiError> {
    info!(constraints = %constraints.describe(), "ranking request");
    let rows = state.scorer.get_top_ideas(&constraints).await.map_err(|err| {
        error!(error = %err, "ranking failed");
        match err {
            ScoringError::Upstream(message) => ApiError::internal(message),
            other => ApiError::internal(other),
        }
    })?;
    Ok(Json(rows))
}

#[cfg(test)]
mod tests {
    use std::net::SocketAddr;
    use std::sync::Arc;

    use crate::scoring::{ScoringService, StaticScorer};
    use crate::server::router;

    async fn spawn(scorer: Arc<dyn ScoringService>) -> SocketAddr {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("failed to bind");
        let addr = listener.local_addr().expect("missing local addr");
        tokio::spawn(async move {
            let _ = axum::serve(listener, router(scorer)).await;
        });
        addr
    }

    async fn post_body(addr: SocketAddr, body: &'static str) -> (u16, serde_json::Value) {
        let response = reqwest::Client::new()
            .post(format!("http://{addr}/get_top_ideas"))
            .header("content-type", "application/json")
            .body(body)
            .send()
            .await
            .expect("request failed");
        let status = response.status().as_u16();
        let value = response.json().await.expect("invalid json");
        (status, value)
    }

    #[tokio::test]
    async fn index_reports_running() {
        let addr = spawn(Arc::new(StaticScorer::demo())).await;
        let body = reqwest::get(format!("http://{addr}/"))
            .await
            .expect("request failed")
            .text()
            .await
            .expect("failed to read body");
        assert!(body.contains("running"));
    }

    #[tokio::test]
    async fn partial_constraints_are_accepted() {
        let addr = spawn(Arc::new(StaticScorer::demo())).await;
        let (status, rows) = post_body(addr, r#"{"priority_focus":"Innovation"}"#).await;
        assert_eq!(status, 200);
        assert_eq!(rows.as_array().map(Vec::len), Some(3));
        assert_eq!(rows[0]["idea_id"], 1);
    }

    #[tokio::test]
    async fn scorer_failure_is_json_error() {
        let addr = spawn(Arc::new(StaticScorer::failing("no model"))).await;
        let (status, value) = post_body(addr, "{}").await;
        assert_eq!(status, 500);
        assert_eq!(value["error"], "no model");
    }

    #[tokio::test]
    async fn preflight_allows_any_origin() {
        let addr = spawn(Arc::new(StaticScorer::demo())).await;
        let response = reqwest::Client::new()
            .request(reqwest::Method::OPTIONS, format!("http://{addr}/get_top_ideas"))
            .header("origin", "http://localhost:3000")
            .header("access-control-request-method", "POST")
            .send()
            .await
            .expect("request failed");
        assert_eq!(
            response
                .headers()
                .get("access-control-allow-origin")
                .and_then(|v| v.to_str().ok()),
            Some("*")
        );
    }
}
