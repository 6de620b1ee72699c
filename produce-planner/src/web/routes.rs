//! HTTP route handlers.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use axum::{
    Json, Router,
    extract::{Query, State},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
    routing::{get, post},
};
use tower_http::trace::TraceLayer;
use tracing::{debug, warn};

use crate::domain::RecordError;
use crate::graph::GraphError;
use crate::optimizer::{OptimizationResult, OptimizeError};
use crate::report::{render_path, render_plans, render_routes};

use super::dto::*;
use super::state::AppState;

/// Create the application router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/routes", get(list_routes).post(add_route))
        .route("/routes/report", get(routes_report))
        .route("/path", get(shortest_path))
        .route("/path/report", get(path_report))
        .route("/plan", post(plan))
        .route("/plan/report", post(plan_report))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Health check endpoint.
async fn health() -> &'static str {
    "ok"
}

/// List every route once.
async fn list_routes(State(state): State<AppState>) -> Json<RoutesResponse> {
    let snapshot = state.current().await;
    let routes = snapshot
        .graph
        .routes()
        .into_iter()
        .map(RouteResult::from)
        .collect();
    Json(RoutesResponse { routes })
}

/// Route listing as text.
async fn routes_report(State(state): State<AppState>) -> Response {
    let snapshot = state.current().await;
    text_response(render_routes(&snapshot.graph.routes()))
}

/// Add or overwrite a route between two known locations.
async fn add_route(
    State(state): State<AppState>,
    Json(req): Json<AddRouteRequest>,
) -> Result<(StatusCode, Json<RouteResult>), AppError> {
    let distance = u32::try_from(req.distance)
        .ok()
        .filter(|d| *d > 0)
        .ok_or_else(|| RecordError::NonPositiveDistance {
            from: req.from.clone(),
            to: req.to.clone(),
            distance: req.distance,
        })?;

    {
        let mut guard = state.snapshot.write().await;
        Arc::make_mut(&mut *guard)
            .graph
            .add_route(&req.from, &req.to, distance)?;
    }
    debug!(from = %req.from, to = %req.to, distance, "route added via API");

    Ok((
        StatusCode::CREATED,
        Json(RouteResult {
            from: req.from,
            to: req.to,
            distance,
        }),
    ))
}

/// Shortest path between two locations.
async fn shortest_path(
    State(state): State<AppState>,
    Query(query): Query<PathQuery>,
) -> Result<Json<PathResponse>, AppError> {
    let snapshot = state.current().await;
    let path = snapshot
        .graph
        .shortest_path(&query.from, &query.to)
        .ok_or_else(|| AppError::NotFound {
            message: format!("no route from {} to {}", query.from, query.to),
        })?;
    Ok(Json(path.into()))
}

/// Shortest path as text.
async fn path_report(
    State(state): State<AppState>,
    Query(query): Query<PathQuery>,
) -> Result<Response, AppError> {
    let snapshot = state.current().await;
    let path = snapshot
        .graph
        .shortest_path(&query.from, &query.to)
        .ok_or_else(|| AppError::NotFound {
            message: format!("no route from {} to {}", query.from, query.to),
        })?;
    Ok(text_response(render_path(&path)))
}

/// Compute transport plans as JSON.
async fn plan(
    State(state): State<AppState>,
    Json(req): Json<PlanRequest>,
) -> Result<Json<PlanResponse>, AppError> {
    let result = run_optimization(&state, req).await?;
    Ok(Json(result.into()))
}

/// Compute transport plans as a text report.
async fn plan_report(
    State(state): State<AppState>,
    Json(req): Json<PlanRequest>,
) -> Result<Response, AppError> {
    let result = run_optimization(&state, req).await?;
    let text = render_plans(&result).map_err(|e| AppError::Internal {
        message: format!("Template error: {}", e),
    })?;
    Ok(text_response(text))
}

fn text_response(text: String) -> Response {
    ([(header::CONTENT_TYPE, "text/plain; charset=utf-8")], text).into_response()
}

/// Run one optimization on the blocking pool against the current snapshot.
///
/// The selection table is O(candidates × capacity), so capacity is capped
/// and the call is bounded by the configured deadline. When the deadline
/// passes the task is told to stop at its next knapsack row.
async fn run_optimization(
    state: &AppState,
    req: PlanRequest,
) -> Result<OptimizationResult, AppError> {
    if req.capacity > state.config.max_capacity {
        return Err(AppError::BadRequest {
            message: format!(
                "capacity {} exceeds the limit of {}",
                req.capacity, state.config.max_capacity
            ),
        });
    }

    let snapshot = state.current().await;
    let cancel = Arc::new(AtomicBool::new(false));
    let task_cancel = Arc::clone(&cancel);
    let task = tokio::task::spawn_blocking(move || {
        snapshot
            .optimizer
            .optimize_until(&snapshot.graph, &req.origin, req.capacity, &task_cancel)
    });

    let Ok(joined) = tokio::time::timeout(state.config.deadline, task).await else {
        cancel.store(true, Ordering::Relaxed);
        return Err(AppError::Timeout);
    };
    let outcome = joined.map_err(|e| AppError::Internal {
        message: e.to_string(),
    })?;
    outcome.map_err(AppError::from)
}

/// Application error type.
#[derive(Debug)]
pub enum AppError {
    BadRequest { message: String },
    NotFound { message: String },
    Timeout,
    Internal { message: String },
}

impl From<OptimizeError> for AppError {
    fn from(e: OptimizeError) -> Self {
        match e {
            OptimizeError::Cancelled => AppError::Timeout,
            e => AppError::BadRequest {
                message: e.to_string(),
            },
        }
    }
}

impl From<GraphError> for AppError {
    fn from(e: GraphError) -> Self {
        AppError::BadRequest {
            message: e.to_string(),
        }
    }
}

impl From<RecordError> for AppError {
    fn from(e: RecordError) -> Self {
        AppError::BadRequest {
            message: e.to_string(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        let (status, message) = match &self {
            AppError::BadRequest { message } => (StatusCode::BAD_REQUEST, message.clone()),
            AppError::NotFound { message } => (StatusCode::NOT_FOUND, message.clone()),
            AppError::Timeout => (
                StatusCode::SERVICE_UNAVAILABLE,
                "optimization deadline exceeded".to_string(),
            ),
            AppError::Internal { message } => (StatusCode::INTERNAL_SERVER_ERROR, message.clone()),
        };

        warn!(%status, %message, "request failed");

        let body = Json(ErrorResponse { error: message });
        (status, body).into_response()
    }
}
