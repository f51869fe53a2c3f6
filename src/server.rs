use std::sync::Arc;

use axum::extract::{Query, State};
use axum::http::{StatusCode, header};
use axum::response::{Html, IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use color_eyre::{Report, Result};
use serde::Deserialize;
use tower_http::trace::TraceLayer;
use tracing::{error, info};

use crate::dashboard::page::COMPANY_CHARTS_ROUTE;
use crate::dashboard::{CompanyFilter, DashboardContext};

#[derive(Clone)]
pub struct AppState {
    pub context: Arc<DashboardContext>,
}

impl AppState {
    pub fn new(context: DashboardContext) -> Self {
        Self {
            context: Arc::new(context),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct CompanyQuery {
    pub company: Option<String>,
}

/// Handler failure, reported as a 500 with the error text
#[derive(Debug)]
pub struct AppError(Report);

impl<E: Into<Report>> From<E> for AppError {
    fn from(err: E) -> Self {
        Self(err.into())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        error!("Request failed: {:?}", self.0);
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            format!("Failed to build dashboard: {}", self.0),
        )
            .into_response()
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(index))
        .route(COMPANY_CHARTS_ROUTE, get(company_charts))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn index(State(state): State<AppState>) -> Result<Response, AppError> {
    if state.context.is_debug() {
        let context = Arc::clone(&state.context);
        let page = tokio::task::spawn_blocking(move || context.render_page()).await??;
        return Ok(no_store(Html(page)));
    }
    Ok(Html(state.context.page().to_string()).into_response())
}

async fn company_charts(
    State(state): State<AppState>,
    Query(query): Query<CompanyQuery>,
) -> Result<Response, AppError> {
    let filter = CompanyFilter::from_selection(query.company.as_deref());
    let context = Arc::clone(&state.context);
    let charts =
        tokio::task::spawn_blocking(move || context.company_charts(&filter)).await??;

    if state.context.is_debug() {
        return Ok(no_store(Json(charts)));
    }
    Ok(Json(charts).into_response())
}

fn no_store(body: impl IntoResponse) -> Response {
    ([(header::CACHE_CONTROL, "no-store")], body).into_response()
}

/// Bind `address` and serve until the process is stopped
pub async fn serve(context: DashboardContext, address: &str) -> Result<()> {
    let listener = tokio::net::TcpListener::bind(address).await?;
    info!("Dashboard listening on http://{}", listener.local_addr()?);
    axum::serve(listener, router(AppState::new(context))).await?;
    Ok(())
}
