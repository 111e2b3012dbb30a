// HTTP request handlers
use crate::application::bootstrap_service::BootstrapOutcome;
use crate::domain::chart::ChartKind;
use crate::domain::page::Page;
use crate::domain::subject::{HIDDEN_INPUT_ID, LANDMARK_ATTRIBUTE};
use crate::domain::work::WorkSubmission;
use crate::infrastructure::html::{render_container, render_page};
use crate::infrastructure::http_response::{accepts_brotli, html_response};
use crate::presentation::app_state::AppState;
use crate::presentation::pages::{chart_page, title};
use axum::{
    Json,
    extract::{Path, Query, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::Arc;

#[derive(Deserialize)]
pub struct SubjectQuery {
    pub employee_id: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ChartFragment {
    pub kind: ChartKind,
    pub container: String,
    pub html: String,
    pub config: Option<Value>,
    pub error: Option<String>,
}

/// Health check endpoint
pub async fn health_check() -> &'static str {
    "ok"
}

/// Queue the view's chart, fire the ready event and render the page
async fn bootstrap_view(state: &AppState, kind: ChartKind, mut page: Page) -> Page {
    let service = &state.bootstrap_service;
    let request = service.catalog().spec(kind).request();

    service.schedule(request, &mut page).await;
    for outcome in service.document_ready(&mut page).await {
        match outcome {
            BootstrapOutcome::Rendered {
                container,
                instance_id,
                series,
            } => tracing::debug!(%container, instance_id, series, "View chart ready"),
            BootstrapOutcome::Failed(failure) => {
                tracing::debug!(kind = failure.kind(), "View chart failed")
            }
        }
    }
    page
}

async fn page_response(kind: ChartKind, page: &Page, headers: &HeaderMap) -> Response {
    match html_response(render_page(title(kind), page), accepts_brotli(headers)).await {
        Ok(response) => response,
        Err(status) => status.into_response(),
    }
}

fn with_subject(page: Page, subject: Option<&str>) -> Page {
    match subject {
        Some(id) => page.with_hidden_input(HIDDEN_INPUT_ID, id),
        None => page,
    }
}

/// Employee detail view; the id in the path is the preferred subject
pub async fn employee_detail(
    Path(id): Path<String>,
    Query(query): Query<SubjectQuery>,
    headers: HeaderMap,
    State(state): State<Arc<AppState>>,
) -> impl IntoResponse {
    let catalog = state.bootstrap_service.catalog();
    let page = chart_page(catalog, ChartKind::Employee, &format!("/employee/{}", id));
    let page = with_subject(page, query.employee_id.as_deref());

    let page = bootstrap_view(&state, ChartKind::Employee, page).await;
    page_response(ChartKind::Employee, &page, &headers).await
}

/// Team performance view
pub async fn insights(headers: HeaderMap, State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let page = chart_page(state.bootstrap_service.catalog(), ChartKind::Team, "/insights");
    let page = bootstrap_view(&state, ChartKind::Team, page).await;
    page_response(ChartKind::Team, &page, &headers).await
}

/// Personal goals view
pub async fn your_dashboard(
    headers: HeaderMap,
    State(state): State<Arc<AppState>>,
) -> impl IntoResponse {
    let catalog = state.bootstrap_service.catalog();
    let page = chart_page(catalog, ChartKind::Personal, "/your-dashboard");
    let page = bootstrap_view(&state, ChartKind::Personal, page).await;
    page_response(ChartKind::Personal, &page, &headers).await
}

/// One bootstrapped chart as JSON, for pages that embed charts themselves.
/// The host page's landmark carries the subject, so `employee_id` lands there.
pub async fn chart_fragment(
    Path(kind): Path<String>,
    Query(query): Query<SubjectQuery>,
    State(state): State<Arc<AppState>>,
) -> Response {
    let Some(kind) = ChartKind::parse(&kind) else {
        return (StatusCode::NOT_FOUND, format!("Unknown chart: {}", kind)).into_response();
    };

    let catalog = state.bootstrap_service.catalog();
    let mut page = chart_page(catalog, kind, &format!("/charts/{}", kind.as_str()));
    if let Some(id) = query.employee_id.as_deref() {
        page = page.with_landmark_data(LANDMARK_ATTRIBUTE, id);
    }
    let page = bootstrap_view(&state, kind, page).await;

    let selector = catalog.spec(kind).container_selector.clone();
    let Some(container) = page.container(&selector) else {
        return StatusCode::INTERNAL_SERVER_ERROR.into_response();
    };

    Json(ChartFragment {
        kind,
        html: render_container(&page, container),
        config: page.instances().get(&selector).map(|i| i.config.clone()),
        error: container.error_message().map(String::from),
        container: selector,
    })
    .into_response()
}

/// Relay a work submission to the backend
pub async fn submit_work(
    State(state): State<Arc<AppState>>,
    Json(submission): Json<WorkSubmission>,
) -> impl IntoResponse {
    let outcome = state.work_service.submit(&submission).await;
    let status = if outcome.status == "success" {
        StatusCode::OK
    } else {
        StatusCode::BAD_GATEWAY
    };
    (status, Json(outcome))
}
