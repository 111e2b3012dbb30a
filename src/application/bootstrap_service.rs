// Chart bootstrap service - Resolve, fetch, validate and render one chart into a page
use crate::application::performance_source::PerformanceSource;
use crate::domain::catalog::ChartCatalog;
use crate::domain::chart::{ChartDataset, ChartRequest, SUBJECT_VAR};
use crate::domain::failure::ChartFailure;
use crate::domain::page::Page;
use crate::domain::subject::{RESOLUTION_ORDER, resolve_subject};
use crate::infrastructure::chart_js::chart_config;
use crate::infrastructure::config::prepare_endpoint;
use futures::future::join_all;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

pub const DEFAULT_FETCH_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, Clone, PartialEq)]
pub enum BootstrapOutcome {
    Rendered {
        container: String,
        instance_id: u64,
        series: usize,
    },
    Failed(ChartFailure),
}

/// A request whose subject and container are resolved, waiting on its fetch
struct Prepared {
    request: ChartRequest,
    endpoint: String,
}

#[derive(Clone)]
pub struct ChartBootstrapService {
    source: Arc<dyn PerformanceSource>,
    catalog: Arc<ChartCatalog>,
    fetch_timeout: Duration,
}

impl ChartBootstrapService {
    pub fn new(source: Arc<dyn PerformanceSource>, catalog: ChartCatalog) -> Self {
        Self {
            source,
            catalog: Arc::new(catalog),
            fetch_timeout: DEFAULT_FETCH_TIMEOUT,
        }
    }

    pub fn with_fetch_timeout(mut self, timeout: Duration) -> Self {
        self.fetch_timeout = timeout;
        self
    }

    pub fn catalog(&self) -> &ChartCatalog {
        &self.catalog
    }

    /// Run the request now if the page is interactive, otherwise queue it
    /// for [`ChartBootstrapService::document_ready`].
    pub async fn schedule(
        &self,
        request: ChartRequest,
        page: &mut Page,
    ) -> Option<BootstrapOutcome> {
        tracing::debug!(
            chart = request.kind.as_str(),
            state = ?page.ready_state(),
            "Scheduling chart"
        );
        let request = page.defer_until_ready(request)?;
        Some(self.bootstrap(&request, page).await)
    }

    /// Fire the page's ready event and bootstrap everything that was queued
    pub async fn document_ready(&self, page: &mut Page) -> Vec<BootstrapOutcome> {
        let pending = page.mark_interactive();
        self.bootstrap_all(&pending, page).await
    }

    pub async fn bootstrap(&self, request: &ChartRequest, page: &mut Page) -> BootstrapOutcome {
        let prepared = match self.prepare(request, page) {
            Ok(prepared) => prepared,
            Err(failure) => return self.fail(request, page, failure),
        };

        let result = self.load(&prepared).await;
        self.finish(&prepared.request, page, result)
    }

    /// Bootstrap several charts on one page. Fetches run concurrently; page
    /// updates are applied in request order once they complete.
    pub async fn bootstrap_all(
        &self,
        requests: &[ChartRequest],
        page: &mut Page,
    ) -> Vec<BootstrapOutcome> {
        let mut outcomes: Vec<Option<BootstrapOutcome>> = vec![None; requests.len()];
        let mut prepared = Vec::new();

        for (idx, request) in requests.iter().enumerate() {
            match self.prepare(request, page) {
                Ok(p) => prepared.push((idx, p)),
                Err(failure) => outcomes[idx] = Some(self.fail(request, page, failure)),
            }
        }

        let results = join_all(prepared.iter().map(|(_, p)| self.load(p))).await;

        for ((idx, p), result) in prepared.iter().zip(results) {
            outcomes[*idx] = Some(self.finish(&p.request, page, result));
        }

        outcomes.into_iter().flatten().collect()
    }

    fn prepare(&self, request: &ChartRequest, page: &mut Page) -> Result<Prepared, ChartFailure> {
        let chart = request.kind.as_str();
        let mut vars = HashMap::new();

        if request.needs_subject() {
            let (subject, source) = resolve_subject(&RESOLUTION_ORDER, page).ok_or_else(|| {
                tracing::error!(chart, path = page.path(), "Could not determine employee ID");
                ChartFailure::SubjectUnresolved
            })?;
            tracing::debug!(chart, %subject, source, "Resolved subject");
            vars.insert(SUBJECT_VAR.to_string(), subject.as_str().to_string());
        }

        let spec = self.catalog.spec(request.kind);
        let container = page
            .container_mut(&request.container_selector)
            .ok_or_else(|| ChartFailure::ContainerMissing(request.container_selector.clone()))?;

        container.ensure_canvas(&spec.canvas_id);
        container.show_loading();

        Ok(Prepared {
            request: request.clone(),
            endpoint: prepare_endpoint(&request.endpoint_template, &vars),
        })
    }

    async fn load(&self, prepared: &Prepared) -> Result<ChartDataset, ChartFailure> {
        let request = &prepared.request;
        tracing::debug!(
            chart = request.kind.as_str(),
            endpoint = %prepared.endpoint,
            "Fetching chart data"
        );

        let fetch = self.source.fetch(&prepared.endpoint);
        let payload = tokio::time::timeout(self.fetch_timeout, fetch)
            .await
            .map_err(|_| {
                ChartFailure::Network(format!("Request timed out after {:?}", self.fetch_timeout))
            })??;

        let spec = self.catalog.spec(request.kind);
        ChartDataset::from_payload(&payload, request, &spec.series)
    }

    fn finish(
        &self,
        request: &ChartRequest,
        page: &mut Page,
        result: Result<ChartDataset, ChartFailure>,
    ) -> BootstrapOutcome {
        match result {
            Ok(dataset) => self.render(request, page, &dataset),
            Err(failure) => self.fail(request, page, failure),
        }
    }

    fn render(
        &self,
        request: &ChartRequest,
        page: &mut Page,
        dataset: &ChartDataset,
    ) -> BootstrapOutcome {
        let spec = self.catalog.spec(request.kind);
        let selector = request.container_selector.as_str();

        let Some(container) = page.container_mut(selector) else {
            return self.fail(request, page, ChartFailure::ContainerMissing(selector.to_string()));
        };
        container.clear_loading();
        let canvas_id = container.ensure_canvas(&spec.canvas_id);

        page.instances_mut().release(selector);
        let config = chart_config(spec, dataset);

        if spec.reveals_legend && spec.has_comparison(dataset) {
            page.reveal_legend();
        }

        let instance_id = page.instances_mut().attach(selector, &canvas_id, config).id;
        tracing::info!(
            chart = request.kind.as_str(),
            container = selector,
            instance = instance_id,
            points = dataset.labels().len(),
            live = page.instances().live_count(),
            "Chart rendered"
        );

        BootstrapOutcome::Rendered {
            container: selector.to_string(),
            instance_id,
            series: dataset.series().len(),
        }
    }

    fn fail(
        &self,
        request: &ChartRequest,
        page: &mut Page,
        failure: ChartFailure,
    ) -> BootstrapOutcome {
        let chart = request.kind.as_str();
        let selector = request.container_selector.as_str();

        match page.container_mut(selector) {
            Some(container) if failure.is_displayable() => {
                tracing::warn!(
                    chart,
                    kind = failure.kind(),
                    status = failure.status(),
                    "Error loading chart: {}",
                    failure
                );
                container.show_error(&failure.to_string());
                page.instances_mut().release(selector);
            }
            _ => {
                tracing::error!(
                    chart,
                    container = selector,
                    kind = failure.kind(),
                    "Chart has nowhere to render: {}",
                    failure
                );
            }
        }

        BootstrapOutcome::Failed(failure)
    }
}
