// Application state for HTTP handlers
use crate::application::bootstrap_service::ChartBootstrapService;
use crate::application::work_service::WorkService;

#[derive(Clone)]
pub struct AppState {
    pub bootstrap_service: ChartBootstrapService,
    pub work_service: WorkService,
}
