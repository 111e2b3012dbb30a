// Page skeletons for the dashboard views
use crate::domain::catalog::ChartCatalog;
use crate::domain::chart::ChartKind;
use crate::domain::page::{Container, Page};

pub const EMPLOYEE_PLACEHOLDER: &str = "Performance trend chart will appear here";

pub fn title(kind: ChartKind) -> &'static str {
    match kind {
        ChartKind::Employee => "Employee Performance",
        ChartKind::Team => "AI Insights",
        ChartKind::Personal => "Your Dashboard",
    }
}

/// The markup each view ships before any script runs: the employee view
/// has a styled placeholder, the others carry their canvas already.
/// Pages start out loading so charts are bootstrapped on the ready event.
pub fn chart_page(catalog: &ChartCatalog, kind: ChartKind, path: &str) -> Page {
    let spec = catalog.spec(kind);
    let page = Page::new(path).loading().with_landmark();

    match kind {
        ChartKind::Employee => page.with_container(Container::placeholder(
            &spec.container_selector,
            EMPLOYEE_PLACEHOLDER,
        )),
        ChartKind::Team => page
            .with_legend()
            .with_container(Container::new(&spec.container_selector).with_canvas(&spec.canvas_id)),
        ChartKind::Personal => page
            .with_container(Container::new(&spec.container_selector).with_canvas(&spec.canvas_id)),
    }
}
