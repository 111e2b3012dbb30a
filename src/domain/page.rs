// Page model - the document a chart is bootstrapped into
use crate::domain::chart::ChartRequest;
use crate::domain::instance::InstanceRegistry;
use std::collections::{BTreeMap, HashMap};

pub const LOADING_TEXT: &str = "Loading chart...";
pub const CANVAS_MAX_HEIGHT_PX: u32 = 350;

#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    /// Static markup shipped with the page before any chart exists
    Placeholder(String),
    Canvas { id: String, max_height_px: Option<u32> },
    Loading,
    ErrorPanel { message: String },
}

#[derive(Debug, Clone, PartialEq)]
pub struct Container {
    selector: String,
    nodes: Vec<Node>,
    /// Placeholder background and padding still applied
    placeholder_styled: bool,
}

impl Container {
    pub fn new(selector: &str) -> Self {
        Self {
            selector: selector.to_string(),
            nodes: Vec::new(),
            placeholder_styled: false,
        }
    }

    pub fn placeholder(selector: &str, text: &str) -> Self {
        Self {
            nodes: vec![Node::Placeholder(text.to_string())],
            placeholder_styled: true,
            ..Self::new(selector)
        }
    }

    pub fn with_canvas(mut self, id: &str) -> Self {
        self.nodes.push(Node::Canvas {
            id: id.to_string(),
            max_height_px: None,
        });
        self
    }

    pub fn selector(&self) -> &str {
        &self.selector
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn is_placeholder_styled(&self) -> bool {
        self.placeholder_styled
    }

    pub fn canvas_id(&self) -> Option<&str> {
        self.nodes.iter().find_map(|n| match n {
            Node::Canvas { id, .. } => Some(id.as_str()),
            _ => None,
        })
    }

    /// Make sure the container has a drawing surface. Creating one clears
    /// the placeholder content and styling; an existing canvas is kept.
    pub fn ensure_canvas(&mut self, id: &str) -> String {
        if let Some(existing) = self.canvas_id() {
            return existing.to_string();
        }

        self.nodes = vec![Node::Canvas {
            id: id.to_string(),
            max_height_px: Some(CANVAS_MAX_HEIGHT_PX),
        }];
        self.placeholder_styled = false;
        id.to_string()
    }

    pub fn show_loading(&mut self) {
        self.nodes.push(Node::Loading);
    }

    pub fn clear_loading(&mut self) {
        self.nodes.retain(|n| *n != Node::Loading);
    }

    /// Replace all content with the error panel
    pub fn show_error(&mut self, message: &str) {
        self.nodes = vec![Node::ErrorPanel {
            message: message.to_string(),
        }];
    }

    pub fn error_message(&self) -> Option<&str> {
        self.nodes.iter().find_map(|n| match n {
            Node::ErrorPanel { message } => Some(message.as_str()),
            _ => None,
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReadyState {
    Loading,
    Interactive,
}

#[derive(Debug, Clone)]
pub struct Page {
    path: String,
    landmark: Option<HashMap<String, String>>,
    hidden_inputs: HashMap<String, String>,
    containers: BTreeMap<String, Container>,
    legend_visible: Option<bool>,
    ready_state: ReadyState,
    pending: Vec<ChartRequest>,
    instances: InstanceRegistry,
}

impl Page {
    /// A fully loaded page at `path`
    pub fn new(path: &str) -> Self {
        Self {
            path: path.to_string(),
            landmark: None,
            hidden_inputs: HashMap::new(),
            containers: BTreeMap::new(),
            legend_visible: None,
            ready_state: ReadyState::Interactive,
            pending: Vec::new(),
            instances: InstanceRegistry::new(),
        }
    }

    pub fn loading(mut self) -> Self {
        self.ready_state = ReadyState::Loading;
        self
    }

    /// Add (or extend) the `main` landmark with a data attribute
    pub fn with_landmark_data(mut self, attribute: &str, value: &str) -> Self {
        self.landmark
            .get_or_insert_with(HashMap::new)
            .insert(attribute.to_string(), value.to_string());
        self
    }

    pub fn with_landmark(mut self) -> Self {
        self.landmark.get_or_insert_with(HashMap::new);
        self
    }

    pub fn with_hidden_input(mut self, id: &str, value: &str) -> Self {
        self.hidden_inputs.insert(id.to_string(), value.to_string());
        self
    }

    pub fn with_container(mut self, container: Container) -> Self {
        self.containers
            .insert(container.selector.clone(), container);
        self
    }

    /// Add a legend element, initially hidden
    pub fn with_legend(mut self) -> Self {
        self.legend_visible = Some(false);
        self
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn landmark(&self) -> Option<&HashMap<String, String>> {
        self.landmark.as_ref()
    }

    pub fn landmark_data(&self, attribute: &str) -> Option<&str> {
        self.landmark.as_ref()?.get(attribute).map(String::as_str)
    }

    pub fn hidden_input(&self, id: &str) -> Option<&str> {
        self.hidden_inputs.get(id).map(String::as_str)
    }

    pub fn hidden_inputs(&self) -> impl Iterator<Item = (&str, &str)> {
        self.hidden_inputs
            .iter()
            .map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn container(&self, selector: &str) -> Option<&Container> {
        self.containers.get(selector)
    }

    pub fn container_mut(&mut self, selector: &str) -> Option<&mut Container> {
        self.containers.get_mut(selector)
    }

    pub fn containers(&self) -> impl Iterator<Item = &Container> {
        self.containers.values()
    }

    pub fn has_legend(&self) -> bool {
        self.legend_visible.is_some()
    }

    pub fn is_legend_visible(&self) -> bool {
        self.legend_visible.unwrap_or(false)
    }

    /// No-op when the page has no legend element
    pub fn reveal_legend(&mut self) {
        if let Some(visible) = self.legend_visible.as_mut() {
            *visible = true;
        }
    }

    pub fn instances(&self) -> &InstanceRegistry {
        &self.instances
    }

    pub fn instances_mut(&mut self) -> &mut InstanceRegistry {
        &mut self.instances
    }

    pub fn ready_state(&self) -> ReadyState {
        self.ready_state
    }

    /// Hand the request back if the document is interactive, otherwise
    /// hold it until [`Page::mark_interactive`].
    pub fn defer_until_ready(&mut self, request: ChartRequest) -> Option<ChartRequest> {
        match self.ready_state {
            ReadyState::Interactive => Some(request),
            ReadyState::Loading => {
                self.pending.push(request);
                None
            }
        }
    }

    /// Fire the ready event. Each deferred request is returned exactly once.
    pub fn mark_interactive(&mut self) -> Vec<ChartRequest> {
        self.ready_state = ReadyState::Interactive;
        std::mem::take(&mut self.pending)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::catalog::ChartCatalog;
    use crate::domain::chart::ChartKind;

    #[test]
    fn test_ensure_canvas_is_idempotent() {
        let mut container = Container::placeholder(".chart-placeholder", "Chart coming soon");
        assert!(container.is_placeholder_styled());

        let id = container.ensure_canvas("employeePerformanceChart");
        assert_eq!(id, "employeePerformanceChart");
        assert!(!container.is_placeholder_styled());
        assert_eq!(container.nodes().len(), 1);

        let again = container.ensure_canvas("other");
        assert_eq!(again, "employeePerformanceChart");
        assert_eq!(container.nodes().len(), 1);
    }

    #[test]
    fn test_loading_and_error_views() {
        let mut container = Container::new(".c").with_canvas("c");
        container.show_loading();
        assert!(container.nodes().contains(&Node::Loading));

        container.clear_loading();
        assert_eq!(container.nodes().len(), 1);

        container.show_loading();
        container.show_error("boom");
        assert_eq!(container.nodes().len(), 1);
        assert_eq!(container.error_message(), Some("boom"));
        assert_eq!(container.canvas_id(), None);
    }

    #[test]
    fn test_deferred_requests_run_once() {
        let request = ChartCatalog::standard().spec(ChartKind::Team).request();
        let mut page = Page::new("/insights").loading();

        assert!(page.defer_until_ready(request.clone()).is_none());
        assert_eq!(page.mark_interactive().len(), 1);
        assert!(page.mark_interactive().is_empty());

        assert_eq!(page.defer_until_ready(request.clone()), Some(request));
    }

    #[test]
    fn test_legend_reveal_requires_element() {
        let mut page = Page::new("/");
        page.reveal_legend();
        assert!(!page.is_legend_visible());

        let mut page = Page::new("/").with_legend();
        assert!(!page.is_legend_visible());
        page.reveal_legend();
        assert!(page.is_legend_visible());
    }
}
