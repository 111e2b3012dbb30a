// Live chart instances, at most one per container
use chrono::{DateTime, Utc};
use serde_json::Value;
use std::collections::HashMap;

#[derive(Debug, Clone, PartialEq)]
pub struct ChartInstance {
    pub id: u64,
    pub container: String,
    pub canvas_id: String,
    pub config: Value,
    pub rendered_at: DateTime<Utc>,
}

#[derive(Debug, Default, Clone)]
pub struct InstanceRegistry {
    live: HashMap<String, ChartInstance>,
    next_id: u64,
}

impl InstanceRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Release whatever is bound to `container`
    pub fn release(&mut self, container: &str) -> Option<ChartInstance> {
        let released = self.live.remove(container);
        if let Some(instance) = &released {
            tracing::debug!(
                container = %instance.container,
                instance = instance.id,
                "Released previous chart instance"
            );
        }
        released
    }

    /// Bind a new instance to `container`, releasing the previous one first
    pub fn attach(&mut self, container: &str, canvas_id: &str, config: Value) -> &ChartInstance {
        self.release(container);

        self.next_id += 1;
        let instance = ChartInstance {
            id: self.next_id,
            container: container.to_string(),
            canvas_id: canvas_id.to_string(),
            config,
            rendered_at: Utc::now(),
        };

        self.live.insert(container.to_string(), instance);
        &self.live[container]
    }

    pub fn get(&self, container: &str) -> Option<&ChartInstance> {
        self.live.get(container)
    }

    pub fn live_count(&self) -> usize {
        self.live.len()
    }
}
