use crate::domain::catalog::ChartCatalog;
use crate::domain::chart::ChartKind;
use serde::Deserialize;
use std::collections::HashMap;
use std::time::Duration;

#[derive(Debug, Deserialize, Clone)]
pub struct DashboardConfig {
    #[serde(default)]
    pub server: ServerSettings,
    pub backend: BackendSettings,
    #[serde(default)]
    pub charts: Vec<ChartOverride>,
}

impl DashboardConfig {
    pub fn validate(&self) -> anyhow::Result<()> {
        anyhow::ensure!(
            self.backend.timeout_secs > 0,
            "backend.timeout_secs must be greater than zero"
        );
        Ok(())
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerSettings {
    #[serde(default = "default_bind")]
    pub bind: String,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            bind: default_bind(),
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct BackendSettings {
    pub base_url: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl BackendSettings {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

/// Per-chart overrides on top of the standard catalog
#[derive(Debug, Deserialize, Clone)]
pub struct ChartOverride {
    pub kind: ChartKind,
    pub container: Option<String>,
    pub canvas_id: Option<String>,
    pub endpoint: Option<String>,
}

fn default_bind() -> String {
    "0.0.0.0:8080".to_string()
}

fn default_timeout_secs() -> u64 {
    10
}

/// Load `config/dashboard.{toml,yaml,json}`, then `DASHBOARD__*` env overrides
/// (e.g. `DASHBOARD__BACKEND__BASE_URL`).
pub fn load_dashboard_config() -> anyhow::Result<DashboardConfig> {
    let settings = config::Config::builder()
        .add_source(config::File::with_name("config/dashboard"))
        .add_source(config::Environment::with_prefix("DASHBOARD").separator("__"))
        .build()?;

    let config: DashboardConfig = settings.try_deserialize()?;
    config.validate()?;
    Ok(config)
}

pub fn build_catalog(overrides: &[ChartOverride]) -> ChartCatalog {
    let mut catalog = ChartCatalog::standard();
    for entry in overrides {
        let spec = catalog.spec_mut(entry.kind);
        if let Some(container) = &entry.container {
            spec.container_selector = container.clone();
        }
        if let Some(canvas_id) = &entry.canvas_id {
            spec.canvas_id = canvas_id.clone();
        }
        if let Some(endpoint) = &entry.endpoint {
            spec.endpoint_template = endpoint.clone();
        }
    }
    catalog
}

/// Replace `${name}` template variables, URL-encoding each value
pub fn prepare_endpoint(template: &str, vars: &HashMap<String, String>) -> String {
    let mut result = template.to_string();
    for (key, value) in vars {
        let placeholder = format!("${{{}}}", key);
        result = result.replace(&placeholder, &urlencoding::encode(value));
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prepare_endpoint() {
        let mut vars = HashMap::new();
        vars.insert("subject".to_string(), "42".to_string());

        let result = prepare_endpoint("/employee_performance_data/${subject}", &vars);
        assert_eq!(result, "/employee_performance_data/42");

        vars.insert("subject".to_string(), "4 2/x".to_string());
        let result = prepare_endpoint("/employee_performance_data/${subject}", &vars);
        assert_eq!(result, "/employee_performance_data/4%202%2Fx");

        assert_eq!(prepare_endpoint("/performance_data", &vars), "/performance_data");
    }

    #[test]
    fn test_deserialize_with_overrides() {
        let raw = r##"
            [backend]
            base_url = "http://localhost:5000"

            [[charts]]
            kind = "team"
            container = "#team-card"
            endpoint = "/api/performance_data"
        "##;

        let config: DashboardConfig = config::Config::builder()
            .add_source(config::File::from_str(raw, config::FileFormat::Toml))
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap();

        assert_eq!(config.server.bind, "0.0.0.0:8080");
        assert_eq!(config.backend.timeout(), Duration::from_secs(10));

        let catalog = build_catalog(&config.charts);
        let team = catalog.spec(ChartKind::Team);
        assert_eq!(team.container_selector, "#team-card");
        assert_eq!(team.endpoint_template, "/api/performance_data");
        assert_eq!(team.canvas_id, "teamPerformanceChart");
        assert_eq!(
            catalog.spec(ChartKind::Employee),
            ChartCatalog::standard().spec(ChartKind::Employee)
        );
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_zero_timeout_rejected() {
        let raw = r#"
            [backend]
            base_url = "http://localhost:5000"
            timeout_secs = 0
        "#;

        let config: DashboardConfig = config::Config::builder()
            .add_source(config::File::from_str(raw, config::FileFormat::Toml))
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap();

        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("timeout_secs"));
    }
}
