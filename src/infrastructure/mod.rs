// Infrastructure layer - External dependencies and adapters
pub mod chart_js;
pub mod config;
pub mod html;
pub mod http_response;
pub mod http_source;
pub mod work_client;
