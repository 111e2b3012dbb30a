// Application layer - Use cases and ports
pub mod bootstrap_service;
pub mod performance_source;
pub mod work_publisher;
pub mod work_service;
