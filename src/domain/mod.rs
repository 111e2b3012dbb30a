// Domain layer - Chart, page and subject models
pub mod catalog;
pub mod chart;
pub mod failure;
pub mod instance;
pub mod page;
pub mod subject;
pub mod work;
