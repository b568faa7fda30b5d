pub mod forecast_config;
pub mod histogram;
pub mod history_loader;
pub mod index_source;
pub mod percentiles;
pub mod report_output;
pub mod simulation;
pub mod simulation_types;
