pub mod config;
pub mod domain;
pub mod form;
pub mod routes;
pub mod startup;
pub mod telemetry;
pub mod upstream_client;
