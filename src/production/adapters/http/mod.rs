//! HTTP adapter for the task-mutation backend.

mod config;
mod gateway;
mod models;

pub use config::{ConfigError, HttpGatewayConfig, HttpGatewayConfigData};
pub use gateway::HttpTaskGateway;

#[cfg(test)]
pub(crate) use models::{
    NewRejectionWire, RejectionListWire, RejectionWire, TaskPatchWire, TaskWire,
};
