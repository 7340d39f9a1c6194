pub mod viva_config;
pub mod viva_gateway;

pub use viva_config::{VivaConfig, VivaEnvironment};
pub use viva_gateway::VivaGateway;
