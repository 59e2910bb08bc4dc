//! Configuration structs

mod socket_config;

pub use socket_config::{ClientConfig, ConfigError, Environment, SocketConfig};
