pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;

mod app_context;

#[cfg(any(test, feature = "testing"))]
pub mod fixtures;

pub use app_context::AppContext;
pub use config::{Config, ConfigError};
