//! Layered configuration.
//!
//! Sources are merged with the following precedence (highest first):
//!
//! 1. Programmatic overrides (via `ConfigBuilder::with_config`)
//! 2. Environment variables (`SLOTBOOK_*`)
//! 3. User config (`<data dir>/config.yaml`)
//! 4. Built-in defaults
//!
//! # Examples
//!
//! ```
//! use slotbook::config::{Config, ConfigBuilder};
//!
//! let config = ConfigBuilder::new()
//!     .skip_files()
//!     .skip_env()
//!     .with_config(Config {
//!         actor: Some("front-desk".to_string()),
//!         ..Default::default()
//!     })
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(config.actor.as_deref(), Some("front-desk"));
//! assert_eq!(config.lookahead_days_or_default(), 90);
//! ```

pub mod builder;
pub mod environment;
pub mod loader;
pub mod merger;
pub mod schema;
pub mod validator;

#[cfg(test)]
mod proptests;

pub use builder::ConfigBuilder;
pub use environment::EnvironmentConfig;
pub use loader::{ConfigLoader, ConfigSource};
pub use merger::ConfigMerger;
pub use schema::{Config, CONFIG_FILE_NAME};
pub use validator::ConfigValidator;
