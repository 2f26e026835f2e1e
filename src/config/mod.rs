//! Settings for the reconcilers and their coordinators
/// Config file loader
mod loader;
/// Configuration manager
mod manager;
/// Configuration types and settings
mod types;

pub use manager::ConfigManager;
pub use types::{
    ConfigError,
    EngineSettings,
    ReorderSettings,
    TelemetrySettings,
    ValidationError,
};
