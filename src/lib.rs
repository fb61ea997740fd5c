//! Map Config: one-shot configuration loading for map front ends
//!
//! Resolves a declared configuration source (inline JSON, a per-language URL
//! template, or nothing) exactly once, merges each language's document over
//! defaults, and exposes a readiness gate for dependent subsystems.

pub mod config;
pub mod defaults;
pub mod error;
pub mod fetch;
pub mod loader;
pub mod locale;
pub mod logging;
pub mod overlay;
pub mod source;
pub mod store;
pub mod tooling;
pub mod types;

pub use error::ConfigError;
pub use loader::{
    ConfigLoader, InitHandle, InitializationState, LoaderOptions, ReadyCondition, ReadyReport,
};
pub use locale::{LanguageSelector, SharedLanguageSelector};
pub use source::{ConfigSource, DeclaredAttributes, LanguageList};
pub use store::ConfigStore;
