//! Error types for folio-core

use thiserror::Error;

/// Top-level error type for folio-core
#[derive(Error, Debug)]
pub enum FolioError {
    #[error("Registry error: {0}")]
    Registry(#[from] RegistryError),

    #[error("Transition error: {0}")]
    Transition(#[from] TransitionError),

    #[error("Location error: {0}")]
    Location(#[from] LocationError),

    #[error("Config error: {0}")]
    Config(#[from] ConfigError),
}

/// Errors raised while building a view registry
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RegistryError {
    #[error("View registry must contain at least one view")]
    Empty,

    #[error("Duplicate view id: {0}")]
    Duplicate(String),

    #[error("View id {0:?} cannot be used as a fragment")]
    InvalidId(String),

    #[error("Default view {0:?} is not registered")]
    UnknownDefault(String),
}

/// Errors returned by the transition engine
///
/// Redundant and locked requests are not errors; see `SwitchOutcome`.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TransitionError {
    #[error("Unknown view: {0}")]
    UnknownView(String),

    #[error("Transition engine has been disposed")]
    Disposed,
}

/// Errors from the hosting address bar
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LocationError {
    #[error("History entries are not supported by this location")]
    Unsupported,
}

/// Errors from loading or validating configuration
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Invalid view configuration: {0}")]
    Views(#[from] RegistryError),

    #[error("Invalid transition configuration: {0}")]
    Timing(String),
}
