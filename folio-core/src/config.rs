//! Configuration types.
//!
//! `Raw*` types mirror the TOML files with every field optional so layers
//! can be merged; [`FolioConfig`] is the result with defaults applied.

use std::collections::BTreeMap;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::content::{Contact, Content, Profile, Project, Section};
use crate::engine::TransitionTiming;
use crate::error::ConfigError;
use crate::navigation::CallToAction;
use crate::registry::{ViewEntry, ViewId, ViewRegistry};

/// Default exit/settle duration in milliseconds.
pub const DEFAULT_DURATION_MS: u64 = 350;

/// Default time an announcement stays in the live region.
pub const DEFAULT_ANNOUNCEMENT_MS: u64 = 1000;

/// Longest accepted transition duration.
pub const MAX_DURATION_MS: u64 = 10_000;

/// Configuration as stored in TOML files (with optional fields for merging)
#[derive(Debug, Clone, Deserialize, Default)]
pub struct RawFolioConfig {
    #[serde(default)]
    pub transition: RawTransitionConfig,

    #[serde(default)]
    pub views: RawViewsConfig,

    pub calls_to_action: Option<Vec<CallToActionConfig>>,

    pub profile: Option<Profile>,
    pub skills: Option<Vec<String>>,
    pub projects: Option<Vec<Project>>,
    pub contacts: Option<Vec<Contact>>,
    pub sections: Option<BTreeMap<String, Section>>,
}

#[derive(Debug, Clone, Deserialize, Default)]
pub struct RawTransitionConfig {
    pub duration_ms: Option<u64>,
    pub announcement_ms: Option<u64>,
    pub reduced_motion: Option<bool>,
}

#[derive(Debug, Clone, Deserialize, Default)]
pub struct RawViewsConfig {
    pub order: Option<Vec<String>>,
    pub default: Option<String>,
    pub labels: Option<BTreeMap<String, String>>,
}

impl RawFolioConfig {
    pub fn from_toml_str(contents: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(contents)?)
    }
}

/// A call to action as written in config.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CallToActionConfig {
    pub on: String,
    pub label: String,
    pub target: String,
}

/// Final configuration with defaults applied
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct FolioConfig {
    #[serde(default)]
    pub transition: TransitionConfig,

    #[serde(default)]
    pub views: ViewsConfig,

    /// `None` means the built-in buttons for the configured views.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub calls_to_action: Option<Vec<CallToActionConfig>>,

    #[serde(flatten)]
    pub content: Content,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransitionConfig {
    /// Exit and settle duration shared with the renderer
    pub duration_ms: u64,

    /// How long announcements stay attached
    pub announcement_ms: u64,

    /// Skip the animation entirely
    pub reduced_motion: bool,
}

impl Default for TransitionConfig {
    fn default() -> Self {
        Self {
            duration_ms: DEFAULT_DURATION_MS,
            announcement_ms: DEFAULT_ANNOUNCEMENT_MS,
            reduced_motion: false,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ViewsConfig {
    /// Registry order, used for cyclic keyboard navigation
    pub order: Vec<String>,

    /// View shown when the fragment names no valid view
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<String>,

    /// Navigation labels; missing entries use the capitalised id
    #[serde(default)]
    pub labels: BTreeMap<String, String>,
}

impl Default for ViewsConfig {
    fn default() -> Self {
        let registry = ViewRegistry::classic();
        Self {
            order: registry.ids().map(|id| id.to_string()).collect(),
            default: None,
            labels: registry
                .entries()
                .iter()
                .map(|e| (e.id.to_string(), e.label.clone()))
                .collect(),
        }
    }
}

impl FolioConfig {
    pub fn from_toml_str(contents: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(contents)?)
    }

    /// Build the view registry described by `[views]`.
    pub fn registry(&self) -> Result<ViewRegistry, ConfigError> {
        let entries = self
            .views
            .order
            .iter()
            .map(|id| match self.views.labels.get(id) {
                Some(label) => ViewEntry::new(id.as_str(), label.as_str()),
                None => ViewEntry::from_id(id),
            })
            .collect();
        let registry = ViewRegistry::new(entries)?;
        Ok(match &self.views.default {
            Some(default) => registry.with_default(ViewId::new(default.as_str()))?,
            None => registry,
        })
    }

    pub fn timing(&self) -> Result<TransitionTiming, ConfigError> {
        if self.transition.reduced_motion {
            return Ok(TransitionTiming::reduced_motion());
        }
        if self.transition.duration_ms > MAX_DURATION_MS {
            return Err(ConfigError::Timing(format!(
                "duration_ms {} exceeds {MAX_DURATION_MS}",
                self.transition.duration_ms
            )));
        }
        Ok(TransitionTiming::new(Duration::from_millis(
            self.transition.duration_ms,
        )))
    }

    pub fn announcement_linger(&self) -> Duration {
        Duration::from_millis(self.transition.announcement_ms)
    }

    /// Configured buttons, or the built-in ones, restricted to registered views.
    ///
    /// Configured buttons naming an unknown view are dropped with a warning.
    pub fn calls_to_action(&self, registry: &ViewRegistry) -> Vec<CallToAction> {
        let registered =
            |cta: &CallToAction| registry.contains(&cta.on) && registry.contains(&cta.target);
        match &self.calls_to_action {
            Some(configured) => configured
                .iter()
                .map(to_call_to_action)
                .filter(|cta| {
                    let keep = registered(cta);
                    if !keep {
                        warn!(
                            on = %cta.on,
                            target = %cta.target,
                            label = %cta.label,
                            "Dropping call to action for unknown view"
                        );
                    }
                    keep
                })
                .collect(),
            None => builtin_calls_to_action()
                .iter()
                .map(to_call_to_action)
                .filter(|cta| registered(cta))
                .collect(),
        }
    }
}

fn to_call_to_action(cta: &CallToActionConfig) -> CallToAction {
    CallToAction {
        on: ViewId::new(cta.on.as_str()),
        label: cta.label.clone(),
        target: ViewId::new(cta.target.as_str()),
    }
}

fn builtin_calls_to_action() -> Vec<CallToActionConfig> {
    let cta = |on: &str, label: &str, target: &str| CallToActionConfig {
        on: on.into(),
        label: label.into(),
        target: target.into(),
    };
    vec![
        cta("home", "View Projects", "portfolio"),
        cta("home", "Get in Touch", "about"),
        cta("about", "View Projects", "projects"),
        cta("about", "Get in Touch", "contact"),
    ]
}
