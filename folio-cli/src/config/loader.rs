use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use folio_core::config::{
    RawFolioConfig, RawTransitionConfig, RawViewsConfig, TransitionConfig, ViewsConfig,
};
use folio_core::{Content, FolioConfig};
use tracing::debug;

pub struct ConfigLoader;

impl ConfigLoader {
    /// Load merged configuration (user + project + explicit file)
    pub fn load(explicit: Option<&Path>) -> Result<FolioConfig> {
        let user = Self::user_config_path();
        let project = Self::project_config_path();
        Self::load_layers(Some(&user), &project, explicit)
    }

    /// Merge the given layers in order; missing user/project files are skipped.
    pub fn load_layers(
        user: Option<&Path>,
        project: &Path,
        explicit: Option<&Path>,
    ) -> Result<FolioConfig> {
        let mut raw = RawFolioConfig::default();

        // Layer 1: User config
        if let Some(user_path) = user
            && user_path.exists()
        {
            raw = Self::merge_raw(raw, Self::read_raw(user_path)?);
        }

        // Layer 2: Project config
        if project.exists() {
            raw = Self::merge_raw(raw, Self::read_raw(project)?);
        }

        // Layer 3: --config, which must exist
        if let Some(path) = explicit {
            if !path.exists() {
                bail!("Config file not found: {}", path.display());
            }
            raw = Self::merge_raw(raw, Self::read_raw(path)?);
        }

        Ok(Self::finalize(raw))
    }

    fn read_raw(path: &Path) -> Result<RawFolioConfig> {
        debug!(path = %path.display(), "Reading config layer");
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        RawFolioConfig::from_toml_str(&contents)
            .with_context(|| format!("Invalid config in {}", path.display()))
    }

    /// `$XDG_CONFIG_HOME/folio/config.toml`
    pub fn user_config_path() -> PathBuf {
        folio_paths::config_dir().join("config.toml")
    }

    /// Get project config path
    /// Can be overridden with FOLIO_PROJECT_CONFIG_DIR (useful for isolated tests)
    pub fn project_config_path() -> PathBuf {
        if let Ok(dir) = std::env::var("FOLIO_PROJECT_CONFIG_DIR") {
            PathBuf::from(dir).join("config.toml")
        } else {
            PathBuf::from(".folio/config.toml")
        }
    }

    /// Merge two raw configs (overlay values override base only if explicitly set)
    fn merge_raw(base: RawFolioConfig, overlay: RawFolioConfig) -> RawFolioConfig {
        RawFolioConfig {
            transition: RawTransitionConfig {
                duration_ms: overlay.transition.duration_ms.or(base.transition.duration_ms),
                announcement_ms: overlay
                    .transition
                    .announcement_ms
                    .or(base.transition.announcement_ms),
                reduced_motion: overlay
                    .transition
                    .reduced_motion
                    .or(base.transition.reduced_motion),
            },
            views: RawViewsConfig {
                order: overlay.views.order.or(base.views.order),
                default: overlay.views.default.or(base.views.default),
                labels: merge_maps(base.views.labels, overlay.views.labels),
            },
            calls_to_action: overlay.calls_to_action.or(base.calls_to_action),
            profile: overlay.profile.or(base.profile),
            skills: overlay.skills.or(base.skills),
            projects: overlay.projects.or(base.projects),
            contacts: overlay.contacts.or(base.contacts),
            sections: merge_maps(base.sections, overlay.sections),
        }
    }

    /// Convert raw config to final config with defaults applied
    fn finalize(raw: RawFolioConfig) -> FolioConfig {
        let transition_defaults = TransitionConfig::default();
        let content_defaults = Content::default();

        // Labels for the default order only make sense with that order.
        let views = match raw.views.order {
            Some(order) => ViewsConfig {
                order,
                default: raw.views.default,
                labels: raw.views.labels.unwrap_or_default(),
            },
            None => {
                let mut views = ViewsConfig::default();
                views.default = raw.views.default;
                views.labels.extend(raw.views.labels.unwrap_or_default());
                views
            }
        };

        FolioConfig {
            transition: TransitionConfig {
                duration_ms: raw
                    .transition
                    .duration_ms
                    .unwrap_or(transition_defaults.duration_ms),
                announcement_ms: raw
                    .transition
                    .announcement_ms
                    .unwrap_or(transition_defaults.announcement_ms),
                reduced_motion: raw
                    .transition
                    .reduced_motion
                    .unwrap_or(transition_defaults.reduced_motion),
            },
            views,
            calls_to_action: raw.calls_to_action,
            content: Content {
                profile: raw.profile.unwrap_or(content_defaults.profile),
                skills: raw.skills.unwrap_or(content_defaults.skills),
                projects: raw.projects.unwrap_or(content_defaults.projects),
                contacts: raw.contacts.unwrap_or(content_defaults.contacts),
                sections: raw.sections.unwrap_or_default(),
            },
        }
    }
}

/// Key-wise merge; overlay entries replace base entries with the same key.
fn merge_maps<V>(
    base: Option<BTreeMap<String, V>>,
    overlay: Option<BTreeMap<String, V>>,
) -> Option<BTreeMap<String, V>> {
    match (base, overlay) {
        (Some(mut base), Some(overlay)) => {
            base.extend(overlay);
            Some(base)
        }
        (base, overlay) => overlay.or(base),
    }
}
