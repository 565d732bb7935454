//! Open command - launches the terminal portfolio
//!
//! Seeds the in-memory address bar from `--view`/`--fragment` and runs
//! the TUI until the user quits.

use std::path::Path;

use anyhow::{Result, bail};
use clap::Args;
use folio_core::{FolioConfig, MemoryLocation, MonotonicClock};
use tracing::info;

use crate::config::ConfigLoader;

#[derive(Args, Default, Debug)]
#[command(after_long_help = "\
Examples:
  folio open                        Open on the default view
  folio open --view about           Open on the about view
  folio open --fragment '#about'    Same, as an address-bar fragment
  folio open --reduced-motion       Switch views without animation
")]
pub struct OpenArgs {
    /// Start on this view (must be registered)
    #[arg(long, conflicts_with = "fragment")]
    pub view: Option<String>,

    /// Initial address-bar fragment; unknown views fall back to the default
    #[arg(long)]
    pub fragment: Option<String>,

    /// Skip transition animations
    #[arg(long)]
    pub reduced_motion: bool,

    /// Override the transition duration in milliseconds
    #[arg(long)]
    pub duration_ms: Option<u64>,
}

pub async fn run(args: OpenArgs, explicit: Option<&Path>) -> Result<()> {
    let mut config = ConfigLoader::load(explicit)?;
    apply_overrides(&mut config, &args);

    let location = MemoryLocation::new(initial_fragment(&config, &args)?);
    let mut app = folio_tui::App::from_config(&config, location, MonotonicClock::new())?;

    info!(view = %app.stage.current_view(), "Starting TUI...");
    folio_tui::install_panic_hook();
    app.run().await?;
    info!("TUI closed");

    Ok(())
}

fn apply_overrides(config: &mut FolioConfig, args: &OpenArgs) {
    if args.reduced_motion {
        config.transition.reduced_motion = true;
    }
    if let Some(duration_ms) = args.duration_ms {
        config.transition.duration_ms = duration_ms;
    }
}

/// `--view` is validated; `--fragment` behaves like a typed-in address.
fn initial_fragment(config: &FolioConfig, args: &OpenArgs) -> Result<String> {
    if let Some(view) = &args.view {
        let registry = config.registry()?;
        let Some(id) = registry.resolve(view) else {
            let known: Vec<_> = registry.ids().map(|id| id.as_str()).collect();
            bail!("Unknown view '{}' (known: {})", view, known.join(", "));
        };
        return Ok(id.fragment());
    }
    Ok(args.fragment.clone().unwrap_or_default())
}
