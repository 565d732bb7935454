//! folio-core: View transitions for a single-page portfolio
//!
//! This crate owns everything about switching between views that does not
//! depend on a particular renderer:
//!
//! - **Registry** - [`ViewRegistry`] of valid view ids, in navigation order
//! - **Transitions** - [`TransitionEngine`], a two-phase exit/enter state
//!   machine with a lock window that drops overlapping requests
//! - **History sync** - [`HistorySync`] keeps the address fragment and the
//!   active view consistent without feedback loops
//! - **Navigation** - [`NavigationController`] for arrow/Home/End keys,
//!   pointer clicks and calls to action
//! - **Announcements** - [`Announcer`] posts transient messages to a
//!   polite live region
//! - **Stage** - [`Stage`] wires the pieces together and is what hosts drive
//!
//! Time is injected through [`Clock`], so every deadline is deterministic
//! under [`ManualClock`].
//!
//! # Quick Start
//!
//! ```
//! use std::sync::Arc;
//! use std::time::Duration;
//! use folio_core::{
//!     DEFAULT_LINGER, LiveRegion, ManualClock, MemoryLocation, Stage, TransitionTiming,
//!     ViewRegistry,
//! };
//!
//! let clock = ManualClock::new();
//! let mut stage = Stage::open(
//!     Arc::new(ViewRegistry::classic()),
//!     clock.clone(),
//!     TransitionTiming::default(),
//!     MemoryLocation::new(""),
//!     LiveRegion::new(),
//!     DEFAULT_LINGER,
//! )
//! .unwrap();
//!
//! stage.switch_view(&"about".into()).unwrap();
//! clock.advance(Duration::from_millis(350));
//! stage.tick();
//! assert_eq!(stage.current_view().as_str(), "about");
//! ```
//!
//! # Timeline
//!
//! ```text
//! t=0        t=D                 t=2D
//! │ Leaving  │ Entering          │ Idle
//! │ (exit)   │ fragment+announce │ lock released
//! ```

pub mod announce;
pub mod clock;
pub mod config;
pub mod content;
pub mod engine;
pub mod error;
pub mod history;
pub mod navigation;
pub mod registry;
pub mod stage;
pub mod timer;

// Re-export key types for convenience
pub use announce::{
    AnnouncementId, AnnouncementSink, Announcer, DEFAULT_LINGER, LiveRegion, message_for,
};
pub use clock::{Clock, ManualClock, MonotonicClock};
pub use config::{CallToActionConfig, FolioConfig, RawFolioConfig};
pub use content::{Content, Panel};
pub use engine::{
    Phase, PhaseEvent, SwitchOutcome, SwitchView, TransitionEngine, TransitionTiming,
    ViewVisualState,
};
pub use error::{ConfigError, FolioError, LocationError, RegistryError, TransitionError};
pub use history::{
    FragmentOutcome, FragmentParse, HistorySync, IgnoreReason, Location, MemoryLocation,
    parse_fragment,
};
pub use navigation::{
    CallToAction, NavItem, NavKey, NavOutcome, NavigationController, NavigationSink,
};
pub use registry::{ViewEntry, ViewId, ViewRegistry};
pub use stage::Stage;
pub use timer::{TimerId, TimerQueue};
