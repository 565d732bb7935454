//! Two-way sync between the address-bar fragment and the active view.
//!
//! Inbound: fragment changes (including back/forward) become switch
//! requests. Outbound: completed transitions push `#<view>` as a new
//! history entry. Outbound writes are tagged with a sequence token so an
//! echo of our own write is never mistaken for external navigation.

use std::collections::VecDeque;
use std::sync::Arc;

use tracing::{debug, warn};

use crate::engine::{SwitchOutcome, SwitchView};
use crate::error::{LocationError, TransitionError};
use crate::registry::{ViewId, ViewRegistry};

/// The host's address bar.
pub trait Location {
    /// Current fragment, with or without the leading `#`.
    fn fragment(&self) -> String;

    /// Write the fragment as a new history entry without a change notification.
    fn push_fragment(&mut self, fragment: &str) -> Result<(), LocationError>;

    /// Assign the fragment directly. Hosts may raise a change notification.
    fn assign_fragment(&mut self, fragment: &str);
}

/// Result of parsing a fragment against the registry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FragmentParse {
    Empty,
    Unknown(String),
    View(ViewId),
}

pub fn parse_fragment(fragment: &str, registry: &ViewRegistry) -> FragmentParse {
    let raw = fragment.trim();
    let raw = raw.strip_prefix('#').unwrap_or(raw);
    if raw.is_empty() {
        return FragmentParse::Empty;
    }
    match registry.resolve(raw) {
        Some(view) => FragmentParse::View(view.clone()),
        None => FragmentParse::Unknown(raw.to_string()),
    }
}

/// Why an inbound fragment change did not reach the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IgnoreReason {
    Empty,
    Unknown,
    /// Echo of a fragment we published ourselves.
    SelfOriginated,
    AlreadyActive,
    /// The engine behind the sync has been torn down.
    Disposed,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FragmentOutcome {
    Ignored(IgnoreReason),
    Switched(SwitchOutcome),
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct OutboundWrite {
    seq: u64,
    fragment: String,
}

#[derive(Debug)]
pub struct HistorySync<L: Location> {
    location: L,
    registry: Arc<ViewRegistry>,
    seq: u64,
    outstanding: Option<OutboundWrite>,
}

impl<L: Location> HistorySync<L> {
    pub fn new(location: L, registry: Arc<ViewRegistry>) -> Self {
        Self {
            location,
            registry,
            seq: 0,
            outstanding: None,
        }
    }

    /// View to activate on load: the fragment's view if valid, else the default.
    pub fn initial_view(&self) -> ViewId {
        match parse_fragment(&self.location.fragment(), &self.registry) {
            FragmentParse::View(view) => view,
            FragmentParse::Empty => self.registry.default_view().clone(),
            FragmentParse::Unknown(raw) => {
                debug!(fragment = %raw, "Initial fragment names no view, using default");
                self.registry.default_view().clone()
            }
        }
    }

    /// Handle a fragment change reported by the host.
    pub fn on_fragment_changed(
        &mut self,
        fragment: &str,
        target: &mut impl SwitchView,
    ) -> FragmentOutcome {
        if let Some(write) = self.outstanding.take()
            && same_fragment(&write.fragment, fragment)
        {
            debug!(seq = write.seq, fragment, "Ignoring echo of own fragment write");
            return FragmentOutcome::Ignored(IgnoreReason::SelfOriginated);
        }

        let view = match parse_fragment(fragment, &self.registry) {
            FragmentParse::View(view) => view,
            FragmentParse::Empty => return FragmentOutcome::Ignored(IgnoreReason::Empty),
            FragmentParse::Unknown(raw) => {
                debug!(fragment = %raw, "Ignoring fragment that names no view");
                return FragmentOutcome::Ignored(IgnoreReason::Unknown);
            }
        };

        if target.current_view() == &view {
            return FragmentOutcome::Ignored(IgnoreReason::AlreadyActive);
        }

        match target.switch_view(&view) {
            Ok(outcome) => FragmentOutcome::Switched(outcome),
            Err(TransitionError::UnknownView(_)) => FragmentOutcome::Ignored(IgnoreReason::Unknown),
            Err(TransitionError::Disposed) => FragmentOutcome::Ignored(IgnoreReason::Disposed),
        }
    }

    /// Write `#<view>` as a new history entry.
    ///
    /// Nothing is written when the address bar already shows the view,
    /// which is the case after back/forward, so forward entries survive.
    /// Falls back to direct assignment when the host cannot create entries;
    /// only that write can echo back, so only it is tagged as outstanding.
    /// Returns the sequence token of the write, `None` when skipped.
    pub fn publish(&mut self, view: &ViewId) -> Option<u64> {
        let fragment = view.fragment();
        if same_fragment(&self.location.fragment(), &fragment) {
            debug!(fragment = %fragment, "Fragment already current, not publishing");
            return None;
        }

        self.seq += 1;
        if let Err(err) = self.location.push_fragment(&fragment) {
            warn!(error = %err, fragment = %fragment, "Falling back to direct fragment assignment");
            self.outstanding = Some(OutboundWrite {
                seq: self.seq,
                fragment: fragment.clone(),
            });
            self.location.assign_fragment(&fragment);
        }
        debug!(seq = self.seq, fragment = %fragment, "Published fragment");
        Some(self.seq)
    }

    /// Sequence token of the most recent publish, `0` before the first.
    pub fn last_seq(&self) -> u64 {
        self.seq
    }

    pub fn location(&self) -> &L {
        &self.location
    }

    pub fn location_mut(&mut self) -> &mut L {
        &mut self.location
    }

    pub fn registry(&self) -> &ViewRegistry {
        &self.registry
    }
}

fn same_fragment(a: &str, b: &str) -> bool {
    let strip = |s: &str| s.trim().trim_start_matches('#').to_string();
    strip(a) == strip(b)
}

/// In-memory browser-style history for hosts without a real address bar.
///
/// `push_fragment` is silent like `history.pushState`; `back`, `forward`
/// and `assign_fragment` queue a change notification like `hashchange`.
#[derive(Debug, Clone)]
pub struct MemoryLocation {
    entries: Vec<String>,
    cursor: usize,
    push_supported: bool,
    notifications: VecDeque<String>,
}

impl MemoryLocation {
    pub fn new(initial_fragment: impl Into<String>) -> Self {
        Self {
            entries: vec![normalise(&initial_fragment.into())],
            cursor: 0,
            push_supported: true,
            notifications: VecDeque::new(),
        }
    }

    /// Host whose history API is unavailable.
    pub fn without_push_support(mut self) -> Self {
        self.push_supported = false;
        self
    }

    /// Go back one entry. Returns false at the oldest entry.
    pub fn back(&mut self) -> bool {
        if self.cursor == 0 {
            return false;
        }
        self.cursor -= 1;
        self.notify();
        true
    }

    /// Go forward one entry. Returns false at the newest entry.
    pub fn forward(&mut self) -> bool {
        if self.cursor + 1 >= self.entries.len() {
            return false;
        }
        self.cursor += 1;
        self.notify();
        true
    }

    pub fn can_go_back(&self) -> bool {
        self.cursor > 0
    }

    pub fn can_go_forward(&self) -> bool {
        self.cursor + 1 < self.entries.len()
    }

    /// Drain pending change notifications, oldest first.
    pub fn take_notifications(&mut self) -> Vec<String> {
        self.notifications.drain(..).collect()
    }

    pub fn entries(&self) -> &[String] {
        &self.entries
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    fn notify(&mut self) {
        self.notifications.push_back(self.entries[self.cursor].clone());
    }
}

impl Default for MemoryLocation {
    fn default() -> Self {
        Self::new("")
    }
}

impl Location for MemoryLocation {
    fn fragment(&self) -> String {
        self.entries[self.cursor].clone()
    }

    fn push_fragment(&mut self, fragment: &str) -> Result<(), LocationError> {
        if !self.push_supported {
            return Err(LocationError::Unsupported);
        }
        self.entries.truncate(self.cursor + 1);
        self.entries.push(normalise(fragment));
        self.cursor += 1;
        Ok(())
    }

    fn assign_fragment(&mut self, fragment: &str) {
        let fragment = normalise(fragment);
        if self.entries[self.cursor] == fragment {
            return;
        }
        self.entries[self.cursor] = fragment;
        self.notify();
    }
}

fn normalise(fragment: &str) -> String {
    let raw = fragment.trim().trim_start_matches('#');
    if raw.is_empty() {
        String::new()
    } else {
        format!("#{raw}")
    }
}
