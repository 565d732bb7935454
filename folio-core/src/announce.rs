//! Transient status messages for assistive technology.
//!
//! Each completed transition attaches one "Switched to <view> view" node
//! to a polite, atomic live region and detaches it after `linger`.

use std::time::Duration;

use tracing::debug;

use crate::clock::Clock;
use crate::registry::ViewId;
use crate::timer::TimerQueue;

/// How long an announcement stays attached.
pub const DEFAULT_LINGER: Duration = Duration::from_secs(1);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AnnouncementId(u64);

/// A surface observed by assistive technology.
pub trait AnnouncementSink {
    fn attach(&mut self, id: AnnouncementId, message: &str);

    fn detach(&mut self, id: AnnouncementId);
}

pub fn message_for(view: &ViewId) -> String {
    format!("Switched to {view} view")
}

#[derive(Debug)]
pub struct Announcer<C: Clock> {
    clock: C,
    linger: Duration,
    next_id: u64,
    expiries: TimerQueue<AnnouncementId>,
}

impl<C: Clock> Announcer<C> {
    pub fn new(clock: C, linger: Duration) -> Self {
        Self {
            clock,
            linger,
            next_id: 0,
            expiries: TimerQueue::new(),
        }
    }

    pub fn announce(&mut self, view: &ViewId, sink: &mut impl AnnouncementSink) -> AnnouncementId {
        let id = AnnouncementId(self.next_id);
        self.next_id += 1;

        let message = message_for(view);
        debug!(view = %view, "Announcing view change");
        sink.attach(id, &message);
        self.expiries
            .schedule_at(self.clock.now() + self.linger, id);
        id
    }

    /// Detach every announcement whose linger has elapsed.
    pub fn advance(&mut self, sink: &mut impl AnnouncementSink) -> usize {
        let now = self.clock.now();
        let mut removed = 0;
        while let Some((_, _, id)) = self.expiries.pop_due(now) {
            sink.detach(id);
            removed += 1;
        }
        removed
    }

    /// Detach everything immediately.
    pub fn clear(&mut self, sink: &mut impl AnnouncementSink) -> usize {
        let mut removed = 0;
        while let Some((_, _, id)) = self.expiries.pop_due(Duration::MAX) {
            sink.detach(id);
            removed += 1;
        }
        removed
    }

    pub fn pending(&self) -> usize {
        self.expiries.len()
    }

    pub fn next_deadline(&self) -> Option<Duration> {
        self.expiries.next_deadline()
    }

    pub fn linger(&self) -> Duration {
        self.linger
    }
}

/// In-memory polite/atomic status region.
#[derive(Debug, Clone, Default)]
pub struct LiveRegion {
    nodes: Vec<(AnnouncementId, String)>,
}

impl LiveRegion {
    pub fn new() -> Self {
        Self::default()
    }

    /// ARIA politeness of the region.
    pub fn politeness(&self) -> &'static str {
        "polite"
    }

    pub fn is_atomic(&self) -> bool {
        true
    }

    pub fn latest(&self) -> Option<&str> {
        self.nodes.last().map(|(_, message)| message.as_str())
    }

    pub fn messages(&self) -> impl Iterator<Item = &str> {
        self.nodes.iter().map(|(_, message)| message.as_str())
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }
}

impl AnnouncementSink for LiveRegion {
    fn attach(&mut self, id: AnnouncementId, message: &str) {
        self.nodes.push((id, message.to_string()));
    }

    fn detach(&mut self, id: AnnouncementId) {
        self.nodes.retain(|(node, _)| *node != id);
    }
}
