//! Wires the engine to history sync and the announcer.
//!
//! The stage is the only place phase events are turned into side effects:
//! for every entered view the fragment is published first, then the
//! announcement is attached.

use std::sync::Arc;
use std::time::Duration;

use tracing::info;

use crate::announce::{AnnouncementSink, Announcer};
use crate::clock::Clock;
use crate::engine::{
    Phase, PhaseEvent, SwitchOutcome, SwitchView, TransitionEngine, TransitionTiming,
    ViewVisualState,
};
use crate::error::TransitionError;
use crate::history::{FragmentOutcome, HistorySync, Location};
use crate::registry::{ViewId, ViewRegistry};

#[derive(Debug)]
pub struct Stage<C: Clock + Clone, L: Location, S: AnnouncementSink> {
    engine: TransitionEngine<C>,
    history: HistorySync<L>,
    announcer: Announcer<C>,
    sink: S,
}

impl<C: Clock + Clone, L: Location, S: AnnouncementSink> Stage<C, L, S> {
    /// Open on the view named by the location's fragment, or the default.
    ///
    /// The initial view is activated directly with no transition.
    pub fn open(
        registry: Arc<ViewRegistry>,
        clock: C,
        timing: TransitionTiming,
        location: L,
        sink: S,
        linger: Duration,
    ) -> Result<Self, TransitionError> {
        let history = HistorySync::new(location, Arc::clone(&registry));
        let initial = history.initial_view();
        info!(view = %initial, "Opening stage");

        let engine = TransitionEngine::new(registry, clock.clone(), timing, initial)?;

        Ok(Self {
            engine,
            history,
            announcer: Announcer::new(clock, linger),
            sink,
        })
    }

    pub fn switch_view(&mut self, target: &ViewId) -> Result<SwitchOutcome, TransitionError> {
        self.engine.switch_view(target)
    }

    /// Feed a fragment change from the host (back/forward, manual edit).
    pub fn on_fragment_changed(&mut self, fragment: &str) -> FragmentOutcome {
        self.history.on_fragment_changed(fragment, &mut self.engine)
    }

    /// Fire due phase timers and expire announcements.
    pub fn tick(&mut self) -> Vec<PhaseEvent> {
        let events = self.engine.advance();
        for event in &events {
            if let PhaseEvent::Entered { to, .. } = event {
                self.history.publish(to);
                self.announcer.announce(to, &mut self.sink);
            }
        }
        self.announcer.advance(&mut self.sink);
        events
    }

    /// Cancel every pending timer and clear the live region.
    pub fn dispose(&mut self) -> usize {
        let cancelled = self.engine.dispose() + self.announcer.clear(&mut self.sink);
        info!(cancelled, "Stage disposed");
        cancelled
    }

    pub fn current_view(&self) -> &ViewId {
        self.engine.current_view()
    }

    pub fn view_state(&self, view: &ViewId) -> ViewVisualState {
        self.engine.view_state(view)
    }

    pub fn phase(&self) -> &Phase {
        self.engine.phase()
    }

    /// Earliest time at which `tick` has work to do.
    pub fn next_deadline(&self) -> Option<Duration> {
        match (self.engine.next_deadline(), self.announcer.next_deadline()) {
            (Some(a), Some(b)) => Some(a.min(b)),
            (a, b) => a.or(b),
        }
    }

    pub fn engine(&self) -> &TransitionEngine<C> {
        &self.engine
    }

    pub fn history(&self) -> &HistorySync<L> {
        &self.history
    }

    pub fn history_mut(&mut self) -> &mut HistorySync<L> {
        &mut self.history
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn registry(&self) -> &Arc<ViewRegistry> {
        self.engine.registry()
    }
}

impl<C: Clock + Clone, L: Location, S: AnnouncementSink> SwitchView for Stage<C, L, S> {
    fn switch_view(&mut self, target: &ViewId) -> Result<SwitchOutcome, TransitionError> {
        Stage::switch_view(self, target)
    }

    fn current_view(&self) -> &ViewId {
        Stage::current_view(self)
    }
}
