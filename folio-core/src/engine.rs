//! Two-phase view transition state machine.
//!
//! ```text
//! Idle(V) --switch_view(T), T != V--> Leaving(V -> T)
//!         --after D--> Entering(T)   [Entered event: fragment + announcement]
//!         --after D--> Idle(T)       [Unlocked event]
//! ```
//!
//! Any request arriving outside `Idle` is dropped. Nothing is queued.

use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, info, warn};

use crate::clock::Clock;
use crate::error::TransitionError;
use crate::registry::{ViewId, ViewRegistry};
use crate::timer::TimerQueue;

/// Shared exit/settle duration `D`.
///
/// The same value must drive the renderer's animation, otherwise the
/// visual and logical state drift apart.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TransitionTiming {
    exit: Duration,
}

impl TransitionTiming {
    pub const DEFAULT_EXIT: Duration = Duration::from_millis(350);

    pub fn new(exit: Duration) -> Self {
        Self { exit }
    }

    /// No animation: both phases complete on the next `advance`.
    pub fn reduced_motion() -> Self {
        Self::new(Duration::ZERO)
    }

    pub fn exit(&self) -> Duration {
        self.exit
    }

    /// Enter-animation window. Always equal to the exit window.
    pub fn settle(&self) -> Duration {
        self.exit
    }

    /// Minimum time between two accepted switches.
    pub fn lock_window(&self) -> Duration {
        self.exit + self.settle()
    }
}

impl Default for TransitionTiming {
    fn default() -> Self {
        Self::new(Self::DEFAULT_EXIT)
    }
}

/// Where the engine is in a transition cycle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Phase {
    Idle { active: ViewId },
    /// Exit animation of `from` is running; `to` is not yet visible.
    Leaving { from: ViewId, to: ViewId },
    /// `active` has been swapped in; the lock is still held.
    Entering { active: ViewId, previous: ViewId },
}

impl Phase {
    /// The view the engine currently reports as current.
    pub fn current(&self) -> &ViewId {
        match self {
            Phase::Idle { active } | Phase::Entering { active, .. } => active,
            Phase::Leaving { from, .. } => from,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Phase::Idle { .. } => "idle",
            Phase::Leaving { .. } => "leaving",
            Phase::Entering { .. } => "entering",
        }
    }
}

/// Per-view rendering state derived from the phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewVisualState {
    Active,
    Leaving,
    Hidden,
}

impl ViewVisualState {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Leaving => "leaving",
            Self::Hidden => "hidden",
        }
    }
}

/// Result of a `switch_view` call that did not fail validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SwitchOutcome {
    Started { from: ViewId, to: ViewId },
    /// Target is already the current view.
    AlreadyActive,
    /// A transition is in flight; the request was dropped.
    Locked,
}

impl SwitchOutcome {
    pub fn is_started(&self) -> bool {
        matches!(self, SwitchOutcome::Started { .. })
    }
}

/// Phase completions reported by [`TransitionEngine::advance`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PhaseEvent {
    /// Phase 1 finished: `to` is now active.
    Entered { from: ViewId, to: ViewId },
    /// Phase 2 finished: the lock is free again.
    Unlocked { view: ViewId },
}

/// Anything that accepts view switch requests.
pub trait SwitchView {
    fn switch_view(&mut self, target: &ViewId) -> Result<SwitchOutcome, TransitionError>;

    fn current_view(&self) -> &ViewId;
}

#[derive(Debug, Clone, Copy)]
enum Step {
    FinishExit,
    ReleaseLock,
}

/// Owns the current/leaving view, the transition lock and the phase timers.
#[derive(Debug)]
pub struct TransitionEngine<C: Clock> {
    registry: Arc<ViewRegistry>,
    clock: C,
    timing: TransitionTiming,
    phase: Phase,
    phase_started: Duration,
    timers: TimerQueue<Step>,
    disposed: bool,
}

impl<C: Clock> TransitionEngine<C> {
    /// Start idle on `initial` with no animation.
    pub fn new(
        registry: Arc<ViewRegistry>,
        clock: C,
        timing: TransitionTiming,
        initial: ViewId,
    ) -> Result<Self, TransitionError> {
        if !registry.contains(&initial) {
            return Err(TransitionError::UnknownView(initial.to_string()));
        }
        let phase_started = clock.now();
        debug!(view = %initial, "Transition engine starting");
        Ok(Self {
            registry,
            clock,
            timing,
            phase: Phase::Idle { active: initial },
            phase_started,
            timers: TimerQueue::new(),
            disposed: false,
        })
    }

    /// Request a switch to `target`.
    ///
    /// Unknown targets fail without touching state. Redundant and locked
    /// requests succeed with a non-`Started` outcome and have no effect.
    pub fn switch_view(&mut self, target: &ViewId) -> Result<SwitchOutcome, TransitionError> {
        if self.disposed {
            return Err(TransitionError::Disposed);
        }
        if !self.registry.contains(target) {
            debug!(target = %target, "Rejecting switch to unknown view");
            return Err(TransitionError::UnknownView(target.to_string()));
        }
        if self.phase.current() == target {
            return Ok(SwitchOutcome::AlreadyActive);
        }
        let Phase::Idle { active } = &self.phase else {
            debug!(target = %target, phase = self.phase.name(), "Transition in flight, dropping request");
            return Ok(SwitchOutcome::Locked);
        };

        let from = active.clone();
        let to = target.clone();
        let now = self.clock.now();

        info!(from = %from, to = %to, "Starting view transition");
        self.phase = Phase::Leaving {
            from: from.clone(),
            to: to.clone(),
        };
        self.phase_started = now;
        self.timers
            .schedule_at(now + self.timing.exit(), Step::FinishExit);

        Ok(SwitchOutcome::Started { from, to })
    }

    /// Fire every phase timer that is due, in order.
    pub fn advance(&mut self) -> Vec<PhaseEvent> {
        let mut events = Vec::new();
        if self.disposed {
            return events;
        }

        let now = self.clock.now();
        while let Some((_, deadline, step)) = self.timers.pop_due(now) {
            match (step, &self.phase) {
                (Step::FinishExit, Phase::Leaving { from, to }) => {
                    let (from, to) = (from.clone(), to.clone());
                    self.phase = Phase::Entering {
                        active: to.clone(),
                        previous: from.clone(),
                    };
                    // Measured from the phase-1 deadline so a late tick
                    // cannot stretch the lock window.
                    self.phase_started = deadline;
                    self.timers
                        .schedule_at(deadline + self.timing.settle(), Step::ReleaseLock);
                    info!(from = %from, to = %to, "View entered");
                    events.push(PhaseEvent::Entered { from, to });
                }
                (Step::ReleaseLock, Phase::Entering { active, .. }) => {
                    let view = active.clone();
                    self.phase = Phase::Idle {
                        active: view.clone(),
                    };
                    self.phase_started = deadline;
                    debug!(view = %view, "Transition lock released");
                    events.push(PhaseEvent::Unlocked { view });
                }
                (step, phase) => {
                    warn!(?step, phase = phase.name(), "Dropping phase timer that does not match state");
                }
            }
        }

        events
    }

    /// Cancel all pending timers and stop accepting requests.
    ///
    /// A transition still in `Leaving` is aborted and its source view stays
    /// current. Returns the number of timers cancelled.
    pub fn dispose(&mut self) -> usize {
        if self.disposed {
            return 0;
        }
        self.disposed = true;

        let cancelled = self.timers.cancel_all();
        if !matches!(self.phase, Phase::Idle { .. }) {
            info!(phase = self.phase.name(), "Aborting transition on dispose");
            self.phase = Phase::Idle {
                active: self.phase.current().clone(),
            };
        }
        debug!(cancelled, "Transition engine disposed");
        cancelled
    }

    pub fn current_view(&self) -> &ViewId {
        self.phase.current()
    }

    pub fn phase(&self) -> &Phase {
        &self.phase
    }

    pub fn leaving_view(&self) -> Option<&ViewId> {
        match &self.phase {
            Phase::Leaving { from, .. } => Some(from),
            _ => None,
        }
    }

    pub fn is_locked(&self) -> bool {
        !matches!(self.phase, Phase::Idle { .. })
    }

    pub fn is_disposed(&self) -> bool {
        self.disposed
    }

    pub fn view_state(&self, view: &ViewId) -> ViewVisualState {
        match &self.phase {
            Phase::Idle { active } | Phase::Entering { active, .. } if active == view => {
                ViewVisualState::Active
            }
            Phase::Leaving { from, .. } if from == view => ViewVisualState::Leaving,
            _ => ViewVisualState::Hidden,
        }
    }

    /// Fraction of the current phase that has elapsed, `1.0` when idle.
    pub fn phase_progress(&self) -> f32 {
        if !self.is_locked() || self.timing.exit().is_zero() {
            return 1.0;
        }
        let elapsed = self.clock.now().saturating_sub(self.phase_started);
        (elapsed.as_secs_f32() / self.timing.exit().as_secs_f32()).min(1.0)
    }

    pub fn next_deadline(&self) -> Option<Duration> {
        self.timers.next_deadline()
    }

    pub fn pending_timers(&self) -> usize {
        self.timers.len()
    }

    pub fn timing(&self) -> TransitionTiming {
        self.timing
    }

    pub fn registry(&self) -> &Arc<ViewRegistry> {
        &self.registry
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }
}

impl<C: Clock> SwitchView for TransitionEngine<C> {
    fn switch_view(&mut self, target: &ViewId) -> Result<SwitchOutcome, TransitionError> {
        TransitionEngine::switch_view(self, target)
    }

    fn current_view(&self) -> &ViewId {
        TransitionEngine::current_view(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::ManualClock;

    const D: Duration = Duration::from_millis(350);

    fn engine_at(initial: &str) -> (TransitionEngine<ManualClock>, ManualClock) {
        let clock = ManualClock::new();
        let engine = TransitionEngine::new(
            Arc::new(ViewRegistry::classic()),
            clock.clone(),
            TransitionTiming::new(D),
            initial.into(),
        )
        .unwrap();
        (engine, clock)
    }

    fn v(id: &str) -> ViewId {
        ViewId::new(id)
    }

    #[test]
    fn new_starts_idle_without_timers() {
        let (engine, _) = engine_at("about");
        assert_eq!(engine.phase(), &Phase::Idle { active: v("about") });
        assert_eq!(engine.pending_timers(), 0);
        assert!(!engine.is_locked());
    }

    #[test]
    fn new_rejects_unregistered_initial_view() {
        let err = TransitionEngine::new(
            Arc::new(ViewRegistry::classic()),
            ManualClock::new(),
            TransitionTiming::default(),
            v("blog"),
        )
        .unwrap_err();
        assert_eq!(err, TransitionError::UnknownView("blog".into()));
    }

    #[test]
    fn switch_to_current_view_is_a_silent_no_op() {
        for id in ["home", "portfolio", "about"] {
            let (mut engine, _) = engine_at(id);
            let outcome = engine.switch_view(&v(id)).unwrap();

            assert_eq!(outcome, SwitchOutcome::AlreadyActive);
            assert_eq!(engine.phase(), &Phase::Idle { active: v(id) });
            assert_eq!(engine.pending_timers(), 0);
            assert!(engine.advance().is_empty());
        }
    }

    #[test]
    fn unknown_target_is_an_error_and_leaves_state_alone() {
        let (mut engine, _) = engine_at("home");
        let err = engine.switch_view(&v("blog")).unwrap_err();

        assert_eq!(err, TransitionError::UnknownView("blog".into()));
        assert_eq!(engine.phase(), &Phase::Idle { active: v("home") });
        assert_eq!(engine.pending_timers(), 0);
    }

    #[test]
    fn accepted_switch_marks_current_view_leaving() {
        let (mut engine, _) = engine_at("home");
        let outcome = engine.switch_view(&v("portfolio")).unwrap();

        assert_eq!(
            outcome,
            SwitchOutcome::Started {
                from: v("home"),
                to: v("portfolio")
            }
        );
        assert_eq!(engine.view_state(&v("home")), ViewVisualState::Leaving);
        assert_eq!(engine.view_state(&v("portfolio")), ViewVisualState::Hidden);
        assert_eq!(engine.view_state(&v("about")), ViewVisualState::Hidden);
        assert_eq!(engine.leaving_view(), Some(&v("home")));
        assert_eq!(engine.current_view(), &v("home"));
        assert!(engine.is_locked());
    }

    #[test]
    fn target_becomes_active_exactly_after_exit_duration() {
        let (mut engine, clock) = engine_at("home");
        engine.switch_view(&v("portfolio")).unwrap();

        clock.advance(D - Duration::from_millis(1));
        assert!(engine.advance().is_empty());
        assert_eq!(engine.current_view(), &v("home"));

        clock.advance(Duration::from_millis(1));
        assert_eq!(
            engine.advance(),
            vec![PhaseEvent::Entered {
                from: v("home"),
                to: v("portfolio")
            }]
        );
        assert_eq!(engine.current_view(), &v("portfolio"));
        assert_eq!(engine.leaving_view(), None);
        assert_eq!(engine.view_state(&v("home")), ViewVisualState::Hidden);
        assert_eq!(engine.view_state(&v("portfolio")), ViewVisualState::Active);
        assert!(engine.is_locked());
    }

    #[test]
    fn lock_releases_exactly_two_durations_after_acceptance() {
        let (mut engine, clock) = engine_at("home");
        engine.switch_view(&v("portfolio")).unwrap();

        clock.advance(D);
        engine.advance();
        clock.advance(D - Duration::from_millis(1));
        assert!(engine.advance().is_empty());
        assert!(engine.is_locked());

        clock.advance(Duration::from_millis(1));
        assert_eq!(
            engine.advance(),
            vec![PhaseEvent::Unlocked { view: v("portfolio") }]
        );
        assert!(!engine.is_locked());
        assert_eq!(engine.pending_timers(), 0);
    }

    #[test]
    fn requests_during_transition_are_dropped_not_queued() {
        let (mut engine, clock) = engine_at("home");
        engine.switch_view(&v("portfolio")).unwrap();

        clock.advance(Duration::from_millis(100));
        assert_eq!(engine.switch_view(&v("about")).unwrap(), SwitchOutcome::Locked);

        clock.advance(D);
        engine.advance();
        assert_eq!(engine.switch_view(&v("about")).unwrap(), SwitchOutcome::Locked);

        clock.advance(D);
        engine.advance();
        assert_eq!(engine.current_view(), &v("portfolio"));
        assert_eq!(engine.pending_timers(), 0);
    }

    #[test]
    fn switching_back_to_source_while_leaving_is_redundant() {
        let (mut engine, _) = engine_at("home");
        engine.switch_view(&v("about")).unwrap();

        assert_eq!(
            engine.switch_view(&v("home")).unwrap(),
            SwitchOutcome::AlreadyActive
        );
        assert_eq!(engine.pending_timers(), 1);
    }

    #[test]
    fn late_tick_fires_both_phases_in_order() {
        let (mut engine, clock) = engine_at("home");
        engine.switch_view(&v("about")).unwrap();

        clock.advance(D * 5);
        assert_eq!(
            engine.advance(),
            vec![
                PhaseEvent::Entered {
                    from: v("home"),
                    to: v("about")
                },
                PhaseEvent::Unlocked { view: v("about") },
            ]
        );
        assert!(!engine.is_locked());
    }

    #[test]
    fn lock_window_is_measured_from_phase_one_deadline() {
        let (mut engine, clock) = engine_at("home");
        engine.switch_view(&v("about")).unwrap();

        // Host ticks 50ms late for phase 1.
        clock.advance(D + Duration::from_millis(50));
        engine.advance();
        assert_eq!(engine.next_deadline(), Some(D * 2));
    }

    #[test]
    fn reduced_motion_completes_on_next_advance() {
        let clock = ManualClock::new();
        let mut engine = TransitionEngine::new(
            Arc::new(ViewRegistry::classic()),
            clock,
            TransitionTiming::reduced_motion(),
            v("home"),
        )
        .unwrap();

        engine.switch_view(&v("about")).unwrap();
        assert_eq!(engine.advance().len(), 2);
        assert_eq!(engine.phase(), &Phase::Idle { active: v("about") });
        assert_eq!(engine.phase_progress(), 1.0);
    }

    #[test]
    fn phase_progress_tracks_elapsed_fraction() {
        let (mut engine, clock) = engine_at("home");
        assert_eq!(engine.phase_progress(), 1.0);

        engine.switch_view(&v("about")).unwrap();
        assert_eq!(engine.phase_progress(), 0.0);

        clock.advance(D / 2);
        assert!((engine.phase_progress() - 0.5).abs() < 0.01);

        clock.advance(D / 2);
        engine.advance();
        assert_eq!(engine.phase_progress(), 0.0);
    }

    #[test]
    fn dispose_cancels_timers_and_aborts_leaving() {
        let (mut engine, clock) = engine_at("home");
        engine.switch_view(&v("about")).unwrap();

        assert_eq!(engine.dispose(), 1);
        clock.advance(D * 4);

        assert!(engine.advance().is_empty());
        assert_eq!(engine.phase(), &Phase::Idle { active: v("home") });
        assert!(!engine.is_locked());
        assert_eq!(engine.dispose(), 0);
    }

    #[test]
    fn dispose_while_entering_keeps_new_view() {
        let (mut engine, clock) = engine_at("home");
        engine.switch_view(&v("about")).unwrap();
        clock.advance(D);
        engine.advance();

        assert_eq!(engine.dispose(), 1);
        assert_eq!(engine.current_view(), &v("about"));
    }

    #[test]
    fn disposed_engine_rejects_requests() {
        let (mut engine, _) = engine_at("home");
        engine.dispose();

        assert_eq!(
            engine.switch_view(&v("about")).unwrap_err(),
            TransitionError::Disposed
        );
        assert!(engine.is_disposed());
    }

    #[test]
    fn timing_lock_window_is_twice_exit() {
        let timing = TransitionTiming::default();
        assert_eq!(timing.exit(), Duration::from_millis(350));
        assert_eq!(timing.settle(), timing.exit());
        assert_eq!(timing.lock_window(), Duration::from_millis(700));
    }
}
