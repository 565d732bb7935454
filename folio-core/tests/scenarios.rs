//! End-to-end timelines driven through `Stage` with a manual clock.

use std::sync::Arc;
use std::time::Duration;

use folio_core::{
    DEFAULT_LINGER, FragmentOutcome, IgnoreReason, LiveRegion, Location, ManualClock,
    MemoryLocation, NavKey, NavOutcome, NavigationController, NavigationSink, Phase, PhaseEvent,
    Stage, SwitchOutcome, TransitionError, TransitionTiming, ViewId, ViewRegistry,
    ViewVisualState,
};

type TestStage = Stage<ManualClock, MemoryLocation, LiveRegion>;

fn ms(n: u64) -> Duration {
    Duration::from_millis(n)
}

fn open_with(registry: ViewRegistry, fragment: &str) -> (TestStage, ManualClock) {
    let clock = ManualClock::new();
    let stage = Stage::open(
        Arc::new(registry),
        clock.clone(),
        TransitionTiming::default(),
        MemoryLocation::new(fragment),
        LiveRegion::new(),
        DEFAULT_LINGER,
    )
    .unwrap();
    (stage, clock)
}

fn open(fragment: &str) -> (TestStage, ManualClock) {
    open_with(ViewRegistry::classic(), fragment)
}

/// Deliver queued address-bar notifications the way a host event loop would.
fn pump_location(stage: &mut TestStage) -> Vec<FragmentOutcome> {
    let changes = stage.history_mut().location_mut().take_notifications();
    changes
        .iter()
        .map(|fragment| stage.on_fragment_changed(fragment))
        .collect()
}

fn active_views(stage: &TestStage) -> Vec<ViewId> {
    stage
        .registry()
        .ids()
        .filter(|id| stage.view_state(id) == ViewVisualState::Active)
        .cloned()
        .collect()
}

#[derive(Default)]
struct Focus(Option<usize>);

impl NavigationSink for Focus {
    fn focused_index(&self) -> Option<usize> {
        self.0
    }

    fn focus(&mut self, index: usize) {
        self.0 = Some(index);
    }
}

#[test]
fn home_to_about_timeline() {
    let (mut stage, clock) = open("#home");

    // t=0
    let outcome = stage.switch_view(&"about".into()).unwrap();
    assert_eq!(
        outcome,
        SwitchOutcome::Started {
            from: "home".into(),
            to: "about".into()
        }
    );
    assert_eq!(stage.view_state(&"home".into()), ViewVisualState::Leaving);
    assert_eq!(stage.view_state(&"about".into()), ViewVisualState::Hidden);
    assert_eq!(stage.history().location().fragment(), "#home");

    // t=349: nothing yet
    clock.advance(ms(349));
    assert!(stage.tick().is_empty());
    assert_eq!(stage.view_state(&"home".into()), ViewVisualState::Leaving);

    // t=350: about entered, fragment pushed, announcement attached
    clock.advance(ms(1));
    let events = stage.tick();
    assert_eq!(
        events,
        [PhaseEvent::Entered {
            from: "home".into(),
            to: "about".into()
        }]
    );
    assert_eq!(stage.view_state(&"about".into()), ViewVisualState::Active);
    assert_eq!(stage.view_state(&"home".into()), ViewVisualState::Hidden);
    assert_eq!(stage.history().location().fragment(), "#about");
    assert_eq!(stage.history().location().entries(), ["#home", "#about"]);
    assert_eq!(stage.sink().latest(), Some("Switched to about view"));
    assert!(stage.engine().is_locked());

    // t=700: lock released
    clock.advance(ms(350));
    assert_eq!(
        stage.tick(),
        [PhaseEvent::Unlocked {
            view: "about".into()
        }]
    );
    assert!(!stage.engine().is_locked());

    // t=1350: announcement gone
    clock.advance(ms(650));
    stage.tick();
    assert!(stage.sink().is_empty());
}

#[test]
fn request_inside_lock_window_is_dropped() {
    let (mut stage, clock) = open("#home");
    stage.switch_view(&"about".into()).unwrap();

    clock.set(ms(100));
    stage.tick();
    assert_eq!(
        stage.switch_view(&"portfolio".into()).unwrap(),
        SwitchOutcome::Locked
    );

    clock.set(ms(500));
    stage.tick();
    assert_eq!(
        stage.switch_view(&"portfolio".into()).unwrap(),
        SwitchOutcome::Locked
    );

    clock.set(ms(1000));
    stage.tick();
    assert_eq!(stage.current_view().as_str(), "about");
    assert_eq!(stage.view_state(&"portfolio".into()), ViewVisualState::Hidden);
    assert_eq!(stage.history().location().entries(), ["#home", "#about"]);
}

#[test]
fn request_after_lock_window_starts_new_transition() {
    let (mut stage, clock) = open("#home");
    stage.switch_view(&"about".into()).unwrap();

    clock.set(ms(350));
    stage.tick();
    clock.set(ms(720));
    stage.tick();

    let outcome = stage.switch_view(&"portfolio".into()).unwrap();
    assert!(outcome.is_started());
    assert_eq!(stage.view_state(&"about".into()), ViewVisualState::Leaving);

    clock.set(ms(1070));
    stage.tick();
    assert_eq!(stage.current_view().as_str(), "portfolio");
    assert_eq!(stage.history().location().fragment(), "#portfolio");
}

#[test]
fn fragment_on_load_activates_directly() {
    let (mut stage, _) = open("#about");
    assert_eq!(stage.phase(), &Phase::Idle { active: "about".into() });
    assert_eq!(stage.view_state(&"about".into()), ViewVisualState::Active);
    assert!(stage.tick().is_empty());
    assert!(stage.sink().is_empty());
    assert_eq!(stage.history().location().entries(), ["#about"]);
}

#[test]
fn unknown_or_empty_fragment_on_load_uses_default() {
    let (stage, _) = open("#blog");
    assert_eq!(stage.current_view().as_str(), "home");

    let (stage, _) = open("");
    assert_eq!(stage.current_view().as_str(), "home");

    let registry = ViewRegistry::extended();
    let (stage, _) = open_with(registry, "");
    assert_eq!(stage.current_view().as_str(), "about");
}

#[test]
fn switching_to_active_view_is_a_no_op() {
    let (mut stage, clock) = open("#portfolio");
    assert_eq!(
        stage.switch_view(&"portfolio".into()).unwrap(),
        SwitchOutcome::AlreadyActive
    );
    assert_eq!(stage.next_deadline(), None);

    clock.advance(ms(1000));
    assert!(stage.tick().is_empty());
    assert!(stage.sink().is_empty());
    assert_eq!(stage.history().location().entries(), ["#portfolio"]);
}

#[test]
fn unknown_view_is_rejected_without_state_change() {
    let (mut stage, _) = open("#home");
    assert_eq!(
        stage.switch_view(&"blog".into()),
        Err(TransitionError::UnknownView("blog".into()))
    );
    assert_eq!(stage.phase(), &Phase::Idle { active: "home".into() });
    assert_eq!(stage.next_deadline(), None);
}

#[test]
fn at_most_one_view_active_at_every_instant() {
    let (mut stage, clock) = open("#home");
    let targets = ["about", "portfolio", "home", "about"];

    for target in targets {
        stage.switch_view(&target.into()).unwrap();
        for _ in 0..80 {
            clock.advance(ms(10));
            stage.tick();
            assert!(active_views(&stage).len() <= 1);
        }
    }
    assert_eq!(active_views(&stage).len(), 1);
}

#[test]
fn every_view_round_trips_through_the_fragment() {
    for registry in [ViewRegistry::classic(), ViewRegistry::extended()] {
        let (mut stage, clock) = open_with(registry.clone(), "");
        for view in registry.ids() {
            if stage.current_view() == view {
                continue;
            }
            stage.switch_view(view).unwrap();
            clock.advance(ms(700));
            stage.tick();

            let fragment = stage.history().location().fragment();
            assert_eq!(fragment, view.fragment());

            // Reloading on that fragment lands on the same view.
            let (reloaded, _) = open_with(registry.clone(), &fragment);
            assert_eq!(reloaded.current_view(), view);
        }
    }
}

#[test]
fn back_and_forward_replay_history() {
    let (mut stage, clock) = open("#home");
    stage.switch_view(&"about".into()).unwrap();
    clock.advance(ms(700));
    stage.tick();
    stage.switch_view(&"portfolio".into()).unwrap();
    clock.advance(ms(700));
    stage.tick();
    assert_eq!(
        stage.history().location().entries(),
        ["#home", "#about", "#portfolio"]
    );

    assert!(stage.history_mut().location_mut().back());
    let outcomes = pump_location(&mut stage);
    assert!(matches!(
        outcomes.as_slice(),
        [FragmentOutcome::Switched(SwitchOutcome::Started { .. })]
    ));
    clock.advance(ms(700));
    stage.tick();
    assert_eq!(stage.current_view().as_str(), "about");

    // Entering via back keeps the stack and the forward entry intact.
    let location = stage.history().location();
    assert_eq!(location.entries(), ["#home", "#about", "#portfolio"]);
    assert_eq!(location.cursor(), 1);
    assert!(location.can_go_forward());
    assert!(pump_location(&mut stage).is_empty());

    assert!(stage.history_mut().location_mut().forward());
    assert!(matches!(
        pump_location(&mut stage).as_slice(),
        [FragmentOutcome::Switched(SwitchOutcome::Started { .. })]
    ));
    clock.advance(ms(700));
    stage.tick();
    assert_eq!(stage.current_view().as_str(), "portfolio");
    assert_eq!(stage.history().location().cursor(), 2);
}

/// Browse home → about → portfolio and let each transition settle.
fn browse_three_views(stage: &mut TestStage, clock: &ManualClock) {
    for view in ["about", "portfolio"] {
        stage.switch_view(&view.into()).unwrap();
        clock.advance(ms(700));
        stage.tick();
    }
}

#[test]
fn repeated_back_walks_to_the_first_view() {
    let (mut stage, clock) = open("#home");
    browse_three_views(&mut stage, &clock);

    for expected in ["about", "home"] {
        assert!(stage.history_mut().location_mut().back());
        let outcomes = pump_location(&mut stage);
        assert!(
            !outcomes.contains(&FragmentOutcome::Ignored(IgnoreReason::SelfOriginated)),
            "back reported as own write: {outcomes:?}"
        );
        assert!(matches!(
            outcomes.as_slice(),
            [FragmentOutcome::Switched(SwitchOutcome::Started { .. })]
        ));
        clock.advance(ms(700));
        stage.tick();
        assert_eq!(stage.current_view().as_str(), expected);
    }

    let location = stage.history().location();
    assert_eq!(location.cursor(), 0);
    assert_eq!(location.entries(), ["#home", "#about", "#portfolio"]);
    assert!(!location.can_go_back());
}

#[test]
fn new_switch_after_back_replaces_forward_entries() {
    let (mut stage, clock) = open("#home");
    browse_three_views(&mut stage, &clock);

    assert!(stage.history_mut().location_mut().back());
    pump_location(&mut stage);
    clock.advance(ms(700));
    stage.tick();

    stage.switch_view(&"home".into()).unwrap();
    clock.advance(ms(700));
    stage.tick();

    let location = stage.history().location();
    assert_eq!(location.entries(), ["#home", "#about", "#home"]);
    assert!(!location.can_go_forward());
}

#[test]
fn back_during_lock_window_is_dropped() {
    let (mut stage, clock) = open("#home");
    stage.switch_view(&"about".into()).unwrap();
    clock.advance(ms(350));
    stage.tick();

    assert!(stage.history_mut().location_mut().back());
    let outcomes = pump_location(&mut stage);
    assert_eq!(
        outcomes,
        [FragmentOutcome::Switched(SwitchOutcome::Locked)]
    );

    clock.advance(ms(350));
    stage.tick();
    assert_eq!(stage.current_view().as_str(), "about");
}

#[test]
fn manual_fragment_edit_switches_view() {
    let (mut stage, clock) = open("#home");
    stage.history_mut().location_mut().assign_fragment("#portfolio");
    pump_location(&mut stage);

    assert_eq!(stage.view_state(&"home".into()), ViewVisualState::Leaving);
    clock.advance(ms(350));
    stage.tick();
    assert_eq!(stage.current_view().as_str(), "portfolio");
}

#[test]
fn manual_fragment_edit_to_unknown_view_is_ignored() {
    let (mut stage, _) = open("#home");
    stage.history_mut().location_mut().assign_fragment("#blog");
    assert_eq!(
        pump_location(&mut stage),
        [FragmentOutcome::Ignored(IgnoreReason::Unknown)]
    );
    assert_eq!(stage.current_view().as_str(), "home");
}

#[test]
fn host_without_history_api_still_updates_fragment() {
    let clock = ManualClock::new();
    let mut stage = Stage::open(
        Arc::new(ViewRegistry::classic()),
        clock.clone(),
        TransitionTiming::default(),
        MemoryLocation::new("#home").without_push_support(),
        LiveRegion::new(),
        DEFAULT_LINGER,
    )
    .unwrap();

    stage.switch_view(&"about".into()).unwrap();
    clock.advance(ms(350));
    stage.tick();
    assert_eq!(stage.history().location().fragment(), "#about");
    assert_eq!(
        pump_location(&mut stage),
        [FragmentOutcome::Ignored(IgnoreReason::SelfOriginated)]
    );
    assert!(stage.engine().is_locked());
    clock.advance(ms(350));
    stage.tick();
    assert!(!stage.engine().is_locked());
}

#[test]
fn keyboard_navigation_moves_focus_and_switches() {
    let registry = ViewRegistry::classic();
    let controller = NavigationController::new(&registry, Vec::new());
    let (mut stage, clock) = open_with(registry, "#home");
    let mut focus = Focus(Some(0));

    let outcome = controller
        .on_key(NavKey::Previous, &mut focus, &mut stage)
        .unwrap();
    assert_eq!(focus.0, Some(2));
    assert!(matches!(
        outcome,
        NavOutcome::Moved {
            index: 2,
            switch: SwitchOutcome::Started { .. }
        }
    ));

    // Focus still moves while the request is dropped.
    let outcome = controller
        .on_key(NavKey::Previous, &mut focus, &mut stage)
        .unwrap();
    assert_eq!(focus.0, Some(1));
    assert!(matches!(
        outcome,
        NavOutcome::Moved {
            switch: SwitchOutcome::Locked,
            ..
        }
    ));

    clock.advance(ms(700));
    stage.tick();
    assert_eq!(stage.current_view().as_str(), "about");
}

#[test]
fn dispose_stops_all_pending_work() {
    let (mut stage, clock) = open("#home");
    stage.switch_view(&"about".into()).unwrap();
    clock.advance(ms(100));

    assert_eq!(stage.dispose(), 1);
    assert_eq!(stage.current_view().as_str(), "home");
    assert_eq!(
        stage.switch_view(&"portfolio".into()),
        Err(TransitionError::Disposed)
    );

    clock.advance(ms(2000));
    assert!(stage.tick().is_empty());
    assert_eq!(stage.history().location().entries(), ["#home"]);
    assert!(stage.sink().is_empty());
}

#[test]
fn reduced_motion_enters_on_next_tick() {
    let clock = ManualClock::new();
    let mut stage = Stage::open(
        Arc::new(ViewRegistry::classic()),
        clock.clone(),
        TransitionTiming::reduced_motion(),
        MemoryLocation::new(""),
        LiveRegion::new(),
        DEFAULT_LINGER,
    )
    .unwrap();

    stage.switch_view(&"portfolio".into()).unwrap();
    let events = stage.tick();
    assert_eq!(events.len(), 2);
    assert_eq!(stage.current_view().as_str(), "portfolio");
    assert!(!stage.engine().is_locked());
    assert_eq!(stage.sink().latest(), Some("Switched to portfolio view"));
}
