//! Main application struct and event loop for folio TUI.

use std::io;
use std::sync::Arc;
use std::time::Duration;

use crossterm::event::{
    Event, EventStream, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent,
    MouseEventKind,
};
use folio_core::{
    CallToAction, Clock, Content, FolioConfig, FolioError, FragmentOutcome, LiveRegion, Location,
    MemoryLocation, MonotonicClock, NavigationController, NavigationSink, Phase, PhaseEvent, Stage,
    SwitchOutcome, TransitionError, ViewId,
};
use futures_util::{Stream, StreamExt};
use ratatui::{
    Frame, Terminal,
    backend::Backend,
    layout::{Constraint, Layout, Rect},
    style::Style,
    widgets::Block,
};
use tracing::{debug, warn};

use crate::keybindings::{Action, KeyBindings};
use crate::state::{FocusArea, FocusState};
use crate::views::{PanelView, ViewRenderer};
use crate::widgets::{CtaBarWidget, LocationBarWidget, NavBarWidget, StatusLineWidget};
use crate::{Theme, folio_default, restore_terminal, setup_terminal};

/// Redraw interval while a transition is animating.
pub const FRAME_INTERVAL: Duration = Duration::from_millis(33);

/// Longest wait for input when nothing is scheduled.
pub const IDLE_INTERVAL: Duration = Duration::from_millis(500);

/// Stage backed by the in-memory address bar and live region.
pub type FolioStage<C> = Stage<C, MemoryLocation, LiveRegion>;

/// Main TUI application.
#[derive(Debug)]
pub struct App<C: Clock + Clone = MonotonicClock> {
    pub stage: FolioStage<C>,
    pub navigation: NavigationController,
    pub focus: FocusState,
    pub keybindings: KeyBindings,
    pub theme: Theme,
    pub content: Content,
    pub running: bool,
}

impl<C: Clock + Clone> App<C> {
    /// Focus starts on the nav item of the current view.
    pub fn new(stage: FolioStage<C>, navigation: NavigationController, content: Content) -> Self {
        let focus = FocusState::on_nav(navigation.index_of(stage.current_view()).unwrap_or(0));
        Self {
            stage,
            navigation,
            focus,
            keybindings: KeyBindings::default(),
            theme: folio_default(),
            content,
            running: true,
        }
    }

    /// Build the registry, timing and buttons from config and open the stage.
    pub fn from_config(
        config: &FolioConfig,
        location: MemoryLocation,
        clock: C,
    ) -> Result<Self, FolioError> {
        let registry = Arc::new(config.registry()?);
        let timing = config.timing()?;
        let navigation = NavigationController::new(&registry, config.calls_to_action(&registry));
        let stage = Stage::open(
            registry,
            clock,
            timing,
            location,
            LiveRegion::new(),
            config.announcement_linger(),
        )?;
        Ok(Self::new(stage, navigation, config.content.clone()))
    }

    /// Handles a key event.
    ///
    /// Ctrl-C always quits; everything else goes through the keybindings.
    pub fn handle_key(&mut self, key: KeyEvent) {
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            self.running = false;
            return;
        }

        if let Some(action) = self.keybindings.resolve(key, self.focus.area) {
            self.execute_action(action);
        }
    }

    /// Handles a mouse event over a screen of size `area`.
    ///
    /// A left click on a nav item or a call-to-action button activates it
    /// like Enter would.
    pub fn handle_mouse(&mut self, mouse: MouseEvent, area: Rect) {
        if mouse.kind != MouseEventKind::Down(MouseButton::Left) {
            return;
        }
        let [_, nav_area, _, cta_area, _] = screen_layout(area);

        if mouse.row == nav_area.y && mouse.column >= nav_area.x {
            let hit = NavBarWidget::new(self.navigation.items()).hit_test(mouse.column - nav_area.x);
            if let Some(index) = hit {
                self.focus.focus(index);
                let result = self.navigation.on_click(index, &mut self.stage);
                self.log_switch(result);
            }
        } else if mouse.row == cta_area.y && mouse.column >= cta_area.x {
            let ctas = self.visible_calls_to_action();
            let hit = CtaBarWidget::new(ctas.iter().copied())
                .hit_test(mouse.column - cta_area.x)
                .and_then(|index| ctas.get(index).map(|cta| (index, (*cta).clone())));
            if let Some((index, cta)) = hit {
                self.focus.select_cta(index);
                let result = self.navigation.on_call_to_action(&cta, &mut self.stage);
                self.log_switch(result);
            }
        }
    }

    fn execute_action(&mut self, action: Action) {
        match action {
            Action::Quit => self.running = false,
            Action::ToggleFocus => self.focus.toggle(),
            Action::Navigate(key) => {
                match self.navigation.on_key(key, &mut self.focus, &mut self.stage) {
                    Ok(outcome) => debug!(?outcome, "Navigation key handled"),
                    Err(err) => warn!(error = %err, "Navigation key failed"),
                }
            }
            Action::Select => match self.focus.area {
                FocusArea::Nav => {
                    let result = self.navigation.on_click(self.focus.nav_index(), &mut self.stage);
                    self.log_switch(result);
                }
                FocusArea::Content => {
                    if let Some(cta) = self.focused_call_to_action() {
                        let result = self.navigation.on_call_to_action(&cta, &mut self.stage);
                        self.log_switch(result);
                    }
                }
            },
            Action::NextCallToAction | Action::PrevCallToAction => {
                let len = self.visible_calls_to_action().len();
                self.focus
                    .step_cta(action == Action::NextCallToAction, len);
            }
            Action::HistoryBack => {
                if self.stage.history_mut().location_mut().back() {
                    self.pump_location();
                }
            }
            Action::HistoryForward => {
                if self.stage.history_mut().location_mut().forward() {
                    self.pump_location();
                }
            }
            Action::JumpToView(number) => {
                if let Some(index) = number.checked_sub(1)
                    && index < self.navigation.items().len()
                {
                    self.focus.focus(index);
                    let result = self.navigation.on_click(index, &mut self.stage);
                    self.log_switch(result);
                }
            }
        }
    }

    fn log_switch(&self, result: Result<SwitchOutcome, TransitionError>) {
        match result {
            Ok(outcome) => debug!(?outcome, "Switch requested"),
            Err(err) => warn!(error = %err, "Switch request failed"),
        }
    }

    /// Feed queued address-bar changes into history sync.
    fn pump_location(&mut self) -> usize {
        let changes = self.stage.history_mut().location_mut().take_notifications();
        for fragment in &changes {
            let outcome = self.stage.on_fragment_changed(fragment);
            if let FragmentOutcome::Ignored(reason) = outcome {
                debug!(fragment = %fragment, ?reason, "Fragment change ignored");
            }
        }
        changes.len()
    }

    /// Fire due timers and apply any pending address-bar changes.
    pub fn tick(&mut self) -> Vec<PhaseEvent> {
        let events = self.stage.tick();
        if events
            .iter()
            .any(|e| matches!(e, PhaseEvent::Entered { .. }))
        {
            self.focus.reset_cta();
        }
        self.pump_location();
        events
    }

    /// How long the event loop may wait before the next tick is due.
    pub fn poll_interval(&self) -> Duration {
        let cap = if self.stage.engine().is_locked() {
            FRAME_INTERVAL
        } else {
            IDLE_INTERVAL
        };
        let now = self.stage.engine().clock().now();
        self.stage
            .next_deadline()
            .map_or(cap, |deadline| deadline.saturating_sub(now).min(cap))
    }

    /// Buttons belonging to the view on screen.
    pub fn visible_calls_to_action(&self) -> Vec<&CallToAction> {
        self.navigation
            .calls_to_action(self.stage.current_view())
            .collect()
    }

    fn focused_call_to_action(&self) -> Option<CallToAction> {
        self.visible_calls_to_action()
            .get(self.focus.cta_index())
            .map(|cta| (*cta).clone())
    }

    fn label_for<'a>(&'a self, view: &'a ViewId) -> &'a str {
        self.stage.registry().label(view).unwrap_or(view.as_str())
    }

    /// Renders the application to the terminal frame.
    pub fn render(&self, frame: &mut Frame) {
        let area = frame.area();
        frame.render_widget(Block::default().style(Style::default().bg(self.theme.bg)), area);

        let [location_area, nav_area, body_area, cta_area, status_area] = screen_layout(area);

        let location = self.stage.history().location();
        let fragment = location.fragment();
        let location_bar = LocationBarWidget {
            fragment: &fragment,
            position: location.cursor(),
            depth: location.entries().len(),
            can_go_back: location.can_go_back(),
            can_go_forward: location.can_go_forward(),
        };
        frame.render_widget(location_bar.to_paragraph(&self.theme), location_area);

        let current = self.stage.current_view();
        let nav_bar = NavBarWidget::new(self.navigation.items())
            .selected(self.navigation.index_of(current))
            .focused((self.focus.area == FocusArea::Nav).then_some(self.focus.nav_index()));
        frame.render_widget(nav_bar.to_paragraph(&self.theme), nav_area);

        let panel = PanelView::new(
            self.label_for(current),
            self.content.panel_for(current),
            self.stage.view_state(current),
        )
        .entering(matches!(self.stage.phase(), Phase::Entering { .. }));
        panel.render(frame, body_area, &self.theme);

        let mut cta_bar = CtaBarWidget::new(self.visible_calls_to_action());
        if self.focus.area == FocusArea::Content {
            cta_bar.focused = Some(self.focus.cta_index());
        }
        frame.render_widget(cta_bar.to_paragraph(&self.theme), cta_area);

        let status = StatusLineWidget {
            message: self.stage.sink().latest(),
            phase: self.stage.phase().name(),
            progress: self.stage.engine().phase_progress(),
        };
        frame.render_widget(status.to_paragraph(&self.theme), status_area);
    }

    /// Runs the main event loop.
    ///
    /// Sets up the terminal, runs until quit, disposes the stage so no
    /// phase timer outlives the UI, then restores the terminal.
    pub async fn run(&mut self) -> io::Result<()> {
        let mut terminal = setup_terminal()?;

        let result = self.event_loop(&mut terminal, EventStream::new()).await;

        let cancelled = self.stage.dispose();
        debug!(cancelled, "Stage disposed on exit");

        // Always restore terminal, even if event loop failed
        restore_terminal(&mut terminal)?;

        result
    }

    /// Draw, wait for input or the next deadline, tick; until quit or the
    /// input stream ends.
    async fn event_loop<B: Backend>(
        &mut self,
        terminal: &mut Terminal<B>,
        events: impl Stream<Item = io::Result<Event>>,
    ) -> io::Result<()> {
        let mut events = std::pin::pin!(events);

        while self.running {
            terminal.draw(|f| self.render(f))?;

            let wait = self.poll_interval();
            tokio::select! {
                event = events.next() => match event {
                    Some(Ok(Event::Key(key))) if key.kind == KeyEventKind::Press => {
                        self.handle_key(key);
                    }
                    Some(Ok(Event::Mouse(mouse))) => {
                        let size = terminal.size()?;
                        self.handle_mouse(mouse, Rect::new(0, 0, size.width, size.height));
                    }
                    Some(Ok(_)) => {}
                    Some(Err(err)) => return Err(err),
                    None => self.running = false,
                },
                _ = tokio::time::sleep(wait) => {}
            }

            self.tick();
        }

        Ok(())
    }
}

/// Location bar, nav bar, view body, call-to-action row, status line.
fn screen_layout(area: Rect) -> [Rect; 5] {
    Layout::vertical([
        Constraint::Length(1),
        Constraint::Length(1),
        Constraint::Min(0),
        Constraint::Length(1),
        Constraint::Length(1),
    ])
    .areas(area)
}
