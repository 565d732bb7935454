//! Pointer and keyboard navigation between views.
//!
//! Key handling only applies while focus is on one of the navigation
//! items. Focus moves before the switch request is made, so a dropped
//! (locked) request still leaves focus on the chosen item.

use tracing::{debug, warn};

use crate::engine::{SwitchOutcome, SwitchView};
use crate::error::TransitionError;
use crate::registry::{ViewId, ViewRegistry};

/// Direction table for the navigation keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavKey {
    /// `ArrowRight` / `ArrowDown`
    Next,
    /// `ArrowLeft` / `ArrowUp`
    Previous,
    /// `Home`
    First,
    /// `End`
    Last,
}

impl NavKey {
    /// Map a DOM-style key name.
    pub fn from_key_name(name: &str) -> Option<Self> {
        match name {
            "ArrowRight" | "ArrowDown" => Some(Self::Next),
            "ArrowLeft" | "ArrowUp" => Some(Self::Previous),
            "Home" => Some(Self::First),
            "End" => Some(Self::Last),
            _ => None,
        }
    }

    /// Index selected from `current`, following the registry's cyclic order.
    pub fn target_index(self, current: usize, registry: &ViewRegistry) -> usize {
        match self {
            NavKey::Next => registry.next_index(current),
            NavKey::Previous => registry.prev_index(current),
            NavKey::First => 0,
            NavKey::Last => registry.len() - 1,
        }
    }
}

/// Where the navigation items live on screen.
pub trait NavigationSink {
    /// Index of the focused navigation item, if focus is inside the navigation.
    fn focused_index(&self) -> Option<usize>;

    fn focus(&mut self, index: usize);
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavItem {
    pub view: ViewId,
    pub label: String,
}

/// A button elsewhere in the UI bound to a fixed destination.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallToAction {
    /// View the button is shown on.
    pub on: ViewId,
    pub label: String,
    pub target: ViewId,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NavOutcome {
    /// Focus was not on a navigation item.
    Unfocused,
    Moved { index: usize, switch: SwitchOutcome },
}

#[derive(Debug, Clone)]
pub struct NavigationController {
    registry: ViewRegistry,
    items: Vec<NavItem>,
    calls_to_action: Vec<CallToAction>,
}

impl NavigationController {
    /// One navigation item per registered view, in registry order.
    ///
    /// Calls to action naming unregistered views are dropped.
    pub fn new(registry: &ViewRegistry, calls_to_action: Vec<CallToAction>) -> Self {
        let items = registry
            .entries()
            .iter()
            .map(|e| NavItem {
                view: e.id.clone(),
                label: e.label.clone(),
            })
            .collect();

        let calls_to_action = calls_to_action
            .into_iter()
            .filter(|cta| {
                let ok = registry.contains(&cta.on) && registry.contains(&cta.target);
                if !ok {
                    warn!(on = %cta.on, target = %cta.target, label = %cta.label, "Dropping call to action with unknown view");
                }
                ok
            })
            .collect();

        Self {
            registry: registry.clone(),
            items,
            calls_to_action,
        }
    }

    pub fn items(&self) -> &[NavItem] {
        &self.items
    }

    pub fn index_of(&self, view: &ViewId) -> Option<usize> {
        self.items.iter().position(|item| &item.view == view)
    }

    /// Handle a navigation key.
    pub fn on_key(
        &self,
        key: NavKey,
        sink: &mut impl NavigationSink,
        target: &mut impl SwitchView,
    ) -> Result<NavOutcome, TransitionError> {
        let Some(current) = sink.focused_index().filter(|i| *i < self.items.len()) else {
            return Ok(NavOutcome::Unfocused);
        };

        let index = key.target_index(current, &self.registry);
        sink.focus(index);
        let view = &self.items[index].view;
        debug!(?key, from = current, to = index, view = %view, "Navigation key");

        let switch = target.switch_view(view)?;
        Ok(NavOutcome::Moved { index, switch })
    }

    /// Pointer activation of the item at `index`.
    pub fn on_click(
        &self,
        index: usize,
        target: &mut impl SwitchView,
    ) -> Result<SwitchOutcome, TransitionError> {
        let item = self
            .items
            .get(index)
            .ok_or_else(|| TransitionError::UnknownView(format!("nav item {index}")))?;
        target.switch_view(&item.view)
    }

    pub fn on_call_to_action(
        &self,
        cta: &CallToAction,
        target: &mut impl SwitchView,
    ) -> Result<SwitchOutcome, TransitionError> {
        debug!(label = %cta.label, target = %cta.target, "Call to action");
        target.switch_view(&cta.target)
    }

    /// Buttons shown on `view`, in configuration order.
    pub fn calls_to_action(&self, view: &ViewId) -> impl Iterator<Item = &CallToAction> {
        let view = view.clone();
        self.calls_to_action.iter().filter(move |cta| cta.on == view)
    }
}
