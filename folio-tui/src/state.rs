//! Focus state for the TUI.

use folio_core::NavigationSink;

/// Which group of interactive elements has keyboard focus.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum FocusArea {
    #[default]
    Nav,
    /// The calls to action inside the visible view.
    Content,
}

/// Keyboard focus across the navigation bar and the call-to-action row.
#[derive(Debug, Clone, Default)]
pub struct FocusState {
    pub area: FocusArea,
    nav_index: usize,
    cta_index: usize,
}

impl FocusState {
    /// Start with focus on the nav item at `index`.
    pub fn on_nav(index: usize) -> Self {
        Self {
            area: FocusArea::Nav,
            nav_index: index,
            cta_index: 0,
        }
    }

    pub fn nav_index(&self) -> usize {
        self.nav_index
    }

    pub fn cta_index(&self) -> usize {
        self.cta_index
    }

    pub fn toggle(&mut self) {
        self.area = match self.area {
            FocusArea::Nav => FocusArea::Content,
            FocusArea::Content => FocusArea::Nav,
        };
    }

    /// Cycle through `len` calls to action.
    pub fn step_cta(&mut self, forward: bool, len: usize) {
        if len == 0 {
            self.cta_index = 0;
            return;
        }
        let current = self.cta_index.min(len - 1);
        self.cta_index = if forward {
            (current + 1) % len
        } else {
            (current + len - 1) % len
        };
    }

    /// Move focus to the call to action at `index`.
    pub fn select_cta(&mut self, index: usize) {
        self.area = FocusArea::Content;
        self.cta_index = index;
    }

    /// Reset the call-to-action cursor, e.g. when the visible view changes.
    pub fn reset_cta(&mut self) {
        self.cta_index = 0;
    }
}

impl NavigationSink for FocusState {
    fn focused_index(&self) -> Option<usize> {
        (self.area == FocusArea::Nav).then_some(self.nav_index)
    }

    fn focus(&mut self, index: usize) {
        self.area = FocusArea::Nav;
        self.nav_index = index;
    }
}
