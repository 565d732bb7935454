//! The fixed, ordered set of views a portfolio can show.
//!
//! Order only matters for cyclic keyboard navigation; everything else
//! treats the registry as a membership test.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::RegistryError;

/// Identifier of a single view, e.g. `home` or `portfolio`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ViewId(String);

impl ViewId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The address-bar fragment naming this view, including the `#`.
    pub fn fragment(&self) -> String {
        format!("#{}", self.0)
    }
}

impl fmt::Display for ViewId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ViewId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

/// A registered view and the label shown for it in navigation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewEntry {
    pub id: ViewId,
    pub label: String,
}

impl ViewEntry {
    pub fn new(id: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            id: ViewId::new(id),
            label: label.into(),
        }
    }

    /// Entry whose label is the id with its first letter capitalised.
    pub fn from_id(id: &str) -> Self {
        Self::new(id, capitalise(id))
    }
}

/// Immutable registry of views, constructed once at startup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewRegistry {
    entries: Vec<ViewEntry>,
    default: Option<ViewId>,
}

impl ViewRegistry {
    /// Build a registry, validating that ids are unique and fragment-safe.
    pub fn new(entries: Vec<ViewEntry>) -> Result<Self, RegistryError> {
        if entries.is_empty() {
            return Err(RegistryError::Empty);
        }

        for (i, entry) in entries.iter().enumerate() {
            if !is_fragment_safe(entry.id.as_str()) {
                return Err(RegistryError::InvalidId(entry.id.to_string()));
            }
            if entries[..i].iter().any(|e| e.id == entry.id) {
                return Err(RegistryError::Duplicate(entry.id.to_string()));
            }
        }

        Ok(Self {
            entries,
            default: None,
        })
    }

    pub fn from_ids(ids: &[&str]) -> Result<Self, RegistryError> {
        Self::new(ids.iter().map(|id| ViewEntry::from_id(id)).collect())
    }

    /// `home`, `portfolio`, `about`.
    pub fn classic() -> Self {
        Self {
            entries: vec![
                ViewEntry::new("home", "Home"),
                ViewEntry::new("portfolio", "Portfolio"),
                ViewEntry::new("about", "About"),
            ],
            default: None,
        }
    }

    /// The six-section layout: about through contact.
    pub fn extended() -> Self {
        Self {
            entries: vec![
                ViewEntry::new("about", "About"),
                ViewEntry::new("experience", "Experience"),
                ViewEntry::new("projects", "Projects"),
                ViewEntry::new("education", "Education"),
                ViewEntry::new("skills", "Skills"),
                ViewEntry::new("contact", "Contact"),
            ],
            default: None,
        }
    }

    /// Set the view shown when the address bar names no valid view.
    pub fn with_default(mut self, view: ViewId) -> Result<Self, RegistryError> {
        if !self.contains(&view) {
            return Err(RegistryError::UnknownDefault(view.to_string()));
        }
        self.default = Some(view);
        Ok(self)
    }

    /// The configured default, else `home` if registered, else the first view.
    pub fn default_view(&self) -> &ViewId {
        if let Some(view) = &self.default {
            return view;
        }
        self.resolve("home").unwrap_or(&self.entries[0].id)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> &[ViewEntry] {
        &self.entries
    }

    pub fn ids(&self) -> impl Iterator<Item = &ViewId> {
        self.entries.iter().map(|e| &e.id)
    }

    pub fn get(&self, index: usize) -> Option<&ViewId> {
        self.entries.get(index).map(|e| &e.id)
    }

    pub fn index_of(&self, view: &ViewId) -> Option<usize> {
        self.entries.iter().position(|e| &e.id == view)
    }

    pub fn contains(&self, view: &ViewId) -> bool {
        self.index_of(view).is_some()
    }

    /// Look up a registered view by its raw identifier.
    pub fn resolve(&self, id: &str) -> Option<&ViewId> {
        self.entries
            .iter()
            .find(|e| e.id.as_str() == id)
            .map(|e| &e.id)
    }

    pub fn label(&self, view: &ViewId) -> Option<&str> {
        self.entries
            .iter()
            .find(|e| &e.id == view)
            .map(|e| e.label.as_str())
    }

    pub fn first(&self) -> &ViewId {
        &self.entries[0].id
    }

    pub fn last(&self) -> &ViewId {
        &self.entries[self.entries.len() - 1].id
    }

    /// Next index in cyclic order.
    pub fn next_index(&self, index: usize) -> usize {
        (index + 1) % self.len()
    }

    /// Previous index in cyclic order.
    pub fn prev_index(&self, index: usize) -> usize {
        (index + self.len() - 1) % self.len()
    }
}

fn is_fragment_safe(id: &str) -> bool {
    !id.is_empty()
        && !id
            .chars()
            .any(|c| c.is_whitespace() || matches!(c, '#' | '/' | '?'))
}

fn capitalise(id: &str) -> String {
    let mut chars = id.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
