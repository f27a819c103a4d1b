//! Document seam: selectors, the [`Dom`] trait and the patches applied through it.

pub mod memory;
mod patch;

pub use memory::{Element, MemoryDocument, Row};
pub use patch::{apply, Animation, ClassToggle, DomPatch, PatchOutcome, SkipReason, Speed};

use std::fmt;

/// How a patch addresses elements: a unique id or every element with a class
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Selector {
    Id(String),
    Class(String),
}

impl Selector {
    pub fn id(id: impl Into<String>) -> Self {
        Self::Id(id.into())
    }

    pub fn class(class: impl Into<String>) -> Self {
        Self::Class(class.into())
    }
}

impl fmt::Display for Selector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Id(id) => write!(f, "#{id}"),
            Self::Class(class) => write!(f, ".{class}"),
        }
    }
}

/// Operations the patcher needs from a document.
///
/// Mutating operations return whether anything matched; a `false` (or zero)
/// result means the patch was a no-op.
pub trait Dom {
    /// Text content of the first element matching `selector`
    fn text(&self, selector: &Selector) -> Option<String>;

    /// Attribute value of the first element matching `selector`
    fn attr(&self, selector: &Selector, name: &str) -> Option<String>;

    /// Rows of the first container matching `selector`
    fn row_count(&self, selector: &Selector) -> Option<usize>;

    fn append_html(&mut self, selector: &Selector, html: &str) -> bool;

    /// Insert before the current first row, or append when there is none
    fn insert_before_first(&mut self, selector: &Selector, html: &str) -> bool;

    /// Replace the inner HTML of row `index` using `animation`; false when out of range
    fn replace_row(
        &mut self,
        selector: &Selector,
        index: usize,
        html: &str,
        animation: Animation,
    ) -> bool;

    fn set_row_class(&mut self, selector: &Selector, index: usize, class: &str, enabled: bool)
        -> bool;

    /// Remove all rows and text
    fn clear(&mut self, selector: &Selector) -> bool;

    fn set_text(&mut self, selector: &Selector, text: &str) -> bool;

    /// Show or hide every matching element; returns how many matched
    fn set_visible(&mut self, selector: &Selector, visible: bool, animation: Animation) -> usize;
}
