//! Two-state "More Detail" / "Less Detail" toggle on transaction rows.
//!
//! The control carries the row id in its `data` attribute; clicking it swaps
//! the `min-detail-<id>` and `full-detail-<id>` panels and flips the label.

use crate::dom::{Animation, Dom, DomPatch, Selector, Speed};

#[derive(Debug, Clone, PartialEq)]
pub struct DetailToggle {
    pub collapsed_label: String,
    pub expanded_label: String,
    pub collapsed_prefix: String,
    pub expanded_prefix: String,
    /// Attribute on the control holding the row id
    pub row_attr: String,
    pub animation: Animation,
}

impl Default for DetailToggle {
    fn default() -> Self {
        Self {
            collapsed_label: "More Detail".to_string(),
            expanded_label: "Less Detail".to_string(),
            collapsed_prefix: "min-detail-".to_string(),
            expanded_prefix: "full-detail-".to_string(),
            row_attr: "data".to_string(),
            animation: Animation::Slide(Speed::Slow),
        }
    }
}

impl DetailToggle {
    #[must_use]
    pub fn with_animation(mut self, animation: Animation) -> Self {
        self.animation = animation;
        self
    }

    #[must_use]
    pub fn collapsed_panel(&self, row_id: &str) -> Selector {
        Selector::class(format!("{}{row_id}", self.collapsed_prefix))
    }

    #[must_use]
    pub fn expanded_panel(&self, row_id: &str) -> Selector {
        Selector::class(format!("{}{row_id}", self.expanded_prefix))
    }

    /// Patches for a click on `control`.
    ///
    /// Empty when the control is missing, has no row id, or shows neither label.
    pub fn click<D: Dom + ?Sized>(&self, dom: &D, control: &Selector) -> Vec<DomPatch> {
        let Some(label) = dom.text(control) else {
            return Vec::new();
        };
        let Some(row_id) = dom.attr(control, &self.row_attr) else {
            return Vec::new();
        };

        let collapsed = self.collapsed_panel(&row_id);
        let expanded = self.expanded_panel(&row_id);

        let (hide, show, next_label) = match label.trim() {
            l if l == self.collapsed_label => (collapsed, expanded, &self.expanded_label),
            l if l == self.expanded_label => (expanded, collapsed, &self.collapsed_label),
            _ => return Vec::new(),
        };

        vec![
            DomPatch::SwapVisibility {
                hide,
                show,
                animation: self.animation,
            },
            DomPatch::SetText {
                target: control.clone(),
                text: next_label.clone(),
            },
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::{apply, Element, MemoryDocument};

    fn row_page() -> MemoryDocument {
        MemoryDocument::new()
            .with(
                Element::new("detail-42")
                    .with_class("show-extra-detail")
                    .with_attr("data", "42")
                    .with_text("More Detail"),
            )
            .with(Element::anonymous().with_class("min-detail-42"))
            .with(Element::anonymous().with_class("full-detail-42").hidden())
    }

    fn click(toggle: &DetailToggle, doc: &mut MemoryDocument, control: &Selector) -> usize {
        let patches = toggle.click(doc, control);
        for patch in &patches {
            apply(doc, patch);
        }
        patches.len()
    }

    #[test]
    fn test_click_expands_row() {
        let toggle = DetailToggle::default();
        let mut doc = row_page();
        let control = Selector::id("detail-42");

        assert_eq!(click(&toggle, &mut doc, &control), 2);
        assert_eq!(doc.text(&control).as_deref(), Some("Less Detail"));
        assert_eq!(doc.is_visible(&Selector::class("min-detail-42")), Some(false));
        assert_eq!(doc.is_visible(&Selector::class("full-detail-42")), Some(true));
    }

    #[test]
    fn test_double_click_round_trips_for_both_animations() {
        for animation in [Animation::Slide(Speed::Slow), Animation::Fade(Speed::Fast)] {
            let toggle = DetailToggle::default().with_animation(animation);
            let mut doc = row_page();
            let original = doc.clone();
            let control = Selector::id("detail-42");

            click(&toggle, &mut doc, &control);
            click(&toggle, &mut doc, &control);

            assert_eq!(doc.text(&control), original.text(&control));
            for panel in [toggle.collapsed_panel("42"), toggle.expanded_panel("42")] {
                assert_eq!(doc.is_visible(&panel), original.is_visible(&panel));
            }
        }
    }

    #[test]
    fn test_unrecognised_label_does_nothing() {
        let toggle = DetailToggle::default();
        let doc = row_page().with(
            Element::new("detail-42")
                .with_attr("data", "42")
                .with_text("Details"),
        );
        assert!(toggle.click(&doc, &Selector::id("detail-42")).is_empty());
    }

    #[test]
    fn test_control_without_row_id_does_nothing() {
        let toggle = DetailToggle::default();
        let doc = MemoryDocument::new().with(Element::new("detail").with_text("More Detail"));
        assert!(toggle.click(&doc, &Selector::id("detail")).is_empty());
        assert!(toggle.click(&doc, &Selector::id("missing")).is_empty());
    }
}
