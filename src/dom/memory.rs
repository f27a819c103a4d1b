use std::collections::{BTreeMap, BTreeSet};

use super::{Animation, Dom, Selector};

/// A child row of a container (a table row, a transaction entry)
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Row {
    pub html: String,
    pub classes: BTreeSet<String>,
    /// Transition used by the most recent replacement
    pub last_animation: Animation,
}

impl Row {
    pub fn new(html: impl Into<String>) -> Self {
        Self {
            html: html.into(),
            classes: BTreeSet::new(),
            last_animation: Animation::None,
        }
    }

    #[must_use]
    pub fn has_class(&self, class: &str) -> bool {
        self.classes.contains(class)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Element {
    pub id: Option<String>,
    pub classes: BTreeSet<String>,
    pub attrs: BTreeMap<String, String>,
    pub text: String,
    pub visible: bool,
    pub rows: Vec<Row>,
    /// Transition used by the most recent visibility change
    pub last_animation: Animation,
}

impl Element {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: Some(id.into()),
            ..Self::anonymous()
        }
    }

    #[must_use]
    pub fn anonymous() -> Self {
        Self {
            id: None,
            classes: BTreeSet::new(),
            attrs: BTreeMap::new(),
            text: String::new(),
            visible: true,
            rows: Vec::new(),
            last_animation: Animation::None,
        }
    }

    #[must_use]
    pub fn with_class(mut self, class: impl Into<String>) -> Self {
        self.classes.insert(class.into());
        self
    }

    #[must_use]
    pub fn with_attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attrs.insert(name.into(), value.into());
        self
    }

    #[must_use]
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = text.into();
        self
    }

    #[must_use]
    pub fn with_rows<I, S>(mut self, rows: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.rows = rows.into_iter().map(Row::new).collect();
        self
    }

    #[must_use]
    pub fn hidden(mut self) -> Self {
        self.visible = false;
        self
    }

    fn matches(&self, selector: &Selector) -> bool {
        match selector {
            Selector::Id(id) => self.id.as_deref() == Some(id.as_str()),
            Selector::Class(class) => self.classes.contains(class),
        }
    }
}

/// In-memory document used by the headless client and the tests.
///
/// Elements are looked up on every call; nothing is cached between patches.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MemoryDocument {
    elements: Vec<Element>,
}

impl MemoryDocument {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an element, replacing an existing one with the same id
    pub fn insert(&mut self, element: Element) {
        if let Some(id) = element.id.clone() {
            let selector = Selector::Id(id);
            if let Some(existing) = self.elements.iter_mut().find(|e| e.matches(&selector)) {
                *existing = element;
                return;
            }
        }
        self.elements.push(element);
    }

    #[must_use]
    pub fn with(mut self, element: Element) -> Self {
        self.insert(element);
        self
    }

    #[must_use]
    pub fn get(&self, selector: &Selector) -> Option<&Element> {
        self.elements.iter().find(|e| e.matches(selector))
    }

    #[must_use]
    pub fn is_visible(&self, selector: &Selector) -> Option<bool> {
        self.get(selector).map(|e| e.visible)
    }

    #[must_use]
    pub fn rows(&self, selector: &Selector) -> Option<&[Row]> {
        self.get(selector).map(|e| e.rows.as_slice())
    }

    /// One line per identified element, for logging the page state
    #[must_use]
    pub fn summary(&self) -> Vec<String> {
        self.elements
            .iter()
            .filter_map(|e| {
                let id = e.id.as_deref()?;
                let state = if e.visible { "visible" } else { "hidden" };
                Some(if e.rows.is_empty() {
                    format!("#{id} [{state}] {:?}", e.text)
                } else {
                    format!("#{id} [{state}] {} rows", e.rows.len())
                })
            })
            .collect()
    }

    fn matching_mut<'a>(
        &'a mut self,
        selector: &'a Selector,
    ) -> impl Iterator<Item = &'a mut Element> + 'a {
        self.elements.iter_mut().filter(move |e| e.matches(selector))
    }

    fn first_mut(&mut self, selector: &Selector) -> Option<&mut Element> {
        self.elements.iter_mut().find(|e| e.matches(selector))
    }
}

impl Dom for MemoryDocument {
    fn text(&self, selector: &Selector) -> Option<String> {
        self.get(selector).map(|e| e.text.clone())
    }

    fn attr(&self, selector: &Selector, name: &str) -> Option<String> {
        self.get(selector).and_then(|e| e.attrs.get(name).cloned())
    }

    fn row_count(&self, selector: &Selector) -> Option<usize> {
        self.get(selector).map(|e| e.rows.len())
    }

    fn append_html(&mut self, selector: &Selector, html: &str) -> bool {
        let mut found = false;
        for element in self.matching_mut(selector) {
            element.rows.push(Row::new(html));
            found = true;
        }
        found
    }

    fn insert_before_first(&mut self, selector: &Selector, html: &str) -> bool {
        let mut found = false;
        for element in self.matching_mut(selector) {
            element.rows.insert(0, Row::new(html));
            found = true;
        }
        found
    }

    fn replace_row(
        &mut self,
        selector: &Selector,
        index: usize,
        html: &str,
        animation: Animation,
    ) -> bool {
        match self.first_mut(selector).and_then(|e| e.rows.get_mut(index)) {
            Some(row) => {
                row.html = html.to_string();
                row.last_animation = animation;
                true
            }
            None => false,
        }
    }

    fn set_row_class(
        &mut self,
        selector: &Selector,
        index: usize,
        class: &str,
        enabled: bool,
    ) -> bool {
        match self.first_mut(selector).and_then(|e| e.rows.get_mut(index)) {
            Some(row) => {
                if enabled {
                    row.classes.insert(class.to_string());
                } else {
                    row.classes.remove(class);
                }
                true
            }
            None => false,
        }
    }

    fn clear(&mut self, selector: &Selector) -> bool {
        let mut found = false;
        for element in self.matching_mut(selector) {
            element.rows.clear();
            element.text.clear();
            found = true;
        }
        found
    }

    fn set_text(&mut self, selector: &Selector, text: &str) -> bool {
        let mut found = false;
        for element in self.matching_mut(selector) {
            element.text = text.to_string();
            found = true;
        }
        found
    }

    fn set_visible(&mut self, selector: &Selector, visible: bool, animation: Animation) -> usize {
        let mut count = 0;
        for element in self.matching_mut(selector) {
            element.visible = visible;
            element.last_animation = animation;
            count += 1;
        }
        count
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::Speed;

    fn table() -> MemoryDocument {
        MemoryDocument::new()
            .with(Element::new("latest-blocks-table").with_rows(["<td>3</td>", "<td>2</td>"]))
            .with(Element::new("balance").with_text("0"))
            .with(Element::anonymous().with_class("min-detail-5"))
            .with(Element::anonymous().with_class("min-detail-5"))
    }

    #[test]
    fn test_insert_replaces_same_id() {
        let mut doc = table();
        doc.insert(Element::new("balance").with_text("12"));
        assert_eq!(doc.text(&Selector::id("balance")).as_deref(), Some("12"));
        assert_eq!(doc.summary().len(), 2);
    }

    #[test]
    fn test_row_operations() {
        let mut doc = table();
        let target = Selector::id("latest-blocks-table");

        assert!(doc.insert_before_first(&target, "<td>4</td>"));
        assert_eq!(doc.row_count(&target), Some(3));
        assert_eq!(doc.rows(&target).unwrap()[0].html, "<td>4</td>");

        let fade = Animation::Fade(Speed::Fast);
        assert!(doc.replace_row(&target, 2, "<td>2*</td>", fade));
        assert_eq!(doc.rows(&target).unwrap()[2].last_animation, fade);
        assert_eq!(doc.rows(&target).unwrap()[1].last_animation, Animation::None);
        assert!(!doc.replace_row(&target, 3, "<td>x</td>", Animation::None));

        assert!(doc.set_row_class(&target, 1, "warning", true));
        assert!(doc.rows(&target).unwrap()[1].has_class("warning"));
        assert!(doc.set_row_class(&target, 1, "warning", false));
        assert!(!doc.rows(&target).unwrap()[1].has_class("warning"));

        assert!(doc.clear(&target));
        assert_eq!(doc.row_count(&target), Some(0));
    }

    #[test]
    fn test_class_selector_matches_every_element() {
        let mut doc = table();
        let count = doc.set_visible(
            &Selector::class("min-detail-5"),
            false,
            Animation::Fade(Speed::Fast),
        );
        assert_eq!(count, 2);
        assert_eq!(
            doc.set_visible(&Selector::class("min-detail-6"), false, Animation::None),
            0
        );
    }

    #[test]
    fn test_missing_targets_report_no_match() {
        let mut doc = MemoryDocument::new();
        let missing = Selector::id("transactions");
        assert!(!doc.append_html(&missing, "<div></div>"));
        assert!(!doc.set_text(&missing, "x"));
        assert!(!doc.clear(&missing));
        assert_eq!(doc.row_count(&missing), None);
        assert!(doc.summary().is_empty());
    }
}
