//! Typed presentation handles.
//!
//! Every piece of DOM presentation state the core writes is reached through a
//! handle owned by exactly one updater. A handle remembers the last value it
//! wrote and skips writes that would not change anything.

use crate::platform::{Document, ElementId};

/// A class on one element, toggled by a single owner.
#[derive(Debug, Clone)]
pub struct ClassFlag {
    element: ElementId,
    class: &'static str,
    current: Option<bool>,
}

impl ClassFlag {
    /// Creates a handle. The first `set` always writes.
    #[must_use]
    pub const fn new(element: ElementId, class: &'static str) -> Self {
        Self { element, class, current: None }
    }

    /// Target element.
    #[must_use]
    pub const fn element(&self) -> ElementId { self.element }

    /// Adds or removes the class. Returns `true` if the DOM was written.
    pub fn set(&mut self, doc: &mut dyn Document, enabled: bool) -> bool {
        if self.current == Some(enabled) {
            return false;
        }
        doc.set_class(self.element, self.class, enabled);
        self.current = Some(enabled);
        true
    }

    /// Last written state.
    #[must_use]
    pub const fn is_set(&self) -> bool { matches!(self.current, Some(true)) }
}

/// An inline style property on one element.
#[derive(Debug, Clone)]
pub struct StyleSlot {
    element: ElementId,
    property: &'static str,
    current: Option<String>,
}

impl StyleSlot {
    /// Creates a handle. The first `set` always writes.
    #[must_use]
    pub const fn new(element: ElementId, property: &'static str) -> Self {
        Self { element, property, current: None }
    }

    /// Writes the value. Returns `true` if the DOM was written.
    pub fn set(&mut self, doc: &mut dyn Document, value: &str) -> bool {
        if self.current.as_deref() == Some(value) {
            return false;
        }
        doc.set_style(self.element, self.property, value);
        self.current = Some(value.to_string());
        true
    }

    /// Last written value.
    #[must_use]
    pub fn value(&self) -> Option<&str> { self.current.as_deref() }
}

/// A custom property on the document root.
#[derive(Debug, Clone)]
pub struct RootProperty {
    slot: StyleSlot,
}

impl RootProperty {
    /// Creates a handle bound to the document root.
    #[must_use]
    pub fn new(doc: &dyn Document, property: &'static str) -> Self {
        Self { slot: StyleSlot::new(doc.root(), property) }
    }

    /// Writes the value. Returns `true` if the DOM was written.
    pub fn set(&mut self, doc: &mut dyn Document, value: &str) -> bool { self.slot.set(doc, value) }

    /// Last written value.
    #[must_use]
    pub fn value(&self) -> Option<&str> { self.slot.value() }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::MemoryPage;

    #[test]
    fn test_class_flag_skips_redundant_writes() {
        let mut page = MemoryPage::default();
        let body = page.body();
        let mut flag = ClassFlag::new(body, "scrolled");

        assert!(flag.set(&mut page, false));
        assert!(!flag.set(&mut page, false));
        assert!(flag.set(&mut page, true));
        assert!(page.has_class(body, "scrolled"));
        assert!(flag.is_set());
        assert_eq!(page.mutation_count(), 2);
    }

    #[test]
    fn test_style_slot_skips_identical_values() {
        let mut page = MemoryPage::default();
        let body = page.body();
        let mut slot = StyleSlot::new(body, "transform");

        assert!(slot.set(&mut page, "scale(1)"));
        assert!(!slot.set(&mut page, "scale(1)"));
        assert_eq!(page.style(body, "transform"), Some("scale(1)"));
        assert_eq!(slot.value(), Some("scale(1)"));
    }

    #[test]
    fn test_root_property_targets_root() {
        let mut page = MemoryPage::default();
        let mut prop = RootProperty::new(&page, "--mx");
        prop.set(&mut page, "50.00%");
        assert_eq!(page.style(page.root(), "--mx"), Some("50.00%"));
    }
}
