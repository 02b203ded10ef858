//! Pending-sequence display: shows the chord typed so far

use std::cell::RefCell;
use std::rc::Rc;

use super::canonical::canonicalize_sequence;
use super::types::KeyPress;

/// Sink for the "pending chord" indicator
pub trait PendingDisplay {
    /// Show `sequence` as awaiting more input
    fn show_pending(&mut self, sequence: &[KeyPress]);
    /// Hide the indicator
    fn clear(&mut self);
}

/// Status-bar style indicator holding the text to render
///
/// Clones share the same text, so a host can keep one handle for rendering
/// while the pipeline owns another.
#[derive(Debug, Clone, Default)]
pub struct StatusIndicator {
    text: Rc<RefCell<Option<String>>>,
}

impl StatusIndicator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Text currently displayed, `None` when hidden
    pub fn text(&self) -> Option<String> {
        self.text.borrow().clone()
    }

    pub fn is_visible(&self) -> bool {
        self.text.borrow().is_some()
    }
}

impl PendingDisplay for StatusIndicator {
    fn show_pending(&mut self, sequence: &[KeyPress]) {
        let content = canonicalize_sequence(sequence);
        *self.text.borrow_mut() = (!content.is_empty()).then_some(content);
    }

    fn clear(&mut self) {
        *self.text.borrow_mut() = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::keymap::types::Modifiers;

    #[test]
    fn test_show_and_clear() {
        let mut indicator = StatusIndicator::new();
        assert!(!indicator.is_visible());

        indicator.show_pending(&[KeyPress::char_with_mods('x', Modifiers::CTRL)]);
        assert_eq!(indicator.text().as_deref(), Some("C-x"));

        indicator.clear();
        assert_eq!(indicator.text(), None);
    }

    #[test]
    fn test_clones_share_text() {
        let mut indicator = StatusIndicator::new();
        let view = indicator.clone();

        indicator.show_pending(&[KeyPress::char_with_mods('x', Modifiers::CTRL)]);
        assert!(view.is_visible());
    }

    #[test]
    fn test_empty_sequence_hides() {
        let mut indicator = StatusIndicator::new();
        indicator.show_pending(&[]);
        assert!(!indicator.is_visible());
    }
}
