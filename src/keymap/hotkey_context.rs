//! HotkeyContext: owns and wires the binding table, matcher, chord buffer
//! and pending display
//!
//! Table changes rebuild the matcher; chord timeouts clear the display.

use std::cell::{Ref, RefCell};
use std::rc::Rc;
use std::time::{Duration, Instant};

use super::binding::BindingEntry;
use super::chord::ChordBuffer;
use super::defaults::Preset;
use super::error::KeymapError;
use super::matcher::Matcher;
use super::status::PendingDisplay;
use super::table::BindingTable;
use super::types::{KeyPress, Priority};

/// Display shared between the context and its timeout callback
pub type SharedDisplay = Rc<RefCell<dyn PendingDisplay>>;

pub struct HotkeyContext {
    table: BindingTable,
    matcher: Rc<RefCell<Matcher>>,
    chord_buffer: ChordBuffer,
    display: SharedDisplay,
}

impl HotkeyContext {
    /// Create an empty context with the given chord timeout and display
    pub fn new(
        chord_timeout: Duration,
        display: impl PendingDisplay + 'static,
    ) -> Result<Self, KeymapError> {
        let matcher = Rc::new(RefCell::new(Matcher::new()));
        let display: SharedDisplay = Rc::new(RefCell::new(display));

        let mut table = BindingTable::new();
        let index = Rc::clone(&matcher);
        table.set_on_change(move |entries| index.borrow_mut().rebuild(entries));

        let mut chord_buffer = ChordBuffer::new(chord_timeout)?;
        let indicator = Rc::clone(&display);
        chord_buffer.set_timeout_callback(move || indicator.borrow_mut().clear());

        Ok(Self {
            table,
            matcher,
            chord_buffer,
            display,
        })
    }

    /// Create a context and load `preset` into it
    pub fn with_preset(
        chord_timeout: Duration,
        display: impl PendingDisplay + 'static,
        preset: &Preset,
    ) -> Result<Self, KeymapError> {
        let mut context = Self::new(chord_timeout, display)?;
        context.load_preset(preset)?;
        Ok(context)
    }

    /// Replace the preset tier with `preset`'s hotkeys
    ///
    /// User and plugin bindings are left untouched.
    pub fn load_preset(&mut self, preset: &Preset) -> Result<(), KeymapError> {
        self.table.clear(Some(Priority::Preset));
        for entry in &preset.hotkeys {
            self.table.insert(entry.clone(), Priority::Preset)?;
        }
        tracing::info!(
            "Loaded preset {:?} v{} ({} hotkeys)",
            preset.name,
            preset.version,
            preset.hotkeys.len()
        );
        Ok(())
    }

    pub fn insert(&mut self, entry: BindingEntry, priority: Priority) -> Result<(), KeymapError> {
        self.table.insert(entry, priority)
    }

    pub fn remove(&mut self, entry: &BindingEntry) {
        self.table.remove(entry);
    }

    pub fn clear(&mut self, priority: Option<Priority>) {
        self.table.clear(priority);
    }

    /// Snapshot of every registered binding
    pub fn bindings(&self) -> Vec<BindingEntry> {
        self.table.get_all()
    }

    /// Current matcher index
    pub fn matcher(&self) -> Ref<'_, Matcher> {
        self.matcher.borrow()
    }

    /// Update the chord timeout (called when settings change)
    pub fn set_chord_timeout(&mut self, timeout: Duration) -> Result<(), KeymapError> {
        self.chord_buffer.set_timeout(timeout)
    }

    pub fn chord_timeout(&self) -> Duration {
        self.chord_buffer.timeout()
    }

    /// Feed a press into the chord buffer
    pub fn append(&mut self, press: KeyPress, now: Instant) -> Vec<KeyPress> {
        self.chord_buffer.append(press, now)
    }

    /// Fire the chord timeout if due
    pub fn poll_timeout(&mut self, now: Instant) -> bool {
        self.chord_buffer.poll_timeout(now)
    }

    pub fn next_deadline(&self) -> Option<Instant> {
        self.chord_buffer.deadline()
    }

    pub fn has_pending_chord(&self) -> bool {
        self.chord_buffer.has_pending()
    }

    pub fn show_pending(&self, sequence: &[KeyPress]) {
        self.display.borrow_mut().show_pending(sequence);
    }

    /// Reset to idle: empty chord buffer, hidden indicator
    pub fn reset(&mut self) {
        self.chord_buffer.clear();
        self.display.borrow_mut().clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::keymap::context::{AlwaysApplicable, ContextState};
    use crate::keymap::matcher::MatchResult;
    use crate::keymap::status::StatusIndicator;
    use crate::keymap::types::Modifiers;

    fn ctrl(c: char) -> KeyPress {
        KeyPress::char_with_mods(c, Modifiers::CTRL)
    }

    fn preset(hotkeys: Vec<BindingEntry>) -> Preset {
        Preset {
            name: "test".to_string(),
            description: "test preset".to_string(),
            version: "1.0.0".to_string(),
            author: None,
            hotkeys,
        }
    }

    fn command_for(context: &HotkeyContext, sequence: &[KeyPress]) -> Option<String> {
        let matcher = context.matcher();
        let command = match matcher
            .match_sequence(sequence, &AlwaysApplicable, &ContextState::new())
            .unwrap()
        {
            MatchResult::Exact(entry) => Some(entry.command.clone()),
            _ => None,
        };
        command
    }

    #[test]
    fn test_table_changes_rebuild_matcher() {
        let mut context = HotkeyContext::new(Duration::from_secs(5), StatusIndicator::new()).unwrap();
        let save = BindingEntry::new(ctrl('s'), "editor:save");

        context.insert(save.clone(), Priority::User).unwrap();
        assert_eq!(command_for(&context, &[ctrl('s')]).as_deref(), Some("editor:save"));

        context.remove(&save);
        assert_eq!(command_for(&context, &[ctrl('s')]), None);
    }

    #[test]
    fn test_load_preset_replaces_only_preset_tier() {
        let mut context = HotkeyContext::new(Duration::from_secs(5), StatusIndicator::new()).unwrap();
        context
            .insert(BindingEntry::new(ctrl('u'), "user:cmd"), Priority::User)
            .unwrap();

        context
            .load_preset(&preset(vec![BindingEntry::new(ctrl('a'), "old:cmd")]))
            .unwrap();
        context
            .load_preset(&preset(vec![BindingEntry::new(ctrl('b'), "new:cmd")]))
            .unwrap();

        let commands: Vec<_> = context.bindings().into_iter().map(|e| e.command).collect();
        assert_eq!(commands, vec!["user:cmd", "new:cmd"]);
        assert_eq!(command_for(&context, &[ctrl('a')]), None);
    }

    #[test]
    fn test_timeout_clears_display() {
        let indicator = StatusIndicator::new();
        let mut context =
            HotkeyContext::new(Duration::from_millis(100), indicator.clone()).unwrap();
        let t0 = Instant::now();

        let sequence = context.append(ctrl('x'), t0);
        context.show_pending(&sequence);
        assert_eq!(indicator.text().as_deref(), Some("C-x"));
        assert_eq!(context.next_deadline(), Some(t0 + Duration::from_millis(100)));

        assert!(context.poll_timeout(t0 + Duration::from_millis(100)));
        assert!(!indicator.is_visible());
        assert!(!context.has_pending_chord());
    }

    #[test]
    fn test_reset() {
        let indicator = StatusIndicator::new();
        let mut context = HotkeyContext::new(Duration::from_secs(5), indicator.clone()).unwrap();
        let sequence = context.append(ctrl('x'), Instant::now());
        context.show_pending(&sequence);

        context.reset();
        assert!(!context.has_pending_chord());
        assert!(!indicator.is_visible());
        assert_eq!(context.next_deadline(), None);
    }

    #[test]
    fn test_set_chord_timeout() {
        let mut context = HotkeyContext::new(Duration::from_secs(5), StatusIndicator::new()).unwrap();
        context.set_chord_timeout(Duration::from_millis(750)).unwrap();
        assert_eq!(context.chord_timeout(), Duration::from_millis(750));
        assert!(context.set_chord_timeout(Duration::ZERO).is_err());
    }
}
