//! Built-in presets
//!
//! Presets are defined in code; the default one is a small Emacs-like set.

use super::binding::BindingEntry;
use super::types::{KeyPress, Modifiers, Priority};
use crate::commands::names;

/// Name of the preset selected when settings don't say otherwise
pub const DEFAULT_PRESET: &str = "default";

/// A named set of hotkeys registered together at preset priority
#[derive(Debug, Clone, PartialEq)]
pub struct Preset {
    pub name: String,
    pub description: String,
    pub version: String,
    pub author: Option<String>,
    pub hotkeys: Vec<BindingEntry>,
}

fn key(c: char, mods: Modifiers) -> KeyPress {
    KeyPress::char_with_mods(c, mods)
}

/// Default Emacs-like preset
pub fn default_preset() -> Preset {
    let ctrl = Modifiers::CTRL;
    let meta = Modifiers::META;

    let hotkeys = vec![
        // Two key sequence: C-x C-s
        BindingEntry::chord(vec![key('x', ctrl), key('s', ctrl)], names::SAVE),
        // Kill/yank commands
        BindingEntry::new(key('d', meta), names::DELETE_WORD),
        BindingEntry::new(key('w', ctrl), names::KILL_REGION),
        BindingEntry::new(key('y', ctrl), names::YANK),
        BindingEntry::new(key('y', meta), names::YANK_POP).when("lastActionWasYank"),
    ]
    .into_iter()
    .map(|entry| entry.with_priority(Priority::Preset))
    .collect();

    Preset {
        name: "Default Emacs-like Preset".to_string(),
        description: "Basic Emacs keybindings".to_string(),
        version: "1.0.0".to_string(),
        author: None,
        hotkeys,
    }
}

/// Look up a built-in preset by its settings name
pub fn preset_by_name(name: &str) -> Option<Preset> {
    match name {
        DEFAULT_PRESET => Some(default_preset()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_preset_contents() {
        let preset = default_preset();
        let canonical: Vec<_> = preset
            .hotkeys
            .iter()
            .map(|e| (e.canonical(), e.command.as_str()))
            .collect();

        assert!(canonical.contains(&("C-x C-s".to_string(), names::SAVE)));
        assert!(canonical.contains(&("M-d".to_string(), names::DELETE_WORD)));
        assert!(preset.hotkeys.iter().all(|e| e.priority == Priority::Preset));
    }

    #[test]
    fn test_preset_by_name() {
        assert!(preset_by_name(DEFAULT_PRESET).is_some());
        assert!(preset_by_name("vim").is_none());
    }
}
