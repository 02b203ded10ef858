//! Shared test helpers for integration tests
//!
//! Note: Functions may appear unused because each test file compiles separately.

#![allow(dead_code)]

use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

use keychord::commands::names;
use keychord::keymap::{default_preset, HotkeyContext, RawKeyEvent, StatusIndicator};
use keychord::{CommandRegistry, Execution, ExecutionContext, FnCommand, InputHandler};

/// Ids of the commands that ran, in order
pub type CommandLog = Rc<RefCell<Vec<String>>>;

pub const PRESET_COMMANDS: [&str; 5] = [
    names::SAVE,
    names::DELETE_WORD,
    names::KILL_REGION,
    names::YANK,
    names::YANK_POP,
];

/// Registry whose commands only record that they ran
pub fn recording_registry(log: &CommandLog) -> CommandRegistry {
    let mut registry = CommandRegistry::new();
    for id in PRESET_COMMANDS {
        let log = Rc::clone(log);
        registry.register(FnCommand::new(id, id, move |_, _| {
            log.borrow_mut().push(id.to_string());
            Ok(Execution::Done)
        }));
    }
    registry
}

/// A started handler with the default preset and a recording registry
pub fn test_handler(timeout: Duration) -> (InputHandler, StatusIndicator, CommandLog) {
    let log = CommandLog::default();
    let indicator = StatusIndicator::new();
    let hotkeys = HotkeyContext::with_preset(timeout, indicator.clone(), &default_preset())
        .expect("default preset should load");

    let mut handler = InputHandler::new(
        hotkeys,
        recording_registry(&log),
        ExecutionContext::default(),
    );
    handler.start();
    (handler, indicator, log)
}

fn letter(c: char) -> RawKeyEvent {
    RawKeyEvent::new(c.to_string(), format!("Key{}", c.to_ascii_uppercase()))
}

pub fn ctrl(c: char) -> RawKeyEvent {
    letter(c).ctrl()
}

pub fn meta(c: char) -> RawKeyEvent {
    letter(c).meta()
}

pub fn plain(c: char) -> RawKeyEvent {
    letter(c)
}

pub fn escape() -> RawKeyEvent {
    RawKeyEvent::new("Escape", "Escape")
}
