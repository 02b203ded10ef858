//! Input handler: turns keydown events into hotkey dispatches
//!
//! Each event runs through normalize → chord buffer → matcher → registry.
//! The handler decides per event whether the host should skip its default
//! handling, and resets to idle on any pipeline fault.

use std::time::{Duration, Instant};

use crate::commands::CommandRegistry;
use crate::config::Settings;
use crate::execution::ExecutionContext;
use crate::keymap::{
    default_preset, normalize, preset_by_name, BindingEntry, ConditionEvaluator, FlagConditions,
    HotkeyContext, KeyPress, KeymapError, MatchResult, PendingDisplay, Preset, RawKeyEvent,
};

/// What happened to a keydown event
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyOutcome {
    /// Modifier-only press
    Ignored,
    /// Escape cancelled any pending chord
    Escaped,
    /// A binding matched; `invoked` is false when the command was missing or failed
    Executed { command: String, invoked: bool },
    /// First key of a chord, waiting for the second
    Pending,
    /// Second key of a chord matched nothing
    ChordAborted,
    /// Not a hotkey, or the handler is stopped
    PassThrough,
    /// The pipeline failed and was reset
    Faulted,
}

impl KeyOutcome {
    /// Whether the host should skip its default handling of the event
    pub fn suppresses_default(&self) -> bool {
        matches!(
            self,
            KeyOutcome::Executed { .. } | KeyOutcome::Pending | KeyOutcome::ChordAborted
        )
    }
}

/// Owned form of a match, so the matcher borrow ends before dispatch
enum Step {
    Execute(BindingEntry),
    Pending,
    Aborted,
    PassThrough,
}

pub struct InputHandler {
    hotkeys: HotkeyContext,
    registry: CommandRegistry,
    execution: ExecutionContext,
    evaluator: Box<dyn ConditionEvaluator>,
    listening: bool,
}

impl InputHandler {
    /// Create a stopped handler; call `start` to begin processing events
    pub fn new(
        hotkeys: HotkeyContext,
        registry: CommandRegistry,
        execution: ExecutionContext,
    ) -> Self {
        Self {
            hotkeys,
            registry,
            execution,
            evaluator: Box::new(FlagConditions),
            listening: false,
        }
    }

    /// Build the whole pipeline from persisted settings
    ///
    /// An unknown preset name falls back to the default preset.
    pub fn from_settings(
        settings: &Settings,
        display: impl PendingDisplay + 'static,
        registry: CommandRegistry,
    ) -> Result<Self, KeymapError> {
        let preset = preset_by_name(&settings.selected_preset).unwrap_or_else(|| {
            tracing::warn!(
                "Unknown preset {:?}, using default",
                settings.selected_preset
            );
            default_preset()
        });

        let hotkeys = HotkeyContext::with_preset(settings.chord_timeout(), display, &preset)?;
        let execution = ExecutionContext::new(settings.kill_ring_max_size);
        Ok(Self::new(hotkeys, registry, execution))
    }

    pub fn with_evaluator(mut self, evaluator: impl ConditionEvaluator + 'static) -> Self {
        self.evaluator = Box::new(evaluator);
        self
    }

    pub fn start(&mut self) {
        if !self.listening {
            tracing::debug!("Input handler started");
            self.listening = true;
        }
    }

    /// Stop processing; pending chord state is kept as is
    pub fn stop(&mut self) {
        if self.listening {
            tracing::debug!("Input handler stopped");
            self.listening = false;
        }
    }

    pub fn is_listening(&self) -> bool {
        self.listening
    }

    /// Process one keydown event at time `now`
    pub fn handle_key_down(&mut self, event: &RawKeyEvent, now: Instant) -> KeyOutcome {
        if !self.listening {
            return KeyOutcome::PassThrough;
        }

        let press = normalize(event);

        if press.key.is_modifier() {
            return KeyOutcome::Ignored;
        }

        if self.hotkeys.matcher().is_escape(&press) {
            tracing::debug!("Escape pressed, clearing chord state");
            self.hotkeys.reset();
            return KeyOutcome::Escaped;
        }

        match self.process(press, now) {
            Ok(outcome) => outcome,
            Err(e) => {
                tracing::error!("Error handling key event {:?}: {}", event.key, e);
                self.hotkeys.reset();
                KeyOutcome::Faulted
            }
        }
    }

    fn process(&mut self, press: KeyPress, now: Instant) -> Result<KeyOutcome, KeymapError> {
        let sequence = self.hotkeys.append(press, now);

        match self.resolve(&sequence)? {
            Step::Execute(entry) => {
                tracing::debug!("Matched {} -> {}", entry.canonical(), entry.command);
                let invoked =
                    self.registry
                        .execute(&entry.command, entry.args.as_ref(), &mut self.execution);
                self.hotkeys.reset();

                let execution = &mut self.execution;
                execution
                    .kill_ring
                    .update_last_action_was_yank(&entry.command, &mut execution.context);

                Ok(KeyOutcome::Executed {
                    command: entry.command,
                    invoked,
                })
            }
            Step::Pending => {
                tracing::debug!("Prefix matched, awaiting second key");
                self.hotkeys.show_pending(&sequence);
                Ok(KeyOutcome::Pending)
            }
            Step::Aborted => {
                tracing::debug!("Chord matched nothing, discarding");
                self.hotkeys.reset();
                Ok(KeyOutcome::ChordAborted)
            }
            Step::PassThrough => {
                self.hotkeys.reset();
                Ok(KeyOutcome::PassThrough)
            }
        }
    }

    fn resolve(&self, sequence: &[KeyPress]) -> Result<Step, KeymapError> {
        let matcher = self.hotkeys.matcher();
        let result =
            matcher.match_sequence(sequence, self.evaluator.as_ref(), &self.execution.context)?;

        let step = match result {
            MatchResult::Exact(entry) => Step::Execute(entry.clone()),
            MatchResult::Prefix => Step::Pending,
            MatchResult::None { is_chord: true } => Step::Aborted,
            MatchResult::None { is_chord: false } => Step::PassThrough,
        };
        Ok(step)
    }

    /// Fire a due chord timeout and log finished deferred commands
    ///
    /// Returns true when the chord timed out.
    pub fn tick(&mut self, now: Instant) -> bool {
        let timed_out = self.hotkeys.poll_timeout(now);
        if timed_out {
            tracing::debug!("Chord timed out");
        }
        self.registry.poll_completions(&self.execution);
        timed_out
    }

    /// When the host should wake up to call `tick`
    pub fn next_deadline(&self) -> Option<Instant> {
        self.hotkeys.next_deadline()
    }

    pub fn set_chord_timeout(&mut self, timeout: Duration) -> Result<(), KeymapError> {
        self.hotkeys.set_chord_timeout(timeout)
    }

    pub fn load_preset(&mut self, preset: &Preset) -> Result<(), KeymapError> {
        self.hotkeys.load_preset(preset)
    }

    pub fn hotkeys(&self) -> &HotkeyContext {
        &self.hotkeys
    }

    pub fn hotkeys_mut(&mut self) -> &mut HotkeyContext {
        &mut self.hotkeys
    }

    pub fn registry(&self) -> &CommandRegistry {
        &self.registry
    }

    pub fn registry_mut(&mut self) -> &mut CommandRegistry {
        &mut self.registry
    }

    pub fn execution(&self) -> &ExecutionContext {
        &self.execution
    }

    pub fn execution_mut(&mut self) -> &mut ExecutionContext {
        &mut self.execution
    }
}
