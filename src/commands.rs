//! Command registry: the dispatch boundary between hotkeys and behavior
//!
//! Bindings name commands by id. The registry resolves ids to `Command`
//! implementations and runs them, containing their failures so a broken
//! command never takes down the input pipeline.

use indexmap::IndexMap;

use crate::execution::ExecutionContext;
use crate::keymap::Args;

/// Ids of the built-in editor commands
pub mod names {
    pub const SAVE: &str = "editor:save";
    pub const DELETE_WORD: &str = "editor:delete-word";
    pub const KILL_REGION: &str = "editor:kill-region";
    pub const YANK: &str = "editor:yank";
    pub const YANK_POP: &str = "editor:yank-pop";
}

/// How a command finished
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Execution {
    /// Work completed inside `execute`
    Done,
    /// Work continues elsewhere and reports through a `CompletionHandle`
    Deferred,
}

/// A named operation a hotkey can trigger
pub trait Command {
    fn id(&self) -> &str;

    fn name(&self) -> &str;

    fn execute(&self, args: Option<&Args>, ctx: &mut ExecutionContext)
        -> anyhow::Result<Execution>;
}

type CommandFn = dyn Fn(Option<&Args>, &mut ExecutionContext) -> anyhow::Result<Execution>;

/// Command backed by a closure
pub struct FnCommand {
    id: String,
    name: String,
    body: Box<CommandFn>,
}

impl FnCommand {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        body: impl Fn(Option<&Args>, &mut ExecutionContext) -> anyhow::Result<Execution> + 'static,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            body: Box::new(body),
        }
    }
}

impl Command for FnCommand {
    fn id(&self) -> &str {
        &self.id
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn execute(
        &self,
        args: Option<&Args>,
        ctx: &mut ExecutionContext,
    ) -> anyhow::Result<Execution> {
        (self.body)(args, ctx)
    }
}

impl std::fmt::Debug for FnCommand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FnCommand")
            .field("id", &self.id)
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}

#[derive(Default)]
pub struct CommandRegistry {
    commands: IndexMap<String, Box<dyn Command>>,
}

impl CommandRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a command under its id
    ///
    /// Returns false, leaving the existing command in place, when the id is
    /// already taken.
    pub fn register(&mut self, command: impl Command + 'static) -> bool {
        let id = command.id().to_string();
        if self.commands.contains_key(&id) {
            tracing::warn!("Command {} already registered", id);
            return false;
        }

        tracing::debug!("Registered command {} ({})", id, command.name());
        self.commands.insert(id, Box::new(command));
        true
    }

    pub fn unregister(&mut self, id: &str) -> bool {
        self.commands.shift_remove(id).is_some()
    }

    pub fn get(&self, id: &str) -> Option<&dyn Command> {
        self.commands.get(id).map(|command| command.as_ref())
    }

    pub fn contains(&self, id: &str) -> bool {
        self.commands.contains_key(id)
    }

    /// Registered ids, in registration order
    pub fn ids(&self) -> Vec<String> {
        self.commands.keys().cloned().collect()
    }

    /// Run the command registered under `id`
    ///
    /// Returns true when the command ran (or was handed off) without error.
    pub fn execute(&self, id: &str, args: Option<&Args>, ctx: &mut ExecutionContext) -> bool {
        let Some(command) = self.commands.get(id) else {
            tracing::warn!("Unknown command {}", id);
            return false;
        };

        match command.execute(args, ctx) {
            Ok(Execution::Done) => true,
            Ok(Execution::Deferred) => {
                tracing::debug!("Command {} deferred", id);
                true
            }
            Err(e) => {
                tracing::error!("Error executing command {}: {:#}", id, e);
                false
            }
        }
    }

    /// Log deferred command failures reported since the last poll
    ///
    /// Returns how many completions were drained.
    pub fn poll_completions(&self, ctx: &ExecutionContext) -> usize {
        let completions = ctx.drain_completions();
        for completion in &completions {
            match &completion.result {
                Ok(()) => tracing::debug!("Command {} completed", completion.command),
                Err(e) => tracing::error!(
                    "Error executing command {} (async): {:#}",
                    completion.command,
                    e
                ),
            }
        }
        completions.len()
    }
}

impl std::fmt::Debug for CommandRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CommandRegistry")
            .field("commands", &self.commands.keys().collect::<Vec<_>>())
            .finish()
    }
}
