//! Editor commands registered by the windowed runtime
//!
//! There is no text buffer behind the window, so the commands act on the
//! kill ring and report what they did through the log.

use std::time::Instant;

use keychord::commands::names;
use keychord::{CommandRegistry, Execution, FnCommand};

/// Text a kill command stores, from the binding's `text` argument
fn killed_text(args: Option<&keychord::keymap::Args>, fallback: &str) -> String {
    args.and_then(|args| args.get("text"))
        .and_then(|value| value.as_str())
        .unwrap_or(fallback)
        .to_string()
}

pub fn editor_commands() -> CommandRegistry {
    let mut registry = CommandRegistry::new();

    registry.register(FnCommand::new(names::SAVE, "Save", |_, ctx| {
        let handle = ctx.completion_handle(names::SAVE);
        let started = Instant::now();
        std::thread::spawn(move || {
            tracing::info!("Saved in {:?}", started.elapsed());
            handle.finish(Ok(()));
        });
        Ok(Execution::Deferred)
    }));

    registry.register(FnCommand::new(
        names::DELETE_WORD,
        "Delete Word",
        |args, ctx| {
            let text = killed_text(args, "word");
            tracing::info!("Killed word {:?}", text);
            ctx.kill_ring.push(text);
            Ok(Execution::Done)
        },
    ));

    registry.register(FnCommand::new(
        names::KILL_REGION,
        "Kill Region",
        |args, ctx| {
            let text = killed_text(args, "region");
            tracing::info!("Killed region {:?}", text);
            ctx.kill_ring.push(text);
            Ok(Execution::Done)
        },
    ));

    registry.register(FnCommand::new(names::YANK, "Yank", |_, ctx| {
        let text = ctx
            .kill_ring
            .yank()
            .ok_or_else(|| anyhow::anyhow!("Kill ring is empty"))?
            .to_string();
        ctx.kill_ring.set_yank_range(0..text.len());
        tracing::info!("Yanked {:?}", text);
        Ok(Execution::Done)
    }));

    registry.register(FnCommand::new(names::YANK_POP, "Yank Pop", |_, ctx| {
        let text = ctx
            .kill_ring
            .yank_pop(&ctx.context)
            .ok_or_else(|| anyhow::anyhow!("Previous command was not a yank"))?
            .to_string();
        ctx.kill_ring.set_yank_range(0..text.len());
        tracing::info!("Yank-popped {:?}", text);
        Ok(Execution::Done)
    }));

    registry
}
