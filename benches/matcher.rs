//! Benchmarks for the hotkey matching hot path
//!
//! Run with: cargo bench matcher

use keychord::keymap::{
    canonicalize_sequence, AlwaysApplicable, BindingEntry, ContextState, FlagConditions,
    KeyPress, Matcher, Modifiers, Priority,
};

fn main() {
    divan::main();
}

/// A table shaped like a large user keymap: many single keys, a C-x prefix
/// family of chords, and a few conditional bindings
fn bindings(count: usize) -> Vec<BindingEntry> {
    let letters: Vec<char> = ('a'..='z').collect();
    let mods = [
        Modifiers::CTRL,
        Modifiers::META,
        Modifiers::ALT,
        Modifiers::CTRL | Modifiers::SHIFT,
    ];

    (0..count)
        .map(|i| {
            let key = KeyPress::char_with_mods(letters[i % letters.len()], mods[i % mods.len()]);
            let command = format!("bench:command-{}", i);
            let entry = if i % 3 == 0 {
                let prefix = KeyPress::char_with_mods('x', Modifiers::CTRL);
                BindingEntry::chord(vec![prefix, key], command)
            } else {
                BindingEntry::new(key, command)
            };
            let entry = if i % 7 == 0 { entry.when("editorFocused") } else { entry };
            let priority = match i % 3 {
                0 => Priority::User,
                1 => Priority::Preset,
                _ => Priority::Plugin,
            };
            entry.with_priority(priority)
        })
        .collect()
}

fn matcher(count: usize) -> Matcher {
    let mut matcher = Matcher::new();
    matcher.rebuild(&bindings(count));
    matcher
}

#[divan::bench(args = [50, 500, 5000])]
fn rebuild(bencher: divan::Bencher, count: usize) {
    let entries = bindings(count);
    bencher.bench_local(|| {
        let mut matcher = Matcher::new();
        matcher.rebuild(divan::black_box(&entries));
        matcher
    });
}

#[divan::bench(args = [50, 500, 5000])]
fn match_single_key(bencher: divan::Bencher, count: usize) {
    let matcher = matcher(count);
    let context = ContextState::new();
    let sequence = [KeyPress::char_with_mods('b', Modifiers::META)];

    bencher.bench_local(|| {
        matcher
            .match_sequence(divan::black_box(&sequence), &AlwaysApplicable, &context)
            .is_ok()
    });
}

#[divan::bench(args = [50, 500, 5000])]
fn match_prefix(bencher: divan::Bencher, count: usize) {
    let matcher = matcher(count);
    let context = ContextState::new();
    let sequence = [KeyPress::char_with_mods('x', Modifiers::CTRL)];

    bencher.bench_local(|| {
        matcher
            .match_sequence(divan::black_box(&sequence), &AlwaysApplicable, &context)
            .is_ok()
    });
}

#[divan::bench(args = [50, 500, 5000])]
fn match_with_conditions(bencher: divan::Bencher, count: usize) {
    let matcher = matcher(count);
    let mut context = ContextState::new();
    context.set("editorFocused", true);
    let sequence = [KeyPress::char_with_mods('h', Modifiers::CTRL)];

    bencher.bench_local(|| {
        matcher
            .match_sequence(divan::black_box(&sequence), &FlagConditions, &context)
            .is_ok()
    });
}

#[divan::bench]
fn canonicalize_chord(bencher: divan::Bencher) {
    let sequence = [
        KeyPress::char_with_mods('x', Modifiers::CTRL | Modifiers::META | Modifiers::SHIFT),
        KeyPress::char_with_mods('s', Modifiers::CTRL),
    ];
    bencher.bench_local(|| canonicalize_sequence(divan::black_box(&sequence)));
}
