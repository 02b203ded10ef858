//! Canonical string encoding of key presses and sequences
//!
//! Modifiers are written in a fixed order (C-M-A-S) followed by the key:
//! `Ctrl+X` is `"C-x"`, `Ctrl+Shift+X` is `"C-S-x"`, and the sequence
//! `Ctrl+X Ctrl+S` is `"C-x C-s"`. The encoding is used as the lookup key for
//! matching and never needs to be parsed back.

use super::types::KeyPress;

/// Separator between modifier letters and the key
pub const MODIFIER_SEPARATOR: char = '-';

/// Separator between presses of a sequence
pub const SEQUENCE_SEPARATOR: char = ' ';

/// Encode a single key press
pub fn canonicalize_key_press(press: &KeyPress) -> String {
    let mut parts: Vec<String> = Vec::with_capacity(5);

    if press.mods.ctrl() {
        parts.push("C".to_string());
    }
    if press.mods.meta() {
        parts.push("M".to_string());
    }
    if press.mods.alt() {
        parts.push("A".to_string());
    }
    if press.mods.shift() {
        parts.push("S".to_string());
    }
    parts.push(press.key.to_string());

    parts.join(&MODIFIER_SEPARATOR.to_string())
}

/// Encode an ordered sequence of key presses, space-joined
pub fn canonicalize_sequence(sequence: &[KeyPress]) -> String {
    sequence
        .iter()
        .map(canonicalize_key_press)
        .collect::<Vec<_>>()
        .join(&SEQUENCE_SEPARATOR.to_string())
}

/// Whether `canonical` is the strict first part of the registered `candidate`
///
/// `"C-x"` is a prefix of `"C-x C-s"` but not of `"C-xy"` or `"C-x"` itself.
pub fn is_strict_prefix(canonical: &str, candidate: &str) -> bool {
    candidate
        .strip_prefix(canonical)
        .is_some_and(|rest| rest.starts_with(SEQUENCE_SEPARATOR))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::keymap::types::{KeyCode, Modifiers};

    #[test]
    fn test_plain_key() {
        assert_eq!(canonicalize_key_press(&KeyPress::char_with_mods('x', Modifiers::NONE)), "x");
    }

    #[test]
    fn test_modifier_order_is_fixed() {
        let all = Modifiers::SHIFT | Modifiers::ALT | Modifiers::META | Modifiers::CTRL;
        let press = KeyPress::char_with_mods('x', all);
        assert_eq!(canonicalize_key_press(&press), "C-M-A-S-x");

        let press = KeyPress::char_with_mods('x', Modifiers::SHIFT | Modifiers::CTRL);
        assert_eq!(canonicalize_key_press(&press), "C-S-x");
    }

    #[test]
    fn test_every_modifier_permutation_encodes_identically() {
        let flags = [
            Modifiers::CTRL,
            Modifiers::META,
            Modifiers::ALT,
            Modifiers::SHIFT,
        ];
        let expected = canonicalize_key_press(&KeyPress::char_with_mods(
            'k',
            flags.iter().fold(Modifiers::NONE, |acc, m| acc | *m),
        ));

        let mut order = [0usize, 1, 2, 3];
        for _ in 0..24 {
            let mods = order
                .iter()
                .fold(Modifiers::NONE, |acc, &i| acc | flags[i]);
            let press = KeyPress::char_with_mods('k', mods);
            assert_eq!(canonicalize_key_press(&press), expected);
            next_permutation(&mut order);
        }
    }

    fn next_permutation(v: &mut [usize]) {
        let Some(i) = (0..v.len() - 1).rev().find(|&i| v[i] < v[i + 1]) else {
            v.reverse();
            return;
        };
        let j = (i + 1..v.len()).rev().find(|&j| v[j] > v[i]).unwrap();
        v.swap(i, j);
        v[i + 1..].reverse();
    }

    #[test]
    fn test_sequence_is_space_joined() {
        let seq = [
            KeyPress::char_with_mods('x', Modifiers::CTRL),
            KeyPress::char_with_mods('s', Modifiers::CTRL),
        ];
        assert_eq!(canonicalize_sequence(&seq), "C-x C-s");
    }

    #[test]
    fn test_named_keys() {
        assert_eq!(canonicalize_key_press(&KeyPress::key(KeyCode::Space)), "space");
        assert_eq!(
            canonicalize_key_press(&KeyPress::new(KeyCode::Escape, Modifiers::META)),
            "M-Escape"
        );
    }

    #[test]
    fn test_strict_prefix() {
        assert!(is_strict_prefix("C-x", "C-x C-s"));
        assert!(!is_strict_prefix("C-x", "C-x"));
        assert!(!is_strict_prefix("C-x", "C-xy"));
        assert!(!is_strict_prefix("C-x", "M-x C-s"));
    }
}
