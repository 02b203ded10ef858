//! Adapter to convert winit key events to our RawKeyEvent type

use winit::keyboard::{Key, ModifiersState, NamedKey, PhysicalKey};

use super::normalize::RawKeyEvent;

/// Convert winit key event data to a platform-neutral raw event
///
/// Named keys use their W3C names (`"Escape"`, `"ArrowUp"`), which winit's
/// `NamedKey` variants already follow. The super/logo key is reported as
/// `"Meta"` and space as `" "`.
pub fn raw_event_from_winit(
    logical_key: &Key,
    physical_key: PhysicalKey,
    modifiers: ModifiersState,
) -> RawKeyEvent {
    let key = match logical_key {
        Key::Named(NamedKey::Space) => " ".to_string(),
        Key::Named(NamedKey::Super) => "Meta".to_string(),
        Key::Named(named) => format!("{:?}", named),
        Key::Character(s) => s.to_string(),
        Key::Dead(Some(c)) => c.to_string(),
        Key::Dead(None) => "Dead".to_string(),
        Key::Unidentified(_) => "Unidentified".to_string(),
    };

    let code = match physical_key {
        PhysicalKey::Code(code) => format!("{:?}", code),
        PhysicalKey::Unidentified(_) => "Unidentified".to_string(),
    };

    RawKeyEvent {
        key,
        code,
        ctrl: modifiers.control_key(),
        alt: modifiers.alt_key(),
        shift: modifiers.shift_key(),
        meta: modifiers.super_key(),
    }
}
