/// Key codes representing individual keys on the keyboard.
///
/// This enum provides a platform-agnostic representation of keys.
/// Hosts should map their platform-specific key events to these codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyCode {
    /// A character key. Hosts should normalize to lowercase for consistency.
    /// For example, 'A' should be mapped to 'a' unless SHIFT is held.
    Char(char),
    /// The Escape key, the default exit key for a writing session.
    Esc,
    /// The Enter/Return key. Inserts a newline, so it is not blocked by default.
    Enter,
    /// The Backspace key. Blocked by default; Ctrl+Backspace is the default
    /// delete-word key.
    Backspace,
    /// The forward Delete key.
    Delete,
    Up,
    Down,
    Left,
    Right,
    Home,
    End,
    PageUp,
    PageDown,
}

bitflags::bitflags! {
    /// Keyboard modifier flags.
    ///
    /// These can be combined to represent multiple modifiers held simultaneously.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct Modifiers: u8 {
        const SHIFT = 0b0001;
        const CTRL  = 0b0010;
        const ALT   = 0b0100;
        const META  = 0b1000;
    }
}

/// A key press event with optional modifiers.
///
/// Bindings are keyed on the full event, so `Backspace` and `Ctrl+Backspace`
/// are distinct keys and can carry different roles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct KeyEvent {
    /// The key that was pressed.
    pub code: KeyCode,
    /// Modifier keys held during the key press.
    pub mods: Modifiers,
}

/// Input events that can be processed by the engine.
///
/// Key presses are routed through the session's binding table; text-change
/// notifications feed the delete-burst counter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
    /// A key press event.
    Key(KeyEvent),
    /// The host's buffer contents changed (any insertion or deletion,
    /// including edits applied on the engine's behalf).
    TextChanged,
}
