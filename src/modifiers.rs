//! Modifier-key tracking for selection interactions.
//!
//! Each selection owns its own [`ModifierState`]; hosts feed it key events and
//! the selection reads it synchronously when the next click arrives.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers, ModifierKeyCode};

/// A modifier key that changes how a click is interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Modifier {
    Shift,
    Control,
    Alt,
    /// Command on macOS, Super/Windows elsewhere.
    Meta,
}

/// Platform used to decide which key acts as the "toggle" modifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Platform {
    Mac,
    #[default]
    Other,
}

impl Platform {
    /// Platform of the running binary.
    pub const fn current() -> Self {
        if cfg!(target_os = "macos") {
            Self::Mac
        } else {
            Self::Other
        }
    }

    /// The primary toggle modifier (Command on Mac, Control elsewhere).
    pub const fn toggle_key(self) -> Modifier {
        match self {
            Self::Mac => Modifier::Meta,
            Self::Other => Modifier::Control,
        }
    }

    /// Parse a platform name as used in config files.
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "mac" | "macos" | "darwin" => Some(Self::Mac),
            "other" | "linux" | "windows" => Some(Self::Other),
            _ => None,
        }
    }
}

/// Currently held modifier keys.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ModifierState {
    shift: bool,
    control: bool,
    alt: bool,
    meta: bool,
}

impl ModifierState {
    pub fn new() -> Self {
        Self::default()
    }

    pub const fn press(&mut self, modifier: Modifier) {
        self.set(modifier, true);
    }

    pub const fn release(&mut self, modifier: Modifier) {
        self.set(modifier, false);
    }

    /// Drop all held keys, e.g. when the window loses focus and release
    /// events will never arrive.
    pub const fn clear(&mut self) {
        *self = Self {
            shift: false,
            control: false,
            alt: false,
            meta: false,
        };
    }

    const fn set(&mut self, modifier: Modifier, held: bool) {
        match modifier {
            Modifier::Shift => self.shift = held,
            Modifier::Control => self.control = held,
            Modifier::Alt => self.alt = held,
            Modifier::Meta => self.meta = held,
        }
    }

    pub const fn is_held(&self, modifier: Modifier) -> bool {
        match modifier {
            Modifier::Shift => self.shift,
            Modifier::Control => self.control,
            Modifier::Alt => self.alt,
            Modifier::Meta => self.meta,
        }
    }

    pub const fn shift(&self) -> bool {
        self.shift
    }

    /// Whether a multi-select toggle modifier is held on `platform`.
    pub const fn toggle_modifier(&self, platform: Platform) -> bool {
        self.is_held(platform.toggle_key()) || self.alt
    }

    /// Replace the held keys with the modifiers reported on a terminal event.
    ///
    /// Most terminals never report modifier presses on their own, only the
    /// modifiers attached to another key, so this is the usual way to keep
    /// the state current in a TUI.
    pub fn sync(&mut self, modifiers: KeyModifiers) {
        self.shift = modifiers.contains(KeyModifiers::SHIFT);
        self.control = modifiers.contains(KeyModifiers::CONTROL);
        self.alt = modifiers.contains(KeyModifiers::ALT);
        self.meta = modifiers.intersects(KeyModifiers::SUPER | KeyModifiers::META);
    }

    /// Track a bare modifier key press or release.
    ///
    /// Returns `true` when the event was a modifier key and has been consumed.
    /// Requires a terminal with the keyboard enhancement protocol enabled.
    pub fn handle_key_event(&mut self, event: &KeyEvent) -> bool {
        let KeyCode::Modifier(code) = event.code else {
            return false;
        };
        let modifier = match code {
            ModifierKeyCode::LeftShift | ModifierKeyCode::RightShift => Modifier::Shift,
            ModifierKeyCode::LeftControl | ModifierKeyCode::RightControl => Modifier::Control,
            ModifierKeyCode::LeftAlt | ModifierKeyCode::RightAlt => Modifier::Alt,
            ModifierKeyCode::LeftSuper
            | ModifierKeyCode::RightSuper
            | ModifierKeyCode::LeftMeta
            | ModifierKeyCode::RightMeta => Modifier::Meta,
            _ => return false,
        };
        match event.kind {
            KeyEventKind::Press | KeyEventKind::Repeat => self.press(modifier),
            KeyEventKind::Release => self.release(modifier),
        }
        true
    }
}
