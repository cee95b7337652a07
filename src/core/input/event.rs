//=========================================================================
// Control Vocabulary & Input Frame
//
// Defines the unified representation of physical controls the engine
// tracks: keyboard keys, gamepad buttons, and the left analog stick
// coerced to four directions.
//
// This module abstracts away host-specific input (Unity, SDL, raw HID)
// into a stable, portable format used by the input subsystem.
//
// Responsibilities:
// - Represent keyboard and gamepad inputs in a stable, portable way
// - Provide equality and hashing semantics for set-based state tracking
// - Support single-modifier combinations (Shift/Ctrl/Alt, LT/RT)
// - Carry the per-tick raw host snapshot (`InputFrame`)
//
// Design:
// Control identifiers are:
// - Copy-cheap (plain fieldless enums plus one nested layer)
// - Hash-stable for efficient HashSet/HashMap usage
// - Serde-capable so stored bindings survive a round-trip to disk
//
// Data Flow:
// ```text
// Host frame callback
//         ↓
//    InputFrame (this module)
//         ↓
//    StateTracker (edges, holds, repeats)
//         ↓
//    Actions (named-action layer)
// ```
//
//=========================================================================

//=== External Dependencies ===============================================

use std::collections::HashSet;
use std::fmt;

use serde::{Deserialize, Serialize};

//=== KeyCode =============================================================

/// Physical keyboard key identifier.
///
/// Represents the physical key location, not the character produced.
/// `KeyA` is the same physical key regardless of layout (QWERTY vs AZERTY).
///
/// Coverage:
/// - Alphanumeric keys (A-Z, 0-9)
/// - Arrow keys
/// - Common special keys (Space, Enter, Escape, etc.)
///
/// Additional keys can be added as needed without breaking existing code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum KeyCode {
    //--- Numeric Keys -----------------------------------------------------

    /// Number row: 0-9
    Digit0, Digit1, Digit2, Digit3, Digit4,
    Digit5, Digit6, Digit7, Digit8, Digit9,

    //--- Alphabetic Keys --------------------------------------------------

    /// Letter keys: A-Z (physical location, not character)
    KeyA, KeyB, KeyC, KeyD, KeyE, KeyF, KeyG, KeyH, KeyI,
    KeyJ, KeyK, KeyL, KeyM, KeyN, KeyO, KeyP, KeyQ, KeyR,
    KeyS, KeyT, KeyU, KeyV, KeyW, KeyX, KeyY, KeyZ,

    //--- Arrow Keys -------------------------------------------------------

    /// Directional navigation keys
    ArrowDown,
    ArrowLeft,
    ArrowRight,
    ArrowUp,

    //--- Special Keys -----------------------------------------------------

    /// Spacebar
    Space,

    /// Return/Enter key
    Enter,

    /// Escape key
    Escape,

    /// Tab key
    Tab,

    /// Backspace key
    Backspace,
}

impl fmt::Display for KeyCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Digit0 => write!(f, "0"),
            Self::Digit1 => write!(f, "1"),
            Self::Digit2 => write!(f, "2"),
            Self::Digit3 => write!(f, "3"),
            Self::Digit4 => write!(f, "4"),
            Self::Digit5 => write!(f, "5"),
            Self::Digit6 => write!(f, "6"),
            Self::Digit7 => write!(f, "7"),
            Self::Digit8 => write!(f, "8"),
            Self::Digit9 => write!(f, "9"),
            Self::ArrowDown => write!(f, "Down Arrow"),
            Self::ArrowLeft => write!(f, "Left Arrow"),
            Self::ArrowRight => write!(f, "Right Arrow"),
            Self::ArrowUp => write!(f, "Up Arrow"),
            Self::Space => write!(f, "Space"),
            Self::Enter => write!(f, "Enter"),
            Self::Escape => write!(f, "Escape"),
            Self::Tab => write!(f, "Tab"),
            Self::Backspace => write!(f, "Backspace"),
            // Letter keys render as the bare letter ("KeyW" → "W").
            other => {
                let name = format!("{:?}", other);
                write!(f, "{}", name.strip_prefix("Key").unwrap_or(&name))
            }
        }
    }
}

//=== PadButton ===========================================================

/// Physical gamepad button identifier.
///
/// Face buttons use compass naming (South = Xbox A / PS Cross) so the
/// vocabulary stays vendor-neutral. Analog triggers are not buttons
/// here; they participate as [`Modifier`]s.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PadButton {
    //--- Face Buttons -----------------------------------------------------

    /// Bottom face button (Xbox A / PS Cross).
    South,

    /// Right face button (Xbox B / PS Circle).
    East,

    /// Left face button (Xbox X / PS Square).
    West,

    /// Top face button (Xbox Y / PS Triangle).
    North,

    //--- D-Pad ------------------------------------------------------------

    DpadUp,
    DpadDown,
    DpadLeft,
    DpadRight,

    //--- Shoulders & Menu -------------------------------------------------

    LeftShoulder,
    RightShoulder,
    Start,
    Select,
}

impl fmt::Display for PadButton {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::South => write!(f, "South Button"),
            Self::East => write!(f, "East Button"),
            Self::West => write!(f, "West Button"),
            Self::North => write!(f, "North Button"),
            Self::DpadUp => write!(f, "D-Pad Up"),
            Self::DpadDown => write!(f, "D-Pad Down"),
            Self::DpadLeft => write!(f, "D-Pad Left"),
            Self::DpadRight => write!(f, "D-Pad Right"),
            Self::LeftShoulder => write!(f, "Left Shoulder"),
            Self::RightShoulder => write!(f, "Right Shoulder"),
            Self::Start => write!(f, "Start"),
            Self::Select => write!(f, "Select"),
        }
    }
}

//=== StickDirection ======================================================

/// Left analog stick coerced to one of four directions.
///
/// The [`StateTracker`](super::state_tracker::StateTracker) applies a
/// deadzone threshold and axis dominance to reduce the raw vector to at
/// most one direction per tick, so stick navigation shares the same
/// edge/repeat machinery as digital controls.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StickDirection {
    Up,
    Down,
    Left,
    Right,
}

impl fmt::Display for StickDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Up => write!(f, "Stick Up"),
            Self::Down => write!(f, "Stick Down"),
            Self::Left => write!(f, "Stick Left"),
            Self::Right => write!(f, "Stick Right"),
        }
    }
}

//=== Modifier ============================================================

/// A held modifier that may qualify a binding's primary control.
///
/// Keyboard bindings may require Shift/Ctrl/Alt; gamepad bindings may
/// require a held analog trigger. A binding carries at most one modifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Modifier {
    Shift,
    Ctrl,
    Alt,
    LeftTrigger,
    RightTrigger,
}

impl Modifier {
    /// All modifiers in precedence order, used when folding a held
    /// modifier into a captured binding.
    pub const ALL: [Modifier; 5] = [
        Modifier::Ctrl,
        Modifier::Alt,
        Modifier::Shift,
        Modifier::LeftTrigger,
        Modifier::RightTrigger,
    ];
}

impl fmt::Display for Modifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Shift => write!(f, "Shift"),
            Self::Ctrl => write!(f, "Ctrl"),
            Self::Alt => write!(f, "Alt"),
            Self::LeftTrigger => write!(f, "Left Trigger"),
            Self::RightTrigger => write!(f, "Right Trigger"),
        }
    }
}

//=== Control =============================================================

/// Unified physical control identifier.
///
/// Keyboard keys, gamepad buttons, and stick directions all flow through
/// the same edge-detection and repeat machinery, so handlers never care
/// which device produced a navigation input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Control {
    Key(KeyCode),
    Pad(PadButton),
    Stick(StickDirection),
}

impl fmt::Display for Control {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Key(k) => write!(f, "{}", k),
            Self::Pad(b) => write!(f, "{}", b),
            Self::Stick(d) => write!(f, "{}", d),
        }
    }
}

impl From<KeyCode> for Control {
    fn from(key: KeyCode) -> Self {
        Self::Key(key)
    }
}

impl From<PadButton> for Control {
    fn from(button: PadButton) -> Self {
        Self::Pad(button)
    }
}

impl From<StickDirection> for Control {
    fn from(direction: StickDirection) -> Self {
        Self::Stick(direction)
    }
}

//=== InputFrame ==========================================================

/// Raw host input state polled for one tick.
///
/// The embedder builds one of these inside the host's frame callback and
/// hands it to the engine. The frame is a plain snapshot: which keys and
/// buttons are down right now, which modifiers are held, and the raw
/// left-stick vector. All edge and repeat derivation happens downstream
/// in the [`StateTracker`](super::state_tracker::StateTracker).
#[derive(Debug, Clone, Default)]
pub struct InputFrame {
    keys: HashSet<KeyCode>,
    buttons: HashSet<PadButton>,
    modifiers: HashSet<Modifier>,
    stick: (f32, f32),
}

impl InputFrame {
    /// Creates an empty frame (nothing held, stick centered).
    pub fn new() -> Self {
        Self::default()
    }

    //--- Build API --------------------------------------------------------

    /// Marks a keyboard key as down this tick.
    pub fn press_key(mut self, key: KeyCode) -> Self {
        self.keys.insert(key);
        self
    }

    /// Marks a gamepad button as down this tick.
    pub fn press_button(mut self, button: PadButton) -> Self {
        self.buttons.insert(button);
        self
    }

    /// Marks a modifier as held this tick.
    pub fn hold_modifier(mut self, modifier: Modifier) -> Self {
        self.modifiers.insert(modifier);
        self
    }

    /// Sets the raw left-stick vector. Convention: +y is up.
    pub fn stick(mut self, x: f32, y: f32) -> Self {
        self.stick = (x, y);
        self
    }

    //--- Query API --------------------------------------------------------

    /// Returns `true` if the key is down in this frame.
    pub fn key_down(&self, key: KeyCode) -> bool {
        self.keys.contains(&key)
    }

    /// Returns `true` if the button is down in this frame.
    pub fn button_down(&self, button: PadButton) -> bool {
        self.buttons.contains(&button)
    }

    /// Returns `true` if the modifier is held in this frame.
    pub fn modifier_held(&self, modifier: Modifier) -> bool {
        self.modifiers.contains(&modifier)
    }

    /// Returns the raw left-stick vector.
    pub fn stick_vector(&self) -> (f32, f32) {
        self.stick
    }

    /// Iterates keys down in this frame.
    pub(super) fn keys(&self) -> impl Iterator<Item = &KeyCode> {
        self.keys.iter()
    }

    /// Iterates buttons down in this frame.
    pub(super) fn buttons(&self) -> impl Iterator<Item = &PadButton> {
        self.buttons.iter()
    }

    /// Iterates modifiers held in this frame.
    pub(super) fn modifiers(&self) -> impl Iterator<Item = &Modifier> {
        self.modifiers.iter()
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
