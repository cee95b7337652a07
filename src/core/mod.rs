//=========================================================================
// Core Systems
//
// All engine subsystems that run inside the host's per-frame callback.
//
// Responsibilities:
// - Input digestion and the named-action layer (`input`)
// - The announcement sink and phrase building (`speech`)
// - Per-menu handler state machines and dispatch (`handler`)
// - Shared flags and the dialogue intercept queue (`globals`)
// - The host boundary: polled queries in, synthetic input out (`host`)
// - Flat settings and binding persistence (`settings`)
//
// Notes:
// The entire core is single-threaded and cooperative. There is no
// internal loop or thread; the `NarrationEngine` facade advances
// everything exactly once per host frame.
//
//=========================================================================

//=== Module Declarations =================================================

pub mod globals;
pub mod handler;
pub mod host;
pub mod input;
pub mod settings;
pub mod speech;

//=== Public Re-exports ===================================================

pub use globals::{InterceptQueue, InterceptedLine, SharedFlags};
pub use handler::{Delay, HandlerDispatcher, HandlerError, MenuHandler, TickContext, Watched};
pub use host::{GameStateProbe, GameStateQuery, InputInjector, SyntheticInput};
pub use input::{
    Action, BindSlot, CaptureOutcome, CaptureRejection, CaptureSession, Control, InputBinding,
    InputFrame, InputSystem, KeyCode, Modifier, PadButton, StickDirection,
};
pub use settings::{BindingEntry, BindingFile, Settings, SettingsError, SettingsStore};
pub use speech::{AnnouncementSink, NullBackend, SpeechBackend};
