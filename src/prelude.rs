//=========================================================================
// Prelude
//=========================================================================
//
// Convenience module that re-exports commonly used types and traits.
//
// Usage:
//   use aria_engine::prelude::*;
//
//=========================================================================

//=== Public API ==========================================================

// Engine facade
pub use crate::engine::{EngineBuilder, NarrationEngine};

// Input system
pub use crate::core::input::{
    Action, BindSlot, CaptureOutcome, CaptureRejection, CaptureSession, Control, InputBinding,
    InputFrame, InputSystem, KeyCode, Modifier, PadButton, StickDirection,
};

// Speech
pub use crate::core::speech::{AnnouncementSink, NullBackend, SpeechBackend};

// Handler engine
pub use crate::core::handler::{
    Delay, HandlerDispatcher, HandlerError, MenuHandler, TickContext, Watched,
};

// Host boundary
pub use crate::core::host::{GameStateProbe, GameStateQuery, InputInjector, SyntheticInput};

// Shared state & settings
pub use crate::core::globals::SharedFlags;
pub use crate::core::settings::{BindingEntry, BindingFile, Settings, SettingsStore};
