//=========================================================================
// Speech System
//=========================================================================
//
// Everything spoken flows through here.
//
// Architecture:
//   handlers → AnnouncementSink → SpeechBackend (embedder-provided)
//   handlers → phrase::* (pure string builders)
//
//=========================================================================

//=== Submodules ==========================================================

pub mod phrase;
pub mod sink;

//=== Public API ==========================================================

pub use sink::{AnnouncementSink, NullBackend, SpeechBackend};
