//=========================================================================
// Input Injection
//=========================================================================
//
// The single outbound mutation path into the host: synthesized button
// and stick state written into its per-tick input buffer.
//
// The engine never calls host methods directly; the embedder installs an
// `InputInjector` that knows how to place the synthetic state where the
// host reads its own input each frame.
//
//=========================================================================

//=== Internal Dependencies ===============================================

use crate::core::input::Control;

//=== SyntheticInput ======================================================

/// One tick's worth of synthesized input: controls to hold plus a stick
/// vector.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SyntheticInput {
    /// Controls to present as held this tick.
    pub buttons: Vec<Control>,

    /// Left-stick vector to present this tick. Convention: +y is up.
    pub stick: (f32, f32),
}

impl SyntheticInput {
    /// Creates empty synthetic input (nothing held, stick centered).
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a control to present as held.
    pub fn press(mut self, control: Control) -> Self {
        self.buttons.push(control);
        self
    }

    /// Sets the stick vector.
    pub fn with_stick(mut self, x: f32, y: f32) -> Self {
        self.stick = (x, y);
        self
    }
}

//=== InputInjector =======================================================

/// Writes synthetic input into the host's per-tick input buffer.
///
/// Installed by the embedder; the engine forwards through
/// [`NarrationEngine::inject`](crate::NarrationEngine::inject).
pub trait InputInjector {
    /// Places `input` where the host reads its own input this tick.
    fn inject(&mut self, input: &SyntheticInput);
}

//=========================================================================
// Unit Tests
//=========================================================================
