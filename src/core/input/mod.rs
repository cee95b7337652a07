//=========================================================================
// Input System
//
// High-level interface for input handling within the engine.
// Wraps the low-level `StateTracker` and the named-action `ActionMapper`,
// providing per-tick digestion and query methods for handlers.
//
// Responsibilities:
// - Digest the host's polled `InputFrame` once per tick
// - Expose edge / hold / repeat queries over unified controls
// - Resolve named actions against the active bind slot
// - Drive binding-capture sessions and ownership (conflict) lookups
//
// Notes:
// This system is owned and ticked by the `NarrationEngine`. Handlers
// receive it through the `TickContext` and may rebind actions or consume
// edges, but never construct or digest it themselves.
//
//=========================================================================

//=== Submodules ==========================================================

pub mod action;
pub mod action_mapper;
pub mod capture;
pub mod event;
pub mod state_tracker;

//=== Public API ==========================================================

pub use action::{Action, BindSlot};
pub use action_mapper::InputBinding;
pub use capture::{CaptureOutcome, CaptureRejection, CaptureSession};
pub use event::{Control, InputFrame, KeyCode, Modifier, PadButton, StickDirection};
pub use state_tracker::{
    StateTracker, DEFAULT_REPEAT_DELAY, DEFAULT_REPEAT_INTERVAL, DEFAULT_STICK_DEADZONE,
};

//=== Internal Imports ====================================================

use action_mapper::ActionMapper;

use log::debug;

//=== InputSystem =========================================================

/// Owns the engine's input state and binding table.
///
/// This is the public-facing API handlers use for querying controls and
/// actions each tick.
pub struct InputSystem<A: Action> {
    tracker: StateTracker,
    mapper: ActionMapper<A>,
}

impl<A: Action> InputSystem<A> {
    //--- Construction -----------------------------------------------------

    /// Creates an input system with default repeat timing and deadzone.
    pub fn new() -> Self {
        Self {
            tracker: StateTracker::new(),
            mapper: ActionMapper::new(),
        }
    }

    /// Sets repeat timing (delay ticks, interval ticks).
    pub fn set_repeat_timing(&mut self, delay: u32, interval: u32) {
        self.tracker.set_repeat_timing(delay, interval);
    }

    /// Sets the stick deadzone threshold.
    pub fn set_stick_deadzone(&mut self, deadzone: f32) {
        self.tracker.set_stick_deadzone(deadzone);
    }

    //--- digest() ---------------------------------------------------------

    /// Digests the host's polled frame for this tick: derives edges,
    /// advances hold counts, refreshes modifier state.
    pub fn digest(&mut self, frame: &InputFrame) {
        self.tracker.digest(frame);
    }

    /// Seeds edge state so currently-pressed controls stop reading as
    /// just-pressed for the rest of this tick. Handlers call this on
    /// their opening tick so the press that opened them is not also
    /// their first navigation input.
    pub fn consume_edges(&mut self) {
        self.tracker.consume_edges();
    }

    //--- Query Methods: Controls ------------------------------------------

    /// Returns `true` while the control is held.
    pub fn is_held(&self, control: Control) -> bool {
        self.tracker.is_held(control)
    }

    /// Returns `true` exactly one tick per press edge.
    pub fn is_just_pressed(&self, control: Control) -> bool {
        self.tracker.is_just_pressed(control)
    }

    /// Returns `true` on scheduled repeat re-fires while held.
    pub fn is_repeating(&self, control: Control) -> bool {
        self.tracker.is_repeating(control)
    }

    /// Press edge plus repeat re-fires: the directional channel.
    pub fn navigation_pulse(&self, control: Control) -> bool {
        self.tracker.navigation_pulse(control)
    }

    /// Returns `true` if the modifier is held this tick.
    pub fn is_modifier_held(&self, modifier: Modifier) -> bool {
        self.tracker.is_modifier_held(modifier)
    }

    //--- Query Methods: Named Actions -------------------------------------

    /// Returns `true` only on the press edge of the action's bound
    /// primary control while its required modifier is held. Unbound
    /// actions never trigger.
    pub fn is_action_triggered(&self, action: A) -> bool {
        self.mapper.is_triggered(action, &self.tracker)
    }

    //--- Binding Table ----------------------------------------------------

    /// Binds an action, returning the binding it replaced.
    pub fn bind(&mut self, action: A, binding: InputBinding, slot: BindSlot) -> Option<InputBinding> {
        debug!("bound {:?} to {} in {:?}", action, binding, slot);
        self.mapper.bind(action, binding, slot)
    }

    /// Returns the binding for an action in a slot.
    pub fn binding_for(&self, action: A, slot: BindSlot) -> Option<InputBinding> {
        self.mapper.binding_for(action, slot)
    }

    /// Removes an action's binding, returning it.
    pub fn clear_binding(&mut self, action: A, slot: BindSlot) -> Option<InputBinding> {
        debug!("cleared binding for {:?} in {:?}", action, slot);
        self.mapper.clear(action, slot)
    }

    /// Returns the action that owns a binding in a slot, if any.
    pub fn owner_of(&self, binding: InputBinding, slot: BindSlot) -> Option<A> {
        self.mapper.owner_of(binding, slot)
    }

    /// Iterates all stored bindings (persistence export).
    pub fn bindings(&self) -> impl Iterator<Item = (A, BindSlot, InputBinding)> + '_ {
        self.mapper.iter()
    }

    /// Sets the active bind slot.
    pub fn set_slot(&mut self, slot: BindSlot) {
        self.mapper.set_slot(slot);
    }

    /// Returns the active bind slot.
    pub fn active_slot(&self) -> BindSlot {
        self.mapper.active_slot()
    }

    //--- Binding Capture --------------------------------------------------

    /// Polls a live capture session against this tick's edges.
    pub fn poll_capture(&self, session: &CaptureSession<A>) -> CaptureOutcome<A> {
        session.poll(&self.tracker, &self.mapper)
    }
}

impl<A: Action> Default for InputSystem<A> {
    fn default() -> Self {
        Self::new()
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    //--- Test Helpers -----------------------------------------------------

    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    enum TestAction {
        Confirm,
        ReadStatus,
    }

    impl Action for TestAction {}

    //--- Tests ------------------------------------------------------------

    #[test]
    fn digest_then_query_round_trip() {
        let mut input = InputSystem::<TestAction>::new();

        input.digest(&InputFrame::new().press_key(KeyCode::Space));
        assert!(input.is_just_pressed(Control::Key(KeyCode::Space)));
        assert!(input.is_held(Control::Key(KeyCode::Space)));

        input.digest(&InputFrame::new());
        assert!(!input.is_held(Control::Key(KeyCode::Space)));
    }

    #[test]
    fn action_trigger_through_facade() {
        let mut input = InputSystem::<TestAction>::new();
        input.bind(
            TestAction::Confirm,
            InputBinding::new(Control::Key(KeyCode::Enter)),
            BindSlot::Field,
        );

        input.digest(&InputFrame::new().press_key(KeyCode::Enter));
        assert!(input.is_action_triggered(TestAction::Confirm));

        input.digest(&InputFrame::new().press_key(KeyCode::Enter));
        assert!(!input.is_action_triggered(TestAction::Confirm));
    }

    #[test]
    fn capture_through_facade() {
        let mut input = InputSystem::<TestAction>::new();
        let session = CaptureSession::begin(
            TestAction::ReadStatus,
            BindSlot::Field,
            Control::Key(KeyCode::Backspace),
        );

        input.digest(&InputFrame::new().press_key(KeyCode::KeyR));
        let outcome = input.poll_capture(&session);

        assert_eq!(
            outcome,
            CaptureOutcome::Bound(InputBinding::new(Control::Key(KeyCode::KeyR)))
        );
    }

    #[test]
    fn bindings_export_lists_all() {
        let mut input = InputSystem::<TestAction>::new();
        input.bind(
            TestAction::Confirm,
            InputBinding::new(Control::Key(KeyCode::Enter)),
            BindSlot::Menu,
        );
        input.bind(
            TestAction::ReadStatus,
            InputBinding::new(Control::Key(KeyCode::KeyR)),
            BindSlot::Field,
        );

        let mut all: Vec<_> = input.bindings().collect();
        all.sort_by_key(|(a, _, _)| format!("{:?}", a));
        assert_eq!(all.len(), 2);
    }
}
