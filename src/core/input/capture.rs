//=========================================================================
// Binding Capture
//=========================================================================
//
// Listen-for-new-binding mode: while a session is live, every tick's
// press edges are scanned; the first candidate becomes the new binding
// if it passes the reserved-control check and the conflict check.
//
// Flow per tick:
//   poll() → cancel edge? → scan edges → reserved? → conflict? → Bound
//
// A session carries no per-tick state of its own, so cancellation needs
// no cleanup beyond dropping the session. There is no timeout; a session
// lives until an edge resolves it or the owner abandons it.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::collections::HashSet;

use thiserror::Error;

//=== Internal Dependencies ===============================================

use super::action::{Action, BindSlot};
use super::action_mapper::{ActionMapper, InputBinding};
use super::event::{Control, KeyCode};
use super::state_tracker::StateTracker;

//=== CaptureRejection ====================================================

/// Why a candidate input was refused.
///
/// The `Display` text doubles as the spoken message, so it names the
/// specific reason: a reserved control, or which action already claims
/// the binding.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CaptureRejection<A: Action> {
    /// The pressed control is on the reserved list.
    #[error("{0} is reserved and cannot be bound")]
    Disallowed(Control),

    /// Another action in the same slot already claims this binding.
    #[error("{binding} is already assigned to {owner:?}")]
    Conflict {
        /// The action that owns the binding.
        owner: A,
        /// The binding it owns.
        binding: InputBinding,
    },
}

//=== CaptureOutcome ======================================================

/// Result of polling a capture session for one tick.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CaptureOutcome<A: Action> {
    /// No candidate edge this tick; the session stays live.
    Pending,

    /// A valid binding was captured; the session is over.
    Bound(InputBinding),

    /// The candidate was refused; the session is over, nothing stored.
    Rejected(CaptureRejection<A>),

    /// The cancel control ended the session this tick.
    Cancelled,
}

//=== CaptureSession ======================================================

/// A live "press the new input" session for one action.
///
/// The owner (typically a remap menu handler) holds the session in an
/// `Option` and drops it on any non-`Pending` outcome. Polling never
/// stores anything; the owner applies a `Bound` binding itself so the
/// rejection paths provably leave every stored binding untouched.
#[derive(Debug, Clone)]
pub struct CaptureSession<A: Action> {
    target: A,
    slot: BindSlot,
    cancel: Control,
    reserved: HashSet<Control>,
}

impl<A: Action> CaptureSession<A> {
    /// Starts a session for `target` in `slot`. `cancel` ends the session
    /// without binding. The default reserved list refuses Escape.
    pub fn begin(target: A, slot: BindSlot, cancel: Control) -> Self {
        let mut reserved = HashSet::new();
        reserved.insert(Control::Key(KeyCode::Escape));
        Self { target, slot, cancel, reserved }
    }

    /// Adds controls to the reserved list.
    pub fn reserve(mut self, controls: impl IntoIterator<Item = Control>) -> Self {
        self.reserved.extend(controls);
        self
    }

    /// The action this session will rebind.
    pub fn target(&self) -> A {
        self.target
    }

    /// The slot conflicts are checked against.
    pub fn slot(&self) -> BindSlot {
        self.slot
    }

    //--- Per-Tick Poll ----------------------------------------------------

    /// Scans this tick's press edges and resolves the session if one of
    /// them is a candidate. The cancel control wins over candidates
    /// pressed in the same tick.
    pub(crate) fn poll(
        &self,
        tracker: &StateTracker,
        mapper: &ActionMapper<A>,
    ) -> CaptureOutcome<A> {
        if tracker.is_just_pressed(self.cancel) {
            return CaptureOutcome::Cancelled;
        }

        let Some(&candidate) = tracker.pressed_controls().next() else {
            return CaptureOutcome::Pending;
        };

        if self.reserved.contains(&candidate) {
            return CaptureOutcome::Rejected(CaptureRejection::Disallowed(candidate));
        }

        // Fold in whichever modifier is held right now, if any.
        let binding = match tracker.active_modifier() {
            Some(modifier) => InputBinding::with_modifier(candidate, modifier),
            None => InputBinding::new(candidate),
        };

        match mapper.owner_of(binding, self.slot) {
            Some(owner) if owner != self.target => {
                CaptureOutcome::Rejected(CaptureRejection::Conflict { owner, binding })
            }
            // Unowned, or already owned by the target (re-binding to the
            // same input is not a conflict).
            _ => CaptureOutcome::Bound(binding),
        }
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
