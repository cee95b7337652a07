//=========================================================================
// Action Mapper
//=========================================================================
//
// Maps named actions to physical bindings based on the active slot.
//
// Architecture:
//   (action, slot) → HashMap → InputBinding → StateTracker queries
//
// Only bindings in the active slot resolve for triggering; ownership
// lookups (capture-mode conflict checks) are always slot-explicit.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};

//=== Internal Dependencies ===============================================

use super::action::{Action, BindSlot};
use super::event::{Control, Modifier};
use super::state_tracker::StateTracker;

//=== InputBinding ========================================================

/// A physical binding: one primary control plus at most one modifier.
///
/// Immutable once constructed; compared for equality to detect conflicts
/// against other bound actions in the same slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct InputBinding {
    /// The control whose press edge triggers the action.
    pub primary: Control,

    /// Modifier that must be held for the edge to count, if any.
    pub modifier: Option<Modifier>,
}

impl InputBinding {
    /// Creates an unmodified binding.
    pub const fn new(primary: Control) -> Self {
        Self { primary, modifier: None }
    }

    /// Creates a binding that requires a held modifier.
    pub const fn with_modifier(primary: Control, modifier: Modifier) -> Self {
        Self { primary, modifier: Some(modifier) }
    }
}

impl fmt::Display for InputBinding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.modifier {
            Some(m) => write!(f, "{} + {}", m, self.primary),
            None => write!(f, "{}", self.primary),
        }
    }
}

//=== ActionMapper ========================================================

/// Maps actions to bindings via (action, slot) lookups.
///
/// The table is keyed action-first (unlike a raw input router) because
/// the engine's consumers ask "is this action triggered" and capture mode
/// asks "who owns this binding". Both resolve here.
pub(crate) struct ActionMapper<A: Action> {
    /// Bindings: (action, slot) → physical binding
    bindings: HashMap<(A, BindSlot), InputBinding>,

    /// Currently active slot
    active_slot: BindSlot,
}

impl<A: Action> ActionMapper<A> {
    /// Creates a new mapper with the Field slot active and no bindings.
    pub(crate) fn new() -> Self {
        Self {
            bindings: HashMap::new(),
            active_slot: BindSlot::Field,
        }
    }

    //--- Binding API ------------------------------------------------------

    /// Binds an action in a slot, returning the binding it replaced.
    pub(crate) fn bind(
        &mut self,
        action: A,
        binding: InputBinding,
        slot: BindSlot,
    ) -> Option<InputBinding> {
        self.bindings.insert((action, slot), binding)
    }

    /// Returns the binding for an action in a slot.
    pub(crate) fn binding_for(&self, action: A, slot: BindSlot) -> Option<InputBinding> {
        self.bindings.get(&(action, slot)).copied()
    }

    /// Removes an action's binding in a slot, returning it.
    pub(crate) fn clear(&mut self, action: A, slot: BindSlot) -> Option<InputBinding> {
        self.bindings.remove(&(action, slot))
    }

    /// Removes every binding in a slot.
    pub(crate) fn clear_slot(&mut self, slot: BindSlot) {
        self.bindings.retain(|&(_, s), _| s != slot);
    }

    /// Returns the action that owns a binding in a slot, if any.
    ///
    /// Capture mode uses this to name the conflicting action.
    pub(crate) fn owner_of(&self, binding: InputBinding, slot: BindSlot) -> Option<A> {
        self.bindings
            .iter()
            .find(|&(&(_, s), &b)| s == slot && b == binding)
            .map(|(&(action, _), _)| action)
    }

    /// Iterates all stored bindings.
    pub(crate) fn iter(&self) -> impl Iterator<Item = (A, BindSlot, InputBinding)> + '_ {
        self.bindings.iter().map(|(&(a, s), &b)| (a, s, b))
    }

    //--- Trigger Resolution -----------------------------------------------

    /// Returns `true` only on the press edge of the action's primary
    /// control while its required modifier (if any) is held. Resolved
    /// against the active slot; unbound actions never trigger.
    pub(crate) fn is_triggered(&self, action: A, tracker: &StateTracker) -> bool {
        let Some(binding) = self.binding_for(action, self.active_slot) else {
            return false;
        };

        if !tracker.is_just_pressed(binding.primary) {
            return false;
        }

        match binding.modifier {
            Some(modifier) => tracker.is_modifier_held(modifier),
            None => true,
        }
    }

    //--- Slot Control -----------------------------------------------------

    /// Sets the active slot.
    pub(crate) fn set_slot(&mut self, slot: BindSlot) {
        self.active_slot = slot;
    }

    /// Returns the active slot.
    pub(crate) fn active_slot(&self) -> BindSlot {
        self.active_slot
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
