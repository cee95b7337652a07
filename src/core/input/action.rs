//=========================================================================
// Action Trait & Bind Slot
//=========================================================================
//
// Embedder-defined action trait and binding-context system.
//
// Actions: Opaque identifiers routed by the engine, interpreted by the
// embedder.
// Slots: Allow different bindings for different interaction contexts
// (field navigation vs menu navigation), and scope conflict checks so a
// control reused across unrelated contexts is not a conflict.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::fmt::Debug;
use std::hash::Hash;

use serde::{Deserialize, Serialize};

//=== Action Trait ========================================================

/// Marker trait for embedder-defined action enums.
///
/// Actions represent high-level commands (MoveCursor, ReadStatus,
/// OpenInventory) mapped from raw controls. The engine routes actions
/// without interpreting them.
///
/// # Requirements
///
/// - `Copy + Eq + Hash`: Efficient passing and table lookups
/// - `Debug`: Logging and spoken conflict messages
///
/// # Example
///
/// ```
/// use aria_engine::prelude::*;
///
/// #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
/// enum NavAction { Confirm, Cancel, ReadStatus }
///
/// impl Action for NavAction {}
/// ```
///
/// Use with `InputSystem<NavAction>` to bind controls and query actions
/// each tick. See [`BindSlot`] for context-scoped bindings.
pub trait Action: 'static + Copy + Eq + Hash + Debug {}

//=== BindSlot ============================================================

/// Identifies which set of bindings an action resolves against.
///
/// The same physical control may do different things in the field than
/// inside a menu; binding conflicts only matter within one slot.
///
/// # Variants
///
/// - `Field`: default slot for free-roam narration actions
/// - `Menu`: slot active while a menu handler owns navigation
/// - `Custom(u32)`: embedder-defined slots
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BindSlot {
    /// Default slot for free-roam (field) actions.
    Field,

    /// Slot for in-menu navigation actions.
    Menu,

    /// Embedder-defined slot.
    Custom(u32),
}

impl BindSlot {
    /// Creates a custom slot.
    ///
    /// ```
    /// # use aria_engine::prelude::*;
    /// const BATTLE: BindSlot = BindSlot::custom(0);
    /// ```
    #[inline]
    pub const fn custom(id: u32) -> Self {
        Self::Custom(id)
    }
}

impl Default for BindSlot {
    fn default() -> Self {
        Self::Field
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    enum TestAction {
        Confirm,
        Cancel,
    }

    impl Action for TestAction {}

    //=== Action Trait ====================================================

    #[test]
    fn action_trait_is_implementable() {
        let action = TestAction::Confirm;
        let copied = action;
        assert_eq!(action, copied);
    }

    #[test]
    fn action_is_hashable() {
        let mut set = HashSet::new();
        set.insert(TestAction::Confirm);
        set.insert(TestAction::Confirm);
        set.insert(TestAction::Cancel);

        assert_eq!(set.len(), 2);
    }

    #[test]
    fn action_debug_format() {
        assert!(format!("{:?}", TestAction::Cancel).contains("Cancel"));
    }

    //=== BindSlot ========================================================

    #[test]
    fn bind_slot_default_is_field() {
        assert_eq!(BindSlot::default(), BindSlot::Field);
    }

    #[test]
    fn bind_slot_field_vs_custom_zero() {
        // Important: Field ≠ Custom(0), Menu ≠ Custom(0)
        assert_ne!(BindSlot::Field, BindSlot::custom(0));
        assert_ne!(BindSlot::Menu, BindSlot::custom(0));
    }

    #[test]
    fn bind_slot_custom_is_const() {
        const BATTLE: BindSlot = BindSlot::custom(0);
        const SHOP: BindSlot = BindSlot::custom(1);

        assert_ne!(BATTLE, SHOP);
    }

    #[test]
    fn bind_slot_serde_round_trip() {
        let slot = BindSlot::custom(7);
        let json = serde_json::to_string(&slot).unwrap();
        let back: BindSlot = serde_json::from_str(&json).unwrap();
        assert_eq!(slot, back);
    }
}
