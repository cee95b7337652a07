//=========================================================================
// Reference Handlers
//=========================================================================
//
// Worked-example per-menu handlers built on the core engine:
//
// - `inventory`: tabbed grid menu (diff priority, deferred label reads)
// - `dialogue`:  dialogue box (text intercept, choices, voiced lines)
// - `remap`:     controls menu (binding capture, conflicts, confirmation)
//
// Each handler talks to the host exclusively through its own small probe
// trait, so embedders wire panels up field by field and everything stays
// testable against in-memory fakes.
//
//=========================================================================

//=== Module Declarations =================================================

pub mod dialogue;
pub mod inventory;
pub mod remap;

//=== Public API ==========================================================

pub use dialogue::{DialogueHandler, DialogueProbe};
pub use inventory::{InventoryHandler, InventoryProbe, InventoryView};
pub use remap::{ConfirmationRequest, RemapControls, RemapMenuHandler, RemapProbe};
