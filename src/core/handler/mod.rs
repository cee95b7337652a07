//=========================================================================
// Handler System
//=========================================================================
//
// Per-menu narration state machines and their per-tick contract.
//
// Architecture:
//   HandlerDispatcher
//     └─ entries: Vec<{ Box<dyn MenuHandler>, was_open }>  (priority order)
//
// Flow per tick:
//   dispatcher.tick() → is_open()? → update(ctx, just_opened)
//                     → close edge → on_close(ctx)
//
// Each handler exclusively owns its own snapshot state; the only shared
// surfaces are the read-only game-state query, the shared flags, and the
// announcement sink, all carried by `TickContext`.
//
//=========================================================================

//=== Module Declarations =================================================

mod dispatcher;
pub mod schedule;
pub mod snapshot;

//=== Public API ==========================================================

pub use dispatcher::HandlerDispatcher;
pub use schedule::Delay;
pub use snapshot::Watched;

//=== External Dependencies ===============================================

use thiserror::Error;

//=== Internal Dependencies ===============================================

use crate::core::globals::SharedFlags;
use crate::core::host::query::GameStateQuery;
use crate::core::input::{Action, InputSystem};
use crate::core::settings::Settings;
use crate::core::speech::AnnouncementSink;

//=== TickContext =========================================================

/// Everything a handler may touch during one tick.
///
/// Handlers receive `&mut TickContext` in their lifecycle methods. Input
/// is mutable so a handler can consume opening edges or apply a captured
/// binding; the game-state query and settings are read-only.
pub struct TickContext<'a, A: Action> {
    /// Input queries, edge consumption, and the binding table.
    pub input: &'a mut InputSystem<A>,

    /// The announcement outlet.
    pub speech: &'a mut AnnouncementSink,

    /// Read-only composite host-state predicates.
    pub game: &'a GameStateQuery,

    /// Shared read-mostly flags and the dialogue intercept queue.
    /// Convention: one writing handler per flag.
    pub flags: &'a mut SharedFlags,

    /// Current settings snapshot.
    pub settings: &'a Settings,

    /// Monotonic tick counter since engine start.
    pub tick: u64,
}

//=== HandlerError ========================================================

/// A handler's unexpected per-tick fault.
///
/// The dispatcher logs the fault with the handler's name and moves on;
/// the faulting handler simply produces no announcement this tick and
/// sibling handlers are unaffected. Routine "host object is missing"
/// conditions are not errors: boundary reads return `Option` and
/// handlers degrade to neutral fallbacks.
#[derive(Debug, Error)]
pub enum HandlerError {
    /// A host structure the handler cannot degrade around disappeared
    /// mid-update.
    #[error("host state unavailable: {0}")]
    HostStateUnavailable(&'static str),

    /// Any other per-tick fault.
    #[error("{0}")]
    Other(String),
}

//=== MenuHandler Trait ===================================================

/// One narration state machine per host menu/panel.
///
/// Handlers are registered once with the [`HandlerDispatcher`] and live
/// for the process lifetime. The dispatcher performs open/close edge
/// detection; handlers only ever see `update` while they are open.
///
/// # Minimal Implementation
///
/// Only `name`, `priority`, `is_open`, `update`, and `announce_status`
/// are required; `on_close` defaults to doing nothing.
pub trait MenuHandler<A: Action> {
    /// Stable name used in logs.
    fn name(&self) -> &'static str;

    /// Ascending urgency: lower values answer status requests first.
    fn priority(&self) -> i32;

    /// Cheap, side-effect-free probe of host state. Called every tick.
    fn is_open(&self) -> bool;

    /// Called every tick while open.
    ///
    /// On the `just_opened` tick the handler resets its snapshot to
    /// sentinels, consumes opening input edges, and emits one composed
    /// opening announcement. On subsequent ticks it diffs current host
    /// fields against the snapshot in fixed priority order (state/mode >
    /// cursor > tab > value), emits at most one announcement for the
    /// highest-priority change, then records every field.
    fn update(
        &mut self,
        ctx: &mut TickContext<'_, A>,
        just_opened: bool,
    ) -> Result<(), HandlerError>;

    /// Called once when the dispatcher observes the close edge.
    ///
    /// Default implementation does nothing. Override to clear snapshot
    /// state and release any shared flags this handler writes.
    fn on_close(&mut self, _ctx: &mut TickContext<'_, A>) {}

    /// Reconstructs and speaks the current full announcement without
    /// mutating any snapshot state. Idempotent; callable at any time
    /// while open. Used for explicit "repeat what's selected" requests.
    fn announce_status(&self, ctx: &mut TickContext<'_, A>);
}
