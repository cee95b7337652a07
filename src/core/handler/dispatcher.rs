//=========================================================================
// Handler Dispatcher
//=========================================================================
//
// Owns the ordered handler collection and routes the per-tick calls.
//
// Handlers are kept sorted by ascending priority (lower = more urgent).
// Registration order breaks ties, so two handlers at the same priority
// answer status requests in the order they were registered.
//
// The tick is strictly sequential and single-threaded: no handler is
// ever invoked concurrently with itself or a sibling, so announcements
// never interleave.
//
//=========================================================================

//=== External Dependencies ===============================================

use log::{debug, warn};

//=== Internal Dependencies ===============================================

use super::{MenuHandler, TickContext};
use crate::core::input::Action;

//=== HandlerEntry ========================================================

/// A registered handler plus the dispatcher-side open/close memory.
struct HandlerEntry<A: Action> {
    handler: Box<dyn MenuHandler<A>>,
    was_open: bool,
}

//=== HandlerDispatcher ===================================================

/// Routes per-tick updates and status requests across all registered
/// handlers.
pub struct HandlerDispatcher<A: Action> {
    entries: Vec<HandlerEntry<A>>,
}

impl<A: Action> HandlerDispatcher<A> {
    //--- Construction -----------------------------------------------------

    /// Creates an empty dispatcher.
    pub fn new() -> Self {
        Self { entries: Vec::new() }
    }

    //--- Registration -----------------------------------------------------

    /// Registers a handler, keeping the collection sorted by ascending
    /// priority. Stable for ties: later registrations go after earlier
    /// ones at the same priority.
    pub fn register(&mut self, handler: Box<dyn MenuHandler<A>>) {
        debug!(
            "registering handler '{}' at priority {}",
            handler.name(),
            handler.priority()
        );

        let priority = handler.priority();
        let position = self
            .entries
            .iter()
            .position(|entry| entry.handler.priority() > priority)
            .unwrap_or(self.entries.len());

        self.entries.insert(
            position,
            HandlerEntry { handler, was_open: false },
        );
    }

    /// Number of registered handlers.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no handlers are registered.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    //--- Update Loop ------------------------------------------------------

    /// Runs one tick across every handler.
    ///
    /// Each handler's own `is_open()` gates whether it does anything;
    /// several handlers may be open at once (a background HUD alongside a
    /// modal menu). The dispatcher detects open/close edges and passes
    /// `just_opened` accordingly. A handler fault is logged and skipped;
    /// sibling handlers always run.
    pub fn tick(&mut self, ctx: &mut TickContext<'_, A>) {
        for entry in &mut self.entries {
            let open = entry.handler.is_open();

            if open {
                let just_opened = !entry.was_open;
                if just_opened {
                    debug!("handler '{}' opened", entry.handler.name());
                }
                if let Err(err) = entry.handler.update(ctx, just_opened) {
                    warn!(
                        "handler '{}' faulted this tick: {}",
                        entry.handler.name(),
                        err
                    );
                }
            } else if entry.was_open {
                debug!("handler '{}' closed", entry.handler.name());
                entry.handler.on_close(ctx);
            }

            entry.was_open = open;
        }
    }

    //--- Status Requests --------------------------------------------------

    /// Handles an explicit "announce current status" request: walks
    /// handlers in priority order and invokes `announce_status` on the
    /// first open one only. Returns whether any handler answered.
    pub fn announce_status(&self, ctx: &mut TickContext<'_, A>) -> bool {
        for entry in &self.entries {
            if entry.handler.is_open() {
                entry.handler.announce_status(ctx);
                return true;
            }
        }
        false
    }

    /// Whether any registered handler is currently open.
    pub fn any_open(&self) -> bool {
        self.entries.iter().any(|entry| entry.handler.is_open())
    }
}

impl<A: Action> Default for HandlerDispatcher<A> {
    fn default() -> Self {
        Self::new()
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
