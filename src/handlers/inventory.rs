//=========================================================================
// Inventory Handler
//=========================================================================
//
// Narration for a tabbed item-grid menu.
//
// Tracked fields, in diff priority order:
//   view mode (Browsing/Detail) > cursor > selected tab > quantity
//
// One quirk this handler works around: the host populates the item label
// text on the tick *after* a cursor move. A cursor change therefore
// schedules a one-tick deferred read instead of announcing immediately;
// the deferred announcement still counts as the single announcement for
// that cursor change.
//
//=========================================================================

//=== External Dependencies ===============================================

use log::debug;

//=== Internal Dependencies ===============================================

use crate::core::handler::{Delay, HandlerError, MenuHandler, TickContext, Watched};
use crate::core::input::Action;
use crate::core::speech::phrase;

//=== InventoryView =======================================================

/// Which pane of the inventory owns the cursor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InventoryView {
    /// Grid browsing.
    Browsing,

    /// Detail pane for the selected item.
    Detail,
}

//=== InventoryProbe ======================================================

/// Polled reads against the host's inventory panel.
///
/// Every read answers `None` when the backing object is missing or
/// destroyed; the handler degrades to neutral fallbacks.
pub trait InventoryProbe {
    /// Panel exists and is not in a closed/terminal state.
    fn is_open(&self) -> Option<bool>;

    /// Current pane.
    fn view(&self) -> Option<InventoryView>;

    /// Selected tab index.
    fn tab_index(&self) -> Option<usize>;

    /// Display label of a tab.
    fn tab_label(&self, index: usize) -> Option<String>;

    /// Cursor position in the grid.
    fn cursor_index(&self) -> Option<usize>;

    /// Item count in the active tab.
    fn item_count(&self) -> Option<usize>;

    /// Display label of an item. May lag one tick behind cursor moves.
    fn item_label(&self, index: usize) -> Option<String>;

    /// Held quantity of an item.
    fn item_quantity(&self, index: usize) -> Option<u32>;
}

//=== InventoryHandler ====================================================

/// State machine narrating one inventory panel.
pub struct InventoryHandler<P: InventoryProbe> {
    probe: P,
    priority: i32,

    //--- Snapshot (echo suppression only) --------------------------------
    view: Watched<InventoryView>,
    cursor: Watched<usize>,
    tab: Watched<usize>,
    quantity: Watched<u32>,

    //--- Deferred label read ---------------------------------------------
    label_read: Delay,
}

impl<P: InventoryProbe> InventoryHandler<P> {
    pub const DEFAULT_PRIORITY: i32 = 10;

    /// Creates the handler over a host probe.
    pub fn new(probe: P) -> Self {
        Self {
            probe,
            priority: Self::DEFAULT_PRIORITY,
            view: Watched::new(),
            cursor: Watched::new(),
            tab: Watched::new(),
            quantity: Watched::new(),
            label_read: Delay::idle(),
        }
    }

    /// Overrides the dispatch priority.
    pub fn with_priority(mut self, priority: i32) -> Self {
        self.priority = priority;
        self
    }

    //--- Phrase Composition -----------------------------------------------

    fn tab_line(&self, tab: usize) -> String {
        let label = phrase::label_or_fallback(self.probe.tab_label(tab).as_deref(), tab);
        format!("{} tab", label)
    }

    fn cursor_line(&self, cursor: usize, verbose: bool) -> String {
        let count = self.probe.item_count().unwrap_or(0);
        let label =
            phrase::label_or_fallback(self.probe.item_label(cursor).as_deref(), cursor);
        let mut line = phrase::position(&label, cursor, count);

        if verbose {
            if let Some(quantity) = self.probe.item_quantity(cursor) {
                if quantity > 1 {
                    line.push_str(&format!(", x{}", quantity));
                }
            }
        }
        line
    }

    fn view_line(&self, view: InventoryView, cursor: usize) -> String {
        match view {
            InventoryView::Browsing => "Browsing".to_string(),
            InventoryView::Detail => {
                let label = phrase::label_or_fallback(
                    self.probe.item_label(cursor).as_deref(),
                    cursor,
                );
                format!("Details. {}", label)
            }
        }
    }

    fn full_line(&self, verbose: bool) -> String {
        let tab = self.probe.tab_index().unwrap_or(0);
        let cursor = self.probe.cursor_index().unwrap_or(0);
        format!(
            "Inventory. {}. {}",
            self.tab_line(tab),
            self.cursor_line(cursor, verbose)
        )
    }
}

impl<A: Action, P: InventoryProbe> MenuHandler<A> for InventoryHandler<P> {
    fn name(&self) -> &'static str {
        "inventory"
    }

    fn priority(&self) -> i32 {
        self.priority
    }

    fn is_open(&self) -> bool {
        self.probe.is_open().unwrap_or(false)
    }

    fn update(
        &mut self,
        ctx: &mut TickContext<'_, A>,
        just_opened: bool,
    ) -> Result<(), HandlerError> {
        let verbose = ctx.settings.verbose_values;

        // Read everything up front; snapshot sync happens regardless of
        // which single change (if any) gets announced.
        let view = self.probe.view().unwrap_or(InventoryView::Browsing);
        let cursor = self.probe.cursor_index().unwrap_or(0);
        let tab = self.probe.tab_index().unwrap_or(0);
        let quantity = self.probe.item_quantity(cursor).unwrap_or(0);

        if just_opened {
            self.view.reset();
            self.cursor.reset();
            self.tab.reset();
            self.quantity.reset();
            self.label_read.cancel();
        }

        let view_changed = self.view.observe(view);
        let cursor_changed = self.cursor.observe(cursor);
        let tab_changed = self.tab.observe(tab);
        let quantity_changed = self.quantity.observe(quantity);

        if just_opened {
            // The press that opened the menu must not double as the
            // first navigation input.
            ctx.input.consume_edges();
            ctx.speech.speak(&self.full_line(verbose), true);
            return Ok(());
        }

        // Deferred cursor announcement from last tick's move; the label
        // is populated by now. If the cursor moved again this very tick
        // (held-repeat scrolling), defer once more instead of reading a
        // still-lagging row.
        if self.label_read.tick() {
            if cursor_changed {
                self.label_read.start(1);
            } else {
                ctx.speech.speak(&self.cursor_line(cursor, verbose), true);
            }
            return Ok(());
        }

        // At most one announcement per tick, highest priority first.
        if view_changed {
            ctx.speech.speak(&self.view_line(view, cursor), true);
        } else if cursor_changed {
            debug!("inventory cursor moved to {}; deferring label read", cursor);
            self.label_read.start(1);
        } else if tab_changed {
            ctx.speech.speak(&self.tab_line(tab), true);
        } else if quantity_changed && verbose {
            let label =
                phrase::label_or_fallback(self.probe.item_label(cursor).as_deref(), cursor);
            ctx.speech.speak(&format!("{}, x{}", label, quantity), true);
        }

        Ok(())
    }

    fn on_close(&mut self, _ctx: &mut TickContext<'_, A>) {
        self.view.reset();
        self.cursor.reset();
        self.tab.reset();
        self.quantity.reset();
        self.label_read.cancel();
    }

    fn announce_status(&self, ctx: &mut TickContext<'_, A>) {
        let line = self.full_line(ctx.settings.verbose_values);
        ctx.speech.speak(&line, true);
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
