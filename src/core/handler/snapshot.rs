//=========================================================================
// Watched Cell
//=========================================================================
//
// Echo-suppression cell for one tracked host field.
//
// A handler keeps one `Watched<T>` per field it narrates. Each tick it
// observes the current value; the cell reports a change only when the
// value actually differs from the last recorded one, and records the
// new value unconditionally so the same change is never reported twice.
//
// The first observation after a reset establishes a baseline silently:
// opening a menu announces a composed line instead of a storm of
// per-field changes.
//
//=========================================================================

//=== Watched =============================================================

/// Last-seen cache for one tracked value. Purely for change detection;
/// never drives business logic.
#[derive(Debug, Clone)]
pub struct Watched<T> {
    last: Option<T>,
}

impl<T: PartialEq> Watched<T> {
    /// Creates an unprimed cell (sentinel state).
    pub fn new() -> Self {
        Self { last: None }
    }

    /// Returns to the sentinel state. The next observation is a silent
    /// baseline.
    pub fn reset(&mut self) {
        self.last = None;
    }

    /// Observes the current value, returning `true` when it differs from
    /// the last recorded one. The value is recorded either way.
    ///
    /// The first observation after construction or `reset` records and
    /// returns `false`.
    pub fn observe(&mut self, current: T) -> bool {
        let changed = match &self.last {
            Some(previous) => *previous != current,
            None => false,
        };
        self.last = Some(current);
        changed
    }

    /// The last recorded value, if primed.
    pub fn get(&self) -> Option<&T> {
        self.last.as_ref()
    }

    /// Whether a baseline has been recorded since the last reset.
    pub fn is_primed(&self) -> bool {
        self.last.is_some()
    }
}

impl<T: PartialEq> Default for Watched<T> {
    fn default() -> Self {
        Self::new()
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
