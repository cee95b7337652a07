//=========================================================================
// State Tracker
//=========================================================================
//
// Low-level control state tracking with per-tick delta derivation.
//
// Architecture:
//   InputFrame → digest() → HashMap (control → held ticks) → query
//
// Tick lifecycle: digest(frame) → query. The tracker derives edges by
// comparing the incoming snapshot against the held set, so the host can
// stay a dumb poll source.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::collections::{HashMap, HashSet};

//=== Internal Dependencies ===============================================

use super::event::{Control, InputFrame, Modifier, StickDirection};

//=== Defaults ============================================================

/// Ticks a control must stay held before the first repeat re-fire.
pub const DEFAULT_REPEAT_DELAY: u32 = 16;

/// Ticks between repeat re-fires once the delay has elapsed.
pub const DEFAULT_REPEAT_INTERVAL: u32 = 4;

/// Stick magnitude below which no direction is produced.
pub const DEFAULT_STICK_DEADZONE: f32 = 0.5;

//=== StateTracker ========================================================

/// Tracks persistent state (controls held, for how long) and per-tick
/// deltas (controls pressed/released). Tick lifecycle: digest() → query.
///
/// Hold duration drives the repeat channel: a held control re-fires once
/// it has been held for `repeat_delay` ticks (the press tick counts as
/// tick 1), then every `repeat_interval` ticks after that. Directional
/// navigation reads [`navigation_pulse`](Self::navigation_pulse);
/// confirm/cancel style actions read [`is_just_pressed`](Self::is_just_pressed)
/// only, so they can never repeat.
pub struct StateTracker {
    //--- Persistent State (survives tick boundary) -----------------------
    /// Control → number of consecutive ticks held (press tick = 1).
    held: HashMap<Control, u32>,
    modifiers_held: HashSet<Modifier>,

    //--- Tick Deltas (rebuilt by every digest()) -------------------------
    pressed_this_tick: HashSet<Control>,
    released_this_tick: HashSet<Control>,

    //--- Repeat & Deadzone Configuration ---------------------------------
    repeat_delay: u32,
    repeat_interval: u32,
    stick_deadzone: f32,
}

impl StateTracker {
    /// Creates a tracker with default repeat timing and deadzone.
    pub fn new() -> Self {
        Self {
            held: HashMap::new(),
            modifiers_held: HashSet::new(),
            pressed_this_tick: HashSet::new(),
            released_this_tick: HashSet::new(),
            repeat_delay: DEFAULT_REPEAT_DELAY,
            repeat_interval: DEFAULT_REPEAT_INTERVAL,
            stick_deadzone: DEFAULT_STICK_DEADZONE,
        }
    }

    //--- Configuration ----------------------------------------------------

    /// Sets repeat timing. An interval of 0 is clamped to 1.
    pub fn set_repeat_timing(&mut self, delay: u32, interval: u32) {
        self.repeat_delay = delay;
        self.repeat_interval = interval.max(1);
    }

    /// Sets the stick deadzone threshold.
    pub fn set_stick_deadzone(&mut self, deadzone: f32) {
        self.stick_deadzone = deadzone;
    }

    //--- Tick Processing --------------------------------------------------

    /// Digests one polled frame, deriving edges and advancing hold counts.
    pub fn digest(&mut self, frame: &InputFrame) {
        let mut now: HashSet<Control> = HashSet::new();
        now.extend(frame.keys().map(|k| Control::Key(*k)));
        now.extend(frame.buttons().map(|b| Control::Pad(*b)));
        if let Some(direction) = self.coerce_stick(frame.stick_vector()) {
            now.insert(Control::Stick(direction));
        }

        self.pressed_this_tick.clear();
        self.released_this_tick.clear();

        // Releases first: anything held that is absent from the snapshot.
        let released = &mut self.released_this_tick;
        self.held.retain(|control, _| {
            if now.contains(control) {
                true
            } else {
                released.insert(*control);
                false
            }
        });

        // Holds advance, new presses start at tick 1.
        for control in now {
            let ticks = self.held.entry(control).or_insert(0);
            if *ticks == 0 {
                self.pressed_this_tick.insert(control);
            }
            *ticks += 1;
        }

        self.modifiers_held = frame.modifiers().copied().collect();
    }

    /// Seeds edge state so currently-pressed controls stop reading as
    /// just-pressed for the remainder of this tick.
    ///
    /// Called by a handler on its opening tick: the press that opened the
    /// menu must not double as its first navigation input.
    pub fn consume_edges(&mut self) {
        self.pressed_this_tick.clear();
    }

    //--- Internal Helpers -------------------------------------------------

    /// Reduces the raw stick vector to at most one direction.
    ///
    /// Magnitude under the deadzone yields nothing; otherwise the dominant
    /// axis wins (ties go to the horizontal axis).
    fn coerce_stick(&self, (x, y): (f32, f32)) -> Option<StickDirection> {
        if x.abs().max(y.abs()) < self.stick_deadzone {
            return None;
        }
        if x.abs() >= y.abs() {
            Some(if x > 0.0 { StickDirection::Right } else { StickDirection::Left })
        } else {
            Some(if y > 0.0 { StickDirection::Up } else { StickDirection::Down })
        }
    }

    //=====================================================================
    // Query API - Edges & Holds
    //=====================================================================

    /// Returns `true` while the control is held.
    pub fn is_held(&self, control: Control) -> bool {
        self.held.contains_key(&control)
    }

    /// Returns `true` exactly one tick per UP → DOWN transition.
    ///
    /// Use for discrete actions like confirm, cancel, or opening menus.
    pub fn is_just_pressed(&self, control: Control) -> bool {
        self.pressed_this_tick.contains(&control)
    }

    /// Returns `true` if the control transitioned DOWN → UP this tick.
    pub fn is_just_released(&self, control: Control) -> bool {
        self.released_this_tick.contains(&control)
    }

    /// Returns the number of consecutive ticks the control has been held
    /// (press tick = 1), or 0 when not held.
    pub fn held_ticks(&self, control: Control) -> u32 {
        self.held.get(&control).copied().unwrap_or(0)
    }

    //=====================================================================
    // Query API - Repeat Channel
    //=====================================================================

    /// Returns `true` on scheduled repeat re-fires while the control stays
    /// held: first once the hold reaches the repeat delay, then on every
    /// interval boundary. Always `false` once released.
    pub fn is_repeating(&self, control: Control) -> bool {
        match self.held.get(&control) {
            Some(&ticks) if ticks >= self.repeat_delay.max(1) => {
                (ticks - self.repeat_delay.max(1)) % self.repeat_interval == 0
            }
            _ => false,
        }
    }

    /// The channel directional inputs use: the initial press edge plus
    /// every scheduled repeat re-fire.
    pub fn navigation_pulse(&self, control: Control) -> bool {
        self.is_just_pressed(control) || self.is_repeating(control)
    }

    //=====================================================================
    // Query API - Modifiers & Iteration
    //=====================================================================

    /// Returns `true` if the modifier is held this tick.
    pub fn is_modifier_held(&self, modifier: Modifier) -> bool {
        self.modifiers_held.contains(&modifier)
    }

    /// Returns the held modifier with the highest capture precedence, if
    /// any. Deterministic even when several modifiers are held at once.
    pub fn active_modifier(&self) -> Option<Modifier> {
        Modifier::ALL
            .iter()
            .copied()
            .find(|m| self.modifiers_held.contains(m))
    }

    /// Iterates controls that edge-triggered this tick. Binding capture
    /// scans this.
    pub fn pressed_controls(&self) -> impl Iterator<Item = &Control> {
        self.pressed_this_tick.iter()
    }
}

//--- Trait Implementations -----------------------------------------------

impl Default for StateTracker {
    fn default() -> Self {
        Self::new()
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
