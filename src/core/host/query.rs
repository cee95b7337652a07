//=========================================================================
// Game-State Query Facade
//=========================================================================
//
// Composite read-only predicates over raw host state, shared by every
// handler that gates its own activity on "is anything blocking control".
//
// The probe returns `Option<bool>` per field: `None` means the backing
// host object is missing or not yet created. All "might be missing"
// handling lives here, at the boundary; handlers never see an error or
// a null, only conservative booleans.
//
// Fail-safe, never fail-open: announcing during a cutscene because a
// field could not be read is worse than staying silent, so unknown state
// reads as blocked / not controllable.
//
//=========================================================================

//=== GameStateProbe ======================================================

/// Raw host-state reads, one per field the facade composes over.
///
/// Implementations poll whatever the host exposes (flags, enum fields,
/// object existence) and answer `None` whenever the backing object is
/// unavailable. Probes must be cheap and side-effect-free; they run
/// several times per tick.
pub trait GameStateProbe {
    /// A battle is in progress.
    fn battle_active(&self) -> Option<bool>;

    /// The host is paused.
    fn paused(&self) -> Option<bool>;

    /// A cutscene is playing.
    fn cutscene_active(&self) -> Option<bool>;

    /// The player is in post-death recovery.
    fn death_recovery_active(&self) -> Option<bool>;

    /// A non-controllable animation owns the player.
    fn movement_locked(&self) -> Option<bool>;

    /// A modal menu is blocking field input.
    fn blocking_menu_open(&self) -> Option<bool>;
}

//=== DisconnectedProbe ===================================================

/// Probe for a host that has not wired anything up: every read is
/// indeterminate, so every predicate answers conservatively.
pub struct DisconnectedProbe;

impl GameStateProbe for DisconnectedProbe {
    fn battle_active(&self) -> Option<bool> {
        None
    }

    fn paused(&self) -> Option<bool> {
        None
    }

    fn cutscene_active(&self) -> Option<bool> {
        None
    }

    fn death_recovery_active(&self) -> Option<bool> {
        None
    }

    fn movement_locked(&self) -> Option<bool> {
        None
    }

    fn blocking_menu_open(&self) -> Option<bool> {
        None
    }
}

//=== GameStateQuery ======================================================

/// The facade handlers query. Wraps a boxed probe with conservative
/// composition: unknown reads as blocked.
pub struct GameStateQuery {
    probe: Box<dyn GameStateProbe>,
}

impl GameStateQuery {
    /// Creates the facade over an embedder probe.
    pub fn new(probe: Box<dyn GameStateProbe>) -> Self {
        Self { probe }
    }

    /// Facade over a host with nothing wired up; everything reads as
    /// blocked.
    pub fn disconnected() -> Self {
        Self::new(Box::new(DisconnectedProbe))
    }

    //--- Composite Predicates ---------------------------------------------

    /// A battle is in progress (unknown counts as yes).
    pub fn is_in_battle(&self) -> bool {
        self.probe.battle_active().unwrap_or(true)
    }

    /// The host is paused (unknown counts as yes).
    pub fn is_paused(&self) -> bool {
        self.probe.paused().unwrap_or(true)
    }

    /// A cutscene is playing (unknown counts as yes).
    pub fn is_in_cutscene(&self) -> bool {
        self.probe.cutscene_active().unwrap_or(true)
    }

    /// A modal menu is blocking field input (unknown counts as yes).
    pub fn is_any_blocking_menu_open(&self) -> bool {
        self.probe.blocking_menu_open().unwrap_or(true)
    }

    /// The player can act right now: not paused and not in any of
    /// battle, cutscene, death recovery, or a locked animation. True
    /// only when every component is definitively clear.
    pub fn is_player_controllable(&self) -> bool {
        let clear = |read: Option<bool>| read == Some(false);

        clear(self.probe.paused())
            && clear(self.probe.battle_active())
            && clear(self.probe.cutscene_active())
            && clear(self.probe.death_recovery_active())
            && clear(self.probe.movement_locked())
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::rc::Rc;

    //--- Fake Probe -------------------------------------------------------

    /// Probe over shared cells so tests can flip host state mid-test.
    #[derive(Clone, Default)]
    struct FakeHost {
        battle: Rc<Cell<Option<bool>>>,
        paused: Rc<Cell<Option<bool>>>,
        cutscene: Rc<Cell<Option<bool>>>,
        death: Rc<Cell<Option<bool>>>,
        locked: Rc<Cell<Option<bool>>>,
        menu: Rc<Cell<Option<bool>>>,
    }

    impl FakeHost {
        /// Everything readable and clear.
        fn all_clear() -> Self {
            let host = Self::default();
            host.battle.set(Some(false));
            host.paused.set(Some(false));
            host.cutscene.set(Some(false));
            host.death.set(Some(false));
            host.locked.set(Some(false));
            host.menu.set(Some(false));
            host
        }
    }

    impl GameStateProbe for FakeHost {
        fn battle_active(&self) -> Option<bool> {
            self.battle.get()
        }

        fn paused(&self) -> Option<bool> {
            self.paused.get()
        }

        fn cutscene_active(&self) -> Option<bool> {
            self.cutscene.get()
        }

        fn death_recovery_active(&self) -> Option<bool> {
            self.death.get()
        }

        fn movement_locked(&self) -> Option<bool> {
            self.locked.get()
        }

        fn blocking_menu_open(&self) -> Option<bool> {
            self.menu.get()
        }
    }

    //=====================================================================
    // Conservative Composition Tests
    //=====================================================================

    /// Tests a fully clear host reads as controllable.
    #[test]
    fn all_clear_is_controllable() {
        let query = GameStateQuery::new(Box::new(FakeHost::all_clear()));

        assert!(query.is_player_controllable());
        assert!(!query.is_in_battle());
        assert!(!query.is_paused());
        assert!(!query.is_in_cutscene());
        assert!(!query.is_any_blocking_menu_open());
    }

    /// Tests any active blocker removes controllability.
    #[test]
    fn any_blocker_removes_control() {
        let host = FakeHost::all_clear();
        let query = GameStateQuery::new(Box::new(host.clone()));
        assert!(query.is_player_controllable());

        host.cutscene.set(Some(true));
        assert!(!query.is_player_controllable());
        assert!(query.is_in_cutscene());

        host.cutscene.set(Some(false));
        host.locked.set(Some(true));
        assert!(!query.is_player_controllable());
    }

    /// Tests a single unknown field is enough to read as blocked.
    #[test]
    fn unknown_field_reads_as_blocked() {
        let host = FakeHost::all_clear();
        let query = GameStateQuery::new(Box::new(host.clone()));

        host.death.set(None);
        assert!(!query.is_player_controllable());
    }

    /// Tests a disconnected host blocks everything without panicking.
    #[test]
    fn disconnected_host_is_fully_blocked() {
        let query = GameStateQuery::disconnected();

        assert!(query.is_in_battle());
        assert!(query.is_paused());
        assert!(query.is_in_cutscene());
        assert!(query.is_any_blocking_menu_open());
        assert!(!query.is_player_controllable());
    }
}
