//=========================================================================
// Aria Engine
//
// Main entry point and per-tick coordinator.
//
// Architecture:
// ```text
//     EngineBuilder  ──build()──>  NarrationEngine  ──tick(frame)──>
//         │                            │
//         ├─ with_speech_backend()     ├─ digests input
//         ├─ with_game_probe()         ├─ runs the handler dispatcher
//         ├─ with_injector()           └─ advances the tick counter
//         └─ with_settings()
// ```
//
// Unlike a self-hosting engine there is no internal loop or thread: the
// host's per-frame callback calls `tick()` and everything advances
// exactly once. All other entry points (`request_status`,
// `on_text_intercepted`, `repeat_last`) are thin and re-entrant-safe
// within a frame because the whole system is single-threaded.
//
//=========================================================================

//=== External Dependencies ===============================================

use log::{debug, info};

//=== Internal Dependencies ===============================================

use crate::core::globals::SharedFlags;
use crate::core::handler::{HandlerDispatcher, MenuHandler, TickContext};
use crate::core::host::{GameStateProbe, GameStateQuery, InputInjector, SyntheticInput};
use crate::core::input::{Action, InputFrame, InputSystem};
use crate::core::settings::Settings;
use crate::core::speech::{AnnouncementSink, SpeechBackend};

//=== EngineBuilder =======================================================

/// Builder for configuring and constructing a [`NarrationEngine`].
///
/// Provides a fluent API for wiring the host boundary before the first
/// tick. Everything is optional: an unconfigured engine is silent and
/// conservative (no backend, disconnected game probe, no injector).
///
/// # Defaults
///
/// - **Settings**: [`Settings::default`] (speech on, repeat 16/4,
///   deadzone 0.5)
/// - **Speech backend**: none; announcements recorded, nothing spoken
/// - **Game probe**: disconnected; every predicate reads as blocked
/// - **Injector**: none; `inject()` is a logged no-op
///
/// # Examples
///
/// ```
/// use aria_engine::prelude::*;
///
/// #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
/// enum NavAction { Confirm, Cancel, ReadStatus }
/// impl Action for NavAction {}
///
/// let mut engine = EngineBuilder::<NavAction>::new().build();
/// engine.tick(&InputFrame::new());
/// ```
pub struct EngineBuilder<A: Action> {
    settings: Settings,
    backend: Option<Box<dyn SpeechBackend>>,
    probe: Option<Box<dyn GameStateProbe>>,
    injector: Option<Box<dyn InputInjector>>,
    _phantom: std::marker::PhantomData<A>,
}

impl<A: Action> EngineBuilder<A> {
    /// Creates a builder with default settings.
    pub fn new() -> Self {
        Self {
            settings: Settings::default(),
            backend: None,
            probe: None,
            injector: None,
            _phantom: std::marker::PhantomData,
        }
    }

    /// Uses loaded (or otherwise prepared) settings instead of defaults.
    pub fn with_settings(mut self, settings: Settings) -> Self {
        self.settings = settings;
        self
    }

    /// Installs the text-to-speech backend.
    pub fn with_speech_backend(mut self, backend: Box<dyn SpeechBackend>) -> Self {
        self.backend = Some(backend);
        self
    }

    /// Installs the game-state probe the query facade composes over.
    pub fn with_game_probe(mut self, probe: Box<dyn GameStateProbe>) -> Self {
        self.probe = Some(probe);
        self
    }

    /// Installs the outbound input injector.
    pub fn with_injector(mut self, injector: Box<dyn InputInjector>) -> Self {
        self.injector = Some(injector);
        self
    }

    /// Builds the engine, applying settings to every subsystem.
    pub fn build(self) -> NarrationEngine<A> {
        let mut input = InputSystem::new();
        input.set_repeat_timing(
            self.settings.repeat_delay_ticks,
            self.settings.repeat_interval_ticks,
        );
        input.set_stick_deadzone(self.settings.stick_deadzone);

        let mut speech = match self.backend {
            Some(backend) => AnnouncementSink::with_backend(backend),
            None => AnnouncementSink::disconnected(),
        };
        speech.set_enabled(self.settings.speech_enabled);

        let game = match self.probe {
            Some(probe) => GameStateQuery::new(probe),
            None => GameStateQuery::disconnected(),
        };

        info!("narration engine ready");

        NarrationEngine {
            input,
            speech,
            dispatcher: HandlerDispatcher::new(),
            game,
            flags: SharedFlags::new(),
            settings: self.settings,
            injector: self.injector,
            tick: 0,
        }
    }
}

impl<A: Action> Default for EngineBuilder<A> {
    fn default() -> Self {
        Self::new()
    }
}

//=== NarrationEngine =====================================================

/// The facade owning every subsystem, advanced once per host frame.
pub struct NarrationEngine<A: Action> {
    input: InputSystem<A>,
    speech: AnnouncementSink,
    dispatcher: HandlerDispatcher<A>,
    game: GameStateQuery,
    flags: SharedFlags,
    settings: Settings,
    injector: Option<Box<dyn InputInjector>>,
    tick: u64,
}

impl<A: Action> NarrationEngine<A> {
    //--- Registration -----------------------------------------------------

    /// Registers a per-menu handler. Handlers live for the engine's
    /// lifetime and are kept in ascending priority order.
    pub fn register_handler(&mut self, handler: Box<dyn MenuHandler<A>>) {
        self.dispatcher.register(handler);
    }

    //--- Per-Frame Entry Points -------------------------------------------

    /// Advances the whole system one tick: digests the polled input
    /// frame, then runs every handler through the dispatcher.
    pub fn tick(&mut self, frame: &InputFrame) {
        self.input.digest(frame);

        let mut ctx = TickContext {
            input: &mut self.input,
            speech: &mut self.speech,
            game: &self.game,
            flags: &mut self.flags,
            settings: &self.settings,
            tick: self.tick,
        };
        self.dispatcher.tick(&mut ctx);

        self.tick += 1;
    }

    /// Explicit "repeat what's selected" request: the first open handler
    /// in priority order answers; everything else stays quiet.
    pub fn request_status(&mut self) {
        let mut ctx = TickContext {
            input: &mut self.input,
            speech: &mut self.speech,
            game: &self.game,
            flags: &mut self.flags,
            settings: &self.settings,
            tick: self.tick,
        };
        if !self.dispatcher.announce_status(&mut ctx) {
            debug!("status requested with no open handler");
        }
    }

    /// Re-speaks the last announcement, interrupting.
    pub fn repeat_last(&mut self) {
        self.speech.repeat_last();
    }

    /// Stops any in-flight utterance.
    pub fn silence(&mut self) {
        self.speech.silence();
    }

    //--- Host Hooks -------------------------------------------------------

    /// The narrow push-style inbound hook: a finalized dialogue line,
    /// delivered before any animated reveal. Enqueued for the dialogue
    /// handler's next update.
    pub fn on_text_intercepted(&mut self, speaker: Option<&str>, text: &str) {
        self.flags.intercepts.push(speaker, text);
    }

    /// Writes synthetic input into the host's per-tick input buffer
    /// through the installed injector.
    pub fn inject(&mut self, input: &SyntheticInput) {
        match &mut self.injector {
            Some(injector) => injector.inject(input),
            None => debug!("no input injector installed; dropped {:?}", input),
        }
    }

    //--- Accessors --------------------------------------------------------

    /// The input system (binding setup at startup, queries in tests).
    pub fn input(&self) -> &InputSystem<A> {
        &self.input
    }

    /// Mutable input system access for startup binding configuration.
    pub fn input_mut(&mut self) -> &mut InputSystem<A> {
        &mut self.input
    }

    /// The announcement sink.
    pub fn speech(&self) -> &AnnouncementSink {
        &self.speech
    }

    /// The game-state query facade.
    pub fn game(&self) -> &GameStateQuery {
        &self.game
    }

    /// Current settings.
    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Replaces settings wholesale and re-applies them to the input
    /// timing and speech toggle.
    pub fn apply_settings(&mut self, settings: Settings) {
        self.input
            .set_repeat_timing(settings.repeat_delay_ticks, settings.repeat_interval_ticks);
        self.input.set_stick_deadzone(settings.stick_deadzone);
        self.speech.set_enabled(settings.speech_enabled);
        self.settings = settings;
    }

    /// Whether any registered handler is currently open.
    pub fn any_menu_open(&self) -> bool {
        self.dispatcher.any_open()
    }

    /// Ticks elapsed since engine start.
    pub fn ticks_elapsed(&self) -> u64 {
        self.tick
    }
}
