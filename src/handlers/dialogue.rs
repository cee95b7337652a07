//=========================================================================
// Dialogue Handler
//=========================================================================
//
// Narration for the host's dialogue box.
//
// Text arrives two ways and must be spoken exactly once:
// - the push hook delivers finalized lines into the intercept queue the
//   moment the host commits them, before any animated reveal
// - the polled caption field catches lines the hook missed (and the
//   opening line, whose localized text lands a few ticks after the box
//   appears)
// The last-spoken-line cache deduplicates across both paths.
//
// While a yes/no choice is up this handler owns the
// `confirm_dialog_open` shared flag (single writer).
//
//=========================================================================

//=== Internal Dependencies ===============================================

use crate::core::handler::{Delay, HandlerError, MenuHandler, TickContext, Watched};
use crate::core::input::Action;
use crate::core::speech::phrase;

//=== DialogueProbe =======================================================

/// Polled reads against the host's dialogue box.
pub trait DialogueProbe {
    /// Box exists and is showing.
    fn is_open(&self) -> Option<bool>;

    /// Speaker name for the current line, when attributed.
    fn speaker(&self) -> Option<String>;

    /// The currently displayed finalized line.
    fn caption(&self) -> Option<String>;

    /// The current line has voice acting.
    fn voiced(&self) -> Option<bool>;

    /// Number of choice options, when a choice is up.
    fn choice_count(&self) -> Option<usize>;

    /// Choice cursor position.
    fn choice_cursor(&self) -> Option<usize>;

    /// Display label of a choice option.
    fn choice_label(&self, index: usize) -> Option<String>;
}

//=== DialogueHandler =====================================================

/// State machine narrating one dialogue box.
pub struct DialogueHandler<P: DialogueProbe> {
    probe: P,
    priority: i32,

    //--- Snapshot (echo suppression only) --------------------------------
    caption: Watched<String>,
    choice_up: Watched<bool>,
    choice_cursor: Watched<usize>,

    //--- Localization wait on open ---------------------------------------
    reveal_delay: Delay,

    /// Raw text of the last narrated line. Dedup keys on the bare text,
    /// not the attributed form, because the intercept path and the
    /// caption path may attribute the same line differently.
    last_spoken: Option<String>,
}

impl<P: DialogueProbe> DialogueHandler<P> {
    pub const DEFAULT_PRIORITY: i32 = 5;

    /// Ticks to wait after opening before the first caption read; the
    /// host finishes async localization in this window.
    pub const LOCALIZATION_DELAY_TICKS: u32 = 2;

    /// Creates the handler over a host probe.
    pub fn new(probe: P) -> Self {
        Self {
            probe,
            priority: Self::DEFAULT_PRIORITY,
            caption: Watched::new(),
            choice_up: Watched::new(),
            choice_cursor: Watched::new(),
            reveal_delay: Delay::idle(),
            last_spoken: None,
        }
    }

    /// Overrides the dispatch priority.
    pub fn with_priority(mut self, priority: i32) -> Self {
        self.priority = priority;
        self
    }

    //--- Phrase Composition -----------------------------------------------

    fn attributed(&self, text: &str) -> String {
        match self.probe.speaker() {
            Some(speaker) if !speaker.is_empty() => format!("{}: {}", speaker, text),
            _ => text.to_string(),
        }
    }

    fn choice_line(&self, cursor: usize) -> String {
        let count = self.probe.choice_count().unwrap_or(0);
        let label =
            phrase::label_or_fallback(self.probe.choice_label(cursor).as_deref(), cursor);
        phrase::position(&label, cursor, count)
    }

    //--- Speech Paths -----------------------------------------------------

    /// Speaks a line queued, unless its raw text repeats the last one or
    /// narration of voiced lines is off.
    fn narrate_line(
        &mut self,
        ctx: &mut TickContext<'_, impl Action>,
        raw: String,
        spoken: String,
    ) {
        if self.last_spoken.as_deref() == Some(raw.as_str()) {
            return;
        }
        if ctx.flags.dialogue_voiced && ctx.settings.skip_voiced_lines {
            self.last_spoken = Some(raw);
            return;
        }
        ctx.speech.speak_queued(&spoken);
        self.last_spoken = Some(raw);
    }
}

impl<A: Action, P: DialogueProbe> MenuHandler<A> for DialogueHandler<P> {
    fn name(&self) -> &'static str {
        "dialogue"
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
        if just_opened {
            self.caption.reset();
            self.choice_up.reset();
            self.choice_cursor.reset();
            self.last_spoken = None;
            self.reveal_delay.start(Self::LOCALIZATION_DELAY_TICKS);
            ctx.input.consume_edges();
        }

        // Single writer for the voiced flag.
        ctx.flags.dialogue_voiced = self.probe.voiced().unwrap_or(false);

        // Intercepted lines narrate as they arrive, ahead of any
        // animated reveal.
        for line in ctx.flags.intercepts.take() {
            let spoken = line.spoken();
            self.narrate_line(ctx, line.text, spoken);
        }

        //--- Choice sub-dialog -------------------------------------------

        let choice_up = self.probe.choice_count().unwrap_or(0) > 0;
        let cursor = self.probe.choice_cursor().unwrap_or(0);

        let choice_up_changed = self.choice_up.observe(choice_up);
        let cursor_changed = self.choice_cursor.observe(cursor);

        if just_opened {
            // A box that opens straight into a choice announces it now;
            // the plain opening caption instead waits out localization.
            if choice_up {
                ctx.flags.confirm_dialog_open = true;
                ctx.speech.speak(&self.choice_line(cursor), true);
            }
            return Ok(());
        }

        if choice_up_changed {
            // Single writer for the confirm flag.
            ctx.flags.confirm_dialog_open = choice_up;
            if choice_up {
                ctx.speech.speak(&self.choice_line(cursor), true);
            }
            return Ok(());
        }

        if choice_up && cursor_changed {
            ctx.speech.speak(&self.choice_line(cursor), true);
            return Ok(());
        }

        //--- Caption -----------------------------------------------------

        // The opening caption read waits out async localization.
        let delay_live = self.reveal_delay.is_counting();
        let delay_fired = self.reveal_delay.tick();
        if delay_live && !delay_fired {
            return Ok(());
        }

        let caption = self.probe.caption().unwrap_or_default();
        let caption_changed = self.caption.observe(caption.clone());

        if (delay_fired || caption_changed) && !caption.is_empty() {
            let raw = phrase::strip_markup(&caption);
            let spoken = self.attributed(&raw);
            self.narrate_line(ctx, raw, spoken);
        }

        Ok(())
    }

    fn on_close(&mut self, ctx: &mut TickContext<'_, A>) {
        if *self.choice_up.get().unwrap_or(&false) {
            ctx.flags.confirm_dialog_open = false;
        }
        ctx.flags.dialogue_voiced = false;
        self.caption.reset();
        self.choice_up.reset();
        self.choice_cursor.reset();
        self.reveal_delay.cancel();
        self.last_spoken = None;
    }

    fn announce_status(&self, ctx: &mut TickContext<'_, A>) {
        let choice_up = self.probe.choice_count().unwrap_or(0) > 0;
        if choice_up {
            let cursor = self.probe.choice_cursor().unwrap_or(0);
            ctx.speech.speak(&self.choice_line(cursor), true);
            return;
        }

        let caption = self.probe.caption().unwrap_or_default();
        if caption.is_empty() {
            return;
        }
        let line = self.attributed(&phrase::strip_markup(&caption));
        ctx.speech.speak(&line, true);
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::globals::SharedFlags;
    use crate::core::host::query::GameStateQuery;
    use crate::core::input::{InputFrame, InputSystem};
    use crate::core::settings::Settings;
    use crate::core::speech::{AnnouncementSink, SpeechBackend};
    use std::cell::RefCell;
    use std::error::Error;
    use std::rc::Rc;

    //--- Test Action Type -------------------------------------------------

    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    enum TestAction {
        Confirm,
    }

    impl Action for TestAction {}

    //--- Fake Dialogue Box ------------------------------------------------

    #[derive(Debug, Default)]
    struct FakeBox {
        open: bool,
        speaker: Option<String>,
        caption: String,
        voiced: bool,
        choices: Vec<&'static str>,
        choice_cursor: usize,
    }

    #[derive(Clone)]
    struct SharedBox(Rc<RefCell<FakeBox>>);

    impl DialogueProbe for SharedBox {
        fn is_open(&self) -> Option<bool> {
            Some(self.0.borrow().open)
        }

        fn speaker(&self) -> Option<String> {
            self.0.borrow().speaker.clone()
        }

        fn caption(&self) -> Option<String> {
            Some(self.0.borrow().caption.clone())
        }

        fn voiced(&self) -> Option<bool> {
            Some(self.0.borrow().voiced)
        }

        fn choice_count(&self) -> Option<usize> {
            let count = self.0.borrow().choices.len();
            Some(count)
        }

        fn choice_cursor(&self) -> Option<usize> {
            Some(self.0.borrow().choice_cursor)
        }

        fn choice_label(&self, index: usize) -> Option<String> {
            self.0.borrow().choices.get(index).map(|s| s.to_string())
        }
    }

    //--- Harness ----------------------------------------------------------

    struct RecordingBackend {
        spoken: Rc<RefCell<Vec<(String, bool)>>>,
    }

    impl SpeechBackend for RecordingBackend {
        fn speak(&mut self, text: &str, interrupt: bool) -> Result<(), Box<dyn Error>> {
            self.spoken.borrow_mut().push((text.to_string(), interrupt));
            Ok(())
        }

        fn stop(&mut self) -> Result<(), Box<dyn Error>> {
            Ok(())
        }
    }

    struct Harness {
        handler: DialogueHandler<SharedBox>,
        dialogue: Rc<RefCell<FakeBox>>,
        spoken: Rc<RefCell<Vec<(String, bool)>>>,
        input: InputSystem<TestAction>,
        speech: AnnouncementSink,
        game: GameStateQuery,
        flags: SharedFlags,
        settings: Settings,
        was_open: bool,
        tick: u64,
    }

    impl Harness {
        fn new() -> Self {
            let dialogue = Rc::new(RefCell::new(FakeBox::default()));
            let spoken = Rc::new(RefCell::new(Vec::new()));
            Self {
                handler: DialogueHandler::new(SharedBox(Rc::clone(&dialogue))),
                dialogue,
                spoken: Rc::clone(&spoken),
                input: InputSystem::new(),
                speech: AnnouncementSink::with_backend(Box::new(RecordingBackend {
                    spoken,
                })),
                game: GameStateQuery::disconnected(),
                flags: SharedFlags::new(),
                settings: Settings::default(),
                was_open: false,
                tick: 0,
            }
        }

        fn tick(&mut self) {
            self.input.digest(&InputFrame::new());
            let open = MenuHandler::<TestAction>::is_open(&self.handler);
            let mut ctx = TickContext {
                input: &mut self.input,
                speech: &mut self.speech,
                game: &self.game,
                flags: &mut self.flags,
                settings: &self.settings,
                tick: self.tick,
            };
            if open {
                let just_opened = !self.was_open;
                self.handler.update(&mut ctx, just_opened).unwrap();
            } else if self.was_open {
                self.handler.on_close(&mut ctx);
            }
            self.was_open = open;
            self.tick += 1;
        }

        fn lines(&self) -> Vec<String> {
            self.spoken.borrow().iter().map(|(text, _)| text.clone()).collect()
        }
    }

    //=====================================================================
    // Caption Tests
    //=====================================================================

    /// Tests the opening caption waits out the localization delay.
    #[test]
    fn opening_caption_waits_for_localization() {
        let mut harness = Harness::new();
        {
            let mut dialogue = harness.dialogue.borrow_mut();
            dialogue.open = true;
            dialogue.speaker = Some("Mira".to_string());
            dialogue.caption = "Loading...".to_string();
        }

        harness.tick();
        assert!(harness.lines().is_empty());

        // Localized text lands during the wait.
        harness.dialogue.borrow_mut().caption = "Welcome home.".to_string();
        harness.tick();
        harness.tick();

        assert_eq!(harness.lines(), vec!["Mira: Welcome home."]);
    }

    /// Tests caption changes announce once, with markup stripped.
    #[test]
    fn caption_change_announces_once() {
        let mut harness = Harness::new();
        {
            let mut dialogue = harness.dialogue.borrow_mut();
            dialogue.open = true;
            dialogue.caption = "First line.".to_string();
        }
        for _ in 0..3 {
            harness.tick();
        }

        harness.dialogue.borrow_mut().caption =
            "<color=#fff>Second</color> line.".to_string();
        harness.tick();
        harness.tick();

        assert_eq!(harness.lines(), vec!["First line.", "Second line."]);
    }

    /// Tests dialogue lines are queued, not interrupting.
    #[test]
    fn dialogue_lines_are_queued() {
        let mut harness = Harness::new();
        {
            let mut dialogue = harness.dialogue.borrow_mut();
            dialogue.open = true;
            dialogue.caption = "A line.".to_string();
        }
        for _ in 0..3 {
            harness.tick();
        }

        assert_eq!(*harness.spoken.borrow(), vec![("A line.".to_string(), false)]);
    }

    //=====================================================================
    // Intercept Tests
    //=====================================================================

    /// Tests an intercepted line narrates ahead of the caption poll and
    /// the caption poll then deduplicates against it.
    #[test]
    fn intercept_narrates_and_dedupes_against_caption() {
        let mut harness = Harness::new();
        harness.dialogue.borrow_mut().open = true;
        harness.tick();

        // The hook fires the moment the host finalizes the text; the
        // caption field catches up on a later tick.
        harness.flags.intercepts.push(Some("Mira"), "You made it.");
        {
            let mut dialogue = harness.dialogue.borrow_mut();
            dialogue.speaker = Some("Mira".to_string());
            dialogue.caption = "You made it.".to_string();
        }
        for _ in 0..4 {
            harness.tick();
        }

        assert_eq!(harness.lines(), vec!["Mira: You made it."]);
    }

    /// Tests voiced lines are skipped when the setting says so.
    #[test]
    fn voiced_lines_skip_when_configured() {
        let mut harness = Harness::new();
        harness.settings.skip_voiced_lines = true;
        {
            let mut dialogue = harness.dialogue.borrow_mut();
            dialogue.open = true;
            dialogue.voiced = true;
        }
        harness.tick();

        harness.flags.intercepts.push(Some("Mira"), "Voiced line.");
        harness.tick();

        assert!(harness.lines().is_empty());

        // The shared flag reflects the probe for sibling handlers.
        assert!(harness.flags.dialogue_voiced);
    }

    //=====================================================================
    // Choice Tests
    //=====================================================================

    /// Tests a choice opening announces the selected option and raises
    /// the shared confirm flag.
    #[test]
    fn choice_opening_announces_and_flags() {
        let mut harness = Harness::new();
        harness.dialogue.borrow_mut().open = true;
        for _ in 0..3 {
            harness.tick();
        }

        harness.dialogue.borrow_mut().choices = vec!["Yes", "No"];
        harness.tick();

        assert_eq!(harness.lines().last().unwrap(), "Yes, 1 of 2");
        assert!(harness.flags.confirm_dialog_open);
    }

    /// Tests choice cursor movement announces each option once.
    #[test]
    fn choice_cursor_announces_movement() {
        let mut harness = Harness::new();
        {
            let mut dialogue = harness.dialogue.borrow_mut();
            dialogue.open = true;
            dialogue.choices = vec!["Yes", "No"];
        }
        for _ in 0..2 {
            harness.tick();
        }

        harness.dialogue.borrow_mut().choice_cursor = 1;
        harness.tick();
        harness.tick();

        let lines = harness.lines();
        assert_eq!(lines.last().unwrap(), "No, 2 of 2");
        assert_eq!(lines.iter().filter(|l| l.as_str() == "No, 2 of 2").count(), 1);
    }

    /// Tests resolving the choice clears the shared confirm flag.
    #[test]
    fn choice_resolution_clears_flag() {
        let mut harness = Harness::new();
        {
            let mut dialogue = harness.dialogue.borrow_mut();
            dialogue.open = true;
            dialogue.choices = vec!["Yes", "No"];
        }
        for _ in 0..2 {
            harness.tick();
        }
        assert!(harness.flags.confirm_dialog_open);

        harness.dialogue.borrow_mut().choices = Vec::new();
        harness.tick();

        assert!(!harness.flags.confirm_dialog_open);
    }

    /// Tests closing mid-choice releases the flag.
    #[test]
    fn close_mid_choice_releases_flag() {
        let mut harness = Harness::new();
        {
            let mut dialogue = harness.dialogue.borrow_mut();
            dialogue.open = true;
            dialogue.choices = vec!["Yes", "No"];
        }
        for _ in 0..2 {
            harness.tick();
        }
        assert!(harness.flags.confirm_dialog_open);

        harness.dialogue.borrow_mut().open = false;
        harness.tick();

        assert!(!harness.flags.confirm_dialog_open);
    }
}
