//=========================================================================
// Remap Menu Handler
//=========================================================================
//
// Narration and interaction for the controls (rebinding) menu.
//
// Substates:
//   Navigating ──confirm──> Listening (binding capture)
//       │  ▲                    │ bound / rejected / cancelled
//       │  └────────────────────┘
//       └───clear──> Confirming (yes/no sub-dialog) ──resolve──> Navigating
//
// The host menu owns the visible cursor; this handler narrates it, runs
// the capture session, applies successful bindings through the input
// system, and persists the whole table wholesale after every change.
//
//=========================================================================

//=== External Dependencies ===============================================

use log::warn;

//=== Internal Dependencies ===============================================

use crate::core::handler::{HandlerError, MenuHandler, TickContext, Watched};
use crate::core::input::{
    Action, BindSlot, CaptureOutcome, CaptureSession, Control, KeyCode, PadButton,
    StickDirection,
};
use crate::core::settings::{BindingEntry, BindingFile, SettingsStore};
use crate::core::speech::phrase;

//=== RemapProbe ==========================================================

/// Polled reads against the host's controls menu.
pub trait RemapProbe {
    /// Menu exists and is showing.
    fn is_open(&self) -> Option<bool>;

    /// Host cursor over the rebindable action rows.
    fn cursor_index(&self) -> Option<usize>;
}

//=== RemapControls =======================================================

/// The named actions this handler listens for.
#[derive(Debug, Clone, Copy)]
pub struct RemapControls<A: Action> {
    /// Begin capture for the selected row.
    pub confirm: A,

    /// Leave capture / decline the confirmation.
    pub cancel: A,

    /// Ask to clear the selected row's binding.
    pub clear: A,
}

//=== ConfirmationRequest =================================================

/// Transient yes/no sub-dialog state, alive only while `Confirming`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfirmationRequest<A: Action> {
    /// The action the request is about.
    pub action: A,

    /// Spoken prompt.
    pub prompt: String,

    /// Cursor: 0 = Yes, 1 = No.
    pub cursor: usize,
}

impl<A: Action> ConfirmationRequest<A> {
    const OPTIONS: [&'static str; 2] = ["Yes", "No"];

    fn option_line(&self) -> String {
        phrase::position(Self::OPTIONS[self.cursor], self.cursor, Self::OPTIONS.len())
    }

    fn toggled(&self) -> usize {
        (self.cursor + 1) % Self::OPTIONS.len()
    }
}

//=== RemapState ==========================================================

enum RemapState<A: Action> {
    Navigating,
    Listening(CaptureSession<A>),
    Confirming(ConfirmationRequest<A>),
}

//=== RemapMenuHandler ====================================================

/// State machine for the controls menu: narrates rows, captures new
/// bindings, and confirms destructive clears.
pub struct RemapMenuHandler<A: Action, P: RemapProbe> {
    probe: P,
    priority: i32,

    /// Rebindable actions with their spoken labels, in row order.
    rows: Vec<(A, &'static str)>,

    /// Slot the rows bind into.
    slot: BindSlot,

    controls: RemapControls<A>,

    /// Wholesale persistence hook; absent in tests and headless use.
    store: Option<SettingsStore>,

    state: RemapState<A>,
    cursor: Watched<usize>,
}

/// Physical navigation pulses that toggle the yes/no cursor.
const TOGGLE_CONTROLS: [Control; 6] = [
    Control::Key(KeyCode::ArrowLeft),
    Control::Key(KeyCode::ArrowRight),
    Control::Pad(PadButton::DpadLeft),
    Control::Pad(PadButton::DpadRight),
    Control::Stick(StickDirection::Left),
    Control::Stick(StickDirection::Right),
];

impl<A: Action, P: RemapProbe> RemapMenuHandler<A, P> {
    pub const DEFAULT_PRIORITY: i32 = 3;

    /// Creates the handler over a host probe.
    pub fn new(
        probe: P,
        rows: Vec<(A, &'static str)>,
        slot: BindSlot,
        controls: RemapControls<A>,
    ) -> Self {
        Self {
            probe,
            priority: Self::DEFAULT_PRIORITY,
            rows,
            slot,
            controls,
            store: None,
            state: RemapState::Navigating,
            cursor: Watched::new(),
        }
    }

    /// Installs the persistence hook; the whole table is rewritten after
    /// every successful change.
    pub fn with_store(mut self, store: SettingsStore) -> Self {
        self.store = Some(store);
        self
    }

    /// Overrides the dispatch priority.
    pub fn with_priority(mut self, priority: i32) -> Self {
        self.priority = priority;
        self
    }

    //--- Row Helpers ------------------------------------------------------

    fn clamped_cursor(&self) -> usize {
        let cursor = self.probe.cursor_index().unwrap_or(0);
        cursor.min(self.rows.len().saturating_sub(1))
    }

    fn row_line(&self, ctx: &TickContext<'_, A>, index: usize) -> String {
        let Some(&(action, label)) = self.rows.get(index) else {
            return phrase::option_fallback(index);
        };
        let bound = match ctx.input.binding_for(action, self.slot) {
            Some(binding) => binding.to_string(),
            None => "unbound".to_string(),
        };
        format!("{}: {}, {} of {}", label, bound, index + 1, self.rows.len())
    }

    fn label_of(&self, action: A) -> &'static str {
        self.rows
            .iter()
            .find(|(row_action, _)| *row_action == action)
            .map(|(_, label)| *label)
            .unwrap_or("this action")
    }

    /// Rewrites the persisted binding table from the live input system.
    fn persist(&self, ctx: &TickContext<'_, A>) {
        let Some(store) = &self.store else {
            return;
        };

        let bindings = self
            .rows
            .iter()
            .filter_map(|&(action, label)| {
                ctx.input.binding_for(action, self.slot).map(|binding| BindingEntry {
                    action: label.to_string(),
                    slot: self.slot,
                    binding,
                })
            })
            .collect();

        if let Err(err) = store.save_bindings(&BindingFile { bindings }) {
            warn!("failed to persist bindings: {}", err);
        }
    }

    /// The cancel control for capture sessions: the cancel action's own
    /// primary, falling back to Escape.
    fn cancel_control(&self, ctx: &TickContext<'_, A>) -> Control {
        ctx.input
            .binding_for(self.controls.cancel, self.slot)
            .map(|binding| binding.primary)
            .unwrap_or(Control::Key(KeyCode::Escape))
    }

    //--- Substate Updates -------------------------------------------------

    fn update_navigating(&mut self, ctx: &mut TickContext<'_, A>) {
        let cursor = self.clamped_cursor();
        let cursor_changed = self.cursor.observe(cursor);

        if ctx.input.is_action_triggered(self.controls.confirm) {
            let Some(&(action, label)) = self.rows.get(cursor) else {
                return;
            };
            let session = CaptureSession::begin(action, self.slot, self.cancel_control(ctx));
            self.state = RemapState::Listening(session);
            // The confirm press must not be captured as the new binding.
            ctx.input.consume_edges();
            ctx.speech.speak(&format!("Press a new input for {}.", label), true);
            return;
        }

        if ctx.input.is_action_triggered(self.controls.clear) {
            let Some(&(action, label)) = self.rows.get(cursor) else {
                return;
            };
            if ctx.input.binding_for(action, self.slot).is_none() {
                ctx.speech.speak(&format!("{} is already unbound.", label), true);
                return;
            }
            let request = ConfirmationRequest {
                action,
                prompt: format!("Clear binding for {}?", label),
                cursor: 0,
            };
            ctx.flags.confirm_dialog_open = true;
            ctx.speech
                .speak(&format!("{} {}", request.prompt, request.option_line()), true);
            self.state = RemapState::Confirming(request);
            ctx.input.consume_edges();
            return;
        }

        if cursor_changed {
            let line = self.row_line(ctx, cursor);
            ctx.speech.speak(&line, true);
        }
    }

    fn update_listening(&mut self, ctx: &mut TickContext<'_, A>, session: CaptureSession<A>) {
        match ctx.input.poll_capture(&session) {
            CaptureOutcome::Pending => {
                self.state = RemapState::Listening(session);
            }
            CaptureOutcome::Bound(binding) => {
                let action = session.target();
                ctx.input.bind(action, binding, self.slot);
                self.persist(ctx);
                ctx.speech
                    .speak(&format!("{} is now {}.", self.label_of(action), binding), true);
                self.state = RemapState::Navigating;
                ctx.input.consume_edges();
            }
            CaptureOutcome::Rejected(rejection) => {
                ctx.speech.speak(&format!("{}.", rejection), true);
                self.state = RemapState::Navigating;
                ctx.input.consume_edges();
            }
            CaptureOutcome::Cancelled => {
                ctx.speech.speak("Cancelled.", true);
                self.state = RemapState::Navigating;
                ctx.input.consume_edges();
            }
        }
    }

    fn update_confirming(
        &mut self,
        ctx: &mut TickContext<'_, A>,
        mut request: ConfirmationRequest<A>,
    ) {
        if ctx.input.is_action_triggered(self.controls.confirm) {
            if request.cursor == 0 {
                ctx.input.clear_binding(request.action, self.slot);
                self.persist(ctx);
                ctx.speech
                    .speak(&format!("{} unbound.", self.label_of(request.action)), true);
            } else {
                ctx.speech.speak("Kept.", true);
            }
            ctx.flags.confirm_dialog_open = false;
            self.state = RemapState::Navigating;
            ctx.input.consume_edges();
            return;
        }

        if ctx.input.is_action_triggered(self.controls.cancel) {
            ctx.speech.speak("Kept.", true);
            ctx.flags.confirm_dialog_open = false;
            self.state = RemapState::Navigating;
            ctx.input.consume_edges();
            return;
        }

        let toggled = TOGGLE_CONTROLS
            .iter()
            .any(|&control| ctx.input.navigation_pulse(control));
        if toggled {
            request.cursor = request.toggled();
            ctx.speech.speak(&request.option_line(), true);
        }

        self.state = RemapState::Confirming(request);
    }
}

impl<A: Action, P: RemapProbe> MenuHandler<A> for RemapMenuHandler<A, P> {
    fn name(&self) -> &'static str {
        "remap-menu"
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
            self.cursor.reset();
            self.state = RemapState::Navigating;

            let cursor = self.clamped_cursor();
            self.cursor.observe(cursor);
            // The press that opened the menu must not double as its
            // first confirm or navigation input.
            ctx.input.consume_edges();
            let line = format!("Controls. {}", self.row_line(ctx, cursor));
            ctx.speech.speak(&line, true);
            return Ok(());
        }

        match std::mem::replace(&mut self.state, RemapState::Navigating) {
            RemapState::Navigating => self.update_navigating(ctx),
            RemapState::Listening(session) => self.update_listening(ctx, session),
            RemapState::Confirming(request) => self.update_confirming(ctx, request),
        }

        Ok(())
    }

    fn on_close(&mut self, ctx: &mut TickContext<'_, A>) {
        if matches!(self.state, RemapState::Confirming(_)) {
            ctx.flags.confirm_dialog_open = false;
        }
        // Dropping a live capture session needs no further cleanup.
        self.state = RemapState::Navigating;
        self.cursor.reset();
    }

    fn announce_status(&self, ctx: &mut TickContext<'_, A>) {
        match &self.state {
            RemapState::Navigating => {
                let line = self.row_line(ctx, self.clamped_cursor());
                ctx.speech.speak(&line, true);
            }
            RemapState::Listening(session) => {
                let line = format!(
                    "Listening. Press a new input for {}.",
                    self.label_of(session.target())
                );
                ctx.speech.speak(&line, true);
            }
            RemapState::Confirming(request) => {
                let line = format!("{} {}", request.prompt, request.option_line());
                ctx.speech.speak(&line, true);
            }
        }
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
