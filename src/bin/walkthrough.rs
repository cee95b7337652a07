//=========================================================================
// Walkthrough
//=========================================================================
//
// Scripted demonstration session: drives the narration engine against
// in-memory fake panels the way a host game's frame callback would.
// Spoken output goes to stdout; set RUST_LOG=debug for engine logs.
//
//   cargo run --bin walkthrough
//
//=========================================================================

//=== External Dependencies ===============================================

use std::cell::RefCell;
use std::error::Error;
use std::rc::Rc;

//=== Internal Dependencies ===============================================

use aria_engine::handlers::{
    DialogueHandler, DialogueProbe, InventoryHandler, InventoryProbe, InventoryView,
    RemapControls, RemapMenuHandler, RemapProbe,
};
use aria_engine::prelude::*;

//=== Actions =============================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
enum NavAction {
    Confirm,
    Cancel,
    Clear,
    ReadStatus,
    ToggleSpeech,
}

impl Action for NavAction {}

//=== Console Speech ======================================================

struct ConsoleBackend;

impl SpeechBackend for ConsoleBackend {
    fn speak(&mut self, text: &str, interrupt: bool) -> Result<(), Box<dyn Error>> {
        let mode = if interrupt { "!" } else { "+" };
        println!("  [speech {}] {}", mode, text);
        Ok(())
    }

    fn stop(&mut self) -> Result<(), Box<dyn Error>> {
        println!("  [speech -] (silenced)");
        Ok(())
    }
}

//=== Fake Host Panels ====================================================

#[derive(Default)]
struct FakeInventory {
    open: bool,
    view_detail: bool,
    tab: usize,
    cursor: usize,
    items: Vec<(&'static str, u32)>,
}

#[derive(Clone)]
struct SharedInventory(Rc<RefCell<FakeInventory>>);

impl InventoryProbe for SharedInventory {
    fn is_open(&self) -> Option<bool> {
        Some(self.0.borrow().open)
    }

    fn view(&self) -> Option<InventoryView> {
        Some(if self.0.borrow().view_detail {
            InventoryView::Detail
        } else {
            InventoryView::Browsing
        })
    }

    fn tab_index(&self) -> Option<usize> {
        Some(self.0.borrow().tab)
    }

    fn tab_label(&self, index: usize) -> Option<String> {
        ["Items", "Equipment"].get(index).map(|s| s.to_string())
    }

    fn cursor_index(&self) -> Option<usize> {
        Some(self.0.borrow().cursor)
    }

    fn item_count(&self) -> Option<usize> {
        Some(self.0.borrow().items.len())
    }

    fn item_label(&self, index: usize) -> Option<String> {
        self.0.borrow().items.get(index).map(|(label, _)| label.to_string())
    }

    fn item_quantity(&self, index: usize) -> Option<u32> {
        self.0.borrow().items.get(index).map(|(_, qty)| *qty)
    }
}

#[derive(Default)]
struct FakeDialogue {
    open: bool,
    speaker: Option<String>,
    caption: String,
}

#[derive(Clone)]
struct SharedDialogue(Rc<RefCell<FakeDialogue>>);

impl DialogueProbe for SharedDialogue {
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
        Some(false)
    }

    fn choice_count(&self) -> Option<usize> {
        Some(0)
    }

    fn choice_cursor(&self) -> Option<usize> {
        Some(0)
    }

    fn choice_label(&self, _index: usize) -> Option<String> {
        None
    }
}

#[derive(Default)]
struct FakeRemapMenu {
    open: bool,
    cursor: usize,
}

#[derive(Clone)]
struct SharedRemap(Rc<RefCell<FakeRemapMenu>>);

impl RemapProbe for SharedRemap {
    fn is_open(&self) -> Option<bool> {
        Some(self.0.borrow().open)
    }

    fn cursor_index(&self) -> Option<usize> {
        Some(self.0.borrow().cursor)
    }
}

//=== Scripted Session ====================================================

fn main() {
    env_logger::init();

    let inventory = Rc::new(RefCell::new(FakeInventory {
        items: vec![("Potion", 3), ("Ether", 1), ("Phoenix Down", 2)],
        ..FakeInventory::default()
    }));
    let dialogue = Rc::new(RefCell::new(FakeDialogue::default()));
    let remap_menu = Rc::new(RefCell::new(FakeRemapMenu::default()));

    let mut engine = EngineBuilder::<NavAction>::new()
        .with_speech_backend(Box::new(ConsoleBackend))
        .build();

    // Startup bindings, as loaded from a binding file in a real embed.
    let input = engine.input_mut();
    input.bind(
        NavAction::Confirm,
        InputBinding::new(Control::Key(KeyCode::Enter)),
        BindSlot::Field,
    );
    input.bind(
        NavAction::Cancel,
        InputBinding::new(Control::Key(KeyCode::Backspace)),
        BindSlot::Field,
    );
    input.bind(
        NavAction::Clear,
        InputBinding::new(Control::Key(KeyCode::KeyX)),
        BindSlot::Field,
    );
    input.bind(
        NavAction::ReadStatus,
        InputBinding::new(Control::Key(KeyCode::KeyR)),
        BindSlot::Field,
    );
    input.bind(
        NavAction::ToggleSpeech,
        InputBinding::new(Control::Key(KeyCode::KeyT)),
        BindSlot::Field,
    );

    engine.register_handler(Box::new(InventoryHandler::new(SharedInventory(Rc::clone(
        &inventory,
    )))));
    engine.register_handler(Box::new(DialogueHandler::new(SharedDialogue(Rc::clone(
        &dialogue,
    )))));
    engine.register_handler(Box::new(
        RemapMenuHandler::new(
            SharedRemap(Rc::clone(&remap_menu)),
            vec![
                (NavAction::ReadStatus, "Read status"),
                (NavAction::ToggleSpeech, "Toggle speech"),
            ],
            BindSlot::Field,
            RemapControls {
                confirm: NavAction::Confirm,
                cancel: NavAction::Cancel,
                clear: NavAction::Clear,
            },
        ),
    ));

    // No game probe is wired up, so the facade answers conservatively.
    println!(
        "> player controllable? {} (no probe installed; unknown reads as blocked)",
        engine.game().is_player_controllable()
    );

    //--- Inventory browsing ----------------------------------------------

    println!("> inventory opens");
    inventory.borrow_mut().open = true;
    engine.tick(&InputFrame::new());

    println!("> cursor moves down");
    inventory.borrow_mut().cursor = 1;
    engine.tick(&InputFrame::new());
    engine.tick(&InputFrame::new()); // deferred label read lands here

    println!("> tab switches");
    inventory.borrow_mut().tab = 1;
    engine.tick(&InputFrame::new());

    println!("> player asks: what is selected?");
    engine.request_status();

    println!("> and again, repeated verbatim");
    engine.repeat_last();

    println!("> inventory closes");
    inventory.borrow_mut().open = false;
    engine.tick(&InputFrame::new());

    //--- Dialogue --------------------------------------------------------

    println!("> dialogue opens; the hook delivers the finalized line");
    dialogue.borrow_mut().open = true;
    engine.on_text_intercepted(Some("Mira"), "You found the workshop.");
    {
        let mut panel = dialogue.borrow_mut();
        panel.speaker = Some("Mira".to_string());
        panel.caption = "You found the workshop.".to_string();
    }
    for _ in 0..4 {
        engine.tick(&InputFrame::new());
    }

    println!("> dialogue closes");
    dialogue.borrow_mut().open = false;
    engine.tick(&InputFrame::new());

    //--- Rebinding -------------------------------------------------------

    println!("> controls menu opens");
    remap_menu.borrow_mut().open = true;
    engine.tick(&InputFrame::new());
    engine.tick(&InputFrame::new());

    println!("> confirm starts capture");
    engine.tick(&InputFrame::new().press_key(KeyCode::Enter));
    engine.tick(&InputFrame::new());

    println!("> player presses T, which Toggle speech already owns");
    engine.tick(&InputFrame::new().press_key(KeyCode::KeyT));
    engine.tick(&InputFrame::new());

    println!("> second try: confirm, then J");
    engine.tick(&InputFrame::new().press_key(KeyCode::Enter));
    engine.tick(&InputFrame::new());
    engine.tick(&InputFrame::new().press_key(KeyCode::KeyJ));

    println!("> done");
}
