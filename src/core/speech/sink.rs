//=========================================================================
// Announcement Sink
//=========================================================================
//
// The single outlet every handler speaks through.
//
// Architecture:
//   handler → AnnouncementSink → Box<dyn SpeechBackend> (best-effort)
//                    │
//                    └─ last-message cache (repeat-last)
//
// Speech is a side channel: a dead or missing backend must never take
// the tick loop down with it. Every backend failure is logged and
// swallowed, and the last-message cache is written before delegation so
// repeat-last works even when speech never initialized.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::error::Error;

use log::{debug, warn};

//=== SpeechBackend =======================================================

/// The opaque text-to-speech boundary.
///
/// Two operations: speak (interrupting or queued after the current
/// utterance) and stop. Implementations wrap whatever synthesizer the
/// embedder has; the engine never interprets failures beyond logging.
pub trait SpeechBackend {
    /// Speaks `text`. With `interrupt`, cuts off any in-flight utterance;
    /// otherwise queues after it.
    fn speak(&mut self, text: &str, interrupt: bool) -> Result<(), Box<dyn Error>>;

    /// Stops any in-flight utterance.
    fn stop(&mut self) -> Result<(), Box<dyn Error>>;
}

//=== NullBackend =========================================================

/// Backend that discards everything. Useful headless and as the default
/// when the embedder installs nothing.
pub struct NullBackend;

impl SpeechBackend for NullBackend {
    fn speak(&mut self, _text: &str, _interrupt: bool) -> Result<(), Box<dyn Error>> {
        Ok(())
    }

    fn stop(&mut self) -> Result<(), Box<dyn Error>> {
        Ok(())
    }
}

//=== AnnouncementSink ====================================================

/// Wraps the speech backend with the engine's announcement semantics:
/// interrupt vs queued delivery, silence, repeat-last, and a master
/// enable toggle.
///
/// No call here returns an error; all backend failures are caught and
/// logged; speech must never crash the host.
pub struct AnnouncementSink {
    backend: Option<Box<dyn SpeechBackend>>,
    last_message: String,
    enabled: bool,
}

impl AnnouncementSink {
    /// Creates a sink over a backend.
    pub fn with_backend(backend: Box<dyn SpeechBackend>) -> Self {
        Self {
            backend: Some(backend),
            last_message: String::new(),
            enabled: true,
        }
    }

    /// Creates a sink with no backend. Announcements are still recorded
    /// for repeat-last; nothing is spoken.
    pub fn disconnected() -> Self {
        Self {
            backend: None,
            last_message: String::new(),
            enabled: true,
        }
    }

    /// Master toggle. While disabled, announcements are recorded but not
    /// delivered.
    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    //--- Announcement API -------------------------------------------------

    /// Speaks `text`. Empty text is a complete no-op. The text is
    /// recorded as the last message even when the backend is missing,
    /// disabled, or failing.
    pub fn speak(&mut self, text: &str, interrupt: bool) {
        if text.is_empty() {
            return;
        }

        self.last_message.clear();
        self.last_message.push_str(text);
        self.deliver(text, interrupt);
    }

    /// Speaks `text` queued after the current utterance.
    pub fn speak_queued(&mut self, text: &str) {
        self.speak(text, false);
    }

    /// Stops any in-flight utterance. Best-effort; errors are swallowed.
    pub fn silence(&mut self) {
        if let Some(backend) = &mut self.backend {
            if let Err(err) = backend.stop() {
                warn!("speech backend failed to stop: {}", err);
            }
        }
    }

    /// Re-issues the last non-empty message, interrupting. No-op when
    /// nothing was ever spoken.
    pub fn repeat_last(&mut self) {
        if self.last_message.is_empty() {
            return;
        }
        let text = self.last_message.clone();
        self.deliver(&text, true);
    }

    /// The last non-empty message sent through the sink, if any.
    pub fn last_message(&self) -> Option<&str> {
        if self.last_message.is_empty() {
            None
        } else {
            Some(&self.last_message)
        }
    }

    //--- Internal Helpers -------------------------------------------------

    fn deliver(&mut self, text: &str, interrupt: bool) {
        if !self.enabled {
            return;
        }
        match &mut self.backend {
            Some(backend) => {
                if let Err(err) = backend.speak(text, interrupt) {
                    warn!("speech backend failed to speak: {}", err);
                }
            }
            None => debug!("no speech backend; dropped: {:?}", text),
        }
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    //--- Test Backends ----------------------------------------------------

    /// Records every (text, interrupt) pair it receives.
    struct RecordingBackend {
        spoken: Rc<RefCell<Vec<(String, bool)>>>,
    }

    fn recording_sink() -> (AnnouncementSink, Rc<RefCell<Vec<(String, bool)>>>) {
        let spoken = Rc::new(RefCell::new(Vec::new()));
        let sink = AnnouncementSink::with_backend(Box::new(RecordingBackend {
            spoken: Rc::clone(&spoken),
        }));
        (sink, spoken)
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

    /// Fails every call.
    struct BrokenBackend;

    impl SpeechBackend for BrokenBackend {
        fn speak(&mut self, _: &str, _: bool) -> Result<(), Box<dyn Error>> {
            Err("synthesizer lost".into())
        }

        fn stop(&mut self) -> Result<(), Box<dyn Error>> {
            Err("synthesizer lost".into())
        }
    }

    //=====================================================================
    // Delivery Tests
    //=====================================================================

    /// Tests speak delivers with the interrupt flag intact.
    #[test]
    fn speak_delivers_with_flag() {
        let (mut sink, spoken) = recording_sink();

        sink.speak("Inventory", true);
        sink.speak_queued("Potion, 1 of 8");

        assert_eq!(
            *spoken.borrow(),
            vec![
                ("Inventory".to_string(), true),
                ("Potion, 1 of 8".to_string(), false),
            ]
        );
    }

    /// Tests empty text is a complete no-op.
    #[test]
    fn empty_text_is_noop() {
        let (mut sink, spoken) = recording_sink();

        sink.speak("", true);

        assert!(spoken.borrow().is_empty());
        assert_eq!(sink.last_message(), None);
    }

    //=====================================================================
    // Repeat-Last Tests
    //=====================================================================

    /// Tests repeat round-trip: A then repeat speaks A twice.
    #[test]
    fn repeat_round_trip() {
        let (mut sink, spoken) = recording_sink();

        sink.speak("A", true);
        sink.repeat_last();

        assert_eq!(
            *spoken.borrow(),
            vec![("A".to_string(), true), ("A".to_string(), true)]
        );
    }

    /// Tests repeat-last replays the most recent message, not the first.
    #[test]
    fn repeat_last_replays_most_recent() {
        let (mut sink, spoken) = recording_sink();

        sink.speak("A", true);
        sink.speak("B", true);
        sink.repeat_last();

        assert_eq!(spoken.borrow().last().unwrap().0, "B");
    }

    /// Tests repeat-last always interrupts, even after queued speech.
    #[test]
    fn repeat_last_interrupts() {
        let (mut sink, spoken) = recording_sink();

        sink.speak_queued("quiet line");
        sink.repeat_last();

        assert_eq!(spoken.borrow().last().unwrap(), &("quiet line".to_string(), true));
    }

    /// Tests repeat-last with no history is a no-op.
    #[test]
    fn repeat_with_no_history_is_noop() {
        let (mut sink, spoken) = recording_sink();

        sink.repeat_last();
        assert!(spoken.borrow().is_empty());
    }

    //=====================================================================
    // Failure Tests
    //=====================================================================

    /// Tests a failing backend never propagates and still records.
    #[test]
    fn broken_backend_is_swallowed_but_recorded() {
        let mut sink = AnnouncementSink::with_backend(Box::new(BrokenBackend));

        sink.speak("lost words", true);
        sink.silence();

        assert_eq!(sink.last_message(), Some("lost words"));
    }

    /// Tests a disconnected sink records for repeat-last.
    #[test]
    fn disconnected_sink_records_last_message() {
        let mut sink = AnnouncementSink::disconnected();

        sink.speak("unheard", true);

        assert_eq!(sink.last_message(), Some("unheard"));
    }

    /// Tests the null backend accepts everything quietly.
    #[test]
    fn null_backend_accepts_everything() {
        let mut sink = AnnouncementSink::with_backend(Box::new(NullBackend));

        sink.speak("into the void", true);
        sink.silence();
        sink.repeat_last();

        assert_eq!(sink.last_message(), Some("into the void"));
    }

    //=====================================================================
    // Enable Toggle Tests
    //=====================================================================

    /// Tests disabling suppresses delivery but keeps recording.
    #[test]
    fn disabled_sink_records_without_delivering() {
        let (mut sink, spoken) = recording_sink();
        sink.set_enabled(false);

        sink.speak("muted", true);

        assert!(spoken.borrow().is_empty());
        assert_eq!(sink.last_message(), Some("muted"));

        // Re-enabled: repeat-last delivers the recorded message.
        sink.set_enabled(true);
        sink.repeat_last();
        assert_eq!(spoken.borrow().last().unwrap().0, "muted");
    }
}
