//=========================================================================
// Shared Flags & Dialogue Intercept Queue
//=========================================================================
//
// Process-wide state shared across otherwise-independent handlers.
//
// Contains:
// - flags handlers read to coordinate ("is a yes/no dialog capturing
//   input", "is the current line voiced")
// - the intercept queue for the one push-style inbound hook: finalized
//   dialogue text arriving before any animated reveal
//
// Convention: every flag has exactly one writing handler; everyone else
// only reads. The engine owns this struct and hands `&mut` into the tick
// context; encapsulation is by convention, matching the single-threaded
// one-mutation-point-per-tick model.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::collections::VecDeque;

use log::debug;

//=== InterceptedLine =====================================================

/// One finalized dialogue line pushed by the host-side text hook.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InterceptedLine {
    /// Speaker name, when the host attributes the line.
    pub speaker: Option<String>,

    /// The finalized text, before any animated reveal.
    pub text: String,
}

impl InterceptedLine {
    /// The spoken form: `"Speaker: text"`, or the bare text when the
    /// line is unattributed.
    pub fn spoken(&self) -> String {
        match &self.speaker {
            Some(speaker) => format!("{}: {}", speaker, self.text),
            None => self.text.clone(),
        }
    }
}

//=== InterceptQueue ======================================================

/// Bounded queue between the push hook and the dialogue handler.
///
/// Lines land here whenever the host finalizes dialogue text; the
/// dialogue handler drains during its own update. Overflow drops the
/// oldest line so a closed dialogue panel can never grow the queue
/// without bound.
#[derive(Debug)]
pub struct InterceptQueue {
    lines: VecDeque<InterceptedLine>,
    capacity: usize,
}

impl InterceptQueue {
    const DEFAULT_CAPACITY: usize = 8;

    /// Creates an empty queue with the default capacity.
    pub fn new() -> Self {
        Self {
            lines: VecDeque::new(),
            capacity: Self::DEFAULT_CAPACITY,
        }
    }

    /// Pushes a finalized line, dropping the oldest on overflow.
    pub fn push(&mut self, speaker: Option<&str>, text: &str) {
        if self.lines.len() == self.capacity {
            let dropped = self.lines.pop_front();
            debug!("intercept queue full; dropped {:?}", dropped.map(|l| l.text));
        }
        self.lines.push_back(InterceptedLine {
            speaker: speaker.map(str::to_string),
            text: text.to_string(),
        });
    }

    /// Takes all queued lines, leaving the queue empty.
    pub fn take(&mut self) -> VecDeque<InterceptedLine> {
        std::mem::take(&mut self.lines)
    }

    /// Number of queued lines.
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Whether the queue is empty.
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

impl Default for InterceptQueue {
    fn default() -> Self {
        Self::new()
    }
}

//=== SharedFlags =========================================================

/// Read-mostly state injected into handlers that need it.
pub struct SharedFlags {
    /// A yes/no sub-dialog is capturing input somewhere.
    /// Writer: whichever handler opened the sub-dialog.
    pub confirm_dialog_open: bool,

    /// The current dialogue line has voice acting.
    /// Writer: the dialogue handler.
    pub dialogue_voiced: bool,

    /// Finalized dialogue lines awaiting narration.
    pub intercepts: InterceptQueue,
}

impl SharedFlags {
    /// Creates cleared flags and an empty intercept queue.
    pub fn new() -> Self {
        Self {
            confirm_dialog_open: false,
            dialogue_voiced: false,
            intercepts: InterceptQueue::new(),
        }
    }
}

impl Default for SharedFlags {
    fn default() -> Self {
        Self::new()
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
