//=========================================================================
// Aria Engine - Library Root
//
// This crate defines the public API surface of the Aria Engine: a
// frame-polled accessibility narration engine for bolting spoken UI
// onto a closed host game.
//
// Responsibilities:
// - Expose the engine facade (`NarrationEngine`, `EngineBuilder`)
// - Expose the core subsystems (input, speech, handlers, host boundary)
// - Ship reference handlers embedders can study or reuse directly
//
// Typical usage:
// ```no_run
// use aria_engine::prelude::*;
//
// #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
// enum NavAction { Confirm, Cancel, ReadStatus }
// impl Action for NavAction {}
//
// let mut engine = EngineBuilder::<NavAction>::new().build();
// // inside the host's frame callback:
// engine.tick(&InputFrame::new());
// ```
//
//=========================================================================

//--- Public Modules ------------------------------------------------------
//
// `core` contains all engine subsystems (input, speech, handler
// dispatch, host boundary, settings). It is exposed publicly for
// embedder-level extensibility; most application code will use the
// top-level facade plus the prelude.
//
// `handlers` contains the worked-example per-menu handlers.
//
pub mod core;
pub mod handlers;
pub mod prelude;

//--- Internal Modules ----------------------------------------------------
//
// `engine` defines the builder and the per-tick facade.
//
mod engine;

//--- Public Exports ------------------------------------------------------
//
// Re-exports the facade as the main entry point so embedders can simply
// `use aria_engine::{EngineBuilder, NarrationEngine};`.
//
pub use engine::{EngineBuilder, NarrationEngine};
