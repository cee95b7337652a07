//=========================================================================
// Host Boundary
//=========================================================================
//
// Everything that crosses between the engine and the host game lives
// behind this module's traits:
//
// - `query`:  inbound polled reads (composite game-state predicates)
// - `inject`: outbound synthetic input (the one mutation path)
//
// The contract is deliberately thin: the engine polls `Option`-returning
// probes and never calls host logic directly, so a missing or destroyed
// host object degrades at this layer instead of leaking nulls inward.
//
//=========================================================================

//=== Submodules ==========================================================

pub mod inject;
pub mod query;

//=== Public API ==========================================================

pub use inject::{InputInjector, SyntheticInput};
pub use query::{DisconnectedProbe, GameStateProbe, GameStateQuery};
