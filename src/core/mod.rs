//=========================================================================
// Core Multiplayer Systems
//
// Engine-independent multiplayer logic for up to four local players.
//
// Architecture:
// ```text
//  SceneStateStack ──(top)──→ MultiplayerState
//                               ├─ Player x4 ──→ InfoSystem / ControllerSystem
//                               ├─ HandlerRegistry
//                               └─ IndicatorRenderer (via RenderSystem)
// ```
//
// Notes:
// Everything here runs on the single logic thread and talks to the
// engine only through the traits in `host`. The one cross-thread path
// is the scene lifecycle notifier in `state::lifecycle`.
//
//=========================================================================

//=== Module Declarations =================================================

pub mod config;
pub mod handlers;
pub mod host;
pub mod indicator;
pub mod input;
pub mod player;
pub mod state;

//=== Public API ==========================================================

pub use config::MultiplayerConfig;
pub use state::{MultiplayerState, SceneStateStack};
