//=========================================================================
// Platform Subsystem
//
// Concrete, in-process engine for the multiplayer core.
//
// Architecture:
// ```text
//  winit KeyboardInput
//   ↓
//  KeyboardMap          (physical key → player, button)
//   ↓ press / release
//  LocalHost            (controllers, score/life, sprites, renderables,
//   ↓                    scene frames)
//  engine callbacks ──→ MultiplayerState dispatch → game handlers
//
//  LocalHost::push_scene / pop_scene
//   ↓ LifecycleNotifier
//  SceneStateStack      (drained on next access)
// ```
//
// Responsibilities:
// - Implement every host collaborator trait
// - Scope subscriptions and renderables to the scene that created them
// - Translate keyboard input into per-player button edges
//
//=========================================================================

//=== Submodules ==========================================================

mod keymap;
mod local_host;

//=== Public API ==========================================================

pub use keymap::KeyboardMap;
pub use local_host::{LocalHost, SpriteMovement, DEFAULT_LIFE, DEFAULT_MOVE_SPEED};
