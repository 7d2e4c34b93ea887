//=========================================================================
// Host Interface
//=========================================================================
//
// Contracts for the engine subsystems the multiplayer layer consumes.
//
// The multiplayer core never owns sprites, controllers, score keeping
// or the render loop. It reaches them only through these traits, so
// any engine (or the in-process `LocalHost`) can be plugged in.
//
// All methods take `&self`: the host is shared behind `Rc` by every
// scene state and every subscription closure, and is expected to use
// interior mutability. Everything runs on the single logic thread.
//
//=========================================================================

//=== Internal Dependencies ===============================================

use super::sprite::{Camera, SpriteId, SpriteSnapshot};
use crate::core::indicator::DrawTarget;
use crate::core::input::{ButtonEvent, ControllerEvent, MultiplayerButton};
use crate::core::state::LifecycleNotifier;

//=== Callback Types ======================================================

/// Callback installed into an engine event subscription.
///
/// Subscriptions are permanent: the engine keeps the callback for the
/// rest of the process and never hands it back.
pub type EngineCallback = Box<dyn FnMut()>;

/// Per-frame draw callback registered with the render system.
pub type RenderCallback = Box<dyn FnMut(&mut dyn DrawTarget, &Camera)>;

//=== RenderableId ========================================================

/// Handle returned when a draw callback is registered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RenderableId(pub u32);

//=== ControllerSystem ====================================================

/// Per-player controller subsystem.
///
/// `player` is always a 0-based player index in `0..4`.
pub trait ControllerSystem {
    /// Subscribes to an edge event of one of the player's buttons.
    fn on_button_event(
        &self,
        player: usize,
        button: MultiplayerButton,
        event: ButtonEvent,
        callback: EngineCallback,
    );

    /// Subscribes to a controller-level event of the player.
    fn on_controller_event(&self, player: usize, event: ControllerEvent, callback: EngineCallback);

    /// Returns `true` while the player's button is held.
    fn is_pressed(&self, player: usize, button: MultiplayerButton) -> bool;

    /// Drives `sprite` with the player's directional buttons.
    ///
    /// `None` speeds fall back to the host's defaults.
    fn move_sprite(&self, player: usize, sprite: SpriteId, vx: Option<i32>, vy: Option<i32>);
}

//=== InfoSystem ==========================================================

/// Per-player score and life bookkeeping.
pub trait InfoSystem {
    fn score(&self, player: usize) -> i32;

    fn set_score(&self, player: usize, value: i32);

    fn life(&self, player: usize) -> i32;

    fn set_life(&self, player: usize, value: i32);

    /// Subscribes to the player's score reaching `target`.
    fn on_score(&self, player: usize, target: i32, callback: EngineCallback);

    /// Subscribes to the player's life reaching zero.
    fn on_life_zero(&self, player: usize, callback: EngineCallback);
}

//=== RenderSystem ========================================================

/// Scene rendering pipeline.
pub trait RenderSystem {
    /// Registers a draw callback at `layer`. Higher layers draw later
    /// (on top).
    fn create_renderable(&self, layer: i32, callback: RenderCallback) -> RenderableId;
}

//=== SpriteSystem ========================================================

/// Sprite lookup.
pub trait SpriteSystem {
    /// Returns the sprite's current state, or `None` if the engine no
    /// longer knows it.
    fn sprite(&self, id: SpriteId) -> Option<SpriteSnapshot>;
}

//=== SceneLifecycle ======================================================

/// Scene push/pop notifications.
pub trait SceneLifecycle {
    /// Hands the host a notifier to call on every scene push and pop.
    fn subscribe(&self, notifier: LifecycleNotifier);
}
