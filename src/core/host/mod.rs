//=========================================================================
// Host Bridge
//=========================================================================
//
// Bridges the multiplayer core with the engine that hosts it.
//
// Components:
// - `interface`: collaborator traits (the contract)
// - `sprite`: sprite, hitbox and camera value types
// - `HostSystems`: the bundle of collaborators handed to every state
//
//=========================================================================

//=== External Dependencies ===============================================

use std::rc::Rc;

//=== Module Declarations =================================================

pub mod interface;
pub mod sprite;

//=== Public API ==========================================================

pub use interface::{
    ControllerSystem, EngineCallback, InfoSystem, RenderCallback, RenderSystem, RenderableId,
    SceneLifecycle, SpriteSystem,
};
pub use sprite::{Camera, Hitbox, SpriteFlags, SpriteId, SpriteSnapshot};

//=== HostSystems =========================================================

/// Shared handles to every engine subsystem the multiplayer layer uses.
///
/// Cloning is cheap (reference counts only). Each `MultiplayerState`
/// and each `Player` keeps a clone.
#[derive(Clone)]
pub struct HostSystems {
    pub controllers: Rc<dyn ControllerSystem>,
    pub info: Rc<dyn InfoSystem>,
    pub renderer: Rc<dyn RenderSystem>,
    pub sprites: Rc<dyn SpriteSystem>,
    pub lifecycle: Rc<dyn SceneLifecycle>,
}

impl HostSystems {
    pub fn new(
        controllers: Rc<dyn ControllerSystem>,
        info: Rc<dyn InfoSystem>,
        renderer: Rc<dyn RenderSystem>,
        sprites: Rc<dyn SpriteSystem>,
        lifecycle: Rc<dyn SceneLifecycle>,
    ) -> Self {
        Self {
            controllers,
            info,
            renderer,
            sprites,
            lifecycle,
        }
    }

    /// Builds the bundle from a single object implementing every
    /// collaborator trait.
    pub fn from_host<H>(host: Rc<H>) -> Self
    where
        H: ControllerSystem + InfoSystem + RenderSystem + SpriteSystem + SceneLifecycle + 'static,
    {
        Self {
            controllers: host.clone(),
            info: host.clone(),
            renderer: host.clone(),
            sprites: host.clone(),
            lifecycle: host,
        }
    }
}

impl std::fmt::Debug for HostSystems {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HostSystems").finish_non_exhaustive()
    }
}
