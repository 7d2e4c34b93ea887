//=========================================================================
// Prelude
//=========================================================================
//
// Convenience module that re-exports commonly used types and traits.
//
// Usage:
//   use aetheric_multiplayer::prelude::*;
//
//=========================================================================

//=== Public API ==========================================================

// Scene states
pub use crate::core::config::MultiplayerConfig;
pub use crate::core::state::{LifecycleNotifier, MultiplayerState, SceneStateStack};

// Players
pub use crate::core::player::{
    Player, PlayerData, PlayerProperty, PlayerSlot, StateKey, MAX_PLAYERS,
};

// Input
pub use crate::core::input::{ButtonEvent, ControllerEvent, MultiplayerButton};

// Host contracts
pub use crate::core::host::{
    Camera, ControllerSystem, HostSystems, InfoSystem, RenderSystem, SceneLifecycle, SpriteFlags,
    SpriteId, SpriteSnapshot, SpriteSystem,
};

// Indicators
pub use crate::core::indicator::{DrawTarget, Image};

// Local platform
pub use crate::platform::{KeyboardMap, LocalHost};
