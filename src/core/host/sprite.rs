//=========================================================================
// Sprite & Camera Types
//=========================================================================
//
// Read-only views of engine-owned sprites and the camera, as consumed
// by the player binding and the indicator renderer.
//
// The engine owns sprite lifetime. Players only hold a `SpriteId`, and
// every frame the renderer asks the host for a fresh `SpriteSnapshot`.
//
//=========================================================================

//=== SpriteId ============================================================

/// Opaque handle to an engine sprite.
///
/// Holding a `SpriteId` does not keep the sprite alive; lookups for a
/// sprite the engine has dropped simply return `None`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SpriteId(pub u32);

//=== Hitbox ==============================================================

/// World-space hitbox edges of a sprite.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Hitbox {
    pub left: f32,
    pub top: f32,
    pub right: f32,
    pub bottom: f32,
}

impl Hitbox {
    /// Creates a hitbox from its top-left corner and size.
    pub fn from_rect(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            left: x,
            top: y,
            right: x + width,
            bottom: y + height,
        }
    }
}

//=== SpriteFlags =========================================================

/// Sprite state flags relevant to indicator rendering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SpriteFlags {
    /// Sprite has been destroyed but the engine still reports it.
    pub destroyed: bool,

    /// Sprite is hidden.
    pub invisible: bool,

    /// Sprite is positioned in screen space and ignores the camera.
    pub relative_to_camera: bool,
}

impl SpriteFlags {
    /// Plain, visible, world-space sprite.
    pub const NONE: Self = Self {
        destroyed: false,
        invisible: false,
        relative_to_camera: false,
    };

    /// Destroyed.
    pub const DESTROYED: Self = Self {
        destroyed: true,
        invisible: false,
        relative_to_camera: false,
    };

    /// Invisible.
    pub const INVISIBLE: Self = Self {
        destroyed: false,
        invisible: true,
        relative_to_camera: false,
    };

    /// Camera-relative (screen space).
    pub const RELATIVE_TO_CAMERA: Self = Self {
        destroyed: false,
        invisible: false,
        relative_to_camera: true,
    };

    /// Returns `true` if the sprite should not be drawn at all.
    pub fn is_hidden(&self) -> bool {
        self.destroyed || self.invisible
    }
}

impl Default for SpriteFlags {
    fn default() -> Self {
        Self::NONE
    }
}

//=== SpriteSnapshot ======================================================

/// Per-frame view of a sprite.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct SpriteSnapshot {
    pub hitbox: Hitbox,
    pub flags: SpriteFlags,
}

impl SpriteSnapshot {
    pub fn new(hitbox: Hitbox, flags: SpriteFlags) -> Self {
        Self { hitbox, flags }
    }
}

//=== Camera ==============================================================

/// Camera draw offsets, subtracted from world coordinates to obtain
/// screen coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Camera {
    pub draw_offset_x: i32,
    pub draw_offset_y: i32,
}

impl Camera {
    pub fn new(draw_offset_x: i32, draw_offset_y: i32) -> Self {
        Self {
            draw_offset_x,
            draw_offset_y,
        }
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
