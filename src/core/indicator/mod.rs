//=========================================================================
// Off-Screen Indicators
//=========================================================================
//
// Draws a directional marker for every player whose sprite has left
// the visible screen.
//
// Flow (per frame, per player):
//   SpriteSnapshot → ScreenBounds → ExitZone → Direction → glyph → place → draw
//
// Zones are tested in order left, right, above, below. "Below" is the
// fallback and is also taken by sprites that are fully on screen.
//
// Rendering is a pure side effect on the draw target: no player or
// scene state is touched.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::collections::HashMap;
use std::rc::Rc;

use log::trace;

//=== Internal Dependencies ===============================================

use crate::core::config::MultiplayerConfig;
use crate::core::host::{Camera, SpriteSnapshot, SpriteSystem};
use crate::core::player::Player;

//=== Module Declarations =================================================

pub mod glyph;
pub mod image;

//=== Public API ==========================================================

pub use image::{DrawTarget, Image, TRANSPARENT};

//=== Direction ===========================================================

/// Orientation of an indicator glyph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Up,
    Right,
    Down,
    Left,
}

impl Direction {
    /// Clockwise quarter turns from `Up`.
    pub fn quarter_turns(self) -> u32 {
        match self {
            Self::Up => 0,
            Self::Right => 1,
            Self::Down => 2,
            Self::Left => 3,
        }
    }
}

//=== ExitZone ============================================================

/// Where a sprite sits relative to the visible screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ExitZone {
    Left,
    Right,
    Above,
    Below,
}

impl ExitZone {
    /// Indicator orientation for this zone: the opposite of the exit side.
    pub fn indicator_direction(self) -> Direction {
        match self {
            Self::Left => Direction::Right,
            Self::Right => Direction::Left,
            Self::Above => Direction::Down,
            Self::Below => Direction::Up,
        }
    }
}

//=== ScreenBounds ========================================================

/// Axis-aligned sprite bounds in screen pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ScreenBounds {
    pub left: i32,
    pub top: i32,
    pub right: i32,
    pub bottom: i32,
}

impl ScreenBounds {
    /// Converts a sprite's world hitbox to screen space.
    ///
    /// Edges are floored to whole pixels and saturate at the `i32`
    /// range. Camera-relative sprites are already in screen space and
    /// skip the camera offset.
    pub fn from_snapshot(snapshot: &SpriteSnapshot, camera: &Camera) -> Self {
        let hitbox = &snapshot.hitbox;
        let mut bounds = Self {
            left: hitbox.left.floor() as i32,
            top: hitbox.top.floor() as i32,
            right: hitbox.right.floor() as i32,
            bottom: hitbox.bottom.floor() as i32,
        };

        if !snapshot.flags.relative_to_camera {
            bounds.left = bounds.left.saturating_sub(camera.draw_offset_x);
            bounds.right = bounds.right.saturating_sub(camera.draw_offset_x);
            bounds.top = bounds.top.saturating_sub(camera.draw_offset_y);
            bounds.bottom = bounds.bottom.saturating_sub(camera.draw_offset_y);
        }

        bounds
    }

    fn center_x(&self) -> i32 {
        midpoint(self.left, self.right)
    }

    fn center_y(&self) -> i32 {
        midpoint(self.top, self.bottom)
    }
}

/// Floor of the midpoint, without intermediate overflow.
fn midpoint(low: i32, high: i32) -> i32 {
    ((low as i64 + high as i64) >> 1) as i32
}

//=== Geometry ============================================================

/// Classifies `bounds` into the first matching zone.
pub fn classify(bounds: &ScreenBounds, config: &MultiplayerConfig) -> ExitZone {
    if bounds.left < 0 {
        ExitZone::Left
    } else if bounds.right > config.screen_width() {
        ExitZone::Right
    } else if bounds.top < config.top_margin() {
        ExitZone::Above
    } else {
        ExitZone::Below
    }
}

/// Computes the top-left draw position of a `width` x `height`
/// indicator for a sprite in `zone`.
pub fn place(
    zone: ExitZone,
    bounds: &ScreenBounds,
    width: i32,
    height: i32,
    config: &MultiplayerConfig,
) -> (i32, i32) {
    let gap = config.indicator_gap();
    let screen_width = config.screen_width();
    let screen_height = config.screen_height();

    let beside_y = bounds
        .center_y()
        .saturating_sub(height >> 1)
        .max(0)
        .min(screen_height - height);
    let centered_x = bounds.center_x().saturating_sub(width >> 1);

    match zone {
        ExitZone::Left => (bounds.right.saturating_add(gap).max(0), beside_y),
        ExitZone::Right => (
            bounds.left.saturating_sub(width + gap).min(screen_width - width),
            beside_y,
        ),
        ExitZone::Above => (centered_x, bounds.bottom.saturating_add(gap).max(0)),
        ExitZone::Below => (
            centered_x,
            bounds.top.saturating_sub(height + gap).min(screen_height - height),
        ),
    }
}

//=== IndicatorPlacement ==================================================

/// Where and how an indicator is drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IndicatorPlacement {
    pub zone: ExitZone,
    pub direction: Direction,
    pub x: i32,
    pub y: i32,
}

//=== IndicatorRenderer ===================================================

/// Per-frame off-screen indicator renderer.
///
/// Caches one glyph per (slot, direction) pair.
pub struct IndicatorRenderer {
    config: MultiplayerConfig,
    glyphs: HashMap<(usize, Direction), Image>,
}

impl IndicatorRenderer {
    pub fn new(config: MultiplayerConfig) -> Self {
        Self {
            config,
            glyphs: HashMap::new(),
        }
    }

    /// Computes the placement of `slot`'s indicator for `bounds`.
    pub fn plan(&mut self, slot: usize, bounds: &ScreenBounds) -> IndicatorPlacement {
        let zone = classify(bounds, &self.config);
        let direction = zone.indicator_direction();
        let glyph = self.glyph(slot, direction);
        let (width, height) = (glyph.width(), glyph.height());
        let (x, y) = place(zone, bounds, width, height, &self.config);

        IndicatorPlacement {
            zone,
            direction,
            x,
            y,
        }
    }

    /// Draws indicators for every player with a live, visible sprite.
    ///
    /// Returns the number of indicators drawn.
    pub fn draw(
        &mut self,
        players: &[Rc<Player>],
        sprites: &dyn SpriteSystem,
        target: &mut dyn DrawTarget,
        camera: &Camera,
    ) -> usize {
        let mut drawn = 0;

        for player in players {
            let Some(snapshot) = player.sprite().and_then(|id| sprites.sprite(id)) else {
                continue;
            };
            if snapshot.flags.is_hidden() {
                continue;
            }

            let bounds = ScreenBounds::from_snapshot(&snapshot, camera);
            let placement = self.plan(player.slot(), &bounds);
            trace!("Player {} indicator: {:?}", player.slot(), placement);

            let glyph = self.glyph(player.slot(), placement.direction);
            target.draw_transparent_image(glyph, placement.x, placement.y);
            drawn += 1;
        }

        drawn
    }

    fn glyph(&mut self, slot: usize, direction: Direction) -> &Image {
        self.glyphs
            .entry((slot, direction))
            .or_insert_with(|| glyph::indicator_image(slot, direction))
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::host::{HostSystems, Hitbox, SpriteFlags};
    use crate::platform::LocalHost;

    //--- Test Helpers -----------------------------------------------------

    fn bounds(left: i32, top: i32, right: i32, bottom: i32) -> ScreenBounds {
        ScreenBounds {
            left,
            top,
            right,
            bottom,
        }
    }

    fn config() -> MultiplayerConfig {
        MultiplayerConfig::new()
    }

    //=====================================================================
    // Zone Classification
    //=====================================================================

    #[test]
    fn left_wins_over_above() {
        let zone = classify(&bounds(-4, -10, 12, 2), &config());
        assert_eq!(zone, ExitZone::Left, "Left must take priority over the top margin");
    }

    #[test]
    fn right_wins_over_above() {
        let zone = classify(&bounds(150, 0, 170, 10), &config());
        assert_eq!(zone, ExitZone::Right);
    }

    #[test]
    fn top_margin_counts_as_above() {
        assert_eq!(classify(&bounds(50, 17, 60, 27), &config()), ExitZone::Above);
        assert_eq!(classify(&bounds(50, 18, 60, 28), &config()), ExitZone::Below);
    }

    #[test]
    fn on_screen_sprite_falls_back_to_below() {
        let zone = classify(&bounds(60, 50, 76, 66), &config());
        assert_eq!(zone, ExitZone::Below);
    }

    #[test]
    fn right_edge_exactly_on_screen_is_not_right() {
        assert_eq!(classify(&bounds(144, 50, 160, 66), &config()), ExitZone::Below);
        assert_eq!(classify(&bounds(145, 50, 161, 66), &config()), ExitZone::Right);
    }

    #[test]
    fn zone_directions_are_opposite() {
        assert_eq!(ExitZone::Left.indicator_direction(), Direction::Right);
        assert_eq!(ExitZone::Right.indicator_direction(), Direction::Left);
        assert_eq!(ExitZone::Above.indicator_direction(), Direction::Down);
        assert_eq!(ExitZone::Below.indicator_direction(), Direction::Up);
    }

    //=====================================================================
    // Placement
    //=====================================================================

    #[test]
    fn left_exit_hugs_left_edge_and_centres_vertically() {
        // Indicator 5x7 (horizontal arrow).
        let (x, y) = place(ExitZone::Left, &bounds(-20, 40, -4, 56), 5, 7, &config());
        assert_eq!(x, 0, "Right bound + gap is negative, clamp to screen edge");
        assert_eq!(y, 48 - 3);
    }

    #[test]
    fn left_exit_partially_visible_sits_after_sprite() {
        let (x, _) = place(ExitZone::Left, &bounds(-4, 40, 12, 56), 5, 7, &config());
        assert_eq!(x, 14);
    }

    #[test]
    fn right_exit_hugs_right_edge() {
        let (x, y) = place(ExitZone::Right, &bounds(170, 40, 186, 56), 5, 7, &config());
        assert_eq!(x, 160 - 5);
        assert_eq!(y, 45);

        let (x, _) = place(ExitZone::Right, &bounds(150, 40, 166, 56), 5, 7, &config());
        assert_eq!(x, 150 - 5 - 2);
    }

    #[test]
    fn vertical_position_is_clamped_to_screen() {
        let (_, y) = place(ExitZone::Left, &bounds(-20, -60, -4, -40), 5, 7, &config());
        assert_eq!(y, 0);

        let (_, y) = place(ExitZone::Right, &bounds(170, 300, 186, 316), 5, 7, &config());
        assert_eq!(y, 120 - 7);
    }

    #[test]
    fn above_exit_hugs_top_and_centres_horizontally() {
        // Indicator 7x5 (vertical arrow).
        let (x, y) = place(ExitZone::Above, &bounds(40, -30, 56, -14), 7, 5, &config());
        assert_eq!(x, 48 - 3);
        assert_eq!(y, 0);

        let (_, y) = place(ExitZone::Above, &bounds(40, 0, 56, 16), 7, 5, &config());
        assert_eq!(y, 18);
    }

    #[test]
    fn below_exit_hugs_bottom() {
        let (x, y) = place(ExitZone::Below, &bounds(40, 130, 56, 146), 7, 5, &config());
        assert_eq!(x, 45);
        assert_eq!(y, 120 - 5);

        let (_, y) = place(ExitZone::Below, &bounds(40, 60, 56, 76), 7, 5, &config());
        assert_eq!(y, 60 - 5 - 2);
    }

    #[test]
    fn horizontal_position_is_not_clamped_for_vertical_exits() {
        let (x, _) = place(ExitZone::Below, &bounds(-2, 130, 0, 146), 7, 5, &config());
        assert_eq!(x, -1 - 3);
    }

    //=====================================================================
    // Screen Bounds
    //=====================================================================

    #[test]
    fn world_sprites_subtract_camera_offset() {
        let snapshot = SpriteSnapshot::new(Hitbox::from_rect(200.0, 50.5, 16.0, 16.0), SpriteFlags::NONE);
        let camera = Camera::new(100, 10);

        let screen = ScreenBounds::from_snapshot(&snapshot, &camera);
        assert_eq!(screen, bounds(100, 40, 116, 56));
    }

    #[test]
    fn camera_relative_sprites_ignore_offset() {
        let snapshot = SpriteSnapshot::new(
            Hitbox::from_rect(-8.0, 20.0, 16.0, 16.0),
            SpriteFlags::RELATIVE_TO_CAMERA,
        );
        let camera = Camera::new(100, 10);

        let screen = ScreenBounds::from_snapshot(&snapshot, &camera);
        assert_eq!(screen, bounds(-8, 20, 8, 36));
    }

    #[test]
    fn far_away_sprite_saturates_instead_of_overflowing() {
        let snapshot = SpriteSnapshot::new(
            Hitbox::from_rect(-3.0e9, 50.0, 16.0, 16.0),
            SpriteFlags::NONE,
        );
        let screen = ScreenBounds::from_snapshot(&snapshot, &Camera::new(10, 0));
        assert_eq!(screen.left, i32::MIN);
        assert_eq!(screen.right, i32::MIN);

        let (x, y) = place(ExitZone::Left, &screen, 5, 7, &config());
        assert_eq!((x, y), (0, 55));

        let wide = bounds(i32::MIN, 40, i32::MAX, 56);
        let (x, _) = place(ExitZone::Above, &wide, 7, 5, &config());
        assert_eq!(x, -1 - 3);
        let (x, _) = place(ExitZone::Right, &bounds(i32::MIN + 1, 40, i32::MAX, 56), 5, 7, &config());
        assert_eq!(x, i32::MIN);
    }

    #[test]
    fn far_away_sprite_renders_at_screen_edge() {
        let host = Rc::new(LocalHost::new());
        let player = Rc::new(Player::new(0, HostSystems::from_host(host.clone())));
        let sprite = host.spawn_sprite(SpriteSnapshot::new(
            Hitbox::from_rect(-3.0e9, 50.0, 16.0, 16.0),
            SpriteFlags::NONE,
        ));
        player.set_sprite(sprite);

        let mut target = Image::new(160, 120);
        let mut renderer = IndicatorRenderer::new(config());
        let drawn = renderer.draw(&[player], &*host, &mut target, &Camera::new(10, 0));

        assert_eq!(drawn, 1);
        assert_eq!(target.pixel(4, 58), glyph::OUTLINE_COLOR, "Tip sits at the left edge");
    }

    #[test]
    fn negative_fractional_edges_floor() {
        let snapshot = SpriteSnapshot::new(Hitbox::from_rect(-0.5, 0.0, 1.0, 1.0), SpriteFlags::NONE);
        let screen = ScreenBounds::from_snapshot(&snapshot, &Camera::default());
        assert_eq!(screen.left, -1);
    }

    //=====================================================================
    // Renderer
    //=====================================================================

    #[test]
    fn plan_uses_glyph_size_for_direction() {
        let mut renderer = IndicatorRenderer::new(config());
        let placement = renderer.plan(1, &bounds(170, 40, 186, 56));

        assert_eq!(placement.zone, ExitZone::Right);
        assert_eq!(placement.direction, Direction::Left);
        assert_eq!(placement.x, 155, "Horizontal glyph is 5 pixels wide");
    }

    #[test]
    fn draw_skips_missing_hidden_and_destroyed_sprites() {
        let host = Rc::new(LocalHost::new());
        let systems = HostSystems::from_host(host.clone());
        let players: Vec<Rc<Player>> = (0..4)
            .map(|i| Rc::new(Player::new(i, systems.clone())))
            .collect();

        let visible = host.spawn_sprite(SpriteSnapshot::new(
            Hitbox::from_rect(-30.0, 50.0, 16.0, 16.0),
            SpriteFlags::NONE,
        ));
        let hidden = host.spawn_sprite(SpriteSnapshot::new(
            Hitbox::from_rect(-30.0, 50.0, 16.0, 16.0),
            SpriteFlags::INVISIBLE,
        ));
        let destroyed = host.spawn_sprite(SpriteSnapshot::new(
            Hitbox::from_rect(-30.0, 50.0, 16.0, 16.0),
            SpriteFlags::DESTROYED,
        ));
        players[0].set_sprite(visible);
        players[1].set_sprite(hidden);
        players[2].set_sprite(destroyed);
        // Player 4 has no sprite at all.

        let mut target = Image::new(160, 120);
        let mut renderer = IndicatorRenderer::new(config());
        let drawn = renderer.draw(&players, &*host, &mut target, &Camera::default());

        assert_eq!(drawn, 1);
        assert_eq!(target.count_color(glyph::player_color(1)), 9);
        assert_eq!(target.count_color(glyph::player_color(2)), 0);
    }

    #[test]
    fn draw_places_glyph_at_left_edge() {
        let host = Rc::new(LocalHost::new());
        let player = Rc::new(Player::new(0, HostSystems::from_host(host.clone())));
        let sprite = host.spawn_sprite(SpriteSnapshot::new(
            Hitbox::from_rect(-40.0, 50.0, 16.0, 16.0),
            SpriteFlags::NONE,
        ));
        player.set_sprite(sprite);

        let mut target = Image::new(160, 120);
        let mut renderer = IndicatorRenderer::new(config());
        renderer.draw(&[player], &*host, &mut target, &Camera::default());

        // Right-facing glyph drawn at x = 0, y = 58 - 3; its tip is the
        // rightmost column, vertical middle.
        assert_eq!(target.pixel(4, 55 + 3), glyph::OUTLINE_COLOR);
        assert_eq!(target.pixel(5, 55 + 3), TRANSPARENT);
    }
}
