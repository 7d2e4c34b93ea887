//=========================================================================
// Indicator Glyphs
//=========================================================================
//
// Builds the arrow image for a (player slot, direction) pair.
//
// One upward arrow is defined; the other directions are quarter-turn
// rotations of it. The fill colour is the player's palette colour.
//
//=========================================================================

//=== Internal Dependencies ===============================================

use super::image::Image;
use super::Direction;

//=== Palette =============================================================

/// Palette colour per player slot (1-based slot - 1).
pub const PLAYER_COLORS: [u8; 4] = [2, 8, 4, 7];

/// Outline colour of every indicator.
pub const OUTLINE_COLOR: u8 = 15;

/// Placeholder fill colour in the base glyph.
const FILL_PLACEHOLDER: u8 = 1;

const ARROW_UP: [&str; 5] = [
    "...f...",
    "..f1f..",
    ".f111f.",
    "f11111f",
    "fffffff",
];

//=== Glyph Construction ==================================================

/// Returns the palette colour for a 1-based player slot.
///
/// Slots outside 1..=4 fall back to the outline colour.
pub fn player_color(slot: usize) -> u8 {
    slot.checked_sub(1)
        .and_then(|index| PLAYER_COLORS.get(index).copied())
        .unwrap_or(OUTLINE_COLOR)
}

/// Builds the indicator image for `slot`, pointing toward `direction`.
pub fn indicator_image(slot: usize, direction: Direction) -> Image {
    let mut image = Image::from_rows(&ARROW_UP);
    image.replace_color(FILL_PLACEHOLDER, player_color(slot));

    for _ in 0..direction.quarter_turns() {
        image = image.rotated_cw();
    }
    image
}

//=========================================================================
// Unit Tests
//=========================================================================
