//=========================================================================
// Controller Event Types
//
// Defines the buttons and edge events the multiplayer layer routes.
// These abstract away the host controller subsystem so handler keys
// stay stable, hashable values.
//
// Responsibilities:
// - Name the six per-player buttons
// - Name button edge transitions (press / release / repeat)
// - Name controller-level (non button specific) events
//
//=========================================================================

//=== MultiplayerButton ===================================================

/// One of the six buttons every player's controller exposes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MultiplayerButton {
    A,
    B,
    Up,
    Right,
    Down,
    Left,
}

impl MultiplayerButton {
    /// All buttons, in declaration order.
    pub const ALL: [MultiplayerButton; 6] = [
        MultiplayerButton::A,
        MultiplayerButton::B,
        MultiplayerButton::Up,
        MultiplayerButton::Right,
        MultiplayerButton::Down,
        MultiplayerButton::Left,
    ];

    /// Returns `true` for the four directional buttons.
    pub fn is_directional(self) -> bool {
        !matches!(self, Self::A | Self::B)
    }
}

//=== ButtonEvent =========================================================

/// A discrete button transition.
///
/// Edge events fire once per transition, as opposed to the continuous
/// pressed state queried through `is_button_pressed`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ButtonEvent {
    /// Button went from released to pressed.
    Pressed,

    /// Button went from pressed to released.
    Released,

    /// Button is held and the host's auto-repeat interval elapsed.
    Repeated,
}

//=== ControllerEvent =====================================================

/// Controller-level events that are not tied to a single button.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ControllerEvent {
    /// The player's controller became available.
    Connected,

    /// The player's controller went away.
    Disconnected,

    /// Any of the player's buttons was pressed.
    AnyButtonPressed,
}

//=========================================================================
// Unit Tests
//=========================================================================
