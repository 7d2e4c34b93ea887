//=========================================================================
// Input Types
//=========================================================================
//
// Button and controller event identifiers shared by the handler
// registry, the host controller contract and the keyboard map.
//
//=========================================================================

//=== Module Declarations =================================================

pub mod event;

//=== Public API ==========================================================

pub use event::{ButtonEvent, ControllerEvent, MultiplayerButton};
