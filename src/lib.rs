//=========================================================================
// Aetheric Multiplayer — Library Root
//
// Per-player state, input routing and off-screen indicators for local
// multiplayer games with up to four players.
//
// Responsibilities:
// - Keep one multiplayer context per active scene (`SceneStateStack`)
// - Route controller, score and life events to game handlers
// - Draw directional indicators for players whose sprite left the screen
// - Provide an in-process host (`platform::LocalHost`) for games and tests
//
// Typical usage:
// ```
// use std::rc::Rc;
// use aetheric_multiplayer::prelude::*;
//
// let host = Rc::new(LocalHost::new());
// let stack = SceneStateStack::new(HostSystems::from_host(host.clone()), MultiplayerConfig::new());
//
// stack.on_button_event(MultiplayerButton::A, ButtonEvent::Pressed, |player| {
//     player.change_state_by(StateKey::SCORE, 1);
// });
// host.press(0, MultiplayerButton::A);
//
// assert_eq!(stack.player_by_slot(1).map(|p| p.state(StateKey::SCORE)), Some(1));
// ```
//
//=========================================================================

//--- Public Modules ------------------------------------------------------
//
// `core` holds the multiplayer logic and the host contracts it needs.
// `platform` holds the concrete local host and keyboard mapping.
//
pub mod core;
pub mod platform;
pub mod prelude;
