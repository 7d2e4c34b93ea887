//=========================================================================
// Keyboard Map
//
// Maps winit physical keys to per-player multiplayer buttons, so four
// players can share one keyboard on a `LocalHost`.
//
// Default layout:
// - Player 1: W A S D, Q (A), E (B)
// - Player 2: I J K L, U (A), O (B)
// - Player 3: arrow keys, Comma (A), Period (B)
// - Player 4: Numpad 8 4 5 6, Numpad 7 (A), Numpad 9 (B)
//
//=========================================================================

use std::collections::HashMap;

use log::trace;
use winit::event::ElementState;
use winit::keyboard::{KeyCode, PhysicalKey};

use super::LocalHost;
use crate::core::input::MultiplayerButton;
use crate::core::player::MAX_PLAYERS;

//=== Default Layout ======================================================
//
// Order per player: Up, Left, Down, Right, A, B.
//

const DEFAULT_LAYOUT: [[KeyCode; 6]; MAX_PLAYERS] = [
    [KeyCode::KeyW, KeyCode::KeyA, KeyCode::KeyS, KeyCode::KeyD, KeyCode::KeyQ, KeyCode::KeyE],
    [KeyCode::KeyI, KeyCode::KeyJ, KeyCode::KeyK, KeyCode::KeyL, KeyCode::KeyU, KeyCode::KeyO],
    [
        KeyCode::ArrowUp,
        KeyCode::ArrowLeft,
        KeyCode::ArrowDown,
        KeyCode::ArrowRight,
        KeyCode::Comma,
        KeyCode::Period,
    ],
    [
        KeyCode::Numpad8,
        KeyCode::Numpad4,
        KeyCode::Numpad5,
        KeyCode::Numpad6,
        KeyCode::Numpad7,
        KeyCode::Numpad9,
    ],
];

const LAYOUT_BUTTONS: [MultiplayerButton; 6] = [
    MultiplayerButton::Up,
    MultiplayerButton::Left,
    MultiplayerButton::Down,
    MultiplayerButton::Right,
    MultiplayerButton::A,
    MultiplayerButton::B,
];

//=== KeyboardMap =========================================================

/// Physical key → (player index, button) table.
#[derive(Debug, Clone)]
pub struct KeyboardMap {
    bindings: HashMap<KeyCode, (usize, MultiplayerButton)>,
}

impl KeyboardMap {
    /// Creates a map with no bindings.
    pub fn empty() -> Self {
        Self {
            bindings: HashMap::new(),
        }
    }

    /// Binds `key` to `button` of `player` (0-based), replacing any
    /// earlier binding of that key.
    ///
    /// # Panics
    ///
    /// Panics if `player` is not a valid player index.
    pub fn bind(&mut self, key: KeyCode, player: usize, button: MultiplayerButton) {
        assert!(player < MAX_PLAYERS, "Player index must be below {}", MAX_PLAYERS);
        self.bindings.insert(key, (player, button));
    }

    pub fn unbind(&mut self, key: KeyCode) {
        self.bindings.remove(&key);
    }

    /// Returns the (player index, button) bound to `key`.
    pub fn resolve(&self, key: KeyCode) -> Option<(usize, MultiplayerButton)> {
        self.bindings.get(&key).copied()
    }

    /// Forwards a key transition to `host` as a press or release.
    ///
    /// Returns `false` if the key is unbound.
    pub fn apply(&self, host: &LocalHost, key: KeyCode, state: ElementState) -> bool {
        let Some((player, button)) = self.resolve(key) else {
            return false;
        };

        trace!("{:?} {:?} → player {} {:?}", key, state, player + 1, button);
        match state {
            ElementState::Pressed => host.press(player, button),
            ElementState::Released => host.release(player, button),
        }
        true
    }

    /// Like [`KeyboardMap::apply`], for a raw winit physical key.
    pub fn apply_physical(&self, host: &LocalHost, key: PhysicalKey, state: ElementState) -> bool {
        match key {
            PhysicalKey::Code(code) => self.apply(host, code, state),
            PhysicalKey::Unidentified(_) => false,
        }
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }
}

impl Default for KeyboardMap {
    fn default() -> Self {
        let mut map = Self::empty();
        for (player, keys) in DEFAULT_LAYOUT.iter().enumerate() {
            for (&key, &button) in keys.iter().zip(LAYOUT_BUTTONS.iter()) {
                map.bind(key, player, button);
            }
        }
        map
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
