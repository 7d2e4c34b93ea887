//=========================================================================
// Player
//=========================================================================
//
// Per-slot player identity, numeric state and sprite binding.
//
// Architecture:
//   Player
//     ├─ index / slot         (immutable identity)
//     ├─ sprite: SpriteId     (non-owning, engine owns the sprite)
//     ├─ state: StateVector   (SCORE / LIVES redirected to InfoSystem)
//     └─ data: PlayerData     (lazy, typed extension storage)
//
// Players are shared as `Rc<Player>` between the scene state, handler
// dispatch and game code, so mutation goes through interior cells.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::cell::{Cell, RefCell, RefMut};
use std::fmt;

use log::warn;

//=== Internal Dependencies ===============================================

use crate::core::host::{HostSystems, SpriteId};
use crate::core::input::MultiplayerButton;

//=== Module Declarations =================================================

pub mod data;
pub mod state_vector;

//=== Public API ==========================================================

pub use data::PlayerData;
pub use state_vector::{StateKey, StateVector};

/// Number of players every scene state holds.
pub const MAX_PLAYERS: usize = 4;

//=== PlayerSlot ==========================================================

/// 1-based, user-facing player identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum PlayerSlot {
    One = 1,
    Two = 2,
    Three = 3,
    Four = 4,
}

impl PlayerSlot {
    /// All slots in order.
    pub const ALL: [PlayerSlot; MAX_PLAYERS] = [
        PlayerSlot::One,
        PlayerSlot::Two,
        PlayerSlot::Three,
        PlayerSlot::Four,
    ];

    /// 0-based player index of this slot.
    pub fn index(self) -> usize {
        self as usize - 1
    }

    /// 1-based slot number.
    pub fn number(self) -> i32 {
        self as i32
    }

    /// Returns the slot for a 0-based index, if in range.
    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }
}

impl TryFrom<i32> for PlayerSlot {
    type Error = InvalidPlayerSlot;

    fn try_from(slot: i32) -> Result<Self, Self::Error> {
        match slot {
            1 => Ok(Self::One),
            2 => Ok(Self::Two),
            3 => Ok(Self::Three),
            4 => Ok(Self::Four),
            other => Err(InvalidPlayerSlot(other)),
        }
    }
}

//=== InvalidPlayerSlot ===================================================

/// A slot number outside `1..=4`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvalidPlayerSlot(pub i32);

impl fmt::Display for InvalidPlayerSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Invalid player slot {} (expected 1..={})", self.0, MAX_PLAYERS)
    }
}

impl std::error::Error for InvalidPlayerSlot {}

//=== PlayerProperty ======================================================

/// Identity properties readable through [`Player::property`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PlayerProperty {
    /// 0-based index.
    Index,

    /// 1-based slot.
    Slot,
}

//=== Player ==============================================================

/// A player in the current scene.
pub struct Player {
    index: usize,
    sprite: Cell<Option<SpriteId>>,
    state: RefCell<StateVector>,
    data: RefCell<Option<PlayerData>>,
    host: HostSystems,
}

impl Player {
    //--- Construction -----------------------------------------------------

    pub(crate) fn new(index: usize, host: HostSystems) -> Self {
        debug_assert!(index < MAX_PLAYERS, "Player index {} out of range", index);
        Self {
            index,
            sprite: Cell::new(None),
            state: RefCell::new(StateVector::new()),
            data: RefCell::new(None),
            host,
        }
    }

    //--- Identity ---------------------------------------------------------

    /// 0-based player index.
    pub fn index(&self) -> usize {
        self.index
    }

    /// 1-based player slot number.
    pub fn slot(&self) -> usize {
        self.index + 1
    }

    pub fn property(&self, prop: PlayerProperty) -> usize {
        match prop {
            PlayerProperty::Index => self.index(),
            PlayerProperty::Slot => self.slot(),
        }
    }

    //--- Sprite -----------------------------------------------------------

    pub fn sprite(&self) -> Option<SpriteId> {
        self.sprite.get()
    }

    /// Binds the player to `sprite`. No liveness check is made.
    pub fn set_sprite(&self, sprite: SpriteId) {
        self.sprite.set(Some(sprite));
    }

    pub fn clear_sprite(&self) {
        self.sprite.set(None);
    }

    //--- Numeric State ----------------------------------------------------

    /// Reads numeric state.
    ///
    /// [`StateKey::SCORE`] and [`StateKey::LIVES`] read from the host's
    /// score/life bookkeeping. Out-of-range keys read as 0.
    pub fn state(&self, key: impl Into<StateKey>) -> i32 {
        let key = key.into();
        match key {
            StateKey::SCORE => self.host.info.score(self.index),
            StateKey::LIVES => self.host.info.life(self.index),
            _ => self.state.borrow().get(key),
        }
    }

    /// Writes numeric state.
    ///
    /// Reserved keys are forwarded to the host and also mirrored into
    /// the local vector, so [`Player::state_entries`] sees them.
    pub fn set_state(&self, key: impl Into<StateKey>, value: i32) {
        let key = key.into();
        match key {
            StateKey::SCORE => self.host.info.set_score(self.index, value),
            StateKey::LIVES => self.host.info.set_life(self.index, value),
            _ => {}
        }

        if !self.state.borrow_mut().set(key, value) {
            warn!("Player {} ignored write to out-of-range state key {}", self.slot(), key.0);
        }
    }

    /// Adds `delta` to the current value of `key`.
    pub fn change_state_by(&self, key: impl Into<StateKey>, delta: i32) {
        let key = key.into();
        let current = self.state(key);
        self.set_state(key, current.wrapping_add(delta));
    }

    /// Snapshot of the local state vector, in key order.
    pub fn state_entries(&self) -> Vec<(StateKey, i32)> {
        self.state.borrow().iter().collect()
    }

    //--- Controller -------------------------------------------------------

    /// Moves the player's sprite with the directional buttons.
    ///
    /// `None` speeds use the host's defaults. Without a bound sprite
    /// this does nothing.
    pub fn move_with_buttons(&self, vx: Option<i32>, vy: Option<i32>) {
        match self.sprite() {
            Some(sprite) => self.host.controllers.move_sprite(self.index, sprite, vx, vy),
            None => warn!("Player {} has no sprite to move", self.slot()),
        }
    }

    pub fn is_button_pressed(&self, button: MultiplayerButton) -> bool {
        self.host.controllers.is_pressed(self.index, button)
    }

    //--- Extension Data ---------------------------------------------------

    /// Typed extension storage, created on first access.
    ///
    /// # Panics
    ///
    /// Panics if the data is already borrowed (e.g. a nested `data()`
    /// call while an earlier guard is alive).
    pub fn data(&self) -> RefMut<'_, PlayerData> {
        RefMut::map(self.data.borrow_mut(), |data| {
            data.get_or_insert_with(PlayerData::new)
        })
    }

    /// Returns `true` once [`Player::data`] has been accessed.
    pub fn has_data(&self) -> bool {
        self.data.borrow().is_some()
    }
}

impl fmt::Debug for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Player")
            .field("index", &self.index)
            .field("sprite", &self.sprite.get())
            .field("state", &self.state.borrow())
            .finish()
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::LocalHost;
    use std::rc::Rc;

    //--- Test Helpers -----------------------------------------------------

    fn player(index: usize) -> (Rc<LocalHost>, Player) {
        let host = Rc::new(LocalHost::new());
        let player = Player::new(index, HostSystems::from_host(host.clone()));
        (host, player)
    }

    //--- Identity ---------------------------------------------------------

    #[test]
    fn slot_is_index_plus_one() {
        for index in 0..MAX_PLAYERS {
            let (_host, player) = player(index);
            assert_eq!(player.index(), index);
            assert_eq!(player.slot(), index + 1);
            assert_eq!(player.property(PlayerProperty::Index), index);
            assert_eq!(player.property(PlayerProperty::Slot), index + 1);
        }
    }

    #[test]
    fn player_slot_conversions() {
        assert_eq!(PlayerSlot::try_from(1), Ok(PlayerSlot::One));
        assert_eq!(PlayerSlot::try_from(4), Ok(PlayerSlot::Four));
        assert_eq!(PlayerSlot::try_from(0), Err(InvalidPlayerSlot(0)));
        assert_eq!(PlayerSlot::try_from(5), Err(InvalidPlayerSlot(5)));

        assert_eq!(PlayerSlot::Three.index(), 2);
        assert_eq!(PlayerSlot::Three.number(), 3);
        assert_eq!(PlayerSlot::from_index(3), Some(PlayerSlot::Four));
        assert_eq!(PlayerSlot::from_index(4), None);
    }

    #[test]
    fn invalid_slot_display() {
        let message = InvalidPlayerSlot(7).to_string();
        assert!(message.contains('7'), "Error should name the bad slot: {}", message);
    }

    //--- Numeric State ----------------------------------------------------

    #[test]
    fn set_then_get_plain_key() {
        let (_host, player) = player(0);
        player.set_state(5, 42);
        assert_eq!(player.state(5), 42);
        assert_eq!(player.state(6), 0, "Unset key must read as zero");
    }

    #[test]
    fn out_of_range_keys_are_noops() {
        let (_host, player) = player(0);
        player.set_state(-1, 9);
        player.set_state(256, 9);

        assert_eq!(player.state(-1), 0);
        assert_eq!(player.state(256), 0);
        assert!(player.state_entries().is_empty());
    }

    #[test]
    fn change_state_by_composes_get_and_set() {
        let (_host, player) = player(1);
        player.set_state(10, 5);
        player.change_state_by(10, 3);
        assert_eq!(player.state(10), 8);
    }

    #[test]
    fn change_state_by_on_unset_key_starts_from_zero() {
        let (_host, player) = player(1);
        player.change_state_by(3, -4);
        assert_eq!(player.state(3), -4);
    }

    #[test]
    fn score_is_redirected_and_mirrored() {
        let (host, player) = player(2);
        player.set_state(StateKey::SCORE, 120);

        assert_eq!(crate::core::host::InfoSystem::score(&*host, 2), 120);
        assert_eq!(player.state(StateKey::SCORE), 120);
        assert_eq!(player.state_entries()[0], (StateKey::SCORE, 120), "Mirror write expected");
    }

    #[test]
    fn lives_are_redirected_and_mirrored() {
        let (host, player) = player(1);
        player.set_state(StateKey::LIVES, 5);

        assert_eq!(crate::core::host::InfoSystem::life(&*host, 1), 5);
        assert_eq!(player.state(StateKey::LIVES), 5);
        assert_eq!(
            player.state_entries(),
            vec![(StateKey::SCORE, 0), (StateKey::LIVES, 5)],
            "Mirror write expected at the lives key"
        );
    }

    #[test]
    fn writing_zero_lives_fires_life_zero() {
        use std::cell::Cell;

        let (host, player) = player(2);
        let fired = Rc::new(Cell::new(0));
        let counter = fired.clone();
        crate::core::host::InfoSystem::on_life_zero(
            &*host,
            2,
            Box::new(move || counter.set(counter.get() + 1)),
        );

        player.set_state(StateKey::LIVES, 0);
        assert_eq!(fired.get(), 1);

        player.set_state(StateKey::LIVES, 0);
        assert_eq!(fired.get(), 1, "Already at zero, no new crossing");
    }

    #[test]
    fn reserved_reads_come_from_host() {
        let (host, player) = player(3);
        crate::core::host::InfoSystem::set_life(&*host, 3, 7);

        assert_eq!(player.state(StateKey::LIVES), 7, "Lives must be read from the host");
    }

    #[test]
    fn change_score_uses_host_value() {
        let (host, player) = player(0);
        crate::core::host::InfoSystem::set_score(&*host, 0, 10);
        player.change_state_by(StateKey::SCORE, 5);

        assert_eq!(crate::core::host::InfoSystem::score(&*host, 0), 15);
    }

    //--- Sprite & Controller ----------------------------------------------

    #[test]
    fn sprite_association() {
        let (_host, player) = player(0);
        assert_eq!(player.sprite(), None);

        player.set_sprite(SpriteId(3));
        assert_eq!(player.sprite(), Some(SpriteId(3)));

        player.clear_sprite();
        assert_eq!(player.sprite(), None);
    }

    #[test]
    fn move_with_buttons_forwards_to_controller() {
        let (host, player) = player(1);
        player.set_sprite(SpriteId(9));
        player.move_with_buttons(None, Some(50));

        let movement = host.movement(1).expect("Movement should be recorded");
        assert_eq!(movement.sprite, SpriteId(9));
        assert_eq!(movement.vx, crate::platform::DEFAULT_MOVE_SPEED);
        assert_eq!(movement.vy, 50);
    }

    #[test]
    fn move_without_sprite_does_nothing() {
        let (host, player) = player(1);
        player.move_with_buttons(None, None);
        assert!(host.movement(1).is_none());
    }

    #[test]
    fn is_button_pressed_queries_host() {
        let (host, player) = player(0);
        assert!(!player.is_button_pressed(MultiplayerButton::A));

        host.press(0, MultiplayerButton::A);
        assert!(player.is_button_pressed(MultiplayerButton::A));
        assert!(!player.is_button_pressed(MultiplayerButton::B));
    }

    //--- Extension Data ---------------------------------------------------

    #[test]
    fn data_is_created_lazily() {
        let (_host, player) = player(0);
        assert!(!player.has_data());

        player.data().insert(3u32);
        assert!(player.has_data());
        assert_eq!(player.data().get::<u32>(), Some(&3));
    }
}
