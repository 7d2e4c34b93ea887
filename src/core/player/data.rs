//=========================================================================
// Player Data
//=========================================================================
//
// Typed extension storage attached to a player.
//
// Architecture:
//   insert<T>() → HashMap<TypeId, Box<dyn Any>> → get<T>() / get_mut<T>()
//
// One value per Rust type. Games define their own structs and store
// them here instead of stuffing loosely typed values into the player.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::any::{Any, TypeId};
use std::collections::HashMap;

//=== PlayerData ==========================================================

/// Type-keyed storage for game-defined per-player data.
///
/// # Example
///
/// ```
/// use aetheric_multiplayer::core::player::PlayerData;
///
/// struct Inventory { coins: u32 }
///
/// let mut data = PlayerData::new();
/// data.get_or_insert_with(|| Inventory { coins: 0 }).coins += 5;
///
/// assert_eq!(data.get::<Inventory>().map(|i| i.coins), Some(5));
/// ```
#[derive(Default)]
pub struct PlayerData {
    values: HashMap<TypeId, Box<dyn Any>>,
}

impl PlayerData {
    pub fn new() -> Self {
        Self {
            values: HashMap::new(),
        }
    }

    /// Stores `value`, returning the previous value of the same type.
    pub fn insert<T: 'static>(&mut self, value: T) -> Option<T> {
        self.values
            .insert(TypeId::of::<T>(), Box::new(value))
            .and_then(|old| old.downcast::<T>().ok())
            .map(|old| *old)
    }

    pub fn get<T: 'static>(&self) -> Option<&T> {
        self.values
            .get(&TypeId::of::<T>())
            .and_then(|v| v.downcast_ref::<T>())
    }

    pub fn get_mut<T: 'static>(&mut self) -> Option<&mut T> {
        self.values
            .get_mut(&TypeId::of::<T>())
            .and_then(|v| v.downcast_mut::<T>())
    }

    /// Returns the stored `T`, inserting `init()` first if absent.
    pub fn get_or_insert_with<T: 'static, F: FnOnce() -> T>(&mut self, init: F) -> &mut T {
        self.values
            .entry(TypeId::of::<T>())
            .or_insert_with(|| Box::new(init()))
            .downcast_mut::<T>()
            .expect("PlayerData entry stored under the wrong TypeId")
    }

    pub fn remove<T: 'static>(&mut self) -> Option<T> {
        self.values
            .remove(&TypeId::of::<T>())
            .and_then(|v| v.downcast::<T>().ok())
            .map(|v| *v)
    }

    pub fn contains<T: 'static>(&self) -> bool {
        self.values.contains_key(&TypeId::of::<T>())
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl std::fmt::Debug for PlayerData {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PlayerData")
            .field("entries", &self.values.len())
            .finish()
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
