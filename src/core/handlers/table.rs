//=========================================================================
// Handler Table
//=========================================================================
//
// Keyed storage of the live handler for each event key.
//
// Architecture:
//   (key) → HashMap → PlayerHandler
//
// At most one handler per key. Registering an existing key swaps the
// stored handler in place and reports `Registration::Replaced`, which
// tells the caller the engine subscription already exists.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::collections::HashMap;
use std::fmt::Debug;
use std::hash::Hash;
use std::rc::Rc;

//=== Internal Dependencies ===============================================

use crate::core::player::Player;

//=== Handler Types =======================================================

/// Game callback invoked with the player an event belongs to.
///
/// Stored behind `Rc` so dispatch can clone it out of the registry and
/// release the borrow before calling it; handlers are free to register
/// other handlers while running.
pub type PlayerHandler = Rc<dyn Fn(&Player)>;

/// Marker trait for handler table keys.
pub trait HandlerKey: Copy + Eq + Hash + Debug + 'static {}

impl<T: Copy + Eq + Hash + Debug + 'static> HandlerKey for T {}

//=== Registration ========================================================

/// Outcome of registering a handler.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Registration {
    /// First handler for this key; the engine event must be subscribed.
    New,

    /// An earlier handler was replaced; the existing subscription serves it.
    Replaced,
}

impl Registration {
    /// Returns `true` if the caller must create engine subscriptions.
    pub fn needs_subscription(self) -> bool {
        self == Self::New
    }
}

//=== HandlerTable ========================================================

/// Map from event key to the live handler for that key.
pub struct HandlerTable<K: HandlerKey> {
    handlers: HashMap<K, PlayerHandler>,
}

impl<K: HandlerKey> HandlerTable<K> {
    pub fn new() -> Self {
        Self {
            handlers: HashMap::new(),
        }
    }

    /// Stores `handler` as the live handler for `key`.
    pub fn register(&mut self, key: K, handler: PlayerHandler) -> Registration {
        match self.handlers.insert(key, handler) {
            Some(_) => Registration::Replaced,
            None => Registration::New,
        }
    }

    /// Returns the live handler for `key`, if one was ever registered.
    pub fn get(&self, key: &K) -> Option<PlayerHandler> {
        self.handlers.get(key).cloned()
    }

    pub fn contains(&self, key: &K) -> bool {
        self.handlers.contains_key(key)
    }

    /// Number of distinct keys registered.
    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }
}

impl<K: HandlerKey> Default for HandlerTable<K> {
    fn default() -> Self {
        Self::new()
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use crate::core::host::HostSystems;
    use crate::platform::LocalHost;

    fn counting_handler(counter: &Rc<Cell<u32>>, amount: u32) -> PlayerHandler {
        let counter = counter.clone();
        Rc::new(move |_player: &Player| counter.set(counter.get() + amount))
    }

    #[test]
    fn first_registration_is_new() {
        let mut table = HandlerTable::<u8>::new();
        let counter = Rc::new(Cell::new(0));

        assert_eq!(table.register(1, counting_handler(&counter, 1)), Registration::New);
        assert!(table.contains(&1));
        assert_eq!(table.len(), 1);
    }

    #[test]
    fn second_registration_replaces_in_place() {
        let mut table = HandlerTable::<u8>::new();
        let first = Rc::new(Cell::new(0));
        let second = Rc::new(Cell::new(0));

        table.register(1, counting_handler(&first, 1));
        let outcome = table.register(1, counting_handler(&second, 1));

        assert_eq!(outcome, Registration::Replaced);
        assert!(!outcome.needs_subscription());
        assert_eq!(table.len(), 1, "Table must not grow on re-registration");

        let host = Rc::new(LocalHost::new());
        let player = Player::new(0, HostSystems::from_host(host));
        let live = table.get(&1).expect("Handler should be present");
        live(&player);

        assert_eq!(first.get(), 0, "Replaced handler must not run");
        assert_eq!(second.get(), 1);
    }

    #[test]
    fn missing_key_returns_none() {
        let table = HandlerTable::<u8>::new();
        assert!(table.get(&3).is_none());
        assert!(table.is_empty());
    }
}
