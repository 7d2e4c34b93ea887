//=========================================================================
// Scene State Stack
//=========================================================================
//
// Stack of `MultiplayerState`, kept in lockstep with the host's scenes.
//
// Lifecycle:
//   first access → push one state, subscribe to host lifecycle
//   host push    → push fresh state
//   host pop     → pop top state (refill if the stack would be empty)
//
// Notifications are queued by the host and applied, in order, at the
// start of every access. The stack is never empty once used, and every
// query resolves against the top state at call time.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::cell::{OnceCell, RefCell};
use std::rc::Rc;

use log::debug;

//=== Internal Dependencies ===============================================

use super::lifecycle::{self, LifecycleReceiver, SceneLifecycleEvent};
use super::MultiplayerState;
use crate::core::config::MultiplayerConfig;
use crate::core::host::{HostSystems, SpriteId};
use crate::core::input::{ButtonEvent, ControllerEvent, MultiplayerButton};
use crate::core::player::Player;

//=== SceneStateStack =====================================================

/// Process-scoped stack of per-scene multiplayer states.
///
/// # Example
///
/// ```rust
/// # use std::rc::Rc;
/// # use aetheric_multiplayer::prelude::*;
/// let host = Rc::new(LocalHost::new());
/// let stack = SceneStateStack::new(HostSystems::from_host(host.clone()), MultiplayerConfig::new());
///
/// let before = stack.current();
/// host.push_scene();
/// assert!(!Rc::ptr_eq(&before, &stack.current()));
///
/// host.pop_scene();
/// assert!(Rc::ptr_eq(&before, &stack.current()));
/// ```
pub struct SceneStateStack {
    host: HostSystems,
    config: MultiplayerConfig,
    states: RefCell<Vec<Rc<MultiplayerState>>>,
    lifecycle: OnceCell<LifecycleReceiver>,
}

impl SceneStateStack {
    //--- Construction -----------------------------------------------------

    /// Creates an uninitialized stack. Nothing touches the host until
    /// first access.
    pub fn new(host: HostSystems, config: MultiplayerConfig) -> Self {
        Self {
            host,
            config,
            states: RefCell::new(Vec::new()),
            lifecycle: OnceCell::new(),
        }
    }

    //--- Active State -----------------------------------------------------

    /// Returns the state of the active scene.
    pub fn current(&self) -> Rc<MultiplayerState> {
        self.sync();

        let mut states = self.states.borrow_mut();
        match states.last() {
            Some(state) => state.clone(),
            None => {
                let state = self.fresh_state();
                states.push(state.clone());
                state
            }
        }
    }

    /// Number of stacked states.
    pub fn depth(&self) -> usize {
        self.sync();
        self.states.borrow().len()
    }

    //--- Facade -----------------------------------------------------------

    pub fn player_by_slot(&self, slot: i32) -> Option<Rc<Player>> {
        self.current().player_by_slot(slot)
    }

    pub fn player_by_index(&self, index: i32) -> Option<Rc<Player>> {
        self.current().player_by_index(index)
    }

    pub fn player_by_sprite(&self, sprite: SpriteId) -> Option<Rc<Player>> {
        self.current().player_by_sprite(sprite)
    }

    /// Returns `false` for an invalid slot.
    pub fn is_button_pressed(&self, slot: i32, button: MultiplayerButton) -> bool {
        self.player_by_slot(slot)
            .is_some_and(|player| player.is_button_pressed(button))
    }

    pub fn on_button_event<F>(&self, button: MultiplayerButton, event: ButtonEvent, f: F)
    where
        F: Fn(&Player) + 'static,
    {
        self.current().on_button_event(button, event, f);
    }

    pub fn on_controller_event<F>(&self, event: ControllerEvent, f: F)
    where
        F: Fn(&Player) + 'static,
    {
        self.current().on_controller_event(event, f);
    }

    pub fn on_reached_score<F>(&self, target: i32, f: F)
    where
        F: Fn(&Player) + 'static,
    {
        self.current().on_reached_score(target, f);
    }

    pub fn on_life_zero<F>(&self, f: F)
    where
        F: Fn(&Player) + 'static,
    {
        self.current().on_life_zero(f);
    }

    pub fn set_player_indicators_visible(&self, visible: bool) {
        self.current().set_player_indicators_visible(visible);
    }

    //--- Lifecycle --------------------------------------------------------

    /// Initializes on first use, then applies queued host notifications.
    fn sync(&self) {
        let receiver = self.lifecycle.get_or_init(|| {
            debug!("Initializing multiplayer state stack");
            let (notifier, receiver) = lifecycle::channel();
            self.states.borrow_mut().push(self.fresh_state());
            self.host.lifecycle.subscribe(notifier);
            receiver
        });

        for event in receiver.drain() {
            match event {
                SceneLifecycleEvent::Pushed => self.push(),
                SceneLifecycleEvent::Popped => self.pop(),
            }
        }
    }

    fn push(&self) {
        let mut states = self.states.borrow_mut();
        states.push(self.fresh_state());
        debug!("Scene pushed, multiplayer stack depth {}", states.len());
    }

    fn pop(&self) {
        // Drop the popped state outside the borrow; its handlers may
        // own arbitrary game values.
        let popped = {
            let mut states = self.states.borrow_mut();
            let popped = states.pop();
            if states.is_empty() {
                debug!("Popped last multiplayer state, starting a fresh one");
                states.push(self.fresh_state());
            } else {
                debug!("Scene popped, multiplayer stack depth {}", states.len());
            }
            popped
        };
        drop(popped);
    }

    fn fresh_state(&self) -> Rc<MultiplayerState> {
        MultiplayerState::new(self.host.clone(), self.config)
    }
}

impl std::fmt::Debug for SceneStateStack {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SceneStateStack")
            .field("depth", &self.states.borrow().len())
            .field("initialized", &self.lifecycle.get().is_some())
            .field("config", &self.config)
            .finish()
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::host::InfoSystem;
    use crate::platform::LocalHost;
    use std::cell::Cell;

    //--- Test Helpers -----------------------------------------------------

    fn stack() -> (Rc<LocalHost>, SceneStateStack) {
        let host = Rc::new(LocalHost::new());
        let stack = SceneStateStack::new(HostSystems::from_host(host.clone()), MultiplayerConfig::new());
        (host, stack)
    }

    fn counter() -> (Rc<Cell<u32>>, impl Fn(&Player) + 'static) {
        let count = Rc::new(Cell::new(0));
        let sink = count.clone();
        (count, move |_: &Player| sink.set(sink.get() + 1))
    }

    //=====================================================================
    // Lifecycle
    //=====================================================================

    #[test]
    fn initializes_lazily() {
        let (host, stack) = stack();
        assert_eq!(host.lifecycle_subscriber_count(), 0, "Nothing happens before first use");

        assert_eq!(stack.depth(), 1);
        assert_eq!(host.lifecycle_subscriber_count(), 1);

        stack.current();
        assert_eq!(host.lifecycle_subscriber_count(), 1, "Subscribes only once");
    }

    #[test]
    fn push_and_pop_track_host_scenes() {
        let (host, stack) = stack();
        stack.current();

        host.push_scene();
        host.push_scene();
        assert_eq!(stack.depth(), 3);

        host.pop_scene();
        assert_eq!(stack.depth(), 2);
    }

    #[test]
    fn pop_restores_previous_state() {
        let (host, stack) = stack();
        let base = stack.current();
        base.players()[0].set_state(3, 5);

        host.push_scene();
        let pushed = stack.current();
        assert!(!Rc::ptr_eq(&base, &pushed));
        assert_eq!(pushed.players()[0].state(3), 0, "Pushed state starts empty");
        pushed.players()[0].set_state(3, 99);

        host.pop_scene();
        let restored = stack.current();
        assert!(Rc::ptr_eq(&base, &restored));
        assert_eq!(restored.players()[0].state(3), 5, "Pushed writes are discarded");
    }

    #[test]
    fn popping_last_state_yields_fresh_state() {
        let (host, stack) = stack();
        let first = stack.current();
        first.players()[1].set_state(7, 1);

        host.pop_scene();

        let fresh = stack.current();
        assert_eq!(stack.depth(), 1, "Stack must never be empty");
        assert!(!Rc::ptr_eq(&first, &fresh));
        assert_eq!(fresh.players()[1].state(7), 0);
        assert_eq!(fresh.handlers().button_count(), 0);
    }

    #[test]
    fn notifications_before_first_use_are_not_seen() {
        let (host, stack) = stack();
        host.push_scene();
        assert_eq!(stack.depth(), 1);
    }

    //=====================================================================
    // Facade
    //=====================================================================

    #[test]
    fn handlers_survive_a_push_pop_cycle() {
        let (host, stack) = stack();
        let (count, handler) = counter();
        stack.on_button_event(MultiplayerButton::A, ButtonEvent::Pressed, handler);

        host.push_scene();
        stack.current();
        host.press(0, MultiplayerButton::A);
        assert_eq!(count.get(), 0, "Lower scene is inactive while covered");

        host.pop_scene();
        stack.current();
        host.release(0, MultiplayerButton::A);
        host.press(0, MultiplayerButton::A);
        assert_eq!(count.get(), 1);
    }

    #[test]
    fn registration_acts_on_top_state() {
        let (host, stack) = stack();
        let (count, handler) = counter();

        host.push_scene();
        stack.on_reached_score(10, handler);
        assert_eq!(stack.current().handlers().score_count(), 1);

        host.pop_scene();
        assert_eq!(stack.current().handlers().score_count(), 0);

        host.set_score(0, 10);
        assert_eq!(count.get(), 0, "Popped scene handlers never fire");
    }

    #[test]
    fn reregistration_through_stack_does_not_resubscribe() {
        let (host, stack) = stack();

        stack.on_life_zero(|_| {});
        stack.on_life_zero(|_| {});
        stack.on_controller_event(ControllerEvent::AnyButtonPressed, |_| {});
        stack.on_controller_event(ControllerEvent::AnyButtonPressed, |_| {});

        assert_eq!(host.subscription_count(), 8);
    }

    #[test]
    fn lookups_resolve_against_current_state() {
        let (host, stack) = stack();
        stack.current().players()[2].set_sprite(SpriteId(4));
        assert_eq!(stack.player_by_sprite(SpriteId(4)).map(|p| p.slot()), Some(3));

        host.push_scene();
        assert!(stack.player_by_sprite(SpriteId(4)).is_none());
        assert!(stack.player_by_slot(9).is_none());
        assert_eq!(stack.player_by_index(0).map(|p| p.slot()), Some(1));
    }

    #[test]
    fn is_button_pressed_by_slot() {
        let (host, stack) = stack();
        host.press(1, MultiplayerButton::Left);

        assert!(stack.is_button_pressed(2, MultiplayerButton::Left));
        assert!(!stack.is_button_pressed(1, MultiplayerButton::Left));
        assert!(!stack.is_button_pressed(0, MultiplayerButton::Left), "Invalid slot reads false");
    }

    #[test]
    fn indicator_visibility_is_per_scene() {
        let (host, stack) = stack();
        stack.set_player_indicators_visible(true);

        host.push_scene();
        assert!(!stack.current().indicators_visible());

        host.pop_scene();
        assert!(stack.current().indicators_visible());
    }
}
