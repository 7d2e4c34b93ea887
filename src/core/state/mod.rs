//=========================================================================
// Multiplayer State
//=========================================================================
//
// One multiplayer context per active scene.
//
// Architecture:
//   MultiplayerState
//     ├─ players: [Rc<Player>; 4]
//     ├─ handlers: HandlerRegistry        (live handler per key)
//     ├─ indicators_visible + renderable  (indicator overlay)
//     └─ host: HostSystems                (engine collaborators)
//
// Dispatch (late lookup):
//   engine event → closure(Weak<state>, key, player index)
//                → registry lookup at fire time → handler(&player)
//
// Engine subscriptions are created once per key and player, on the
// first registration of that key. They hold the state weakly, so a
// state popped off the stack silently stops dispatching.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::cell::{Cell, Ref, RefCell};
use std::rc::{Rc, Weak};

use log::{debug, trace};

//=== Internal Dependencies ===============================================

use crate::core::config::MultiplayerConfig;
use crate::core::handlers::{handler, HandlerRegistry, PlayerHandler};
use crate::core::host::{Camera, EngineCallback, HostSystems, RenderableId, SpriteId};
use crate::core::indicator::{DrawTarget, IndicatorRenderer};
use crate::core::input::{ButtonEvent, ControllerEvent, MultiplayerButton};
use crate::core::player::{Player, PlayerSlot, MAX_PLAYERS};

//=== Module Declarations =================================================

pub mod lifecycle;
pub mod stack;

//=== Public API ==========================================================

pub use lifecycle::{LifecycleNotifier, SceneLifecycleEvent};
pub use stack::SceneStateStack;

//=== MultiplayerState ====================================================

/// Players, handlers and indicator settings of one scene.
pub struct MultiplayerState {
    players: [Rc<Player>; MAX_PLAYERS],
    handlers: RefCell<HandlerRegistry>,
    indicators_visible: Cell<bool>,
    indicator_renderable: Cell<Option<RenderableId>>,
    host: HostSystems,
    config: MultiplayerConfig,
}

impl MultiplayerState {
    //--- Construction -----------------------------------------------------

    /// Creates a fresh state with four unbound players and no handlers.
    pub fn new(host: HostSystems, config: MultiplayerConfig) -> Rc<Self> {
        let players = std::array::from_fn(|index| Rc::new(Player::new(index, host.clone())));

        Rc::new(Self {
            players,
            handlers: RefCell::new(HandlerRegistry::new()),
            indicators_visible: Cell::new(false),
            indicator_renderable: Cell::new(None),
            host,
            config,
        })
    }

    //--- Player Lookup ----------------------------------------------------

    /// All four players in index order.
    pub fn players(&self) -> &[Rc<Player>] {
        &self.players
    }

    pub fn player(&self, slot: PlayerSlot) -> Rc<Player> {
        self.players[slot.index()].clone()
    }

    /// Returns the player at 0-based `index`, or `None` outside `0..4`.
    pub fn player_by_index(&self, index: i32) -> Option<Rc<Player>> {
        usize::try_from(index)
            .ok()
            .and_then(|index| self.players.get(index))
            .cloned()
    }

    /// Returns the player at 1-based `slot`, or `None` outside `1..=4`.
    pub fn player_by_slot(&self, slot: i32) -> Option<Rc<Player>> {
        PlayerSlot::try_from(slot).ok().map(|slot| self.player(slot))
    }

    /// Returns the first player bound to `sprite`.
    pub fn player_by_sprite(&self, sprite: SpriteId) -> Option<Rc<Player>> {
        self.players
            .iter()
            .find(|player| player.sprite() == Some(sprite))
            .cloned()
    }

    //--- Handler Registration ---------------------------------------------

    /// Sets the handler for `button`'s `event` edge, for every player.
    pub fn on_button_event<F>(self: &Rc<Self>, button: MultiplayerButton, event: ButtonEvent, f: F)
    where
        F: Fn(&Player) + 'static,
    {
        let registration = self
            .handlers
            .borrow_mut()
            .register_button(button, event, handler(f));

        if registration.needs_subscription() {
            debug!("Subscribing {:?} {:?} for all players", button, event);
            for index in 0..MAX_PLAYERS {
                let callback =
                    self.dispatcher(index, move |registry| registry.button_handler(button, event));
                self.host.controllers.on_button_event(index, button, event, callback);
            }
        }
    }

    /// Sets the handler for a controller-level event, for every player.
    pub fn on_controller_event<F>(self: &Rc<Self>, event: ControllerEvent, f: F)
    where
        F: Fn(&Player) + 'static,
    {
        let registration = self
            .handlers
            .borrow_mut()
            .register_controller_event(event, handler(f));

        if registration.needs_subscription() {
            debug!("Subscribing controller event {:?} for all players", event);
            for index in 0..MAX_PLAYERS {
                let callback =
                    self.dispatcher(index, move |registry| registry.controller_event_handler(event));
                self.host.controllers.on_controller_event(index, event, callback);
            }
        }
    }

    /// Sets the handler run when a player's score reaches `target`.
    pub fn on_reached_score<F>(self: &Rc<Self>, target: i32, f: F)
    where
        F: Fn(&Player) + 'static,
    {
        let registration = self.handlers.borrow_mut().register_score(target, handler(f));

        if registration.needs_subscription() {
            debug!("Subscribing score target {} for all players", target);
            for index in 0..MAX_PLAYERS {
                let callback = self.dispatcher(index, move |registry| registry.score_handler(target));
                self.host.info.on_score(index, target, callback);
            }
        }
    }

    /// Sets the handler run when a player's life reaches zero.
    pub fn on_life_zero<F>(self: &Rc<Self>, f: F)
    where
        F: Fn(&Player) + 'static,
    {
        let registration = self.handlers.borrow_mut().register_life_zero(handler(f));

        if registration.needs_subscription() {
            debug!("Subscribing life zero for all players");
            for index in 0..MAX_PLAYERS {
                let callback = self.dispatcher(index, HandlerRegistry::life_zero_handler);
                self.host.info.on_life_zero(index, callback);
            }
        }
    }

    /// Read access to the handler registry.
    ///
    /// Do not hold the guard across a call that registers handlers.
    pub fn handlers(&self) -> Ref<'_, HandlerRegistry> {
        self.handlers.borrow()
    }

    //--- Indicators -------------------------------------------------------

    /// Shows or hides off-screen indicators.
    ///
    /// The draw callback is registered on the first `true` and stays
    /// registered; later calls only flip the flag it checks each frame.
    pub fn set_player_indicators_visible(self: &Rc<Self>, visible: bool) {
        self.indicators_visible.set(visible);

        if visible && self.indicator_renderable.get().is_none() {
            let state = Rc::downgrade(self);
            let mut renderer = IndicatorRenderer::new(self.config);

            let id = self.host.renderer.create_renderable(
                self.config.indicator_layer(),
                Box::new(move |target: &mut dyn DrawTarget, camera: &Camera| {
                    let Some(state) = state.upgrade() else {
                        return;
                    };
                    if state.indicators_visible.get() {
                        renderer.draw(&state.players, &*state.host.sprites, target, camera);
                    }
                }),
            );

            debug!(
                "Registered indicator renderable {:?} on layer {}",
                id,
                self.config.indicator_layer()
            );
            self.indicator_renderable.set(Some(id));
        }
    }

    pub fn indicators_visible(&self) -> bool {
        self.indicators_visible.get()
    }

    /// Renderable handle, once indicators have been shown.
    pub fn indicator_renderable(&self) -> Option<RenderableId> {
        self.indicator_renderable.get()
    }

    pub fn config(&self) -> &MultiplayerConfig {
        &self.config
    }

    //--- Internal Helpers -------------------------------------------------

    /// Builds an engine callback that resolves the live handler at fire
    /// time and runs it for player `index`.
    fn dispatcher<L>(self: &Rc<Self>, index: usize, lookup: L) -> EngineCallback
    where
        L: Fn(&HandlerRegistry) -> Option<PlayerHandler> + 'static,
    {
        let state: Weak<Self> = Rc::downgrade(self);

        Box::new(move || {
            let Some(state) = state.upgrade() else {
                trace!("Event for player {} ignored: scene state is gone", index + 1);
                return;
            };

            // Release the registry borrow before running game code.
            let live = lookup(&*state.handlers.borrow());
            if let Some(live) = live {
                trace!("Dispatching to player {}", index + 1);
                live(&state.players[index]);
            }
        })
    }
}

impl std::fmt::Debug for MultiplayerState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MultiplayerState")
            .field("players", &self.players)
            .field("handlers", &self.handlers.borrow())
            .field("indicators_visible", &self.indicators_visible.get())
            .field("indicator_renderable", &self.indicator_renderable.get())
            .finish()
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
