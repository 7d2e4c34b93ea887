//=========================================================================
// Handler Registry
//=========================================================================
//
// Idempotent bookkeeping of game handlers shared by all four players.
//
// Architecture:
//   HandlerRegistry
//     ├─ buttons:           (MultiplayerButton, ButtonEvent) → handler
//     ├─ controller_events: ControllerEvent → handler
//     ├─ scores:            target score → handler
//     └─ life_zero:         singleton handler
//
// The registry only stores handlers. Engine subscriptions are created
// by `MultiplayerState` when a registration reports `Registration::New`;
// those subscriptions look the handler up here every time they fire.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::rc::Rc;

//=== Internal Dependencies ===============================================

use crate::core::input::{ButtonEvent, ControllerEvent, MultiplayerButton};
use crate::core::player::Player;

//=== Module Declarations =================================================

mod table;

//=== Public API ==========================================================

pub use table::{HandlerKey, HandlerTable, PlayerHandler, Registration};

//=== HandlerRegistry =====================================================

/// Live handlers of one scene state.
#[derive(Default)]
pub struct HandlerRegistry {
    buttons: HandlerTable<(MultiplayerButton, ButtonEvent)>,
    controller_events: HandlerTable<ControllerEvent>,
    scores: HandlerTable<i32>,
    life_zero: Option<PlayerHandler>,
}

impl HandlerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    //--- Registration -----------------------------------------------------

    pub fn register_button(
        &mut self,
        button: MultiplayerButton,
        event: ButtonEvent,
        handler: PlayerHandler,
    ) -> Registration {
        self.buttons.register((button, event), handler)
    }

    pub fn register_controller_event(
        &mut self,
        event: ControllerEvent,
        handler: PlayerHandler,
    ) -> Registration {
        self.controller_events.register(event, handler)
    }

    pub fn register_score(&mut self, target: i32, handler: PlayerHandler) -> Registration {
        self.scores.register(target, handler)
    }

    /// Replaces the life-zero handler. Only the very first call reports
    /// `Registration::New`.
    pub fn register_life_zero(&mut self, handler: PlayerHandler) -> Registration {
        match self.life_zero.replace(handler) {
            Some(_) => Registration::Replaced,
            None => Registration::New,
        }
    }

    //--- Lookup -----------------------------------------------------------

    pub fn button_handler(
        &self,
        button: MultiplayerButton,
        event: ButtonEvent,
    ) -> Option<PlayerHandler> {
        self.buttons.get(&(button, event))
    }

    pub fn controller_event_handler(&self, event: ControllerEvent) -> Option<PlayerHandler> {
        self.controller_events.get(&event)
    }

    pub fn score_handler(&self, target: i32) -> Option<PlayerHandler> {
        self.scores.get(&target)
    }

    pub fn life_zero_handler(&self) -> Option<PlayerHandler> {
        self.life_zero.clone()
    }

    //--- Introspection ----------------------------------------------------

    /// Number of distinct (button, edge) keys.
    pub fn button_count(&self) -> usize {
        self.buttons.len()
    }

    pub fn controller_event_count(&self) -> usize {
        self.controller_events.len()
    }

    pub fn score_count(&self) -> usize {
        self.scores.len()
    }

    pub fn has_life_zero(&self) -> bool {
        self.life_zero.is_some()
    }
}

impl std::fmt::Debug for HandlerRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HandlerRegistry")
            .field("buttons", &self.buttons.len())
            .field("controller_events", &self.controller_events.len())
            .field("scores", &self.scores.len())
            .field("life_zero", &self.life_zero.is_some())
            .finish()
    }
}

/// Wraps a closure as a [`PlayerHandler`].
pub fn handler<F>(f: F) -> PlayerHandler
where
    F: Fn(&Player) + 'static,
{
    Rc::new(f)
}

//=========================================================================
// Unit Tests
//=========================================================================
