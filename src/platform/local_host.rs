//=========================================================================
// Local Host
//=========================================================================
//
// In-process engine implementing every collaborator contract.
//
// Architecture:
//   LocalHost
//     ├─ scenes: Vec<SceneFrame>      (subscriptions + renderables per scene)
//     ├─ players: [PlayerRecord; 4]   (held buttons, score, life, movement)
//     ├─ sprites: SpriteId → SpriteSnapshot
//     └─ lifecycle: Vec<LifecycleNotifier>
//
// Subscriptions and renderables belong to the scene that was on top
// when they were created, and only the top scene's ones fire. Popping a
// scene drops them. Scores, lives and sprites are process-wide.
//
// Callbacks are cloned out and run after every internal borrow is
// released, so they may call back into the host. A callback that is
// already running is skipped.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::cell::{Cell, RefCell};
use std::collections::{HashMap, HashSet};
use std::rc::Rc;

use log::{debug, trace, warn};

//=== Internal Dependencies ===============================================

use crate::core::host::{
    Camera, ControllerSystem, EngineCallback, InfoSystem, RenderCallback, RenderSystem,
    RenderableId, SceneLifecycle, SpriteId, SpriteSnapshot, SpriteSystem,
};
use crate::core::indicator::DrawTarget;
use crate::core::input::{ButtonEvent, ControllerEvent, MultiplayerButton};
use crate::core::player::MAX_PLAYERS;
use crate::core::state::LifecycleNotifier;

//=== Constants ===========================================================

/// Speed used by `move_sprite` when a velocity is omitted.
pub const DEFAULT_MOVE_SPEED: i32 = 100;

/// Starting life of every player.
pub const DEFAULT_LIFE: i32 = 3;

//=== SpriteMovement ======================================================

/// Directional movement binding recorded by `move_sprite`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SpriteMovement {
    pub sprite: SpriteId,
    pub vx: i32,
    pub vy: i32,
}

//=== Internal Records ====================================================

type SharedCallback = Rc<RefCell<EngineCallback>>;

struct ScoreSubscription {
    player: usize,
    target: i32,
    callback: SharedCallback,
}

struct Renderable {
    id: RenderableId,
    layer: i32,
    callback: Rc<RefCell<RenderCallback>>,
}

#[derive(Default)]
struct SceneFrame {
    buttons: HashMap<(usize, MultiplayerButton, ButtonEvent), Vec<SharedCallback>>,
    controller_events: HashMap<(usize, ControllerEvent), Vec<SharedCallback>>,
    scores: Vec<ScoreSubscription>,
    life_zero: HashMap<usize, Vec<SharedCallback>>,
    renderables: Vec<Renderable>,
}

impl SceneFrame {
    fn subscription_count(&self) -> usize {
        self.buttons.values().map(Vec::len).sum::<usize>()
            + self.controller_events.values().map(Vec::len).sum::<usize>()
            + self.scores.len()
            + self.life_zero.values().map(Vec::len).sum::<usize>()
    }
}

struct PlayerRecord {
    held: HashSet<MultiplayerButton>,
    score: i32,
    life: i32,
    movement: Option<SpriteMovement>,
}

impl Default for PlayerRecord {
    fn default() -> Self {
        Self {
            held: HashSet::new(),
            score: 0,
            life: DEFAULT_LIFE,
            movement: None,
        }
    }
}

//=== LocalHost ===========================================================

/// Single-threaded engine host for games and tests.
pub struct LocalHost {
    scenes: RefCell<Vec<SceneFrame>>,
    players: RefCell<[PlayerRecord; MAX_PLAYERS]>,
    sprites: RefCell<HashMap<SpriteId, SpriteSnapshot>>,
    lifecycle: RefCell<Vec<LifecycleNotifier>>,
    next_sprite: Cell<u32>,
    next_renderable: Cell<u32>,
}

impl LocalHost {
    pub fn new() -> Self {
        Self {
            scenes: RefCell::new(vec![SceneFrame::default()]),
            players: RefCell::new(Default::default()),
            sprites: RefCell::new(HashMap::new()),
            lifecycle: RefCell::new(Vec::new()),
            next_sprite: Cell::new(1),
            next_renderable: Cell::new(1),
        }
    }

    //--- Controller Input -------------------------------------------------

    /// Presses `button` for `player`, firing `Pressed` and the
    /// `AnyButtonPressed` controller event if it was not already held.
    pub fn press(&self, player: usize, button: MultiplayerButton) {
        if self.update_player(player, |record| record.held.insert(button)) == Some(true) {
            self.dispatch_button(player, button, ButtonEvent::Pressed);
            self.fire_controller_event(player, ControllerEvent::AnyButtonPressed);
        }
    }

    /// Releases `button` for `player`, firing `Released` if it was held.
    pub fn release(&self, player: usize, button: MultiplayerButton) {
        if self.update_player(player, |record| record.held.remove(&button)) == Some(true) {
            self.dispatch_button(player, button, ButtonEvent::Released);
        }
    }

    /// Fires `Repeated` for a held button.
    pub fn repeat(&self, player: usize, button: MultiplayerButton) {
        if self.is_pressed(player, button) {
            self.dispatch_button(player, button, ButtonEvent::Repeated);
        } else {
            trace!("Repeat ignored: player {} is not holding {:?}", player + 1, button);
        }
    }

    pub fn fire_controller_event(&self, player: usize, event: ControllerEvent) {
        let callbacks = self.top_frame(|frame| {
            frame
                .controller_events
                .get(&(player, event))
                .cloned()
                .unwrap_or_default()
        });
        run_callbacks(callbacks);
    }

    /// Last movement binding recorded for `player`.
    pub fn movement(&self, player: usize) -> Option<SpriteMovement> {
        self.players
            .borrow()
            .get(player)
            .and_then(|record| record.movement)
    }

    //--- Sprites ----------------------------------------------------------

    pub fn spawn_sprite(&self, snapshot: SpriteSnapshot) -> SpriteId {
        let id = SpriteId(self.next_sprite.get());
        self.next_sprite.set(id.0 + 1);
        self.sprites.borrow_mut().insert(id, snapshot);
        trace!("Spawned sprite {:?}", id);
        id
    }

    /// Replaces a sprite's snapshot. Returns `false` for unknown sprites.
    pub fn update_sprite(&self, id: SpriteId, snapshot: SpriteSnapshot) -> bool {
        match self.sprites.borrow_mut().get_mut(&id) {
            Some(current) => {
                *current = snapshot;
                true
            }
            None => false,
        }
    }

    /// Marks a sprite destroyed. It stays queryable until removed.
    pub fn destroy_sprite(&self, id: SpriteId) -> bool {
        match self.sprites.borrow_mut().get_mut(&id) {
            Some(current) => {
                current.flags.destroyed = true;
                true
            }
            None => false,
        }
    }

    /// Forgets a sprite entirely.
    pub fn remove_sprite(&self, id: SpriteId) -> bool {
        self.sprites.borrow_mut().remove(&id).is_some()
    }

    //--- Rendering --------------------------------------------------------

    /// Runs the top scene's renderables in ascending layer order.
    ///
    /// Returns the number of callbacks run.
    pub fn render_frame(&self, target: &mut dyn DrawTarget, camera: &Camera) -> usize {
        let mut renderables: Vec<(i32, RenderableId, Rc<RefCell<RenderCallback>>)> =
            self.top_frame(|frame| {
                frame
                    .renderables
                    .iter()
                    .map(|r| (r.layer, r.id, r.callback.clone()))
                    .collect()
            });
        renderables.sort_by_key(|(layer, _, _)| *layer);

        let mut ran = 0;
        for (_, id, callback) in renderables {
            match callback.try_borrow_mut() {
                Ok(mut callback) => {
                    (*callback)(&mut *target, camera);
                    ran += 1;
                }
                Err(_) => warn!("Skipping re-entered renderable {:?}", id),
            }
        }
        ran
    }

    //--- Scene Lifecycle --------------------------------------------------

    /// Pushes a scene and notifies lifecycle subscribers.
    pub fn push_scene(&self) {
        let depth = {
            let mut scenes = self.scenes.borrow_mut();
            scenes.push(SceneFrame::default());
            scenes.len()
        };
        debug!("Host pushed scene, depth {}", depth);

        self.notify(LifecycleNotifier::notify_push);
    }

    /// Pops the top scene, dropping its subscriptions, and notifies
    /// lifecycle subscribers. The last scene is replaced by an empty one.
    pub fn pop_scene(&self) {
        let popped = {
            let mut scenes = self.scenes.borrow_mut();
            let popped = scenes.pop();
            if scenes.is_empty() {
                scenes.push(SceneFrame::default());
            }
            popped
        };
        drop(popped);
        debug!("Host popped scene, depth {}", self.scene_depth());

        self.notify(LifecycleNotifier::notify_pop);
    }

    pub fn scene_depth(&self) -> usize {
        self.scenes.borrow().len()
    }

    //--- Introspection ----------------------------------------------------

    /// Engine event subscriptions held by the top scene.
    pub fn subscription_count(&self) -> usize {
        self.top_frame(SceneFrame::subscription_count)
    }

    /// Renderables registered in the top scene.
    pub fn renderable_count(&self) -> usize {
        self.top_frame(|frame| frame.renderables.len())
    }

    pub fn lifecycle_subscriber_count(&self) -> usize {
        self.lifecycle.borrow().len()
    }

    //--- Internal Helpers -------------------------------------------------

    fn top_frame<R: Default>(&self, f: impl FnOnce(&SceneFrame) -> R) -> R {
        self.scenes.borrow().last().map(f).unwrap_or_default()
    }

    fn top_frame_mut(&self, f: impl FnOnce(&mut SceneFrame)) {
        if let Some(frame) = self.scenes.borrow_mut().last_mut() {
            f(frame);
        }
    }

    /// Applies `f` to `player`'s record. `None` for an invalid player.
    fn update_player<R>(&self, player: usize, f: impl FnOnce(&mut PlayerRecord) -> R) -> Option<R> {
        let mut players = self.players.borrow_mut();
        match players.get_mut(player) {
            Some(record) => Some(f(record)),
            None => {
                warn!("Ignoring input for invalid player index {}", player);
                None
            }
        }
    }

    fn read_player<R>(&self, player: usize, f: impl FnOnce(&PlayerRecord) -> R) -> Option<R> {
        self.players.borrow().get(player).map(f)
    }

    fn dispatch_button(&self, player: usize, button: MultiplayerButton, event: ButtonEvent) {
        let callbacks = self.top_frame(|frame| {
            frame
                .buttons
                .get(&(player, button, event))
                .cloned()
                .unwrap_or_default()
        });
        run_callbacks(callbacks);
    }

    /// Sends a lifecycle notification to every subscriber and forgets
    /// the ones whose stack is gone.
    fn notify(&self, send: fn(&LifecycleNotifier) -> bool) {
        let notifiers = self.lifecycle.borrow().clone();
        let live: Vec<LifecycleNotifier> = notifiers.into_iter().filter(|n| send(n)).collect();

        let mut lifecycle = self.lifecycle.borrow_mut();
        let pruned = lifecycle.len().saturating_sub(live.len());
        if pruned > 0 {
            debug!("Dropped {} lifecycle subscriber(s) no longer listening", pruned);
        }
        *lifecycle = live;
    }
}

impl Default for LocalHost {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for LocalHost {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LocalHost")
            .field("scene_depth", &self.scene_depth())
            .field("subscriptions", &self.subscription_count())
            .field("sprites", &self.sprites.borrow().len())
            .finish_non_exhaustive()
    }
}

fn run_callbacks(callbacks: Vec<SharedCallback>) {
    for callback in callbacks {
        match callback.try_borrow_mut() {
            Ok(mut callback) => (*callback)(),
            Err(_) => warn!("Skipping re-entered engine callback"),
        }
    }
}

//=== ControllerSystem ====================================================

impl ControllerSystem for LocalHost {
    fn on_button_event(
        &self,
        player: usize,
        button: MultiplayerButton,
        event: ButtonEvent,
        callback: EngineCallback,
    ) {
        self.top_frame_mut(|frame| {
            frame
                .buttons
                .entry((player, button, event))
                .or_default()
                .push(Rc::new(RefCell::new(callback)));
        });
    }

    fn on_controller_event(&self, player: usize, event: ControllerEvent, callback: EngineCallback) {
        self.top_frame_mut(|frame| {
            frame
                .controller_events
                .entry((player, event))
                .or_default()
                .push(Rc::new(RefCell::new(callback)));
        });
    }

    fn is_pressed(&self, player: usize, button: MultiplayerButton) -> bool {
        self.read_player(player, |record| record.held.contains(&button))
            .unwrap_or(false)
    }

    fn move_sprite(&self, player: usize, sprite: SpriteId, vx: Option<i32>, vy: Option<i32>) {
        let movement = SpriteMovement {
            sprite,
            vx: vx.unwrap_or(DEFAULT_MOVE_SPEED),
            vy: vy.unwrap_or(DEFAULT_MOVE_SPEED),
        };
        trace!("Player {} moves {:?}", player + 1, movement);
        self.update_player(player, |record| record.movement = Some(movement));
    }
}

//=== InfoSystem ==========================================================

impl InfoSystem for LocalHost {
    fn score(&self, player: usize) -> i32 {
        self.read_player(player, |record| record.score).unwrap_or(0)
    }

    /// Fires score subscribers whose target is crossed upward.
    fn set_score(&self, player: usize, value: i32) {
        let previous = self.update_player(player, |record| std::mem::replace(&mut record.score, value));
        let Some(previous) = previous else {
            return;
        };

        let callbacks: Vec<SharedCallback> = self.top_frame(|frame| {
            frame
                .scores
                .iter()
                .filter(|sub| sub.player == player && previous < sub.target && value >= sub.target)
                .map(|sub| sub.callback.clone())
                .collect()
        });
        run_callbacks(callbacks);
    }

    fn life(&self, player: usize) -> i32 {
        self.read_player(player, |record| record.life).unwrap_or(0)
    }

    /// Fires life-zero subscribers when life drops to zero or below.
    fn set_life(&self, player: usize, value: i32) {
        let previous = self.update_player(player, |record| std::mem::replace(&mut record.life, value));
        let Some(previous) = previous else {
            return;
        };

        if previous > 0 && value <= 0 {
            let callbacks = self.top_frame(|frame| {
                frame.life_zero.get(&player).cloned().unwrap_or_default()
            });
            run_callbacks(callbacks);
        }
    }

    fn on_score(&self, player: usize, target: i32, callback: EngineCallback) {
        self.top_frame_mut(|frame| {
            frame.scores.push(ScoreSubscription {
                player,
                target,
                callback: Rc::new(RefCell::new(callback)),
            });
        });
    }

    fn on_life_zero(&self, player: usize, callback: EngineCallback) {
        self.top_frame_mut(|frame| {
            frame
                .life_zero
                .entry(player)
                .or_default()
                .push(Rc::new(RefCell::new(callback)));
        });
    }
}

//=== RenderSystem ========================================================

impl RenderSystem for LocalHost {
    fn create_renderable(&self, layer: i32, callback: RenderCallback) -> RenderableId {
        let id = RenderableId(self.next_renderable.get());
        self.next_renderable.set(id.0 + 1);

        self.top_frame_mut(|frame| {
            frame.renderables.push(Renderable {
                id,
                layer,
                callback: Rc::new(RefCell::new(callback)),
            });
        });
        debug!("Created renderable {:?} on layer {}", id, layer);
        id
    }
}

//=== SpriteSystem ========================================================

impl SpriteSystem for LocalHost {
    fn sprite(&self, id: SpriteId) -> Option<SpriteSnapshot> {
        self.sprites.borrow().get(&id).copied()
    }
}

//=== SceneLifecycle ======================================================

impl SceneLifecycle for LocalHost {
    fn subscribe(&self, notifier: LifecycleNotifier) {
        self.lifecycle.borrow_mut().push(notifier);
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
