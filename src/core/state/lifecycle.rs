//=========================================================================
// Scene Lifecycle Bridge
//=========================================================================
//
// Carries scene push/pop notifications from the host to the state stack.
//
// Architecture:
//   Host (any thread) → LifecycleNotifier → channel → LifecycleReceiver
//                                                    → SceneStateStack
//
// The notifier is `Send` and can be cloned freely; the receiver stays on
// the logic thread and is drained by the stack before every access.
//
//=========================================================================

//=== External Dependencies ===============================================

use crossbeam_channel::{unbounded, Receiver, Sender, TryRecvError};
use log::trace;

//=== SceneLifecycleEvent =================================================

/// Scene stack change reported by the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SceneLifecycleEvent {
    Pushed,
    Popped,
}

//=== LifecycleNotifier ===================================================

/// Host-side handle used to report scene pushes and pops.
#[derive(Debug, Clone)]
pub struct LifecycleNotifier {
    sender: Sender<SceneLifecycleEvent>,
}

impl LifecycleNotifier {
    /// Reports that the host pushed a scene.
    ///
    /// Returns `false` once the receiving stack is gone.
    pub fn notify_push(&self) -> bool {
        self.send(SceneLifecycleEvent::Pushed)
    }

    /// Reports that the host popped a scene.
    ///
    /// Returns `false` once the receiving stack is gone.
    pub fn notify_pop(&self) -> bool {
        self.send(SceneLifecycleEvent::Popped)
    }

    fn send(&self, event: SceneLifecycleEvent) -> bool {
        match self.sender.send(event) {
            Ok(()) => true,
            Err(_) => {
                trace!("Scene {:?} not delivered: state stack no longer listening", event);
                false
            }
        }
    }
}

//=== LifecycleReceiver ===================================================

/// Stack-side end of the lifecycle channel.
#[derive(Debug)]
pub(crate) struct LifecycleReceiver {
    receiver: Receiver<SceneLifecycleEvent>,
}

impl LifecycleReceiver {
    /// Returns every pending notification, oldest first.
    pub(crate) fn drain(&self) -> Vec<SceneLifecycleEvent> {
        let mut events = Vec::new();

        loop {
            match self.receiver.try_recv() {
                Ok(event) => events.push(event),
                Err(TryRecvError::Empty) | Err(TryRecvError::Disconnected) => break,
            }
        }

        if !events.is_empty() {
            trace!("Drained {} scene lifecycle event(s)", events.len());
        }
        events
    }
}

/// Creates a connected notifier/receiver pair.
pub(crate) fn channel() -> (LifecycleNotifier, LifecycleReceiver) {
    let (sender, receiver) = unbounded();
    (LifecycleNotifier { sender }, LifecycleReceiver { receiver })
}

//=========================================================================
// Unit Tests
//=========================================================================
