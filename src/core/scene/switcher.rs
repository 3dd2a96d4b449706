//=========================================================================
// Scene Switcher
//=========================================================================
//
// Channel for scene change requests.
//
// Scenes hold a `SceneSwitcher` and request their successor through it
// while handling input or rendering. The driver owns the matching
// `SceneRequests` and drains it at the tick boundary; when several
// requests arrive in one frame the last one wins.
//
//=========================================================================

//=== External Dependencies ===============================================

use crossbeam_channel::{unbounded, Receiver, Sender};
use log::{debug, warn};

//=== Internal Dependencies ===============================================

use super::Scene;

//=== Construction ========================================================

/// Creates a connected switcher/requests pair.
pub fn scene_channel() -> (SceneSwitcher, SceneRequests) {
    let (sender, receiver) = unbounded();
    (SceneSwitcher { sender }, SceneRequests { receiver })
}

//=== SceneSwitcher =======================================================

/// Cloneable handle for requesting the next scene.
#[derive(Debug, Clone)]
pub struct SceneSwitcher {
    sender: Sender<Box<dyn Scene>>,
}

impl SceneSwitcher {
    /// Queues `scene` to replace the active scene at the next tick.
    pub fn request<T>(&self, scene: T)
    where
        T: Scene + 'static,
    {
        self.request_boxed(Box::new(scene));
    }

    pub fn request_boxed(&self, scene: Box<dyn Scene>) {
        let name = scene.name();
        if self.sender.send(scene).is_err() {
            warn!("Scene driver is gone, dropping request for {}", name);
        } else {
            debug!("Scene change to {} requested", name);
        }
    }
}

//=== SceneRequests =======================================================

/// Receiving end of the scene channel, owned by the driver.
#[derive(Debug)]
pub struct SceneRequests {
    receiver: Receiver<Box<dyn Scene>>,
}

impl SceneRequests {
    /// Drains every pending request and returns the most recent one.
    pub fn take_latest(&self) -> Option<Box<dyn Scene>> {
        let mut latest = None;
        for scene in self.receiver.try_iter() {
            if let Some(replaced) = latest.replace(scene) {
                debug!("Superseded scene request for {}", replaced.name());
            }
        }
        latest
    }

    /// Returns the number of queued requests.
    pub fn len(&self) -> usize {
        self.receiver.len()
    }

    pub fn is_empty(&self) -> bool {
        self.receiver.is_empty()
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::scene::Frame;

    struct Named(&'static str);

    impl Scene for Named {
        fn name(&self) -> &'static str {
            self.0
        }
        fn on_render(&mut self, _frame: &mut Frame<'_>) {}
    }

    #[test]
    fn empty_channel_yields_nothing() {
        let (_switcher, requests) = scene_channel();
        assert!(requests.is_empty());
        assert!(requests.take_latest().is_none());
    }

    #[test]
    fn last_request_wins() {
        let (switcher, requests) = scene_channel();
        switcher.request(Named("first"));
        switcher.clone().request(Named("second"));
        assert_eq!(requests.len(), 2);

        let scene = requests.take_latest().expect("a request was queued");
        assert_eq!(scene.name(), "second");
        assert!(requests.is_empty());
    }

    #[test]
    fn request_after_driver_dropped_does_not_panic() {
        let (switcher, requests) = scene_channel();
        drop(requests);
        switcher.request(Named("orphan"));
    }
}
