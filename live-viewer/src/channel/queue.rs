use crate::sync::schedule::ModelUpdated;
use bevy::prelude::*;
use std::sync::{Arc, Mutex};

/// What a transport can report back to the ECS world.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChannelSignal {
    Connected,
    ModelUpdated,
    Closed,
}

/// Signals pushed from transport callbacks, drained once per frame.
#[derive(Resource, Clone, Default)]
pub struct NotificationQueue(pub Arc<Mutex<Vec<ChannelSignal>>>);

impl NotificationQueue {
    pub fn push(&self, signal: ChannelSignal) {
        if let Ok(mut queue) = self.0.lock() {
            queue.push(signal);
        }
    }

    pub fn take(&self) -> Vec<ChannelSignal> {
        match self.0.lock() {
            Ok(mut queue) => std::mem::take(&mut *queue),
            Err(_) => Vec::new(),
        }
    }
}

/// Connection status as last reported by the transport.
#[derive(Resource, Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ChannelStatus {
    pub connected: bool,
}

pub fn drain_notifications(
    queue: Res<NotificationQueue>,
    mut status: ResMut<ChannelStatus>,
    mut updates: EventWriter<ModelUpdated>,
) {
    for signal in queue.take() {
        match signal {
            ChannelSignal::Connected => {
                info!("Notification channel connected");
                status.connected = true;
            }
            ChannelSignal::Closed => {
                if status.connected {
                    warn!("Notification channel closed");
                }
                status.connected = false;
            }
            ChannelSignal::ModelUpdated => {
                updates.write(ModelUpdated);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn channel_app() -> App {
        let mut app = App::new();
        app.add_plugins(MinimalPlugins)
            .init_resource::<NotificationQueue>()
            .init_resource::<ChannelStatus>()
            .add_event::<ModelUpdated>()
            .add_systems(Update, drain_notifications);
        app
    }

    #[test]
    fn queued_updates_become_events() {
        let mut app = channel_app();
        let queue = app.world().resource::<NotificationQueue>().clone();
        queue.push(ChannelSignal::Connected);
        queue.push(ChannelSignal::ModelUpdated);
        queue.push(ChannelSignal::ModelUpdated);

        app.update();

        assert_eq!(app.world().resource::<Events<ModelUpdated>>().len(), 2);
        assert!(app.world().resource::<ChannelStatus>().connected);
        assert!(queue.take().is_empty());
    }

    #[test]
    fn close_clears_connected_flag() {
        let mut app = channel_app();
        let queue = app.world().resource::<NotificationQueue>().clone();
        queue.push(ChannelSignal::Connected);
        app.update();
        queue.push(ChannelSignal::Closed);
        app.update();

        assert!(!app.world().resource::<ChannelStatus>().connected);
    }
}
