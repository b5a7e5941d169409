//! Push notifications that a new export is available.
//!
//! Web builds hold a Socket.IO connection to the companion server and listen
//! for `model_updated`. Native builds have no server to listen to, so they
//! put a filesystem watcher on the exports directory. Both transports feed
//! the same [`queue::NotificationQueue`], which is drained into
//! `ModelUpdated` events once per frame.

#[cfg(not(target_arch = "wasm32"))]
mod local;
pub mod queue;
pub mod socket_io;
#[cfg(target_arch = "wasm32")]
mod web;

use bevy::prelude::*;
use queue::{ChannelStatus, NotificationQueue, drain_notifications};

pub struct NotificationChannelPlugin;

impl Plugin for NotificationChannelPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<NotificationQueue>()
            .init_resource::<ChannelStatus>()
            .add_systems(Update, drain_notifications);

        #[cfg(target_arch = "wasm32")]
        app.insert_non_send_resource(web::SocketConnection::default())
            .add_systems(Update, web::maintain_socket.before(drain_notifications));

        #[cfg(not(target_arch = "wasm32"))]
        app.add_systems(Startup, local::start_export_watcher);
    }
}
