use crate::channel::queue::{ChannelSignal, NotificationQueue};
use crate::channel::socket_io::{ClientAction, EnginePacket, socket_url};
use bevy::prelude::*;
use constants::endpoints::{MODEL_UPDATED_EVENT, SOCKET_IO_PATH, SOCKET_IO_QUERY};
use constants::timing::CHANNEL_RECONNECT_SECS;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{CloseEvent, MessageEvent, WebSocket};

/// An open socket together with the callbacks bound to it. Dropping this
/// releases the callbacks.
struct Connection {
    socket: WebSocket,
    _on_message: Closure<dyn FnMut(MessageEvent)>,
    _on_close: Closure<dyn FnMut(CloseEvent)>,
}

/// Browser websocket to the companion server's Socket.IO endpoint.
///
/// Held as a non-send resource since `WebSocket` is a JS handle.
pub struct SocketConnection {
    connection: Option<Connection>,
    attempted: bool,
    reconnect: Timer,
}

impl Default for SocketConnection {
    fn default() -> Self {
        Self {
            connection: None,
            attempted: false,
            reconnect: Timer::from_seconds(CHANNEL_RECONNECT_SECS, TimerMode::Once),
        }
    }
}

fn page_socket_url() -> Option<String> {
    let location = web_sys::window()?.location();
    let protocol = location.protocol().ok()?;
    let host = location.host().ok()?;
    Some(socket_url(&protocol, &host, SOCKET_IO_PATH, SOCKET_IO_QUERY))
}

fn handle_frame(socket: &WebSocket, queue: &NotificationQueue, frame: &str) {
    let packet = match EnginePacket::decode(frame) {
        Ok(packet) => packet,
        Err(err) => {
            warn!("Skipping socket frame: {}", err);
            return;
        }
    };

    match packet.client_action() {
        ClientAction::Reply(reply) => {
            if let Err(err) = socket.send_with_str(&reply) {
                warn!("Socket send failed: {:?}", err);
            }
        }
        ClientAction::Joined => queue.push(ChannelSignal::Connected),
        ClientAction::Refused(data) => warn!("Socket namespace refused: {:?}", data),
        ClientAction::Event(name) => {
            if name == MODEL_UPDATED_EVENT {
                queue.push(ChannelSignal::ModelUpdated);
            }
        }
        ClientAction::Close => {
            if let Err(err) = socket.close() {
                warn!("Socket close failed: {:?}", err);
            }
        }
        ClientAction::Nothing => {}
    }
}

fn open_connection(queue: &NotificationQueue) -> Option<Connection> {
    let Some(url) = page_socket_url() else {
        error!("No window location, notification channel disabled");
        return None;
    };

    let socket = match WebSocket::new(&url) {
        Ok(socket) => socket,
        Err(err) => {
            warn!("Could not open {}: {:?}", url, err);
            return None;
        }
    };

    let message_socket = socket.clone();
    let message_queue = queue.clone();
    let on_message = Closure::wrap(Box::new(move |event: MessageEvent| {
        if let Some(frame) = event.data().as_string() {
            handle_frame(&message_socket, &message_queue, &frame);
        }
    }) as Box<dyn FnMut(MessageEvent)>);
    socket.set_onmessage(Some(on_message.as_ref().unchecked_ref()));

    let close_queue = queue.clone();
    let on_close = Closure::wrap(Box::new(move |event: CloseEvent| {
        debug!("Socket closed with code {}", event.code());
        close_queue.push(ChannelSignal::Closed);
    }) as Box<dyn FnMut(CloseEvent)>);
    socket.set_onclose(Some(on_close.as_ref().unchecked_ref()));

    info!("Connecting to {}", url);
    Some(Connection {
        socket,
        _on_message: on_message,
        _on_close: on_close,
    })
}

/// Open the socket on the first frame and reopen it a fixed delay after it
/// closes.
pub fn maintain_socket(
    mut connection: NonSendMut<SocketConnection>,
    queue: Res<NotificationQueue>,
    time: Res<Time<Real>>,
) {
    let closed = match &connection.connection {
        None => true,
        Some(open) => open.socket.ready_state() == WebSocket::CLOSED,
    };
    if !closed {
        return;
    }

    if connection.attempted && !connection.reconnect.tick(time.delta()).finished() {
        return;
    }

    connection.attempted = true;
    connection.reconnect.reset();
    connection.connection = open_connection(&queue);
}
