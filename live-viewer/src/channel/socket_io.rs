//! Text framing for Socket.IO v5 carried over Engine.IO v4.
//!
//! Only the subset a websocket-only client needs is handled: the handshake,
//! heartbeats and plain (non-binary) events.

use serde::Deserialize;
use serde_json::Value;
use thiserror::Error;

/// Engine.IO packet type prefix for a Socket.IO message.
const MESSAGE: char = '4';
const DEFAULT_NAMESPACE: &str = "/";

#[derive(Debug, Error, PartialEq)]
pub enum ChannelError {
    #[error("empty frame")]
    Empty,
    #[error("unknown engine packet type {0:?}")]
    UnknownEnginePacket(char),
    #[error("unknown socket packet type {0:?}")]
    UnknownSocketPacket(char),
    #[error("binary packets are not supported")]
    Binary,
    #[error("malformed payload: {0}")]
    Payload(String),
}

/// Handshake sent by the server right after the socket opens.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OpenPayload {
    pub sid: String,
    #[serde(default)]
    pub upgrades: Vec<String>,
    pub ping_interval: u64,
    pub ping_timeout: u64,
    #[serde(default)]
    pub max_payload: Option<u64>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum EnginePacket {
    Open(OpenPayload),
    Close,
    Ping(String),
    Pong(String),
    Message(SocketPacket),
    Upgrade,
    Noop,
}

#[derive(Debug, Clone, PartialEq)]
pub enum SocketPacket {
    Connect {
        namespace: String,
        data: Option<Value>,
    },
    Disconnect {
        namespace: String,
    },
    Event {
        namespace: String,
        ack: Option<u64>,
        name: String,
        args: Vec<Value>,
    },
    Ack {
        namespace: String,
        ack: u64,
        args: Vec<Value>,
    },
    ConnectError {
        namespace: String,
        data: Option<Value>,
    },
}

impl SocketPacket {
    /// Name of the event carried by this packet, if it is one.
    pub fn event_name(&self) -> Option<&str> {
        match self {
            SocketPacket::Event { name, .. } => Some(name),
            _ => None,
        }
    }
}

impl EnginePacket {
    pub fn decode(frame: &str) -> Result<Self, ChannelError> {
        let mut chars = frame.chars();
        let kind = chars.next().ok_or(ChannelError::Empty)?;
        let body = chars.as_str();

        match kind {
            '0' => serde_json::from_str(body)
                .map(EnginePacket::Open)
                .map_err(|err| ChannelError::Payload(err.to_string())),
            '1' => Ok(EnginePacket::Close),
            '2' => Ok(EnginePacket::Ping(body.to_string())),
            '3' => Ok(EnginePacket::Pong(body.to_string())),
            MESSAGE => SocketPacket::decode(body).map(EnginePacket::Message),
            '5' => Ok(EnginePacket::Upgrade),
            '6' => Ok(EnginePacket::Noop),
            other => Err(ChannelError::UnknownEnginePacket(other)),
        }
    }
}

impl SocketPacket {
    pub fn decode(body: &str) -> Result<Self, ChannelError> {
        let mut chars = body.chars();
        let kind = chars.next().ok_or(ChannelError::Empty)?;
        let rest = chars.as_str();

        if matches!(kind, '5' | '6') {
            return Err(ChannelError::Binary);
        }

        let (namespace, rest) = split_namespace(rest);
        let digits = rest.bytes().take_while(u8::is_ascii_digit).count();
        let (ack, data) = rest.split_at(digits);
        let ack = if ack.is_empty() {
            None
        } else {
            Some(
                ack.parse::<u64>()
                    .map_err(|err| ChannelError::Payload(err.to_string()))?,
            )
        };

        let data = if data.is_empty() {
            None
        } else {
            Some(
                serde_json::from_str::<Value>(data)
                    .map_err(|err| ChannelError::Payload(err.to_string()))?,
            )
        };

        match kind {
            '0' => Ok(SocketPacket::Connect { namespace, data }),
            '1' => Ok(SocketPacket::Disconnect { namespace }),
            '2' => {
                let mut args = into_array(data)?.into_iter();
                let name = match args.next() {
                    Some(Value::String(name)) => name,
                    _ => return Err(ChannelError::Payload("event without a name".into())),
                };
                Ok(SocketPacket::Event {
                    namespace,
                    ack,
                    name,
                    args: args.collect(),
                })
            }
            '3' => Ok(SocketPacket::Ack {
                namespace,
                ack: ack.ok_or_else(|| ChannelError::Payload("ack without an id".into()))?,
                args: into_array(data)?,
            }),
            '4' => Ok(SocketPacket::ConnectError { namespace, data }),
            other => Err(ChannelError::UnknownSocketPacket(other)),
        }
    }
}

fn split_namespace(rest: &str) -> (String, &str) {
    if !rest.starts_with('/') {
        return (DEFAULT_NAMESPACE.to_string(), rest);
    }
    match rest.split_once(',') {
        Some((namespace, rest)) => (namespace.to_string(), rest),
        None => (rest.to_string(), ""),
    }
}

fn into_array(data: Option<Value>) -> Result<Vec<Value>, ChannelError> {
    match data {
        Some(Value::Array(values)) => Ok(values),
        _ => Err(ChannelError::Payload("expected a JSON array".into())),
    }
}

/// What the client does in response to one decoded frame.
#[derive(Debug, Clone, PartialEq)]
pub enum ClientAction {
    Reply(String),
    Joined,
    Refused(Option<Value>),
    Event(String),
    Close,
    Nothing,
}

impl EnginePacket {
    pub fn client_action(self) -> ClientAction {
        match self {
            EnginePacket::Open(_) => ClientAction::Reply(encode_connect()),
            EnginePacket::Ping(payload) => ClientAction::Reply(encode_pong(&payload)),
            EnginePacket::Message(SocketPacket::Connect { .. }) => ClientAction::Joined,
            EnginePacket::Message(SocketPacket::ConnectError { data, .. }) => {
                ClientAction::Refused(data)
            }
            EnginePacket::Message(SocketPacket::Event { name, .. }) => ClientAction::Event(name),
            EnginePacket::Close | EnginePacket::Message(SocketPacket::Disconnect { .. }) => {
                ClientAction::Close
            }
            EnginePacket::Message(SocketPacket::Ack { .. })
            | EnginePacket::Pong(_)
            | EnginePacket::Upgrade
            | EnginePacket::Noop => ClientAction::Nothing,
        }
    }
}

/// Join the default namespace.
pub fn encode_connect() -> String {
    format!("{MESSAGE}0")
}

/// Reply to a server ping, echoing its probe payload.
pub fn encode_pong(payload: &str) -> String {
    format!("3{payload}")
}

/// Websocket URL of the Socket.IO endpoint for a page served from `host`.
pub fn socket_url(page_protocol: &str, host: &str, path: &str, query: &str) -> String {
    let scheme = if page_protocol == "https:" { "wss" } else { "ws" };
    format!("{scheme}://{host}{path}?{query}")
}
