/// Endpoint returning `{ "filename": string | null }` for the newest export.
pub const LATEST_MODEL_ENDPOINT: &str = "/latest-model";

/// Route (and on native, directory name) the exported files are served from.
pub const EXPORTS_ROUTE: &str = "blender_exports";

/// Only files with this extension count as exports.
pub const EXPORT_EXTENSION: &str = "glb";

/// Socket.IO handshake path on the companion server.
pub const SOCKET_IO_PATH: &str = "/socket.io/";

/// Query string selecting Engine.IO v4 over a raw websocket.
pub const SOCKET_IO_QUERY: &str = "EIO=4&transport=websocket";

/// Event name pushed by the server after a new export lands.
pub const MODEL_UPDATED_EVENT: &str = "model_updated";

/// Asset root handed to the asset server on web builds. Relative to the page.
pub const WEB_ASSET_ROOT: &str = ".";
