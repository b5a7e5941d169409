/// Delay between an update notification and the reload it triggers, giving
/// the server time to finish writing the file.
pub const RELOAD_DEBOUNCE_SECS: f32 = 1.0;

/// Minimum spacing between two update signals from the export watcher.
pub const WATCHER_DEBOUNCE_SECS: f32 = 0.5;

/// Wait before reopening a closed notification socket.
pub const CHANNEL_RECONNECT_SECS: f32 = 2.0;
