//! Scene contents owned by the host: lights, the status overlay and the
//! slot holding the currently displayed model.

/// Background colour, ambient light and the two directional lights.
pub mod lighting;

/// The single displayed model and the framing applied once it is ready.
pub mod model;

/// Top-right text overlay describing the last successful load.
pub mod overlay;
