//! Fixed values shared by the live viewer.
//!
//! None of these are user configurable; they mirror what the companion
//! export server and the viewer agree on.

pub mod camera;
pub mod endpoints;
pub mod lighting;
pub mod timing;
