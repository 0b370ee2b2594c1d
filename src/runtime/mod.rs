//! # Runtime Module
//!
//! Startup, the refresh loop and its zone updates, and the shutdown sequence.

pub mod initialization;
pub mod lifecycle;
pub mod refresh_loop;
pub mod zone_updater;

#[cfg(test)]
pub(crate) mod test_support;

pub use initialization::*;
pub use lifecycle::*;
pub use refresh_loop::RefreshLoop;
pub use zone_updater::{update_zone, ZoneUpdate};
