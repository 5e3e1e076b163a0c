//! Ephemeral in-memory stores.
//!
//! Both stores implement the domain's repository traits over plain owned
//! maps. They are never wrapped in locks: the command dispatcher is their
//! only writer.

pub mod playback;
pub mod session;

pub use playback::PlaybackStateTable;
pub use session::SessionRegistry;
