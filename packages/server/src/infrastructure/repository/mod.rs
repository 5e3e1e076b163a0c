//! Repository implementations.
//!
//! `sqlite` implements the domain's `TrackRepository`. `inmemory` holds the
//! ephemeral stores that the command dispatcher owns exclusively.

pub mod inmemory;
pub mod sqlite;

pub use inmemory::{PlaybackStateTable, SessionRegistry};
pub use sqlite::SqliteTrackRepository;
