//! SQLite-backed repositories (sqlx).

pub mod track;

pub use track::SqliteTrackRepository;
