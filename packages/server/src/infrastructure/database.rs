//! Database connection, schema migration and default data.

use std::{path::Path, str::FromStr};

use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use vibes_shared::time::now_sqlite_datetime;

use crate::{
    domain::{
        ArtistName, DEFAULT_PLAYLIST_ID, NewSong, PlaylistId, Song, SongIdFactory, SongTitle,
        TrackRepository, Username,
    },
    error::ServerError,
};

const MAX_CONNECTIONS: u32 = 5;

/// Username recorded on the starter songs
const SYSTEM_USERNAME: &str = "System";

/// Songs the default playlist starts with: (title, artist, duration, video id)
const STARTER_SONGS: [(&str, &str, &str, &str); 2] = [
    ("Bohemian Rhapsody", "Queen", "5:55", "fJ9rUzIMcZQ"),
    ("Stairway to Heaven", "Led Zeppelin", "8:02", "QkF3oxziUI4"),
];

/// Open a pool for `database_url` and run the migrations.
///
/// File databases (and their parent directory) are created when missing.
/// An in-memory database is pinned to a single connection that never
/// expires, otherwise every pooled connection would see its own empty
/// database.
pub async fn connect(database_url: &str) -> Result<SqlitePool, ServerError> {
    let in_memory = database_url.contains(":memory:") || database_url.contains("mode=memory");

    if !in_memory
        && let Some(path) = database_url.strip_prefix("sqlite:")
        && let Some(parent) = Path::new(path.trim_start_matches("//")).parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)?;
    }

    let options = SqliteConnectOptions::from_str(database_url)?
        .create_if_missing(true)
        .foreign_keys(true);

    let pool_options = if in_memory {
        SqlitePoolOptions::new()
            .max_connections(1)
            .min_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
    } else {
        SqlitePoolOptions::new().max_connections(MAX_CONNECTIONS)
    };

    let pool = pool_options.connect_with(options).await?;

    sqlx::migrate!("./migrations").run(&pool).await?;
    tracing::debug!("Database migrations applied for '{}'", database_url);

    Ok(pool)
}

/// Make sure the default playlist exists before serving traffic.
///
/// Starter songs are inserted only when this call created the playlist and
/// `seed_songs` is set, so restarts never duplicate them.
pub async fn prepare_default_playlist(
    repository: &dyn TrackRepository,
    seed_songs: bool,
) -> Result<(), ServerError> {
    let created = repository.ensure_default_playlist().await?;
    if !created {
        tracing::debug!("Default playlist already present");
        return Ok(());
    }
    tracing::info!("Created default playlist '{}'", DEFAULT_PLAYLIST_ID);

    if !seed_songs {
        return Ok(());
    }

    let playlist_id = PlaylistId::new(DEFAULT_PLAYLIST_ID.to_string())?;
    let added_by = Username::new(SYSTEM_USERNAME.to_string())?;
    for (position, (title, artist, duration, video_id)) in STARTER_SONGS.iter().enumerate() {
        let draft = NewSong {
            title: SongTitle::new(title.to_string())?,
            artist: ArtistName::new(artist.to_string())?,
            duration: Some(duration.to_string()),
            video_id: Some(video_id.to_string()),
            thumbnail: Some(format!("https://img.youtube.com/vi/{video_id}/mqdefault.jpg")),
        };
        let song = Song::new(
            SongIdFactory::generate(),
            playlist_id.clone(),
            draft,
            &added_by,
            position as i64,
            now_sqlite_datetime(),
        );
        repository.insert_song(&song).await?;
    }
    tracing::info!("Seeded default playlist with {} songs", STARTER_SONGS.len());

    Ok(())
}
