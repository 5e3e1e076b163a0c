//! SQLite Track Store implementation.
//!
//! Implements the domain's `TrackRepository` over the `playlists` and
//! `songs` tables. Rows are read into `FromRow` structs first and then
//! converted into domain models. Stored rows are trusted as they are: the
//! title/artist checks apply to client input only, never to reads.

use async_trait::async_trait;
use sqlx::{FromRow, SqlitePool};
use vibes_shared::time::now_sqlite_datetime;

use crate::domain::{
    ArtistName, DEFAULT_PLAYLIST_ID, DEFAULT_PLAYLIST_NAME, Playlist, PlaylistId, RepositoryError,
    Song, SongId, SongTitle, TrackRepository,
};

#[derive(Debug, FromRow)]
struct PlaylistRow {
    name: String,
    created_at: Option<String>,
}

impl PlaylistRow {
    fn into_playlist(self, id: &PlaylistId) -> Playlist {
        Playlist::new(id.clone(), self.name, self.created_at.unwrap_or_default())
    }
}

#[derive(Debug, FromRow)]
struct SongRow {
    id: String,
    title: String,
    artist: String,
    duration: Option<String>,
    video_id: Option<String>,
    thumbnail: Option<String>,
    added_by: Option<String>,
    position: Option<i64>,
    created_at: Option<String>,
}

impl SongRow {
    fn into_song(self, playlist_id: &PlaylistId) -> Song {
        Song {
            id: SongId::new(self.id),
            playlist_id: playlist_id.clone(),
            title: SongTitle::from_stored(self.title),
            artist: ArtistName::from_stored(self.artist),
            duration: self.duration,
            video_id: self.video_id,
            thumbnail: self.thumbnail,
            added_by: self.added_by.unwrap_or_default(),
            position: self.position.unwrap_or_default(),
            created_at: self.created_at.unwrap_or_default(),
        }
    }
}

fn storage(e: sqlx::Error) -> RepositoryError {
    RepositoryError::Storage(e.to_string())
}

/// `TrackRepository` over a SQLite connection pool
#[derive(Clone)]
pub struct SqliteTrackRepository {
    pool: SqlitePool,
}

impl SqliteTrackRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl TrackRepository for SqliteTrackRepository {
    async fn ensure_default_playlist(&self) -> Result<bool, RepositoryError> {
        let result =
            sqlx::query("INSERT OR IGNORE INTO playlists (id, name, created_at) VALUES (?, ?, ?)")
                .bind(DEFAULT_PLAYLIST_ID)
                .bind(DEFAULT_PLAYLIST_NAME)
                .bind(now_sqlite_datetime())
                .execute(&self.pool)
                .await
                .map_err(storage)?;

        Ok(result.rows_affected() == 1)
    }

    async fn get_playlist(&self, id: &PlaylistId) -> Result<Option<Playlist>, RepositoryError> {
        let row = sqlx::query_as::<_, PlaylistRow>(
            "SELECT name, created_at FROM playlists WHERE id = ?",
        )
        .bind(id.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(storage)?;

        Ok(row.map(|row| row.into_playlist(id)))
    }

    async fn list_songs(&self, playlist_id: &PlaylistId) -> Result<Vec<Song>, RepositoryError> {
        let rows = sqlx::query_as::<_, SongRow>(
            r#"
            SELECT id, title, artist, duration, video_id, thumbnail,
                   added_by, position, created_at
            FROM songs
            WHERE playlist_id = ?
            ORDER BY position ASC, created_at ASC, id ASC
            "#,
        )
        .bind(playlist_id.as_str())
        .fetch_all(&self.pool)
        .await
        .map_err(storage)?;

        Ok(rows
            .into_iter()
            .map(|row| row.into_song(playlist_id))
            .collect())
    }

    async fn count_songs(&self, playlist_id: &PlaylistId) -> Result<i64, RepositoryError> {
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM songs WHERE playlist_id = ?")
            .bind(playlist_id.as_str())
            .fetch_one(&self.pool)
            .await
            .map_err(storage)
    }

    async fn insert_song(&self, song: &Song) -> Result<(), RepositoryError> {
        sqlx::query(
            r#"
            INSERT INTO songs
                (id, playlist_id, title, artist, duration, video_id, thumbnail,
                 added_by, position, created_at)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(song.id.as_str())
        .bind(song.playlist_id.as_str())
        .bind(song.title.as_str())
        .bind(song.artist.as_str())
        .bind(song.duration.as_deref())
        .bind(song.video_id.as_deref())
        .bind(song.thumbnail.as_deref())
        .bind(&song.added_by)
        .bind(song.position)
        .bind(&song.created_at)
        .execute(&self.pool)
        .await
        .map_err(storage)?;

        Ok(())
    }

    async fn delete_song(
        &self,
        song_id: &SongId,
        playlist_id: &PlaylistId,
    ) -> Result<u64, RepositoryError> {
        let result = sqlx::query("DELETE FROM songs WHERE id = ? AND playlist_id = ?")
            .bind(song_id.as_str())
            .bind(playlist_id.as_str())
            .execute(&self.pool)
            .await
            .map_err(storage)?;

        Ok(result.rows_affected())
    }
}
