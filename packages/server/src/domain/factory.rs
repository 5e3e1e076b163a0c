//! Domain factories for creating domain entities and value objects.

use rand::Rng;

use super::{
    entity::User,
    value_object::{ConnectionId, SongId, Username},
};

/// Saturation and lightness are fixed so every user color stays readable.
const USER_COLOR_SATURATION: u8 = 70;
const USER_COLOR_LIGHTNESS: u8 = 50;

/// Factory for generating SongId instances.
///
/// Song ids must not be guessable or sequential across playlists, so they are
/// random UUID v4 values.
pub struct SongIdFactory;

impl SongIdFactory {
    /// Generate a new SongId with a random UUID v4.
    pub fn generate() -> SongId {
        SongId::from_uuid(uuid::Uuid::new_v4())
    }
}

/// Factory for generating ConnectionId instances.
pub struct ConnectionIdFactory;

impl ConnectionIdFactory {
    /// Generate a new ConnectionId with a random UUID v4.
    pub fn generate() -> ConnectionId {
        ConnectionId::from_uuid(uuid::Uuid::new_v4())
    }
}

/// Factory for ephemeral Users created at join time.
pub struct UserFactory;

impl UserFactory {
    /// Create a User for `connection_id` using the thread-local RNG.
    ///
    /// A missing or empty `requested_username` is replaced by a `UserNNN`
    /// placeholder. The color hue is random.
    pub fn create(connection_id: ConnectionId, requested_username: Option<String>) -> User {
        Self::create_with_rng(connection_id, requested_username, &mut rand::thread_rng())
    }

    /// Same as [`UserFactory::create`] with an explicit RNG.
    pub fn create_with_rng<R: Rng + ?Sized>(
        connection_id: ConnectionId,
        requested_username: Option<String>,
        rng: &mut R,
    ) -> User {
        let username = requested_username
            .and_then(|name| Username::new(name).ok())
            .unwrap_or_else(|| Self::placeholder_username(rng));
        let color = Self::random_color(rng);
        User::new(connection_id, username, color)
    }

    fn placeholder_username<R: Rng + ?Sized>(rng: &mut R) -> Username {
        Username::placeholder(rng.gen_range(0..1000))
    }

    fn random_color<R: Rng + ?Sized>(rng: &mut R) -> String {
        let hue: u16 = rng.gen_range(0..360);
        format!("hsl({hue}, {USER_COLOR_SATURATION}%, {USER_COLOR_LIGHTNESS}%)")
    }
}
