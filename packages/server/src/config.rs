//! Server configuration.
//!
//! The binary parses [`ServerArgs`] (flags or `VIBES_*` environment
//! variables) and hands the resulting [`ServerConfig`] to the library.

use clap::Parser;

/// Command line arguments of `vibes-server`
#[derive(Debug, Clone, Parser)]
#[command(name = "vibes-server", version, about = "Realtime collaborative playlist server")]
pub struct ServerArgs {
    /// Address to bind
    #[arg(long, env = "VIBES_HOST", default_value = "127.0.0.1")]
    pub host: String,

    /// Port to listen on
    #[arg(short, long, env = "VIBES_PORT", default_value_t = 4201)]
    pub port: u16,

    /// SQLite database URL
    #[arg(long, env = "VIBES_DATABASE_URL", default_value = "sqlite:vibes.db")]
    pub database_url: String,

    /// Default log level when RUST_LOG is not set
    #[arg(long, env = "VIBES_LOG_LEVEL", default_value = "info")]
    pub log_level: String,

    /// Do not add starter songs when the default playlist is created
    #[arg(long, env = "VIBES_NO_SEED")]
    pub no_seed: bool,
}

/// Runtime configuration of the server
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub database_url: String,
    /// Insert the starter songs when the default playlist is first created
    pub seed_default_songs: bool,
}

impl ServerConfig {
    /// `host:port` to bind
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 4201,
            database_url: "sqlite:vibes.db".to_string(),
            seed_default_songs: true,
        }
    }
}

impl From<ServerArgs> for ServerConfig {
    fn from(args: ServerArgs) -> Self {
        Self {
            host: args.host,
            port: args.port,
            database_url: args.database_url,
            seed_default_songs: !args.no_seed,
        }
    }
}
