//! Server configuration loaded from the environment.
use std::env;
use std::path::PathBuf;
use std::time::Duration;

const DEFAULT_TICK_INTERVAL_MS: u64 = 500;

#[derive(Clone, Debug)]
pub struct ServerConfig {
    pub content_dir: PathBuf,
    pub save_data_dir: PathBuf,
    pub tick_interval: Duration,
    /// Overrides the world seed from the content's `config.toml`.
    pub world_seed: Option<u64>,
    /// Overrides the starting zone from `game.toml`.
    pub default_zone: Option<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            content_dir: PathBuf::from("./content"),
            save_data_dir: default_save_dir(),
            tick_interval: Duration::from_millis(DEFAULT_TICK_INTERVAL_MS),
            world_seed: None,
            default_zone: None,
        }
    }
}

impl ServerConfig {
    /// Construct configuration from process environment variables.
    ///
    /// Environment variables:
    /// - `CONTENT_DIR` - Definitions directory (default: `./content`)
    /// - `SAVE_DATA_DIR` - Record directory (default: platform data dir)
    /// - `TICK_INTERVAL_MS` - Zone tick period (default: 500)
    /// - `WORLD_SEED` - RNG seed for newly created zones
    /// - `DEFAULT_ZONE` - Zone new and respawning players land in
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(dir) = env::var("CONTENT_DIR") {
            config.content_dir = PathBuf::from(dir);
        }
        if let Ok(dir) = env::var("SAVE_DATA_DIR") {
            config.save_data_dir = PathBuf::from(dir);
        }
        if let Some(ms) = read_env::<u64>("TICK_INTERVAL_MS") {
            config.tick_interval = Duration::from_millis(ms.max(1));
        }
        config.world_seed = read_env::<u64>("WORLD_SEED");
        config.default_zone = env::var("DEFAULT_ZONE").ok().filter(|zone| !zone.is_empty());

        config
    }
}

fn default_save_dir() -> PathBuf {
    directories::ProjectDirs::from("", "", "zone-server")
        .map(|dirs| dirs.data_dir().to_path_buf())
        .unwrap_or_else(|| PathBuf::from("./save_data"))
}

fn read_env<T>(key: &str) -> Option<T>
where
    T: std::str::FromStr,
{
    env::var(key).ok()?.parse().ok()
}
