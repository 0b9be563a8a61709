//! Server configuration from command-line flags and environment variables.

use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;

/// Mahasiswa server.
#[derive(Parser, Debug, Clone)]
#[command(name = "mahasiswa", about = "Mahasiswa student record server")]
pub struct Config {
    /// Listen address.
    #[arg(long, env = "MAHASISWA_LISTEN", default_value = "0.0.0.0:3000")]
    pub listen: String,

    /// JSON snapshot file backing the document store. In-memory when unset.
    #[arg(long, env = "MAHASISWA_DATA_FILE")]
    pub data_file: Option<PathBuf>,

    /// Lifetime of an unread flash notice, in milliseconds.
    #[arg(long, env = "MAHASISWA_FLASH_TTL_MS", default_value_t = 6000)]
    pub flash_ttl_ms: u64,

    /// Emit logs as JSON lines.
    #[arg(long, env = "MAHASISWA_LOG_JSON")]
    pub log_json: bool,
}

impl Config {
    pub fn flash_ttl(&self) -> Duration {
        Duration::from_millis(self.flash_ttl_ms)
    }
}
