// Build-time identity from Cargo.toml, used by GET /version and the poll User-Agent

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub const NAME: &str = env!("CARGO_PKG_NAME");

/// `vram-watcher/<version>`
pub fn user_agent() -> String {
    format!("{NAME}/{VERSION}")
}
