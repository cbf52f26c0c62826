// Library for the binary and tests to access modules

pub mod color;
pub mod config;
pub mod extension;
pub mod fetcher;
pub mod host;
pub mod models;
pub mod routes;
pub mod status_repo;
pub mod version;
pub mod watcher;
