#![deny(warnings)]
pub mod error;
pub mod game;
pub mod model;

pub use error::RulesError;

pub struct AppInfo;

impl AppInfo {
    pub const fn name() -> &'static str {
        "hearts"
    }

    pub const fn version() -> &'static str {
        env!("CARGO_PKG_VERSION")
    }
}
