// Street Cats - Core Library
// The cat registry, plus the HTTP layer when built with the `server` feature

pub mod cats;
pub mod error;

#[cfg(feature = "server")]
pub mod api;
#[cfg(feature = "server")]
pub mod config;

// Re-export commonly used types
pub use cats::{CatRecord, CatRegistry, Deleted, NewCat};
pub use error::{RegistryError, Result};

#[cfg(feature = "server")]
pub use api::{app, router, AppState};
#[cfg(feature = "server")]
pub use config::ServerConfig;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
