pub mod defaults;
mod loader;
mod types;

pub use types::{AuthSettings, HttpSettings, LoggingSettings, ServerConfig};
