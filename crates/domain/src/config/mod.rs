pub mod errors;
pub mod logging;
pub mod resolution;
pub mod root;
pub mod schemes;
pub mod server;

pub use errors::ConfigError;
pub use logging::LoggingConfig;
pub use resolution::ResolutionConfig;
pub use root::{CliOverrides, Config};
pub use schemes::SchemeConfig;
pub use server::ServerConfig;
