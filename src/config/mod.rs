#[cfg(feature = "cli")]
pub mod cli;
pub mod draft_file;
pub mod toml_config;

#[cfg(feature = "cli")]
pub use cli::{CliConfig, Command};
pub use draft_file::DraftFile;
pub use toml_config::{IntakeMode, PortalConfig};
