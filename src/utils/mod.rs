pub mod identity;
pub mod logging;
pub mod toml_config;
