mod api_key;
mod cli_config;

pub use api_key::ensure_api_key;
pub use cli_config::CliConfig;
