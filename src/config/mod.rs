//! Configuration module that handles all application settings

mod cli;
mod env;
mod face;

pub use cli::CliArgs;
pub use env::{load_env_vars, EnvVars};
pub use face::FaceConfig;

/// Initialize configuration from all sources (CLI, environment, etc.)
pub fn init_config() -> FaceConfig {
    // Parse CLI args first
    let cli_args = CliArgs::parse();

    // Load environment variables
    let env_vars = load_env_vars();

    // Environment variables take precedence over CLI arguments
    FaceConfig::new(cli_args, env_vars)
}
