//! Watch face configuration structure and methods

use super::{CliArgs, EnvVars};
use std::path::PathBuf;

/// Configuration structure that stores all simulator settings
#[derive(Clone, Debug)]
pub struct FaceConfig {
    pub width: u32,
    pub height: u32,
    pub background: PathBuf,
    pub ambient_background: PathBuf,

    // Simulated device properties
    pub low_bit_ambient: bool,
    pub burn_in_protection: bool,
    pub start_ambient: bool,

    // Control server configuration
    pub port: u16,
    pub interface: String,
}

impl FaceConfig {
    /// Create a new configuration by combining CLI arguments and environment variables
    pub fn new(cli_args: CliArgs, env_vars: EnvVars) -> Self {
        let width = env_vars.width.unwrap_or(cli_args.width);
        let height = env_vars.height.unwrap_or(cli_args.height);

        let background = PathBuf::from(env_vars.background.unwrap_or(cli_args.background));
        let ambient_background = PathBuf::from(
            env_vars
                .ambient_background
                .unwrap_or(cli_args.ambient_background),
        );

        let low_bit_ambient = env_vars.low_bit_ambient.unwrap_or(cli_args.low_bit_ambient);
        let burn_in_protection = env_vars
            .burn_in_protection
            .unwrap_or(cli_args.burn_in_protection);
        let start_ambient = env_vars.ambient.unwrap_or(cli_args.ambient);

        let port = env_vars.port.unwrap_or(cli_args.port);

        let interface = env_vars
            .interface
            .unwrap_or(cli_args.interface)
            .to_lowercase();

        let interface = if interface == "localhost" {
            "127.0.0.1".to_string()
        } else {
            interface
        };

        Self {
            width,
            height,
            background,
            ambient_background,
            low_bit_ambient,
            burn_in_protection,
            start_ambient,
            port,
            interface,
        }
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), Vec<String>> {
        let mut errors = Vec::new();

        if self.width == 0 {
            errors.push("Surface width must be greater than 0".to_string());
        }

        if self.height == 0 {
            errors.push("Surface height must be greater than 0".to_string());
        }

        for (label, path) in [
            ("Background", &self.background),
            ("Ambient background", &self.ambient_background),
        ] {
            if !path.is_file() {
                errors.push(format!("{} image '{}' does not exist", label, path.display()));
            }
        }

        if let Err(e) = self.interface.parse::<std::net::IpAddr>() {
            errors.push(format!(
                "Invalid network interface address '{}': {}. Use a valid IP address or 'localhost'",
                self.interface, e
            ));
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cli() -> CliArgs {
        CliArgs {
            width: 454,
            height: 454,
            background: "missing/ventus.png".to_string(),
            ambient_background: "missing/ventus_ambient.png".to_string(),
            low_bit_ambient: false,
            burn_in_protection: true,
            ambient: false,
            port: 3000,
            interface: "LocalHost".to_string(),
        }
    }

    #[test]
    fn environment_overrides_cli() {
        let env = EnvVars {
            width: Some(390),
            burn_in_protection: Some(false),
            port: Some(9000),
            ..EnvVars::default()
        };
        let config = FaceConfig::new(cli(), env);

        assert_eq!(config.width, 390);
        assert_eq!(config.height, 454);
        assert!(!config.burn_in_protection);
        assert_eq!(config.port, 9000);
        assert_eq!(config.interface, "127.0.0.1");
        assert_eq!(config.background, PathBuf::from("missing/ventus.png"));
    }

    #[test]
    fn validate_collects_every_problem() {
        let mut config = FaceConfig::new(cli(), EnvVars::default());
        config.width = 0;
        config.interface = "not an address".to_string();

        let errors = config.validate().unwrap_err();
        assert_eq!(errors.len(), 4);
        assert!(errors[0].contains("width"));
        assert!(errors.iter().any(|e| e.contains("missing/ventus_ambient.png")));
        assert!(errors.last().unwrap().contains("not an address"));
    }
}
