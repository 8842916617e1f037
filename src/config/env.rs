//! Environment variable handling

/// Environment variables for the watch face simulator
#[derive(Debug, Default, Clone)]
pub struct EnvVars {
    pub width: Option<u32>,
    pub height: Option<u32>,
    pub background: Option<String>,
    pub ambient_background: Option<String>,
    pub low_bit_ambient: Option<bool>,
    pub burn_in_protection: Option<bool>,
    pub ambient: Option<bool>,
    pub port: Option<u16>,
    pub interface: Option<String>,
}

/// Load configuration from environment variables
pub fn load_env_vars() -> EnvVars {
    env_vars_from(|key| std::env::var(key).ok())
}

fn env_vars_from(lookup: impl Fn(&str) -> Option<String>) -> EnvVars {
    let mut env = EnvVars::default();

    // Surface dimensions
    if let Some(value) = lookup("WATCHFACE_WIDTH") {
        if let Ok(width) = value.parse() {
            env.width = Some(width);
        }
    }

    if let Some(value) = lookup("WATCHFACE_HEIGHT") {
        if let Ok(height) = value.parse() {
            env.height = Some(height);
        }
    }

    // Assets
    if let Some(value) = lookup("WATCHFACE_BACKGROUND") {
        env.background = Some(value);
    }

    if let Some(value) = lookup("WATCHFACE_AMBIENT_BACKGROUND") {
        env.ambient_background = Some(value);
    }

    // Simulated device properties
    env.low_bit_ambient = lookup("WATCHFACE_LOW_BIT_AMBIENT").and_then(|v| parse_flag(&v));
    env.burn_in_protection = lookup("WATCHFACE_BURN_IN_PROTECTION").and_then(|v| parse_flag(&v));
    env.ambient = lookup("WATCHFACE_AMBIENT").and_then(|v| parse_flag(&v));

    // Control server settings
    if let Some(value) = lookup("WATCHFACE_PORT") {
        if let Ok(port) = value.parse() {
            env.port = Some(port);
        }
    }

    if let Some(value) = lookup("WATCHFACE_INTERFACE") {
        env.interface = Some(value);
    }

    env
}

/// Accept `true`/`false` as well as numeric values (0/1)
fn parse_flag(value: &str) -> Option<bool> {
    if let Ok(enabled) = value.parse::<bool>() {
        Some(enabled)
    } else if let Ok(enabled) = value.parse::<u8>() {
        Some(enabled != 0)
    } else {
        None
    }
}
