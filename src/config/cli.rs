//! Command-line argument parsing

/// Command-line arguments for the watch face simulator
#[derive(argh::FromArgs, Debug, Clone)]
/// Ventus watch face
///
/// Runs the watch face on a simulated wearable host with an HTTP control interface.
pub struct CliArgs {
    #[argh(option, default = "454")]
    /// surface width in pixels. Default: 454
    pub width: u32,

    #[argh(option, default = "454")]
    /// surface height in pixels. Default: 454
    pub height: u32,

    #[argh(option, short = 'b', default = "String::from(\"assets/ventus.png\")")]
    /// background image for interactive mode. Default: "assets/ventus.png"
    pub background: String,

    #[argh(option, short = 'a', default = "String::from(\"assets/ventus_ambient.png\")")]
    /// background image for ambient mode. Default: "assets/ventus_ambient.png"
    pub ambient_background: String,

    #[argh(switch)]
    /// simulate a device that renders ambient mode with reduced color depth
    pub low_bit_ambient: bool,

    #[argh(switch)]
    /// simulate a device that shifts pixels in ambient mode
    pub burn_in_protection: bool,

    #[argh(switch)]
    /// start in ambient mode
    pub ambient: bool,

    #[argh(option, default = "3000")]
    /// port of the control interface. Default: 3000
    pub port: u16,

    #[argh(option, default = "String::from(\"127.0.0.1\")")]
    /// network interface of the control interface. Default: 127.0.0.1
    pub interface: String,
}

impl CliArgs {
    /// Parse CLI arguments
    pub fn parse() -> Self {
        // Use argh to parse args from environment
        argh::from_env()
    }
}
