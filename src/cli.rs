// cli.rs - Command-line interface configuration
use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug, Clone)]
#[command(name = "dreamfield")]
#[command(about = "Point-cloud scene simulator driven by hand gestures", long_about = None)]
pub struct Cli {
    /// Built-in scene name (meadow, night, ruins) or path to a scene graph JSON file
    #[arg(long, default_value = "meadow")]
    pub scene: String,

    /// Simulator config JSON; missing fields keep their defaults
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Gesture script to replay instead of mouse/keyboard hands
    #[arg(long)]
    pub gestures: Option<PathBuf>,

    /// Directory that asset-backed objects are loaded from
    #[arg(long, default_value = "assets")]
    pub assets: PathBuf,

    /// Seed for lifetimes and jitter, overrides the config file
    #[arg(long)]
    pub seed: Option<u64>,

    /// Run without a window and log statistics at the end
    #[arg(long, default_value = "false")]
    pub headless: bool,

    /// Frames to simulate in headless mode
    #[arg(long, default_value_t = 600)]
    pub frames: u32,

    #[arg(long, default_value_t = 960)]
    pub width: u32,

    #[arg(long, default_value_t = 540)]
    pub height: u32,
}
