//! Tether simulator binary.
//!
//! # Usage
//!
//! ```bash
//! # Replay a script file
//! tether-sim --script boot.scn
//!
//! # Read the script from stdin, no vibrator, portrait
//! tether-sim --no-vibrator --rotation 2 < boot.scn
//! ```

use std::{io::Read, path::PathBuf};

use clap::Parser;
use tether_sim::{SimOptions, parse_script, play};
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Tether headless host
#[derive(Parser, Debug)]
#[command(name = "tether-sim")]
#[command(about = "Replay scripted host events through the tether bridge")]
#[command(version)]
struct Args {
    /// Scenario script; stdin when absent
    #[arg(short, long)]
    script: Option<PathBuf>,

    /// Display density in dots per inch
    #[arg(long, default_value = "240")]
    dpi: u32,

    /// Locale as language_COUNTRY
    #[arg(long, default_value = "en_US")]
    locale: String,

    /// Device identity as manufacturer:model
    #[arg(long, default_value = "Tether:Sim")]
    device: String,

    /// Private data directory
    #[arg(long)]
    data_dir: Option<PathBuf>,

    /// Simulate a device without vibration hardware
    #[arg(long)]
    no_vibrator: bool,

    /// Native answer to the screenRotation query
    #[arg(long, default_value = "0")]
    rotation: String,

    /// Native answer to the immersiveMode query
    #[arg(long, default_value = "0")]
    immersive: String,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "info")]
    log_level: String,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&args.log_level));

    tracing_subscriber::registry().with(fmt::layer()).with(filter).init();

    let script = match &args.script {
        Some(path) => std::fs::read_to_string(path)?,
        None => {
            let mut script = String::new();
            std::io::stdin().read_to_string(&mut script)?;
            script
        },
    };
    let steps = parse_script(&script)?;
    tracing::info!(steps = steps.len(), "scenario loaded");

    let options = SimOptions {
        dpi: args.dpi,
        locale: args.locale,
        device: args.device,
        data_dir: args.data_dir.unwrap_or_else(|| std::env::temp_dir().join("tether-sim")),
        vibrator: !args.no_vibrator,
        rotation: args.rotation,
        immersive: args.immersive,
    };

    let summary = play(steps, &options).await?;
    tracing::info!(
        native_calls = summary.native_calls,
        host_calls = summary.host_calls,
        messages = summary.messages.len(),
        state = ?summary.state,
        "scenario finished"
    );

    Ok(())
}
