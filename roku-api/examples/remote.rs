//! Command-line remote for a Roku device
//!
//! ```bash
//! cargo run -p roku-api --example remote -- apps
//! cargo run -p roku-api --example remote -- --device 192.168.1.20 press home down down select
//! cargo run -p roku-api --example remote -- type "stranger things"
//! ```
//!
//! Without `--device` the first Roku to answer discovery is used.
//! Set `ROKU_LOG_MODE=development` to see request logs.

use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use roku_api::logging::init_logging_from_env;
use roku_api::{DeviceAddress, InfoValue, KeyInput, RokuClient};

#[derive(Parser, Debug)]
#[command(name = "remote")]
#[command(about = "Control a Roku device over ECP")]
struct Args {
    /// Device address, e.g. 192.168.1.20 or http://192.168.1.20:8060
    #[arg(short, long)]
    device: Option<DeviceAddress>,

    /// Discovery timeout in seconds when no device is given
    #[arg(short = 't', long, default_value = "3")]
    timeout: u64,

    #[command(subcommand)]
    command: Cmd,
}

#[derive(Subcommand, Debug)]
enum Cmd {
    /// List installed apps
    Apps,
    /// Show the foreground app
    Active,
    /// Print device info
    Info {
        /// Print as a JSON object instead of one field per line
        #[arg(long)]
        json: bool,
    },
    /// Launch an app, optionally with deep-link parameters (key=value)
    Launch {
        app_id: String,
        params: Vec<String>,
    },
    /// Save an app icon to a file named after the app id
    Icon {
        app_id: String,
        #[arg(short, long, default_value = ".")]
        out_dir: PathBuf,
    },
    /// Press keys in order: key names (home, volume_up) or single characters
    Press {
        #[arg(required = true)]
        keys: Vec<String>,
        /// Pause between presses in milliseconds
        #[arg(short, long, default_value = "0")]
        delay: u64,
    },
    /// Type text
    Type { text: String },
}

fn main() -> Result<()> {
    init_logging_from_env()?;
    let args = Args::parse();

    let address = match args.device {
        Some(address) => address,
        None => roku_discovery::discover_one(Duration::from_secs(args.timeout))
            .context("No Roku found on the local network")?,
    };
    let client = RokuClient::new(address);

    match args.command {
        Cmd::Apps => {
            for app in client.apps()? {
                println!("{:>12}  {:<6} {}", app.id, app.kind, app.name);
            }
        }
        Cmd::Active => match client.active_app()? {
            Some(app) => println!("{} ({})", app.name, app.id),
            None => println!("Home screen"),
        },
        Cmd::Info { json } => {
            let info = client.device_info()?;
            if json {
                println!("{}", serde_json::to_string_pretty(&info)?);
            } else {
                for (key, value) in info.iter() {
                    match value {
                        InfoValue::Text(text) => println!("{:<28} {}", key, text),
                        InfoValue::Flag(flag) => println!("{:<28} {}", key, flag),
                    }
                }
            }
        }
        Cmd::Launch { app_id, params } => {
            let params = params
                .iter()
                .map(|p| {
                    p.split_once('=')
                        .with_context(|| format!("Expected key=value, got '{}'", p))
                })
                .collect::<Result<Vec<_>>>()?;
            client.launch_with(&app_id, params.as_slice())?;
        }
        Cmd::Icon { app_id, out_dir } => {
            let icon = client.icon(&app_id)?;
            let extension = icon.extension.clone().unwrap_or_else(|| "bin".to_string());
            let path = out_dir.join(format!("{}.{}", app_id, extension));
            std::fs::write(&path, icon.into_bytes()?)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            println!("{}", path.display());
        }
        Cmd::Press { keys, delay } => {
            let mut chain = client.command();
            for (i, key) in keys.iter().enumerate() {
                if i > 0 && delay > 0 {
                    chain = chain.wait(Duration::from_millis(delay));
                }
                chain = chain.key(KeyInput::parse(key)?, 1);
            }
            chain.send()?;
        }
        Cmd::Type { text } => client.send_text(&text)?,
    }

    Ok(())
}
