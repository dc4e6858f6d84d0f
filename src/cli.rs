//! Command line interface

use std::io::Write;
use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand};
use serde_json::json;
use tracing::debug;

use crate::config::{PickerConfig, SdkConfig, SdkSpec};
use crate::sdk::{ApiLevel, Sdk, SdkPicker, UsesSdk, parse_sdk_list};

#[derive(Debug, Parser)]
#[command(name = "sdk-picker")]
#[command(version, about = "Select the platform SDKs a test artifact runs against")]
pub struct Cli {
    /// Write JSON logs to the data directory instead of stderr
    #[arg(long, global = true)]
    pub log_file: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Select SDKs for one artifact and print them as JSON
    Select(SelectArgs),
    /// Parse an SDK list such as "KITKAT, 21" into API levels
    Parse {
        text: String,
    },
    /// Print the supported and enabled SDKs
    List {
        /// Host configuration file (JSON)
        #[arg(long)]
        config: Option<PathBuf>,
    },
}

#[derive(Debug, Args)]
pub struct SelectArgs {
    /// targetSdkVersion declared by the artifact
    #[arg(long)]
    pub target_sdk: u32,

    /// minSdkVersion declared by the artifact
    #[arg(long, default_value_t = 1)]
    pub min_sdk_version: u32,

    /// maxSdkVersion declared by the artifact
    #[arg(long)]
    pub max_sdk_version: Option<u32>,

    /// SDK selection: all, oldest, target, newest, or a list like "19,LOLLIPOP"
    #[arg(long)]
    pub sdk: Option<SdkSpec>,

    /// Override the lower bound of the selection window
    #[arg(long)]
    pub min_sdk: Option<u32>,

    /// Override the upper bound of the selection window
    #[arg(long)]
    pub max_sdk: Option<u32>,

    /// Host configuration file (JSON)
    #[arg(long)]
    pub config: Option<PathBuf>,
}

impl SelectArgs {
    fn uses_sdk(&self) -> UsesSdk {
        UsesSdk {
            target_sdk: ApiLevel(self.target_sdk),
            min_sdk: ApiLevel(self.min_sdk_version),
            max_sdk: self.max_sdk_version.map(ApiLevel),
        }
    }

    fn sdk_config(&self) -> SdkConfig {
        SdkConfig {
            sdk: self.sdk.clone(),
            min_sdk: self.min_sdk.map(ApiLevel),
            max_sdk: self.max_sdk.map(ApiLevel),
        }
    }
}

/// Execute `command`, writing its JSON output to `out`
pub fn run(command: Command, out: &mut impl Write) -> anyhow::Result<()> {
    match command {
        Command::Select(args) => {
            let picker = load_config(args.config.as_deref())?.picker();
            let selection = args.sdk_config().selection();
            debug!("Selecting with {:?}", selection);

            let sdks = picker.select_sdks(&selection, &args.uses_sdk())?;
            let sdks: Vec<&Sdk> = sdks.iter().map(|sdk| sdk.as_ref()).collect();
            serde_json::to_writer_pretty(&mut *out, &sdks)?;
        }
        Command::Parse { text } => {
            let levels = parse_sdk_list(&text)?;
            serde_json::to_writer_pretty(&mut *out, &levels)?;
        }
        Command::List { config } => {
            let catalog = load_config(config.as_deref())?.catalog();
            serde_json::to_writer_pretty(
                &mut *out,
                &json!({
                    "supported": catalog.supported(),
                    "enabled": catalog.enabled(),
                }),
            )?;
        }
    }

    writeln!(out)?;
    Ok(())
}

fn load_config(path: Option<&Path>) -> anyhow::Result<PickerConfig> {
    let config = match path {
        Some(path) => PickerConfig::load(path)?,
        None => PickerConfig::default(),
    };
    Ok(config.with_env_overrides()?)
}
