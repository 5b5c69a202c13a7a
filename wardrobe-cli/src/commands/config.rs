//! Config command - show and change settings

use std::path::Path;

use anyhow::{Context, Result};
use clap::Subcommand;
use serde_json::{Map, Value};

use wardrobe_core::config::Config;

use crate::output;

#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Show current settings
    Show {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Change a setting, e.g. `wd config set api.baseUrl http://host:8080`
    Set { key: String, value: String },
}

pub fn run(wardrobe_dir: &Path, command: ConfigCommands) -> Result<()> {
    let mut config = Config::load(wardrobe_dir).context("Failed to load settings")?;
    match command {
        ConfigCommands::Show { json } => {
            let entries = config.entries();
            if json {
                let map: Map<String, Value> = entries
                    .into_iter()
                    .map(|(k, v)| (k.to_string(), Value::String(v)))
                    .collect();
                return output::print_json(&map);
            }
            let mut table = output::create_table();
            table.set_header(vec!["Setting", "Value"]);
            for (key, value) in entries {
                table.add_row(vec![key.to_string(), value]);
            }
            println!("{}", table);
        }
        ConfigCommands::Set { key, value } => {
            config.set(&key, &value)?;
            config.save(wardrobe_dir)?;
            output::success(&format!("{} = {}", key, value));
        }
    }
    Ok(())
}
