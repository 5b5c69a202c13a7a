//! Try-on command - preview an outfit or item on a photo

use std::path::PathBuf;

use anyhow::Result;
use clap::Subcommand;
use serde_json::json;

use wardrobe_core::{TryOnTarget, WardrobeContext};

use super::require_user;
use crate::output;

#[derive(Subcommand)]
pub enum TryOnCommands {
    /// Try on a whole outfit
    Outfit {
        id: i64,
        /// Photo of yourself
        photo: PathBuf,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Try on a single item
    Item {
        id: i64,
        /// Photo of yourself
        photo: PathBuf,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

pub fn run(ctx: &WardrobeContext, command: TryOnCommands) -> Result<()> {
    let (target, photo, json) = match command {
        TryOnCommands::Outfit { id, photo, json } => (TryOnTarget::Outfit(id), photo, json),
        TryOnCommands::Item { id, photo, json } => (TryOnTarget::Item(id), photo, json),
    };
    require_user(ctx)?;

    let spinner = output::spinner("Generating preview...");
    let result = ctx.try_on_service.try_on(target, &photo);
    spinner.finish_and_clear();
    let result = result?;

    let url = ctx.try_on_service.result_url(&result);
    if json {
        return output::print_json(&json!({
            "resultImagePath": result.result_image_path,
            "url": url,
        }));
    }
    output::success(&format!("Preview ready for {} {}", target.kind(), target.id()));
    println!("{}", url);
    Ok(())
}
