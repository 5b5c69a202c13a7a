//! Output formatting utilities

use std::time::Duration;

use colored::Colorize;
use comfy_table::{presets::UTF8_FULL_CONDENSED, ContentArrangement, Table};
use indicatif::{ProgressBar, ProgressStyle};
use serde::Serialize;

use wardrobe_core::{ClothingItem, ErrorCategory, Outfit};

/// Print a success message
pub fn success(msg: &str) {
    println!("{}", msg.green());
}

/// Print an error message
pub fn error(msg: &str) {
    eprintln!("{}", msg.red());
}

/// Print a warning message
pub fn warning(msg: &str) {
    println!("{}", msg.yellow());
}

/// Print an info message
pub fn info(msg: &str) {
    println!("{}", msg.cyan());
}

/// One-line failure notification naming the category
pub fn notify_failure(category: Option<ErrorCategory>, msg: &str) {
    match category {
        Some(category) => error(&format!("{}: {}", category, msg)),
        None => error(msg),
    }
}

pub fn print_json<T: Serialize + ?Sized>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Create a styled table
pub fn create_table() -> Table {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL_CONDENSED);
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table
}

/// Spinner shown while an upload is in flight; hidden when not a terminal
pub fn spinner(msg: &str) -> ProgressBar {
    if atty::isnt(atty::Stream::Stderr) {
        return ProgressBar::hidden();
    }
    let bar = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::with_template("{spinner:.cyan} {msg}") {
        bar.set_style(style);
    }
    bar.set_message(msg.to_string());
    bar.enable_steady_tick(Duration::from_millis(100));
    bar
}

fn favorite_mark(favorite: bool) -> String {
    if favorite {
        "★".yellow().to_string()
    } else {
        String::new()
    }
}

pub fn items_table(items: &[ClothingItem]) -> Table {
    let mut table = create_table();
    table.set_header(vec!["ID", "Name", "Category", "Color", "Season", "Fav"]);
    for item in items {
        table.add_row(vec![
            item.id.to_string(),
            item.name.clone(),
            item.category.to_string(),
            item.color.clone(),
            item.season.to_string(),
            favorite_mark(item.favorite),
        ]);
    }
    table
}

pub fn outfits_table(outfits: &[Outfit]) -> Table {
    let mut table = create_table();
    table.set_header(vec!["ID", "Name", "Season", "Weather", "Items", "Fav"]);
    for outfit in outfits {
        table.add_row(vec![
            outfit.id.to_string(),
            outfit.name.clone(),
            outfit.season.to_string(),
            outfit.weather_conditions.clone().unwrap_or_default(),
            outfit.items.len().to_string(),
            favorite_mark(outfit.favorite),
        ]);
    }
    table
}
