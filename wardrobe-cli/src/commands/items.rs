//! Items command - manage clothing items in the wardrobe

use std::path::PathBuf;

use anyhow::{bail, Result};
use clap::Subcommand;
use colored::Colorize;
use dialoguer::Confirm;
use serde_json::json;

use wardrobe_core::{Category, ClothingFilter, ClothingItem, ClothingItemForm, Season, WardrobeContext};

use super::require_user;
use crate::output;

#[derive(Subcommand)]
pub enum ItemsCommands {
    /// List items, optionally filtered
    List {
        /// Only this category (top, bottom, footwear, outerwear, accessory)
        #[arg(long, conflicts_with_all = ["season", "favorites"])]
        category: Option<Category>,
        /// Only this season (all, spring, summer, fall, winter)
        #[arg(long, conflicts_with = "favorites")]
        season: Option<Season>,
        /// Only favorites
        #[arg(long)]
        favorites: bool,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Show one item
    Show {
        id: i64,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Add an item
    Add {
        #[arg(long)]
        name: String,
        #[arg(long)]
        category: Category,
        #[arg(long)]
        color: String,
        #[arg(long, default_value = "all")]
        season: Season,
        /// Picture of the item
        #[arg(long)]
        image: Option<PathBuf>,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Update an item; omitted fields keep their current value
    Update {
        id: i64,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        category: Option<Category>,
        #[arg(long)]
        color: Option<String>,
        #[arg(long)]
        season: Option<Season>,
        /// Replace the picture
        #[arg(long)]
        image: Option<PathBuf>,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Toggle the favorite flag
    Favorite {
        id: i64,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Delete an item
    Remove {
        id: i64,
        /// Skip confirmation prompt
        #[arg(long, short)]
        force: bool,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

pub fn run(ctx: &WardrobeContext, command: ItemsCommands) -> Result<()> {
    let service = &ctx.wardrobe_service;
    match command {
        ItemsCommands::List {
            category,
            season,
            favorites,
            json,
        } => {
            let user = require_user(ctx)?;
            let filter = match (category, season, favorites) {
                (Some(c), _, _) => ClothingFilter::Category(c),
                (_, Some(s), _) => ClothingFilter::Season(s),
                (_, _, true) => ClothingFilter::Favorites,
                _ => ClothingFilter::All,
            };
            let items = service.list(user.id, filter)?;
            if json {
                return output::print_json(&items);
            }
            if items.is_empty() {
                println!("No items found.");
                return Ok(());
            }
            println!("{}", output::items_table(&items));
        }
        ItemsCommands::Show { id, json } => {
            require_user(ctx)?;
            let item = service.get(id)?;
            if json {
                return output::print_json(&item);
            }
            print_item(ctx, &item);
        }
        ItemsCommands::Add {
            name,
            category,
            color,
            season,
            image,
            json,
        } => {
            let user = require_user(ctx)?;
            let mut form = ClothingItemForm::new(name, category, color).with_season(season);
            if let Some(path) = image {
                form = form.with_image(path);
            }

            let spinner = output::spinner("Uploading item...");
            let created = service.create(user.id, &form);
            spinner.finish_and_clear();

            report_saved(created?, json, "Item added")?;
        }
        ItemsCommands::Update {
            id,
            name,
            category,
            color,
            season,
            image,
            json,
        } => {
            require_user(ctx)?;
            let current = service.get(id)?;
            let mut form = ClothingItemForm::new(
                name.unwrap_or(current.name),
                category.unwrap_or(current.category),
                color.unwrap_or(current.color),
            )
            .with_season(season.unwrap_or(current.season));
            if let Some(path) = image {
                form = form.with_image(path);
            }

            let spinner = output::spinner("Saving item...");
            let updated = service.update(id, &form);
            spinner.finish_and_clear();

            report_saved(updated?, json, "Item updated")?;
        }
        ItemsCommands::Favorite { id, json } => {
            require_user(ctx)?;
            let updated = service.toggle_favorite(id)?;
            if json {
                return output::print_json(&updated);
            }
            match updated {
                Some(item) if item.favorite => output::success(&format!("'{}' added to favorites", item.name)),
                Some(item) => output::success(&format!("'{}' removed from favorites", item.name)),
                None => output::success("Favorite toggled"),
            }
        }
        ItemsCommands::Remove { id, force, json } => {
            require_user(ctx)?;
            if !force && !json {
                if atty::isnt(atty::Stream::Stdin) {
                    bail!("Refusing to delete without confirmation; pass --force");
                }
                if !Confirm::new()
                    .with_prompt(format!("Delete item {}?", id))
                    .default(false)
                    .interact()?
                {
                    println!("Cancelled.");
                    return Ok(());
                }
            }
            service.delete(id)?;
            if json {
                return output::print_json(&json!({ "deleted": id }));
            }
            output::success("Item deleted");
        }
    }
    Ok(())
}

fn report_saved(item: Option<ClothingItem>, json: bool, message: &str) -> Result<()> {
    if json {
        return output::print_json(&item);
    }
    match item {
        Some(item) => output::success(&format!("{}: {} (#{})", message, item.name, item.id)),
        None => output::success(message),
    }
    Ok(())
}

fn print_item(ctx: &WardrobeContext, item: &ClothingItem) {
    println!("{}", item.name.bold());
    let mut table = output::create_table();
    table.add_row(vec!["ID", &item.id.to_string()]);
    table.add_row(vec!["Category", item.category.as_str()]);
    table.add_row(vec!["Color", &item.color]);
    table.add_row(vec!["Season", item.season.as_str()]);
    table.add_row(vec!["Favorite", if item.favorite { "yes" } else { "no" }]);
    if let Some(url) = ctx.wardrobe_service.image_url(item) {
        table.add_row(vec!["Image", &url]);
    }
    println!("{}", table);
}
