//! Outfits command - combine items into outfits

use anyhow::{bail, Result};
use clap::Subcommand;
use colored::Colorize;
use dialoguer::Confirm;
use serde_json::json;

use wardrobe_core::{Outfit, OutfitFilter, OutfitForm, Season, WardrobeContext};

use super::require_user;
use crate::output;

#[derive(Subcommand)]
pub enum OutfitsCommands {
    /// List outfits, optionally filtered
    List {
        /// Only favorites
        #[arg(long, conflicts_with_all = ["season", "weather"])]
        favorites: bool,
        /// Only this season
        #[arg(long, conflicts_with = "weather")]
        season: Option<Season>,
        /// Only outfits tagged with this weather label
        #[arg(long)]
        weather: Option<String>,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Show one outfit with its items
    Show {
        id: i64,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Create an outfit from at least two items
    Create {
        #[arg(long)]
        name: String,
        /// Item IDs, comma-separated
        #[arg(long, value_delimiter = ',', required = true)]
        items: Vec<i64>,
        #[arg(long, default_value = "all")]
        season: Season,
        /// Weather label, e.g. "Sunny" or "Rain"
        #[arg(long)]
        weather: Option<String>,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Update an outfit; omitted fields keep their current value
    Update {
        id: i64,
        #[arg(long)]
        name: Option<String>,
        /// Replace the item list
        #[arg(long, value_delimiter = ',')]
        items: Option<Vec<i64>>,
        #[arg(long)]
        season: Option<Season>,
        #[arg(long)]
        weather: Option<String>,
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
    /// Delete an outfit
    Remove {
        id: i64,
        /// Skip confirmation prompt
        #[arg(long, short)]
        force: bool,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Suggest an outfit for the current weather
    Recommend {
        /// City to check (defaults to the configured city)
        #[arg(long)]
        city: Option<String>,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

pub fn run(ctx: &WardrobeContext, command: OutfitsCommands) -> Result<()> {
    let service = &ctx.outfit_service;
    match command {
        OutfitsCommands::List {
            favorites,
            season,
            weather,
            json,
        } => {
            let user = require_user(ctx)?;
            let filter = match (favorites, season, weather) {
                (true, _, _) => OutfitFilter::Favorites,
                (_, Some(s), _) => OutfitFilter::Season(s),
                (_, _, Some(w)) => OutfitFilter::Weather(w),
                _ => OutfitFilter::All,
            };
            let outfits = service.list(user.id, &filter)?;
            if json {
                return output::print_json(&outfits);
            }
            if outfits.is_empty() {
                println!("No outfits found.");
                return Ok(());
            }
            println!("{}", output::outfits_table(&outfits));
        }
        OutfitsCommands::Show { id, json } => {
            require_user(ctx)?;
            let outfit = service.get(id)?;
            if json {
                return output::print_json(&outfit);
            }
            print_outfit(&outfit);
        }
        OutfitsCommands::Create {
            name,
            items,
            season,
            weather,
            json,
        } => {
            let user = require_user(ctx)?;
            let form = OutfitForm::new(name, items)
                .with_season(season)
                .with_weather(weather.unwrap_or_default());
            report_saved(service.create(user.id, &form)?, json, "Outfit created")?;
        }
        OutfitsCommands::Update {
            id,
            name,
            items,
            season,
            weather,
            json,
        } => {
            require_user(ctx)?;
            let mut form = OutfitForm::from_outfit(&service.get(id)?);
            if let Some(name) = name {
                form.name = name;
            }
            if let Some(items) = items {
                form.clothing_item_ids = items;
            }
            if let Some(season) = season {
                form.season = season;
            }
            if let Some(weather) = weather {
                form.weather_conditions = weather;
            }
            report_saved(service.update(id, &form)?, json, "Outfit updated")?;
        }
        OutfitsCommands::Favorite { id, json } => {
            require_user(ctx)?;
            let updated = service.toggle_favorite(id)?;
            if json {
                return output::print_json(&updated);
            }
            match updated {
                Some(o) if o.favorite => output::success(&format!("'{}' added to favorites", o.name)),
                Some(o) => output::success(&format!("'{}' removed from favorites", o.name)),
                None => output::success("Favorite toggled"),
            }
        }
        OutfitsCommands::Remove { id, force, json } => {
            require_user(ctx)?;
            if !force && !json {
                if atty::isnt(atty::Stream::Stdin) {
                    bail!("Refusing to delete without confirmation; pass --force");
                }
                if !Confirm::new()
                    .with_prompt(format!("Delete outfit {}?", id))
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
            output::success("Outfit deleted");
        }
        OutfitsCommands::Recommend { city, json } => {
            let user = require_user(ctx)?;
            let city = city.unwrap_or_else(|| ctx.config.default_city.clone());
            let outfit = match service.recommend(user.id, &city) {
                Err(wardrobe_core::Error::NotFound(message)) => {
                    tracing::debug!(%message, "no outfit recommendation");
                    None
                }
                other => other?,
            };
            if json {
                return output::print_json(&outfit);
            }
            match outfit {
                Some(outfit) => {
                    println!("Recommended for {}:", city.cyan());
                    print_outfit(&outfit);
                }
                None => output::warning(&format!("No recommendation available for {}", city)),
            }
        }
    }
    Ok(())
}

fn report_saved(outfit: Option<Outfit>, json: bool, message: &str) -> Result<()> {
    if json {
        return output::print_json(&outfit);
    }
    match outfit {
        Some(o) => output::success(&format!("{}: {} (#{})", message, o.name, o.id)),
        None => output::success(message),
    }
    Ok(())
}

fn print_outfit(outfit: &Outfit) {
    let mut title = outfit.name.bold().to_string();
    if outfit.favorite {
        title.push_str(&format!(" {}", "★".yellow()));
    }
    println!("{}", title);
    print!("Season: {}", outfit.season);
    if let Some(weather) = outfit.weather_conditions.as_deref().filter(|w| !w.is_empty()) {
        print!("  Weather: {}", weather);
    }
    println!();

    if outfit.items.is_empty() {
        println!("No items.");
    } else {
        println!("{}", output::items_table(&outfit.items));
    }
}
