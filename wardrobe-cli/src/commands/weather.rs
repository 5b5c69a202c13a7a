//! Weather command - current conditions for a city

use anyhow::Result;
use colored::Colorize;

use wardrobe_core::domain::Sky;
use wardrobe_core::WardrobeContext;

pub fn run(ctx: &WardrobeContext, city: Option<String>, json: bool) -> Result<()> {
    let city = city.unwrap_or_else(|| ctx.config.default_city.clone());
    let snapshot = ctx.weather_service.current(&city)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&snapshot)?);
        return Ok(());
    }

    let icon = match snapshot.sky() {
        Sky::Clear => "☀",
        Sky::Rain => "☂",
        Sky::Snow => "❄",
        Sky::Cloudy => "☁",
    };
    println!(
        "{} {}  {}°C  {}",
        icon,
        snapshot.city.bold(),
        snapshot.rounded_temperature(),
        snapshot.condition
    );
    Ok(())
}
