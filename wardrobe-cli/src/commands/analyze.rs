//! Analyze command - body morphology from a photo

use std::path::Path;

use anyhow::Result;
use colored::Colorize;

use wardrobe_core::WardrobeContext;

use super::require_user;
use crate::output;

pub fn run(ctx: &WardrobeContext, photo: &Path, json: bool) -> Result<()> {
    let user = require_user(ctx)?;

    let spinner = output::spinner("Analyzing photo...");
    let analysis = ctx
        .body_analysis_service
        .analyze_with_recommendations(user.id, photo);
    spinner.finish_and_clear();
    let analysis = analysis?;

    if json {
        return output::print_json(&analysis);
    }

    println!("Body type: {}", analysis.body_type.as_str().bold());
    if analysis.recommendations.is_empty() {
        output::info("No style recommendations for this body type.");
        return Ok(());
    }
    println!();
    println!("{}", "Style recommendations".bold());
    for rec in &analysis.recommendations {
        println!("  • {}", rec);
    }
    Ok(())
}
