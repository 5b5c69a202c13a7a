//! CLI command implementations

pub mod analyze;
pub mod auth;
pub mod config;
pub mod items;
pub mod outfits;
pub mod try_on;
pub mod weather;

use std::io::BufRead;
use std::path::PathBuf;

use anyhow::{Context, Result};
use dialoguer::Password;
use wardrobe_core::{SessionRecord, WardrobeContext};

/// Get the wardrobe directory from environment or default
pub fn get_wardrobe_dir() -> Result<PathBuf> {
    if let Ok(dir) = std::env::var("WARDROBE_DIR") {
        return Ok(PathBuf::from(dir));
    }
    dirs::home_dir()
        .map(|home| home.join(".wardrobe"))
        .context("Could not find home directory; set WARDROBE_DIR")
}

/// Build the context shared by every command
pub fn get_context() -> Result<WardrobeContext> {
    let wardrobe_dir = get_wardrobe_dir()?;

    std::fs::create_dir_all(&wardrobe_dir)
        .with_context(|| format!("Failed to create wardrobe directory: {:?}", wardrobe_dir))?;
    tracing::debug!(dir = %wardrobe_dir.display(), "using wardrobe directory");

    Ok(WardrobeContext::new(&wardrobe_dir)?)
}

/// Current user or a hint to log in
pub fn require_user(ctx: &WardrobeContext) -> Result<SessionRecord> {
    Ok(ctx
        .require_user()
        .context("Run `wd login` first")?)
}

/// Password from the flag, stdin when piped, or an interactive prompt
pub fn read_password(flag: Option<String>, prompt: &str) -> Result<String> {
    if let Some(p) = flag {
        return Ok(p);
    }

    if atty::isnt(atty::Stream::Stdin) {
        let mut line = String::new();
        std::io::stdin().lock().read_line(&mut line)?;
        return Ok(line.trim_end_matches(['\r', '\n']).to_string());
    }

    Ok(Password::new().with_prompt(prompt).interact()?)
}
