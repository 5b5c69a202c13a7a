//! Session commands - login, register, logout, whoami

use anyhow::Result;
use colored::Colorize;
use dialoguer::Input;
use serde_json::json;

use wardrobe_core::{SessionRecord, WardrobeContext};

use super::read_password;
use crate::output;

fn prompt_if_missing(value: Option<String>, prompt: &str) -> Result<String> {
    match value {
        Some(v) => Ok(v),
        None => Ok(Input::<String>::new().with_prompt(prompt).interact_text()?),
    }
}

pub fn login(
    ctx: &WardrobeContext,
    username: Option<String>,
    password: Option<String>,
    json: bool,
) -> Result<()> {
    let username = prompt_if_missing(username, "Username")?;
    let password = read_password(password, "Password")?;

    let user = ctx.session.login(&username, &password)?;
    if json {
        return output::print_json(&user.redacted());
    }
    output::success(&format!("Logged in as {}", user.display_name()));
    Ok(())
}

pub fn register(
    ctx: &WardrobeContext,
    username: Option<String>,
    email: Option<String>,
    password: Option<String>,
    json: bool,
) -> Result<()> {
    let username = prompt_if_missing(username, "Username")?;
    let email = prompt_if_missing(email, "E-mail")?;
    let password = match password {
        Some(p) => p,
        None if atty::isnt(atty::Stream::Stdin) => read_password(None, "Password")?,
        None => dialoguer::Password::new()
            .with_prompt("Password")
            .with_confirmation("Confirm password", "Passwords do not match")
            .interact()?,
    };

    let user = ctx.session.register(&username, &email, &password)?;
    if json {
        return output::print_json(&user.redacted());
    }
    output::success(&format!("Account created. Logged in as {}", user.display_name()));
    Ok(())
}

pub fn logout(ctx: &WardrobeContext, json: bool) -> Result<()> {
    let was_logged_in = ctx.session.is_authenticated();
    ctx.session.logout()?;
    if json {
        return output::print_json(&json!({ "loggedOut": was_logged_in }));
    }
    if was_logged_in {
        output::success("Logged out");
    } else {
        output::info("Not logged in");
    }
    Ok(())
}

pub fn whoami(ctx: &WardrobeContext, json: bool) -> Result<()> {
    let user = ctx.session.current_user();
    if json {
        return output::print_json(&user.as_ref().map(SessionRecord::redacted));
    }

    let Some(user) = user else {
        output::warning("Not logged in");
        return Ok(());
    };

    let mut table = output::create_table();
    table.add_row(vec!["User", user.display_name()]);
    table.add_row(vec!["ID", &user.id.to_string()]);
    if let Some(email) = &user.email {
        table.add_row(vec!["E-mail", email]);
    }
    if !user.roles.is_empty() {
        table.add_row(vec!["Roles", &user.roles.join(", ")]);
    }
    if let Some(at) = user.logged_in_at {
        table.add_row(vec!["Since", &at.format("%Y-%m-%d %H:%M").to_string()]);
    }
    println!("{}", "Current session".bold());
    println!("{}", table);
    Ok(())
}
