//! Danwa CLI - Chat from the terminal
//!
//! Simple CLI for talking to the Danwa API without a browser client.

mod api;
mod config;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use colored::Colorize;
use dialoguer::{Input, Password};
use std::fs;
use uuid::Uuid;

use api::DanwaClient;
use config::Config;

#[derive(Parser)]
#[command(name = "danwa")]
#[command(about = "Danwa CLI - chat room client", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Login and store API key
    Login {
        /// API key (will prompt if not provided)
        #[arg(short, long)]
        key: Option<String>,
    },

    /// Manage profiles (chat identities)
    Profile {
        #[command(subcommand)]
        action: ProfileAction,
    },

    /// Join the room under a display name
    Join {
        /// Display name everyone will see
        name: String,
        /// Profile to use
        #[arg(short, long)]
        profile: Option<String>,
    },

    /// Post a message to the room
    Send {
        /// Message text (or use -f for file)
        text: Option<String>,
        /// Read message text from file
        #[arg(short, long)]
        file: Option<String>,
        /// Profile to use (overrides default)
        #[arg(short, long)]
        profile: Option<String>,
    },

    /// Show the room's messages
    History {
        /// Only the most recent N messages
        #[arg(short, long)]
        limit: Option<usize>,
    },

    /// Show who is in the room
    Roster,

    /// Show current configuration
    Config,
}

#[derive(Subcommand)]
enum ProfileAction {
    /// Add a new profile (a client ID is generated)
    Add {
        /// Profile name (e.g., "mai", "work")
        name: String,
        /// Display name (optional)
        #[arg(long)]
        display_name: Option<String>,
    },
    /// List all profiles
    List,
    /// Set default profile
    Set {
        /// Profile name to set as default
        name: String,
    },
    /// Remove a profile
    Remove {
        /// Profile name to remove
        name: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Login { key } => cmd_login(key).await,
        Commands::Profile { action } => cmd_profile(action),
        Commands::Join { name, profile } => cmd_join(name, profile).await,
        Commands::Send { text, file, profile } => cmd_send(text, file, profile).await,
        Commands::History { limit } => cmd_history(limit).await,
        Commands::Roster => cmd_roster().await,
        Commands::Config => cmd_config(),
    }
}

// ============================================
// Command Implementations
// ============================================

async fn cmd_login(key: Option<String>) -> Result<()> {
    let mut config = Config::load()?;

    let api_key = match key {
        Some(k) => k,
        None => Password::new()
            .with_prompt("API Key")
            .interact()
            .context("Failed to read API key")?,
    };

    // Test connection
    let client = DanwaClient::new(&config.base_url, &api_key);
    print!("Testing connection... ");

    match client.health().await {
        Ok(true) => {
            println!("{}", "OK".green());
        }
        _ => {
            println!("{}", "Failed".red());
            bail!("Could not connect to Danwa API. Check your API key.");
        }
    }

    config.set_api_key(api_key);
    config.save()?;

    println!("{} API key saved to {:?}", "✓".green(), Config::config_path()?);

    // Offer to set up a profile if none exists
    if config.profiles.is_empty() {
        println!("\n{}", "Tip: Set up a profile to join the room:".yellow());
        println!("  danwa profile add mai");
        println!("  danwa profile set mai");
        println!("  danwa join Mai");
    }

    Ok(())
}

fn cmd_profile(action: ProfileAction) -> Result<()> {
    let mut config = Config::load()?;

    match action {
        ProfileAction::Add { name, display_name } => {
            let client_id = Uuid::new_v4().to_string();
            config.add_profile(name.clone(), client_id, display_name);
            config.save()?;
            println!("{} Profile '{}' added", "✓".green(), name);
        }

        ProfileAction::List => {
            if config.profiles.is_empty() {
                println!("No profiles configured.");
                println!("\n{}", "Add one with:".dimmed());
                println!("  danwa profile add <name>");
                return Ok(());
            }

            println!("{}", "Profiles:".bold());
            for (name, profile) in &config.profiles {
                let is_default = config.default_profile.as_ref() == Some(name);
                let default_marker = if is_default { " (default)".green().to_string() } else { String::new() };
                let display_name = profile.name.as_deref().unwrap_or("-");

                println!(
                    "  {} {} ({}){}",
                    name.cyan(),
                    display_name.dimmed(),
                    &profile.client_id[..8],
                    default_marker
                );
            }
        }

        ProfileAction::Set { name } => {
            if config.set_default_profile(name.clone()) {
                config.save()?;
                println!("{} Default profile set to '{}'", "✓".green(), name);
            } else {
                bail!("Profile '{}' not found", name);
            }
        }

        ProfileAction::Remove { name } => {
            if config.remove_profile(&name) {
                // Clear default if it was the removed profile
                if config.default_profile.as_ref() == Some(&name) {
                    config.default_profile = None;
                }
                config.save()?;
                println!("{} Profile '{}' removed", "✓".green(), name);
            } else {
                bail!("Profile '{}' not found", name);
            }
        }
    }

    Ok(())
}

async fn cmd_join(name: String, profile: Option<String>) -> Result<()> {
    let config = Config::load()?;
    let api_key = config.api_key.as_ref()
        .context("Not logged in. Run 'danwa login' first.")?;

    let client_id = config.get_client_id(profile.as_deref())
        .context("No profile specified and no default profile set. Use -p <profile> or set a default.")?;

    let client = DanwaClient::new(&config.base_url, api_key);
    let identified = client.identify(&client_id, &name).await?;

    println!(
        "{} Joined as {}",
        "✓".green(),
        identified.name.cyan().bold()
    );
    println!(
        "{} {}",
        "In the room:".dimmed(),
        identified.names.join(", ")
    );

    Ok(())
}

async fn cmd_send(text: Option<String>, file: Option<String>, profile: Option<String>) -> Result<()> {
    let config = Config::load()?;
    let api_key = config.api_key.as_ref()
        .context("Not logged in. Run 'danwa login' first.")?;

    let client_id = config.get_client_id(profile.as_deref())
        .context("No profile specified and no default profile set. Use -p <profile> or set a default.")?;

    // Get text from file or argument
    let message_text = match (text, file) {
        (Some(t), None) => t,
        (None, Some(f)) => {
            fs::read_to_string(&f)
                .with_context(|| format!("Failed to read file: {}", f))?
        }
        (Some(_), Some(_)) => {
            bail!("Cannot specify both text and --file");
        }
        (None, None) => {
            // Interactive input
            Input::new()
                .with_prompt("Message")
                .interact_text()
                .context("Failed to read input")?
        }
    };

    let client = DanwaClient::new(&config.base_url, api_key);
    let message = client.post_message(&client_id, &message_text).await?;

    println!(
        "{} Sent as {}",
        "✓".green(),
        message.name.cyan()
    );
    println!("  {}", truncate_string(&message.text, 80).dimmed());

    Ok(())
}

async fn cmd_history(limit: Option<usize>) -> Result<()> {
    let config = Config::load()?;
    let api_key = config.api_key.as_ref()
        .context("Not logged in. Run 'danwa login' first.")?;

    let client = DanwaClient::new(&config.base_url, api_key);
    let messages = client.list_messages(limit).await?;

    if messages.is_empty() {
        println!("The room is quiet. Send the first message:");
        println!("  danwa send \"hey there!\"");
        return Ok(());
    }

    for message in messages {
        println!(
            "{} {} {}",
            message.posted_at.format("%H:%M:%S").to_string().dimmed(),
            format!("{}:", message.name).cyan().bold(),
            message.text
        );
    }

    Ok(())
}

async fn cmd_roster() -> Result<()> {
    let config = Config::load()?;
    let api_key = config.api_key.as_ref()
        .context("Not logged in. Run 'danwa login' first.")?;

    let client = DanwaClient::new(&config.base_url, api_key);
    let participants = client.roster().await?;

    if participants.is_empty() {
        println!("Nobody has identified yet.");
        return Ok(());
    }

    println!("{}", "In the room:".bold());
    for participant in participants {
        println!(
            "  {} {}",
            participant.name.cyan().bold(),
            participant.client_id.dimmed()
        );
    }

    Ok(())
}

/// Truncate string safely for UTF-8 (by char count, not bytes)
fn truncate_string(s: &str, max_chars: usize) -> String {
    let chars: Vec<char> = s.chars().take(max_chars).collect();
    if s.chars().count() > max_chars {
        format!("{}...", chars.into_iter().collect::<String>())
    } else {
        s.to_string()
    }
}

fn cmd_config() -> Result<()> {
    let config = Config::load()?;

    println!("{}", "Configuration:".bold());
    println!("  Path: {:?}", Config::config_path()?);
    println!("  Base URL: {}", config.base_url);
    println!(
        "  API Key: {}",
        if config.api_key.is_some() { "Set".green() } else { "Not set".red() }
    );
    println!(
        "  Default Profile: {}",
        config.default_profile.as_deref().unwrap_or("None").cyan()
    );
    println!("  Profiles: {}", config.profiles.len());

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn truncate_string_is_char_aware() {
        assert_eq!(truncate_string("hello", 10), "hello");
        assert_eq!(truncate_string("hello world", 5), "hello...");
        assert_eq!(truncate_string("こんにちは世界", 5), "こんにちは...");
    }
}
