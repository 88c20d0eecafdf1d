//! msgfaker CLI - Synthetic message injection
//!
//! Drives the faker against a Discord client snapshot file.

mod config;
mod host;

use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand};
use colored::Colorize;
use dialoguer::{Confirm, Input};
use msgfaker::{FakerSettings, RichEmbed, SendOutcome};
use std::path::PathBuf;
use tracing::debug;
use tracing_subscriber::EnvFilter;

use config::SettingsStore;
use host::HostSession;

#[derive(Parser)]
#[command(name = "msgfaker")]
#[command(about = "msgfaker CLI - Inject synthetic messages into a client snapshot", long_about = None)]
#[command(version)]
struct Cli {
    /// Settings file (defaults to ~/.config/msgfaker/settings.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Manage saved settings
    Settings {
        #[command(subcommand)]
        action: SettingsAction,
    },

    /// Send the message described by the saved settings
    Send {
        /// Host snapshot file
        #[arg(long)]
        host: PathBuf,
        /// Write the updated stores back to the snapshot
        #[arg(short, long)]
        write: bool,
    },

    /// Fill the settings with a test message to yourself
    QuickTest {
        /// Host snapshot file
        #[arg(long)]
        host: PathBuf,
    },

    /// Find the direct conversation with a user (getDMChannel)
    Resolve {
        /// User ID
        user_id: String,
        /// Host snapshot file
        #[arg(long)]
        host: PathBuf,
    },

    /// Fabricate a message and print it without injecting (createMessage)
    Create {
        channel_id: String,
        author_id: String,
        content: String,
        #[command(flatten)]
        embed: EmbedArgs,
        /// Host snapshot file
        #[arg(long)]
        host: PathBuf,
    },

    /// Fabricate and inject a message into a channel (inject)
    Inject {
        channel_id: String,
        author_id: String,
        content: String,
        #[command(flatten)]
        embed: EmbedArgs,
        /// Host snapshot file
        #[arg(long)]
        host: PathBuf,
        /// Write the updated stores back to the snapshot
        #[arg(short, long)]
        write: bool,
    },
}

#[derive(Subcommand)]
enum SettingsAction {
    /// Show current settings
    Show,
    /// Update individual fields
    Set {
        /// User ID whose DM receives the message
        #[arg(long)]
        target: Option<String>,
        /// User ID the message appears to be from
        #[arg(long)]
        from: Option<String>,
        /// Message text
        #[arg(long)]
        content: Option<String>,
        /// Attach an embed
        #[arg(long)]
        embed_enabled: Option<bool>,
        #[command(flatten)]
        embed: EmbedArgs,
    },
    /// Edit every field interactively
    Edit,
    /// Reset all fields to empty
    Reset,
}

#[derive(Args, Default)]
struct EmbedArgs {
    /// Embed title
    #[arg(long)]
    embed_title: Option<String>,
    /// Embed description
    #[arg(long)]
    embed_description: Option<String>,
    /// Embed image URL
    #[arg(long)]
    embed_image_url: Option<String>,
}

impl EmbedArgs {
    fn to_embed(&self) -> Option<RichEmbed> {
        RichEmbed::from_fields(
            self.embed_title.as_deref().unwrap_or_default(),
            self.embed_description.as_deref().unwrap_or_default(),
            self.embed_image_url.as_deref().unwrap_or_default(),
        )
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let settings = SettingsStore::new(cli.config)?;
    debug!(path = ?settings.path(), "Using settings file");

    match cli.command {
        Commands::Settings { action } => cmd_settings(&settings, action),
        Commands::Send { host, write } => cmd_send(&settings, host, write).await,
        Commands::QuickTest { host } => cmd_quick_test(&settings, host),
        Commands::Resolve { user_id, host } => cmd_resolve(user_id, host).await,
        Commands::Create {
            channel_id,
            author_id,
            content,
            embed,
            host,
        } => cmd_create(channel_id, author_id, content, embed, host),
        Commands::Inject {
            channel_id,
            author_id,
            content,
            embed,
            host,
            write,
        } => cmd_inject(channel_id, author_id, content, embed, host, write),
    }
}

// ============================================
// Command Implementations
// ============================================

fn cmd_settings(store: &SettingsStore, action: SettingsAction) -> Result<()> {
    match action {
        SettingsAction::Show => {
            let settings = store.load()?;
            print_settings(store, &settings);
        }

        SettingsAction::Set {
            target,
            from,
            content,
            embed_enabled,
            embed,
        } => {
            let mut settings = store.load()?;
            let fields = [
                (target, &mut settings.target_user_id),
                (from, &mut settings.from_user_id),
                (content, &mut settings.message_content),
                (embed.embed_title, &mut settings.embed_title),
                (embed.embed_description, &mut settings.embed_description),
                (embed.embed_image_url, &mut settings.embed_image_url),
            ];
            for (value, field) in fields {
                if let Some(v) = value {
                    *field = v;
                }
            }
            if let Some(enabled) = embed_enabled {
                settings.embed_enabled = enabled;
            }

            store.save(&settings)?;
            println!("{} Settings saved to {:?}", "✓".green(), store.path());
        }

        SettingsAction::Edit => {
            let current = store.load()?;
            let settings = prompt_settings(&current)?;
            store.save(&settings)?;
            println!("{} Settings saved to {:?}", "✓".green(), store.path());
        }

        SettingsAction::Reset => {
            store.save(&FakerSettings::default())?;
            println!("{} Settings reset", "✓".green());
        }
    }

    Ok(())
}

async fn cmd_send(store: &SettingsStore, host: PathBuf, write: bool) -> Result<()> {
    let settings = store.load()?;
    let session = HostSession::open(&host)?;
    debug!(host = ?host, target = %settings.target(), "Sending from settings");

    let outcome = session.plugin().send(&settings).await;
    print_outcome(&outcome);

    if outcome.is_success() && write {
        session.persist()?;
        println!("  {} {:?}", "Snapshot updated:".dimmed(), host);
    }
    session.close();

    if !outcome.is_success() {
        bail!("{}", outcome.notice());
    }
    Ok(())
}

fn cmd_quick_test(store: &SettingsStore, host: PathBuf) -> Result<()> {
    let session = HostSession::open(&host)?;
    let settings = session.plugin().quick_test_settings()?;
    session.close();

    store.save(&settings)?;
    println!("{} Test values filled in", "✓".green());
    print_settings(store, &settings);
    Ok(())
}

async fn cmd_resolve(user_id: String, host: PathBuf) -> Result<()> {
    let session = HostSession::open(&host)?;
    let channel = session.console()?.get_dm_channel(user_id.trim()).await;
    session.close();

    match channel {
        Some(channel_id) => {
            println!("{}", channel_id);
            Ok(())
        }
        None => bail!("No DM channel with user {}", user_id),
    }
}

fn cmd_create(
    channel_id: String,
    author_id: String,
    content: String,
    embed: EmbedArgs,
    host: PathBuf,
) -> Result<()> {
    let session = HostSession::open(&host)?;
    let message =
        session
            .console()?
            .create_message(&channel_id, &author_id, &content, embed.to_embed());
    session.close();

    let json = serde_json::to_string_pretty(&message).context("Failed to serialize message")?;
    println!("{}", json);
    Ok(())
}

fn cmd_inject(
    channel_id: String,
    author_id: String,
    content: String,
    embed: EmbedArgs,
    host: PathBuf,
    write: bool,
) -> Result<()> {
    let session = HostSession::open(&host)?;
    let injected = session
        .console()?
        .inject(&channel_id, &author_id, &content, embed.to_embed());

    if !injected {
        session.close();
        bail!("Failed to inject message into {}", channel_id);
    }

    println!("{} Message injected into {}", "✓".green(), channel_id.cyan());
    if write {
        session.persist()?;
        println!("  {} {:?}", "Snapshot updated:".dimmed(), host);
    }
    session.close();
    Ok(())
}

// ============================================
// Helpers
// ============================================

fn prompt_settings(current: &FakerSettings) -> Result<FakerSettings> {
    let text = |prompt: &str, initial: &str| -> Result<String> {
        Input::<String>::new()
            .with_prompt(prompt)
            .with_initial_text(initial)
            .allow_empty(true)
            .interact_text()
            .context("Failed to read input")
    };

    let mut settings = FakerSettings {
        target_user_id: text("Target User ID (whose DM)", &current.target_user_id)?,
        from_user_id: text("From User ID (who it is from)", &current.from_user_id)?,
        message_content: text("Message content", &current.message_content)?,
        ..current.clone()
    };

    settings.embed_enabled = Confirm::new()
        .with_prompt("Add an embed?")
        .default(current.embed_enabled)
        .interact()
        .context("Failed to read input")?;

    if settings.embed_enabled {
        settings.embed_title = text("Embed title", &current.embed_title)?;
        settings.embed_description = text("Embed description", &current.embed_description)?;
        settings.embed_image_url = text("Embed image URL", &current.embed_image_url)?;
    }

    Ok(settings)
}

fn print_settings(store: &SettingsStore, settings: &FakerSettings) {
    let show = |value: &str| {
        if value.is_empty() {
            "-".dimmed().to_string()
        } else {
            value.cyan().to_string()
        }
    };

    println!("{}", "Settings:".bold());
    println!("  Path: {:?}", store.path());
    println!("  Target User ID: {}", show(&settings.target_user_id));
    println!("  From User ID: {}", show(&settings.from_user_id));
    println!("  Message: {}", show(&settings.message_content));
    println!(
        "  Embed: {}",
        if settings.embed_enabled { "Enabled".green() } else { "Disabled".dimmed() }
    );
    if settings.embed_enabled {
        println!("    Title: {}", show(&settings.embed_title));
        println!("    Description: {}", show(&settings.embed_description));
        println!("    Image URL: {}", show(&settings.embed_image_url));
    }
}

fn print_outcome(outcome: &SendOutcome) {
    match outcome {
        SendOutcome::Injected {
            channel_id,
            message_id,
        } => {
            println!("{} {}", "✓".green(), outcome.notice());
            println!("  {} {}", "Channel:".dimmed(), channel_id.cyan());
            println!("  {} {}", "Message:".dimmed(), message_id);
        }
        SendOutcome::MissingFields(fields) => {
            println!("{} {}", "✗".red(), outcome.notice());
            println!("  {} {}", "Missing:".dimmed(), fields.join(", "));
        }
        _ => println!("{} {}", "✗".red(), outcome.notice()),
    }
}
