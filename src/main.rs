//! Sui Split Studio CLI
//!
//! Distribution stats, a live dashboard, and fund distributor calls
//! for Sui.

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use env_logger::Env;
use std::path::PathBuf;
use std::sync::Arc;

use sui_split_studio::commands::{
    display_version, execute_check, execute_event, execute_feed, execute_split, execute_stats,
    execute_template, execute_watch, validate_snapshot_file, EventAction, EventArgs, FeedArgs,
    RecipientSource, SignerArgs, SplitArgs, StatsArgs, ViewArgs, WatchArgs,
};
use sui_split_studio::poller::ViewMode;
use sui_split_studio::rpc::{ChainReader, RpcClient};
use sui_split_studio::utils::config::{load_settings, Settings, FEED_LIMIT};

/// Sui Split Studio - token distribution stats and calls for Sui
#[derive(Parser, Debug)]
#[command(name = "sui-split")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    command: Commands,

    /// Settings file (TOML)
    #[arg(long, global = true, env = "SUI_SPLIT_CONFIG")]
    config: Option<PathBuf>,

    /// RPC endpoint URL (overrides the settings file)
    #[arg(long, global = true, env = "SUI_RPC_URL")]
    rpc: Option<String>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Args, Debug)]
struct ViewOpts {
    /// Which distributions to show
    #[arg(short, long, value_enum, default_value = "all")]
    mode: ViewMode,

    /// Connected account address
    #[arg(long, env = "SUI_ADDRESS")]
    viewer: Option<String>,
}

impl From<ViewOpts> for ViewArgs {
    fn from(opts: ViewOpts) -> Self {
        ViewArgs {
            mode: opts.mode,
            viewer: opts.viewer,
        }
    }
}

#[derive(Args, Debug)]
struct SignerOpts {
    /// Sending account address
    #[arg(long, global = true, env = "SUI_ADDRESS")]
    sender: Option<String>,

    /// External signer command; receives the intent JSON on stdin
    #[arg(long, global = true, env = "SUI_SIGNER_CMD")]
    signer_cmd: Option<String>,

    /// Write the unsigned intent to this file
    #[arg(long, global = true)]
    out: Option<PathBuf>,
}

impl From<SignerOpts> for SignerArgs {
    fn from(opts: SignerOpts) -> Self {
        SignerArgs {
            sender: opts.sender,
            signer_cmd: opts.signer_cmd,
            out: opts.out,
        }
    }
}

#[derive(Args, Debug)]
struct RecipientOpts {
    /// Comma or newline separated recipient addresses
    #[arg(long)]
    to: Option<String>,

    /// CSV file of recipients (address, optional amount)
    #[arg(long)]
    csv: Option<PathBuf>,
}

impl From<RecipientOpts> for RecipientSource {
    fn from(opts: RecipientOpts) -> Self {
        RecipientSource {
            inline: opts.to,
            csv: opts.csv,
        }
    }
}

/// Available commands
#[derive(Subcommand, Debug)]
enum Commands {
    /// Fetch the last distributions and print statistics
    Stats {
        #[command(flatten)]
        view: ViewOpts,

        /// Output path for a JSON snapshot
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Live dashboard, refreshed on an interval
    Watch {
        #[command(flatten)]
        view: ViewOpts,

        /// Poll interval in seconds
        #[arg(long)]
        interval: Option<u64>,
    },

    /// Recent recipients ticker
    Feed {
        /// Number of entries
        #[arg(long, default_value_t = FEED_LIMIT)]
        limit: usize,
    },

    /// Equal split or CSV airdrop through the splitter
    Split {
        #[command(flatten)]
        recipients: RecipientOpts,

        /// Total SUI (required for an equal split)
        #[arg(short, long)]
        amount: Option<String>,

        #[command(flatten)]
        signer: SignerOpts,
    },

    /// Staged distribution events
    Event {
        #[command(subcommand)]
        action: EventCommand,

        #[command(flatten)]
        signer: SignerOpts,
    },

    /// Recipient list helpers
    Recipients {
        #[command(subcommand)]
        action: RecipientsCommand,
    },

    /// Validate a snapshot JSON file
    Validate {
        /// Path to snapshot JSON file
        #[arg(short, long)]
        file: PathBuf,
    },

    /// Display version information
    Version,
}

#[derive(Subcommand, Debug)]
enum EventCommand {
    /// Create an empty event
    Create {
        #[arg(long)]
        name: String,
    },
    /// Deposit SUI into an event
    Fund {
        #[arg(long)]
        event: String,
        #[arg(short, long)]
        amount: String,
    },
    /// Add recipients to an event
    AddRecipients {
        #[arg(long)]
        event: String,
        #[command(flatten)]
        recipients: RecipientOpts,
    },
    /// Pay out an event
    Distribute {
        #[arg(long)]
        event: String,
    },
    /// Return an event's deposit to its creator
    Withdraw {
        #[arg(long)]
        event: String,
    },
    /// Split an amount equally and pay out in one call
    CreateAndDistribute {
        #[arg(long)]
        name: String,
        #[command(flatten)]
        recipients: RecipientOpts,
        #[arg(short, long)]
        amount: String,
    },
    /// Create, fund, and add recipients in one transaction
    Launch {
        #[arg(long)]
        name: String,
        #[command(flatten)]
        recipients: RecipientOpts,
        #[arg(short, long)]
        amount: String,
    },
    /// Show one event object
    Show {
        #[arg(long)]
        event: String,
    },
    /// List events owned by an address
    List {
        #[arg(long, env = "SUI_ADDRESS")]
        owner: String,
    },
}

#[derive(Subcommand, Debug)]
enum RecipientsCommand {
    /// Validate a recipient list
    Check {
        #[command(flatten)]
        recipients: RecipientOpts,
    },
    /// Print or write the CSV template
    Template {
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

impl From<EventCommand> for EventAction {
    fn from(command: EventCommand) -> Self {
        match command {
            EventCommand::Create { name } => EventAction::Create { name },
            EventCommand::Fund { event, amount } => EventAction::Fund {
                event_id: event,
                amount,
            },
            EventCommand::AddRecipients { event, recipients } => EventAction::AddRecipients {
                event_id: event,
                recipients: recipients.into(),
            },
            EventCommand::Distribute { event } => EventAction::Distribute { event_id: event },
            EventCommand::Withdraw { event } => EventAction::Withdraw { event_id: event },
            EventCommand::CreateAndDistribute {
                name,
                recipients,
                amount,
            } => EventAction::CreateAndDistribute {
                name,
                recipients: recipients.into(),
                amount,
            },
            EventCommand::Launch {
                name,
                recipients,
                amount,
            } => EventAction::Launch {
                name,
                recipients: recipients.into(),
                amount,
            },
            EventCommand::Show { event } => EventAction::Show { event_id: event },
            EventCommand::List { owner } => EventAction::List { owner },
        }
    }
}

fn main() -> Result<()> {
    // Parse CLI arguments
    let cli = Cli::parse();

    // Setup logging
    let log_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(Env::default().default_filter_or(log_level)).init();

    let settings = resolve_settings(cli.config.as_ref(), cli.rpc)?;

    match cli.command {
        Commands::Stats { view, output, json } => {
            let reader = connect(&settings)?;
            let args = StatsArgs {
                view: view.into(),
                output,
                json,
            };
            execute_stats(reader.as_ref(), &settings, args)?;
        }

        Commands::Watch { view, interval } => {
            let reader = connect(&settings)?;
            let args = WatchArgs {
                view: view.into(),
                interval_secs: interval,
            };
            execute_watch(reader, &settings, args)?;
        }

        Commands::Feed { limit } => {
            let reader = connect(&settings)?;
            execute_feed(reader.as_ref(), &settings, FeedArgs { limit })?;
        }

        Commands::Split {
            recipients,
            amount,
            signer,
        } => {
            let args = SplitArgs {
                recipients: recipients.into(),
                amount,
                signer: signer.into(),
            };
            execute_split(&settings, args)?;
        }

        Commands::Event { action, signer } => {
            let reader = connect(&settings)?;
            let args = EventArgs {
                action: action.into(),
                signer: signer.into(),
            };
            execute_event(reader.as_ref(), &settings, args)?;
        }

        Commands::Recipients { action } => match action {
            RecipientsCommand::Check { recipients } => {
                execute_check(&recipients.into())?;
            }
            RecipientsCommand::Template { output } => {
                execute_template(output.as_deref())?;
            }
        },

        Commands::Validate { file } => {
            validate_snapshot_file(file)?;
        }

        Commands::Version => {
            display_version();
        }
    }

    Ok(())
}

/// Settings file first, then flag / environment overrides
fn resolve_settings(config: Option<&PathBuf>, rpc: Option<String>) -> Result<Settings> {
    let mut settings = match config {
        Some(path) => load_settings(path)
            .with_context(|| format!("Failed to load settings from {}", path.display()))?,
        None => Settings::default(),
    };

    if let Some(rpc) = rpc {
        settings.rpc_url = rpc;
    }

    Ok(settings)
}

fn connect(settings: &Settings) -> Result<Arc<dyn ChainReader>> {
    let client = RpcClient::new(settings.rpc_url.clone()).context("Failed to create RPC client")?;
    Ok(Arc::new(client))
}
