use amfinav::cli::funds::FundFilter;
use amfinav::core::log::init_logging;
use anyhow::Result;
use clap::{CommandFactory, Parser, Subcommand};

#[derive(Parser)]
#[command(version, about)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to optional configuration file
    #[arg(short, long, global = true)]
    config_path: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Create default configuration
    Setup,
    /// List scheme categories in feed order
    Categories,
    /// List fund houses
    Houses,
    /// List funds with their latest NAV
    Funds {
        /// Only show funds from this fund house
        #[arg(long)]
        house: Option<String>,
        /// Only show funds in this category
        #[arg(long)]
        category: Option<String>,
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },
    /// Show details of a single scheme
    Fund {
        /// AMFI scheme code
        code: String,
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },
}

impl From<Commands> for amfinav::AppCommand {
    fn from(cmd: Commands) -> amfinav::AppCommand {
        match cmd {
            Commands::Categories => amfinav::AppCommand::Categories,
            Commands::Houses => amfinav::AppCommand::FundHouses,
            Commands::Funds {
                house,
                category,
                json,
            } => amfinav::AppCommand::Funds {
                filter: FundFilter {
                    fund_house: house,
                    category,
                },
                json,
            },
            Commands::Fund { code, json } => amfinav::AppCommand::Fund { code, json },
            Commands::Setup => unreachable!("Setup command should be handled separately"),
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbose);

    let result = match cli.command {
        Some(Commands::Setup) => amfinav::cli::setup::setup(),
        Some(cmd) => amfinav::run_command(cmd.into(), cli.config_path.as_deref()).await,
        None => {
            Cli::command().print_help()?;
            Ok(())
        }
    };

    if let Err(e) = &result {
        tracing::error!(error = %e, "Application failed");
    }
    result
}
