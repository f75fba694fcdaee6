use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use runtime::{AppConfig, CliArgs};
use std::path::{Path, PathBuf};

use users_info::domain::repo::UsersRepository;
use users_info::{in_memory_service, UsersInfoConfig};

mod demo;

const MODULE_NAME: &str = "users_info";

/// Users CLI - drives the user domain service over an in-memory store
#[derive(Parser)]
#[command(name = "users-cli")]
#[command(about = "Users CLI - drives the user domain service over an in-memory store")]
#[command(version = "0.1.0")]
struct Cli {
    /// Path to configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Print current configuration and exit
    #[arg(long)]
    print_config: bool,

    /// Log verbosity level (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the user lifecycle walkthrough and print each step as JSON
    Demo,
    /// Seed sample users and print the active ones as JSON
    List,
    /// Check configuration
    Check,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let args = CliArgs {
        print_config: cli.print_config,
        verbose: cli.verbose,
    };

    // Load configuration (normalized home_dir is applied inside)
    let mut config = AppConfig::load_or_default(cli.config.as_deref())?;
    config.apply_cli_overrides(&args);

    let logging_config = config.logging.clone().unwrap_or_default();
    runtime::logging::init_logging_from_config(&logging_config, Path::new(&config.home_dir));
    tracing::info!("Users CLI starting");

    if args.print_config {
        println!("{}", config.to_yaml()?);
        return Ok(());
    }

    let module_config = UsersInfoConfig::from_value(config.module_value(MODULE_NAME))?;

    match cli.command.unwrap_or(Commands::Demo) {
        Commands::Demo => run_demo(&module_config),
        Commands::List => list_active(&module_config),
        Commands::Check => check_config(&config, &module_config),
    }
}

fn run_demo(module_config: &UsersInfoConfig) -> Result<()> {
    let (service, repo) = in_memory_service(module_config);

    let reports = demo::run_lifecycle(&service);
    for report in &reports {
        println!("{}", serde_json::to_string(report)?);
    }

    let remaining = repo.find_all()?;
    tracing::info!(remaining = remaining.len(), "Demo finished");

    let deviations = reports.iter().filter(|r| !r.as_expected()).count();
    if deviations > 0 {
        bail!("{deviations} demo step(s) did not behave as expected");
    }
    Ok(())
}

fn list_active(module_config: &UsersInfoConfig) -> Result<()> {
    let (service, _repo) = in_memory_service(module_config);
    demo::seed(&service).context("Failed to seed users")?;

    let active = service.get_all_active_users()?;
    println!("{}", serde_json::to_string_pretty(&active)?);
    Ok(())
}

fn check_config(config: &AppConfig, module_config: &UsersInfoConfig) -> Result<()> {
    tracing::info!("Checking configuration...");
    module_config.validate()?;

    println!("Configuration check passed");
    println!("{}", config.to_yaml()?);
    println!("{MODULE_NAME}:");
    println!("  first_id: {}", module_config.first_id);
    println!("  unique_index: {}", module_config.unique_index);
    Ok(())
}
