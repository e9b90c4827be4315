use clap::ArgAction;
use clap::{Args, Parser, Subcommand};
use dotenvy::dotenv;
use gigbook_server::cli_error::CliError;
use log::{error, warn};
use std::path::PathBuf;

fn main() {
    let args = CliArgs::parse();
    let dotenv_result = dotenv();

    let env = env_logger::Env::new().filter_or(
        "RUST_LOG",
        match args.global_opts.verbose {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        },
    );
    env_logger::Builder::from_env(env).init();
    if let Err(e) = dotenv_result {
        warn!("Could not read .env file: {}", e);
    }

    if let Err(e) = run(args.command) {
        error!("{}", e);
        std::process::exit(e.exit_code());
    }
}

fn run(command: Command) -> Result<(), CliError> {
    match command {
        Command::Serve => gigbook_server::web::serve(),
        Command::Migrate => gigbook_server::cli::database_migration::run_migrations(),
        Command::LoadData { path } => {
            gigbook_server::cli::file_io::load_directory_from_file(&path)
        }
        Command::ExportData { path } => {
            gigbook_server::cli::file_io::export_directory_to_file(&path)
        }
        Command::ListVenues => gigbook_server::cli::manage_directory::print_venue_list(),
    }
}

/// Directory of venues and artists, with booking of shows
#[derive(Debug, Parser)]
#[clap(name = "gigbook", version)]
pub struct CliArgs {
    #[clap(flatten)]
    global_opts: GlobalOpts,

    #[clap(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Serve the JSON API of the directory
    Serve,
    /// Migrate the database schema to the current version
    Migrate,
    /// Import venues, artists and shows from a JSON file
    LoadData {
        /// The path of the JSON file to read from
        path: PathBuf,
    },
    /// Export all venues, artists and shows to a JSON file
    ExportData {
        /// The path of the JSON file to write to
        path: PathBuf,
    },
    /// Print all venues, grouped by location
    ListVenues,
}

#[derive(Debug, Args)]
struct GlobalOpts {
    /// Verbosity level (can be specified multiple times)
    #[clap(long, short, global = true, action = ArgAction::Count)]
    verbose: u8,
}
