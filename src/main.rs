use app_lib::config::AppConfig;
use clap::Parser;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

/// Load a CSV of persons into SQLite and print their age distribution
#[derive(Parser, Debug)]
#[command(name = "agedist")]
#[command(version, about, long_about = None)]
struct Cli {
    /// CSV file to load (overrides FILE_PATH)
    #[arg(long)]
    csv: Option<PathBuf>,

    /// SQLite database path or sqlite:// URL (overrides DB_URL)
    #[arg(long)]
    db: Option<String>,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let env = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(env)
        .with_writer(std::io::stderr)
        .init();

    let config = match AppConfig::from_env(cli.db, cli.csv) {
        Ok(c) => c,
        Err(e) => {
            log::error!("{}", e);
            return ExitCode::FAILURE;
        }
    };

    match app_lib::run(&config) {
        Ok(report) => {
            print!("{}", report);
            ExitCode::SUCCESS
        }
        Err(e) => {
            log::error!("[{}] {}", e.code(), e);
            ExitCode::FAILURE
        }
    }
}
