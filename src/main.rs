use clap::{Parser, Subcommand};
use rust_fifo_gains::commands::holdings::holdings;
use rust_fifo_gains::commands::report::report;
use rust_fifo_gains::load_lot_config;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(std::env::var("RUST_LOG").unwrap_or_else(|_| "warn".to_string()))
        .with_writer(std::io::stderr)
        .init();

    let command = Cli::parse();
    let config = match load_lot_config() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error loading configuration: {}", e);
            std::process::exit(1);
        }
    };

    match command.subcommand {
        Command::Report { file, year, export } => {
            match report(&file, year, export, &config) {
                Ok(_) => {}
                Err(e) => {
                    eprintln!("Error reporting realized gains from {:?}: {}", file, e);
                    std::process::exit(1);
                }
            };
        }
        Command::Holdings { file, export } => {
            match holdings(&file, export, &config) {
                Ok(_) => {}
                Err(e) => {
                    eprintln!("Error reporting holdings from {:?}: {}", file, e);
                    std::process::exit(1);
                }
            };
        }
    }
}

#[derive(Subcommand)]
enum Command {
    /// Print realized gain/loss for a reporting year from an exchange export
    Report {
        /// The transactions export to read (either supported schema)
        #[clap(long)]
        file: std::path::PathBuf,
        /// The four-digit reporting year
        #[clap(long, value_parser = clap::value_parser!(i32).range(1000..=9999))]
        year: i32,
        /// Also save the report as CSV in the reports directory
        #[clap(long)]
        export: bool,
    },
    /// Print the lots still open after replaying the whole export
    Holdings {
        /// The transactions export to read (either supported schema)
        #[clap(long)]
        file: std::path::PathBuf,
        /// Also save the holdings as CSV in the reports directory
        #[clap(long)]
        export: bool,
    },
}

#[derive(Parser)]
struct Cli {
    #[clap(subcommand)]
    subcommand: Command,
}
