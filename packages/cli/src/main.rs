#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! CLI entry point for the explorer toolchain.

use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};
use pfie_engine::{display_title, export_rows, filter_incidents};
use pfie_engine_models::FilterCriteria;
use pfie_export::ExportFormat;
use pfie_incident_models::{AgencyType, InjuryStatus};

#[derive(Parser)]
#[command(name = "pfie_cli", about = "Police firearm injury explorer toolchain")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Filter selections shared by the data subcommands. Omitted options
/// mean no restriction.
#[derive(Args)]
struct FilterArgs {
    /// Inclusive start date (YYYY-MM-DD); defaults to the dataset's first date
    #[arg(long)]
    start: Option<NaiveDate>,
    /// Inclusive end date (YYYY-MM-DD); defaults to the dataset's last date
    #[arg(long)]
    end: Option<NaiveDate>,
    /// State name (e.g., "Texas"); omit for national
    #[arg(long)]
    state: Option<String>,
    /// Agency type: Local, Sheriff, State, or Special
    #[arg(long)]
    agency: Option<AgencyType>,
    /// Injury status: Fatal or Nonfatal
    #[arg(long)]
    status: Option<InjuryStatus>,
}

impl FilterArgs {
    fn into_criteria(self) -> FilterCriteria {
        FilterCriteria {
            start: self.start,
            end: self.end,
            state: self.state,
            agency: self.agency,
            status: self.status,
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Start the API server
    Serve {
        /// Address to bind
        #[arg(long, default_value = "127.0.0.1")]
        bind: String,
        /// Port to listen on
        #[arg(long, default_value = "8080")]
        port: u16,
        /// Directory containing the source CSV tables (overrides `PFIE_DATA_DIR`)
        #[arg(long)]
        data_dir: Option<PathBuf>,
    },
    /// Export the filtered dataset to a file
    Export {
        /// Directory containing the source CSV tables (overrides `PFIE_DATA_DIR`)
        #[arg(long)]
        data_dir: Option<PathBuf>,
        /// Download format: csv, tsv, or json
        #[arg(long, default_value = "csv")]
        format: ExportFormat,
        /// Output file; defaults to the dated download name in the
        /// current directory
        #[arg(long)]
        out: Option<PathBuf>,
        #[command(flatten)]
        filters: FilterArgs,
    },
    /// Print the count summary and display title for a filter set
    Summary {
        /// Directory containing the source CSV tables (overrides `PFIE_DATA_DIR`)
        #[arg(long)]
        data_dir: Option<PathBuf>,
        #[command(flatten)]
        filters: FilterArgs,
    },
}

/// Resolves the data directory from the CLI flag, the `PFIE_DATA_DIR`
/// environment variable, or the `data` default.
fn resolve_data_dir(flag: Option<PathBuf>) -> PathBuf {
    flag.or_else(|| std::env::var("PFIE_DATA_DIR").ok().map(PathBuf::from))
        .unwrap_or_else(|| PathBuf::from("data"))
}

#[actix_web::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    pretty_env_logger::init_custom_env("RUST_LOG");

    let cli = Cli::parse();

    match cli.command {
        Commands::Serve {
            bind,
            port,
            data_dir,
        } => {
            pfie_server::run_server(&bind, port, &resolve_data_dir(data_dir)).await?;
        }
        Commands::Export {
            data_dir,
            format,
            out,
            filters,
        } => {
            let session = pfie_ingest::load_session(&resolve_data_dir(data_dir))?;
            let criteria = filters.into_criteria();
            let filtered = filter_incidents(&session, &criteria);
            let rows = export_rows(&filtered);
            let content = pfie_export::serialize(&rows, format)?;

            let path = out.unwrap_or_else(|| {
                PathBuf::from(pfie_export::download_filename(
                    chrono::Local::now().date_naive(),
                    format,
                ))
            });
            std::fs::write(&path, content)?;
            println!("{} -> {}", filtered.summary, path.display());
        }
        Commands::Summary { data_dir, filters } => {
            let session = pfie_ingest::load_session(&resolve_data_dir(data_dir))?;
            let criteria = filters.into_criteria();
            let filtered = filter_incidents(&session, &criteria);
            println!("{}", display_title(&session, &criteria));
            println!("{}", filtered.summary);
        }
    }

    Ok(())
}
