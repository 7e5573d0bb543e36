use clap::{Parser, Subcommand};
use dotenv::dotenv;
use log::{error, info};
use serde_json::Value;
use std::path::PathBuf;

use website_issues_search::config::FormConfig;
use website_issues_search::handlers;
use website_issues_search::{website_issues_fields, Catalog};

#[derive(Parser)]
#[command(name = "website-issues-form", version, about = "Normalize website issues search parameters")]
struct Cli {
    /// JSON catalog file; overrides CATALOG_PATH
    #[arg(long, global = true)]
    catalog: Option<PathBuf>,

    /// Pretty-print JSON output
    #[arg(long, global = true)]
    pretty: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Normalize a URL query string such as "q=foo&product=mobile&page=2"
    Normalize {
        query: String,
        /// Reset page, site and cluster as a new text search does
        #[arg(long)]
        reset_paging: bool,
    },
    /// Show the choices the search page renders for a product
    Choices {
        #[arg(long)]
        product: Option<String>,
    },
    /// Validate the catalog and summarize it
    CheckCatalog,
}

fn print_json(value: &Value, pretty: bool) -> Result<(), Box<dyn std::error::Error>> {
    let out = if pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };
    println!("{}", out);
    Ok(())
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load .env file
    dotenv().ok();

    let mut config = FormConfig::load();
    env_logger::init_from_env(env_logger::Env::new().default_filter_or(config.log_level.clone()));

    let cli = Cli::parse();
    if cli.catalog.is_some() {
        config.catalog_path = cli.catalog.clone();
    }

    let catalog = match config.catalog() {
        Ok(catalog) => catalog,
        Err(e) => {
            error!("Catalog failed validation: {}", e);
            if let Command::CheckCatalog = cli.command {
                print_json(&handlers::catalog_error(&e), cli.pretty)?;
            }
            return Err(e.into());
        }
    };
    info!(
        "Catalog ready: {} products, {} platforms",
        catalog.products().len(),
        catalog.platforms().len()
    );

    run(&cli, &catalog)
}

fn run(cli: &Cli, catalog: &Catalog) -> Result<(), Box<dyn std::error::Error>> {
    let fields = website_issues_fields(catalog);

    let output = match &cli.command {
        Command::Normalize {
            query,
            reset_paging,
        } => handlers::normalize_query(query, &fields, catalog, *reset_paging),
        Command::Choices { product } => handlers::list_choices(product.as_deref(), &fields, catalog),
        Command::CheckCatalog => handlers::describe_catalog(catalog),
    };

    print_json(&output, cli.pretty)
}
