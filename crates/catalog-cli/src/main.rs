//! Catalog CLI - Search a package catalog from the command line
//!
//! Loads the catalog once per invocation and prints one page of results.

mod cli;
mod commands;
mod error;


use catalog_core::config::CatalogConfig;
use catalog_core::RawParams;
use clap::Parser;

use crate::cli::{Cli, Commands};
use crate::commands::common::resolve_context;
use crate::commands::search::run_search;
use crate::error::CliError;

const DEFAULT_LOG_DIRECTIVES: [&str; 2] = ["catalog=info", "catalog_core=info"];

#[tokio::main]
async fn main() {
    if let Err(error) = run().await {
        eprintln!("Error: {error}");
        std::process::exit(1);
    }
}

async fn run() -> Result<(), CliError> {
    dotenvy::dotenv().ok();
    init_tracing();

    let cli = Cli::parse();

    match cli.command {
        Commands::Search {
            query,
            page,
            sort,
            order,
            json,
        } => {
            let context = resolve_context(
                cli.catalog.as_deref(),
                cli.policy.as_deref(),
                cli.limit,
                CatalogConfig::from_env()?,
            )?;
            let params = RawParams {
                q: query,
                p: page,
                s: sort,
                o: order,
            };
            run_search(&params, json, &context).await?;
        }
        Commands::Query { params, json } => {
            let context = resolve_context(
                cli.catalog.as_deref(),
                cli.policy.as_deref(),
                cli.limit,
                CatalogConfig::from_env()?,
            )?;
            run_search(&RawParams::from_query(&params), json, &context).await?;
        }
    }

    Ok(())
}

fn init_tracing() {
    let mut filter = tracing_subscriber::EnvFilter::from_default_env();
    for directive in DEFAULT_LOG_DIRECTIVES {
        if let Ok(directive) = directive.parse() {
            filter = filter.add_directive(directive);
        }
    }

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(filter)
        .init();
}
