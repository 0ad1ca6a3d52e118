use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "catalog")]
#[command(about = "Search a package catalog from the command line")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Catalog location: http(s) URL or local JSON file
    #[arg(long, global = true, value_name = "URL|PATH")]
    pub catalog: Option<String>,

    /// Policy JSON file with ignore list, website whitelist and search settings
    #[arg(long, global = true, value_name = "PATH")]
    pub policy: Option<PathBuf>,

    /// Entries per results page
    #[arg(long, global = true, value_name = "N")]
    pub limit: Option<usize>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Search the catalog
    Search {
        /// Search query
        #[arg(short, long)]
        query: Option<String>,
        /// Page number (1-based)
        #[arg(short, long)]
        page: Option<String>,
        /// Sort field: name, owner, stars, updated
        #[arg(short, long)]
        sort: Option<String>,
        /// Sort order: asc, desc
        #[arg(short, long)]
        order: Option<String>,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Search with URL-style parameters, e.g. "q=jquery&p=2&s=name&o=asc"
    Query {
        /// Query string
        params: String,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}
