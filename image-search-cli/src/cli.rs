// ABOUTME: CLI argument definitions for the image search client
// ABOUTME: Defines the command-line interface structure using clap derive macros

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "image-search")]
#[command(about = "Client for a search-by-image service", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Read settings from this file instead of the standard locations
    #[arg(long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Base URL of the search service (e.g., http://127.0.0.1:8000)
    #[arg(long, global = true)]
    pub api_url: Option<String>,

    /// Backend processing pipeline
    #[arg(long, short, global = true)]
    pub pipeline: Option<String>,

    /// Collection to import into, search in, list or remove from
    #[arg(long, short, global = true)]
    pub collection: Option<String>,

    /// Directory recorded as the location of imported files
    #[arg(long, global = true, value_name = "DIR")]
    pub image_path: Option<String>,

    /// Request timeout in seconds
    #[arg(long, global = true, value_parser = clap::value_parser!(u64).range(1..))]
    pub timeout: Option<u64>,

    /// Extra request header as "name: value" (repeatable)
    #[arg(long = "header", global = true, value_name = "HEADER")]
    pub headers: Vec<String>,

    /// Output results as JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Enable verbose output for debugging
    #[arg(long, short, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Where the submitted image comes from. Giving none counts as no file selected.
#[derive(Args, Debug, Clone, Default, PartialEq)]
#[group(multiple = false)]
pub struct SourceArgs {
    /// Upload a local image file
    #[arg(long, value_name = "PATH")]
    pub file: Option<PathBuf>,

    /// Send a local image file encoded as a Base64 data URI
    #[arg(long, value_name = "PATH")]
    pub base64: Option<PathBuf>,

    /// Let the service fetch the image from a URL
    #[arg(long)]
    pub url: Option<String>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Import an image into a collection
    Import {
        #[command(flatten)]
        source: SourceArgs,
    },
    /// Search for images similar to the given one
    Search {
        #[command(flatten)]
        source: SourceArgs,
    },
    /// List imported images
    Images {
        /// Only list images whose field matches (requires --value)
        #[arg(long, requires = "values")]
        field: Option<String>,

        /// Value to match; repeat to match any of several values
        #[arg(long = "value", value_name = "VALUE", requires = "field")]
        values: Vec<String>,

        /// Number of images per page
        #[arg(long, value_parser = clap::value_parser!(u32).range(1..))]
        page_size: Option<u32>,

        /// Page to fetch, starting at 1
        #[arg(long, default_value = "1", value_parser = clap::value_parser!(u32).range(1..))]
        page: u32,
    },
    /// Remove an imported image
    Remove {
        /// Id of the image to remove
        #[arg(long)]
        id: Option<String>,
    },
}
