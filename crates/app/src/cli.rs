use std::path::PathBuf;

use clap::{Parser, Subcommand};
use waypost_application::config::{DEFAULT_MAX_FILE_SIZE, DEFAULT_SCHEMA_DEPTH_LIMIT};

/// Command-line arguments.
#[derive(Parser, Debug)]
#[command(name = "waypost")]
#[command(author, version, about = "Convert Postman and OpenAPI collections")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Reject input files larger than this many bytes
    #[arg(
        long,
        env = "WAYPOST_MAX_FILE_SIZE",
        value_name = "BYTES",
        default_value_t = DEFAULT_MAX_FILE_SIZE,
        global = true
    )]
    pub max_file_size: u64,

    /// How deep `$ref` chains are followed when synthesizing OpenAPI examples
    #[arg(long, value_name = "DEPTH", default_value_t = DEFAULT_SCHEMA_DEPTH_LIMIT, global = true)]
    pub schema_depth_limit: usize,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Print the detected format of a collection file
    Detect {
        /// Collection or specification file
        #[arg(value_name = "FILE")]
        input: PathBuf,
    },
    /// Import a collection and print a summary
    Import {
        /// Collection or specification file
        #[arg(value_name = "FILE")]
        input: PathBuf,
    },
    /// Import any supported format and write Postman Collection v2.1 JSON
    Convert {
        /// Collection or specification file
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Where the Postman v2.1 collection is written
        #[arg(value_name = "OUT")]
        output: PathBuf,
    },
    /// List the supported import and export formats
    Formats,
}
