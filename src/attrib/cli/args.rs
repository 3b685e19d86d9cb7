use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "attrib", bin_name = "attrib", version)]
#[command(about = "Inspect and merge typed entity attributes", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Config file to use (defaults to ./attrib.json, then the user config dir)
    #[arg(long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Verbose output (debug logging on stderr)
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Show the attributes in a document
    #[command(alias = "ls")]
    Show {
        /// Attribute document (JSON array)
        doc: PathBuf,

        /// Only these attribute ids (repeatable)
        #[arg(long = "id", value_name = "ID")]
        ids: Vec<String>,

        /// Only this kind (wire name or short name, e.g. mapped)
        #[arg(short, long)]
        kind: Option<String>,

        /// Projection filter: key=value, key!=value, key~value or key? (repeatable)
        #[arg(short = 'w', long = "where", value_name = "EXPR")]
        filters: Vec<String>,

        /// Print projections as JSON
        #[arg(long)]
        json: bool,
    },

    /// Apply the attributes of one document to another
    #[command(alias = "a")]
    Apply {
        /// Attribute document to change
        doc: PathBuf,

        /// Attributes to apply
        updates: PathBuf,

        /// Replace attributes with the same id instead of merging
        #[arg(long)]
        replace: bool,

        /// Write the result here instead of back to DOC
        #[arg(short, long, value_name = "FILE")]
        out: Option<PathBuf>,
    },

    /// Show what applies to a service, and check an HA partner
    #[command(alias = "c")]
    Check {
        /// Attribute document
        doc: PathBuf,

        /// Service URL
        #[arg(short, long)]
        service: String,

        /// Partner id to look for among the HA partners
        #[arg(short, long)]
        partner: Option<String>,
    },

    /// Get or set configuration
    Config {
        /// Configuration key (allow-update, pretty, log-level)
        key: Option<String>,

        /// Value to set (if omitted, prints current value)
        value: Option<String>,
    },
}
