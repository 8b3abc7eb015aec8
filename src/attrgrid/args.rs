use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "attrgrid", version)]
#[command(about = "Inspect resolved model attributes for grids and forms", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Directory holding config.json with resolver settings
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List the model types of a definition file
    #[command(alias = "ls")]
    Models {
        /// Definition file (JSON)
        file: PathBuf,
    },

    /// Print the resolved attributes of one or more models
    #[command(alias = "r")]
    Resolve {
        /// Definition file (JSON)
        file: PathBuf,

        /// Models to resolve (all when omitted)
        models: Vec<String>,

        /// Print descriptors as JSON
        #[arg(long)]
        json: bool,
    },

    /// Serialize records of a model as rows
    #[command(alias = "s")]
    Serialize {
        /// Definition file (JSON)
        file: PathBuf,

        /// Model the records belong to
        model: String,

        /// JSON file with an array of records
        records: PathBuf,

        /// Emit name-keyed objects instead of ordered rows
        #[arg(long)]
        keyed: bool,
    },

    /// Show or change resolver settings in the --config directory
    Config {
        /// Setting name (display-fields, datetime-format)
        key: Option<String>,

        /// New value (if omitted, prints the current value)
        value: Option<String>,
    },
}
