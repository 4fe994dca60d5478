//! Validator Generator CLI
//!
//! Reads a JSON shape descriptor and prints the collection validator
//! document it marshals to. Dropped fields are reported on stderr.
//!
//! Descriptor files follow the serde encoding of [`mongo_schema::Shape`]:
//!
//! ```json
//! {
//!   "struct": [
//!     {"name": "Title", "tags": {"validation": "required,min=1"}, "shape": {"scalar": "str"}},
//!     {"name": "Tags", "shape": {"array": [{"scalar": "str"}]}}
//!   ]
//! }
//! ```

use std::fs;
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use mongo_schema::Shape;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "mongo-schema-gen")]
#[command(about = "Generate a MongoDB collection validator from a shape descriptor")]
struct Cli {
    /// Path to a JSON shape descriptor
    shape: PathBuf,

    /// Validator title (defaults to "Schema Validation")
    #[arg(short, long, default_value = "")]
    title: String,

    /// Allow document properties not named in the schema
    #[arg(long)]
    additional_properties: bool,

    /// Pretty-print the output document
    #[arg(long)]
    pretty: bool,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let raw = fs::read_to_string(&cli.shape)
        .with_context(|| format!("reading {}", cli.shape.display()))?;
    let shape: Shape = serde_json::from_str(&raw).context("parsing shape descriptor")?;

    let out = mongo_schema::marshal(&shape, &cli.title, cli.additional_properties)?;
    for warning in &out.warnings {
        eprintln!("warning: field dropped from schema: {warning}");
    }

    if cli.pretty {
        println!("{}", serde_json::to_string_pretty(&out.document)?);
    } else {
        println!("{}", out.document);
    }

    Ok(())
}
