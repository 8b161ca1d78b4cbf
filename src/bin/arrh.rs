//! arrh - array helper CLI
//!
//! Merges JSON/YAML documents and reads or edits values inside them by
//! delimited path.

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use tracing::{debug, info};

use array_helper::value::{from_json, from_yaml, to_json_pretty};
use array_helper::{get_by_path, merge, path_exists, remove_by_path, set_by_path, Array, Value};

#[derive(Parser)]
#[command(
    name = "arrh",
    about = "Merge JSON/YAML documents and access values by path",
    version,
    long_about = None
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Path delimiter
    #[arg(short, long, default_value = ".", global = true)]
    delimiter: String,

    /// Output location, '-' for stdout
    #[arg(short, long, default_value = "-", global = true)]
    output: String,

    /// Enable verbose output (use -vv for debug output)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[derive(Subcommand)]
enum Commands {
    /// Merge documents recursively, later files win
    Merge {
        #[arg(required = true)]
        files: Vec<PathBuf>,
    },

    /// Print the value at a path
    Get {
        file: PathBuf,
        path: String,

        /// JSON value printed when the path does not exist
        #[arg(long, default_value = "null")]
        default: String,
    },

    /// Set the value at a path and print the document
    Set {
        file: PathBuf,
        path: String,

        /// JSON value to store
        value: String,
    },

    /// Remove the value at a path and print the document
    Remove { file: PathBuf, path: String },

    /// Print whether a path exists
    Exists {
        file: PathBuf,
        path: String,

        /// Compare keys ignoring ASCII case
        #[arg(short, long)]
        ignore_case: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbose);

    let result = match &cli.command {
        Commands::Merge { files } => merge_command(files)?,
        Commands::Get { file, path, default } => {
            let document = load(file)?;
            let default = from_json(default).context("--default is not valid JSON")?;
            get_by_path(&document, path.as_str(), default, &cli.delimiter)?
        }
        Commands::Set { file, path, value } => {
            let mut document = load(file)?;
            let value = from_json(value).context("value is not valid JSON")?;
            set_by_path(&mut document, path.as_str(), value, &cli.delimiter)?;
            document
        }
        Commands::Remove { file, path } => {
            let mut document = load(file)?;
            let removed = remove_by_path(&mut document, path.as_str(), Value::Null, &cli.delimiter)?;
            info!(path = %path, removed = removed.type_name(), "removed value");
            document
        }
        Commands::Exists {
            file,
            path,
            ignore_case,
        } => {
            let document = load(file)?;
            let Value::Array(array) = &document else {
                bail!("{} does not contain an array", file.display());
            };
            Value::Bool(path_exists(array, path.as_str(), !ignore_case, &cli.delimiter)?)
        }
    };

    write_output(&cli.output, &result)
}

fn init_logging(verbose: u8) {
    use tracing_subscriber::EnvFilter;

    let filter = match verbose {
        0 => EnvFilter::new("arrh=warn,array_helper=warn"),
        1 => EnvFilter::new("arrh=info,array_helper=info"),
        _ => EnvFilter::new("arrh=debug,array_helper=debug"),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .without_time()
        .with_writer(io::stderr)
        .init();
}

fn merge_command(files: &[PathBuf]) -> Result<Value> {
    let mut arrays: Vec<Array> = Vec::with_capacity(files.len());
    for file in files {
        match load(file)? {
            Value::Array(array) => arrays.push(array),
            other => bail!(
                "{} holds a {}, only arrays can be merged",
                file.display(),
                other.type_name()
            ),
        }
    }
    Ok(Value::Array(merge(arrays)))
}

fn load(file: &Path) -> Result<Value> {
    debug!(file = %file.display(), "loading document");
    let content = fs::read_to_string(file)
        .with_context(|| format!("failed to read {}", file.display()))?;
    let is_yaml = matches!(
        file.extension().and_then(|e| e.to_str()),
        Some("yaml") | Some("yml")
    );
    let value = if is_yaml {
        from_yaml(&content).with_context(|| format!("failed to parse {} as YAML", file.display()))?
    } else {
        from_json(&content).with_context(|| format!("failed to parse {} as JSON", file.display()))?
    };
    Ok(value)
}

fn write_output(output: &str, value: &Value) -> Result<()> {
    let rendered = to_json_pretty(value)?;
    if output == "-" {
        let mut stdout = io::stdout().lock();
        writeln!(stdout, "{rendered}")?;
    } else {
        fs::write(output, format!("{rendered}\n"))
            .with_context(|| format!("failed to write {output}"))?;
    }
    Ok(())
}
