//! bitcache CLI - identifiers and Bloom filters from the command line
//!
//! Every command prints a single JSON document on stdout so the tool can
//! be driven from scripts. Logs go to stderr.

use bitcache::{Config, Encoder, Filter, Identifier, MergeOp};
use clap::{Parser, Subcommand};
use std::io::Read;
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "bitcache")]
#[command(about = "Content-addressable identifiers and Bloom filters")]
#[command(version)]
struct Cli {
    /// Output format (json or text)
    #[arg(short, long, default_value = "json")]
    format: OutputFormat,

    /// Enable debug logging on stderr
    #[arg(short, long)]
    verbose: bool,

    /// Path to a config file (defaults to ~/.config/bitcache/config.json)
    #[arg(long)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, clap::ValueEnum)]
enum OutputFormat {
    Json,
    Text,
}

#[derive(Subcommand)]
enum Commands {
    /// Compute identifiers for files (or stdin)
    Id {
        /// Files to hash
        files: Vec<PathBuf>,
        /// Hash standard input instead of files
        #[arg(long)]
        stdin: bool,
        /// Also print the identifier in this base (62 or 94)
        #[arg(short, long)]
        base: Option<u32>,
    },

    /// Validate and describe a hex identifier
    Parse {
        /// The identifier in hex
        hex: String,
    },

    /// Create, update and query filter files
    Filter {
        #[command(subcommand)]
        command: FilterCommands,
    },
}

#[derive(Subcommand)]
enum FilterCommands {
    /// Create an empty filter file
    New {
        /// Path of the filter file
        path: PathBuf,
        /// Bitmap size in bytes
        #[arg(short, long)]
        capacity: Option<usize>,
    },

    /// Insert identifiers into a filter
    Insert {
        /// Path of the filter file
        path: PathBuf,
        /// Identifiers in hex
        ids: Vec<String>,
        /// Insert the identifier of this file's contents
        #[arg(long = "file")]
        files: Vec<PathBuf>,
    },

    /// Test identifiers against a filter
    ///
    /// Exits 1 if any identifier is absent and 2 if one is malformed.
    Check {
        /// Path of the filter file
        path: PathBuf,
        /// Identifiers in hex
        #[arg(required = true)]
        ids: Vec<String>,
    },

    /// Show size and occupancy of a filter
    Info {
        /// Path of the filter file
        path: PathBuf,
    },

    /// Combine two equal-size filters into a new file
    Merge {
        /// First filter
        a: PathBuf,
        /// Second filter
        b: PathBuf,
        /// Bitwise operation: or, and, xor
        #[arg(long, default_value = "or")]
        op: MergeOp,
        /// Where to write the merged filter
        #[arg(short, long)]
        output: PathBuf,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    bitcache::logging::setup_logging(cli.verbose);

    let config = load_config(cli.config.as_deref())?;

    match cli.command {
        Commands::Id { files, stdin, base } => {
            let encoder = base.map(Encoder::for_base).transpose()?;
            let mut inputs: Vec<(String, Vec<u8>)> = Vec::new();
            if stdin || files.is_empty() {
                let mut data = Vec::new();
                std::io::stdin().read_to_end(&mut data)?;
                inputs.push(("-".to_string(), data));
            }
            for file in &files {
                inputs.push((file.display().to_string(), std::fs::read(file)?));
            }

            let items: Vec<_> = inputs
                .iter()
                .map(|(name, data)| {
                    let id = Identifier::digest(data);
                    let mut item = describe(&id);
                    item["source"] = serde_json::json!(name);
                    item["bytes"] = serde_json::json!(data.len());
                    if let Some(encoder) = &encoder {
                        item[encoder.name()] = serde_json::json!(id.encode(encoder));
                    }
                    item
                })
                .collect();
            output(
                &cli.format,
                &serde_json::json!({
                    "count": items.len(),
                    "ids": items
                }),
            );
        }

        Commands::Parse { hex } => match Identifier::parse(&hex) {
            Ok(id) => output(&cli.format, &describe(&id)),
            Err(e) => {
                output(
                    &cli.format,
                    &serde_json::json!({
                        "status": "error",
                        "message": e.to_string()
                    }),
                );
                std::process::exit(1);
            }
        },

        Commands::Filter { command } => run_filter(command, &cli.format, &config)?,
    }

    Ok(())
}

fn run_filter(
    command: FilterCommands,
    format: &OutputFormat,
    config: &Config,
) -> anyhow::Result<()> {
    match command {
        FilterCommands::New { path, capacity } => {
            let filter = Filter::with_capacity(capacity.unwrap_or(config.default_capacity))?;
            filter.save(&path, config.write_header)?;
            output(
                format,
                &serde_json::json!({
                    "status": "ok",
                    "path": path.display().to_string(),
                    "bytesize": filter.bytesize()
                }),
            );
        }

        FilterCommands::Insert { path, ids, files } => {
            let mut filter = Filter::load(&path)?;
            let mut inserted = Vec::new();
            for hex in &ids {
                inserted.push(Identifier::parse(hex)?);
            }
            for file in &files {
                inserted.push(Identifier::digest(&std::fs::read(file)?));
            }
            for id in &inserted {
                filter.insert(id)?;
            }
            filter.save(&path, config.write_header)?;
            tracing::debug!(count = inserted.len(), "inserted identifiers");
            output(
                format,
                &serde_json::json!({
                    "status": "ok",
                    "inserted": inserted.iter().map(|id| id.to_hex()).collect::<Vec<_>>(),
                    "space": filter.space()
                }),
            );
        }

        FilterCommands::Check { path, ids } => {
            let filter = Filter::load(&path)?;
            let parsed = match ids
                .iter()
                .map(|hex| Identifier::parse(hex))
                .collect::<bitcache::Result<Vec<_>>>()
            {
                Ok(parsed) => parsed,
                Err(e) => {
                    output(
                        format,
                        &serde_json::json!({
                            "status": "error",
                            "message": e.to_string()
                        }),
                    );
                    std::process::exit(2);
                }
            };
            let mut all_present = true;
            let mut items = Vec::new();
            for id in &parsed {
                let present = filter.contains(id);
                all_present &= present;
                items.push(serde_json::json!({
                    "id": id.to_hex(),
                    "present": present
                }));
            }
            output(
                format,
                &serde_json::json!({
                    "count": items.len(),
                    "results": items
                }),
            );
            if !all_present {
                std::process::exit(1);
            }
        }

        FilterCommands::Info { path } => {
            let filter = Filter::load(&path)?;
            output(format, &filter_info(&path, &filter));
        }

        FilterCommands::Merge { a, b, op, output: out } => {
            let left = Filter::load(&a)?;
            let right = Filter::load(&b)?;
            let merged = left.merge(&right, op)?;
            merged.save(&out, config.write_header)?;
            let mut info = filter_info(&out, &merged);
            info["op"] = serde_json::json!(op.as_str());
            output(format, &info);
        }
    }

    Ok(())
}

fn load_config(path: Option<&Path>) -> anyhow::Result<Config> {
    match path {
        Some(path) => Ok(Config::load(path)?),
        None => match Config::default_path() {
            Ok(path) => Ok(Config::load(path)?),
            Err(e) => {
                tracing::warn!(error = %e, "using default config");
                Ok(Config::default())
            }
        },
    }
}

fn describe(id: &Identifier) -> serde_json::Value {
    serde_json::json!({
        "id": id.to_hex(),
        "size": id.size(),
        "base64": id.to_base64(),
        "hashes": id.hashes()
    })
}

fn filter_info(path: &Path, filter: &Filter) -> serde_json::Value {
    serde_json::json!({
        "path": path.display().to_string(),
        "bytesize": filter.bytesize(),
        "bitsize": filter.bitsize(),
        "space": filter.space(),
        "empty": filter.is_empty()
    })
}

fn output(format: &OutputFormat, value: &serde_json::Value) {
    let rendered = match format {
        OutputFormat::Json => serde_json::to_string(value),
        OutputFormat::Text => serde_json::to_string_pretty(value),
    };
    match rendered {
        Ok(text) => println!("{}", text),
        Err(e) => tracing::error!(error = %e, "failed to render output"),
    }
}
