//! Stree CLI
//!
//! Dumps the source-accurate tree of a Ruby file, its lexical event stream,
//! or checks a batch of files in parallel.

mod commands;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::{prelude::*, EnvFilter};
use tracing_tree::HierarchicalLayer;

#[derive(Parser, Debug)]
#[command(name = "stree", author, version, about, long_about = None)]
struct Args {
    /// Tracing filter (e.g. `stree_parse=trace`). Falls back to `RUST_LOG`.
    #[arg(long, global = true, value_name = "FILTER")]
    log: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the syntax tree of a file
    Parse {
        file: PathBuf,
        /// Print JSON instead of an S-expression
        #[arg(long, default_value_t = false)]
        json: bool,
    },
    /// Print the token, comment and embedded document stream of a file
    Lex { file: PathBuf },
    /// Parse every file and report errors
    Check {
        #[arg(required = true)]
        files: Vec<PathBuf>,
    },
}

fn main() {
    let args = Args::parse();
    init_tracing(args.log.as_deref());

    let ok = match &args.command {
        Command::Parse { file, json } => commands::parse_file(file, *json),
        Command::Lex { file } => commands::lex_file(file),
        Command::Check { files } => commands::check_files(files),
    };
    if !ok {
        std::process::exit(1);
    }
}

/// Install a hierarchical stderr subscriber when a filter is given, either
/// by `--log` or by `RUST_LOG`. Logging stays off otherwise.
fn init_tracing(directives: Option<&str>) {
    let filter = match directives {
        Some(directives) => EnvFilter::new(directives),
        None => match EnvFilter::try_from_default_env() {
            Ok(filter) => filter,
            Err(_) => return,
        },
    };
    tracing_subscriber::registry()
        .with(filter)
        .with(
            HierarchicalLayer::new(2)
                .with_writer(std::io::stderr)
                .with_targets(true),
        )
        .init();
}
