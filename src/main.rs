//! CLI entry point for filedex

use std::io::IsTerminal;
use std::path::PathBuf;
use std::process;

use clap::{Parser, ValueEnum};
use filedex::{FileType, Indexer, IndexerConfig, ListingPrinter, OutputConfig, PolicyTables, print_json};
use tracing::Level;

/// Color output mode
#[derive(Debug, Clone, Copy, Default, ValueEnum)]
enum ColorMode {
    /// Auto-detect based on terminal and environment
    #[default]
    Auto,
    /// Always use colors
    Always,
    /// Never use colors
    Never,
}

/// Determine whether to use color output based on mode and environment.
fn should_use_color(mode: ColorMode) -> bool {
    match mode {
        ColorMode::Always => true,
        ColorMode::Never => false,
        ColorMode::Auto => {
            // Respect NO_COLOR environment variable (https://no-color.org/)
            if std::env::var_os("NO_COLOR").is_some() {
                return false;
            }
            if std::env::var("TERM").map(|t| t == "dumb").unwrap_or(false) {
                return false;
            }
            std::io::stdout().is_terminal()
        }
    }
}

#[derive(Parser, Debug)]
#[command(name = "filedex")]
#[command(about = "Index directories by file type and list them with human-readable sizes")]
#[command(version)]
struct Args {
    /// Directories to index
    #[arg(default_value = ".")]
    paths: Vec<PathBuf>,

    /// After the full listing, list only files of TYPE (can be used multiple times).
    /// Types: text, xml, executable, ms-document, ms-excel, ms-powerpoint, unknown
    #[arg(
        short = 't',
        long = "type",
        value_name = "TYPE",
        value_parser = parse_file_type,
        conflicts_with = "json"
    )]
    types: Vec<FileType>,

    /// Mark TYPE as indexable (can be used multiple times)
    #[arg(long = "index", value_name = "TYPE", value_parser = parse_file_type)]
    index: Vec<FileType>,

    /// Mark TYPE as not indexable (can be used multiple times)
    #[arg(long = "skip", value_name = "TYPE", value_parser = parse_file_type)]
    skip: Vec<FileType>,

    /// Also list files whose type is marked for backup
    #[arg(short = 'b', long = "backupable", conflicts_with = "json")]
    backupable: bool,

    /// Ignore entries matching pattern (can be used multiple times)
    #[arg(short = 'I', long = "ignore")]
    ignore: Vec<String>,

    /// Print directory and file totals after each listing
    #[arg(short = 's', long = "summary", conflicts_with = "json")]
    summary: bool,

    /// Output the indexed trees as one JSON array
    #[arg(long = "json")]
    json: bool,

    /// Control color output: auto, always, never
    #[arg(long = "color", value_name = "WHEN", default_value = "auto")]
    color: ColorMode,

    /// Log more detail to stderr (-v info, -vv debug, -vvv trace)
    #[arg(short = 'v', long = "verbose", action = clap::ArgAction::Count)]
    verbose: u8,
}

/// Parse a file type name. Directories are always indexed and never listed,
/// so `directory` is not a valid choice here.
fn parse_file_type(s: &str) -> Result<FileType, String> {
    match s.parse::<FileType>()? {
        FileType::Directory => Err("directories are always indexed and never listed".to_string()),
        file_type => Ok(file_type),
    }
}

fn init_logging(verbosity: u8) {
    let level = match verbosity {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_max_level(level)
        .with_target(false)
        .init();
}

/// Default policy with the command line overrides applied. Skips win over indexes.
fn build_policy(args: &Args) -> PolicyTables {
    let mut policy = PolicyTables::shared().clone();
    for &file_type in &args.index {
        policy.add_indexable_map(file_type, true);
    }
    for &file_type in &args.skip {
        policy.add_indexable_map(file_type, false);
    }
    policy
}

fn main() {
    let args = Args::parse();
    init_logging(args.verbose);

    let indexer = Indexer::new(build_policy(&args)).with_config(IndexerConfig {
        ignore_patterns: args.ignore.clone(),
    });
    let mut printer = ListingPrinter::new(OutputConfig {
        use_color: !args.json && should_use_color(args.color),
    });

    let mut failed = false;
    let mut json_roots = Vec::new();
    for path in &args.paths {
        let root = match indexer.process(path) {
            Some(root) => root,
            None => {
                eprintln!(
                    "filedex: cannot access '{}': No such file or directory",
                    path.display()
                );
                failed = true;
                continue;
            }
        };
        tracing::info!(path = %path.display(), "indexed");

        if args.json {
            json_roots.push(root);
        } else if let Err(e) = print_sections(&mut printer, &root, &args, indexer.policy()) {
            eprintln!("filedex: error writing output: {}", e);
            process::exit(1);
        }
    }

    if args.json {
        if let Err(e) = print_json(&json_roots) {
            eprintln!("filedex: error writing output: {}", e);
            process::exit(1);
        }
    }

    if failed {
        process::exit(1);
    }
}

fn print_sections(
    printer: &mut ListingPrinter,
    root: &filedex::FsNode,
    args: &Args,
    policy: &PolicyTables,
) -> std::io::Result<()> {
    printer.all_files(root)?;
    for &file_type in &args.types {
        printer.files_of_type(root, file_type)?;
    }
    if args.backupable {
        printer.backupable_files(root, policy)?;
    }
    if args.summary {
        printer.summary(root)?;
    }
    Ok(())
}
