//! Listing output
//!
//! `ListingPrinter` writes section headers and node listings to stdout, with
//! optional colour on the headers. Listing lines themselves are never coloured
//! so they stay byte-identical to `FsNode::write_listing`.

use std::io::{self, Write};

use termcolor::{Color, ColorChoice, ColorSpec, StandardStream, WriteColor};

use crate::file_type::FileType;
use crate::node::FsNode;
use crate::policy::PolicyTables;

/// Configuration for output formatting.
#[derive(Debug, Clone, Default)]
pub struct OutputConfig {
    pub use_color: bool,
}

/// Dashed header line preceding each listing section.
pub fn section_header(title: &str) -> String {
    format!("----------------- {} -------------------", title)
}

/// Title of the section listing one file type.
pub fn type_section_title(file_type: FileType) -> String {
    format!("Indexed {} Files", file_type.label())
}

/// Printer for indexed trees on stdout.
pub struct ListingPrinter {
    stdout: StandardStream,
}

impl ListingPrinter {
    pub fn new(config: OutputConfig) -> Self {
        let choice = if config.use_color {
            ColorChoice::Auto
        } else {
            ColorChoice::Never
        };
        Self {
            stdout: StandardStream::stdout(choice),
        }
    }

    pub fn header(&mut self, title: &str) -> io::Result<()> {
        self.stdout
            .set_color(ColorSpec::new().set_fg(Some(Color::Cyan)).set_bold(true))?;
        write!(self.stdout, "{}", section_header(title))?;
        self.stdout.reset()?;
        writeln!(self.stdout)
    }

    /// Header plus every indexed file.
    pub fn all_files(&mut self, root: &FsNode) -> io::Result<()> {
        self.header("All Indexed Files")?;
        self.stdout.flush()?;
        root.list()
    }

    /// Header plus the files of one type.
    pub fn files_of_type(&mut self, root: &FsNode, file_type: FileType) -> io::Result<()> {
        self.header(&type_section_title(file_type))?;
        self.stdout.flush()?;
        root.list_type(file_type)
    }

    /// Header plus the files whose type the policy marks for backup.
    pub fn backupable_files(&mut self, root: &FsNode, policy: &PolicyTables) -> io::Result<()> {
        self.header("Backupable Files")?;
        write_backupable(&mut self.stdout, root, policy)
    }

    /// Trailing directory and file totals.
    pub fn summary(&mut self, root: &FsNode) -> io::Result<()> {
        let (dirs, files) = root.counts();
        writeln!(self.stdout)?;
        writeln!(self.stdout, "{} directories, {} files", dirs, files)
    }
}

/// Write listing lines for every backupable file under `root`.
pub fn write_backupable<W: Write>(
    out: &mut W,
    root: &FsNode,
    policy: &PolicyTables,
) -> io::Result<()> {
    for file in root
        .files()
        .filter(|file| policy.is_backupable(file.file_type()))
    {
        writeln!(out, "{}", file.listing_line())?;
    }
    Ok(())
}

/// Print indexed roots as one pretty-printed JSON array to stdout.
pub fn print_json(roots: &[FsNode]) -> io::Result<()> {
    let json = serde_json::to_string_pretty(roots).map_err(io::Error::other)?;
    println!("{}", json);
    Ok(())
}
