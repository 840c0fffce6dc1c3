//! Result printing
//!
//! - `text` - header line per file plus one line per declaration
//! - `json` - pretty-printed JSON

mod config;
mod json;
mod text;

pub use config::{OutputConfig, OutputFormat};
pub use json::write_json;
pub use text::write_text;

use std::io::{self, Write};

use crate::extractors::FileDeclarations;
use crate::filter::Selection;

/// Print selected declarations to stdout in the configured format.
pub fn print_declarations(
    files: &[FileDeclarations],
    selection: &Selection,
    config: &OutputConfig,
) -> io::Result<()> {
    let stdout = io::stdout();
    let mut out = io::BufWriter::new(stdout.lock());
    match config.format {
        OutputFormat::Text => write_text(&mut out, files, selection, config.show_headers)?,
        OutputFormat::Json => write_json(&mut out, files, selection)?,
    }
    out.flush()
}
