//! Plain text output

use std::io::{self, Write};

use crate::extractors::FileDeclarations;
use crate::filter::Selection;

/// Write the header and the selected declarations of each file.
pub fn write_text<W: Write>(
    out: &mut W,
    files: &[FileDeclarations],
    selection: &Selection,
    show_headers: bool,
) -> io::Result<()> {
    for file in files {
        if show_headers {
            writeln!(out, "{}:{}", file.file_name, file.package_name)?;
        }
        for decl in selection.select(&file.declarations) {
            writeln!(out, "{}", decl.rendered)?;
        }
    }
    Ok(())
}
