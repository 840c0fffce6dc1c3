//! JSON output formatting

use std::io::{self, Write};

use serde::Serialize;

use crate::extractors::{Declaration, FileDeclarations};
use crate::filter::Selection;

#[derive(Debug, Serialize)]
struct JsonFile<'a> {
    file: &'a str,
    package: &'a str,
    declarations: Vec<&'a Declaration>,
}

/// Write the selected declarations of all files as pretty-printed JSON.
pub fn write_json<W: Write>(
    out: &mut W,
    files: &[FileDeclarations],
    selection: &Selection,
) -> io::Result<()> {
    let view: Vec<JsonFile<'_>> = files
        .iter()
        .map(|file| JsonFile {
            file: &file.file_name,
            package: &file.package_name,
            declarations: selection.select(&file.declarations).collect(),
        })
        .collect();
    serde_json::to_writer_pretty(&mut *out, &view).map_err(io::Error::other)?;
    writeln!(out)
}
