//! Output configuration types

/// How results are printed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputFormat {
    /// One header line per file, then one line per declaration
    #[default]
    Text,
    /// Pretty-printed JSON array of files
    Json,
}

/// Configuration for output formatting.
#[derive(Debug, Clone)]
pub struct OutputConfig {
    /// Print `file:package` before each file's declarations (text only)
    pub show_headers: bool,
    pub format: OutputFormat,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            show_headers: true,
            format: OutputFormat::Text,
        }
    }
}
