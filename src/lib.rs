//! gosig - print the signatures of top-level Go declarations
//!
//! Pipeline, one file at a time:
//! source text → [`syntax::parse_source`] → [`extractors::extract_file`]
//! → [`filter::Selection`] → [`output`].

pub mod driver;
pub mod error;
pub mod extractors;
pub mod file_utils;
pub mod filter;
pub mod output;
pub mod render;
pub mod string_utils;
pub mod syntax;

#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;

use tracing_subscriber::EnvFilter;

pub use driver::{collect_declarations, process_file, resolve_inputs};
pub use error::{GosigError, Result};
pub use extractors::{DeclKind, Declaration, Diagnostic, FileDeclarations, extract_file};
pub use filter::{KindMask, Selection, SelectionConfig};
pub use output::{OutputConfig, OutputFormat, print_declarations};
pub use render::{render_signature, render_type};
pub use syntax::{SourceFile, parse_source};

/// Environment variable holding the log filter directives.
pub const LOG_ENV: &str = "GOSIG_LOG";

/// Install the stderr log subscriber. Logging is off unless `GOSIG_LOG` is set.
pub fn init_logging() {
    let env_filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("off"));
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_file(false)
        .with_line_number(false)
        .init();
}
