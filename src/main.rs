//! CLI entry point for gosig

use std::ffi::OsString;
use std::path::PathBuf;
use std::process;

use clap::Parser;
use gosig::{
    GosigError, OutputConfig, OutputFormat, Selection, SelectionConfig, collect_declarations,
    print_declarations,
};

#[derive(Parser, Debug)]
#[command(name = "gosig")]
#[command(about = "Print the signatures of top-level Go declarations")]
#[command(version)]
struct Args {
    /// Go files or package directories
    paths: Vec<PathBuf>,

    /// Show private declarations
    #[arg(short = 'd', long = "private")]
    private: bool,

    /// Show public declarations
    #[arg(short = 'D', long = "public")]
    public: bool,

    /// Show import declarations
    #[arg(short = 'i', long = "imports")]
    imports: bool,

    /// Show function/method declarations
    #[arg(short = 'f', long = "funcs")]
    funcs: bool,

    /// Show global (var and const) declarations
    #[arg(short = 'g', long = "globals")]
    globals: bool,

    /// Show type declarations
    #[arg(short = 't', long = "types")]
    types: bool,

    /// Match declaration names against a regular expression
    #[arg(short = 'm', long = "match", value_name = "PATTERN")]
    pattern: Option<String>,

    /// Hide file/package names
    #[arg(short = 'p', long = "no-headers")]
    no_headers: bool,

    /// Hide error and warning messages
    #[arg(short = 'q', long = "quiet")]
    quiet: bool,

    /// Include *_test.go files when scanning directories (also accepted as -tests)
    #[arg(long = "tests")]
    tests: bool,

    /// Output in JSON format
    #[arg(long = "json")]
    json: bool,
}

impl Args {
    fn selection_config(&self) -> SelectionConfig {
        SelectionConfig {
            private: self.private,
            public: self.public,
            imports: self.imports,
            functions: self.funcs,
            globals: self.globals,
            types: self.types,
            pattern: self.pattern.clone(),
        }
    }

    fn output_config(&self) -> OutputConfig {
        OutputConfig {
            show_headers: !self.no_headers,
            format: if self.json {
                OutputFormat::Json
            } else {
                OutputFormat::Text
            },
        }
    }
}

/// Accept the single-dash `-tests` spelling alongside `--tests`.
fn normalize_args(args: impl IntoIterator<Item = OsString>) -> Vec<OsString> {
    args.into_iter()
        .map(|arg| {
            if arg.to_str() == Some("-tests") {
                OsString::from("--tests")
            } else {
                arg
            }
        })
        .collect()
}

fn run(args: &Args) -> Result<(), GosigError> {
    if args.paths.is_empty() {
        return Err(GosigError::NoPaths);
    }
    let selection = Selection::from_config(&args.selection_config())?;

    let quiet = args.quiet;
    let files = collect_declarations(&args.paths, args.tests, |file| {
        if quiet {
            return;
        }
        for diagnostic in &file.diagnostics {
            eprintln!(
                "gosig: warning: bad declaration in {} at line {} ({}), results may be omitted",
                file.file_name, diagnostic.line, diagnostic.message
            );
        }
    })?;

    print_declarations(&files, &selection, &args.output_config())?;
    Ok(())
}

fn main() {
    let args = match Args::try_parse_from(normalize_args(std::env::args_os())) {
        Ok(args) => args,
        Err(e) if e.use_stderr() => {
            eprint!("{}", e);
            process::exit(1);
        }
        Err(e) => {
            let _ = e.print();
            process::exit(0);
        }
    };

    gosig::init_logging();

    if let Err(e) = run(&args) {
        if !args.quiet {
            eprintln!("gosig: {}", e);
        }
        process::exit(1);
    }
}
