//! Fragment Inliner CLI
//!
//! Usage:
//!   fragment-inliner [OPTIONS] [INPUT]
//!
//! Options:
//!   -o, --output <PATH>       Output file, or output directory when INPUT is a directory
//!   -c, --components <DIR>    Components directory (default: components)
//!       --config <FILE>       Configuration file (TOML format)
//!       --no-banner           Do not wrap SVG fragments in START/END comments
//!       --max-depth <N>       Maximum fragment nesting depth
//!   -l, --list                List placeholders instead of resolving them
//!   -v, --verbose             Log every inlined fragment
//!   -h, --help                Print help

use std::fs;
use std::io::{self, IsTerminal, Read};
use std::path::{Path, PathBuf};
use std::process;

use clap::{CommandFactory, Parser};

use fragment_inliner::{
    inline_dir, inline_file, placeholders, Inliner, InlinerConfig, StderrReporter,
};

#[derive(Parser)]
#[command(name = "fragment-inliner")]
#[command(about = "Inline component fragments into HTML templates")]
struct Cli {
    /// Input file or directory (reads from stdin if not provided)
    input: Option<PathBuf>,

    /// Output file, or output directory when INPUT is a directory
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Components directory holding the fragments
    #[arg(short, long)]
    components: Option<PathBuf>,

    /// Configuration file (TOML format)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Do not wrap SVG fragments in START/END comments
    #[arg(long)]
    no_banner: bool,

    /// Maximum fragment nesting depth (unlimited by default)
    #[arg(long)]
    max_depth: Option<usize>,

    /// List placeholders and their fragment paths instead of resolving
    #[arg(short, long)]
    list: bool,

    /// Log every inlined fragment
    #[arg(short, long)]
    verbose: bool,
}

fn main() {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => match InlinerConfig::from_file(path) {
            Ok(c) => c,
            Err(e) => fail(format!("Error loading config '{}': {}", path.display(), e)),
        },
        None => InlinerConfig::default(),
    };
    if let Some(dir) = &cli.components {
        config = config.with_components_dir(dir);
    }
    if cli.no_banner {
        config = config.with_svg_banner(false);
    }
    if let Some(depth) = cli.max_depth {
        config = config.with_max_depth(depth);
    }

    // No input file and an interactive stdin: nothing to read, show usage
    if cli.input.is_none() && io::stdin().is_terminal() {
        let _ = Cli::command().print_help();
        return;
    }

    let reporter = StderrReporter::new(cli.verbose);
    let inliner = Inliner::with_reporter(config, &reporter);

    if let Some(dir) = cli.input.as_deref().filter(|p| p.is_dir()) {
        if cli.list {
            fail("--list expects a file or stdin, not a directory".to_string());
        }
        let Some(dest) = &cli.output else {
            fail(format!("'{}' is a directory; --output <DIR> is required", dir.display()));
        };
        match inline_dir(&inliner, dir, dest) {
            Ok(summary) => {
                if cli.verbose {
                    eprintln!(
                        "wrote {} file(s) to {}, skipped {}",
                        summary.written,
                        dest.display(),
                        summary.skipped
                    );
                }
            }
            Err(e) => fail(format!("Error: {}", e)),
        }
        return;
    }

    if let (Some(input), Some(output), false) = (&cli.input, &cli.output, cli.list) {
        if let Err(e) = inline_file(&inliner, input, output) {
            fail(format!("Error: {}", e));
        }
        return;
    }

    let (source, origin) = read_input(cli.input.as_deref());

    let result = if cli.list {
        list_placeholders(&inliner, &source)
    } else {
        inliner.resolve_named(&source, &origin)
    };

    match &cli.output {
        Some(path) => {
            if let Err(e) = fs::write(path, result) {
                fail(format!("Error writing '{}': {}", path.display(), e));
            }
        }
        None => print!("{}", result),
    }
}

fn read_input(input: Option<&Path>) -> (String, String) {
    match input {
        Some(path) => match fs::read_to_string(path) {
            Ok(content) => (content, path.display().to_string()),
            Err(e) => fail(format!("Error reading file '{}': {}", path.display(), e)),
        },
        None => {
            let mut buffer = String::new();
            match io::stdin().read_to_string(&mut buffer) {
                Ok(_) => (buffer, "<stdin>".to_string()),
                Err(e) => fail(format!("Error reading from stdin: {}", e)),
            }
        }
    }
}

/// One line per placeholder: token, fragment path, and whether it exists
fn list_placeholders(inliner: &Inliner<'_>, source: &str) -> String {
    let mut out = String::new();
    for (placeholder, _) in placeholders(source) {
        let path = inliner.store().fragment_path(&placeholder);
        let status = if path.exists() { "ok" } else { "missing" };
        out.push_str(&format!("{}\t{}\t{}\n", placeholder, path.display(), status));
    }
    out
}

fn fail(message: String) -> ! {
    eprintln!("{}", message);
    process::exit(1);
}
