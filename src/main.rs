//! CLI tool to tokenize, parse, and check Vanadium source files.

use std::fs;
use std::io::IsTerminal;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Parser, Subcommand, ValueEnum};
use tracing_subscriber::EnvFilter;
use vanadium::{Error, Label, Palette};

/// Vanadium front end
#[derive(Debug, Parser)]
#[command(name = "vanadium", author, version, about)]
struct Args {
    #[command(subcommand)]
    command: Command,

    /// When to color diagnostics
    #[arg(long, value_enum, default_value_t = ColorChoice::Auto, global = true)]
    color: ColorChoice,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Print the token stream of each file
    Tokens {
        #[arg(required = true)]
        files: Vec<PathBuf>,
    },

    /// Print the syntax tree of each file
    Parse {
        #[arg(required = true)]
        files: Vec<PathBuf>,
    },

    /// Check that each file parses
    Check {
        #[arg(required = true)]
        files: Vec<PathBuf>,
    },
}

impl Command {
    fn files(&self) -> &[PathBuf] {
        match self {
            Self::Tokens { files } | Self::Parse { files } | Self::Check { files } => files,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum ColorChoice {
    Auto,
    Always,
    Never,
}

impl ColorChoice {
    fn palette(self) -> Palette {
        match self {
            Self::Always => Palette::ANSI,
            Self::Never => Palette::PLAIN,
            Self::Auto if std::io::stderr().is_terminal() => Palette::ANSI,
            Self::Auto => Palette::PLAIN,
        }
    }
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let palette = args.color.palette();

    let mut had_error = false;

    for path in args.command.files() {
        let content = match fs::read_to_string(path) {
            Ok(c) => c,
            Err(e) => {
                eprintln!("{}: {e}", path.display());
                had_error = true;
                continue;
            }
        };

        let result = match args.command {
            Command::Tokens { .. } => print_tokens(&content),
            Command::Parse { .. } => print_tree(&content),
            Command::Check { .. } => check(path, &content),
        };

        if let Err(err) = result {
            tracing::debug!(file = %path.display(), error = ?err, "failed");
            let diagnostic = err
                .to_diagnostic()
                .with_label(Label::new("File", path.display().to_string()));
            eprint!("{}", diagnostic.render_with(&palette));
            had_error = true;
        }
    }

    if had_error {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}

fn print_tokens(content: &str) -> Result<(), Error> {
    let tokens = vanadium::tokenize(content)?;
    for token in &tokens {
        println!("{token}");
    }
    Ok(())
}

fn print_tree(content: &str) -> Result<(), Error> {
    let nodes = vanadium::parse_str(content)?;
    print!("{}", vanadium::pretty(nodes.as_slice()));
    Ok(())
}

fn check(path: &Path, content: &str) -> Result<(), Error> {
    let nodes = vanadium::parse_str(content)?;
    let declarations = nodes.len() - 1;
    eprintln!("{}: valid ({declarations} top-level node(s))", path.display());
    Ok(())
}
